//! URL helpers for building recipe service endpoints.

use reqwest::Url;

/// Normalize a base URL by removing trailing slashes
///
/// # Examples
///
/// ```
/// use recipe_bot::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("https://api.spoonacular.com/recipes/"), "https://api.spoonacular.com/recipes");
/// assert_eq!(normalize_base_url("https://api.spoonacular.com/recipes//"), "https://api.spoonacular.com/recipes");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Join a base URL and an endpoint path with exactly one slash between them.
///
/// # Examples
///
/// ```
/// use recipe_bot::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://api.spoonacular.com/recipes/", "/716429/information"),
///     "https://api.spoonacular.com/recipes/716429/information"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}

/// Host and port a base URL connects to, with the scheme's default port
/// filled in. Returns `None` for URLs without a host.
pub fn host_and_port(base_url: &str) -> Option<(String, u16)> {
    let url = Url::parse(base_url).ok()?;
    let host = url.host_str()?.to_string();
    let port = url.port_or_known_default()?;
    Some((host, port))
}
