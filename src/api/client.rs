use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::{Information, Ingredient, IngredientResponse, Instruction, SearchResponse};
use crate::utils::url::construct_api_url;

/// Errors raised while talking to the recipe service.
#[derive(Debug)]
pub enum ApiError {
    /// The request never produced a response (connect failure, timeout, TLS).
    Transport(reqwest::Error),

    /// The service answered with a non-success status.
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The body did not match the expected shape.
    Decode(serde_json::Error),
}

impl ApiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Transport(err) if err.is_timeout())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(err) if err.is_timeout() => {
                write!(f, "Request timed out: {err}")
            }
            ApiError::Transport(err) => write!(f, "Request failed: {err}"),
            ApiError::Status { status, body } => {
                write!(f, "API request failed with status {status}: {body}")
            }
            ApiError::Decode(err) => write!(f, "Unexpected response shape: {err}"),
        }
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ApiError::Transport(err) => Some(err),
            ApiError::Status { .. } => None,
            ApiError::Decode(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err)
    }
}

/// Raw endpoint access for the recipe service.
///
/// Implementations issue exactly one request per call; orchestration
/// (two-step resolution, error normalisation) lives in
/// [`crate::core::lookup`].
#[async_trait]
pub trait RecipeBackend: Send + Sync {
    async fn complex_search(&self, query: &str, number: u32) -> Result<SearchResponse, ApiError>;

    async fn information(&self, id: u64) -> Result<Information, ApiError>;

    async fn ingredient_widget(&self, id: u64) -> Result<Vec<Ingredient>, ApiError>;

    async fn analyzed_instructions(&self, id: u64) -> Result<Vec<Instruction>, ApiError>;
}

pub struct HttpRecipeBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpRecipeBackend {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = construct_api_url(&self.base_url, endpoint);
        debug!(%url, "Requesting recipe endpoint");

        let response = self
            .client
            .get(url)
            .header("x-api-key", &self.api_key)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(ApiError::Decode)
    }
}

#[async_trait]
impl RecipeBackend for HttpRecipeBackend {
    async fn complex_search(&self, query: &str, number: u32) -> Result<SearchResponse, ApiError> {
        self.get_json(
            "complexSearch",
            &[("query", query.to_string()), ("number", number.to_string())],
        )
        .await
    }

    async fn information(&self, id: u64) -> Result<Information, ApiError> {
        self.get_json(&format!("{id}/information"), &[]).await
    }

    async fn ingredient_widget(&self, id: u64) -> Result<Vec<Ingredient>, ApiError> {
        let response: IngredientResponse = self
            .get_json(&format!("{id}/ingredientWidget.json"), &[])
            .await?;
        Ok(response.ingredients)
    }

    async fn analyzed_instructions(&self, id: u64) -> Result<Vec<Instruction>, ApiError> {
        self.get_json(&format!("{id}/analyzedInstructions"), &[])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lookup::{RecipeApi, RecipeLookup};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn local_backend(base_url: String) -> HttpRecipeBackend {
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(3))
            .build()
            .expect("client");
        HttpRecipeBackend::with_client(client, base_url, "secret")
    }

    /// Serve one canned HTTP response and hand back the raw request text.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut buf = vec![0u8; 4096];
            let read = socket.read(&mut buf).await.expect("read");
            let request = String::from_utf8_lossy(&buf[..read]).to_string();
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.expect("write");
            request
        });
        (format!("http://{addr}/recipes"), handle)
    }

    /// Accepts connections and never answers them.
    async fn silent_server() -> (String, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let handle = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        (format!("http://{addr}/recipes"), handle)
    }

    fn impatient_backend(base_url: String) -> HttpRecipeBackend {
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("client");
        HttpRecipeBackend::with_client(client, base_url, "secret")
    }

    #[tokio::test]
    async fn complex_search_sends_key_and_query() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"results":[{"id":9,"title":"Apple Pie","image":"a.jpg","imageType":"jpg"}]}"#,
        )
        .await;
        let backend = local_backend(base_url);

        let response = backend
            .complex_search("apple pie", 1)
            .await
            .expect("search");
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].title, "Apple Pie");

        let request = server.await.expect("server");
        let request_line = request.lines().next().unwrap_or_default();
        assert!(request_line.starts_with("GET /recipes/complexSearch?"));
        assert!(request_line.contains("query=apple+pie") || request_line.contains("query=apple%20pie"));
        assert!(request_line.contains("number=1"));
        assert!(request.to_ascii_lowercase().contains("x-api-key: secret"));
    }

    #[tokio::test]
    async fn ingredient_widget_unwraps_the_ingredient_list() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"ingredients":[{"name":"flour","image":"flour.png","amount":{"metric":{"unit":"g","value":250.0},"us":{"unit":"cups","value":2.0}}}]}"#,
        )
        .await;
        let backend = local_backend(base_url);

        let ingredients = backend.ingredient_widget(12).await.expect("ingredients");
        assert_eq!(ingredients.len(), 1);
        assert_eq!(ingredients[0].amount.metric.unit, "g");

        let request = server.await.expect("server");
        assert!(request.starts_with("GET /recipes/12/ingredientWidget.json"));
    }

    #[tokio::test]
    async fn non_success_status_is_reported_with_body() {
        let (base_url, _server) =
            serve_once("HTTP/1.1 402 Payment Required", r#"{"message":"quota"}"#).await;
        let backend = local_backend(base_url);

        let err = backend.information(1).await.expect_err("should fail");
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status.as_u16(), 402);
                assert!(body.contains("quota"));
            }
            other => panic!("expected status error, got {other}"),
        }
    }

    #[tokio::test]
    async fn unexpected_shape_is_a_decode_error() {
        let (base_url, _server) = serve_once("HTTP/1.1 200 OK", r#"{"id":"not-a-number"}"#).await;
        let backend = local_backend(base_url);

        let err = backend.information(1).await.expect_err("should fail");
        assert!(matches!(err, ApiError::Decode(_)));
        assert!(!err.is_timeout());
    }

    #[tokio::test]
    async fn hung_server_times_out() {
        let (base_url, server) = silent_server().await;
        let backend = impatient_backend(base_url);

        let err = backend
            .complex_search("stew", 1)
            .await
            .expect_err("should time out");
        assert!(err.is_timeout(), "expected a timeout, got {err}");
        assert!(err.to_string().starts_with("Request timed out"));
        server.abort();
    }

    #[tokio::test]
    async fn timeout_takes_the_operation_error_path() {
        let (base_url, server) = silent_server().await;
        let lookup = RecipeLookup::new(impatient_backend(base_url));

        let result = lookup.info("stew").await;
        assert_eq!(
            result.error_message(),
            Some("Error: Failed to get information for recipe stew")
        );
        server.abort();
    }
}
