use crate::core::config::data::{path_display, Config};

/// Keep all but the last four characters of a key hidden.
fn mask_key(key: &str) -> String {
    let visible: String = key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if key.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("****{visible}")
    }
}

impl Config {
    pub fn print_all(&self) {
        for line in self.describe() {
            println!("{line}");
        }
    }

    pub(crate) fn describe(&self) -> Vec<String> {
        let mut lines = vec!["Current configuration:".to_string()];
        match (&self.api_key, self.effective_api_key()) {
            (Some(key), _) => lines.push(format!("  api-key: {}", mask_key(key))),
            (None, Some(key)) => lines.push(format!("  api-key: {} (from environment)", mask_key(&key))),
            (None, None) => lines.push("  api-key: (unset)".to_string()),
        }
        match &self.base_url {
            Some(url) => lines.push(format!("  base-url: {url}")),
            None => lines.push(format!("  base-url: {} (default)", self.effective_base_url())),
        }
        lines.push(format!("  timeout-secs: {}", self.timeout().as_secs()));
        lines.push(format!("  search-results: {}", self.effective_search_results()));
        lines.push(format!(
            "  history-file: {}",
            path_display(self.effective_history_file())
        ));
        lines
    }
}
