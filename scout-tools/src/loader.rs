use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use scout_core::ToolError;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::extract::extract_page_text;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) scout/0.1";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PageDocument {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
}

/// Fetches a URL and returns its textual documents (possibly none).
#[async_trait::async_trait]
pub trait PageLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<Vec<PageDocument>, ToolError>;
}

#[derive(Clone, Debug)]
pub struct HttpPageLoader {
    http: Client,
}

impl HttpPageLoader {
    pub fn new() -> Result<Self, ToolError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ToolError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| ToolError::Http(err.to_string()))?;
        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl PageLoader for HttpPageLoader {
    async fn load(&self, url: &str) -> Result<Vec<PageDocument>, ToolError> {
        let parsed = Url::parse(url)
            .map_err(|err| ToolError::InvalidInput(format!("invalid url '{url}': {err}")))?;

        let response = self
            .http
            .get(parsed)
            .send()
            .await
            .map_err(|err| ToolError::Http(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::ExecutionFailed(format!(
                "fetching {url} returned HTTP {status}"
            )));
        }

        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("html"))
            .unwrap_or(true);
        let body = response
            .text()
            .await
            .map_err(|err| ToolError::Http(err.to_string()))?;

        let (title, content) = if is_html {
            let page = extract_page_text(&body);
            (page.title, page.text)
        } else {
            (None, body.trim().to_string())
        };
        tracing::debug!(url, chars = content.len(), "page loaded");

        if content.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![PageDocument {
            url: url.to_string(),
            title,
            content,
        }])
    }
}
