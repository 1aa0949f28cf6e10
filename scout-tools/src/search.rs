use std::fmt;
use std::time::Duration;

use reqwest::Client;
use scout_core::{Tool, ToolError, Value};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

const TAVILY_BASE_URL: &str = "https://api.tavily.com";
const DESCRIPTION: &str = "A search engine optimized for comprehensive, accurate, and trusted results. \
Useful for when you need to answer questions about current events. \
Input should be a search query.";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SearchResult {
    pub url: String,
    pub content: String,
}

#[derive(Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
    search_depth: &'static str,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// Web search backed by the Tavily API, exposed to the model as `Search`.
#[derive(Clone)]
pub struct TavilySearch {
    http: Client,
    base_url: Url,
    api_key: SecretString,
    max_results: usize,
}

impl fmt::Debug for TavilySearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TavilySearch")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("max_results", &self.max_results)
            .finish()
    }
}

impl TavilySearch {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ToolError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|err| ToolError::Http(err.to_string()))?;
        let base_url =
            Url::parse(TAVILY_BASE_URL).map_err(|err| ToolError::InvalidInput(err.to_string()))?;
        Ok(Self {
            http,
            base_url,
            api_key: SecretString::new(api_key.into()),
            max_results: 5,
        })
    }

    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Result<Self, ToolError> {
        self.base_url = Url::parse(base_url.as_ref())
            .map_err(|err| ToolError::InvalidInput(format!("invalid search url: {err}")))?;
        Ok(self)
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ToolError> {
        let url = self
            .base_url
            .join("search")
            .map_err(|err| ToolError::InvalidInput(err.to_string()))?;
        let request = TavilyRequest {
            api_key: self.api_key.expose_secret(),
            query,
            max_results: self.max_results,
            search_depth: "advanced",
        };

        let response = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|err| ToolError::Http(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ToolError::Http(format!("HTTP {status}: {body}")));
        }

        let response: TavilyResponse = response
            .json()
            .await
            .map_err(|err| ToolError::Http(err.to_string()))?;
        tracing::debug!(query, results = response.results.len(), "search finished");
        Ok(response.results)
    }
}

#[async_trait::async_trait]
impl Tool for TavilySearch {
    fn name(&self) -> &str {
        "Search"
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "search query to look up"}
            },
            "required": ["query"]
        })
    }

    async fn invoke(&self, args: Value) -> Result<Value, ToolError> {
        let query = args
            .get("query")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .ok_or_else(|| ToolError::InvalidInput("missing 'query'".to_string()))?;
        let results = self.search(query).await?;
        Ok(serde_json::to_value(results)?)
    }
}
