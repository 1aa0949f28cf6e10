use std::sync::{Arc, Mutex};

use serde_json::json;
use scout_core::{
    LlmRequest, LlmResponse, ScoutError, Tool, ToolCallingLlm, ToolError, Value,
};
use scout_tools::{PageDocument, PageLoader, ScrapeWebsite};

struct StaticLoader {
    docs: Vec<PageDocument>,
}

#[async_trait::async_trait]
impl PageLoader for StaticLoader {
    async fn load(&self, _url: &str) -> Result<Vec<PageDocument>, ToolError> {
        Ok(self.docs.clone())
    }
}

#[derive(Default)]
struct NoteTaker {
    prompts: Mutex<Vec<LlmRequest>>,
}

#[async_trait::async_trait]
impl ToolCallingLlm for NoteTaker {
    async fn invoke(&self, request: LlmRequest) -> Result<LlmResponse, ScoutError> {
        self.prompts.lock().unwrap().push(request);
        Ok(LlmResponse {
            content: "- founded 2001".to_string(),
            tool_calls: Vec::new(),
        })
    }
}

fn page(content: &str) -> PageDocument {
    PageDocument {
        url: "https://acme.test/about".to_string(),
        title: None,
        content: content.to_string(),
    }
}

#[tokio::test]
async fn scrape_summarizes_first_document_with_nested_model_call() {
    let llm = Arc::new(NoteTaker::default());
    let loader = Arc::new(StaticLoader {
        docs: vec![page("Acme Co was founded in 2001."), page("second doc")],
    });
    let tool = ScrapeWebsite::new(loader, llm.clone()).with_model("gpt-4o-mini");

    let out = tool
        .invoke(json!({"url": "https://acme.test/about"}))
        .await
        .unwrap();
    assert_eq!(out, Value::String("- founded 2001".to_string()));

    let prompts = llm.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].model, "gpt-4o-mini");
    let prompt = &prompts[0].messages[0].content;
    assert!(prompt.contains("You just scraped the following website: https://acme.test/about"));
    assert!(prompt.contains("Acme Co was founded in 2001."));
    assert!(!prompt.contains("second doc"));
}

#[tokio::test]
async fn page_without_content_is_reported() {
    let llm = Arc::new(NoteTaker::default());
    let tool = ScrapeWebsite::new(Arc::new(StaticLoader { docs: Vec::new() }), llm.clone());

    let err = tool
        .invoke(json!({"url": "https://acme.test/empty"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::NoContent { location } if location == "https://acme.test/empty"));
    assert!(llm.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_url_is_invalid_input() {
    let tool = ScrapeWebsite::new(
        Arc::new(StaticLoader { docs: Vec::new() }),
        Arc::new(NoteTaker::default()),
    );
    let err = tool.invoke(json!({"link": "x"})).await.unwrap_err();
    assert!(matches!(err, ToolError::InvalidInput(_)));
    assert_eq!(tool.name(), "ScrapeWebsite");
}
