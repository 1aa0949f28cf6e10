use std::collections::HashMap;
use std::sync::Arc;

use scout_core::{LlmRequest, Message, Tool, ToolCallingLlm, ToolError, Value};
use scout_prompt::PromptTemplate;
use serde_json::json;

use crate::loader::PageLoader;

pub const SCRAPE_NOTES_PROMPT: &str = "You are doing research. You are trying to figure out information. You just scraped the following website: {{url}}

Based on the website content below, jot down some notes summarizing the content on the website

{{content}}";

/// Loads a page and has the model condense it into research notes.
pub struct ScrapeWebsite {
    loader: Arc<dyn PageLoader>,
    llm: Arc<dyn ToolCallingLlm>,
    model: String,
    prompt: PromptTemplate,
}

impl ScrapeWebsite {
    pub fn new(loader: Arc<dyn PageLoader>, llm: Arc<dyn ToolCallingLlm>) -> Self {
        Self {
            loader,
            llm,
            model: String::new(),
            prompt: PromptTemplate::new(SCRAPE_NOTES_PROMPT),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = prompt;
        self
    }
}

#[async_trait::async_trait]
impl Tool for ScrapeWebsite {
    fn name(&self) -> &str {
        "ScrapeWebsite"
    }

    fn description(&self) -> &str {
        "Used to scrape a website"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "url": {"type": "string"}
            },
            "required": ["url"]
        })
    }

    async fn invoke(&self, args: Value) -> Result<Value, ToolError> {
        let url = args
            .get("url")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidInput("missing 'url'".to_string()))?;

        let page = self
            .loader
            .load(url)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ToolError::NoContent {
                location: url.to_string(),
            })?;

        let vars = HashMap::from([
            ("url".to_string(), Value::String(page.url)),
            ("content".to_string(), Value::String(page.content)),
        ]);
        let request = LlmRequest::new(
            self.model.clone(),
            vec![Message::user(self.prompt.render(&vars))],
        );
        let notes = self
            .llm
            .invoke(request)
            .await
            .map_err(|err| ToolError::ExecutionFailed(err.to_string()))?;
        Ok(Value::String(notes.content))
    }
}
