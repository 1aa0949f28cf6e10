mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use scout_agent::{ResearchAgent, ToolFailurePolicy};
use scout_core::{LlmRequest, LlmResponse, ScoutError, ToolCallingLlm};
use scout_graph::ExecutionConfig;
use scout_llm::OpenAiCompatibleClient;
use scout_tools::{HttpPageLoader, ScrapeWebsite, TavilySearch};
use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, Command, RunArgs, Settings};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(err) = run(Cli::parse()).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scout=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run(args) => cmd_run(args).await,
        Command::Graph { output } => {
            let diagram = offline_agent()?.mermaid();
            match output {
                Some(path) => std::fs::write(&path, diagram)
                    .with_context(|| format!("write {}", path.display()))?,
                None => print!("{diagram}"),
            }
            Ok(())
        }
    }
}

async fn cmd_run(args: RunArgs) -> Result<()> {
    let input = args.research_input()?;
    let agent = build_agent(&args.settings)?;
    tracing::info!(target_field = %input.target, "starting research");

    let output = agent.run(input).await.context("research run failed")?;
    println!(
        "{}",
        serde_json::to_string(&output).context("serialize output")?
    );
    Ok(())
}

fn build_agent(settings: &Settings) -> Result<ResearchAgent> {
    let llm: Arc<dyn ToolCallingLlm> = Arc::new(
        OpenAiCompatibleClient::builder()
            .base_url(&settings.openai_base_url)?
            .api_key(settings.openai_api_key.expose_secret().clone())
            .default_model(&settings.model)
            .build()
            .context("configure model client")?,
    );

    let search = TavilySearch::new(settings.tavily_api_key.expose_secret().clone())?
        .with_base_url(&settings.tavily_base_url)?
        .with_max_results(settings.max_search_results);
    let scrape = ScrapeWebsite::new(Arc::new(HttpPageLoader::new()?), llm.clone())
        .with_model(settings.model.clone());

    let policy = if settings.continue_on_tool_error {
        ToolFailurePolicy::AppendErrorAndContinue
    } else {
        ToolFailurePolicy::FailFast
    };

    ResearchAgent::builder()
        .llm(llm)
        .tool(Arc::new(scrape))
        .tool(Arc::new(search))
        .model(settings.model.clone())
        .config(ExecutionConfig {
            max_steps: Some(settings.max_steps),
        })
        .tool_failure_policy(policy)
        .build()
        .context("assemble research agent")
}

/// Stands in for the model when only the graph topology is needed.
struct Offline;

#[async_trait::async_trait]
impl ToolCallingLlm for Offline {
    async fn invoke(&self, _request: LlmRequest) -> Result<LlmResponse, ScoutError> {
        Err(ScoutError::LlmProvider(
            "no model configured for graph rendering".to_string(),
        ))
    }
}

fn offline_agent() -> Result<ResearchAgent> {
    ResearchAgent::builder()
        .llm(Arc::new(Offline))
        .build()
        .context("assemble research agent")
}
