use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use scout_agent::ResearchInput;
use scout_core::Value;
use secrecy::SecretString;

#[derive(Debug, Parser)]
#[command(name = "scout", version, about = "Self-checking company research agent")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Research one field and print `{"output": ...}` as JSON.
    Run(RunArgs),
    /// Print the agent graph as a Mermaid flowchart.
    Graph {
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// JSON file with `input_info`, `target` and `examples`.
    #[arg(long, conflicts_with_all = ["target", "examples", "known"])]
    pub input: Option<PathBuf>,

    /// Name of the field to resolve.
    #[arg(long, required_unless_present = "input")]
    pub target: Option<String>,

    /// Example value for the target field (repeatable).
    #[arg(long = "example")]
    pub examples: Vec<String>,

    /// Already known fact as `key=value` (repeatable).
    #[arg(long = "known", value_parser = parse_known)]
    pub known: Vec<(String, String)>,

    #[command(flatten)]
    pub settings: Settings,
}

#[derive(Debug, Args)]
pub struct Settings {
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: SecretString,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com")]
    pub openai_base_url: String,

    #[arg(long, env = "SCOUT_MODEL", default_value = "gpt-4o")]
    pub model: String,

    #[arg(long, env = "TAVILY_API_KEY", hide_env_values = true)]
    pub tavily_api_key: SecretString,

    #[arg(long, env = "TAVILY_BASE_URL", default_value = "https://api.tavily.com")]
    pub tavily_base_url: String,

    #[arg(long, env = "SCOUT_MAX_STEPS", default_value_t = 25)]
    pub max_steps: usize,

    #[arg(long, env = "SCOUT_MAX_SEARCH_RESULTS", default_value_t = 5)]
    pub max_search_results: usize,

    /// Report tool failures to the model instead of aborting.
    #[arg(long, env = "SCOUT_CONTINUE_ON_TOOL_ERROR")]
    pub continue_on_tool_error: bool,
}

fn parse_known(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}

impl RunArgs {
    pub fn research_input(&self) -> Result<ResearchInput> {
        if let Some(path) = &self.input {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            return serde_json::from_str(&raw)
                .with_context(|| format!("parse research input from {}", path.display()));
        }

        let Some(target) = &self.target else {
            bail!("either --input or --target is required");
        };
        let mut input = ResearchInput::new(target.clone());
        for (key, value) in &self.known {
            input = input.with_info(key.clone(), Value::String(value.clone()));
        }
        for example in &self.examples {
            input = input.with_example(example.clone());
        }
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    const KEYS: [&str; 4] = [
        "--openai-api-key",
        "sk-test",
        "--tavily-api-key",
        "tvly-test",
    ];

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(["scout"].iter().chain(args).chain(KEYS.iter()))
    }

    fn run_args(cli: Cli) -> RunArgs {
        match cli.command {
            Command::Run(args) => args,
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn inline_arguments_build_research_input() {
        let cli = parse(&[
            "run",
            "--target",
            "founded_year",
            "--example",
            "1998",
            "--example",
            "2005",
            "--known",
            "name=Acme Co",
        ])
        .unwrap();
        let input = run_args(cli).research_input().unwrap();

        assert_eq!(input.target, "founded_year");
        assert_eq!(input.examples, vec![json!("1998"), json!("2005")]);
        assert_eq!(input.input_info.get("name"), Some(&json!("Acme Co")));
    }

    #[test]
    fn defaults_match_documented_settings() {
        let args = run_args(parse(&["run", "--target", "ceo"]).unwrap());
        assert_eq!(args.settings.model, "gpt-4o");
        assert_eq!(args.settings.max_steps, 25);
        assert_eq!(args.settings.max_search_results, 5);
        assert!(!args.settings.continue_on_tool_error);
    }

    #[test]
    fn secrets_are_redacted_in_debug() {
        let args = run_args(parse(&["run", "--target", "ceo"]).unwrap());
        let debug = format!("{:?}", args.settings);
        assert!(!debug.contains("sk-test"));
        assert!(!debug.contains("tvly-test"));
    }

    #[test]
    fn known_requires_key_value() {
        let err = parse(&["run", "--target", "ceo", "--known", "Acme"]).unwrap_err();
        assert!(err.to_string().contains("expected key=value"));
    }

    #[test]
    fn target_or_input_is_required() {
        assert!(parse(&["run"]).is_err());
        assert!(parse(&["run", "--input", "in.json", "--target", "ceo"]).is_err());
    }

    #[test]
    fn input_file_is_read_as_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"input_info": {{"name": "Acme Co"}}, "target": "founded_year", "examples": ["1998"]}}"#
        )
        .unwrap();

        let args = run_args(parse(&["run", "--input", file.path().to_str().unwrap()]).unwrap());
        let input = args.research_input().unwrap();

        assert_eq!(input.target, "founded_year");
        assert_eq!(input.examples, vec![json!("1998")]);
        assert_eq!(input.input_info.get("name"), Some(&json!("Acme Co")));
    }

    #[test]
    fn graph_output_is_optional() {
        let cli = Cli::try_parse_from(["scout", "graph"]).unwrap();
        assert!(matches!(cli.command, Command::Graph { output: None }));
    }
}
