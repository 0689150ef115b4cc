//! Research Assistant - a minimal `ReAct` agent
//!
//! Alternates model reasoning with local tool calls until the model answers.
//! Runs as a full-screen terminal UI (default) or a line-based console.

mod agent;
mod config;
mod console;
mod llm;
mod system_prompt;
mod tools;
mod tui;

use agent::ReactAgent;
use clap::Parser;
use config::Config;
use llm::{LlmService, LoggingService, OpenAIService};
use std::sync::Arc;
use tools::ToolRegistry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "research_assistant=info";
const LOG_FILE_NAME: &str = "research-assistant.log";

#[derive(Debug, Parser)]
#[command(name = "research-assistant", version, about = "ReAct research assistant")]
struct Cli {
    /// Full-screen terminal UI (default)
    #[arg(long, conflicts_with = "repl")]
    tui: bool,

    /// Line-based console instead of the terminal UI
    #[arg(long)]
    repl: bool,

    /// Model identifier (overrides the environment)
    #[arg(long)]
    model: Option<String>,

    /// Iteration budget per question (overrides the environment)
    #[arg(long)]
    max_iterations: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Tui,
    Repl,
}

impl Cli {
    fn mode(&self) -> Mode {
        if self.repl {
            Mode::Repl
        } else {
            Mode::Tui
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into())
}

/// The console shares the terminal with logs, so they go to stderr. The TUI
/// owns the screen, so its logs go to a JSON file.
fn init_logging(mode: Mode) -> std::io::Result<()> {
    match mode {
        Mode::Repl => {
            tracing_subscriber::registry()
                .with(env_filter())
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        Mode::Tui => {
            let path = std::env::temp_dir().join(LOG_FILE_NAME);
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::registry()
                .with(env_filter())
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_current_span(false)
                        .with_span_list(false)
                        .with_writer(std::sync::Mutex::new(file)),
                )
                .init();
        }
    }
    Ok(())
}

fn build_agent(config: &Config) -> Result<ReactAgent, llm::LlmError> {
    let service = OpenAIService::new(config.api_key.clone(), config.model.clone(), &config.base_url)?;
    let llm: Arc<dyn LlmService> = Arc::new(LoggingService::new(Arc::new(service)));
    Ok(ReactAgent::new(
        llm,
        ToolRegistry::standard(),
        config.agent_settings(),
    ))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let mode = cli.mode();
    init_logging(mode)?;

    let config = match Config::from_env() {
        Ok(config) => config.with_overrides(cli.model, cli.max_iterations),
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(config = ?config, mode = ?mode, "Starting research assistant");

    let agent = build_agent(&config)?;

    match mode {
        Mode::Repl => console::run_repl(&agent).await,
        Mode::Tui => tui::run_tui(&agent).await,
    }
}
