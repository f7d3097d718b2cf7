mod agent;
mod cli;
mod config;
mod session;
mod tools;
mod tui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent::{create_router, TutorAgent};
use cli::{Cli, Commands};
use config::Config;
use session::Session;
use tools::{ToolRegistry, WebSearchTool};

fn build_registry(config: &Config) -> ToolRegistry {
    ToolRegistry::standard(WebSearchTool::new(
        config.search_results,
        config.search_timeout,
    ))
}

fn build_session(config: &Config) -> Result<Session> {
    let router = create_router(config)?;
    Ok(Session::new(TutorAgent::new(router, build_registry(config))))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // TUI owns stdout, so diagnostics go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mentor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(budget) = cli.history_budget {
        config.history_budget = budget;
    }
    config.validate()?;
    tracing::info!(backend = config.backend.as_str(), "starting");

    match cli.command {
        Some(Commands::Ask { question }) => {
            let mut session = build_session(&config)?;
            let query = question.join(" ");
            let outcome = session.process(&query).await;
            println!("{}", outcome.reply);
            for line in session.log() {
                eprintln!("{line}");
            }
            tracing::debug!(messages = session.transcript().len(), "session complete");
        }
        Some(Commands::Tools) => {
            for tool in build_registry(&config).iter() {
                println!("{}: {}", tool.name(), tool.description());
            }
        }
        None => {
            let session = build_session(&config)?;
            tui::run(session).await?;
        }
    }

    Ok(())
}
