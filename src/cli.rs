use clap::{Parser, Subcommand};

use crate::config::Backend;

#[derive(Parser)]
#[command(author, version, about = "Terminal chemistry & physics tutor", long_about = None)]
pub struct Cli {
    /// Routing backend (overrides MENTOR_BACKEND)
    #[arg(short, long, value_enum)]
    pub backend: Option<Backend>,

    /// History window for LLM routers, in tokens (0 = unbounded)
    #[arg(long)]
    pub history_budget: Option<usize>,

    /// Optional command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a single question and print the reply
    Ask {
        /// The question to ask
        #[arg(required = true)]
        question: Vec<String>,
    },

    /// List the registered subject tools
    Tools,
}
