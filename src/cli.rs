use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "news-dashboard")]
#[command(about = "Terminal dashboard for the crypto market summary and news feeds")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Dashboard config (JSON); built-in defaults are used when it is missing
    #[arg(short, long, default_value = "assets/dashboard.json")]
    pub config: PathBuf,

    /// Override `api.base_url` from the config file
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the interactive dashboard (default)
    Dashboard,

    /// Print the latest market summary once
    Summary,

    /// Print one page of news articles
    Articles {
        #[arg(short, long, default_value_t = 0)]
        page: u32,

        /// Page size; defaults to the configured article page size
        #[arg(short, long)]
        size: Option<u32>,
    },
}
