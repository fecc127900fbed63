mod cli;

use std::fs::File;

use clap::Parser;
use env_logger::{Env, Target};

use cli::{Cli, Commands};
use news_dashboard::app::bootstrap;
use news_dashboard::error::{Context, Result};

fn init_logging(cli: &Cli) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = bootstrap::load_dashboard_config(&cli.config, cli.base_url.as_deref())?;
    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => bootstrap::run_dashboard(&config).await,
        Commands::Summary => bootstrap::print_latest_summary(&config).await,
        Commands::Articles { page, size } => {
            bootstrap::print_article_page(&config, page, size).await
        }
    }
}
