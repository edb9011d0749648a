use clap::Parser;
use colored::*;
use stargazer_export::cli::Cli;
use stargazer_export::config::Config;
use stargazer_export::error::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    println!("{}", "GitHub Stargazer Export".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    let config = Config::from_cli(cli)?;
    stargazer_export::run(config).await?;

    Ok(())
}
