pub mod aggregator;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod output;
pub mod paginator;
pub mod types;

use colored::*;
use config::Config;
use error::Result;
use github::GitHubClient;
use models::AggregateResult;
use tracing::info;

/// Fetch, dedupe and write the stargazers described by `config`.
///
/// The CSV is written only after every repository was fetched successfully.
pub async fn run(config: Config) -> Result<AggregateResult> {
    info!(
        repositories = config.repositories.len(),
        concurrency = config.concurrency,
        endpoint = %config.client.endpoint,
        "Starting stargazer export"
    );

    let client = GitHubClient::new(config.token, config.client)?;
    let result =
        aggregator::collect_stargazers(&client, &config.repositories, config.concurrency).await?;

    output::write_csv(&config.output, &result.stargazers)?;

    println!(
        "{} {} unique stargazers ({} duplicates removed) to {}",
        "Wrote".green(),
        result.stargazers.len(),
        result.duplicates_removed(),
        config.output.display()
    );
    println!("{}", "Done!".bold().green());

    Ok(result)
}
