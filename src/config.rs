use crate::cli::Cli;
use crate::error::{Result, StargazerExportError};
use crate::github::ClientConfig;
use crate::models::RepositoryRef;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Everything a run needs, validated up front
#[derive(Clone)]
pub struct Config {
    pub token: String,
    pub repositories: Vec<RepositoryRef>,
    pub output: PathBuf,
    pub client: ClientConfig,
    pub concurrency: usize,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let token = cli
            .token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(StargazerExportError::MissingToken)?;

        let mut input = cli.repositories.unwrap_or_default();
        for extra in &cli.extra_repositories {
            input.push(' ');
            input.push_str(extra);
        }
        let repositories = parse_repositories(&input)?;

        if cli.concurrency == 0 {
            return Err(StargazerExportError::InvalidInput(
                "concurrency must be at least 1".to_string(),
            ));
        }

        let endpoint = Url::parse(&cli.endpoint).map_err(|e| {
            StargazerExportError::InvalidInput(format!("Invalid endpoint {}: {}", cli.endpoint, e))
        })?;

        let client = ClientConfig {
            timeout: Duration::from_secs(cli.timeout),
            max_retries: cli.max_retries,
            ..ClientConfig::new(endpoint)
        };

        Ok(Config {
            token,
            repositories,
            output: cli.output,
            client,
            concurrency: cli.concurrency,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("repositories", &self.repositories)
            .field("output", &self.output)
            .field("client", &self.client)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '/' || c == '-' || c.is_whitespace()
}

/// Parse a space-separated `owner/name` list.
///
/// Only ASCII letters, slashes, dashes and whitespace are accepted.
pub fn parse_repositories(input: &str) -> Result<Vec<RepositoryRef>> {
    if input.trim().is_empty() {
        return Err(StargazerExportError::InvalidInput(
            "at least one repository is required".to_string(),
        ));
    }

    if let Some(bad) = input.chars().find(|c| !is_allowed(*c)) {
        return Err(StargazerExportError::InvalidInput(format!(
            "Repositories must be only letters, slash, spaces, or dashes (found {:?})",
            bad
        )));
    }

    input.split_whitespace().map(str::parse).collect()
}
