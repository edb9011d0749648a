use clap::Parser;
use std::fmt;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stargazer-export")]
#[command(about = "Export the deduplicated stargazers of GitHub repositories to CSV")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// GitHub access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Space-separated list of owner/name repositories
    #[arg(long, env = "STARGAZER_REPOSITORIES")]
    pub repositories: Option<String>,

    /// Additional owner/name repositories
    #[arg(value_name = "OWNER/NAME")]
    pub extra_repositories: Vec<String>,

    /// Output CSV path
    #[arg(long, short, default_value = "result.csv")]
    pub output: PathBuf,

    /// GitHub GraphQL endpoint
    #[arg(long, env = "GITHUB_GRAPHQL_URL", default_value = crate::github::DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Retries for transient network and server errors
    #[arg(long, default_value_t = 3)]
    pub max_retries: u32,

    /// Repositories fetched at the same time
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,
}

impl fmt::Debug for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cli")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("repositories", &self.repositories)
            .field("extra_repositories", &self.extra_repositories)
            .field("output", &self.output)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}
