use crate::error::{Result, StargazerExportError};
use crate::models::{PageResult, RateLimitState, RepositoryRef};
use crate::types::{GraphQlRequest, GraphQlResponse};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";
const LOW_RATE_LIMIT: u32 = 10;
const MAX_RATE_LIMIT_WAIT: Duration = Duration::from_secs(60);

/// Anything that can hand out one page of stargazers at a time
#[async_trait]
pub trait StargazerSource: Send + Sync {
    async fn fetch_page(
        &self,
        repository: &RepositoryRef,
        cursor: Option<&str>,
    ) -> Result<PageResult>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: Url,
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl ClientConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_delay: Duration::from_secs(2),
        }
    }
}

pub struct GitHubClient {
    client: Client,
    token: String,
    config: ClientConfig,
}

impl GitHubClient {
    pub fn new(token: String, config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent("Stargazer Export/0.1.0")
            .timeout(config.timeout)
            .build()?;

        Ok(GitHubClient {
            client,
            token,
            config,
        })
    }

    async fn post_query(&self, request: &GraphQlRequest<'_>) -> Result<Response> {
        let mut retries = 0;

        loop {
            let sent = self
                .client
                .post(self.config.endpoint.clone())
                .header("Authorization", format!("bearer {}", self.token))
                .json(request)
                .send()
                .await;

            let response = match sent {
                Ok(response) => response,
                Err(e) if retries < self.config.max_retries && is_transient(&e) => {
                    warn!(error = %e, retries, "Request failed, retrying");
                    sleep(self.config.retry_delay).await;
                    retries += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let rate_limit = rate_limit_state(response.headers());

            match response.status() {
                status if status.is_success() => {
                    if let Some(state) = &rate_limit {
                        if state.remaining < LOW_RATE_LIMIT {
                            warn!(
                                remaining = state.remaining,
                                reset_time = %state.reset_time,
                                "Rate limit low"
                            );
                        }
                    }
                    return Ok(response);
                }
                StatusCode::UNAUTHORIZED => {
                    let error_text = response.text().await.unwrap_or_default();
                    return Err(StargazerExportError::AuthError(format!(
                        "Token rejected: {}",
                        error_text
                    )));
                }
                StatusCode::FORBIDDEN if rate_limit.as_ref().is_some_and(|s| s.is_limited) => {
                    let reset_time = rate_limit.map(|s| s.reset_time).unwrap_or_else(Utc::now);
                    let wait_time = (reset_time - Utc::now())
                        .to_std()
                        .unwrap_or(Duration::from_secs(0))
                        + self.config.retry_delay;

                    // Waits share the retry budget with server errors
                    if wait_time > MAX_RATE_LIMIT_WAIT || retries >= self.config.max_retries {
                        return Err(StargazerExportError::RateLimitExceeded(format!(
                            "API rate limit exceeded. Reset at: {}",
                            reset_time
                        )));
                    }

                    warn!(retries, "Rate limit reached. Waiting {} ms...", wait_time.as_millis());
                    sleep(wait_time).await;
                    retries += 1;
                    continue;
                }
                StatusCode::FORBIDDEN => {
                    let error_text = response.text().await.unwrap_or_default();
                    return Err(StargazerExportError::Api(format!("Forbidden: {}", error_text)));
                }
                status if status.is_server_error() && retries < self.config.max_retries => {
                    warn!(%status, retries, "Server error, retrying");
                    sleep(self.config.retry_delay).await;
                    retries += 1;
                    continue;
                }
                status => {
                    let error_text = response.text().await.unwrap_or_default();
                    return Err(StargazerExportError::Api(format!(
                        "API request failed with status {}: {}",
                        status, error_text
                    )));
                }
            }
        }
    }

    /// Fetch up to 100 stargazers of `repository` starting after `cursor`
    pub async fn fetch_stargazers_page(
        &self,
        repository: &RepositoryRef,
        cursor: Option<&str>,
    ) -> Result<PageResult> {
        let request = GraphQlRequest::stargazers(repository, cursor);
        let response = self.post_query(&request).await?;
        let body = response.text().await?;
        let page = parse_page(&body)?;

        debug!(
            %repository,
            received = page.stargazers.len(),
            has_next_page = page.has_next_page,
            "Fetched stargazer page"
        );

        Ok(page)
    }
}

#[async_trait]
impl StargazerSource for GitHubClient {
    async fn fetch_page(
        &self,
        repository: &RepositoryRef,
        cursor: Option<&str>,
    ) -> Result<PageResult> {
        self.fetch_stargazers_page(repository, cursor).await
    }
}

/// Decode a GraphQL response body into a page
pub fn parse_page(body: &str) -> Result<PageResult> {
    let response: GraphQlResponse = serde_json::from_str(body)?;
    PageResult::try_from(response)
}

/// Rate limit state from response headers, if GitHub sent any
pub fn rate_limit_state(headers: &HeaderMap) -> Option<RateLimitState> {
    let header = |name: &str| headers.get(name).and_then(|h| h.to_str().ok());

    let remaining = header("X-RateLimit-Remaining")?.parse::<u32>().ok()?;

    let reset_time = header("X-RateLimit-Reset")
        .and_then(|s| s.parse::<i64>().ok())
        .map(|timestamp| DateTime::from_timestamp(timestamp, 0).unwrap_or_else(Utc::now))
        .unwrap_or_else(|| Utc::now() + chrono::Duration::hours(1));

    Some(RateLimitState {
        remaining,
        reset_time,
        is_limited: remaining == 0,
    })
}

fn is_transient(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect() || error.is_request()
}
