use crate::error::{Result, StargazerExportError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A repository identified by `owner/name`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl FromStr for RepositoryRef {
    type Err = StargazerExportError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => {
                Ok(RepositoryRef::new(*owner, *name))
            }
            _ => Err(StargazerExportError::InvalidRepository(format!(
                "Expected owner/name, got: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Public profile fields of one stargazer. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StargazerRecord {
    pub url: String,
    pub login: String,
    pub email: Option<String>,
    pub website_url: Option<String>,
    pub twitter_username: Option<String>,
}

/// One page of stargazers plus pagination state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResult {
    pub stargazers: Vec<StargazerRecord>,
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

impl PageResult {
    /// Cursor for the following page, `None` once the walk is finished.
    pub fn next_cursor(&self) -> Result<Option<&str>> {
        if !self.has_next_page {
            return Ok(None);
        }

        match self.end_cursor.as_deref() {
            Some(cursor) if !cursor.is_empty() => Ok(Some(cursor)),
            _ => Err(StargazerExportError::PaginationViolation(
                "hasNextPage is true but no endCursor was returned".to_string(),
            )),
        }
    }
}

/// Deduplicated stargazers across every requested repository
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateResult {
    pub stargazers: Vec<StargazerRecord>,
    /// Records fetched before deduplication
    pub fetched: usize,
}

impl AggregateResult {
    pub fn duplicates_removed(&self) -> usize {
        self.fetched.saturating_sub(self.stargazers.len())
    }
}

/// Rate limit state reported by the last response
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitState {
    pub remaining: u32,
    pub reset_time: chrono::DateTime<chrono::Utc>,
    pub is_limited: bool,
}
