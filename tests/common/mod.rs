#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use stargazer_export::error::{Result, StargazerExportError};
use stargazer_export::github::{ClientConfig, StargazerSource};
use stargazer_export::models::{PageResult, RepositoryRef, StargazerRecord};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

pub const PAGE_SIZE: usize = 100;

pub fn stargazer(login: &str) -> StargazerRecord {
    StargazerRecord {
        url: format!("https://github.com/{}", login),
        login: login.to_string(),
        email: None,
        website_url: None,
        twitter_username: None,
    }
}

/// `count` stargazers named `{prefix}-{index}`, in star order
pub fn stargazers(prefix: &str, count: usize) -> Vec<StargazerRecord> {
    (0..count).map(|i| stargazer(&format!("{}-{}", prefix, i))).collect()
}

/// In-memory stargazer source that pages like GitHub and records every call
#[derive(Default)]
pub struct FakeSource {
    repositories: HashMap<String, Vec<StargazerRecord>>,
    failing: HashMap<String, String>,
    missing_cursor: Vec<String>,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository(mut self, full_name: &str, stargazers: Vec<StargazerRecord>) -> Self {
        self.repositories.insert(full_name.to_string(), stargazers);
        self
    }

    pub fn with_failure(mut self, full_name: &str, message: &str) -> Self {
        self.failing.insert(full_name.to_string(), message.to_string());
        self
    }

    /// First page claims more results but carries no cursor
    pub fn with_missing_cursor(mut self, full_name: &str) -> Self {
        self.missing_cursor.push(full_name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, full_name: &str) -> Vec<Option<String>> {
        self.calls()
            .into_iter()
            .filter(|(repo, _)| repo == full_name)
            .map(|(_, cursor)| cursor)
            .collect()
    }
}

#[async_trait]
impl StargazerSource for FakeSource {
    async fn fetch_page(
        &self,
        repository: &RepositoryRef,
        cursor: Option<&str>,
    ) -> Result<PageResult> {
        let full_name = repository.to_string();
        self.calls
            .lock()
            .unwrap()
            .push((full_name.clone(), cursor.map(str::to_owned)));

        if let Some(message) = self.failing.get(&full_name) {
            return Err(StargazerExportError::GraphQl(message.clone()));
        }

        if self.missing_cursor.contains(&full_name) {
            return Ok(PageResult {
                stargazers: vec![stargazer("orphan")],
                has_next_page: true,
                end_cursor: None,
            });
        }

        let all = self.repositories.get(&full_name).ok_or_else(|| {
            StargazerExportError::GraphQl(format!(
                "Could not resolve to a Repository with the name '{}'.",
                full_name
            ))
        })?;

        let offset = match cursor {
            Some(c) => c.trim_start_matches("cursor-").parse::<usize>().unwrap(),
            None => 0,
        };
        let end = (offset + PAGE_SIZE).min(all.len());
        let has_next_page = end < all.len();

        Ok(PageResult {
            stargazers: all[offset..end].to_vec(),
            has_next_page,
            end_cursor: has_next_page.then(|| format!("cursor-{}", end)),
        })
    }
}

/// GraphQL response body for one page
pub fn page_body(logins: &[&str], end_cursor: Option<&str>) -> String {
    let edges: Vec<Value> = logins
        .iter()
        .map(|login| {
            json!({
                "node": {
                    "url": format!("https://github.com/{}", login),
                    "login": login,
                    "email": "",
                    "websiteUrl": null,
                    "twitterUsername": null
                }
            })
        })
        .collect();

    json!({
        "data": {
            "repository": {
                "stargazers": {
                    "pageInfo": {
                        "hasNextPage": end_cursor.is_some(),
                        "endCursor": end_cursor
                    },
                    "edges": edges
                }
            }
        }
    })
    .to_string()
}

/// Client settings pointing at a mock server, with fast retries
pub fn mock_client_config(server_url: &str) -> ClientConfig {
    let endpoint = Url::parse(&format!("{}/graphql", server_url)).unwrap();
    ClientConfig {
        timeout: Duration::from_secs(5),
        max_retries: 2,
        retry_delay: Duration::from_millis(10),
        ..ClientConfig::new(endpoint)
    }
}
