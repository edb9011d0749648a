use crate::error::{Result, StargazerExportError};
use crate::models::{PageResult, RepositoryRef, StargazerRecord};
use serde::{Deserialize, Serialize};

pub const PAGE_SIZE: u32 = 100;

pub const STARGAZERS_QUERY: &str = r#"
query getRepoStargazers($owner: String!, $name: String!, $first: Int!, $cursor: String) {
    repository(owner: $owner, name: $name) {
        stargazers(first: $first, after: $cursor, orderBy: {field: STARRED_AT, direction: ASC}) {
            pageInfo {
                hasNextPage
                endCursor
            }
            edges {
                node {
                    url
                    login
                    email
                    websiteUrl
                    twitterUsername
                }
            }
        }
    }
}
"#;

// GraphQL request body
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'static str,
    pub variables: StargazerVariables<'a>,
}

#[derive(Debug, Serialize)]
pub struct StargazerVariables<'a> {
    pub owner: &'a str,
    pub name: &'a str,
    pub first: u32,
    pub cursor: Option<&'a str>,
}

impl<'a> GraphQlRequest<'a> {
    pub fn stargazers(repository: &'a RepositoryRef, cursor: Option<&'a str>) -> Self {
        GraphQlRequest {
            query: STARGAZERS_QUERY,
            variables: StargazerVariables {
                owner: &repository.owner,
                name: &repository.name,
                first: PAGE_SIZE,
                cursor,
            },
        }
    }
}

// GraphQL response structures. Every level is optional so a missing one can be named.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    pub data: Option<RepositoryData>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryData {
    pub repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryNode {
    pub stargazers: Option<StargazerConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StargazerConnection {
    pub page_info: Option<PageInfo>,
    pub edges: Option<Vec<StargazerEdge>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: Option<bool>,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StargazerEdge {
    pub node: Option<StargazerNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StargazerNode {
    pub url: Option<String>,
    pub login: Option<String>,
    pub email: Option<String>,
    pub website_url: Option<String>,
    pub twitter_username: Option<String>,
}

fn missing(path: &str) -> StargazerExportError {
    StargazerExportError::MissingField(path.to_string())
}

// GitHub returns "" for hidden emails; an empty cell either way.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl TryFrom<StargazerNode> for StargazerRecord {
    type Error = StargazerExportError;

    fn try_from(node: StargazerNode) -> Result<Self> {
        Ok(StargazerRecord {
            url: node.url.ok_or_else(|| missing("node.url"))?,
            login: node.login.ok_or_else(|| missing("node.login"))?,
            email: non_empty(node.email),
            website_url: non_empty(node.website_url),
            twitter_username: non_empty(node.twitter_username),
        })
    }
}

impl TryFrom<GraphQlResponse> for PageResult {
    type Error = StargazerExportError;

    fn try_from(response: GraphQlResponse) -> Result<Self> {
        if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<String> = errors
                .into_iter()
                .map(|e| match e.kind {
                    Some(kind) => format!("{} ({})", e.message, kind),
                    None => e.message,
                })
                .collect();
            return Err(StargazerExportError::GraphQl(messages.join("; ")));
        }

        let connection = response
            .data
            .ok_or_else(|| missing("data"))?
            .repository
            .ok_or_else(|| missing("data.repository"))?
            .stargazers
            .ok_or_else(|| missing("data.repository.stargazers"))?;

        let page_info = connection
            .page_info
            .ok_or_else(|| missing("data.repository.stargazers.pageInfo"))?;
        let has_next_page = page_info
            .has_next_page
            .ok_or_else(|| missing("data.repository.stargazers.pageInfo.hasNextPage"))?;

        let stargazers = connection
            .edges
            .ok_or_else(|| missing("data.repository.stargazers.edges"))?
            .into_iter()
            .map(|edge| {
                edge.node
                    .ok_or_else(|| missing("data.repository.stargazers.edges.node"))
                    .and_then(StargazerRecord::try_from)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PageResult {
            stargazers,
            has_next_page,
            end_cursor: page_info.end_cursor,
        })
    }
}
