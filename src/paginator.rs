use crate::error::Result;
use crate::github::StargazerSource;
use crate::models::{RepositoryRef, StargazerRecord};
use tracing::{debug, info};

/// Walk every stargazer page of `repository`, oldest star first.
///
/// Always issues at least one request, so a repository without stargazers
/// costs one round trip and yields an empty list. A page that claims more
/// results but carries no cursor aborts the walk with
/// [`StargazerExportError::PaginationViolation`](crate::error::StargazerExportError::PaginationViolation).
///
/// Pages are fetched against a live dataset: a user who unstars and stars
/// again mid-walk can be skipped or seen twice. Callers dedupe by login.
pub async fn fetch_all_stargazers<S>(
    source: &S,
    repository: &RepositoryRef,
) -> Result<Vec<StargazerRecord>>
where
    S: StargazerSource + ?Sized,
{
    let mut stargazers = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0u32;

    loop {
        let page = source.fetch_page(repository, cursor.as_deref()).await?;
        pages += 1;

        let next = page.next_cursor()?.map(str::to_owned);
        debug!(
            %repository,
            page = pages,
            received = page.stargazers.len(),
            "Appending stargazer page"
        );
        stargazers.extend(page.stargazers);

        match next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    info!(
        %repository,
        pages,
        stargazers = stargazers.len(),
        "Fetched all stargazers"
    );

    Ok(stargazers)
}
