use crate::error::Result;
use crate::github::StargazerSource;
use crate::models::{AggregateResult, RepositoryRef, StargazerRecord};
use crate::paginator::fetch_all_stargazers;
use colored::*;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::HashSet;
use tracing::info;

/// Keep the first record seen for every login, preserving order.
pub fn dedup_by_login(mut stargazers: Vec<StargazerRecord>) -> Vec<StargazerRecord> {
    let mut seen = HashSet::with_capacity(stargazers.len());
    stargazers.retain(|stargazer| seen.insert(stargazer.login.clone()));
    stargazers
}

/// Fetch the stargazers of every repository and dedupe them by login.
///
/// Up to `concurrency` repositories are fetched at once, but results are
/// concatenated in the order the repositories were given, so the output
/// never depends on which request finished first. The first failure, in
/// declared order, aborts the whole run.
pub async fn collect_stargazers<S>(
    source: &S,
    repositories: &[RepositoryRef],
    concurrency: usize,
) -> Result<AggregateResult>
where
    S: StargazerSource + ?Sized,
{
    let per_repository: Vec<Vec<StargazerRecord>> = stream::iter(repositories)
        .map(|repository| async move {
            println!("Fetching stargazers for {}...", repository.to_string().cyan());
            let stargazers = fetch_all_stargazers(source, repository).await?;
            println!(
                "{} {} stargazers from {}",
                "✅ Fetched".green(),
                stargazers.len(),
                repository
            );
            Ok::<_, crate::error::StargazerExportError>(stargazers)
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;

    let combined: Vec<StargazerRecord> = per_repository.into_iter().flatten().collect();
    let fetched = combined.len();
    let stargazers = dedup_by_login(combined);

    info!(
        repositories = repositories.len(),
        fetched,
        retained = stargazers.len(),
        "Aggregated stargazers"
    );

    Ok(AggregateResult {
        stargazers,
        fetched,
    })
}
