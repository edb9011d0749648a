use crate::error::Result;
use crate::models::StargazerRecord;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const CSV_HEADER: [&str; 5] = ["url", "login", "email", "websiteUrl", "twitterUsername"];

/// Write `stargazers` as CSV to `writer`. The header row is always present.
pub fn write_records<W: Write>(writer: W, stargazers: &[StargazerRecord]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;
    for stargazer in stargazers {
        csv_writer.serialize(stargazer)?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Create (or truncate) `path` and write the stargazers into it
pub fn write_csv(path: &Path, stargazers: &[StargazerRecord]) -> Result<()> {
    let file = File::create(path)?;
    write_records(file, stargazers)?;

    info!(path = %path.display(), rows = stargazers.len(), "Wrote CSV");
    Ok(())
}
