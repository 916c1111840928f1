// src/fetch/mod.rs
use crate::error::LoadError;
use crate::process;
use crate::types::{Dataset, LoadOutcome};
use reqwest::Client;
use tokio::time::Instant;
use tracing::{error, info};

pub mod source;

pub use source::DATASET_URL;

/// Load the EV population dataset from [`DATASET_URL`].
pub async fn load(client: &Client) -> LoadOutcome {
    load_from(client, DATASET_URL).await
}

/// Fetch and parse `url`. Never fails: errors are logged and reported as
/// [`LoadOutcome::Failed`], whose dataset is empty.
#[tracing::instrument(level = "info", skip(client))]
pub async fn load_from(client: &Client, url: &str) -> LoadOutcome {
    let outcome = LoadOutcome::from(try_load_from(client, url).await);
    if let LoadOutcome::Failed(e) = &outcome {
        error!(error = %e, "Error loading CSV data");
    }
    outcome
}

/// One GET followed by a full parse of the body.
pub async fn try_load_from(client: &Client, url: &str) -> Result<Dataset, LoadError> {
    let start = Instant::now();
    let body = source::fetch_csv_body(client, url).await?;
    info!(bytes = body.len(), elapsed = ?start.elapsed(), "downloaded CSV");

    let dataset = process::parse_bytes(&body)?;
    info!(
        rows = dataset.len(),
        columns = dataset.headers().len(),
        elapsed = ?start.elapsed(),
        "parsed dataset"
    );
    Ok(dataset)
}
