// src/fetch/source.rs
use crate::error::LoadError;
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Public Electric Vehicle Population Data CSV.
pub static DATASET_URL: &str = "https://raw.githubusercontent.com/vedant-patil-mapup/analytics-dashboard-assessment/refs/heads/main/data-to-visualize/Electric_Vehicle_Population_Data.csv";

/// GET `url` once and return the raw body. Non-2xx statuses are errors.
pub async fn fetch_csv_body(client: &Client, url: &str) -> Result<Vec<u8>, LoadError> {
    let url = Url::parse(url).map_err(|source| LoadError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    debug!(%url, "fetching CSV");

    let resp = client.get(url.clone()).send().await?.error_for_status()?;
    debug!(%url, status = %resp.status(), "response received");

    let bytes = resp.bytes().await?;
    Ok(bytes.to_vec())
}
