use anyhow::{Context, Result};
use evdash::{aggregate::Snapshot, build_dashboard, fetch};
use reqwest::Client;
use std::env;
use tokio::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,evdash=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    info!("startup");

    // ─── 2) configure source ─────────────────────────────────────────
    let text_mode = env::args().skip(1).any(|a| a == "--text");
    let url = env::var("EV_DATASET_URL").unwrap_or_else(|_| fetch::DATASET_URL.to_string());
    let client = Client::new();

    // ─── 3) load (never fails; falls back to an empty dataset) ───────
    let start = Instant::now();
    let outcome = fetch::load_from(&client, &url).await;
    let loaded = outcome.is_loaded();
    if !loaded {
        warn!("load failed; rendering an empty dashboard");
    }
    let dataset = outcome.into_dataset();

    // ─── 4) aggregate ────────────────────────────────────────────────
    let dashboard = build_dashboard(&dataset);
    info!(
        rows = dashboard.metrics.total_count,
        makes = dashboard.metrics.unique_make_count,
        states = dashboard.metrics.unique_state_count,
        elapsed = ?start.elapsed(),
        "dashboard ready"
    );

    // ─── 5) render ───────────────────────────────────────────────────
    if text_mode {
        print!("{}", dashboard);
    } else {
        let snapshot = Snapshot::new(dashboard, loaded);
        let json =
            serde_json::to_string_pretty(&snapshot).context("serializing dashboard snapshot")?;
        println!("{}", json);
    }

    Ok(())
}
