//! seatmap-admin: command-line smoke tool for layout documents.
//!
//! Loads a layout JSON file, validates it, reports occupancy, and can run
//! the full publish pipeline against the in-memory adapter:
//!
//! ```text
//! seatmap-admin <layout.json> [--publish]
//! ```
//!
//! This exercises the same code paths the editor uses (wire decode,
//! validation, publish workflow) without touching any remote backend, which
//! makes it useful for checking exported documents before upload.

use std::sync::Arc;

use anyhow::{bail, Context};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use seatmap_engine::application::publish_layout::PublishWorkflow;
use seatmap_engine::infrastructure::persistence::memory::MemoryAdapter;
use seatmap_engine::infrastructure::persistence::PersistenceAdapter;
use seatmap_engine::infrastructure::storage::config::load_config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log level: RUST_LOG wins, then the editor config, then "info".
    let config = load_config().unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.editor.log_level.clone())),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: seatmap-admin <layout.json> [--publish]");
    };
    let publish = match args.next().as_deref() {
        None => false,
        Some("--publish") => true,
        Some(other) => bail!("unknown argument: {other}"),
    };

    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let mut doc = seatmap_core::from_json(&text).context("decoding layout JSON")?;
    info!(
        name = %doc.name,
        seats = doc.seats.len(),
        sections = doc.sections.len(),
        categories = doc.categories.len(),
        "layout loaded"
    );

    match doc.validate() {
        Ok(()) => info!("document is valid"),
        Err(e) => {
            warn!("document failed validation: {e}");
            bail!("validation failed: {e}");
        }
    }

    let stats = doc.occupancy();
    info!(
        total = stats.total,
        available = stats.available,
        reserved = stats.reserved,
        occupied = stats.occupied,
        maintenance = stats.maintenance,
        "occupancy"
    );

    if publish {
        let adapter = Arc::new(MemoryAdapter::new());
        adapter
            .save_layout("local", &doc)
            .await
            .context("saving draft")?;

        let workflow = PublishWorkflow::new(adapter, "local");
        let published_at = workflow
            .publish(&mut doc)
            .await
            .context("publishing layout")?;
        info!(published_at, "publish pipeline completed");
    }

    Ok(())
}
