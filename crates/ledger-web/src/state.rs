use std::sync::Arc;

use anyhow::{Context, Result};
use ledger_core::{Config, Ledger, ReportClient};
use tracing::info;

use crate::session::SessionStore;

/// Shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Bundled ledger, loaded once at start-up
    pub sample: Arc<Ledger>,
    pub reports: ReportClient,
    pub sessions: SessionStore,
}

impl AppState {
    /// Load the sample ledger and build the report client. A missing sample
    /// file is fatal.
    pub fn load(config: Config) -> Result<Self> {
        let sample = Ledger::load_from_path(&config.sample_path).with_context(|| {
            format!(
                "Sample ledger '{}' could not be loaded. Pass --sample or set data.sample_path in ledger.toml",
                config.sample_path.display()
            )
        })?;
        info!(
            path = %config.sample_path.display(),
            transactions = sample.len(),
            "Loaded sample ledger"
        );
        Self::with_sample(config, sample)
    }

    pub fn with_sample(config: Config, sample: Ledger) -> Result<Self> {
        let reports = ReportClient::new(config.report.clone()).context("Failed to build HTTP client")?;
        Ok(Self {
            config: Arc::new(config),
            sample: Arc::new(sample),
            reports,
            sessions: SessionStore::new(),
        })
    }
}
