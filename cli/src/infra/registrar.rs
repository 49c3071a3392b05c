//! File-backed implementation of the `ScrapeRegistrar` port.
//!
//! The monitoring side picks up the JSON document from a well-known path.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::ScrapeRegistrar;
use crate::domain::RelationData;
use crate::infra::state::write_atomic;

pub struct FileScrapeRegistrar {
    path: PathBuf,
}

impl FileScrapeRegistrar {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ScrapeRegistrar for FileScrapeRegistrar {
    fn publish(&self, data: &RelationData) -> Result<()> {
        let content = serde_json::to_string_pretty(data).context("serializing scrape jobs")?;
        write_atomic(&self.path, &content)?;
        tracing::info!(
            path = %self.path.display(),
            jobs = data.scrape_jobs.len(),
            "scrape jobs registered"
        );
        Ok(())
    }
}
