//! Declare this unit's metrics endpoint to the monitoring registrar.

use anyhow::{Context, Result};

use crate::application::ports::ScrapeRegistrar;
use crate::domain::scrape::build_jobs;
use crate::domain::{RelationData, ScrapeMetadata, ScrapeTarget};

/// Handle to a published registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRegistration {
    pub data: RelationData,
}

impl ScrapeRegistration {
    #[must_use]
    pub fn job_names(&self) -> Vec<&str> {
        self.data
            .scrape_jobs
            .iter()
            .map(|j| j.job_name.as_str())
            .collect()
    }
}

/// Build the relation data for `targets` without publishing it.
#[must_use]
pub fn relation_data(targets: &[ScrapeTarget], metadata: &ScrapeMetadata) -> RelationData {
    RelationData {
        scrape_metadata: metadata.clone(),
        scrape_jobs: build_jobs(targets, metadata),
    }
}

/// Publish the scrape jobs for `targets`. No retry.
///
/// # Errors
///
/// Returns an error if the registrar rejects the publication.
pub fn register(
    registrar: &impl ScrapeRegistrar,
    targets: &[ScrapeTarget],
    metadata: &ScrapeMetadata,
) -> Result<ScrapeRegistration> {
    let data = relation_data(targets, metadata);
    registrar
        .publish(&data)
        .context("publishing scrape jobs")?;
    Ok(ScrapeRegistration { data })
}
