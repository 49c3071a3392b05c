//! Domain layer: pure lifecycle types, specs and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod install;
pub mod scrape;
pub mod status;
pub mod unit;

pub use config::UnitConfig;
pub use error::{
    ArtifactError, ConfigError, InstallError, PackageError, RuntimePackageError, ServiceError,
};
pub use install::{InstallStep, InstallationSpec, PlannedStep, StepPolicy};
pub use scrape::{RelationData, ScrapeJob, ScrapeMetadata, ScrapeTarget};
pub use status::{LifecycleEvent, LifecyclePhase, LifecycleStatus, UnitState};
pub use unit::ServiceUnitSpec;

/// Encode bytes as lowercase hex string.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(char::from(HEX[(b >> 4) as usize]));
        out.push(char::from(HEX[(b & 0xf) as usize]));
    }
    out
}
