//! Application services for the unit lifecycle.
//!
//! Each module imports only from `crate::domain` and
//! `crate::application::ports`.

pub mod artifact_deployer;
pub mod lifecycle;
pub mod package_installer;
pub mod scrape_registrar;
pub mod service_unit;
