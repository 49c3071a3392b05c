//! Command implementations

pub mod config;
pub mod lifecycle;
pub mod scrape;
pub mod status;
pub mod version;
