//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, package
//! managers, systemd, filesystem access, state and config files.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod apt;
pub mod command_runner;
pub mod config;
pub mod fs;
pub mod pip;
pub mod registrar;
pub mod state;
pub mod systemd;
