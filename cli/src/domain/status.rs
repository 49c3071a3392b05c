//! Lifecycle status, phases and events.
//!
//! Pure types and transition rules. The controller in
//! `application::services::lifecycle` executes the stages; this module only
//! decides whether an event may run from a given phase.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit status surfaced to the host runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum LifecycleStatus {
    /// No lifecycle event has set a status yet.
    #[default]
    Unknown,
    /// Healthy and running.
    Active,
    /// Needs operator intervention.
    Blocked(String),
}

impl LifecycleStatus {
    #[must_use]
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self::Blocked(reason.into())
    }

    #[must_use]
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            Self::Active => f.write_str("active"),
            Self::Blocked(reason) => write!(f, "blocked: {reason}"),
        }
    }
}

/// Where the unit is in its install/start/stop lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    #[default]
    Uninstalled,
    Installing,
    Installed,
    Starting,
    Active,
    Blocked,
    Stopped,
}

impl LifecyclePhase {
    /// Decide how `event` is handled from this phase.
    ///
    /// Events are re-delivered by the host on redeploy, so every phase except
    /// `Active` accepts `install`. `start` is always accepted. `stop` only runs
    /// from a phase where the unit may be up; from `Uninstalled`, `Installed`
    /// or `Stopped` it is a no-op. A persisted transient phase
    /// (`Installing`/`Starting`) means a previous invocation died mid-event and
    /// is treated like `Blocked`.
    #[must_use]
    pub fn on(self, event: LifecycleEvent) -> Transition {
        match (event, self) {
            (LifecycleEvent::Install, Self::Active) => {
                Transition::Skip("unit is active; stop it before reinstalling")
            }
            (LifecycleEvent::Install, _) => Transition::Run(Self::Installing),
            (LifecycleEvent::Start, _) => Transition::Run(Self::Starting),
            (
                LifecycleEvent::Stop,
                Self::Uninstalled | Self::Installed | Self::Stopped,
            ) => Transition::Skip("unit is not running"),
            (LifecycleEvent::Stop, _) => Transition::Run(self),
        }
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Uninstalled => "uninstalled",
            Self::Installing => "installing",
            Self::Installed => "installed",
            Self::Starting => "starting",
            Self::Active => "active",
            Self::Blocked => "blocked",
            Self::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// Outcome of [`LifecyclePhase::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Run the event's stages, entering the given phase first.
    Run(LifecyclePhase),
    /// Leave state untouched.
    Skip(&'static str),
}

/// Typed lifecycle event delivered by the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Install,
    Start,
    Stop,
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install => f.write_str("install"),
            Self::Start => f.write_str("start"),
            Self::Stop => f.write_str("stop"),
        }
    }
}

/// Unit state persisted between lifecycle invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitState {
    pub phase: LifecyclePhase,
    pub status: LifecycleStatus,
    /// SHA-256 of the deployed artifact, set after a successful install.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_sha256: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Default for UnitState {
    fn default() -> Self {
        Self {
            phase: LifecyclePhase::Uninstalled,
            status: LifecycleStatus::Unknown,
            artifact_sha256: None,
            updated_at: Utc::now(),
        }
    }
}
