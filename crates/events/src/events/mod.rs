use serde::{Deserialize, Serialize};

pub mod build;
pub mod general;

pub use build::*;
pub use general::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, debug output)
    General(GeneralEvent),

    /// Build pipeline events (steps, sessions)
    Build(BuildEvent),
}

impl AppEvent {
    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::Build(BuildEvent::StepFailed { .. }) => Level::ERROR,

            Self::General(GeneralEvent::Warning { .. }) => Level::WARN,

            Self::Build(
                BuildEvent::SessionStarted { .. }
                | BuildEvent::SessionCompleted { .. }
                | BuildEvent::StepStarted { .. }
                | BuildEvent::StepCompleted { .. },
            ) => Level::INFO,

            Self::General(GeneralEvent::DebugLog { .. }) => Level::DEBUG,
        }
    }
}
