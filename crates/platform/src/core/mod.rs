//! Core platform abstractions and context management

use cmk_events::{EventEmitter, EventSender};
use std::sync::Arc;

use crate::implementations::native::NativeProcessOperations;
use crate::process::ProcessOperations;

/// Context for platform operations, providing event emission
#[derive(Clone, Debug, Default)]
pub struct PlatformContext {
    event_sender: Option<EventSender>,
}

impl PlatformContext {
    /// Create a new platform context with event emission capabilities
    #[must_use]
    pub fn new(event_sender: Option<EventSender>) -> Self {
        Self { event_sender }
    }
}

impl EventEmitter for PlatformContext {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

/// Main platform abstraction providing access to platform operations
#[derive(Clone)]
pub struct Platform {
    process_ops: Arc<dyn ProcessOperations>,
}

impl Platform {
    /// Create a new platform instance with the specified implementation
    pub fn new(process_ops: Arc<dyn ProcessOperations>) -> Self {
        Self { process_ops }
    }

    /// Get the platform backed by real child processes
    #[must_use]
    pub fn current() -> Self {
        Self::new(Arc::new(NativeProcessOperations::new()))
    }

    /// Access process operations
    #[must_use]
    pub fn process(&self) -> &dyn ProcessOperations {
        &*self.process_ops
    }

    /// Create a platform context with event emission
    #[must_use]
    pub fn create_context(&self, event_sender: Option<EventSender>) -> PlatformContext {
        PlatformContext::new(event_sender)
    }
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform").finish_non_exhaustive()
    }
}
