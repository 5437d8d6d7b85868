use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cosmos_sign_core::domain::InteractionInfo;
use cosmos_sign_core::InteractionContextPort;

/// Host surface with a fixed interaction kind that records a close request.
#[derive(Debug, Clone, Default)]
pub struct StaticInteractionContext {
    info: InteractionInfo,
    closed: Arc<AtomicBool>,
}

impl StaticInteractionContext {
    pub fn new(info: InteractionInfo) -> Self {
        Self {
            info,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A popup opened by a webpage.
    pub fn external_popup() -> Self {
        Self::new(InteractionInfo {
            interaction: true,
            interaction_internal: false,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl InteractionContextPort for StaticInteractionContext {
    fn info(&self) -> InteractionInfo {
        self.info
    }

    fn close_window(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
