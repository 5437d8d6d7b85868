use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use cosmos_sign_core::state_machine::{interaction_transition, InteractionAction};
use cosmos_sign_core::{
    InteractionId, InteractionQueuePort, InteractionRequest, InteractionResult, InteractionStatus,
    PortError, SignDocWrapper, SignInteractionData, StateTransition,
};

pub const STALE_INTERACTION: &str = "INTERACTION_STALE";

#[derive(Debug, Default)]
struct QueueState {
    last_id: u64,
    pending: VecDeque<Arc<InteractionRequest>>,
    status: HashMap<InteractionId, InteractionStatus>,
    transitions: HashMap<InteractionId, Vec<StateTransition>>,
    results: HashMap<InteractionId, InteractionResult>,
}

impl QueueState {
    /// Moves the front request `id` through `action` to its final state.
    /// Returns whether another request follows.
    fn resolve(
        &mut self,
        id: InteractionId,
        action: InteractionAction,
        result: InteractionResult,
    ) -> Result<bool, PortError> {
        let status = self
            .status
            .get(&id)
            .copied()
            .ok_or_else(|| PortError::NotFound(format!("{id}")))?;
        let (dispatched, t1) = interaction_transition(status, action)?;
        let (resolved, t2) = interaction_transition(dispatched, InteractionAction::Resolve)?;

        self.pending.pop_front();
        self.status.insert(id, resolved);
        self.transitions.entry(id).or_default().extend([t1, t2]);
        self.results.insert(id, result);
        Ok(!self.pending.is_empty())
    }

    fn front_is(&self, id: InteractionId) -> bool {
        self.pending.front().map(|r| r.id) == Some(id)
            && self.status.get(&id) == Some(&InteractionStatus::Waiting)
    }
}

/// In-memory FIFO of sign interactions. Clones share one queue.
#[derive(Debug, Clone, Default)]
pub struct InteractionQueueAdapter {
    state: Arc<Mutex<QueueState>>,
}

impl InteractionQueueAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, QueueState>, PortError> {
        self.state
            .lock()
            .map_err(|e| PortError::Transport(format!("queue lock poisoned: {e}")))
    }

    /// Enqueues a request; ids follow arrival order.
    pub fn push(&self, data: SignInteractionData) -> Result<InteractionId, PortError> {
        let mut g = self.lock()?;
        g.last_id = g.last_id.saturating_add(1);
        let id = InteractionId(g.last_id);
        g.pending.push_back(Arc::new(InteractionRequest { id, data }));
        g.status.insert(id, InteractionStatus::Waiting);
        Ok(id)
    }

    pub fn pending_len(&self) -> Result<usize, PortError> {
        Ok(self.lock()?.pending.len())
    }

    pub fn status(&self, id: InteractionId) -> Result<Option<InteractionStatus>, PortError> {
        Ok(self.lock()?.status.get(&id).copied())
    }

    pub fn transitions(&self, id: InteractionId) -> Result<Vec<StateTransition>, PortError> {
        Ok(self
            .lock()?
            .transitions
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }

    /// Hands the resolution to the requester; a second call returns `None`.
    /// The request's status and transition history go with it.
    pub fn take_result(&self, id: InteractionId) -> Result<Option<InteractionResult>, PortError> {
        let mut g = self.lock()?;
        let result = g.results.remove(&id);
        if result.is_some() {
            g.status.remove(&id);
            g.transitions.remove(&id);
        }
        Ok(result)
    }

    fn stale(id: InteractionId) -> PortError {
        warn!(%id, "resolution of stale interaction ignored");
        PortError::Conflict(STALE_INTERACTION.to_owned())
    }
}

impl InteractionQueuePort for InteractionQueueAdapter {
    fn next(&self) -> Result<Option<Arc<InteractionRequest>>, PortError> {
        Ok(self.lock()?.pending.front().cloned())
    }

    fn approve_with_proceed_next(
        &self,
        id: InteractionId,
        signed: SignDocWrapper,
        on_proceed: &mut dyn FnMut(bool),
    ) -> Result<(), PortError> {
        let proceed_next = {
            let mut g = self.lock()?;
            if !g.front_is(id) {
                return Err(Self::stale(id));
            }
            let requested = g
                .pending
                .front()
                .map(|r| r.data.chain_id.clone())
                .unwrap_or_default();
            if signed.chain_id() != requested {
                return Err(PortError::Validation(format!(
                    "signed chain id {} differs from requested {requested}",
                    signed.chain_id()
                )));
            }
            g.resolve(id, InteractionAction::Approve, InteractionResult::Approved(signed))?
        };
        info!(%id, proceed_next, "interaction approved");
        on_proceed(proceed_next);
        Ok(())
    }

    fn reject_with_proceed_next(
        &self,
        id: InteractionId,
        on_proceed: &mut dyn FnMut(bool),
    ) -> Result<(), PortError> {
        let proceed_next = {
            let mut g = self.lock()?;
            if !g.front_is(id) {
                return Err(Self::stale(id));
            }
            g.resolve(id, InteractionAction::Reject, InteractionResult::Rejected)?
        };
        info!(%id, proceed_next, "interaction rejected");
        on_proceed(proceed_next);
        Ok(())
    }

    fn reject_all(&self) -> Result<(), PortError> {
        let mut g = self.lock()?;
        let mut rejected = 0usize;
        while let Some(id) = g.pending.front().map(|r| r.id) {
            g.resolve(id, InteractionAction::Reject, InteractionResult::Rejected)?;
            rejected += 1;
        }
        info!(rejected, "all interactions rejected");
        Ok(())
    }

    fn is_stale(&self, id: InteractionId) -> bool {
        match self.lock() {
            Ok(g) => !g.front_is(id),
            Err(_) => true,
        }
    }
}
