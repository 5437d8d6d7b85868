use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::InteractionId;
use crate::ports::{ChainInfoPort, InteractionContextPort, InteractionQueuePort, PortError, QueriesPort};
use crate::session::{ApproveOutcome, SessionError, SignTxSession};

/// Drives sign sessions over the queue: one fresh session per request.
pub struct Orchestrator<Q, X>
where
    Q: InteractionQueuePort,
    X: InteractionContextPort,
{
    pub chains: Arc<dyn ChainInfoPort>,
    pub queries: Arc<dyn QueriesPort>,
    pub queue: Q,
    pub context: X,
}

impl<Q, X> Orchestrator<Q, X>
where
    Q: InteractionQueuePort,
    X: InteractionContextPort,
{
    pub fn new(
        chains: Arc<dyn ChainInfoPort>,
        queries: Arc<dyn QueriesPort>,
        queue: Q,
        context: X,
    ) -> Self {
        Self {
            chains,
            queries,
            queue,
            context,
        }
    }

    /// Session for the current request, or `None` when the queue is empty.
    pub fn open_next_session(&self) -> Result<Option<SignTxSession>, SessionError> {
        let Some(request) = self.queue.next()? else {
            return Ok(None);
        };
        info!(id = %request.id, chain_id = %request.data.chain_id, "opening sign session");
        let session = SignTxSession::open(
            request,
            Arc::clone(&self.chains),
            Arc::clone(&self.queries),
        )?;
        Ok(Some(session))
    }

    pub fn approve(&self, session: &SignTxSession) -> Result<ApproveOutcome, SessionError> {
        session.approve(&self.queue, &self.context)
    }

    pub fn reject(&self, session: &SignTxSession) -> Result<ApproveOutcome, SessionError> {
        session.reject(&self.queue, &self.context)
    }

    /// Rejects a request no session could be opened for, such as one whose
    /// chain ids disagree.
    pub fn reject_id(&self, id: InteractionId) -> Result<bool, PortError> {
        let mut proceed_next = false;
        self.queue
            .reject_with_proceed_next(id, &mut |next: bool| proceed_next = next)?;
        warn!(%id, proceed_next, "rejected without session");
        Ok(proceed_next)
    }

    pub fn reject_all(&self) -> Result<(), PortError> {
        self.queue.reject_all()?;
        info!("rejected all pending interactions");
        Ok(())
    }
}
