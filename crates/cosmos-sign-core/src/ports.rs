use std::sync::Arc;

use alloy::primitives::U256;
use thiserror::Error;

use crate::domain::{ChainInfo, InteractionId, InteractionInfo, InteractionRequest, SignDocWrapper};

#[derive(Debug, Error)]
pub enum PortError {
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("policy error: {0}")]
    Policy(String),
}

/// State of an asynchronously fetched value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

/// Chain metadata registry. Read-only, shared process-wide.
pub trait ChainInfoPort: Send + Sync {
    fn chain_info(&self, chain_id: &str) -> Result<Arc<ChainInfo>, PortError>;
}

/// Chain state lookups. Implementations return whatever they currently hold;
/// a value still in flight is [`QueryState::Loading`].
pub trait QueriesPort: Send + Sync {
    fn balance(&self, chain_id: &str, address: &str, denom: &str) -> QueryState<U256>;

    fn icns_address(
        &self,
        icns_chain_id: &str,
        resolver_contract: &str,
        name: &str,
        bech32_prefix: &str,
    ) -> QueryState<String>;
}

/// FIFO queue of pending sign interactions.
pub trait InteractionQueuePort {
    /// The current (front) request, if any.
    fn next(&self) -> Result<Option<Arc<InteractionRequest>>, PortError>;

    /// Resolves `id` with the signed document, then reports through
    /// `on_proceed` whether another request immediately follows.
    fn approve_with_proceed_next(
        &self,
        id: InteractionId,
        signed: SignDocWrapper,
        on_proceed: &mut dyn FnMut(bool),
    ) -> Result<(), PortError>;

    fn reject_with_proceed_next(
        &self,
        id: InteractionId,
        on_proceed: &mut dyn FnMut(bool),
    ) -> Result<(), PortError>;

    fn reject_all(&self) -> Result<(), PortError>;

    /// True once a resolution for `id` has been dispatched, or when `id` is no
    /// longer the current request.
    fn is_stale(&self, id: InteractionId) -> bool;
}

/// Probe of the hosting surface.
pub trait InteractionContextPort {
    fn info(&self) -> InteractionInfo;
    fn close_window(&self);
}
