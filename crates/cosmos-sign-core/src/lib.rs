pub mod compose;
pub mod domain;
pub mod escape;
pub mod ibc;
pub mod messages;
pub mod orchestrator;
pub mod ports;
pub mod session;
pub mod state_machine;
pub mod tx;
pub mod units;

pub use compose::{
    compose_ibc_transfer_configs, compose_sign_tx_configs, IbcTransferConfigs, SignTxConfigs,
};
pub use domain::{
    ChainInfo, Coin, Currency, InteractionId, InteractionRequest, InteractionResult, SignDocWrapper,
    SignInteractionData, SignOptions,
};
pub use orchestrator::Orchestrator;
pub use ports::{
    ChainInfoPort, InteractionContextPort, InteractionQueuePort, PortError, QueriesPort,
    QueryState,
};
pub use session::{ApproveBlock, ApproveOutcome, SessionError, SignTxSession};
pub use state_machine::{InteractionStatus, StateTransition};
