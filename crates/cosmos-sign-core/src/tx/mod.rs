//! Transaction configuration objects.
//!
//! Each object owns one aspect of a transaction and validates it. Objects are
//! shared through `Rc` and mutated through `&self`; a dependency is a strong
//! `Rc`, a back-reference is a `Weak` set once during composition.

pub mod address;
pub mod amount;
pub mod chain;
pub mod error;
pub mod fee;
pub mod gas;
pub mod memo;
pub mod sender;
pub mod sign_doc_amount;
pub mod sign_doc_helper;
pub mod validate;

pub use amount::AmountConfig;
pub use chain::TxChain;
pub use error::{ConfigError, LoadingState, TxConfig, UiProperties};
pub use fee::{FeeConfig, FeeType};
pub use gas::GasConfig;
pub use memo::{MemoConfig, MAX_MEMO_LENGTH};
pub use sender::SenderConfig;
pub use sign_doc_amount::SignDocAmountConfig;
pub use sign_doc_helper::SignDocHelper;
pub use validate::{validate_tx_configs, TxConfigsValidate};
