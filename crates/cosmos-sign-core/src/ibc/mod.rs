//! Configuration objects specific to IBC transfers.

pub mod amount;
pub mod channel;
pub mod recipient;

pub use amount::IbcAmountConfig;
pub use channel::{IbcChannel, IbcChannelConfig};
pub use recipient::{IbcRecipientConfig, IcnsInfo, RecipientOptions, ETH_ADDRESS_GEN_FEATURE};
