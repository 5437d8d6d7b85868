use thiserror::Error;

use crate::units::UnitError;

/// Validation failure of a single configuration object. Reported as data
/// through [`UiProperties`], never returned as an `Err` from a getter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("chain info unavailable: {0}")]
    ChainInfo(String),
    #[error("address is empty")]
    EmptyAddress,
    #[error("invalid bech32 address: {0}")]
    InvalidBech32Address(String),
    #[error("invalid hex address: {0}")]
    InvalidHexAddress(String),
    #[error("ICNS name could not be resolved: {0}")]
    IcnsResolveFailed(String),
    #[error("gas is not set")]
    EmptyGas,
    #[error("gas must be greater than zero")]
    NotPositiveGas,
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("amount is empty")]
    EmptyAmount,
    #[error("amount is zero")]
    ZeroAmount,
    #[error("amount is negative")]
    NegativeAmount,
    #[error("too many decimal places (max {0})")]
    TooManyDecimals(u8),
    #[error("amount overflow")]
    AmountOverflow,
    #[error("insufficient balance for amount")]
    InsufficientAmount,
    #[error("insufficient balance for fee")]
    InsufficientFee,
    #[error("chain has no fee currency")]
    NoFeeCurrency,
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),
    #[error("currency {0} cannot be transferred over IBC")]
    CurrencyNotTransferable(String),
    #[error("memo is too long (max {0} characters)")]
    MemoTooLong(usize),
    #[error("IBC channel is not set")]
    ChannelNotSet,
    #[error("balance query failed: {0}")]
    BalanceQueryFailed(String),
}

impl From<UnitError> for ConfigError {
    fn from(e: UnitError) -> Self {
        match e {
            UnitError::Empty => ConfigError::EmptyAmount,
            UnitError::InvalidNumber(s) => ConfigError::InvalidNumber(s),
            UnitError::Negative(_) => ConfigError::NegativeAmount,
            UnitError::TooManyDecimals { max } => ConfigError::TooManyDecimals(max),
            UnitError::Overflow => ConfigError::AmountOverflow,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadingState {
    #[default]
    Idle,
    /// Data in flight; the value shown may change but approving is allowed.
    Loading,
    /// Data in flight that validation depends on; approving is blocked.
    LoadingBlock,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiProperties {
    pub error: Option<ConfigError>,
    pub warning: Option<ConfigError>,
    pub loading_state: LoadingState,
}

impl UiProperties {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn error(error: ConfigError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn warning(warning: ConfigError) -> Self {
        Self {
            warning: Some(warning),
            ..Self::default()
        }
    }

    pub fn loading_block() -> Self {
        Self {
            loading_state: LoadingState::LoadingBlock,
            ..Self::default()
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.error.is_some() || self.loading_state == LoadingState::LoadingBlock
    }
}

impl From<Result<(), ConfigError>> for UiProperties {
    fn from(r: Result<(), ConfigError>) -> Self {
        match r {
            Ok(()) => UiProperties::ok(),
            Err(e) => UiProperties::error(e),
        }
    }
}

/// Anything that takes part in the approve gate.
pub trait TxConfig {
    fn ui_properties(&self) -> UiProperties;
}
