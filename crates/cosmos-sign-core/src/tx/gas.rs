use std::cell::RefCell;

use crate::tx::error::{ConfigError, TxConfig, UiProperties};

/// Gas limit as typed. The raw text is kept so an invalid entry can be
/// reported instead of silently replaced.
#[derive(Debug)]
pub struct GasConfig {
    raw: RefCell<String>,
    allow_zero: bool,
}

impl GasConfig {
    pub fn new(initial: u64) -> Self {
        Self {
            raw: RefCell::new(initial.to_string()),
            allow_zero: false,
        }
    }

    /// Some dapps sign arbitrary data through a dummy tx with zero gas.
    pub fn zero_allowed(initial: u64) -> Self {
        Self {
            raw: RefCell::new(initial.to_string()),
            allow_zero: true,
        }
    }

    pub fn allow_zero(&self) -> bool {
        self.allow_zero
    }

    pub fn raw(&self) -> String {
        self.raw.borrow().clone()
    }

    /// Parsed gas, or zero while the raw text is invalid.
    pub fn value(&self) -> u64 {
        self.raw.borrow().trim().parse().unwrap_or(0)
    }

    pub fn set_value(&self, gas: u64) {
        *self.raw.borrow_mut() = gas.to_string();
    }

    pub fn set_value_str(&self, gas: &str) {
        *self.raw.borrow_mut() = gas.to_owned();
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let raw = self.raw();
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConfigError::EmptyGas);
        }
        let gas: u64 = raw
            .parse()
            .map_err(|_| ConfigError::InvalidNumber(raw.to_owned()))?;
        if gas == 0 && !self.allow_zero {
            return Err(ConfigError::NotPositiveGas);
        }
        Ok(())
    }
}

impl TxConfig for GasConfig {
    fn ui_properties(&self) -> UiProperties {
        self.validate().into()
    }
}
