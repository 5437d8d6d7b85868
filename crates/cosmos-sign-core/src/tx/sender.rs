use std::cell::RefCell;

use crate::tx::address::validate_bech32_address;
use crate::tx::chain::TxChain;
use crate::tx::error::{ConfigError, TxConfig, UiProperties};

#[derive(Debug)]
pub struct SenderConfig {
    chain: TxChain,
    value: RefCell<String>,
}

impl SenderConfig {
    pub fn new(chain: TxChain, sender: impl Into<String>) -> Self {
        Self {
            chain,
            value: RefCell::new(sender.into()),
        }
    }

    pub fn chain(&self) -> &TxChain {
        &self.chain
    }

    pub fn value(&self) -> String {
        self.value.borrow().clone()
    }

    pub fn set_value(&self, sender: impl Into<String>) {
        *self.value.borrow_mut() = sender.into();
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let value = self.value();
        if value.trim().is_empty() {
            return Err(ConfigError::EmptyAddress);
        }
        let info = self.chain.chain_info()?;
        validate_bech32_address(&value, &info.bech32_config.bech32_prefix_acc_addr)
    }
}

impl TxConfig for SenderConfig {
    fn ui_properties(&self) -> UiProperties {
        self.validate().into()
    }
}
