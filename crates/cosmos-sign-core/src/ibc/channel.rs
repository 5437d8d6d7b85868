use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::tx::error::{ConfigError, TxConfig, UiProperties};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IbcChannel {
    pub port_id: String,
    pub channel_id: String,
    pub counterparty_chain_id: String,
}

#[derive(Debug, Default)]
pub struct IbcChannelConfig {
    channel: RefCell<Option<IbcChannel>>,
}

impl IbcChannelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel(&self) -> Option<IbcChannel> {
        self.channel.borrow().clone()
    }

    pub fn set_channel(&self, channel: Option<IbcChannel>) {
        *self.channel.borrow_mut() = channel;
    }
}

impl TxConfig for IbcChannelConfig {
    fn ui_properties(&self) -> UiProperties {
        if self.channel.borrow().is_none() {
            return UiProperties::error(ConfigError::ChannelNotSet);
        }
        UiProperties::ok()
    }
}
