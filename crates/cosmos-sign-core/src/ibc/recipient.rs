use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ports::{QueriesPort, QueryState};
use crate::tx::address::{hex_to_bech32, validate_bech32_address};
use crate::tx::chain::TxChain;
use crate::tx::error::{ConfigError, TxConfig, UiProperties};

use super::channel::IbcChannelConfig;

pub const ETH_ADDRESS_GEN_FEATURE: &str = "eth-address-gen";

/// Where `name.prefix` names are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IcnsInfo {
    pub chain_id: String,
    pub resolver_contract_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientOptions {
    pub allow_hex_address_on_ethermint: bool,
    pub icns: Option<IcnsInfo>,
}

/// Recipient on the destination chain of an IBC transfer.
///
/// The destination is the selected channel's counterparty chain. With no
/// channel selected the sending chain is used instead, so an address can be
/// typed (and validated against the sending chain's prefix) before a channel
/// is picked.
pub struct IbcRecipientConfig {
    chain: TxChain,
    queries: Arc<dyn QueriesPort>,
    channel: Rc<IbcChannelConfig>,
    options: RecipientOptions,
    value: RefCell<String>,
}

impl IbcRecipientConfig {
    pub fn new(
        chain: TxChain,
        queries: Arc<dyn QueriesPort>,
        channel: Rc<IbcChannelConfig>,
        options: RecipientOptions,
    ) -> Self {
        Self {
            chain,
            queries,
            channel,
            options,
            value: RefCell::new(String::new()),
        }
    }

    pub fn chain_id(&self) -> String {
        self.channel
            .channel()
            .map(|c| c.counterparty_chain_id)
            .unwrap_or_else(|| self.chain.chain_id().to_owned())
    }

    pub fn value(&self) -> String {
        self.value.borrow().clone()
    }

    pub fn set_value(&self, value: impl Into<String>) {
        *self.value.borrow_mut() = value.into();
    }

    pub fn options(&self) -> &RecipientOptions {
        &self.options
    }

    /// Bech32 recipient after hex conversion or ICNS lookup; empty while
    /// invalid or unresolved.
    pub fn recipient(&self) -> String {
        self.resolve().ok().flatten().unwrap_or_default()
    }

    /// `Ok(None)` while an ICNS lookup is in flight.
    fn resolve(&self) -> Result<Option<String>, ConfigError> {
        let value = self.value();
        let value = value.trim();
        if value.is_empty() {
            return Err(ConfigError::EmptyAddress);
        }

        let info = self.chain.with_chain_id(self.chain_id()).chain_info()?;
        let prefix = info.bech32_config.bech32_prefix_acc_addr.as_str();

        if let Some(icns) = &self.options.icns {
            if let Some((name, suffix)) = value.rsplit_once('.') {
                if name.is_empty() || suffix != prefix {
                    return Err(ConfigError::IcnsResolveFailed(format!(
                        "{value}: expected a name ending in .{prefix}"
                    )));
                }
                return match self.queries.icns_address(
                    &icns.chain_id,
                    &icns.resolver_contract_address,
                    value,
                    prefix,
                ) {
                    QueryState::Loading => Ok(None),
                    QueryState::Failed(e) => {
                        Err(ConfigError::IcnsResolveFailed(format!("{value}: {e}")))
                    }
                    QueryState::Ready(address) => {
                        validate_bech32_address(&address, prefix)?;
                        Ok(Some(address))
                    }
                };
            }
        }

        if self.options.allow_hex_address_on_ethermint
            && info.has_feature(ETH_ADDRESS_GEN_FEATURE)
            && value.starts_with("0x")
        {
            return hex_to_bech32(value, prefix).map(Some);
        }

        validate_bech32_address(value, prefix)?;
        Ok(Some(value.to_owned()))
    }
}

impl TxConfig for IbcRecipientConfig {
    fn ui_properties(&self) -> UiProperties {
        match self.resolve() {
            Ok(Some(_)) => UiProperties::ok(),
            Ok(None) => UiProperties::loading_block(),
            Err(e) => UiProperties::error(e),
        }
    }
}
