use std::path::PathBuf;

use cosmos_sign_core::ibc::{IcnsInfo, RecipientOptions};

#[derive(Debug, Clone)]
pub struct SignAdapterConfig {
    pub lcd_timeout_ms: u64,
    pub lcd_retry_count: u32,
    pub icns_chain_id: Option<String>,
    pub icns_resolver_contract: Option<String>,
    pub allow_hex_address_on_ethermint: bool,
    pub chain_registry_path: Option<PathBuf>,
}

impl Default for SignAdapterConfig {
    fn default() -> Self {
        Self {
            lcd_timeout_ms: 10_000,
            lcd_retry_count: 2,
            icns_chain_id: None,
            icns_resolver_contract: None,
            allow_hex_address_on_ethermint: false,
            chain_registry_path: None,
        }
    }
}

impl SignAdapterConfig {
    /// Defaults overridden by `COSMOS_SIGN_*` variables. Unparsable values
    /// keep the default.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(v) = env_parse("COSMOS_SIGN_LCD_TIMEOUT_MS") {
            cfg.lcd_timeout_ms = v;
        }
        if let Some(v) = env_parse("COSMOS_SIGN_LCD_RETRY_COUNT") {
            cfg.lcd_retry_count = v;
        }
        cfg.icns_chain_id = env_string("COSMOS_SIGN_ICNS_CHAIN_ID");
        cfg.icns_resolver_contract = env_string("COSMOS_SIGN_ICNS_RESOLVER");
        if let Some(v) = env_parse("COSMOS_SIGN_ALLOW_HEX_ADDRESS") {
            cfg.allow_hex_address_on_ethermint = v;
        }
        cfg.chain_registry_path = env_string("COSMOS_SIGN_CHAIN_REGISTRY").map(PathBuf::from);
        cfg
    }

    /// ICNS is on only when both the chain and the resolver are configured.
    pub fn icns(&self) -> Option<IcnsInfo> {
        match (&self.icns_chain_id, &self.icns_resolver_contract) {
            (Some(chain_id), Some(resolver)) => Some(IcnsInfo {
                chain_id: chain_id.clone(),
                resolver_contract_address: resolver.clone(),
            }),
            _ => None,
        }
    }

    pub fn recipient_options(&self) -> RecipientOptions {
        RecipientOptions {
            allow_hex_address_on_ethermint: self.allow_hex_address_on_ethermint,
            icns: self.icns(),
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
