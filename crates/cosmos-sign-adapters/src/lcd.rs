use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::U256;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use cosmos_sign_core::{ChainInfoPort, Coin, PortError, QueriesPort, QueryState};

use crate::queries::{IcnsKey, InMemoryQueriesAdapter};
use crate::SignAdapterConfig;

#[derive(Debug, Deserialize)]
struct BalancesResponse {
    balances: Vec<Coin>,
}

#[derive(Debug, Deserialize)]
struct SmartQueryResponse {
    data: Value,
}

/// Chain queries over a node's LCD (REST) endpoint.
///
/// Fetching is explicit (`refresh_balances`, `resolve_icns`); the port
/// methods only read what has been fetched so far.
#[derive(Clone)]
pub struct LcdQueriesAdapter {
    chains: Arc<dyn ChainInfoPort>,
    client: reqwest::blocking::Client,
    retry_count: u32,
    store: InMemoryQueriesAdapter,
}

impl LcdQueriesAdapter {
    pub fn with_config(
        chains: Arc<dyn ChainInfoPort>,
        config: &SignAdapterConfig,
    ) -> Result<Self, PortError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.lcd_timeout_ms))
            .build()
            .map_err(|e| PortError::Transport(format!("failed to build lcd client: {e}")))?;
        Ok(Self {
            chains,
            client,
            retry_count: config.lcd_retry_count,
            store: InMemoryQueriesAdapter::new(),
        })
    }

    pub fn store(&self) -> &InMemoryQueriesAdapter {
        &self.store
    }

    fn rest(&self, chain_id: &str) -> Result<String, PortError> {
        let info = self.chains.chain_info(chain_id)?;
        info.rest
            .as_deref()
            .map(|r| r.trim_end_matches('/').to_owned())
            .ok_or_else(|| PortError::Policy(format!("chain {chain_id} has no rest endpoint")))
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, PortError> {
        let mut last_err = PortError::Transport(format!("lcd request not attempted: {url}"));
        for attempt in 0..=self.retry_count {
            match self.client.get(url).send() {
                Ok(resp) if resp.status().is_success() => {
                    return resp
                        .json::<T>()
                        .map_err(|e| PortError::Transport(format!("lcd json decode failed: {e}")));
                }
                Ok(resp) if resp.status().is_server_error() => {
                    last_err = PortError::Transport(format!("lcd status {}", resp.status()));
                }
                Ok(resp) => {
                    let status = resp.status();
                    let body = resp.text().unwrap_or_default();
                    return Err(PortError::NotFound(format!("lcd status {status}: {body}")));
                }
                Err(e) => {
                    last_err = PortError::Transport(format!("lcd request failed: {e}"));
                }
            }
            warn!(url, attempt, error = %last_err, "lcd request failed");
        }
        Err(last_err)
    }

    /// Fetches every balance of `address` and records it. A failure is
    /// recorded too, so configs report it instead of waiting forever.
    pub fn refresh_balances(&self, chain_id: &str, address: &str) -> Result<(), PortError> {
        let result = self.rest(chain_id).and_then(|rest| {
            self.get_json::<BalancesResponse>(&format!(
                "{rest}/cosmos/bank/v1beta1/balances/{address}"
            ))
        });
        let balances = match result {
            Ok(resp) => resp.balances,
            Err(e) => {
                self.store
                    .mark_account_failed(chain_id, address, &e.to_string())?;
                return Err(e);
            }
        };
        for coin in &balances {
            match U256::from_str_radix(&coin.amount, 10) {
                Ok(amount) => self.store.set_balance(chain_id, address, &coin.denom, amount)?,
                Err(e) => self.store.set_balance_failed(
                    chain_id,
                    address,
                    &coin.denom,
                    &format!("invalid amount {}: {e}", coin.amount),
                )?,
            }
        }
        self.store.mark_account_fetched(chain_id, address)?;
        debug!(chain_id, address, denoms = balances.len(), "balances refreshed");
        Ok(())
    }

    /// Resolves an ICNS name (`alice.osmo`) to its bech32 address under
    /// `bech32_prefix`, recording the outcome.
    pub fn resolve_icns(
        &self,
        icns_chain_id: &str,
        resolver_contract: &str,
        name: &str,
        bech32_prefix: &str,
    ) -> Result<String, PortError> {
        let result = self.query_icns(icns_chain_id, resolver_contract, name, bech32_prefix);
        let key = IcnsKey::new(icns_chain_id, resolver_contract, name, bech32_prefix);
        let state = match &result {
            Ok(address) => QueryState::Ready(address.clone()),
            Err(e) => QueryState::Failed(e.to_string()),
        };
        self.store.set_icns(key, state)?;
        result
    }

    fn query_icns(
        &self,
        icns_chain_id: &str,
        resolver_contract: &str,
        name: &str,
        bech32_prefix: &str,
    ) -> Result<String, PortError> {
        let rest = self.rest(icns_chain_id)?;
        let query = serde_json::json!({ "address_by_icns": { "icns": name } });
        let encoded = STANDARD.encode(query.to_string());
        let resp: SmartQueryResponse = self.get_json(&format!(
            "{rest}/cosmwasm/wasm/v1/contract/{resolver_contract}/smart/{encoded}"
        ))?;
        let address = resp
            .data
            .get("bech32_address")
            .and_then(Value::as_str)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| PortError::NotFound(format!("icns name {name}")))?;
        if !address.starts_with(&format!("{bech32_prefix}1")) {
            return Err(PortError::Validation(format!(
                "icns name {name} resolved to {address}, expected prefix {bech32_prefix}"
            )));
        }
        Ok(address.to_owned())
    }
}

impl QueriesPort for LcdQueriesAdapter {
    fn balance(&self, chain_id: &str, address: &str, denom: &str) -> QueryState<U256> {
        self.store.balance(chain_id, address, denom)
    }

    fn icns_address(
        &self,
        icns_chain_id: &str,
        resolver_contract: &str,
        name: &str,
        bech32_prefix: &str,
    ) -> QueryState<String> {
        self.store
            .icns_address(icns_chain_id, resolver_contract, name, bech32_prefix)
    }
}
