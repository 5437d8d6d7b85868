#![allow(dead_code)]

use std::sync::Arc;

use serde_json::json;

use cosmos_sign_adapters::{
    ChainRegistryAdapter, InMemoryQueriesAdapter, InteractionQueueAdapter,
    StaticInteractionContext,
};
use cosmos_sign_core::{Orchestrator, SignInteractionData};

pub const SIGNER: &str = "cosmos1qyqszqgpqyqszqgpqyqszqgpqyqszqgpjnp7du";
pub const OTHER: &str = "cosmos1qgpqyqszqgpqyqszqgpqyqszqgpqyqszrh8mx2";
pub const OSMO_ADDRESS: &str = "osmo1qvpsxqcrqvpsxqcrqvpsxqcrqvpsxqcr2u426e";

pub type TestOrchestrator = Orchestrator<InteractionQueueAdapter, StaticInteractionContext>;

pub fn registry_json(rest: Option<&str>) -> String {
    json!([
        {
            "chainId": "cosmoshub-4",
            "chainName": "Cosmos Hub",
            "rest": rest,
            "bech32Config": { "bech32PrefixAccAddr": "cosmos" },
            "currencies": [
                { "coinDenom": "ATOM", "coinMinimalDenom": "uatom", "coinDecimals": 6 }
            ],
            "feeCurrencies": [
                {
                    "coinDenom": "ATOM",
                    "coinMinimalDenom": "uatom",
                    "coinDecimals": 6,
                    "gasPriceStep": { "low": 0.01, "average": 0.025, "high": 0.03 }
                }
            ]
        },
        {
            "chainId": "osmosis-1",
            "chainName": "Osmosis",
            "rest": rest,
            "bech32Config": { "bech32PrefixAccAddr": "osmo" },
            "currencies": [
                { "coinDenom": "OSMO", "coinMinimalDenom": "uosmo", "coinDecimals": 6 }
            ],
            "feeCurrencies": [
                { "coinDenom": "OSMO", "coinMinimalDenom": "uosmo", "coinDecimals": 6 }
            ],
            "features": ["cosmwasm"]
        }
    ])
    .to_string()
}

pub fn registry(rest: Option<&str>) -> Arc<ChainRegistryAdapter> {
    Arc::new(ChainRegistryAdapter::from_json_str(&registry_json(rest)).expect("valid registry"))
}

/// Amino MsgSend request on cosmoshub-4 as a dapp would send it.
pub fn sign_data(memo: &str, fee_amount: &str, prefer_no_set_fee: bool) -> SignInteractionData {
    serde_json::from_value(json!({
        "origin": "https://app.example",
        "chainId": "cosmoshub-4",
        "signer": SIGNER,
        "signDoc": {
            "mode": "amino",
            "signDoc": {
                "chain_id": "cosmoshub-4",
                "account_number": "12",
                "sequence": "4",
                "fee": {
                    "amount": [{ "denom": "uatom", "amount": fee_amount }],
                    "gas": "80000"
                },
                "msgs": [{
                    "type": "cosmos-sdk/MsgSend",
                    "value": {
                        "from_address": SIGNER,
                        "to_address": OTHER,
                        "amount": [{ "denom": "uatom", "amount": "1000000" }]
                    }
                }],
                "memo": memo
            }
        },
        "signOptions": { "preferNoSetFee": prefer_no_set_fee }
    }))
    .expect("valid sign data")
}

pub fn new_orchestrator(
    queries: &InMemoryQueriesAdapter,
) -> (TestOrchestrator, InteractionQueueAdapter, StaticInteractionContext) {
    let queue = InteractionQueueAdapter::new();
    let context = StaticInteractionContext::external_popup();
    let orch = Orchestrator::new(
        registry(None),
        Arc::new(queries.clone()),
        queue.clone(),
        context.clone(),
    );
    (orch, queue, context)
}
