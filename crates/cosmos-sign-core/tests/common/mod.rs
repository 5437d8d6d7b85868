#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use alloy::primitives::U256;
use serde_json::json;

use cosmos_sign_core::domain::{
    AminoMsg, AminoSignDoc, Bech32Config, FeeCurrency, InteractionInfo, StdFee,
};
use cosmos_sign_core::{
    ChainInfo, ChainInfoPort, Coin, Currency, InteractionContextPort, InteractionId,
    InteractionQueuePort, InteractionRequest, PortError, QueriesPort, QueryState, SignDocWrapper,
    SignInteractionData, SignOptions,
};

pub const COSMOS_SIGNER: &str = "cosmos1qyqszqgpqyqszqgpqyqszqgpqyqszqgpjnp7du";
pub const COSMOS_OTHER: &str = "cosmos1qgpqyqszqgpqyqszqgpqyqszqgpqyqszrh8mx2";
pub const OSMO_RECIPIENT: &str = "osmo1qvpsxqcrqvpsxqcrqvpsxqcrqvpsxqcr2u426e";
pub const EVMOS_SENDER: &str = "evmos1qyqszqgpqyqszqgpqyqszqgpqyqszqgpsjssh5";
pub const HEX_ADDRESS: &str = "0xabababababababababababababababababababab";
pub const HEX_AS_EVMOS: &str = "evmos14w46h2at4w46h2at4w46h2at4w46h2at70tmt4";

fn currency(display: &str, minimal: &str, decimals: u8) -> Currency {
    Currency {
        coin_denom: display.to_owned(),
        coin_minimal_denom: minimal.to_owned(),
        coin_decimals: decimals,
        contract_address: None,
    }
}

fn chain(chain_id: &str, name: &str, prefix: &str, native: Currency) -> ChainInfo {
    ChainInfo {
        chain_id: chain_id.to_owned(),
        chain_name: name.to_owned(),
        rest: None,
        bech32_config: Bech32Config {
            bech32_prefix_acc_addr: prefix.to_owned(),
        },
        currencies: vec![native.clone()],
        fee_currencies: vec![FeeCurrency {
            currency: native,
            gas_price_step: None,
        }],
        features: Vec::new(),
    }
}

pub fn cosmoshub() -> ChainInfo {
    let mut info = chain(
        "cosmoshub-4",
        "Cosmos Hub",
        "cosmos",
        currency("ATOM", "uatom", 6),
    );
    info.currencies.push(Currency {
        contract_address: Some("cosmos1contract".to_owned()),
        ..currency("CW20", "cw20:cosmos1contract", 6)
    });
    info
}

pub fn osmosis() -> ChainInfo {
    chain("osmosis-1", "Osmosis", "osmo", currency("OSMO", "uosmo", 6))
}

pub fn evmos() -> ChainInfo {
    let mut info = chain(
        "evmos_9001-2",
        "Evmos",
        "evmos",
        currency("EVMOS", "aevmos", 18),
    );
    info.features.push("eth-address-gen".to_owned());
    info
}

#[derive(Debug, Default)]
pub struct StubChains {
    chains: HashMap<String, Arc<ChainInfo>>,
}

impl StubChains {
    pub fn with(infos: impl IntoIterator<Item = ChainInfo>) -> Arc<Self> {
        Arc::new(Self {
            chains: infos
                .into_iter()
                .map(|info| (info.chain_id.clone(), Arc::new(info)))
                .collect(),
        })
    }

    pub fn standard() -> Arc<Self> {
        Self::with([cosmoshub(), osmosis(), evmos()])
    }
}

impl ChainInfoPort for StubChains {
    fn chain_info(&self, chain_id: &str) -> Result<Arc<ChainInfo>, PortError> {
        self.chains
            .get(chain_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(chain_id.to_owned()))
    }
}

/// Query stub; anything not set is still loading.
#[derive(Debug, Default)]
pub struct StubQueries {
    balances: Mutex<HashMap<(String, String, String), QueryState<U256>>>,
    icns: Mutex<HashMap<String, QueryState<String>>>,
}

impl StubQueries {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_balance(&self, chain_id: &str, address: &str, denom: &str, state: QueryState<U256>) {
        self.balances.lock().expect("balances lock").insert(
            (chain_id.to_owned(), address.to_owned(), denom.to_owned()),
            state,
        );
    }

    pub fn fund(&self, chain_id: &str, address: &str, denom: &str, amount: u64) {
        self.set_balance(chain_id, address, denom, QueryState::Ready(U256::from(amount)));
    }

    pub fn set_icns(&self, name: &str, state: QueryState<String>) {
        self.icns
            .lock()
            .expect("icns lock")
            .insert(name.to_owned(), state);
    }
}

impl QueriesPort for StubQueries {
    fn balance(&self, chain_id: &str, address: &str, denom: &str) -> QueryState<U256> {
        self.balances
            .lock()
            .expect("balances lock")
            .get(&(chain_id.to_owned(), address.to_owned(), denom.to_owned()))
            .cloned()
            .unwrap_or(QueryState::Loading)
    }

    fn icns_address(
        &self,
        _icns_chain_id: &str,
        _resolver_contract: &str,
        name: &str,
        _bech32_prefix: &str,
    ) -> QueryState<String> {
        self.icns
            .lock()
            .expect("icns lock")
            .get(name)
            .cloned()
            .unwrap_or(QueryState::Loading)
    }
}

/// Minimal FIFO queue recording what was dispatched.
#[derive(Debug, Default)]
pub struct StubQueue {
    pending: RefCell<VecDeque<Arc<InteractionRequest>>>,
    resolved: RefCell<HashSet<InteractionId>>,
    pub approved: RefCell<Vec<(InteractionId, SignDocWrapper)>>,
    pub rejected: RefCell<Vec<InteractionId>>,
}

impl StubQueue {
    pub fn with(requests: impl IntoIterator<Item = InteractionRequest>) -> Self {
        let queue = Self::default();
        queue
            .pending
            .borrow_mut()
            .extend(requests.into_iter().map(Arc::new));
        queue
    }

    fn resolve(&self, id: InteractionId, on_proceed: &mut dyn FnMut(bool)) -> Result<(), PortError> {
        if self.is_stale(id) {
            return Err(PortError::Conflict("INTERACTION_STALE".to_owned()));
        }
        self.resolved.borrow_mut().insert(id);
        self.pending.borrow_mut().pop_front();
        on_proceed(!self.pending.borrow().is_empty());
        Ok(())
    }
}

impl InteractionQueuePort for StubQueue {
    fn next(&self) -> Result<Option<Arc<InteractionRequest>>, PortError> {
        Ok(self.pending.borrow().front().cloned())
    }

    fn approve_with_proceed_next(
        &self,
        id: InteractionId,
        signed: SignDocWrapper,
        on_proceed: &mut dyn FnMut(bool),
    ) -> Result<(), PortError> {
        self.resolve(id, on_proceed)?;
        self.approved.borrow_mut().push((id, signed));
        Ok(())
    }

    fn reject_with_proceed_next(
        &self,
        id: InteractionId,
        on_proceed: &mut dyn FnMut(bool),
    ) -> Result<(), PortError> {
        self.resolve(id, on_proceed)?;
        self.rejected.borrow_mut().push(id);
        Ok(())
    }

    fn reject_all(&self) -> Result<(), PortError> {
        let drained: Vec<_> = self.pending.borrow_mut().drain(..).collect();
        for request in drained {
            self.resolved.borrow_mut().insert(request.id);
            self.rejected.borrow_mut().push(request.id);
        }
        Ok(())
    }

    fn is_stale(&self, id: InteractionId) -> bool {
        self.resolved.borrow().contains(&id)
            || self.pending.borrow().front().map(|r| r.id) != Some(id)
    }
}

#[derive(Debug, Default)]
pub struct StubContext {
    pub info: InteractionInfo,
    pub closed: Cell<bool>,
}

impl StubContext {
    pub fn popup() -> Self {
        Self {
            info: InteractionInfo {
                interaction: true,
                interaction_internal: false,
            },
            closed: Cell::new(false),
        }
    }
}

impl InteractionContextPort for StubContext {
    fn info(&self) -> InteractionInfo {
        self.info
    }

    fn close_window(&self) {
        self.closed.set(true);
    }
}

pub fn send_msg(from: &str, to: &str, amount: &str) -> AminoMsg {
    AminoMsg {
        msg_type: "cosmos-sdk/MsgSend".to_owned(),
        value: json!({
            "from_address": from,
            "to_address": to,
            "amount": [{"denom": "uatom", "amount": amount}]
        }),
    }
}

pub fn amino_doc(chain_id: &str, fees: Vec<Coin>, gas: &str, memo: &str, msgs: Vec<AminoMsg>) -> SignDocWrapper {
    SignDocWrapper::Amino(AminoSignDoc {
        chain_id: chain_id.to_owned(),
        account_number: "7".to_owned(),
        sequence: "3".to_owned(),
        fee: StdFee {
            amount: fees,
            gas: gas.to_owned(),
            payer: None,
            granter: None,
            extra: Default::default(),
        },
        msgs,
        memo: memo.to_owned(),
        extra: Default::default(),
    })
}

pub fn request(id: u64, chain_id: &str, sign_doc: SignDocWrapper, options: SignOptions) -> InteractionRequest {
    InteractionRequest {
        id: InteractionId(id),
        data: SignInteractionData {
            origin: Some("https://app.example".to_owned()),
            chain_id: chain_id.to_owned(),
            signer: COSMOS_SIGNER.to_owned(),
            sign_doc,
            sign_options: options,
        },
    }
}

/// One MsgSend of 1 ATOM, fee 2000uatom, gas 80000, memo `a&amp;b`.
pub fn example_request(id: u64, options: SignOptions) -> InteractionRequest {
    request(
        id,
        "cosmoshub-4",
        amino_doc(
            "cosmoshub-4",
            vec![Coin::new("uatom", "2000")],
            "80000",
            "a&amp;b",
            vec![send_msg(COSMOS_SIGNER, COSMOS_OTHER, "1000000")],
        ),
        options,
    )
}

pub fn prefer_no_set_fee() -> SignOptions {
    SignOptions {
        prefer_no_set_fee: true,
        ..SignOptions::default()
    }
}
