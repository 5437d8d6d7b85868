use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use alloy::primitives::U256;

use cosmos_sign_core::{PortError, QueriesPort, QueryState};

type AccountKey = (String, String);

#[derive(Debug, Default)]
struct QueryStore {
    balances: HashMap<(String, String, String), QueryState<U256>>,
    fetched_accounts: HashSet<AccountKey>,
    failed_accounts: HashMap<AccountKey, String>,
    icns: HashMap<IcnsKey, QueryState<String>>,
}

/// One ICNS lookup: the same name can resolve differently per resolver,
/// registry chain or bech32 prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IcnsKey {
    pub icns_chain_id: String,
    pub resolver_contract: String,
    pub name: String,
    pub bech32_prefix: String,
}

impl IcnsKey {
    pub fn new(icns_chain_id: &str, resolver_contract: &str, name: &str, bech32_prefix: &str) -> Self {
        Self {
            icns_chain_id: icns_chain_id.to_owned(),
            resolver_contract: resolver_contract.to_owned(),
            name: name.to_owned(),
            bech32_prefix: bech32_prefix.to_owned(),
        }
    }
}

/// Query results held in memory. Anything not recorded is still loading.
///
/// Clones share the same store, so a fetcher can fill in results while
/// sessions read them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQueriesAdapter {
    state: Arc<Mutex<QueryStore>>,
}

impl InMemoryQueriesAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, QueryStore>, PortError> {
        self.state
            .lock()
            .map_err(|e| PortError::Transport(format!("query store lock poisoned: {e}")))
    }

    pub fn set_balance(
        &self,
        chain_id: &str,
        address: &str,
        denom: &str,
        amount: U256,
    ) -> Result<(), PortError> {
        self.set_balance_state(chain_id, address, denom, QueryState::Ready(amount))
    }

    pub fn set_balance_loading(
        &self,
        chain_id: &str,
        address: &str,
        denom: &str,
    ) -> Result<(), PortError> {
        self.set_balance_state(chain_id, address, denom, QueryState::Loading)
    }

    pub fn set_balance_failed(
        &self,
        chain_id: &str,
        address: &str,
        denom: &str,
        reason: &str,
    ) -> Result<(), PortError> {
        self.set_balance_state(
            chain_id,
            address,
            denom,
            QueryState::Failed(reason.to_owned()),
        )
    }

    fn set_balance_state(
        &self,
        chain_id: &str,
        address: &str,
        denom: &str,
        state: QueryState<U256>,
    ) -> Result<(), PortError> {
        self.lock()?.balances.insert(
            (chain_id.to_owned(), address.to_owned(), denom.to_owned()),
            state,
        );
        Ok(())
    }

    /// The account's full balance list is known: denoms not recorded are zero.
    pub fn mark_account_fetched(&self, chain_id: &str, address: &str) -> Result<(), PortError> {
        let mut g = self.lock()?;
        let key = (chain_id.to_owned(), address.to_owned());
        g.failed_accounts.remove(&key);
        g.fetched_accounts.insert(key);
        Ok(())
    }

    /// Every unrecorded denom of the account reports `reason`.
    pub fn mark_account_failed(
        &self,
        chain_id: &str,
        address: &str,
        reason: &str,
    ) -> Result<(), PortError> {
        self.lock()?
            .failed_accounts
            .insert((chain_id.to_owned(), address.to_owned()), reason.to_owned());
        Ok(())
    }

    pub fn set_icns(&self, key: IcnsKey, state: QueryState<String>) -> Result<(), PortError> {
        self.lock()?.icns.insert(key, state);
        Ok(())
    }
}

impl QueriesPort for InMemoryQueriesAdapter {
    fn balance(&self, chain_id: &str, address: &str, denom: &str) -> QueryState<U256> {
        let g = match self.lock() {
            Ok(g) => g,
            Err(e) => return QueryState::Failed(e.to_string()),
        };
        if let Some(state) = g
            .balances
            .get(&(chain_id.to_owned(), address.to_owned(), denom.to_owned()))
        {
            return state.clone();
        }
        let account = (chain_id.to_owned(), address.to_owned());
        if let Some(reason) = g.failed_accounts.get(&account) {
            return QueryState::Failed(reason.clone());
        }
        if g.fetched_accounts.contains(&account) {
            return QueryState::Ready(U256::ZERO);
        }
        QueryState::Loading
    }

    fn icns_address(
        &self,
        icns_chain_id: &str,
        resolver_contract: &str,
        name: &str,
        bech32_prefix: &str,
    ) -> QueryState<String> {
        let g = match self.lock() {
            Ok(g) => g,
            Err(e) => return QueryState::Failed(e.to_string()),
        };
        g.icns
            .get(&IcnsKey::new(icns_chain_id, resolver_contract, name, bech32_prefix))
            .cloned()
            .unwrap_or(QueryState::Loading)
    }
}
