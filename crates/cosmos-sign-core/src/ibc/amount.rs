use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::domain::Currency;
use crate::ports::{QueriesPort, QueryState};
use crate::tx::amount::{balance_properties, check_balance, AmountConfig};
use crate::tx::chain::TxChain;
use crate::tx::error::{ConfigError, TxConfig, UiProperties};
use crate::tx::fee::FeeConfig;
use crate::tx::sender::SenderConfig;
use crate::units::{format_decimal, parse_decimal, sum_denom, CoinPretty, Dec};

#[derive(Debug, Default)]
struct AmountState {
    value: String,
    currency: Option<String>,
    fraction: Option<Dec>,
}

/// Amount typed by the user for an IBC transfer, in one selected currency.
pub struct IbcAmountConfig {
    chain: TxChain,
    queries: Arc<dyn QueriesPort>,
    sender: Rc<SenderConfig>,
    state: RefCell<AmountState>,
    fee: RefCell<Weak<FeeConfig>>,
    disable_balance_check: Cell<bool>,
}

impl IbcAmountConfig {
    pub fn new(chain: TxChain, queries: Arc<dyn QueriesPort>, sender: Rc<SenderConfig>) -> Self {
        Self {
            chain,
            queries,
            sender,
            state: RefCell::new(AmountState::default()),
            fee: RefCell::new(Weak::new()),
            disable_balance_check: Cell::new(false),
        }
    }

    /// Sets a typed amount in display units; clears any fraction.
    pub fn set_value(&self, value: impl Into<String>) {
        let mut state = self.state.borrow_mut();
        state.value = value.into();
        state.fraction = None;
    }

    /// The typed amount, or the amount a fraction currently resolves to.
    pub fn value(&self) -> String {
        if self.fraction().is_some() {
            return self
                .amount()
                .first()
                .map(|c| format_decimal(c.amount(), c.currency().coin_decimals))
                .unwrap_or_default();
        }
        self.state.borrow().value.clone()
    }

    pub fn select_currency(&self, minimal_denom: impl Into<String>) {
        self.state.borrow_mut().currency = Some(minimal_denom.into());
    }

    /// Selected currency, defaulting to the chain's first.
    pub fn currency(&self) -> Result<Currency, ConfigError> {
        let info = self.chain.chain_info()?;
        let selected = self.state.borrow().currency.clone();
        match selected {
            Some(denom) => info
                .find_currency(&denom)
                .cloned()
                .ok_or(ConfigError::UnknownCurrency(denom)),
            None => info
                .currencies
                .first()
                .cloned()
                .ok_or_else(|| ConfigError::UnknownCurrency(self.chain.chain_id().to_owned())),
        }
    }

    /// Spend `fraction` of the balance left after a same-denom fee.
    pub fn set_fraction(&self, fraction: f64) -> Result<(), ConfigError> {
        let fraction = Dec::from_f64(fraction)?;
        if fraction > Dec::one() {
            return Err(ConfigError::InvalidNumber(fraction.to_string()));
        }
        self.state.borrow_mut().fraction = Some(fraction);
        Ok(())
    }

    pub fn fraction(&self) -> Option<Dec> {
        self.state.borrow().fraction
    }

    fn fee(&self) -> Vec<CoinPretty> {
        self.fee
            .borrow()
            .upgrade()
            .map(|f| f.fee())
            .unwrap_or_default()
    }

    /// `Ok(None)` while a fraction waits on the balance.
    fn parsed_amount(&self) -> Result<Option<CoinPretty>, ConfigError> {
        let currency = self.currency()?;
        let (value, fraction) = {
            let state = self.state.borrow();
            (state.value.clone(), state.fraction)
        };

        let Some(fraction) = fraction else {
            let amount = parse_decimal(&value, currency.coin_decimals)?;
            return Ok(Some(CoinPretty::new(currency, amount)));
        };

        let sender = self.sender.value();
        let denom = currency.coin_minimal_denom.clone();
        match self.queries.balance(self.chain.chain_id(), &sender, &denom) {
            QueryState::Loading => Ok(None),
            QueryState::Failed(e) => Err(ConfigError::BalanceQueryFailed(e)),
            QueryState::Ready(balance) => {
                let available = balance.saturating_sub(sum_denom(&self.fee(), &denom));
                Ok(Some(CoinPretty::new(
                    currency,
                    fraction.mul_truncate(available),
                )))
            }
        }
    }
}

impl AmountConfig for IbcAmountConfig {
    fn amount(&self) -> Vec<CoinPretty> {
        match self.parsed_amount() {
            Ok(Some(coin)) => vec![coin],
            _ => Vec::new(),
        }
    }

    fn set_fee_config(&self, fee: &Rc<FeeConfig>) {
        *self.fee.borrow_mut() = Rc::downgrade(fee);
    }

    fn set_disable_balance_check(&self, disable: bool) {
        self.disable_balance_check.set(disable);
    }

    fn disable_balance_check(&self) -> bool {
        self.disable_balance_check.get()
    }
}

impl TxConfig for IbcAmountConfig {
    fn ui_properties(&self) -> UiProperties {
        let currency = match self.currency() {
            Ok(currency) => currency,
            Err(e) => return UiProperties::error(e),
        };
        if currency.contract_address.is_some() {
            return UiProperties::error(ConfigError::CurrencyNotTransferable(
                currency.coin_denom,
            ));
        }
        let coin = match self.parsed_amount() {
            Ok(Some(coin)) => coin,
            Ok(None) => return UiProperties::loading_block(),
            Err(e) => return UiProperties::error(e),
        };
        if coin.is_zero() {
            return UiProperties::error(ConfigError::ZeroAmount);
        }
        if self.disable_balance_check() || self.sender.ui_properties().error.is_some() {
            return UiProperties::ok();
        }

        let need = coin
            .amount()
            .saturating_add(sum_denom(&self.fee(), coin.denom()));
        let check = check_balance(
            self.queries.as_ref(),
            self.chain.chain_id(),
            &self.sender.value(),
            coin.denom(),
            need,
        );
        balance_properties([check], ConfigError::InsufficientAmount)
    }
}
