use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::sync::Arc;

use alloy::primitives::U256;

use crate::domain::{FeeCurrency, GasPriceStep, StdFee};
use crate::ports::QueriesPort;
use crate::tx::amount::{balance_properties, check_balance, AmountConfig};
use crate::tx::chain::TxChain;
use crate::tx::error::{ConfigError, TxConfig, UiProperties};
use crate::tx::gas::GasConfig;
use crate::tx::sender::SenderConfig;
use crate::units::{sum_denom, CoinPretty, Dec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeType {
    Low,
    Average,
    High,
}

impl FeeType {
    pub fn gas_price(self, step: &GasPriceStep) -> f64 {
        match self {
            FeeType::Low => step.low,
            FeeType::Average => step.average,
            FeeType::High => step.high,
        }
    }
}

impl fmt::Display for FeeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FeeType::Low => "low",
            FeeType::Average => "average",
            FeeType::High => "high",
        })
    }
}

impl FromStr for FeeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(FeeType::Low),
            "average" => Ok(FeeType::Average),
            "high" => Ok(FeeType::High),
            other => Err(format!("unknown fee type: {other}")),
        }
    }
}

#[derive(Debug, Default)]
struct FeeState {
    fee_type: Option<FeeType>,
    fee_currency: Option<String>,
    manual: Option<Vec<CoinPretty>>,
    disable_balance_check: bool,
}

/// Fee either fixed by hand (`set_fee`) or suggested from gas × gas price
/// (`set_fee_type`). Setting one clears the other.
pub struct FeeConfig {
    chain: TxChain,
    queries: Arc<dyn QueriesPort>,
    sender: Rc<SenderConfig>,
    amount: Rc<dyn AmountConfig>,
    gas: Rc<GasConfig>,
    state: RefCell<FeeState>,
}

impl FeeConfig {
    pub fn new(
        chain: TxChain,
        queries: Arc<dyn QueriesPort>,
        sender: Rc<SenderConfig>,
        amount: Rc<dyn AmountConfig>,
        gas: Rc<GasConfig>,
    ) -> Self {
        Self {
            chain,
            queries,
            sender,
            amount,
            gas,
            state: RefCell::new(FeeState::default()),
        }
    }

    pub fn gas(&self) -> &Rc<GasConfig> {
        &self.gas
    }

    pub fn set_fee(&self, fees: Vec<CoinPretty>) {
        let mut state = self.state.borrow_mut();
        state.manual = Some(fees);
        state.fee_type = None;
    }

    pub fn set_fee_type(&self, fee_type: FeeType) {
        let mut state = self.state.borrow_mut();
        state.fee_type = Some(fee_type);
        state.manual = None;
    }

    pub fn fee_type(&self) -> Option<FeeType> {
        self.state.borrow().fee_type
    }

    pub fn is_manual(&self) -> bool {
        self.state.borrow().manual.is_some()
    }

    /// Fee currency for suggestions; defaults to the chain's first one.
    pub fn set_fee_currency(&self, minimal_denom: impl Into<String>) {
        self.state.borrow_mut().fee_currency = Some(minimal_denom.into());
    }

    pub fn set_disable_balance_check(&self, disable: bool) {
        self.state.borrow_mut().disable_balance_check = disable;
    }

    pub fn disable_balance_check(&self) -> bool {
        self.state.borrow().disable_balance_check
    }

    /// Current fee; empty when unset or not computable.
    pub fn fee(&self) -> Vec<CoinPretty> {
        self.compute_fee().unwrap_or_default()
    }

    /// Suggested fee for `fee_type` at the current gas, whatever mode is active.
    pub fn fee_for_type(&self, fee_type: FeeType) -> Result<CoinPretty, ConfigError> {
        let fee_currency = self.fee_currency()?;
        let step = fee_currency.gas_price_step.unwrap_or_default();
        let price = Dec::from_f64(fee_type.gas_price(&step))?;
        let amount = price.mul_ceil(U256::from(self.gas.value()));
        Ok(CoinPretty::new(fee_currency.currency, amount))
    }

    pub fn to_std_fee(&self) -> StdFee {
        StdFee {
            amount: self.fee().iter().map(CoinPretty::to_coin).collect(),
            gas: self.gas.value().to_string(),
            payer: None,
            granter: None,
            extra: Default::default(),
        }
    }

    fn fee_currency(&self) -> Result<FeeCurrency, ConfigError> {
        let info = self.chain.chain_info()?;
        let selected = self.state.borrow().fee_currency.clone();
        selected
            .and_then(|denom| info.find_fee_currency(&denom).cloned())
            .or_else(|| info.fee_currencies.first().cloned())
            .ok_or(ConfigError::NoFeeCurrency)
    }

    fn compute_fee(&self) -> Result<Vec<CoinPretty>, ConfigError> {
        let (manual, fee_type) = {
            let state = self.state.borrow();
            (state.manual.clone(), state.fee_type)
        };
        match (manual, fee_type) {
            (Some(fees), _) => Ok(fees),
            (None, Some(fee_type)) => Ok(vec![self.fee_for_type(fee_type)?]),
            (None, None) => Ok(Vec::new()),
        }
    }
}

impl TxConfig for FeeConfig {
    fn ui_properties(&self) -> UiProperties {
        let fees = match self.compute_fee() {
            Ok(fees) => fees,
            Err(e) => return UiProperties::error(e),
        };
        if fees.is_empty() || self.disable_balance_check() {
            return UiProperties::ok();
        }
        // An invalid sender is reported by the sender config itself.
        if self.sender.ui_properties().error.is_some() {
            return UiProperties::ok();
        }

        let sender = self.sender.value();
        let spent = self.amount.amount();
        let checks = fees.iter().map(|fee| {
            let need = fee.amount().saturating_add(sum_denom(&spent, fee.denom()));
            check_balance(
                self.queries.as_ref(),
                self.chain.chain_id(),
                &sender,
                fee.denom(),
                need,
            )
        });
        balance_properties(checks.collect::<Vec<_>>(), ConfigError::InsufficientFee)
    }
}
