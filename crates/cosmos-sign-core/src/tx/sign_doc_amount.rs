use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::Arc;

use tracing::debug;

use crate::ports::QueriesPort;
use crate::tx::amount::{balance_properties, check_balance, AmountConfig};
use crate::tx::chain::TxChain;
use crate::tx::error::{ConfigError, TxConfig, UiProperties};
use crate::tx::fee::FeeConfig;
use crate::tx::sender::SenderConfig;
use crate::tx::sign_doc_helper::SignDocHelper;
use crate::units::{add_coin, sum_denom, CoinPretty};

/// Amount spent by the signer, read from the messages of the loaded document.
pub struct SignDocAmountConfig {
    chain: TxChain,
    queries: Arc<dyn QueriesPort>,
    sender: Rc<SenderConfig>,
    fee: RefCell<Weak<FeeConfig>>,
    helper: RefCell<Weak<SignDocHelper>>,
    disable_balance_check: Cell<bool>,
}

impl SignDocAmountConfig {
    pub fn new(chain: TxChain, queries: Arc<dyn QueriesPort>, sender: Rc<SenderConfig>) -> Self {
        Self {
            chain,
            queries,
            sender,
            fee: RefCell::new(Weak::new()),
            helper: RefCell::new(Weak::new()),
            disable_balance_check: Cell::new(false),
        }
    }

    pub fn set_sign_doc_helper(&self, helper: &Rc<SignDocHelper>) {
        *self.helper.borrow_mut() = Rc::downgrade(helper);
    }
}

impl AmountConfig for SignDocAmountConfig {
    fn amount(&self) -> Vec<CoinPretty> {
        let Some(helper) = self.helper.borrow().upgrade() else {
            return Vec::new();
        };
        let Ok(info) = self.chain.chain_info() else {
            return Vec::new();
        };
        let sender = self.sender.value();
        let mut total = Vec::new();
        for msg in helper.msgs() {
            for coin in msg.spent_by(&sender) {
                match CoinPretty::from_coin(&info, &coin) {
                    Ok(coin) => add_coin(&mut total, coin),
                    Err(e) => debug!(denom = %coin.denom, error = %e, "skipping unparsable msg coin"),
                }
            }
        }
        total
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

impl TxConfig for SignDocAmountConfig {
    fn ui_properties(&self) -> UiProperties {
        if self.disable_balance_check() {
            return UiProperties::ok();
        }
        let amount = self.amount();
        if amount.is_empty() || self.sender.ui_properties().error.is_some() {
            return UiProperties::ok();
        }

        let fee = self
            .fee
            .borrow()
            .upgrade()
            .map(|f| f.fee())
            .unwrap_or_default();
        let sender = self.sender.value();
        let checks = amount
            .iter()
            .map(|coin| {
                let need = coin.amount().saturating_add(sum_denom(&fee, coin.denom()));
                check_balance(
                    self.queries.as_ref(),
                    self.chain.chain_id(),
                    &sender,
                    coin.denom(),
                    need,
                )
            })
            .collect::<Vec<_>>();
        balance_properties(checks, ConfigError::InsufficientAmount)
    }
}
