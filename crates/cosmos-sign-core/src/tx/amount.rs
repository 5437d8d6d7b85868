use std::rc::Rc;

use alloy::primitives::U256;

use crate::ports::{QueriesPort, QueryState};
use crate::tx::error::{ConfigError, LoadingState, TxConfig, UiProperties};
use crate::tx::fee::FeeConfig;
use crate::units::CoinPretty;

/// Source of the amount a transaction spends. The fee config reads it to
/// check total spend; the amount config reads the fee back through a weak link.
pub trait AmountConfig: TxConfig {
    fn amount(&self) -> Vec<CoinPretty>;

    fn set_fee_config(&self, fee: &Rc<FeeConfig>);

    fn set_disable_balance_check(&self, disable: bool);

    fn disable_balance_check(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BalanceCheck {
    Sufficient,
    Insufficient,
    Pending,
    Failed(String),
}

pub(crate) fn check_balance(
    queries: &dyn QueriesPort,
    chain_id: &str,
    address: &str,
    denom: &str,
    need: U256,
) -> BalanceCheck {
    match queries.balance(chain_id, address, denom) {
        QueryState::Loading => BalanceCheck::Pending,
        QueryState::Failed(e) => BalanceCheck::Failed(e),
        QueryState::Ready(balance) if balance < need => BalanceCheck::Insufficient,
        QueryState::Ready(_) => BalanceCheck::Sufficient,
    }
}

/// Folds per-denom checks: an insufficient balance beats a pending query,
/// which beats a failed one.
pub(crate) fn balance_properties(
    checks: impl IntoIterator<Item = BalanceCheck>,
    insufficient: ConfigError,
) -> UiProperties {
    let mut props = UiProperties::ok();
    for check in checks {
        match check {
            BalanceCheck::Sufficient => {}
            BalanceCheck::Insufficient => return UiProperties::error(insufficient),
            BalanceCheck::Pending => props.loading_state = LoadingState::LoadingBlock,
            BalanceCheck::Failed(e) => {
                if props.warning.is_none() {
                    props.warning = Some(ConfigError::BalanceQueryFailed(e));
                }
            }
        }
    }
    props
}
