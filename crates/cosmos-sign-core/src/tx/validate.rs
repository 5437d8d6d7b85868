use crate::tx::error::{ConfigError, TxConfig};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxConfigsValidate {
    pub interaction_blocked: bool,
    pub first_error: Option<ConfigError>,
}

/// Combines every config's state into the single approve gate.
pub fn validate_tx_configs(configs: &[&dyn TxConfig]) -> TxConfigsValidate {
    let mut result = TxConfigsValidate::default();
    for config in configs {
        let props = config.ui_properties();
        if props.is_blocking() {
            result.interaction_blocked = true;
        }
        if result.first_error.is_none() {
            result.first_error = props.error;
        }
    }
    result
}
