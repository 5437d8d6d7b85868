use std::cell::RefCell;

use crate::tx::error::{ConfigError, TxConfig, UiProperties};

pub const MAX_MEMO_LENGTH: usize = 256;

#[derive(Debug)]
pub struct MemoConfig {
    value: RefCell<String>,
    max_length: usize,
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoConfig {
    pub fn new() -> Self {
        Self::with_max_length(MAX_MEMO_LENGTH)
    }

    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            value: RefCell::new(String::new()),
            max_length,
        }
    }

    /// Memo as displayed to the user, never escaped.
    pub fn value(&self) -> String {
        self.value.borrow().clone()
    }

    pub fn set_value(&self, memo: impl Into<String>) {
        *self.value.borrow_mut() = memo.into();
    }
}

impl TxConfig for MemoConfig {
    fn ui_properties(&self) -> UiProperties {
        if self.value.borrow().chars().count() > self.max_length {
            return UiProperties::error(ConfigError::MemoTooLong(self.max_length));
        }
        UiProperties::ok()
    }
}
