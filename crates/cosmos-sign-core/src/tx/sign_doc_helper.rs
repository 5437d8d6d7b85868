use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::domain::{SignDocMsg, SignDocWrapper, SignMode};
use crate::escape::{escape_html, unescape_html};
use crate::tx::fee::FeeConfig;
use crate::tx::memo::MemoConfig;

/// Holds the requested sign document and merges the edited fee and memo into it.
pub struct SignDocHelper {
    fee: Rc<FeeConfig>,
    memo: Rc<MemoConfig>,
    sign_doc: RefCell<Option<SignDocWrapper>>,
}

impl SignDocHelper {
    pub fn new(fee: Rc<FeeConfig>, memo: Rc<MemoConfig>) -> Self {
        Self {
            fee,
            memo,
            sign_doc: RefCell::new(None),
        }
    }

    pub fn set_sign_doc_wrapper(&self, sign_doc: SignDocWrapper) {
        *self.sign_doc.borrow_mut() = Some(sign_doc);
    }

    pub fn is_loaded(&self) -> bool {
        self.sign_doc.borrow().is_some()
    }

    /// The document as requested, before any edit.
    pub fn original(&self) -> Option<SignDocWrapper> {
        self.sign_doc.borrow().clone()
    }

    pub fn msgs(&self) -> Vec<SignDocMsg> {
        self.sign_doc
            .borrow()
            .as_ref()
            .map(SignDocWrapper::msgs)
            .unwrap_or_default()
    }

    /// The document that will be signed: requested messages with the current
    /// fee, gas and memo.
    pub fn sign_doc_wrapper(&self) -> Option<SignDocWrapper> {
        let original = self.original()?;
        let std_fee = self.fee.to_std_fee();
        let memo = self.memo.value();
        let memo = match original.mode() {
            SignMode::Amino => {
                // An untouched memo goes back byte-for-byte, even when the
                // requester did not escape it.
                if unescape_html(original.memo()) == memo {
                    original.memo().to_owned()
                } else {
                    escape_html(&memo)
                }
            }
            SignMode::Direct => memo,
        };
        Some(original.with_fee_and_memo(std_fee.amount, std_fee.gas, memo))
    }

    pub fn sign_doc_json(&self) -> Option<Value> {
        self.sign_doc_wrapper()
            .and_then(|doc| serde_json::to_value(doc).ok())
    }
}
