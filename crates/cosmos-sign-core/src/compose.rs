//! Builds the configuration graph for each transaction flow.
//!
//! Every object is constructed once, in dependency order. Back-references
//! (amount → fee, amount → sign doc helper) are weak and set after the
//! referenced object exists.

use std::rc::Rc;
use std::sync::Arc;

use tracing::debug;

use crate::ibc::{IbcAmountConfig, IbcChannelConfig, IbcRecipientConfig, RecipientOptions};
use crate::ports::{ChainInfoPort, QueriesPort};
use crate::tx::{
    validate_tx_configs, AmountConfig, FeeConfig, GasConfig, MemoConfig, SenderConfig,
    SignDocAmountConfig, SignDocHelper, TxChain, TxConfigsValidate,
};

/// Configs behind a request to sign an existing document.
pub struct SignTxConfigs {
    pub sender: Rc<SenderConfig>,
    pub gas: Rc<GasConfig>,
    pub amount: Rc<SignDocAmountConfig>,
    pub fee: Rc<FeeConfig>,
    pub memo: Rc<MemoConfig>,
    pub sign_doc_helper: Rc<SignDocHelper>,
}

impl SignTxConfigs {
    /// Gate over everything the user can see or edit.
    pub fn validate(&self) -> TxConfigsValidate {
        validate_tx_configs(&[
            &*self.sender,
            &*self.gas,
            &*self.amount,
            &*self.fee,
            &*self.memo,
        ])
    }
}

pub fn compose_sign_tx_configs(
    chains: Arc<dyn ChainInfoPort>,
    queries: Arc<dyn QueriesPort>,
    chain_id: &str,
    signer: &str,
) -> SignTxConfigs {
    let chain = TxChain::new(chains, chain_id);
    let sender = Rc::new(SenderConfig::new(chain.clone(), signer));
    // Gas comes from the document; a zero-gas document is still signable.
    let gas = Rc::new(GasConfig::zero_allowed(0));
    let amount = Rc::new(SignDocAmountConfig::new(
        chain.clone(),
        Arc::clone(&queries),
        Rc::clone(&sender),
    ));
    let fee = Rc::new(FeeConfig::new(
        chain,
        queries,
        Rc::clone(&sender),
        Rc::clone(&amount) as Rc<dyn AmountConfig>,
        Rc::clone(&gas),
    ));
    let memo = Rc::new(MemoConfig::new());
    let sign_doc_helper = Rc::new(SignDocHelper::new(Rc::clone(&fee), Rc::clone(&memo)));

    amount.set_sign_doc_helper(&sign_doc_helper);
    amount.set_fee_config(&fee);
    debug!(chain_id, "composed sign tx configs");

    SignTxConfigs {
        sender,
        gas,
        amount,
        fee,
        memo,
        sign_doc_helper,
    }
}

/// Configs behind a user-built IBC transfer.
pub struct IbcTransferConfigs {
    pub sender: Rc<SenderConfig>,
    pub amount: Rc<IbcAmountConfig>,
    pub memo: Rc<MemoConfig>,
    pub gas: Rc<GasConfig>,
    pub fee: Rc<FeeConfig>,
    pub channel: Rc<IbcChannelConfig>,
    pub recipient: Rc<IbcRecipientConfig>,
}

impl IbcTransferConfigs {
    pub fn validate(&self) -> TxConfigsValidate {
        validate_tx_configs(&[
            &*self.sender,
            &*self.amount,
            &*self.memo,
            &*self.gas,
            &*self.fee,
            &*self.channel,
            &*self.recipient,
        ])
    }
}

pub fn compose_ibc_transfer_configs(
    chains: Arc<dyn ChainInfoPort>,
    queries: Arc<dyn QueriesPort>,
    chain_id: &str,
    sender: &str,
    initial_gas: u64,
    options: RecipientOptions,
) -> IbcTransferConfigs {
    let chain = TxChain::new(chains, chain_id);
    let sender = Rc::new(SenderConfig::new(chain.clone(), sender));
    let amount = Rc::new(IbcAmountConfig::new(
        chain.clone(),
        Arc::clone(&queries),
        Rc::clone(&sender),
    ));
    let memo = Rc::new(MemoConfig::new());
    let gas = Rc::new(GasConfig::new(initial_gas));
    let fee = Rc::new(FeeConfig::new(
        chain.clone(),
        Arc::clone(&queries),
        Rc::clone(&sender),
        Rc::clone(&amount) as Rc<dyn AmountConfig>,
        Rc::clone(&gas),
    ));
    amount.set_fee_config(&fee);
    let channel = Rc::new(IbcChannelConfig::new());
    let recipient = Rc::new(IbcRecipientConfig::new(
        chain,
        queries,
        Rc::clone(&channel),
        options,
    ));
    debug!(chain_id, initial_gas, "composed ibc transfer configs");

    IbcTransferConfigs {
        sender,
        amount,
        memo,
        gas,
        fee,
        channel,
        recipient,
    }
}
