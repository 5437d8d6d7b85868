use std::cell::RefCell;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::compose::{compose_sign_tx_configs, SignTxConfigs};
use crate::domain::{ChainInfo, InteractionId, InteractionRequest, SignMode};
use crate::escape::unescape_html;
use crate::messages::{summarize, MessageSummary};
use crate::ports::{ChainInfoPort, InteractionContextPort, InteractionQueuePort, PortError, QueriesPort};
use crate::tx::{AmountConfig, ConfigError, FeeType, TxConfigsValidate};
use crate::units::{parse_int, CoinPretty};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApproveBlock {
    #[error("no sign document is loaded")]
    NoSignDoc,
    #[error("the request was already resolved")]
    Stale,
    #[error("a configuration is invalid or still loading")]
    Blocked,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("chain id mismatch: request {request}, sign doc {sign_doc}")]
    ChainIdMismatch { request: String, sign_doc: String },
    #[error("approve disabled: {0}")]
    ApproveDisabled(ApproveBlock),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Port(#[from] PortError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproveOutcome {
    /// Another request followed this one in the queue.
    pub proceed_next: bool,
    pub window_closed: bool,
}

/// Remembers which request was last hydrated so hydration runs once per
/// request, however often the session is re-evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HydrationGuard {
    key: Option<InteractionId>,
    runs: u32,
}

impl HydrationGuard {
    /// True when `key` has not been hydrated yet; records it.
    pub fn enter(&mut self, key: InteractionId) -> bool {
        if self.key == Some(key) {
            return false;
        }
        self.key = Some(key);
        self.runs += 1;
        true
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }
}

/// One signing request, from load to approve or reject.
///
/// A session is never reused across requests; the orchestrator opens a new
/// one for every request the queue hands out.
pub struct SignTxSession {
    request: Arc<InteractionRequest>,
    chain: Option<Arc<ChainInfo>>,
    configs: SignTxConfigs,
    guard: RefCell<HydrationGuard>,
}

impl SignTxSession {
    pub fn open(
        request: Arc<InteractionRequest>,
        chains: Arc<dyn ChainInfoPort>,
        queries: Arc<dyn QueriesPort>,
    ) -> Result<Self, SessionError> {
        let data = &request.data;
        if data.chain_id != data.sign_doc.chain_id() {
            warn!(
                id = %request.id,
                request = %data.chain_id,
                sign_doc = %data.sign_doc.chain_id(),
                "chain id mismatch"
            );
            return Err(SessionError::ChainIdMismatch {
                request: data.chain_id.clone(),
                sign_doc: data.sign_doc.chain_id().to_owned(),
            });
        }

        let chain = chains.chain_info(&data.chain_id).ok();
        let configs =
            compose_sign_tx_configs(chains, queries, &data.chain_id, &data.signer);
        let session = Self {
            request,
            chain,
            configs,
            guard: RefCell::new(HydrationGuard::default()),
        };
        session.hydrate()?;
        Ok(session)
    }

    /// Re-evaluation hook; hydration does not repeat for the same request.
    pub fn refresh(&self) -> Result<(), SessionError> {
        self.hydrate()
    }

    fn hydrate(&self) -> Result<(), SessionError> {
        if !self.guard.borrow_mut().enter(self.request.id) {
            debug!(id = %self.request.id, "already hydrated");
            return Ok(());
        }

        let data = &self.request.data;
        let doc = &data.sign_doc;
        let configs = &self.configs;

        configs.sign_doc_helper.set_sign_doc_wrapper(doc.clone());
        configs.gas.set_value_str(doc.gas());
        // Amino memos arrive HTML-escaped; show them plain.
        let memo = match doc.mode() {
            SignMode::Amino => unescape_html(doc.memo()),
            SignMode::Direct => doc.memo().to_owned(),
        };
        configs.memo.set_value(memo);

        let fees = doc.fees();
        if self.prefer_no_set_fee() {
            if !fees.is_empty() {
                let info = self.chain_info()?;
                let fixed = fees
                    .iter()
                    .map(|coin| {
                        let amount = parse_int(&coin.amount).map_err(ConfigError::from)?;
                        Ok(CoinPretty::new(info.force_find_currency(&coin.denom), amount))
                    })
                    .collect::<Result<Vec<_>, ConfigError>>()?;
                configs.fee.set_fee(fixed);
            }
        } else {
            configs.fee.set_fee_type(FeeType::Average);
        }

        let disable = data.sign_options.disable_balance_check;
        configs.amount.set_disable_balance_check(disable);
        configs.fee.set_disable_balance_check(disable);

        debug!(
            id = %self.request.id,
            mode = ?doc.mode(),
            fees = fees.len(),
            prefer_no_set_fee = self.prefer_no_set_fee(),
            "hydrated sign session"
        );
        Ok(())
    }

    fn chain_info(&self) -> Result<Arc<ChainInfo>, ConfigError> {
        self.chain
            .clone()
            .ok_or_else(|| ConfigError::ChainInfo(self.request.data.chain_id.clone()))
    }

    pub fn hydration_runs(&self) -> u32 {
        self.guard.borrow().runs()
    }

    /// Automatic fee suggestion is off when the requester asks for it, or
    /// when the document carries several fee coins.
    pub fn prefer_no_set_fee(&self) -> bool {
        let data = &self.request.data;
        data.sign_doc.fees().len() >= 2 || data.sign_options.prefer_no_set_fee
    }

    pub fn request(&self) -> &Arc<InteractionRequest> {
        &self.request
    }

    pub fn id(&self) -> InteractionId {
        self.request.id
    }

    pub fn configs(&self) -> &SignTxConfigs {
        &self.configs
    }

    pub fn validation(&self) -> TxConfigsValidate {
        self.configs.validate()
    }

    /// Why approving is not possible right now, if it is not.
    pub fn approve_block(&self, queue: &dyn InteractionQueuePort) -> Option<ApproveBlock> {
        if !self.configs.sign_doc_helper.is_loaded() {
            return Some(ApproveBlock::NoSignDoc);
        }
        if queue.is_stale(self.request.id) {
            return Some(ApproveBlock::Stale);
        }
        if self.validation().interaction_blocked {
            return Some(ApproveBlock::Blocked);
        }
        None
    }

    pub fn approve(
        &self,
        queue: &dyn InteractionQueuePort,
        context: &dyn InteractionContextPort,
    ) -> Result<ApproveOutcome, SessionError> {
        if let Some(block) = self.approve_block(queue) {
            warn!(id = %self.request.id, %block, "approve refused");
            return Err(SessionError::ApproveDisabled(block));
        }
        let signed = self
            .configs
            .sign_doc_helper
            .sign_doc_wrapper()
            .ok_or(SessionError::ApproveDisabled(ApproveBlock::NoSignDoc))?;

        let mut proceed_next = false;
        queue.approve_with_proceed_next(self.request.id, signed, &mut |next: bool| {
            proceed_next = next
        })?;
        let window_closed = close_if_last(context, proceed_next);
        info!(id = %self.request.id, proceed_next, window_closed, "approved");
        Ok(ApproveOutcome {
            proceed_next,
            window_closed,
        })
    }

    pub fn reject(
        &self,
        queue: &dyn InteractionQueuePort,
        context: &dyn InteractionContextPort,
    ) -> Result<ApproveOutcome, SessionError> {
        let mut proceed_next = false;
        queue.reject_with_proceed_next(self.request.id, &mut |next: bool| proceed_next = next)?;
        let window_closed = close_if_last(context, proceed_next);
        info!(id = %self.request.id, proceed_next, window_closed, "rejected");
        Ok(ApproveOutcome {
            proceed_next,
            window_closed,
        })
    }

    /// Summaries of the requested messages, in document order.
    pub fn messages(&self) -> Vec<MessageSummary> {
        self.configs
            .sign_doc_helper
            .msgs()
            .iter()
            .map(|msg| summarize(msg, self.chain.as_deref()))
            .collect()
    }

    /// The document that approving would sign, as JSON.
    pub fn sign_doc_json(&self) -> Option<Value> {
        self.configs.sign_doc_helper.sign_doc_json()
    }
}

fn close_if_last(context: &dyn InteractionContextPort, proceed_next: bool) -> bool {
    let info = context.info();
    if !proceed_next && info.interaction && !info.interaction_internal {
        context.close_window();
        return true;
    }
    false
}
