use std::fmt;
use std::sync::Arc;

use crate::domain::ChainInfo;
use crate::ports::ChainInfoPort;
use crate::tx::error::ConfigError;

/// Chain id bound to the registry it resolves against.
#[derive(Clone)]
pub struct TxChain {
    chain_id: String,
    chains: Arc<dyn ChainInfoPort>,
}

impl TxChain {
    pub fn new(chains: Arc<dyn ChainInfoPort>, chain_id: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            chains,
        }
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn chain_info(&self) -> Result<Arc<ChainInfo>, ConfigError> {
        self.chains
            .chain_info(&self.chain_id)
            .map_err(|e| ConfigError::ChainInfo(e.to_string()))
    }

    /// Same registry, different chain.
    pub fn with_chain_id(&self, chain_id: impl Into<String>) -> Self {
        Self::new(Arc::clone(&self.chains), chain_id)
    }
}

impl fmt::Debug for TxChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TxChain")
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}
