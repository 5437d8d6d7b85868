use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use cosmos_sign_core::{ChainInfo, ChainInfoPort, PortError};

/// Chain metadata keyed by chain identifier.
///
/// Lookups go through the identifier, so `cosmoshub-4` also resolves a
/// registry entry stored as `cosmoshub-3`: a trailing `-<number>` is a
/// revision of the same chain.
#[derive(Debug, Clone, Default)]
pub struct ChainRegistryAdapter {
    chains: HashMap<String, Arc<ChainInfo>>,
}

impl ChainRegistryAdapter {
    pub fn from_chain_infos(infos: impl IntoIterator<Item = ChainInfo>) -> Self {
        let chains = infos
            .into_iter()
            .map(|info| (chain_identifier(&info.chain_id).to_owned(), Arc::new(info)))
            .collect();
        Self { chains }
    }

    /// Parses a JSON array of chain infos.
    pub fn from_json_str(raw: &str) -> Result<Self, PortError> {
        let infos: Vec<ChainInfo> = serde_json::from_str(raw)
            .map_err(|e| PortError::Validation(format!("invalid chain registry: {e}")))?;
        debug!(chains = infos.len(), "loaded chain registry");
        Ok(Self::from_chain_infos(infos))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, PortError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PortError::Transport(format!("read chain registry {}: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn chain_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.chains.values().map(|c| c.chain_id.clone()).collect();
        ids.sort();
        ids
    }
}

impl ChainInfoPort for ChainRegistryAdapter {
    fn chain_info(&self, chain_id: &str) -> Result<Arc<ChainInfo>, PortError> {
        self.chains
            .get(chain_identifier(chain_id))
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("chain {chain_id}")))
    }
}

/// `osmosis-1` → `osmosis`; ids without a numeric revision are kept whole.
pub fn chain_identifier(chain_id: &str) -> &str {
    match chain_id.rsplit_once('-') {
        Some((name, revision))
            if !name.is_empty()
                && !revision.is_empty()
                && revision.chars().all(|c| c.is_ascii_digit()) =>
        {
            name
        }
        _ => chain_id,
    }
}
