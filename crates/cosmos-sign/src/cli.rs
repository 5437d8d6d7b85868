use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use cosmos_sign_adapters::SignAdapterConfig;
use cosmos_sign_core::tx::FeeType;

/// Review pending Cosmos signing requests and approve or reject them.
#[derive(Debug, Parser)]
#[command(name = "cosmos-sign", version)]
pub struct Cli {
    /// Chain registry JSON (a list of chain infos)
    #[arg(long, value_name = "FILE", env = "COSMOS_SIGN_CHAIN_REGISTRY")]
    pub chains: Option<PathBuf>,

    /// Pending sign requests JSON, served in file order
    #[arg(long, value_name = "FILE")]
    pub requests: PathBuf,

    /// Known balances JSON: `[{"chainId", "address", "denom", "amount"}]`
    #[arg(long, value_name = "FILE", conflicts_with = "lcd")]
    pub balances: Option<PathBuf>,

    /// Fetch signer balances from each chain's LCD endpoint
    #[arg(long)]
    pub lcd: bool,

    /// LCD request timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub lcd_timeout_ms: Option<u64>,

    /// Print the sign document as JSON instead of message summaries
    #[arg(long)]
    pub raw: bool,

    /// Replace the memo of every request
    #[arg(long)]
    pub memo: Option<String>,

    /// Recompute the fee from the chain's gas price step
    #[arg(long, value_enum)]
    pub fee_type: Option<FeeTier>,

    /// Override the gas limit
    #[arg(long)]
    pub gas: Option<u64>,

    /// Reject every request instead of approving
    #[arg(long)]
    pub reject: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FeeTier {
    Low,
    Average,
    High,
}

impl From<FeeTier> for FeeType {
    fn from(tier: FeeTier) -> Self {
        match tier {
            FeeTier::Low => FeeType::Low,
            FeeTier::Average => FeeType::Average,
            FeeTier::High => FeeType::High,
        }
    }
}

impl Cli {
    /// Environment configuration with command-line overrides applied.
    pub fn adapter_config(&self) -> SignAdapterConfig {
        let mut cfg = SignAdapterConfig::from_env();
        if let Some(path) = &self.chains {
            cfg.chain_registry_path = Some(path.clone());
        }
        if let Some(ms) = self.lcd_timeout_ms {
            cfg.lcd_timeout_ms = ms;
        }
        cfg
    }
}
