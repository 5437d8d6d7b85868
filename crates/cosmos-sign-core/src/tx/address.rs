use alloy::primitives::Address;
use bech32::{Bech32, Hrp};

use crate::tx::error::ConfigError;

/// Checks `address` is valid bech32 with human-readable part `prefix`.
pub fn validate_bech32_address(address: &str, prefix: &str) -> Result<(), ConfigError> {
    let (hrp, _) = bech32::decode(address)
        .map_err(|e| ConfigError::InvalidBech32Address(format!("{address}: {e}")))?;
    if !hrp.as_str().eq_ignore_ascii_case(prefix) {
        return Err(ConfigError::InvalidBech32Address(format!(
            "{address}: expected prefix {prefix}, got {}",
            hrp.as_str()
        )));
    }
    Ok(())
}

/// Converts a `0x`-prefixed 20-byte hex address into bech32 under `prefix`.
pub fn hex_to_bech32(address: &str, prefix: &str) -> Result<String, ConfigError> {
    if !address.starts_with("0x") {
        return Err(ConfigError::InvalidHexAddress(address.to_owned()));
    }
    let parsed: Address = address
        .parse()
        .map_err(|e| ConfigError::InvalidHexAddress(format!("{address}: {e}")))?;
    let hrp = Hrp::parse(prefix)
        .map_err(|e| ConfigError::InvalidBech32Address(format!("bad prefix {prefix}: {e}")))?;
    bech32::encode::<Bech32>(hrp, parsed.as_slice())
        .map_err(|e| ConfigError::InvalidHexAddress(format!("{address}: {e}")))
}
