//! NFT minting capability.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Errors reported by a minting backend.
#[derive(Debug, Error)]
pub enum MintError {
    /// The destination is not a `0x`-prefixed 20-byte hex address.
    #[error("Invalid wallet address: {0}")]
    InvalidAddress(String),

    /// The backend could not be reached.
    #[error("Minting backend unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the mint.
    #[error("Mint rejected: {0}")]
    Rejected(String),
}

/// Proof that a mint was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintReceipt {
    /// Transaction hash returned by the chain.
    pub tx_hash: String,
}

/// Mints a platform token to an external wallet.
#[async_trait]
pub trait NftMinter: Send + Sync {
    /// Mints `token_id` to `to_address`.
    async fn mint(&self, to_address: &str, token_id: &str) -> Result<MintReceipt, MintError>;
}

/// Checks that `address` looks like an EVM account: `0x` plus 40 hex digits.
pub fn validate_wallet_address(address: &str) -> Result<(), MintError> {
    let valid = address
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()));

    if valid {
        Ok(())
    } else {
        Err(MintError::InvalidAddress(address.to_string()))
    }
}
