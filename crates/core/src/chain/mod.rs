//! On-chain integration points.
//!
//! Token ids for residents and businesses are generated locally. Minting
//! those tokens is an optional external capability behind [`NftMinter`];
//! the platform works without one.

pub mod minter;
pub mod token;

pub use minter::{MintError, MintReceipt, NftMinter, validate_wallet_address};
pub use token::{TokenKind, generate_token_id};
