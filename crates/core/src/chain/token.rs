//! Locally generated token identifiers.

use chrono::Utc;
use rand::Rng;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// What a token represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identity token assigned to every registered user.
    Resident,
    /// Token assigned to a registered business.
    Business,
}

impl TokenKind {
    /// Prefix of ids of this kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Resident => "nft",
            Self::Business => "biz_nft",
        }
    }
}

/// Generates `<prefix>_<unix millis>_<9 base36 chars>`.
#[must_use]
pub fn generate_token_id(kind: TokenKind) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect();

    format!("{}_{}_{suffix}", kind.prefix(), Utc::now().timestamp_millis())
}
