//! Errors produced while decoding collaborator-supplied data.
//!
//! The numeric core itself does not error: computations whose preconditions
//! are not met (zero divisors, missing prices) return `None` and callers
//! treat the absence as "not displayable". [`VaultError`] covers the
//! remaining boundary, where raw values handed over by the chain-reading
//! collaborator fail structural validation. Static-configuration misuse
//! (unknown chain id, unknown token symbol) is a programmer error and
//! panics instead.

use alloy::primitives::Address;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VaultError {
    /// The flat pool-state array does not match the whitelist stride.
    #[error(
        "pool snapshot length mismatch: expected {expected} values for {tokens} tokens, got {actual}"
    )]
    SnapshotLength {
        tokens: usize,
        expected: usize,
        actual: usize,
    },

    /// The same token appeared twice in a pool snapshot whitelist.
    #[error("duplicate token in pool snapshot whitelist: {0}")]
    DuplicateToken(Address),

    /// A chart period string outside the supported table.
    #[error("unknown chart period: {0}")]
    UnknownPeriod(String),
}
