//! Vault state snapshots.
//!
//! The chain-reading collaborator polls the vault reader contract and hands
//! over one flat array of scaled integers per poll: [`VAULT_PROPS_PER_TOKEN`]
//! values for every whitelisted token, in whitelist order, plus the vault
//! totals (USDV supply, total token weights) read alongside.
//! [`PoolSnapshot::decode`] validates the stride and produces typed
//! [`TokenPoolState`] entries; everything downstream ([`crate::pool`],
//! [`crate::swap`], [`crate::margin`]) computes from the snapshot without
//! mutating it.

mod position;
mod token;

use std::collections::HashMap;

use alloy::primitives::{Address, U256};
use tracing::debug;

use crate::{error::VaultError, types::Token};

// Public re-exports
pub use position::*;
pub use token::*;

/// Number of values the reader contract returns per whitelisted token:
/// pool amount, reserved amount, USDV amount, redemption amount, weight,
/// buffer amount, max USDV amount, global short size, max global short
/// size, max global long size, min price, max price, guaranteed USD,
/// max primary price, min primary price.
pub const VAULT_PROPS_PER_TOKEN: usize = 15;

/// Decoded snapshot of the vault pool across all whitelisted tokens.
#[derive(Clone, Debug, PartialEq)]
pub struct PoolSnapshot {
    usdv_supply: U256,
    total_token_weights: U256,
    states: HashMap<Address, TokenPoolState>,
}

impl PoolSnapshot {
    /// Decodes the flat positional array produced by the vault reader.
    ///
    /// `values` must hold exactly [`VAULT_PROPS_PER_TOKEN`] entries per
    /// token in `tokens`, in whitelist order. The vault totals are read
    /// in the same call and passed through unchanged.
    pub fn decode(
        tokens: &[Token],
        values: &[U256],
        usdv_supply: U256,
        total_token_weights: U256,
    ) -> Result<Self, VaultError> {
        let expected = tokens.len() * VAULT_PROPS_PER_TOKEN;
        if values.len() != expected {
            return Err(VaultError::SnapshotLength {
                tokens: tokens.len(),
                expected,
                actual: values.len(),
            });
        }

        let mut states = HashMap::with_capacity(tokens.len());
        for (token, chunk) in tokens.iter().zip(values.chunks(VAULT_PROPS_PER_TOKEN)) {
            let state = TokenPoolState::new(token.address, token.decimals, token.is_stable, chunk);
            if states.insert(token.address, state).is_some() {
                return Err(VaultError::DuplicateToken(token.address));
            }
        }

        debug!(
            tokens = tokens.len(),
            %usdv_supply,
            "decoded pool snapshot"
        );

        Ok(Self {
            usdv_supply,
            total_token_weights,
            states,
        })
    }

    /// Total USDV supply at snapshot time.
    pub fn usdv_supply(&self) -> U256 {
        self.usdv_supply
    }

    /// Sum of configured token weights at snapshot time.
    pub fn total_token_weights(&self) -> U256 {
        self.total_token_weights
    }

    /// State of a single token, if whitelisted.
    pub fn state(&self, token: Address) -> Option<&TokenPoolState> {
        self.states.get(&token)
    }

    /// All decoded token states.
    pub fn states(&self) -> &HashMap<Address, TokenPoolState> {
        &self.states
    }
}
