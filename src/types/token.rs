//! Token reference data.

use alloy::primitives::Address;

/// Immutable reference data of a vault-whitelisted token.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Token {
    /// On-chain token contract address.
    pub address: Address,

    /// Display symbol.
    pub symbol: String,

    /// Native decimal exponent of token amounts.
    pub decimals: u8,

    /// USD-pegged stablecoin; swaps between two stables use the
    /// stable fee tier.
    pub is_stable: bool,

    /// Wrapped form of the chain's gas token.
    pub is_wrapped: bool,

    /// The unwrapped gas token itself.
    pub is_native: bool,

    /// Eligible as an index token for short positions.
    pub is_shortable: bool,
}

impl Token {
    /// Plain ERC-20 entry with all flags off.
    pub fn erc20(address: Address, symbol: &str, decimals: u8) -> Self {
        Self {
            address,
            symbol: symbol.to_string(),
            decimals,
            is_stable: false,
            is_wrapped: false,
            is_native: false,
            is_shortable: false,
        }
    }

    pub fn stable(mut self) -> Self {
        self.is_stable = true;
        self
    }

    pub fn wrapped(mut self) -> Self {
        self.is_wrapped = true;
        self
    }

    pub fn native(mut self) -> Self {
        self.is_native = true;
        self
    }

    pub fn shortable(mut self) -> Self {
        self.is_shortable = true;
        self
    }
}
