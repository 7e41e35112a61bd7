use alloy::primitives::{Address, U256};

/// Open leverage position as read from the vault contract.
///
/// Read-only input to the margin/leverage calculations in
/// [`crate::margin`]; all mutation happens on-chain, the client only
/// re-reads. USD fields (size, collateral, average price) use
/// [`crate::num::PRICE_DECIMALS`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    index_token: Address,
    is_long: bool,
    size: U256,
    collateral: U256,
    average_price: U256,
    entry_funding_rate: U256,
    last_increased_time: u64,
}

impl Position {
    pub fn new(
        index_token: Address,
        is_long: bool,
        size: U256,
        collateral: U256,
        average_price: U256,
        entry_funding_rate: U256,
        last_increased_time: u64,
    ) -> Self {
        Self {
            index_token,
            is_long,
            size,
            collateral,
            average_price,
            entry_funding_rate,
            last_increased_time,
        }
    }

    /// Index token the position tracks.
    pub fn index_token(&self) -> Address {
        self.index_token
    }

    /// Long or short side.
    pub fn is_long(&self) -> bool {
        self.is_long
    }

    /// Position size in USD.
    pub fn size(&self) -> U256 {
        self.size
    }

    /// Collateral locked in the position, in USD.
    pub fn collateral(&self) -> U256 {
        self.collateral
    }

    /// Average entry price.
    pub fn average_price(&self) -> U256 {
        self.average_price
    }

    /// Cumulative funding rate snapshot taken at the last increase.
    pub fn entry_funding_rate(&self) -> U256 {
        self.entry_funding_rate
    }

    /// Unix timestamp (in seconds) of the last size increase; anchors
    /// the minimum-profit grace window.
    pub fn last_increased_time(&self) -> u64 {
        self.last_increased_time
    }
}
