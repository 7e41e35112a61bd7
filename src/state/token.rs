use alloy::primitives::{Address, U256};

use crate::num::{self, BASIS_POINTS_DIVISOR};

/// Per-token snapshot of the vault pool.
///
/// Raw values arrive from the chain-reading collaborator in the fixed
/// positional layout decoded by [`super::PoolSnapshot::decode`]; derived
/// views are computed on demand from the immutable raw fields, never
/// written back.
///
/// Units: token-denominated fields use the token's native decimals, the
/// USDV fields use [`crate::num::USDV_DECIMALS`], all USD fields and
/// prices use [`crate::num::PRICE_DECIMALS`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenPoolState {
    token: Address,
    decimals: u8,
    is_stable: bool,

    pool_amount: U256,
    reserved_amount: U256,
    usdv_amount: U256,
    redemption_amount: U256,
    weight: U256,
    buffer_amount: U256,
    max_usdv_amount: U256,
    global_short_size: U256,
    max_global_short_size: U256,
    max_global_long_size: U256,
    min_price: U256,
    max_price: U256,
    guaranteed_usd: U256,
    max_primary_price: U256,
    min_primary_price: U256,
}

impl TokenPoolState {
    pub(crate) fn new(token: Address, decimals: u8, is_stable: bool, values: &[U256]) -> Self {
        Self {
            token,
            decimals,
            is_stable,
            pool_amount: values[0],
            reserved_amount: values[1],
            usdv_amount: values[2],
            redemption_amount: values[3],
            weight: values[4],
            buffer_amount: values[5],
            max_usdv_amount: values[6],
            global_short_size: values[7],
            max_global_short_size: values[8],
            max_global_long_size: values[9],
            min_price: values[10],
            max_price: values[11],
            guaranteed_usd: values[12],
            max_primary_price: values[13],
            min_primary_price: values[14],
        }
    }

    /// Token contract address.
    pub fn token(&self) -> Address {
        self.token
    }

    /// Native decimal exponent of token amounts.
    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Whether the token is a USD-pegged stablecoin.
    pub fn is_stable(&self) -> bool {
        self.is_stable
    }

    /// Tokens held by the pool.
    pub fn pool_amount(&self) -> U256 {
        self.pool_amount
    }

    /// Tokens reserved to back open leverage positions.
    pub fn reserved_amount(&self) -> U256 {
        self.reserved_amount
    }

    /// USDV debt recorded against this token.
    pub fn usdv_amount(&self) -> U256 {
        self.usdv_amount
    }

    /// Tokens redeemable against the recorded USDV debt.
    pub fn redemption_amount(&self) -> U256 {
        self.redemption_amount
    }

    /// Configured target weight of the token in the pool.
    pub fn weight(&self) -> U256 {
        self.weight
    }

    /// Pool amount floor kept out of swaps.
    pub fn buffer_amount(&self) -> U256 {
        self.buffer_amount
    }

    /// Cap on the USDV debt this token may accumulate.
    pub fn max_usdv_amount(&self) -> U256 {
        self.max_usdv_amount
    }

    /// Aggregate size of open shorts with this index token.
    pub fn global_short_size(&self) -> U256 {
        self.global_short_size
    }

    /// Cap on aggregate short size; zero means uncapped.
    pub fn max_global_short_size(&self) -> U256 {
        self.max_global_short_size
    }

    /// Cap on aggregate long size; zero means uncapped.
    pub fn max_global_long_size(&self) -> U256 {
        self.max_global_long_size
    }

    /// Lower bound of the current oracle price.
    pub fn min_price(&self) -> U256 {
        self.min_price
    }

    /// Upper bound of the current oracle price.
    pub fn max_price(&self) -> U256 {
        self.max_price
    }

    /// USD value guaranteed by open long positions.
    pub fn guaranteed_usd(&self) -> U256 {
        self.guaranteed_usd
    }

    /// Upper bound of the primary (unadjusted) oracle price.
    pub fn max_primary_price(&self) -> U256 {
        self.max_primary_price
    }

    /// Lower bound of the primary (unadjusted) oracle price.
    pub fn min_primary_price(&self) -> U256 {
        self.min_primary_price
    }

    /// Tokens available for new reservations.
    pub fn available_amount(&self) -> U256 {
        self.pool_amount.saturating_sub(self.reserved_amount)
    }

    /// USD value available for new reservations, at the minimum price.
    ///
    /// Stablecoins count the whole pool amount: their reserves back
    /// shorts and stay redeemable at par.
    pub fn available_usd(&self) -> U256 {
        let amount = if self.is_stable {
            self.pool_amount
        } else {
            self.available_amount()
        };
        amount * self.min_price / num::pow10(self.decimals)
    }

    /// Total USD value managed for this token, including the portion
    /// guaranteed by open longs.
    pub fn managed_usd(&self) -> U256 {
        if self.is_stable {
            self.available_usd()
        } else {
            self.available_usd() + self.guaranteed_usd
        }
    }

    /// Managed value expressed in token amounts; absent without a price.
    pub fn managed_amount(&self) -> Option<U256> {
        if self.min_price.is_zero() {
            return None;
        }
        Some(self.managed_usd() * num::pow10(self.decimals) / self.min_price)
    }

    /// USD headroom left for new longs under the global cap.
    pub fn max_available_long(&self) -> U256 {
        if self.max_global_long_size.is_zero() {
            return self.available_usd();
        }
        self.max_global_long_size.saturating_sub(self.guaranteed_usd)
    }

    /// Total long capacity: the global cap when it binds, otherwise the
    /// pool-backed value.
    pub fn max_long_capacity(&self) -> U256 {
        let pool_capacity = self.available_usd() + self.guaranteed_usd;
        if !self.max_global_long_size.is_zero() && self.max_global_long_size < pool_capacity {
            self.max_global_long_size
        } else {
            pool_capacity
        }
    }

    /// USD headroom left for new shorts under the global cap.
    pub fn max_available_short(&self) -> U256 {
        self.max_global_short_size
            .saturating_sub(self.global_short_size)
    }

    /// Whether the bid/ask spread exceeds the configured deviation
    /// threshold, in which case the UI flags the price as unreliable.
    pub fn has_excessive_spread(&self, max_deviation_bps: u64) -> bool {
        if self.max_price.is_zero() {
            return false;
        }
        let spread = self.max_price.saturating_sub(self.min_price);
        spread * U256::from(BASIS_POINTS_DIVISOR) / self.max_price > U256::from(max_deviation_bps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{PoolTokenBuilder, usd};

    #[test]
    fn test_available_amount() {
        let state = PoolTokenBuilder::new()
            .pool_amount(U256::from(1000u64))
            .reserved_amount(U256::from(300u64))
            .build();
        assert_eq!(state.available_amount(), U256::from(700u64));

        // Mid-update snapshot with reserved > pool saturates instead of wrapping
        let state = PoolTokenBuilder::new()
            .pool_amount(U256::from(100u64))
            .reserved_amount(U256::from(300u64))
            .build();
        assert_eq!(state.available_amount(), U256::ZERO);
    }

    #[test]
    fn test_available_usd() {
        // 10 tokens free at $3000, 18 decimals
        let state = PoolTokenBuilder::new()
            .decimals(18)
            .pool_amount(U256::from(12u64) * num::pow10(18))
            .reserved_amount(U256::from(2u64) * num::pow10(18))
            .min_price(usd(3000))
            .build();
        assert_eq!(state.available_usd(), usd(30_000));

        // Stablecoin counts the full pool amount
        let state = PoolTokenBuilder::new()
            .decimals(6)
            .stable()
            .pool_amount(U256::from(500u64) * num::pow10(6))
            .reserved_amount(U256::from(100u64) * num::pow10(6))
            .min_price(usd(1))
            .build();
        assert_eq!(state.available_usd(), usd(500));
    }

    #[test]
    fn test_managed_amount_requires_price() {
        let state = PoolTokenBuilder::new().min_price(U256::ZERO).build();
        assert_eq!(state.managed_amount(), None);
    }

    #[test]
    fn test_long_capacity() {
        let state = PoolTokenBuilder::new()
            .decimals(18)
            .pool_amount(U256::from(10u64) * num::pow10(18))
            .min_price(usd(100))
            .guaranteed_usd(usd(400))
            .max_global_long_size(usd(900))
            .build();
        // available = 1000, capacity = min(900, 1000 + 400)
        assert_eq!(state.max_available_long(), usd(500));
        assert_eq!(state.max_long_capacity(), usd(900));

        let uncapped = PoolTokenBuilder::new()
            .decimals(18)
            .pool_amount(U256::from(10u64) * num::pow10(18))
            .min_price(usd(100))
            .guaranteed_usd(usd(400))
            .build();
        assert_eq!(uncapped.max_available_long(), usd(1000));
        assert_eq!(uncapped.max_long_capacity(), usd(1400));
    }

    #[test]
    fn test_short_headroom() {
        let state = PoolTokenBuilder::new()
            .global_short_size(usd(700))
            .max_global_short_size(usd(1000))
            .build();
        assert_eq!(state.max_available_short(), usd(300));
    }

    #[test]
    fn test_excessive_spread() {
        let state = PoolTokenBuilder::new()
            .min_price(usd(990))
            .max_price(usd(1000))
            .build();
        // 1% spread
        assert!(state.has_excessive_spread(50));
        assert!(!state.has_excessive_spread(100));
        assert!(!PoolTokenBuilder::new().build().has_excessive_spread(0));
    }
}
