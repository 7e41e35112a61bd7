mod period;
mod token;

pub use period::ChartPeriod;
pub use token::Token;

/// Fee tiers of the vault contract, all in basis points.
///
/// One set per chain; the dynamic rebate/tax curve in [`crate::pool`]
/// modulates the base tiers per trade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeTiers {
    /// Base fee for token-to-token swaps.
    pub swap_fee_bps: u64,

    /// Base fee for swaps between two stablecoins.
    pub stable_swap_fee_bps: u64,

    /// Tax ceiling of the rebate/tax curve for non-stable tokens.
    pub tax_bps: u64,

    /// Tax ceiling of the rebate/tax curve for stablecoins.
    pub stable_tax_bps: u64,

    /// Fee on position size increases.
    pub margin_fee_bps: u64,

    /// Base fee for minting/burning the USDV accounting unit
    /// (pool deposits and redemptions).
    pub mint_burn_fee_bps: u64,
}

/// Minimum-profit grace window applied to freshly increased positions.
///
/// While `now < last_increase + time_secs`, a profit below `bps` basis
/// points of position size is reported as zero. A zero `time_secs`
/// disables the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MinProfit {
    pub time_secs: u64,
    pub bps: u64,
}
