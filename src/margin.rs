//! Margin, leverage and liquidation calculations.
//!
//! Stateless and side-effect free, operating on fixed-point USD values
//! ([`crate::num::PRICE_DECIMALS`]) exactly as the vault contract does.
//! Every function returns `None` when its inputs make the computation
//! meaningless — zero sizes, collateral consumed by fees, missing
//! funding-rate data. Callers treat the absence as "not displayable",
//! never as zero.

use alloy::primitives::U256;

use crate::{
    Chain,
    num::{BASIS_POINTS_DIVISOR, FUNDING_RATE_PRECISION},
    state::Position,
};

/// Unrealized PnL of a position at a given mark price.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionDelta {
    /// Whether the mark price is on the profitable side of entry.
    pub has_profit: bool,

    /// USD delta after the minimum-profit clamp.
    pub delta: U256,

    /// USD delta before the clamp; what `delta` becomes once the
    /// grace window expires.
    pub pending_delta: U256,
}

/// Fee charged on a position size increase.
///
/// Contract form: `size_delta - size_delta * (divisor - fee_bps) / divisor`,
/// which rounds the fee up where the plain product would round it down.
pub fn margin_fee(size_delta: U256, margin_fee_bps: u64) -> U256 {
    let after_fee = size_delta * U256::from(BASIS_POINTS_DIVISOR - margin_fee_bps)
        / U256::from(BASIS_POINTS_DIVISOR);
    size_delta - after_fee
}

/// Funding accrued by a position since its entry snapshot.
pub fn funding_fee(size: U256, entry_funding_rate: U256, cumulative_funding_rate: U256) -> U256 {
    let rate_delta = cumulative_funding_rate.saturating_sub(entry_funding_rate);
    size * rate_delta / U256::from(FUNDING_RATE_PRECISION)
}

/// Inputs of [`leverage`]. Deltas describe a pending order on top of the
/// current position; flags select increase vs. decrease per delta.
#[derive(Clone, Copy, Debug, Default)]
pub struct LeverageParams {
    pub size: U256,
    pub collateral: U256,
    pub size_delta: U256,
    pub increase_size: bool,
    pub collateral_delta: U256,
    pub increase_collateral: bool,
    pub entry_funding_rate: Option<U256>,
    pub cumulative_funding_rate: Option<U256>,
    /// Unrealized PnL to net against collateral when `include_delta`.
    pub unrealized: Option<PositionDelta>,
    pub include_delta: bool,
}

/// Leverage in basis points: `next_size * divisor / remaining_collateral`.
///
/// Remaining collateral nets out the collateral delta, the unrealized
/// loss (when included), the margin fee on a size increase and the
/// accrued funding fee. Absent whenever that leaves nothing to divide
/// by — an absent leverage is "not displayable", not zero.
pub fn leverage(chain: &Chain, p: &LeverageParams) -> Option<U256> {
    if p.size.is_zero() && p.size_delta.is_zero() {
        return None;
    }
    if p.collateral.is_zero() && p.collateral_delta.is_zero() {
        return None;
    }

    let next_size = if p.size_delta.is_zero() {
        p.size
    } else if p.increase_size {
        p.size + p.size_delta
    } else {
        if p.size_delta >= p.size {
            return None;
        }
        p.size - p.size_delta
    };

    let mut remaining = if p.collateral_delta.is_zero() {
        p.collateral
    } else if p.increase_collateral {
        p.collateral + p.collateral_delta
    } else {
        if p.collateral_delta >= p.collateral {
            return None;
        }
        p.collateral - p.collateral_delta
    };

    if p.include_delta
        && let Some(unrealized) = p.unrealized
        && !unrealized.has_profit
    {
        if unrealized.delta >= remaining {
            return None;
        }
        remaining -= unrealized.delta;
    }

    if next_size.is_zero() || remaining.is_zero() {
        return None;
    }

    // The margin fee comes out of collateral when the order grows the position
    if !p.size_delta.is_zero() && p.increase_size {
        remaining = remaining
            * U256::from(BASIS_POINTS_DIVISOR - chain.fees().margin_fee_bps)
            / U256::from(BASIS_POINTS_DIVISOR);
    }

    if let (Some(entry), Some(cumulative)) = (p.entry_funding_rate, p.cumulative_funding_rate) {
        let funding = funding_fee(p.size, entry, cumulative);
        if funding >= remaining {
            return None;
        }
        remaining -= funding;
    }

    if remaining.is_zero() {
        return None;
    }
    Some(next_size * U256::from(BASIS_POINTS_DIVISOR) / remaining)
}

/// Unrealized PnL of `position` at `mark_price`.
///
/// `size_delta` computes the delta of a partial close instead of the
/// whole position. Inside the minimum-profit grace window a profit below
/// the configured threshold is clamped to zero (the unclamped value
/// remains in `pending_delta`). Absent without an entry or mark price.
pub fn position_delta(
    chain: &Chain,
    mark_price: U256,
    position: &Position,
    size_delta: Option<U256>,
    now: u64,
) -> Option<PositionDelta> {
    let average_price = position.average_price();
    if average_price.is_zero() || mark_price.is_zero() {
        return None;
    }
    let size = size_delta.unwrap_or(position.size());
    let price_delta = average_price.abs_diff(mark_price);
    let pending_delta = size * price_delta / average_price;

    let has_profit = if position.is_long() {
        mark_price > average_price
    } else {
        mark_price < average_price
    };

    let min_profit = chain.min_profit();
    let min_profit_expired = position.last_increased_time() + min_profit.time_secs < now;
    let mut delta = pending_delta;
    if !min_profit_expired
        && has_profit
        && delta * U256::from(BASIS_POINTS_DIVISOR) <= size * U256::from(min_profit.bps)
    {
        delta = U256::ZERO;
    }

    Some(PositionDelta {
        has_profit,
        delta,
        pending_delta,
    })
}

/// Inputs of [`liquidation_price`]; same delta conventions as
/// [`LeverageParams`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LiquidationPriceParams {
    pub is_long: bool,
    pub size: U256,
    pub collateral: U256,
    pub average_price: U256,
    pub entry_funding_rate: Option<U256>,
    pub cumulative_funding_rate: Option<U256>,
    pub size_delta: U256,
    pub increase_size: bool,
    pub collateral_delta: U256,
    pub increase_collateral: bool,
    pub unrealized: Option<PositionDelta>,
    pub include_delta: bool,
}

impl LiquidationPriceParams {
    /// Parameters for an existing position with no pending order.
    pub fn from_position(position: &Position) -> Self {
        Self {
            is_long: position.is_long(),
            size: position.size(),
            collateral: position.collateral(),
            average_price: position.average_price(),
            entry_funding_rate: Some(position.entry_funding_rate()),
            ..Self::default()
        }
    }
}

/// Mark price at which the position is liquidated.
///
/// Two candidates share one kernel: the price at which fees plus
/// funding plus the fixed liquidation fee exhaust collateral, and the
/// price at which the max-leverage cap
/// (`size * divisor / max_leverage_bps`) is breached. The returned price
/// is whichever is worse for the trader — the higher for longs, the
/// lower for shorts — matching the contract's conservative choice.
pub fn liquidation_price(chain: &Chain, p: &LiquidationPriceParams) -> Option<U256> {
    if p.average_price.is_zero() {
        return None;
    }

    let mut next_size = p.size;
    let mut remaining = p.collateral;

    if !p.size_delta.is_zero() {
        if p.increase_size {
            next_size = p.size + p.size_delta;
        } else {
            if p.size_delta >= p.size {
                return None;
            }
            next_size = p.size - p.size_delta;
        }

        // A partial close realizes the proportional share of a loss
        if p.include_delta
            && let Some(unrealized) = p.unrealized
            && !unrealized.has_profit
        {
            if p.size.is_zero() {
                return None;
            }
            let realized = p.size_delta * unrealized.delta / p.size;
            if realized >= remaining {
                return None;
            }
            remaining -= realized;
        }
    }

    if !p.collateral_delta.is_zero() {
        if p.increase_collateral {
            remaining += p.collateral_delta;
        } else {
            if p.collateral_delta >= remaining {
                return None;
            }
            remaining -= p.collateral_delta;
        }
    }

    // Fees accrue on the position as it stands, not on the next size
    let mut loss = margin_fee(p.size, chain.fees().margin_fee_bps) + chain.liquidation_fee_usd();
    if let (Some(entry), Some(cumulative)) = (p.entry_funding_rate, p.cumulative_funding_rate) {
        loss += funding_fee(p.size, entry, cumulative);
    }

    let for_fees =
        liquidation_price_from_loss(loss, next_size, remaining, p.average_price, p.is_long)?;
    let max_leverage_loss =
        next_size * U256::from(BASIS_POINTS_DIVISOR) / U256::from(chain.max_leverage_bps());
    let for_max_leverage = liquidation_price_from_loss(
        max_leverage_loss,
        next_size,
        remaining,
        p.average_price,
        p.is_long,
    )?;

    Some(if p.is_long {
        for_fees.max(for_max_leverage)
    } else {
        for_fees.min(for_max_leverage)
    })
}

/// Price at which an adverse move of `loss` USD beyond collateral (or
/// down to it) liquidates a position of `size` at `average_price`.
fn liquidation_price_from_loss(
    loss: U256,
    size: U256,
    collateral: U256,
    average_price: U256,
    is_long: bool,
) -> Option<U256> {
    if size.is_zero() {
        return None;
    }
    if loss > collateral {
        // Already past liquidation; the trigger price is on the far side
        let price_delta = (loss - collateral) * average_price / size;
        return Some(if is_long {
            average_price + price_delta
        } else {
            average_price.saturating_sub(price_delta)
        });
    }
    let price_delta = (collateral - loss) * average_price / size;
    Some(if is_long {
        average_price.saturating_sub(price_delta)
    } else {
        average_price + price_delta
    })
}
