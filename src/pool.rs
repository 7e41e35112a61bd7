//! Pool fee curve.
//!
//! The vault charges a dynamic fee on every flow that changes a token's
//! share of pool value: trades that pull the token toward its configured
//! target weight earn a rebate off the base fee, trades that push it away
//! pay a tax on top. This module mirrors the on-chain formula with the
//! same truncating division in the same operation order, so the fee shown
//! before a transaction equals the fee settled by it.
//!
//! These functions are stateless and side-effect free; undefined inputs
//! produce `None`, never a panic.

use alloy::primitives::U256;

use crate::{state::TokenPoolState, types::FeeTiers};

/// Target USDV debt of a token: its configured share of total supply.
///
/// `weight * usdv_supply / total_token_weights`, zero when the supply is
/// zero. Absent when the weight table itself is missing (zero total),
/// which would divide by zero on-chain as well.
pub fn target_usdv_amount(
    state: &TokenPoolState,
    usdv_supply: U256,
    total_token_weights: U256,
) -> Option<U256> {
    if total_token_weights.is_zero() {
        return None;
    }
    if usdv_supply.is_zero() {
        return Some(U256::ZERO);
    }
    Some(state.weight() * usdv_supply / total_token_weights)
}

/// Fee in basis points for moving `usdv_delta` of debt on `state`'s token.
///
/// `increment` selects the direction: `true` adds debt (deposit / swap
/// in), `false` removes it (redemption / swap out). With the deviation
/// from target before (`initial_diff`) and after (`next_diff`) the move:
///
/// * `next_diff < initial_diff` — the move helps rebalance:
///   `base_fee_bps - tax_bps * initial_diff / target`, floored at zero;
/// * otherwise — the move adds imbalance:
///   `base_fee_bps + tax_bps * avg_diff / target`, with
///   `avg_diff = (initial_diff + next_diff) / 2` capped at `target`;
/// * zero target — the flat base fee.
///
/// The result is always within `[0, base_fee_bps + tax_bps]`.
pub fn fee_basis_points(
    state: &TokenPoolState,
    usdv_delta: U256,
    base_fee_bps: u64,
    tax_bps: u64,
    increment: bool,
    usdv_supply: U256,
    total_token_weights: U256,
) -> Option<u64> {
    let target = target_usdv_amount(state, usdv_supply, total_token_weights)?;
    if target.is_zero() {
        return Some(base_fee_bps);
    }

    let initial_amount = state.usdv_amount();
    let next_amount = if increment {
        initial_amount + usdv_delta
    } else {
        initial_amount.saturating_sub(usdv_delta)
    };

    let initial_diff = initial_amount.abs_diff(target);
    let next_diff = next_amount.abs_diff(target);

    if next_diff < initial_diff {
        let rebate = U256::from(tax_bps) * initial_diff / target;
        return Some(if rebate > U256::from(base_fee_bps) {
            0
        } else {
            base_fee_bps - rebate.to::<u64>()
        });
    }

    let mut average_diff = (initial_diff + next_diff) / U256::from(2u8);
    if average_diff > target {
        average_diff = target;
    }
    let tax = U256::from(tax_bps) * average_diff / target;
    Some(base_fee_bps + tax.to::<u64>())
}

/// Fee for minting USDV against a token (pool deposit).
pub fn mint_fee_basis_points(
    fees: &FeeTiers,
    state: &TokenPoolState,
    usdv_delta: U256,
    usdv_supply: U256,
    total_token_weights: U256,
) -> Option<u64> {
    fee_basis_points(
        state,
        usdv_delta,
        fees.mint_burn_fee_bps,
        fees.tax_bps,
        true,
        usdv_supply,
        total_token_weights,
    )
}

/// Fee for burning USDV into a token (pool redemption).
pub fn burn_fee_basis_points(
    fees: &FeeTiers,
    state: &TokenPoolState,
    usdv_delta: U256,
    usdv_supply: U256,
    total_token_weights: U256,
) -> Option<u64> {
    fee_basis_points(
        state,
        usdv_delta,
        fees.mint_burn_fee_bps,
        fees.tax_bps,
        false,
        usdv_supply,
        total_token_weights,
    )
}
