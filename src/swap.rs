//! Swap amount previews.
//!
//! Derives the output (or required input) amount of a swap from a pool
//! snapshot, mirroring the vault's pricing: the input token is valued at
//! its minimum price, the output token at its maximum, and the dynamic
//! fee curve is evaluated on both legs — debt increases on the input
//! token, decreases on the output token — with the **higher** of the two
//! fees charged, exactly as settlement would.
//!
//! Routes touching the synthetic USDV unit (pool deposits/redemptions)
//! price USDV at exactly one dollar and use the mint/burn fee tier.

use alloy::primitives::U256;

use crate::{
    Chain,
    num::{self, BASIS_POINTS_DIVISOR, PRICE_DECIMALS, USDV_DECIMALS},
    pool,
    state::PoolSnapshot,
    types::{FeeTiers, Token},
};

/// A derived swap amount together with the fee tier that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapAmount {
    /// Output amount after fees (for [`next_to_amount`]) or required
    /// input amount including fees (for [`next_from_amount`]), in the
    /// respective token's native decimals.
    pub amount: U256,

    /// Fee charged, in basis points.
    pub fee_basis_points: u64,
}

/// Output amount received for swapping `from_amount` of `from` into `to`.
///
/// Absent when either side has no pool state or no price, or when the
/// fee curve cannot be evaluated.
pub fn next_to_amount(
    chain: &Chain,
    snapshot: &PoolSnapshot,
    from: &Token,
    to: &Token,
    from_amount: U256,
) -> Option<SwapAmount> {
    if from.address == to.address {
        return Some(SwapAmount {
            amount: from_amount,
            fee_basis_points: 0,
        });
    }
    let fees = chain.fees();
    let supply = snapshot.usdv_supply();
    let weights = snapshot.total_token_weights();

    // Redemption: USDV -> token at the token's max price
    if from.address == chain.usdv().address {
        let state = snapshot.state(to.address)?;
        if state.max_price().is_zero() {
            return None;
        }
        let amount = from_amount * num::pow10(PRICE_DECIMALS) / state.max_price();
        let amount = num::adjust(amount, USDV_DECIMALS, to.decimals);
        let fee = pool::burn_fee_basis_points(fees, state, from_amount, supply, weights)?;
        return Some(SwapAmount {
            amount: deduct_fee(amount, fee)?,
            fee_basis_points: fee,
        });
    }

    // Deposit: token -> USDV at the token's min price
    if to.address == chain.usdv().address {
        let state = snapshot.state(from.address)?;
        if state.min_price().is_zero() {
            return None;
        }
        let amount = from_amount * state.min_price() / num::pow10(PRICE_DECIMALS);
        let amount = num::adjust(amount, from.decimals, USDV_DECIMALS);
        let fee = pool::mint_fee_basis_points(fees, state, amount, supply, weights)?;
        return Some(SwapAmount {
            amount: deduct_fee(amount, fee)?,
            fee_basis_points: fee,
        });
    }

    let from_state = snapshot.state(from.address)?;
    let to_state = snapshot.state(to.address)?;
    if from_state.min_price().is_zero() || to_state.max_price().is_zero() {
        return None;
    }

    let amount = from_amount * from_state.min_price() / to_state.max_price();
    let amount = num::adjust(amount, from.decimals, to.decimals);

    let usdv_delta = num::adjust(
        from_amount * from_state.min_price() / num::pow10(PRICE_DECIMALS),
        from.decimals,
        USDV_DECIMALS,
    );
    let (base_bps, tax_bps) = swap_tier(fees, from, to);
    let fee_in = pool::fee_basis_points(
        from_state, usdv_delta, base_bps, tax_bps, true, supply, weights,
    )?;
    let fee_out = pool::fee_basis_points(
        to_state, usdv_delta, base_bps, tax_bps, false, supply, weights,
    )?;
    // Settlement charges the worse of the two legs
    let fee = fee_in.max(fee_out);

    Some(SwapAmount {
        amount: deduct_fee(amount, fee)?,
        fee_basis_points: fee,
    })
}

/// Input amount required to receive `to_amount` of `to` out of `from`.
///
/// Inverse of [`next_to_amount`]: converts at the same price pair and
/// grosses the input up by the fee instead of deducting it.
pub fn next_from_amount(
    chain: &Chain,
    snapshot: &PoolSnapshot,
    from: &Token,
    to: &Token,
    to_amount: U256,
) -> Option<SwapAmount> {
    if from.address == to.address {
        return Some(SwapAmount {
            amount: to_amount,
            fee_basis_points: 0,
        });
    }
    let fees = chain.fees();
    let supply = snapshot.usdv_supply();
    let weights = snapshot.total_token_weights();

    // Redemption: how much USDV burns into `to_amount` of the token
    if from.address == chain.usdv().address {
        let state = snapshot.state(to.address)?;
        if state.max_price().is_zero() {
            return None;
        }
        let amount = to_amount * state.max_price() / num::pow10(PRICE_DECIMALS);
        let amount = num::adjust(amount, to.decimals, USDV_DECIMALS);
        let fee = pool::burn_fee_basis_points(fees, state, amount, supply, weights)?;
        return Some(SwapAmount {
            amount: gross_up_fee(amount, fee)?,
            fee_basis_points: fee,
        });
    }

    // Deposit: how many tokens mint `to_amount` of USDV
    if to.address == chain.usdv().address {
        let state = snapshot.state(from.address)?;
        if state.min_price().is_zero() {
            return None;
        }
        let amount = to_amount * num::pow10(PRICE_DECIMALS) / state.min_price();
        let amount = num::adjust(amount, USDV_DECIMALS, from.decimals);
        let fee = pool::mint_fee_basis_points(fees, state, to_amount, supply, weights)?;
        return Some(SwapAmount {
            amount: gross_up_fee(amount, fee)?,
            fee_basis_points: fee,
        });
    }

    let from_state = snapshot.state(from.address)?;
    let to_state = snapshot.state(to.address)?;
    if from_state.min_price().is_zero() || to_state.max_price().is_zero() {
        return None;
    }

    let amount = to_amount * to_state.max_price() / from_state.min_price();
    let amount = num::adjust(amount, to.decimals, from.decimals);

    let usdv_delta = num::adjust(
        to_amount * to_state.max_price() / num::pow10(PRICE_DECIMALS),
        to.decimals,
        USDV_DECIMALS,
    );
    let (base_bps, tax_bps) = swap_tier(fees, from, to);
    let fee_in = pool::fee_basis_points(
        from_state, usdv_delta, base_bps, tax_bps, true, supply, weights,
    )?;
    let fee_out = pool::fee_basis_points(
        to_state, usdv_delta, base_bps, tax_bps, false, supply, weights,
    )?;
    let fee = fee_in.max(fee_out);

    Some(SwapAmount {
        amount: gross_up_fee(amount, fee)?,
        fee_basis_points: fee,
    })
}

fn swap_tier(fees: &FeeTiers, from: &Token, to: &Token) -> (u64, u64) {
    if from.is_stable && to.is_stable {
        (fees.stable_swap_fee_bps, fees.stable_tax_bps)
    } else {
        (fees.swap_fee_bps, fees.tax_bps)
    }
}

fn deduct_fee(amount: U256, fee_bps: u64) -> Option<U256> {
    if fee_bps >= BASIS_POINTS_DIVISOR {
        return None;
    }
    Some(amount * U256::from(BASIS_POINTS_DIVISOR - fee_bps) / U256::from(BASIS_POINTS_DIVISOR))
}

fn gross_up_fee(amount: U256, fee_bps: u64) -> Option<U256> {
    if fee_bps >= BASIS_POINTS_DIVISOR {
        return None;
    }
    Some(amount * U256::from(BASIS_POINTS_DIVISOR) / U256::from(BASIS_POINTS_DIVISOR - fee_bps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{swap_chain, swap_snapshot, usdv};

    #[test]
    fn test_same_token_is_identity() {
        let chain = swap_chain();
        let snapshot = swap_snapshot(&chain);
        let weth = chain.token_by_symbol("WETH");
        let out = next_to_amount(&chain, &snapshot, weth, weth, num::pow10(18)).unwrap();
        assert_eq!(out.amount, num::pow10(18));
        assert_eq!(out.fee_basis_points, 0);
    }

    #[test]
    fn test_direct_swap_amount() {
        let chain = swap_chain();
        let snapshot = swap_snapshot(&chain);
        let weth = chain.token_by_symbol("WETH");
        let wbtc = chain.token_by_symbol("WBTC");

        // 1 WETH @ min 3000 into WBTC @ max 60000 => 0.05 WBTC before fees
        let out = next_to_amount(&chain, &snapshot, weth, wbtc, num::pow10(18)).unwrap();
        let before_fees = U256::from(5_000_000u64); // 0.05 at 8 decimals
        assert_eq!(
            out.amount,
            deduct_fee(before_fees, out.fee_basis_points).unwrap()
        );

        // The charged fee is the worse of the two curve legs
        let delta = usdv(3_000);
        let fees = chain.fees();
        let fee_in = pool::fee_basis_points(
            snapshot.state(weth.address).unwrap(),
            delta,
            fees.swap_fee_bps,
            fees.tax_bps,
            true,
            snapshot.usdv_supply(),
            snapshot.total_token_weights(),
        )
        .unwrap();
        let fee_out = pool::fee_basis_points(
            snapshot.state(wbtc.address).unwrap(),
            delta,
            fees.swap_fee_bps,
            fees.tax_bps,
            false,
            snapshot.usdv_supply(),
            snapshot.total_token_weights(),
        )
        .unwrap();
        assert_eq!(out.fee_basis_points, fee_in.max(fee_out));
    }

    #[test]
    fn test_from_amount_inverts_conversion() {
        let chain = swap_chain();
        let snapshot = swap_snapshot(&chain);
        let weth = chain.token_by_symbol("WETH");
        let wbtc = chain.token_by_symbol("WBTC");

        // Asking for the 0.05 WBTC the forward direction prices out of
        // 1 WETH must require exactly 1 WETH, grossed up by the fee.
        let needed =
            next_from_amount(&chain, &snapshot, weth, wbtc, U256::from(5_000_000u64)).unwrap();
        assert_eq!(
            needed.amount,
            gross_up_fee(num::pow10(18), needed.fee_basis_points).unwrap()
        );
    }

    #[test]
    fn test_mint_leg_prices_usdv_at_par() {
        let chain = swap_chain();
        let snapshot = swap_snapshot(&chain);
        let weth = chain.token_by_symbol("WETH");

        // 1 WETH @ 3000 mints 3000 USDV before fees
        let out = next_to_amount(&chain, &snapshot, weth, chain.usdv(), num::pow10(18)).unwrap();
        assert_eq!(
            out.amount,
            deduct_fee(usdv(3_000), out.fee_basis_points).unwrap()
        );
    }

    #[test]
    fn test_burn_leg_prices_usdv_at_par() {
        let chain = swap_chain();
        let snapshot = swap_snapshot(&chain);
        let weth = chain.token_by_symbol("WETH");

        // 3000 USDV redeems 1 WETH @ max 3000 before fees
        let out = next_to_amount(&chain, &snapshot, chain.usdv(), weth, usdv(3_000)).unwrap();
        assert_eq!(
            out.amount,
            deduct_fee(num::pow10(18), out.fee_basis_points).unwrap()
        );
    }

    #[test]
    fn test_stable_pair_uses_stable_tier() {
        let chain = swap_chain();
        let snapshot = swap_snapshot(&chain);
        let usdc = chain.token_by_symbol("USDC");
        let usdt = chain.token_by_symbol("USDT");

        // Both pools sit exactly on target, so each leg pays at most the
        // stable base fee plus half the stable tax
        let out =
            next_to_amount(&chain, &snapshot, usdc, usdt, U256::from(100u64) * num::pow10(6))
                .unwrap();
        let fees = chain.fees();
        assert!(out.fee_basis_points <= fees.stable_swap_fee_bps + fees.stable_tax_bps);
        assert!(out.fee_basis_points < fees.swap_fee_bps);
    }

    #[test]
    fn test_missing_price_is_absent() {
        let chain = swap_chain();
        let snapshot = swap_snapshot(&chain);
        let weth = chain.token_by_symbol("WETH");
        let dead = chain.token_by_symbol("DEAD");

        // DEAD has a pool slot but zeroed prices
        assert_eq!(
            next_to_amount(&chain, &snapshot, weth, dead, num::pow10(18)),
            None
        );
        assert_eq!(
            next_from_amount(&chain, &snapshot, dead, weth, num::pow10(18)),
            None
        );
    }
}
