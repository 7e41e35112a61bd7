//! Fixed-point numeric primitives.
//!
//! All on-chain amounts are unsigned integers scaled by a fixed power of
//! ten. Arithmetic on them stays in [`U256`] with truncating integer
//! division at every step, in the same operation order as the vault
//! contract, so client-side previews agree with settlement results exactly.
//! Conversion to decimal/`f64` display scale happens only at the edges.

use alloy::primitives::U256;
use fastnum::{
    bint,
    decimal::{Context, RoundingMode, UnsignedDecimal},
};

/// Basis points divisor: 10_000 bps = 100%.
pub const BASIS_POINTS_DIVISOR: u64 = 10_000;

/// Decimal exponent of USD prices and USD-denominated position sizes.
pub const PRICE_DECIMALS: u8 = 30;

/// Decimal exponent of the vault's internal USD-pegged unit (USDV).
pub const USDV_DECIMALS: u8 = 18;

/// Scale of cumulative funding rates.
pub const FUNDING_RATE_PRECISION: u64 = 1_000_000;

/// `10^exp` as an [`U256`].
pub fn pow10(exp: u8) -> U256 {
    U256::from(10u8).pow(U256::from(exp))
}

/// Rescales a fixed-point amount between decimal exponents.
///
/// Widening multiplies by `10^(to-from)`; narrowing divides, truncating
/// toward zero. Matches the vault's `adjustForDecimals`, so narrowing may
/// lose precision but never rounds up.
pub fn adjust(amount: U256, from_decimals: u8, to_decimals: u8) -> U256 {
    if to_decimals >= from_decimals {
        amount * pow10(to_decimals - from_decimals)
    } else {
        amount / pow10(from_decimals - to_decimals)
    }
}

/// Converts a fixed-point amount to chart-scale `f64`.
///
/// Lossy by design: charting tolerates floating point, settlement math
/// never goes through here.
pub fn to_f64(amount: U256, decimals: u8) -> f64 {
    let (int, frac) = amount.div_rem(pow10(decimals));
    int.saturating_to::<u128>() as f64
        + frac.saturating_to::<u128>() as f64 / 10f64.powi(decimals as i32)
}

/// Fixed-point to decimal converter for display values.
#[derive(Clone, Copy, Debug, Default)]
pub struct Converter {
    decimals: i32,
}

impl Converter {
    pub fn new(decimals: u8) -> Self {
        Self {
            decimals: decimals as i32,
        }
    }

    pub fn from_unsigned<const N: usize>(&self, value: U256) -> UnsignedDecimal<N> {
        let unscaled = bint::UInt::<N>::from_le_slice(value.as_le_slice())
            .expect("Converter: U256 -> UInt::<N>");
        UnsignedDecimal::<N>::from_parts(
            unscaled,
            -self.decimals,
            Context::default().with_rounding_mode(RoundingMode::Floor),
        )
    }

    pub fn to_unsigned<const N: usize>(&self, value: UnsignedDecimal<N>) -> U256 {
        let rescaled = value.rescale(self.decimals as i16);
        U256::from_le_slice(rescaled.digits().to_radix_le(256).as_slice())
    }
}

#[cfg(test)]
mod tests {
    use fastnum::udec256;

    use super::*;

    #[test]
    fn test_pow10() {
        assert_eq!(pow10(0), U256::from(1));
        assert_eq!(pow10(6), U256::from(1_000_000));
        assert_eq!(pow10(30), U256::from(10u8).pow(U256::from(30)));
    }

    #[test]
    fn test_adjust_widening() {
        assert_eq!(
            adjust(U256::from(15u8), 6, 18),
            U256::from(15u8) * pow10(12)
        );
        // Same exponent is a no-op
        assert_eq!(adjust(U256::from(42u8), 18, 18), U256::from(42u8));
    }

    #[test]
    fn test_adjust_narrowing_truncates() {
        // 1.9 at 1 decimal -> 1 at 0 decimals, toward zero
        assert_eq!(adjust(U256::from(19u8), 1, 0), U256::from(1u8));
        assert_eq!(adjust(U256::from(999_999u32), 6, 0), U256::ZERO);
    }

    #[test]
    fn test_adjust_round_trip() {
        // Widen-then-narrow is exact; narrow-then-widen never exceeds the original
        for raw in [0u64, 1, 7, 123_456_789, 999_999_999_999] {
            let amount = U256::from(raw);
            assert_eq!(adjust(adjust(amount, 6, 18), 18, 6), amount);
            assert!(adjust(adjust(amount, 18, 6), 6, 18) <= amount);
        }
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(to_f64(U256::from(1_500_000u32), 6), 1.5);
        assert_eq!(to_f64(U256::ZERO, 30), 0.0);
        let five_usd = U256::from(5u8) * pow10(PRICE_DECIMALS);
        assert_eq!(to_f64(five_usd, PRICE_DECIMALS), 5.0);
        // Lossy on purpose past f64 precision
        assert!((to_f64(U256::from(1_234_567u32), 6) - 1.234567).abs() < 1e-9);
    }

    #[test]
    fn test_converter_from_unsigned() {
        assert_eq!(
            Converter::new(0).from_unsigned(U256::from(1234567890u64)),
            udec256!(1234567890)
        );
        assert_eq!(
            Converter::new(6).from_unsigned(U256::from(1234567890u64)),
            udec256!(1234.56789)
        );
        assert_eq!(
            Converter::new(12).from_unsigned(U256::from(1234567890u64)),
            udec256!(0.00123456789)
        );
    }

    #[test]
    fn test_converter_to_unsigned() {
        assert_eq!(
            Converter::new(0).to_unsigned(udec256!(1234567890)),
            U256::from(1234567890u64)
        );
        assert_eq!(
            Converter::new(6).to_unsigned(udec256!(1234.56789)),
            U256::from(1234567890u64)
        );
        assert_eq!(
            Converter::new(12).to_unsigned(udec256!(0.00123456789)),
            U256::from(1234567890u64)
        );
    }
}
