//! Conversion between human-readable token amounts and on-chain base units.

use alloy::primitives::U256;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("cannot parse amount {0:?}")]
    Parse(String),
    #[error("amount must not be negative: {0}")]
    Negative(Decimal),
    #[error("amount {amount} with {decimals} decimals does not fit in 256 bits")]
    Overflow { amount: Decimal, decimals: u8 },
}

pub fn parse_amount(input: &str) -> Result<Decimal, AmountError> {
    let amount =
        Decimal::from_str(input.trim()).map_err(|_| AmountError::Parse(input.to_string()))?;
    if amount < Decimal::ZERO {
        return Err(AmountError::Negative(amount));
    }
    Ok(amount)
}

/// Scales `amount` by `10^decimals`, rounding half away from zero at `decimals` places.
pub fn to_base_units(amount: Decimal, decimals: u8) -> Result<U256, AmountError> {
    if amount < Decimal::ZERO {
        return Err(AmountError::Negative(amount));
    }

    let rounded =
        amount.round_dp_with_strategy(u32::from(decimals), RoundingStrategy::MidpointAwayFromZero);
    let mantissa = u128::try_from(rounded.mantissa()).map_err(|_| AmountError::Negative(amount))?;
    let exponent = u32::from(decimals).saturating_sub(rounded.scale());

    U256::from(10u8)
        .checked_pow(U256::from(exponent))
        .and_then(|factor| U256::from(mantissa).checked_mul(factor))
        .ok_or(AmountError::Overflow { amount, decimals })
}

/// Renders base units as a decimal string, e.g. `250000` with 6 decimals as `0.250000`.
pub fn format_base_units(amount: U256, decimals: u8) -> String {
    let digits = amount.to_string();
    let decimals = usize::from(decimals);
    if decimals == 0 {
        return digits;
    }
    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    format!("{}.{}", whole, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn quarter_usdc_is_250000() {
        assert_eq!(to_base_units(dec("0.25"), 6).unwrap(), U256::from(250_000u64));
    }

    #[test]
    fn eighteen_decimals_is_exact() {
        assert_eq!(
            to_base_units(dec("1.5"), 18).unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        assert_eq!(
            to_base_units(dec("0.000000000000000001"), 18).unwrap(),
            U256::from(1u8)
        );
    }

    #[test]
    fn excess_precision_rounds_half_away_from_zero() {
        assert_eq!(to_base_units(dec("0.0000005"), 6).unwrap(), U256::from(1u8));
        assert_eq!(to_base_units(dec("0.0000004"), 6).unwrap(), U256::ZERO);
        assert_eq!(to_base_units(dec("1.2345675"), 6).unwrap(), U256::from(1_234_568u64));
    }

    #[test]
    fn zero_decimals_and_whole_numbers() {
        assert_eq!(to_base_units(dec("42"), 0).unwrap(), U256::from(42u8));
        assert_eq!(to_base_units(dec("42"), 2).unwrap(), U256::from(4200u64));
        assert_eq!(to_base_units(Decimal::ZERO, 18).unwrap(), U256::ZERO);
    }

    #[test]
    fn large_decimals_beyond_decimal_scale() {
        // 40 decimals exceeds rust_decimal's maximum scale of 28
        let expected = U256::from(10u8).pow(U256::from(40u8)) * U256::from(3u8);
        assert_eq!(to_base_units(dec("3"), 40).unwrap(), expected);
    }

    #[test]
    fn overflow_is_reported() {
        let err = to_base_units(dec("1"), 255).unwrap_err();
        assert!(matches!(err, AmountError::Overflow { decimals: 255, .. }));
    }

    #[test]
    fn negative_and_garbage_rejected() {
        assert!(matches!(to_base_units(dec("-1"), 6), Err(AmountError::Negative(_))));
        assert!(matches!(parse_amount("-0.5"), Err(AmountError::Negative(_))));
        assert!(matches!(parse_amount("abc"), Err(AmountError::Parse(_))));
        assert_eq!(parse_amount(" 0.25 ").unwrap(), dec("0.25"));
    }

    #[test]
    fn formats_base_units() {
        assert_eq!(format_base_units(U256::from(250_000u64), 6), "0.250000");
        assert_eq!(format_base_units(U256::from(1_234_567u64), 6), "1.234567");
        assert_eq!(format_base_units(U256::from(42u8), 0), "42");
    }
}
