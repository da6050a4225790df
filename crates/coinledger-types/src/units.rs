//! Conversion between human-readable amounts and base units.
//!
//! `parse_units("0.02", 18)` yields `20_000_000_000_000_000`, the same value
//! wallets and test harnesses compute for "0.02 ether". Parsing goes through
//! [`rust_decimal::Decimal`], so inputs are limited to 28 significant digits.

use std::str::FromStr;

use alloy_primitives::U256;
use rust_decimal::Decimal;

use crate::{Amount, LedgerError, Result};

/// `10^exp` as an [`Amount`].
pub fn pow10(exp: u32) -> Result<Amount> {
    U256::from(10u64)
        .checked_pow(U256::from(exp))
        .ok_or(LedgerError::ArithmeticOverflow { op: "pow10" })
}

/// Parse a decimal string into base units with `decimals` fractional digits.
///
/// # Errors
/// `Configuration` for malformed or negative input, or when the input has
/// more fractional digits than `decimals` allows.
pub fn parse_units(input: &str, decimals: u8) -> Result<Amount> {
    let value = Decimal::from_str(input.trim())
        .map_err(|e| LedgerError::Configuration(format!("invalid amount {input:?}: {e}")))?
        .normalize();
    if value.is_sign_negative() && !value.is_zero() {
        return Err(LedgerError::Configuration(format!(
            "negative amount {input:?}"
        )));
    }
    let scale = value.scale();
    let decimals = u32::from(decimals);
    if scale > decimals {
        return Err(LedgerError::Configuration(format!(
            "amount {input:?} has {scale} fractional digits, token allows {decimals}"
        )));
    }
    let mantissa = u128::try_from(value.mantissa().abs())
        .map_err(|_| LedgerError::Internal("decimal mantissa out of range".into()))?;
    U256::from(mantissa)
        .checked_mul(pow10(decimals - scale)?)
        .ok_or(LedgerError::ArithmeticOverflow { op: "parse_units" })
}

/// Parse a native-currency amount ("0.02" ether → wei).
pub fn parse_ether(input: &str) -> Result<Amount> {
    parse_units(input, crate::constants::NATIVE_DECIMALS)
}

/// Render base units as a decimal string, trimming trailing zeros.
pub fn format_units(amount: Amount, decimals: u8) -> Result<String> {
    let factor = pow10(u32::from(decimals))?;
    let whole = amount / factor;
    let frac = amount % factor;
    if frac.is_zero() {
        return Ok(whole.to_string());
    }
    let padded = format!("{:0>width$}", frac.to_string(), width = usize::from(decimals));
    Ok(format!("{whole}.{}", padded.trim_end_matches('0')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ether_fractions() {
        assert_eq!(
            parse_ether("0.02").unwrap(),
            U256::from(20_000_000_000_000_000u64)
        );
        assert_eq!(parse_ether("1").unwrap(), U256::from(10u64).pow(U256::from(18u64)));
        assert_eq!(parse_ether("0").unwrap(), U256::ZERO);
    }

    #[test]
    fn parse_trailing_zeros_are_not_extra_precision() {
        assert_eq!(parse_units("1.50", 1).unwrap(), U256::from(15u64));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            parse_units("-1", 18),
            Err(LedgerError::Configuration(_))
        ));
        assert!(matches!(
            parse_units("0.001", 2),
            Err(LedgerError::Configuration(_))
        ));
        assert!(matches!(
            parse_units("abc", 18),
            Err(LedgerError::Configuration(_))
        ));
    }

    #[test]
    fn parse_large_whole_amounts() {
        // 10^19 ether = 10^37 wei, far beyond u128 / Decimal in base units.
        let amount = parse_ether("10000000000000000000").unwrap();
        assert_eq!(amount, U256::from(10u64).pow(U256::from(37u64)));
    }

    #[test]
    fn format_round_trips_through_parse() {
        let amount = parse_ether("123.045").unwrap();
        assert_eq!(format_units(amount, 18).unwrap(), "123.045");
        assert_eq!(format_units(U256::from(1000u64), 0).unwrap(), "1000");
        assert_eq!(format_units(U256::from(1u64), 3).unwrap(), "0.001");
    }

    #[test]
    fn pow10_limits() {
        assert!(pow10(77).is_ok());
        assert!(pow10(78).is_err());
    }
}
