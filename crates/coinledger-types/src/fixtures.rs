//! Deterministic fixtures for tests. **Never use in production.**

use alloy_primitives::U256;

use crate::{Address, Amount, units};

/// The `n`-th well-known test account (`0x00…0n`).
#[must_use]
pub fn account(n: u8) -> Address {
    Address::with_last_byte(n)
}

/// `whole` tokens of an 18-decimal token, in base units.
#[must_use]
pub fn ether(whole: u64) -> Amount {
    U256::from(whole) * U256::from(10u64).pow(U256::from(18u64))
}

/// Parse a fractional ether string, panicking on bad input.
#[must_use]
pub fn ether_str(input: &str) -> Amount {
    units::parse_ether(input).expect("fixture amount must parse")
}

/// Shorthand for a small base-unit amount.
#[must_use]
pub fn units(n: u64) -> Amount {
    U256::from(n)
}
