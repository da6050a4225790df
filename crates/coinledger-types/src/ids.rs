//! Account identities and token amounts.
//!
//! Addresses are 20-byte account identifiers and amounts are unsigned
//! 256-bit integers, matching the `address` / `uint256` domain that token
//! ledgers are specified against. All arithmetic on [`Amount`] inside the
//! engine goes through the checked helpers below.

pub use alloy_primitives::{Address, U256};

use crate::{LedgerError, Result};

/// Token and native-currency quantity in base units.
pub type Amount = U256;

/// `a + b`, or `ArithmeticOverflow` tagged with `op`.
pub fn checked_add(a: Amount, b: Amount, op: &'static str) -> Result<Amount> {
    a.checked_add(b)
        .ok_or(LedgerError::ArithmeticOverflow { op })
}

/// `a * b`, or `ArithmeticOverflow` tagged with `op`.
pub fn checked_mul(a: Amount, b: Amount, op: &'static str) -> Result<Amount> {
    a.checked_mul(b)
        .ok_or(LedgerError::ArithmeticOverflow { op })
}

/// Returns `true` for the all-zero address.
#[must_use]
pub fn is_zero_address(address: &Address) -> bool {
    *address == Address::ZERO
}
