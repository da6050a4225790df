//! Supply conservation checker.
//!
//! Mathematical invariant enforced after every committed call (debug
//! builds) and on every snapshot restore:
//! ```text
//! Σ balance[a] == total_supply
//! ```

use coinledger_types::{Amount, LedgerError, Result};

use crate::state::LedgerState;

/// Recompute Σ balances and compare with the recorded total supply.
///
/// # Errors
/// Returns [`LedgerError::SupplyInvariantViolation`] if they differ or the
/// sum overflows.
pub fn verify_supply(state: &LedgerState) -> Result<()> {
    let actual = state
        .balances()
        .try_fold(Amount::ZERO, |acc, (_, balance)| acc.checked_add(balance))
        .ok_or_else(|| LedgerError::SupplyInvariantViolation {
            reason: "sum of balances overflows".into(),
        })?;
    let expected = state.total_supply();
    if actual != expected {
        tracing::error!(%actual, %expected, "Supply invariant violated");
        return Err(LedgerError::SupplyInvariantViolation {
            reason: format!(
                "sum of balances {actual} != total supply {expected} across {} accounts",
                state.account_count()
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;
    use coinledger_types::fixtures::account;

    use super::*;

    #[test]
    fn empty_state_balances() {
        assert!(verify_supply(&LedgerState::new(account(1))).is_ok());
    }

    #[test]
    fn detects_drift() {
        let mut state = LedgerState::new(account(1));
        state.balances.insert(account(1), U256::from(10u64));
        state.total_supply = U256::from(11u64);
        let err = verify_supply(&state).unwrap_err();
        assert!(matches!(err, LedgerError::SupplyInvariantViolation { .. }));

        state.total_supply = U256::from(10u64);
        assert!(verify_supply(&state).is_ok());
    }

    #[test]
    fn detects_overflowing_sum() {
        let mut state = LedgerState::new(account(1));
        state.balances.insert(account(1), U256::MAX);
        state.balances.insert(account(2), U256::from(1u64));
        assert!(verify_supply(&state).is_err());
    }
}
