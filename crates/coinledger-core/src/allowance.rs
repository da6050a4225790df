//! AllowanceTable: delegated spending rights.
//!
//! `approve` overwrites unconditionally. Callers wanting to avoid the
//! classic approve front-run should use [`increase`] / [`decrease`], or set
//! the allowance to zero before setting a new non-zero value.

use coinledger_types::{Address, Amount, LedgerError, LedgerEvent, Result, checked_add};

use crate::{journal::Transaction, ledger, rules::Rules};

/// Set `owner`'s allowance for `spender` to exactly `amount`.
pub fn approve(tx: &mut Transaction<'_>, owner: Address, spender: Address, amount: Amount) {
    write(tx, owner, spender, amount);
}

/// Raise the allowance by `added`.
pub fn increase(
    tx: &mut Transaction<'_>,
    owner: Address,
    spender: Address,
    added: Amount,
) -> Result<Amount> {
    let updated = checked_add(tx.allowance(owner, spender), added, "increase_approval")?;
    write(tx, owner, spender, updated);
    Ok(updated)
}

/// Lower the allowance by `subtracted`, stopping at zero.
pub fn decrease(
    tx: &mut Transaction<'_>,
    owner: Address,
    spender: Address,
    subtracted: Amount,
) -> Amount {
    let updated = tx.allowance(owner, spender).saturating_sub(subtracted);
    write(tx, owner, spender, updated);
    updated
}

/// Consume `amount` of `spender`'s allowance over `owner`. No event.
///
/// # Errors
/// `InsufficientAllowance` if the remaining allowance is below `amount`.
pub fn spend(
    tx: &mut Transaction<'_>,
    owner: Address,
    spender: Address,
    amount: Amount,
) -> Result<()> {
    let available = tx.allowance(owner, spender);
    let remaining = available
        .checked_sub(amount)
        .ok_or(LedgerError::InsufficientAllowance {
            needed: amount,
            available,
        })?;
    tx.set_allowance(owner, spender, remaining);
    Ok(())
}

/// `caller` moves `amount` of `owner`'s tokens to `to`.
///
/// The allowance is checked first, then the ledger applies the same checks
/// as a direct transfer by `owner`.
pub fn transfer_from(
    tx: &mut Transaction<'_>,
    rules: &Rules,
    caller: Address,
    owner: Address,
    to: Address,
    amount: Amount,
) -> Result<()> {
    spend(tx, owner, caller, amount)?;
    ledger::transfer(tx, rules, owner, to, amount)
}

fn write(tx: &mut Transaction<'_>, owner: Address, spender: Address, amount: Amount) {
    tx.set_allowance(owner, spender, amount);
    tx.emit(LedgerEvent::Approval {
        owner,
        spender,
        amount,
    });
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;
    use coinledger_types::fixtures::{account, units};

    use super::*;
    use crate::state::LedgerState;

    fn funded() -> LedgerState {
        let mut state = LedgerState::new(account(1));
        state.balances.insert(account(1), units(1000));
        state.total_supply = units(1000);
        state
    }

    #[test]
    fn approve_overwrites() {
        let mut state = funded();
        let mut tx = Transaction::begin(&mut state);
        approve(&mut tx, account(1), account(2), units(100));
        approve(&mut tx, account(1), account(2), units(7));
        assert_eq!(tx.allowance(account(1), account(2)), units(7));
        assert_eq!(tx.events().len(), 2);
    }

    #[test]
    fn decrease_saturates_at_zero() {
        let mut state = funded();
        let mut tx = Transaction::begin(&mut state);
        approve(&mut tx, account(1), account(2), units(5));
        assert_eq!(decrease(&mut tx, account(1), account(2), units(9)), U256::ZERO);
    }

    #[test]
    fn increase_overflow_rejected() {
        let mut state = funded();
        let mut tx = Transaction::begin(&mut state);
        approve(&mut tx, account(1), account(2), U256::MAX);
        assert!(matches!(
            increase(&mut tx, account(1), account(2), units(1)),
            Err(LedgerError::ArithmeticOverflow { .. })
        ));
    }

    #[test]
    fn transfer_from_spends_allowance() {
        let mut state = funded();
        let mut tx = Transaction::begin(&mut state);
        let rules = Rules::default();
        approve(&mut tx, account(1), account(2), units(100));
        transfer_from(&mut tx, &rules, account(2), account(1), account(3), units(60)).unwrap();
        assert_eq!(tx.allowance(account(1), account(2)), units(40));
        assert_eq!(tx.balance_of(account(3)), units(60));

        let err = transfer_from(&mut tx, &rules, account(2), account(1), account(3), units(41))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientAllowance { .. }));
    }

    #[test]
    fn allowance_checked_before_balance() {
        let mut state = funded();
        let mut tx = Transaction::begin(&mut state);
        approve(&mut tx, account(1), account(2), units(5000));
        let err = transfer_from(
            &mut tx,
            &Rules::default(),
            account(2),
            account(1),
            account(3),
            units(2000),
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));

        let err = transfer_from(
            &mut tx,
            &Rules::default(),
            account(4),
            account(1),
            account(3),
            units(2000),
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientAllowance { .. }));
    }

    #[test]
    fn spending_emits_no_approval() {
        let mut state = funded();
        let mut tx = Transaction::begin(&mut state);
        approve(&mut tx, account(1), account(2), units(10));
        transfer_from(&mut tx, &Rules::default(), account(2), account(1), account(3), units(10))
            .unwrap();
        let names: Vec<_> = tx.events().iter().map(LedgerEvent::name).collect();
        assert_eq!(names, ["Approval", "Transfer"]);
    }
}
