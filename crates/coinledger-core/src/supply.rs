//! SupplyController: privileged minting and holder-initiated burning.
//!
//! Minting goes through [`issue`], which enforces the zero-address policy
//! and the optional TOKEN_LIMIT. The presale desk calls [`issue`] directly
//! after its own phase and capability checks.

use coinledger_types::{
    Address, Amount, Capabilities, LedgerError, Result, ZeroAddressPolicy, checked_add,
    is_zero_address,
};

use crate::{access, allowance, journal::Transaction, ledger, rules::Rules};

/// Mint `amount` to `to`. Requires [`Capabilities::MINT`].
pub fn mint_token(
    tx: &mut Transaction<'_>,
    rules: &Rules,
    caller: Address,
    to: Address,
    amount: Amount,
) -> Result<()> {
    access::ensure_capability(tx, caller, Capabilities::MINT, "mint tokens")?;
    issue(tx, rules, to, amount)?;
    tracing::info!(%caller, %to, %amount, "Tokens minted");
    Ok(())
}

/// Create new supply without a privilege check.
///
/// # Errors
/// `ZeroAddressTarget` unless the policy credits the zero address,
/// `SupplyCapExceeded` past the token limit, `ArithmeticOverflow` past
/// 2^256 − 1.
pub fn issue(tx: &mut Transaction<'_>, rules: &Rules, to: Address, amount: Amount) -> Result<()> {
    if is_zero_address(&to) && rules.zero_address != ZeroAddressPolicy::Credit {
        return Err(LedgerError::ZeroAddressTarget);
    }
    if let Some(limit) = rules.token_limit {
        let supply = tx.total_supply();
        let after = checked_add(supply, amount, "mint")?;
        if after > limit {
            return Err(LedgerError::SupplyCapExceeded {
                requested: amount,
                supply,
                limit,
            });
        }
    }
    ledger::mint(tx, to, amount)
}

/// `caller` destroys `amount` of its own tokens.
pub fn burn(tx: &mut Transaction<'_>, caller: Address, amount: Amount) -> Result<()> {
    ledger::burn(tx, caller, amount)
}

/// `caller` destroys `amount` of `owner`'s tokens against its allowance.
pub fn burn_from(
    tx: &mut Transaction<'_>,
    caller: Address,
    owner: Address,
    amount: Amount,
) -> Result<()> {
    allowance::spend(tx, owner, caller, amount)?;
    ledger::burn(tx, owner, amount)
}

#[cfg(test)]
mod tests {
    use coinledger_types::fixtures::{account, units};

    use super::*;
    use crate::state::LedgerState;

    fn capped(limit: u64) -> Rules {
        Rules {
            token_limit: Some(units(limit)),
            ..Rules::default()
        }
    }

    #[test]
    fn only_minters_mint() {
        let mut state = LedgerState::new(account(1));
        let mut tx = Transaction::begin(&mut state);
        let err = mint_token(&mut tx, &Rules::default(), account(2), account(2), units(5))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Unauthorized { .. }));
        mint_token(&mut tx, &Rules::default(), account(1), account(2), units(5)).unwrap();
        assert_eq!(tx.total_supply(), units(5));
    }

    #[test]
    fn token_limit_is_inclusive() {
        let mut state = LedgerState::new(account(1));
        let mut tx = Transaction::begin(&mut state);
        let rules = capped(100);
        issue(&mut tx, &rules, account(2), units(100)).unwrap();
        let err = issue(&mut tx, &rules, account(2), units(1)).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::SupplyCapExceeded { supply, limit, .. }
                if supply == units(100) && limit == units(100)
        ));
    }

    #[test]
    fn mint_to_zero_follows_policy() {
        let mut state = LedgerState::new(account(1));
        let mut tx = Transaction::begin(&mut state);
        let burn_policy = Rules {
            zero_address: ZeroAddressPolicy::Burn,
            ..Rules::default()
        };
        assert!(issue(&mut tx, &burn_policy, Address::ZERO, units(1)).is_err());
        let credit = Rules {
            zero_address: ZeroAddressPolicy::Credit,
            ..Rules::default()
        };
        issue(&mut tx, &credit, Address::ZERO, units(1)).unwrap();
        assert_eq!(tx.balance_of(Address::ZERO), units(1));
    }

    #[test]
    fn burn_from_needs_allowance() {
        let mut state = LedgerState::new(account(1));
        state.balances.insert(account(2), units(50));
        state.total_supply = units(50);
        let mut tx = Transaction::begin(&mut state);
        assert!(matches!(
            burn_from(&mut tx, account(3), account(2), units(10)),
            Err(LedgerError::InsufficientAllowance { .. })
        ));
        allowance::approve(&mut tx, account(2), account(3), units(10));
        burn_from(&mut tx, account(3), account(2), units(10)).unwrap();
        assert_eq!(tx.total_supply(), units(40));
        assert!(tx.allowance(account(2), account(3)).is_zero());
    }

    #[test]
    fn burn_needs_balance() {
        let mut state = LedgerState::new(account(1));
        let mut tx = Transaction::begin(&mut state);
        assert!(matches!(
            burn(&mut tx, account(2), units(1)),
            Err(LedgerError::InsufficientBalance { .. })
        ));
    }
}
