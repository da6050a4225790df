//! AccessControl: owner identity and the admin capability mapping.
//!
//! Privileged operations call [`ensure_capability`] with the bit they need;
//! the owner passes every check. Ownership itself and the admin mapping are
//! managed by the owner alone.

use coinledger_types::{
    Address, Capabilities, LedgerError, LedgerEvent, Result, is_zero_address,
};

use crate::{journal::Transaction, state::LedgerState};

/// Require `caller` to be the current owner.
pub fn ensure_owner(state: &LedgerState, caller: Address, action: &'static str) -> Result<()> {
    if caller == state.owner() {
        Ok(())
    } else {
        Err(LedgerError::Unauthorized { caller, action })
    }
}

/// Require `caller` to hold every bit of `required`.
pub fn ensure_capability(
    state: &LedgerState,
    caller: Address,
    required: Capabilities,
    action: &'static str,
) -> Result<()> {
    if state.capabilities_of(caller).contains(required) {
        Ok(())
    } else {
        Err(LedgerError::Unauthorized { caller, action })
    }
}

/// Hand ownership to `new_owner`. Owner-only.
pub fn transfer_ownership(tx: &mut Transaction<'_>, caller: Address, new_owner: Address) -> Result<()> {
    ensure_owner(tx, caller, "transfer ownership")?;
    if is_zero_address(&new_owner) {
        return Err(LedgerError::ZeroAddressTarget);
    }
    let previous = tx.owner();
    tx.set_owner(new_owner);
    tx.emit(LedgerEvent::OwnershipTransferred {
        previous,
        new_owner,
    });
    tracing::info!(%previous, %new_owner, "Ownership transferred");
    Ok(())
}

/// Add `capabilities` to `admin`'s set. Owner-only. Returns the new set.
pub fn grant(
    tx: &mut Transaction<'_>,
    caller: Address,
    admin: Address,
    capabilities: Capabilities,
) -> Result<Capabilities> {
    ensure_owner(tx, caller, "grant capabilities")?;
    if is_zero_address(&admin) {
        return Err(LedgerError::ZeroAddressTarget);
    }
    let current = tx.admins.get(&admin).copied().unwrap_or_default();
    let updated = current | capabilities;
    write(tx, admin, updated);
    Ok(updated)
}

/// Remove `capabilities` from `admin`'s set. Owner-only. Returns the new set.
pub fn revoke(
    tx: &mut Transaction<'_>,
    caller: Address,
    admin: Address,
    capabilities: Capabilities,
) -> Result<Capabilities> {
    ensure_owner(tx, caller, "revoke capabilities")?;
    let current = tx.admins.get(&admin).copied().unwrap_or_default();
    let updated = current.difference(capabilities);
    write(tx, admin, updated);
    Ok(updated)
}

fn write(tx: &mut Transaction<'_>, admin: Address, capabilities: Capabilities) {
    tx.set_capabilities(admin, capabilities);
    tx.emit(LedgerEvent::CapabilitiesChanged {
        admin,
        capabilities,
    });
    tracing::info!(%admin, %capabilities, "Admin capabilities updated");
}

#[cfg(test)]
mod tests {
    use coinledger_types::fixtures::account;

    use super::*;

    #[test]
    fn owner_passes_every_check() {
        let state = LedgerState::new(account(1));
        assert!(ensure_owner(&state, account(1), "x").is_ok());
        assert!(ensure_capability(&state, account(1), Capabilities::ALL, "x").is_ok());
    }

    #[test]
    fn stranger_is_unauthorized() {
        let state = LedgerState::new(account(1));
        let err = ensure_capability(&state, account(2), Capabilities::FREEZE, "freeze").unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Unauthorized { caller, action: "freeze" } if caller == account(2)
        ));
    }

    #[test]
    fn granted_admin_holds_only_its_bits() {
        let mut state = LedgerState::new(account(1));
        let mut tx = Transaction::begin(&mut state);
        grant(&mut tx, account(1), account(2), Capabilities::FREEZE).unwrap();
        assert!(ensure_capability(&tx, account(2), Capabilities::FREEZE, "freeze").is_ok());
        assert!(ensure_capability(&tx, account(2), Capabilities::MINT, "mint").is_err());
        assert!(ensure_owner(&tx, account(2), "transfer ownership").is_err());
        tx.commit();
    }

    #[test]
    fn revoke_clears_bits() {
        let mut state = LedgerState::new(account(1));
        let mut tx = Transaction::begin(&mut state);
        grant(&mut tx, account(1), account(2), Capabilities::FREEZE | Capabilities::MINT).unwrap();
        let left = revoke(&mut tx, account(1), account(2), Capabilities::MINT).unwrap();
        assert_eq!(left, Capabilities::FREEZE);
        let left = revoke(&mut tx, account(1), account(2), Capabilities::FREEZE).unwrap();
        assert!(left.is_empty());
        tx.commit();
        assert!(state.admins.is_empty());
    }

    #[test]
    fn only_owner_grants() {
        let mut state = LedgerState::new(account(1));
        let mut tx = Transaction::begin(&mut state);
        assert!(grant(&mut tx, account(2), account(2), Capabilities::ALL).is_err());
    }

    #[test]
    fn ownership_transfer_moves_privileges() {
        let mut state = LedgerState::new(account(1));
        let mut tx = Transaction::begin(&mut state);
        transfer_ownership(&mut tx, account(1), account(2)).unwrap();
        assert_eq!(tx.owner(), account(2));
        assert!(transfer_ownership(&mut tx, account(1), account(3)).is_err());
        assert!(matches!(
            transfer_ownership(&mut tx, account(2), Address::ZERO),
            Err(LedgerError::ZeroAddressTarget)
        ));
        let events = tx.commit();
        assert_eq!(events.len(), 1);
        assert_eq!(state.capabilities_of(account(2)), Capabilities::ALL);
        assert!(state.capabilities_of(account(1)).is_empty());
    }
}
