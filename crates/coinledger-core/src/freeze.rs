//! FreezeRegistry: per-account transfer locks and the token-wide lock.
//!
//! The ledger consults [`check_sender`] and [`check_recipient`] before any
//! balance mutation. The token-wide lock models presale tokens that stay
//! non-transferable until released; the owner is exempt so it can still
//! distribute.

use coinledger_types::{Address, Capabilities, FreezeScope, LedgerError, LedgerEvent, Result};

use crate::{access, journal::Transaction, rules::Rules, state::LedgerState};

/// Set or clear `target`'s freeze flag. Requires [`Capabilities::FREEZE`].
///
/// Writing the current value again is harmless: the flag is unchanged and
/// the notification is re-emitted, as the deployed contracts do.
pub fn freeze_account(
    tx: &mut Transaction<'_>,
    caller: Address,
    target: Address,
    freeze: bool,
) -> Result<()> {
    access::ensure_capability(tx, caller, Capabilities::FREEZE, "freeze accounts")?;
    tx.set_frozen(target, freeze);
    tx.emit(LedgerEvent::FrozenFunds {
        target,
        frozen: freeze,
    });
    tracing::info!(%target, frozen = freeze, "Account freeze updated");
    Ok(())
}

/// Lock or unlock every transfer. Requires [`Capabilities::LOCK`].
pub fn set_transfer_lock(tx: &mut Transaction<'_>, caller: Address, locked: bool) -> Result<()> {
    access::ensure_capability(tx, caller, Capabilities::LOCK, "lock transfers")?;
    tx.set_transfers_locked(locked);
    tx.emit(LedgerEvent::TransferLockChanged { locked });
    tracing::info!(locked, "Token-wide transfer lock updated");
    Ok(())
}

/// May `sender` initiate a transfer?
///
/// The token-wide lock does not apply to the owner or the desk's reserve
/// account, so both can still distribute while holders are locked.
pub fn check_sender(state: &LedgerState, rules: &Rules, sender: Address) -> Result<()> {
    if state.transfers_locked() && sender != state.owner() && sender != rules.reserve(state) {
        return Err(LedgerError::TransfersLocked);
    }
    if state.is_frozen(sender) {
        return Err(LedgerError::AccountFrozen(sender));
    }
    Ok(())
}

/// May `recipient` be credited? Only restricted under
/// [`FreezeScope::SenderAndRecipient`].
pub fn check_recipient(state: &LedgerState, rules: &Rules, recipient: Address) -> Result<()> {
    if rules.freeze_scope == FreezeScope::SenderAndRecipient && state.is_frozen(recipient) {
        return Err(LedgerError::AccountFrozen(recipient));
    }
    Ok(())
}
