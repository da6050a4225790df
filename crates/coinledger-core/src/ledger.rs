//! AccountLedger: balances and the core transfer/mint/burn invariant.
//!
//! Every function here preserves `Σ balance == total_supply`. Transfers move
//! value between accounts; mint and burn adjust one balance and the total
//! supply by the same amount. Privilege checks live in the calling
//! component ([`supply`](crate::supply)), not here.

use coinledger_types::{
    Address, Amount, LedgerError, LedgerEvent, Result, ZeroAddressPolicy, checked_add,
    checked_mul, constants, is_zero_address,
};

use crate::{freeze, journal::Transaction, rules::Rules};

/// Decrease `account`'s balance.
///
/// # Errors
/// `InsufficientBalance` if the account holds less than `amount`.
pub fn debit(tx: &mut Transaction<'_>, account: Address, amount: Amount) -> Result<()> {
    let available = tx.balance_of(account);
    let remaining = available
        .checked_sub(amount)
        .ok_or(LedgerError::InsufficientBalance {
            needed: amount,
            available,
        })?;
    tx.set_balance(account, remaining);
    Ok(())
}

/// Increase `account`'s balance.
pub fn credit(tx: &mut Transaction<'_>, account: Address, amount: Amount) -> Result<()> {
    let updated = checked_add(tx.balance_of(account), amount, "credit")?;
    tx.set_balance(account, updated);
    Ok(())
}

/// Move `amount` from `from` to `to`, honouring freezes, the token-wide
/// lock, and the zero-address policy.
pub fn transfer(
    tx: &mut Transaction<'_>,
    rules: &Rules,
    from: Address,
    to: Address,
    amount: Amount,
) -> Result<()> {
    freeze::check_sender(tx, rules, from)?;
    if is_zero_address(&to) {
        match rules.zero_address {
            ZeroAddressPolicy::Reject => return Err(LedgerError::ZeroAddressTarget),
            ZeroAddressPolicy::Burn => return burn(tx, from, amount),
            ZeroAddressPolicy::Credit => {}
        }
    }
    freeze::check_recipient(tx, rules, to)?;
    debit(tx, from, amount)?;
    credit(tx, to, amount)?;
    tx.emit(LedgerEvent::Transfer { from, to, amount });
    Ok(())
}

/// Send the same `amount` to every receiver, all or nothing.
///
/// # Errors
/// `InvalidBatch` for an empty or oversized receiver list or a zero amount,
/// `ArithmeticOverflow` if `receivers × amount` does not fit 256 bits, and
/// any error [`transfer`] raises.
pub fn batch_transfer(
    tx: &mut Transaction<'_>,
    rules: &Rules,
    from: Address,
    receivers: &[Address],
    amount: Amount,
) -> Result<Amount> {
    check_batch_len(receivers.len())?;
    if amount.is_zero() {
        return Err(LedgerError::InvalidBatch {
            reason: "amount must be positive".into(),
        });
    }
    let total = checked_mul(amount, Amount::from(receivers.len()), "batch_transfer")?;
    ensure_covers(tx, from, total)?;
    for receiver in receivers {
        transfer(tx, rules, from, *receiver, amount)?;
    }
    Ok(total)
}

/// Send a distinct amount to each receiver, all or nothing.
pub fn distribute(
    tx: &mut Transaction<'_>,
    rules: &Rules,
    from: Address,
    payouts: &[(Address, Amount)],
) -> Result<Amount> {
    check_batch_len(payouts.len())?;
    let total = payouts
        .iter()
        .try_fold(Amount::ZERO, |acc, (_, amount)| checked_add(acc, *amount, "distribute"))?;
    ensure_covers(tx, from, total)?;
    for (receiver, amount) in payouts {
        transfer(tx, rules, from, *receiver, *amount)?;
    }
    Ok(total)
}

/// Create `amount` new tokens in `to`.
pub fn mint(tx: &mut Transaction<'_>, to: Address, amount: Amount) -> Result<()> {
    let supply = checked_add(tx.total_supply(), amount, "mint")?;
    credit(tx, to, amount)?;
    tx.set_total_supply(supply);
    tx.emit(LedgerEvent::Transfer {
        from: Address::ZERO,
        to,
        amount,
    });
    Ok(())
}

/// Destroy `amount` tokens held by `from`.
pub fn burn(tx: &mut Transaction<'_>, from: Address, amount: Amount) -> Result<()> {
    debit(tx, from, amount)?;
    let supply = tx
        .total_supply()
        .checked_sub(amount)
        .ok_or_else(|| LedgerError::Internal("burn exceeds total supply".into()))?;
    tx.set_total_supply(supply);
    tx.emit(LedgerEvent::Burn { from, amount });
    Ok(())
}

fn check_batch_len(len: usize) -> Result<()> {
    if len == 0 || len > constants::MAX_BATCH_RECEIVERS {
        return Err(LedgerError::InvalidBatch {
            reason: format!(
                "{len} receivers, expected 1..={}",
                constants::MAX_BATCH_RECEIVERS
            ),
        });
    }
    Ok(())
}

fn ensure_covers(tx: &Transaction<'_>, from: Address, total: Amount) -> Result<()> {
    let available = tx.balance_of(from);
    if available < total {
        return Err(LedgerError::InsufficientBalance {
            needed: total,
            available,
        });
    }
    Ok(())
}
