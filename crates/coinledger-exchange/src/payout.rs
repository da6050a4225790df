//! Outgoing native-currency transfers.

use std::collections::HashMap;

use coinledger_core::LedgerState;
use coinledger_types::{Address, Amount, LedgerError, Result, checked_add};

/// Receives native currency leaving the desk's reserve.
///
/// `view` is the ledger state with all of the calling operation's effects
/// already applied. A sink that calls back into the engine observes the
/// reserve as already debited. Returning an error rolls the whole call
/// back.
pub trait PayoutSink {
    fn pay(&mut self, to: Address, amount: Amount, view: &LedgerState) -> Result<()>;
}

/// In-memory native-currency wallets.
#[derive(Debug, Clone, Default)]
pub struct NativeBalances {
    balances: HashMap<Address, Amount>,
    payouts: Vec<(Address, Amount)>,
}

impl NativeBalances {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn balance_of(&self, account: Address) -> Amount {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    /// Fund a wallet.
    pub fn credit(&mut self, account: Address, amount: Amount) -> Result<()> {
        let updated = checked_add(self.balance_of(account), amount, "native credit")?;
        self.balances.insert(account, updated);
        Ok(())
    }

    /// Take `amount` out of a wallet, e.g. to attach it to a `buy`.
    pub fn spend(&mut self, account: Address, amount: Amount) -> Result<()> {
        let available = self.balance_of(account);
        let remaining = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                needed: amount,
                available,
            })?;
        self.balances.insert(account, remaining);
        Ok(())
    }

    /// Every payout received, in order.
    #[must_use]
    pub fn payouts(&self) -> &[(Address, Amount)] {
        &self.payouts
    }
}

impl PayoutSink for NativeBalances {
    fn pay(&mut self, to: Address, amount: Amount, _view: &LedgerState) -> Result<()> {
        self.credit(to, amount)?;
        self.payouts.push((to, amount));
        Ok(())
    }
}
