//! Journaled transactions: per-call atomicity.
//!
//! Every write made during a call goes through a [`Transaction`], which
//! records the slot's previous value before overwriting it and buffers the
//! events the call emits. [`Transaction::commit`] discards the undo log and
//! hands the events back; dropping an uncommitted transaction replays the
//! undo log in reverse, restoring the exact pre-call state.
//!
//! ```text
//! begin ─► write* ─► commit   → effects kept, events published
//!                 └► drop     → effects undone, events discarded
//! ```

use std::ops::Deref;

use coinledger_types::{Address, Amount, Capabilities, LedgerEvent, MarketState, SalePhase};

use crate::state::LedgerState;

/// Previous value of one mutated slot.
#[derive(Debug)]
enum Undo {
    Balance(Address, Option<Amount>),
    Allowance(Address, Address, Option<Amount>),
    Frozen(Address, bool),
    TotalSupply(Amount),
    Owner(Address),
    Admin(Address, Option<Capabilities>),
    TransfersLocked(bool),
    Market(MarketState),
    Sale(SalePhase),
}

/// An open, all-or-nothing unit of work over a [`LedgerState`].
///
/// Dereferences to the state for reads, so anything handed `&*tx` observes
/// the writes made so far.
///
/// Balance, supply, allowance and role slots can only be written by this
/// crate's components, which keep `Σ balance == total_supply`. Other crates
/// go through those components and may only touch market and sale state
/// directly:
///
/// ```compile_fail
/// use coinledger_core::{LedgerState, Transaction};
/// use coinledger_types::{Address, U256};
///
/// let mut state = LedgerState::new(Address::with_last_byte(1));
/// let mut tx = Transaction::begin(&mut state);
/// tx.set_balance(Address::with_last_byte(2), U256::from(1u64));
/// ```
pub struct Transaction<'a> {
    state: &'a mut LedgerState,
    undo: Vec<Undo>,
    events: Vec<LedgerEvent>,
    committed: bool,
}

impl<'a> Transaction<'a> {
    /// Open a transaction over `state`.
    pub fn begin(state: &'a mut LedgerState) -> Self {
        Self {
            state,
            undo: Vec::new(),
            events: Vec::new(),
            committed: false,
        }
    }

    /// Read view of the state including this transaction's writes.
    #[must_use]
    pub fn view(&self) -> &LedgerState {
        &*self.state
    }

    pub(crate) fn set_balance(&mut self, account: Address, amount: Amount) {
        let previous = self.state.balances.insert(account, amount);
        self.undo.push(Undo::Balance(account, previous));
    }

    pub(crate) fn set_allowance(&mut self, owner: Address, spender: Address, amount: Amount) {
        let previous = self.state.allowances.insert((owner, spender), amount);
        self.undo.push(Undo::Allowance(owner, spender, previous));
    }

    pub(crate) fn set_frozen(&mut self, account: Address, frozen: bool) {
        let previous = if frozen {
            !self.state.frozen.insert(account)
        } else {
            self.state.frozen.remove(&account)
        };
        self.undo.push(Undo::Frozen(account, previous));
    }

    pub(crate) fn set_total_supply(&mut self, amount: Amount) {
        let previous = std::mem::replace(&mut self.state.total_supply, amount);
        self.undo.push(Undo::TotalSupply(previous));
    }

    pub(crate) fn set_owner(&mut self, owner: Address) {
        let previous = std::mem::replace(&mut self.state.owner, owner);
        self.undo.push(Undo::Owner(previous));
    }

    /// Replace an admin's capability set. An empty set removes the entry.
    pub(crate) fn set_capabilities(&mut self, admin: Address, capabilities: Capabilities) {
        let previous = if capabilities.is_empty() {
            self.state.admins.remove(&admin)
        } else {
            self.state.admins.insert(admin, capabilities)
        };
        self.undo.push(Undo::Admin(admin, previous));
    }

    pub(crate) fn set_transfers_locked(&mut self, locked: bool) {
        let previous = std::mem::replace(&mut self.state.transfers_locked, locked);
        self.undo.push(Undo::TransfersLocked(previous));
    }

    pub fn set_market(&mut self, market: MarketState) {
        let previous = std::mem::replace(&mut self.state.market, market);
        self.undo.push(Undo::Market(previous));
    }

    pub fn set_sale_phase(&mut self, phase: SalePhase) {
        let previous = std::mem::replace(&mut self.state.sale, phase);
        self.undo.push(Undo::Sale(previous));
    }

    /// Buffer an event; published only on commit.
    pub fn emit(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    /// Events emitted so far in this transaction.
    #[must_use]
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Number of journaled writes.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.undo.len()
    }

    /// Keep every write and return the buffered events.
    pub fn commit(mut self) -> Vec<LedgerEvent> {
        self.committed = true;
        self.undo.clear();
        std::mem::take(&mut self.events)
    }

    /// Undo every write. Equivalent to dropping the transaction.
    pub fn rollback(self) {}

    fn revert(&mut self) {
        while let Some(entry) = self.undo.pop() {
            match entry {
                Undo::Balance(account, previous) => match previous {
                    Some(amount) => {
                        self.state.balances.insert(account, amount);
                    }
                    None => {
                        self.state.balances.remove(&account);
                    }
                },
                Undo::Allowance(owner, spender, previous) => match previous {
                    Some(amount) => {
                        self.state.allowances.insert((owner, spender), amount);
                    }
                    None => {
                        self.state.allowances.remove(&(owner, spender));
                    }
                },
                Undo::Frozen(account, was_frozen) => {
                    if was_frozen {
                        self.state.frozen.insert(account);
                    } else {
                        self.state.frozen.remove(&account);
                    }
                }
                Undo::TotalSupply(amount) => self.state.total_supply = amount,
                Undo::Owner(owner) => self.state.owner = owner,
                Undo::Admin(admin, previous) => match previous {
                    Some(capabilities) => {
                        self.state.admins.insert(admin, capabilities);
                    }
                    None => {
                        self.state.admins.remove(&admin);
                    }
                },
                Undo::TransfersLocked(locked) => self.state.transfers_locked = locked,
                Undo::Market(market) => self.state.market = market,
                Undo::Sale(phase) => self.state.sale = phase,
            }
        }
        self.events.clear();
    }
}

impl Deref for Transaction<'_> {
    type Target = LedgerState;

    fn deref(&self) -> &LedgerState {
        &*self.state
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.revert();
        }
    }
}
