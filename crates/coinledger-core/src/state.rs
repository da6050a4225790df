//! The ledger's complete in-memory state.
//!
//! `LedgerState` is only mutated through a [`Transaction`](crate::Transaction),
//! which journals every write so a failed call can be undone. Reads are
//! public and never fail: unseen accounts have a zero balance, unset
//! allowances are zero, and unknown admins hold no capabilities.

use std::collections::{BTreeMap, BTreeSet};

use coinledger_types::{
    AccountRecord, Address, AdminRecord, AllowanceRecord, Amount, Capabilities, LedgerError,
    LedgerSnapshot, MarketState, Result, SalePhase, constants,
};
use sha2::{Digest, Sha256};

use crate::invariants;

/// Balances, allowances, freezes, roles, market and sale state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerState {
    pub(crate) balances: BTreeMap<Address, Amount>,
    pub(crate) allowances: BTreeMap<(Address, Address), Amount>,
    pub(crate) frozen: BTreeSet<Address>,
    pub(crate) total_supply: Amount,
    pub(crate) owner: Address,
    pub(crate) admins: BTreeMap<Address, Capabilities>,
    pub(crate) transfers_locked: bool,
    pub(crate) market: MarketState,
    pub(crate) sale: SalePhase,
}

impl LedgerState {
    /// Empty state owned by `owner`.
    #[must_use]
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn balance_of(&self, account: Address) -> Amount {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_frozen(&self, account: Address) -> bool {
        self.frozen.contains(&account)
    }

    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Effective capabilities: everything for the owner, the admin mapping
    /// entry for anyone else.
    #[must_use]
    pub fn capabilities_of(&self, account: Address) -> Capabilities {
        if account == self.owner {
            Capabilities::ALL
        } else {
            self.admins.get(&account).copied().unwrap_or_default()
        }
    }

    #[must_use]
    pub fn transfers_locked(&self) -> bool {
        self.transfers_locked
    }

    #[must_use]
    pub fn market(&self) -> &MarketState {
        &self.market
    }

    #[must_use]
    pub fn sale_phase(&self) -> SalePhase {
        self.sale
    }

    /// Accounts that have ever been referenced (funded or frozen).
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.balances
            .keys()
            .chain(self.frozen.iter())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Iterate `(account, balance)` pairs in address order.
    pub fn balances(&self) -> impl Iterator<Item = (Address, Amount)> + '_ {
        self.balances.iter().map(|(a, b)| (*a, *b))
    }

    /// Canonical persisted form.
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        // Zero entries are indistinguishable from absent ones.
        let addresses: BTreeSet<Address> = self
            .balances
            .iter()
            .filter(|(_, balance)| !balance.is_zero())
            .map(|(address, _)| address)
            .chain(self.frozen.iter())
            .copied()
            .collect();
        LedgerSnapshot {
            owner: self.owner,
            total_supply: self.total_supply,
            accounts: addresses
                .into_iter()
                .map(|address| AccountRecord {
                    address,
                    balance: self.balance_of(address),
                    frozen: self.is_frozen(address),
                })
                .collect(),
            allowances: self
                .allowances
                .iter()
                .filter(|(_, amount)| !amount.is_zero())
                .map(|((owner, spender), amount)| AllowanceRecord {
                    owner: *owner,
                    spender: *spender,
                    amount: *amount,
                })
                .collect(),
            admins: self
                .admins
                .iter()
                .map(|(admin, capabilities)| AdminRecord {
                    admin: *admin,
                    capabilities: *capabilities,
                })
                .collect(),
            transfers_locked: self.transfers_locked,
            market: self.market.clone(),
            sale: self.sale,
        }
    }

    /// Rebuild state from a snapshot, refusing one whose balances do not sum
    /// to its total supply.
    ///
    /// # Errors
    /// - `Serialization` on duplicate records
    /// - `SupplyInvariantViolation` if Σ balances ≠ total supply
    pub fn from_snapshot(snapshot: &LedgerSnapshot) -> Result<Self> {
        let mut state = Self::new(snapshot.owner);
        for record in &snapshot.accounts {
            if state.balances.insert(record.address, record.balance).is_some() {
                return Err(LedgerError::Serialization(format!(
                    "duplicate account record {}",
                    record.address
                )));
            }
            if record.frozen {
                state.frozen.insert(record.address);
            }
        }
        for record in &snapshot.allowances {
            if state
                .allowances
                .insert((record.owner, record.spender), record.amount)
                .is_some()
            {
                return Err(LedgerError::Serialization(format!(
                    "duplicate allowance record {} -> {}",
                    record.owner, record.spender
                )));
            }
        }
        for record in &snapshot.admins {
            if !record.capabilities.is_empty() {
                state.admins.insert(record.admin, record.capabilities);
            }
        }
        state.total_supply = snapshot.total_supply;
        state.transfers_locked = snapshot.transfers_locked;
        state.market = snapshot.market.clone();
        state.sale = snapshot.sale;

        invariants::verify_supply(&state)?;
        Ok(state)
    }

    /// SHA-256 over the canonical JSON snapshot.
    ///
    /// Two states have the same root iff they are observably identical.
    pub fn state_root(&self) -> Result<[u8; 32]> {
        let encoded = serde_json::to_vec(&self.snapshot())?;
        let mut hasher = Sha256::new();
        hasher.update(constants::STATE_ROOT_DOMAIN);
        hasher.update(&encoded);
        let digest = hasher.finalize();
        let mut root = [0u8; 32];
        root.copy_from_slice(&digest);
        Ok(root)
    }

    /// Hex rendering of [`state_root`](Self::state_root).
    pub fn state_root_hex(&self) -> Result<String> {
        Ok(hex::encode(self.state_root()?))
    }
}
