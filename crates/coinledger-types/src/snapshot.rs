//! Persisted-state records.
//!
//! A [`LedgerSnapshot`] is the full durable state of one ledger instance:
//! everything a later call may observe. Records are kept sorted by key so
//! the JSON encoding is canonical and hashable.

use serde::{Deserialize, Serialize};

use crate::{Address, Amount, Capabilities, MarketState, SalePhase};

/// Balance and freeze flag of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub address: Address,
    pub balance: Amount,
    pub frozen: bool,
}

/// One `(owner, spender)` allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceRecord {
    pub owner: Address,
    pub spender: Address,
    pub amount: Amount,
}

/// One entry of the admin mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRecord {
    pub admin: Address,
    pub capabilities: Capabilities,
}

/// Complete persisted ledger state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub owner: Address,
    pub total_supply: Amount,
    pub accounts: Vec<AccountRecord>,
    pub allowances: Vec<AllowanceRecord>,
    pub admins: Vec<AdminRecord>,
    pub transfers_locked: bool,
    pub market: MarketState,
    pub sale: SalePhase,
}

impl LedgerSnapshot {
    /// Canonical JSON encoding.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sum of all recorded balances, or `None` on overflow.
    #[must_use]
    pub fn balance_sum(&self) -> Option<Amount> {
        self.accounts
            .iter()
            .try_fold(Amount::ZERO, |acc, record| acc.checked_add(record.balance))
    }
}
