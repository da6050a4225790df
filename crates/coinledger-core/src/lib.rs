//! # coinledger-core
//!
//! The token ledger engine.
//!
//! ## Architecture
//!
//! ```text
//! call ─► TokenLedger::execute ─► Transaction::begin
//!            │
//!            ├─ access    (privilege check)
//!            ├─ freeze    (lock check)
//!            ├─ ledger    (balance mutation)
//!            ├─ allowance (delegated spend)
//!            └─ supply    (mint / burn, TOKEN_LIMIT)
//!            │
//!            ├─ Ok  ─► commit, events appended to the log
//!            └─ Err ─► undo log replayed, FailureMode decides the result
//! ```
//!
//! Components are free functions over a [`Transaction`]; they never touch
//! [`LedgerState`] directly, so every write is journaled and a rejected
//! call leaves the state byte-for-byte as it was.

pub mod access;
pub mod allowance;
pub mod engine;
pub mod failure;
pub mod freeze;
pub mod invariants;
pub mod journal;
pub mod ledger;
pub mod rules;
pub mod state;
pub mod supply;

pub use engine::TokenLedger;
pub use failure::FailureStrategy;
pub use journal::Transaction;
pub use rules::Rules;
pub use state::LedgerState;
