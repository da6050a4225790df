//! # coinledger-exchange
//!
//! Native-currency trading and presale orchestration for a deployed
//! [`TokenLedger`](coinledger_core::TokenLedger).
//!
//! - [`ExchangeDesk`]: owner-priced buy/sell against the ledger's token
//!   reserve and native-currency reserve, plus owner withdrawals.
//! - [`SaleController`]: the presale lifecycle
//!   (`CREATED → ACTIVE ⇄ PAUSED → FINISHED`) and agent purchases.
//! - [`PayoutSink`]: where outgoing native currency goes. It is invoked
//!   only after every ledger effect of the call has been applied.

pub mod desk;
pub mod payout;
pub mod sale;

pub use desk::ExchangeDesk;
pub use payout::{NativeBalances, PayoutSink};
pub use sale::SaleController;
