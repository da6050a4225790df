//! Per-deployment behavioural switches.
//!
//! Deployed token variants disagree on a handful of semantics. Each
//! disagreement is a construction-time policy here, fixed for the lifetime
//! of a ledger instance.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a failing precondition surfaces to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Abort the call, roll back every effect, and return the error.
    #[default]
    Revert,
    /// Roll back every effect and return a falsy/empty result without error.
    SilentNoop,
}

impl fmt::Display for FailureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Revert => write!(f, "REVERT"),
            Self::SilentNoop => write!(f, "SILENT_NOOP"),
        }
    }
}

/// What happens when the zero address is the destination of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroAddressPolicy {
    /// Reject with `ZeroAddressTarget`.
    #[default]
    Reject,
    /// Treat as an implicit burn: debit the sender and shrink total supply.
    Burn,
    /// Credit the zero address like any other account.
    Credit,
}

/// Which side of a transfer the per-account freeze applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreezeScope {
    /// A frozen account cannot send; receiving is unaffected.
    #[default]
    SenderOnly,
    /// A frozen account can neither send nor receive.
    SenderAndRecipient,
}

/// How the exchange desk converts native currency into tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// `tokens = floor(value / buy_price)`, `revenue = amount * sell_price`.
    #[default]
    PerToken,
    /// `tokens = value * buy_rate`, `revenue = amount * sell_price`.
    Rate,
}

/// Consistency rule applied by `set_prices`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceRule {
    /// Accept any pair of prices.
    Unchecked,
    /// Reject `sell > buy` whenever buying is enabled (`buy > 0`).
    #[default]
    SellNotAboveBuy,
}
