//! Notifications emitted by committed calls.
//!
//! The event log is append-only and never consulted by the engine itself.
//! Events emitted during a call that is later rolled back are discarded
//! together with the call's state changes.

use serde::{Deserialize, Serialize};

use crate::{Address, Amount, Capabilities, SalePhase};

/// A single ledger notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Tokens moved. `from == ZERO` marks a mint.
    Transfer {
        from: Address,
        to: Address,
        amount: Amount,
    },
    /// An allowance was set to `amount`.
    Approval {
        owner: Address,
        spender: Address,
        amount: Amount,
    },
    /// Tokens destroyed from `from`.
    Burn { from: Address, amount: Amount },
    /// An account's freeze flag was written.
    FrozenFunds { target: Address, frozen: bool },
    /// Ownership changed hands.
    OwnershipTransferred { previous: Address, new_owner: Address },
    /// An admin's capability set was replaced.
    CapabilitiesChanged {
        admin: Address,
        capabilities: Capabilities,
    },
    /// The token-wide transfer lock was written.
    TransferLockChanged { locked: bool },
    /// Exchange prices were updated.
    PricesUpdated { sell_price: Amount, buy_price: Amount },
    /// The `Rate` pricing multiplier was updated.
    BuyRateUpdated { rate: Amount },
    /// The desk was opened or closed to buyers.
    SellingChanged { enabled: bool },
    /// The presale moved between phases.
    SalePhaseChanged { from: SalePhase, to: SalePhase },
    /// Native currency entered the reserve.
    NativeReceived { from: Address, amount: Amount },
    /// Native currency left the reserve.
    NativePaid { to: Address, amount: Amount },
}

impl LedgerEvent {
    /// Short, stable event name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "Transfer",
            Self::Approval { .. } => "Approval",
            Self::Burn { .. } => "Burn",
            Self::FrozenFunds { .. } => "FrozenFunds",
            Self::OwnershipTransferred { .. } => "OwnershipTransferred",
            Self::CapabilitiesChanged { .. } => "CapabilitiesChanged",
            Self::TransferLockChanged { .. } => "TransferLockChanged",
            Self::PricesUpdated { .. } => "PricesUpdated",
            Self::BuyRateUpdated { .. } => "BuyRateUpdated",
            Self::SellingChanged { .. } => "SellingChanged",
            Self::SalePhaseChanged { .. } => "SalePhaseChanged",
            Self::NativeReceived { .. } => "NativeReceived",
            Self::NativePaid { .. } => "NativePaid",
        }
    }

    /// Whether this is a `Transfer` out of the zero address.
    #[must_use]
    pub fn is_mint(&self) -> bool {
        matches!(self, Self::Transfer { from, .. } if *from == Address::ZERO)
    }
}
