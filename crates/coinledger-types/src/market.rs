//! Exchange-desk market state and the presale lifecycle.
//!
//! A presale cycles through **CREATED → ACTIVE ⇄ PAUSED → FINISHED**.
//! FINISHED is terminal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Amount;

/// Prices, toggles and the native-currency reserve held by the desk.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarketState {
    /// Native currency paid out per token sold back to the desk.
    pub sell_price: Amount,
    /// Native currency charged per token bought (`PerToken` pricing).
    pub buy_price: Amount,
    /// Tokens issued per unit of native currency (`Rate` pricing).
    pub buy_rate: Amount,
    /// Whether `buy` is open.
    pub selling_enabled: bool,
    /// Native currency held by the ledger, funding `sell` payouts.
    pub native_reserve: Amount,
}

/// Lifecycle phase of a presale layered on the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SalePhase {
    /// Deployed, not yet started.
    #[default]
    Created,
    /// Accepting purchases.
    Active,
    /// Temporarily halted; may resume.
    Paused,
    /// Terminal. No sale operation is valid.
    Finished,
}

impl fmt::Display for SalePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "CREATED"),
            Self::Active => write!(f, "ACTIVE"),
            Self::Paused => write!(f, "PAUSED"),
            Self::Finished => write!(f, "FINISHED"),
        }
    }
}

impl SalePhase {
    /// Numeric code of the phase, as exposed by presale contracts.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Created => 0,
            Self::Active => 1,
            Self::Paused => 2,
            Self::Finished => 3,
        }
    }

    /// Whether the desk may sell tokens to buyers in this phase.
    #[must_use]
    pub fn allows_buying(self) -> bool {
        matches!(self, Self::Created | Self::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sale_phase_display() {
        assert_eq!(format!("{}", SalePhase::Created), "CREATED");
        assert_eq!(format!("{}", SalePhase::Active), "ACTIVE");
        assert_eq!(format!("{}", SalePhase::Paused), "PAUSED");
        assert_eq!(format!("{}", SalePhase::Finished), "FINISHED");
    }

    #[test]
    fn buying_gate() {
        assert!(SalePhase::Created.allows_buying());
        assert!(SalePhase::Active.allows_buying());
        assert!(!SalePhase::Paused.allows_buying());
        assert!(!SalePhase::Finished.allows_buying());
    }

    #[test]
    fn market_state_default_is_closed_and_empty() {
        let market = MarketState::default();
        assert!(market.buy_price.is_zero());
        assert!(market.native_reserve.is_zero());
        assert!(!market.selling_enabled);
    }
}
