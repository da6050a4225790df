//! Error types for the CoinLedger token engine.
//!
//! All errors use the `CL_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Balance / allowance errors
//! - 2xx: Access control errors
//! - 3xx: Freeze errors
//! - 4xx: Supply errors
//! - 5xx: Exchange errors
//! - 6xx: Destination / state machine / batch errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::{Address, Amount, SalePhase};

/// Central error enum for all CoinLedger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // =================================================================
    // Balance / Allowance Errors (1xx)
    // =================================================================
    /// The debited account holds less than the requested amount.
    #[error("CL_ERR_100: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    /// The spender's allowance is smaller than the requested amount.
    #[error("CL_ERR_101: Insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: Amount, available: Amount },

    /// A 256-bit computation would wrap.
    #[error("CL_ERR_102: Arithmetic overflow in {op}")]
    ArithmeticOverflow { op: &'static str },

    // =================================================================
    // Access Control Errors (2xx)
    // =================================================================
    /// The caller lacks the privilege the operation requires.
    #[error("CL_ERR_200: Unauthorized: {caller} may not {action}")]
    Unauthorized { caller: Address, action: &'static str },

    // =================================================================
    // Freeze Errors (3xx)
    // =================================================================
    /// The account is frozen by the FreezeRegistry.
    #[error("CL_ERR_300: Account frozen: {0}")]
    AccountFrozen(Address),

    /// All transfers are locked token-wide.
    #[error("CL_ERR_301: Transfers are locked")]
    TransfersLocked,

    // =================================================================
    // Supply Errors (4xx)
    // =================================================================
    /// Minting would push total supply above TOKEN_LIMIT.
    #[error("CL_ERR_400: Supply cap exceeded: minting {requested} onto {supply} exceeds limit {limit}")]
    SupplyCapExceeded {
        requested: Amount,
        supply: Amount,
        limit: Amount,
    },

    /// Σ balances no longer equals total supply. Critical.
    #[error("CL_ERR_401: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // Exchange Errors (5xx)
    // =================================================================
    /// Prices are unset or inconsistent under the configured rule.
    #[error("CL_ERR_500: Invalid price configuration: {reason}")]
    InvalidPriceConfig { reason: String },

    /// The desk's token or native-currency reserve cannot cover the request.
    #[error("CL_ERR_501: Insufficient reserve: need {needed}, have {available}")]
    InsufficientReserve { needed: Amount, available: Amount },

    /// The owner has closed the desk to buyers.
    #[error("CL_ERR_502: Selling is disabled")]
    SellingDisabled,

    /// The outgoing native-currency transfer was refused by the host.
    #[error("CL_ERR_503: Payout failed: {reason}")]
    PayoutFailed { reason: String },

    // =================================================================
    // Destination / State Machine / Batch Errors (6xx)
    // =================================================================
    /// The zero address is not an acceptable target.
    #[error("CL_ERR_600: Zero address target")]
    ZeroAddressTarget,

    /// A presale transition or operation is not valid in the current phase.
    #[error("CL_ERR_601: Invalid state transition: cannot {action} while {from}")]
    InvalidStateTransition { from: SalePhase, action: &'static str },

    /// A batch transfer was malformed (empty, too large, zero amount).
    #[error("CL_ERR_602: Invalid batch: {reason}")]
    InvalidBatch { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("CL_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("CL_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, bad values, etc.).
    #[error("CL_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error.
    #[error("CL_ERR_903: I/O error: {0}")]
    Io(String),
}

impl LedgerError {
    /// Errors that signal an engine bug rather than a rejected call.
    /// These are never swallowed by the silent-noop failure mode.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::SupplyInvariantViolation { .. } | Self::Internal(_)
        )
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, LedgerError>;

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;

    use super::*;

    #[test]
    fn insufficient_balance_display() {
        let err = LedgerError::InsufficientBalance {
            needed: U256::from(100u64),
            available: U256::from(50u64),
        };
        let msg = format!("{err}");
        assert!(msg.starts_with("CL_ERR_100"), "Got: {msg}");
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn invalid_state_transition_display() {
        let err = LedgerError::InvalidStateTransition {
            from: SalePhase::Finished,
            action: "resume",
        };
        let msg = format!("{err}");
        assert!(msg.contains("CL_ERR_601"));
        assert!(msg.contains("resume"));
        assert!(msg.contains("FINISHED"));
    }

    #[test]
    fn fatal_classification() {
        assert!(LedgerError::Internal("bug".into()).is_fatal());
        assert!(
            LedgerError::SupplyInvariantViolation {
                reason: "drift".into()
            }
            .is_fatal()
        );
        assert!(!LedgerError::TransfersLocked.is_fatal());
        assert!(!LedgerError::ZeroAddressTarget.is_fatal());
    }

    #[test]
    fn io_and_json_conversions() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(matches!(LedgerError::from(io), LedgerError::Io(_)));

        let json = serde_json::from_str::<u64>("not json").unwrap_err();
        assert!(matches!(LedgerError::from(json), LedgerError::Serialization(_)));
    }

    #[test]
    fn all_errors_have_cl_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(LedgerError::AccountFrozen(Address::ZERO)),
            Box::new(LedgerError::TransfersLocked),
            Box::new(LedgerError::ZeroAddressTarget),
            Box::new(LedgerError::SellingDisabled),
            Box::new(LedgerError::Unauthorized {
                caller: Address::ZERO,
                action: "mint",
            }),
            Box::new(LedgerError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("CL_ERR_"),
                "Error missing CL_ERR_ prefix: {msg}"
            );
        }
    }
}
