//! Deployment configuration for a token ledger.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Address, Amount, FailureMode, FreezeScope, LedgerError, PriceRule, PricingMode, Result,
    ZeroAddressPolicy, constants, is_zero_address, units,
};

/// Display metadata of a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Everything fixed at deployment time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Token name (e.g., "GoutexToken").
    pub name: String,
    /// Ticker symbol (e.g., "GTX").
    pub symbol: String,
    /// Fractional digits of one whole token.
    pub decimals: u8,
    /// Supply credited at genesis, in base units.
    pub initial_supply: Amount,
    /// Account credited with the initial supply. Defaults to the deployer.
    pub initial_holder: Option<Address>,
    /// Optional TOKEN_LIMIT: hard ceiling on total supply.
    pub token_limit: Option<Amount>,
    /// Revert vs. silent no-op on failed preconditions.
    pub failure_mode: FailureMode,
    /// Treatment of transfers to the zero address.
    pub zero_address: ZeroAddressPolicy,
    /// Whether a freeze also blocks receiving.
    pub freeze_scope: FreezeScope,
    /// Start with all transfers locked token-wide.
    pub transfers_locked: bool,
    /// Account whose tokens the exchange desk sells and buys back.
    /// Defaults to the owner.
    pub reserve_account: Option<Address>,
    /// Native-currency to token conversion used by `buy`.
    pub pricing: PricingMode,
    /// Consistency rule enforced by `set_prices`.
    pub price_rule: PriceRule,
    /// Whether `buy` starts open.
    pub selling_enabled: bool,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: constants::DEFAULT_NAME.to_string(),
            symbol: constants::DEFAULT_SYMBOL.to_string(),
            decimals: constants::DEFAULT_DECIMALS,
            initial_supply: Amount::ZERO,
            initial_holder: None,
            token_limit: None,
            failure_mode: FailureMode::default(),
            zero_address: ZeroAddressPolicy::default(),
            freeze_scope: FreezeScope::default(),
            transfers_locked: false,
            reserve_account: None,
            pricing: PricingMode::default(),
            price_rule: PriceRule::default(),
            selling_enabled: true,
        }
    }
}

impl TokenConfig {
    /// A config with the given metadata and an initial supply expressed in
    /// whole tokens (e.g., `"1000"`).
    pub fn with_supply(name: &str, symbol: &str, decimals: u8, whole_supply: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals,
            initial_supply: units::parse_units(whole_supply, decimals)?,
            ..Self::default()
        })
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| LedgerError::Configuration(format!("invalid token config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(LedgerError::Configuration("symbol must not be empty".into()));
        }
        if self.decimals > constants::MAX_DECIMALS {
            return Err(LedgerError::Configuration(format!(
                "decimals {} exceeds maximum {}",
                self.decimals,
                constants::MAX_DECIMALS
            )));
        }
        if self.reserve_account.is_some_and(|reserve| is_zero_address(&reserve)) {
            return Err(LedgerError::Configuration(
                "reserve account cannot be the zero address".into(),
            ));
        }
        if let Some(limit) = self.token_limit {
            if self.initial_supply > limit {
                return Err(LedgerError::Configuration(format!(
                    "initial supply {} exceeds token limit {limit}",
                    self.initial_supply
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn metadata(&self) -> TokenMetadata {
        TokenMetadata {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            decimals: self.decimals,
        }
    }
}
