//! Deployment-wide rules threaded through every component.

use coinledger_types::{
    Address, Amount, FreezeScope, PriceRule, PricingMode, TokenConfig, ZeroAddressPolicy,
};

use crate::state::LedgerState;

/// The immutable part of a deployment: policies the components consult.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    pub zero_address: ZeroAddressPolicy,
    pub freeze_scope: FreezeScope,
    /// Optional TOKEN_LIMIT.
    pub token_limit: Option<Amount>,
    /// Dedicated reserve account. `None` means the current owner.
    pub reserve_account: Option<Address>,
    pub pricing: PricingMode,
    pub price_rule: PriceRule,
}

impl Rules {
    #[must_use]
    pub fn from_config(config: &TokenConfig) -> Self {
        Self {
            zero_address: config.zero_address,
            freeze_scope: config.freeze_scope,
            token_limit: config.token_limit,
            reserve_account: config.reserve_account,
            pricing: config.pricing,
            price_rule: config.price_rule,
        }
    }

    /// Token account the exchange desk sells from and buys back into.
    ///
    /// Resolved per call, so an unset reserve follows ownership transfers.
    #[must_use]
    pub fn reserve(&self, state: &LedgerState) -> Address {
        self.reserve_account.unwrap_or_else(|| state.owner())
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::from_config(&TokenConfig::default())
    }
}
