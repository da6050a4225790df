//! `TokenLedger`: the deployed token as an explicit context object.
//!
//! Every public operation is a closure run by [`TokenLedger::execute`]
//! inside one [`Transaction`]. Success commits the writes and appends the
//! call's events to the log; any error rolls the call back completely and
//! is then handed to the deployment's [`FailureMode`].

use coinledger_types::{
    Address, Amount, Capabilities, FailureMode, LedgerError, LedgerEvent, LedgerSnapshot, Result,
    TokenConfig, TokenMetadata, is_zero_address, units,
};

use crate::{
    access, allowance, failure::FailureStrategy, freeze, invariants, journal::Transaction, ledger,
    rules::Rules, state::LedgerState, supply,
};

/// A deployed token: metadata, rules, state, and the event log.
#[derive(Debug, Clone)]
pub struct TokenLedger {
    metadata: TokenMetadata,
    rules: Rules,
    failure_mode: FailureMode,
    state: LedgerState,
    events: Vec<LedgerEvent>,
}

impl TokenLedger {
    /// Deploy a token owned by `deployer`.
    ///
    /// The initial supply is credited to `config.initial_holder`, or the
    /// deployer when unset, and announced as a mint.
    ///
    /// # Errors
    /// `Configuration` if the config is invalid or the deployer or initial
    /// holder is the zero address.
    pub fn deploy(config: &TokenConfig, deployer: Address) -> Result<Self> {
        config.validate()?;
        if is_zero_address(&deployer) {
            return Err(LedgerError::Configuration(
                "deployer cannot be the zero address".into(),
            ));
        }
        let holder = config.initial_holder.unwrap_or(deployer);
        if is_zero_address(&holder) {
            return Err(LedgerError::Configuration(
                "initial holder cannot be the zero address".into(),
            ));
        }

        let mut state = LedgerState::new(deployer);
        let events = {
            let mut tx = Transaction::begin(&mut state);
            if !config.initial_supply.is_zero() {
                ledger::mint(&mut tx, holder, config.initial_supply)?;
            }
            if config.transfers_locked {
                tx.set_transfers_locked(true);
            }
            let mut market = tx.market().clone();
            market.selling_enabled = config.selling_enabled;
            tx.set_market(market);
            tx.commit()
        };

        tracing::info!(
            symbol = %config.symbol,
            owner = %deployer,
            supply = %units::format_units(config.initial_supply, config.decimals)?,
            failure_mode = %config.failure_mode,
            "Token deployed"
        );

        Ok(Self {
            metadata: config.metadata(),
            rules: Rules::from_config(config),
            failure_mode: config.failure_mode,
            state,
            events,
        })
    }

    /// Rebuild a token from persisted state.
    ///
    /// # Errors
    /// `Configuration` for an invalid config, `SupplyInvariantViolation` or
    /// `Serialization` for an inconsistent snapshot.
    pub fn restore(config: &TokenConfig, snapshot: &LedgerSnapshot) -> Result<Self> {
        config.validate()?;
        let state = LedgerState::from_snapshot(snapshot)?;
        tracing::info!(
            symbol = %config.symbol,
            owner = %state.owner(),
            accounts = state.account_count(),
            "Token restored from snapshot"
        );
        Ok(Self {
            metadata: config.metadata(),
            rules: Rules::from_config(config),
            failure_mode: config.failure_mode,
            state,
            events: Vec::new(),
        })
    }

    // =================================================================
    // Views
    // =================================================================

    #[must_use]
    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    #[must_use]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    #[must_use]
    pub fn failure_mode(&self) -> FailureMode {
        self.failure_mode
    }

    #[must_use]
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.state.total_supply()
    }

    #[must_use]
    pub fn balance_of(&self, account: Address) -> Amount {
        self.state.balance_of(account)
    }

    #[must_use]
    pub fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.state.allowance(owner, spender)
    }

    #[must_use]
    pub fn is_frozen(&self, account: Address) -> bool {
        self.state.is_frozen(account)
    }

    #[must_use]
    pub fn owner(&self) -> Address {
        self.state.owner()
    }

    /// The append-only notification log.
    #[must_use]
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.state.snapshot()
    }

    /// See [`LedgerState::state_root`].
    pub fn state_root(&self) -> Result<[u8; 32]> {
        self.state.state_root()
    }

    // =================================================================
    // Call boundary
    // =================================================================

    /// Run `f` as one atomic call named `op`.
    ///
    /// `noop` is what a [`FailureMode::SilentNoop`] deployment returns when
    /// the call is rejected.
    pub fn execute<T>(
        &mut self,
        op: &'static str,
        noop: T,
        f: impl FnOnce(&mut Transaction<'_>, &Rules) -> Result<T>,
    ) -> Result<T> {
        let mut tx = Transaction::begin(&mut self.state);
        let outcome = f(&mut tx, &self.rules).and_then(|value| {
            if cfg!(debug_assertions) {
                invariants::verify_supply(&tx)?;
            }
            Ok(value)
        });

        match outcome {
            Ok(value) => {
                let events = tx.commit();
                tracing::debug!(op, events = events.len(), "Call committed");
                self.events.extend(events);
                Ok(value)
            }
            Err(err) => {
                tx.rollback();
                tracing::warn!(
                    op,
                    error = %err,
                    failure_mode = %self.failure_mode,
                    "Call rejected, state rolled back"
                );
                self.failure_mode.settle(op, Err(err), noop)
            }
        }
    }

    // =================================================================
    // AccountLedger / AllowanceTable
    // =================================================================

    pub fn transfer(&mut self, caller: Address, to: Address, amount: Amount) -> Result<bool> {
        self.execute("transfer", false, |tx, rules| {
            ledger::transfer(tx, rules, caller, to, amount).map(|()| true)
        })
    }

    /// Overwrite `caller`'s allowance for `spender`. Never fails.
    pub fn approve(&mut self, caller: Address, spender: Address, amount: Amount) -> Result<bool> {
        self.execute("approve", false, |tx, _| {
            allowance::approve(tx, caller, spender, amount);
            Ok(true)
        })
    }

    pub fn increase_approval(
        &mut self,
        caller: Address,
        spender: Address,
        added: Amount,
    ) -> Result<bool> {
        self.execute("increase_approval", false, |tx, _| {
            allowance::increase(tx, caller, spender, added).map(|_| true)
        })
    }

    pub fn decrease_approval(
        &mut self,
        caller: Address,
        spender: Address,
        subtracted: Amount,
    ) -> Result<bool> {
        self.execute("decrease_approval", false, |tx, _| {
            allowance::decrease(tx, caller, spender, subtracted);
            Ok(true)
        })
    }

    pub fn transfer_from(
        &mut self,
        caller: Address,
        owner: Address,
        to: Address,
        amount: Amount,
    ) -> Result<bool> {
        self.execute("transfer_from", false, |tx, rules| {
            allowance::transfer_from(tx, rules, caller, owner, to, amount).map(|()| true)
        })
    }

    pub fn batch_transfer(
        &mut self,
        caller: Address,
        receivers: &[Address],
        amount: Amount,
    ) -> Result<bool> {
        self.execute("batch_transfer", false, |tx, rules| {
            ledger::batch_transfer(tx, rules, caller, receivers, amount).map(|_| true)
        })
    }

    pub fn distribute(&mut self, caller: Address, payouts: &[(Address, Amount)]) -> Result<bool> {
        self.execute("distribute", false, |tx, rules| {
            ledger::distribute(tx, rules, caller, payouts).map(|_| true)
        })
    }

    // =================================================================
    // SupplyController
    // =================================================================

    pub fn mint_token(&mut self, caller: Address, to: Address, amount: Amount) -> Result<()> {
        self.execute("mint_token", (), |tx, rules| {
            supply::mint_token(tx, rules, caller, to, amount)
        })
    }

    pub fn burn(&mut self, caller: Address, amount: Amount) -> Result<bool> {
        self.execute("burn", false, |tx, _| {
            supply::burn(tx, caller, amount).map(|()| true)
        })
    }

    pub fn burn_from(&mut self, caller: Address, owner: Address, amount: Amount) -> Result<bool> {
        self.execute("burn_from", false, |tx, _| {
            supply::burn_from(tx, caller, owner, amount).map(|()| true)
        })
    }

    // =================================================================
    // FreezeRegistry / AccessControl
    // =================================================================

    pub fn freeze_account(&mut self, caller: Address, target: Address, freeze: bool) -> Result<()> {
        self.execute("freeze_account", (), |tx, _| {
            freeze::freeze_account(tx, caller, target, freeze)
        })
    }

    pub fn set_transfer_lock(&mut self, caller: Address, locked: bool) -> Result<()> {
        self.execute("set_transfer_lock", (), |tx, _| {
            freeze::set_transfer_lock(tx, caller, locked)
        })
    }

    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> Result<()> {
        self.execute("transfer_ownership", (), |tx, _| {
            access::transfer_ownership(tx, caller, new_owner)
        })
    }

    pub fn grant_capabilities(
        &mut self,
        caller: Address,
        admin: Address,
        capabilities: Capabilities,
    ) -> Result<()> {
        self.execute("grant_capabilities", (), |tx, _| {
            access::grant(tx, caller, admin, capabilities).map(|_| ())
        })
    }

    pub fn revoke_capabilities(
        &mut self,
        caller: Address,
        admin: Address,
        capabilities: Capabilities,
    ) -> Result<()> {
        self.execute("revoke_capabilities", (), |tx, _| {
            access::revoke(tx, caller, admin, capabilities).map(|_| ())
        })
    }
}

#[cfg(test)]
mod tests {
    use coinledger_types::fixtures::{account, units};

    use super::*;

    fn deploy(mode: FailureMode) -> TokenLedger {
        let config = TokenConfig {
            initial_supply: units(1000),
            failure_mode: mode,
            ..TokenConfig::default()
        };
        TokenLedger::deploy(&config, account(1)).unwrap()
    }

    #[test]
    fn deploy_mints_to_deployer() {
        let ledger = deploy(FailureMode::Revert);
        assert_eq!(ledger.balance_of(account(1)), units(1000));
        assert_eq!(ledger.total_supply(), units(1000));
        assert_eq!(ledger.owner(), account(1));
        assert!(ledger.events()[0].is_mint());
        assert_eq!(ledger.metadata().decimals, 18);
    }

    #[test]
    fn deploy_rejects_zero_holder() {
        let config = TokenConfig {
            initial_holder: Some(Address::ZERO),
            ..TokenConfig::default()
        };
        assert!(matches!(
            TokenLedger::deploy(&config, account(1)),
            Err(LedgerError::Configuration(_))
        ));
    }

    #[test]
    fn rejected_call_leaves_no_trace() {
        let mut token = deploy(FailureMode::Revert);
        token.approve(account(3), account(2), units(10)).unwrap();
        let root = token.state_root().unwrap();
        let logged = token.events().len();

        // The allowance check passes and the balance debit fails.
        assert!(matches!(
            token.transfer_from(account(2), account(3), account(4), units(10)),
            Err(LedgerError::InsufficientBalance { .. })
        ));
        assert_eq!(token.state_root().unwrap(), root);
        assert_eq!(token.allowance(account(3), account(2)), units(10));
        assert_eq!(token.events().len(), logged);
    }

    #[test]
    fn silent_noop_returns_false() {
        let mut ledger = deploy(FailureMode::SilentNoop);
        let root = ledger.state_root().unwrap();
        assert!(!ledger.transfer(account(2), account(3), units(1)).unwrap());
        ledger.freeze_account(account(2), account(3), true).unwrap();
        assert_eq!(ledger.state_root().unwrap(), root);
        assert_eq!(ledger.events().len(), 1);
    }

    #[test]
    fn execute_exposes_custom_calls() {
        let mut token = deploy(FailureMode::Revert);
        let moved = token
            .execute("sweep", Amount::ZERO, |tx, rules| {
                let all = tx.balance_of(account(1));
                ledger::transfer(tx, rules, account(1), account(9), all)?;
                Ok(all)
            })
            .unwrap();
        assert_eq!(moved, units(1000));
        assert_eq!(token.balance_of(account(9)), units(1000));
    }
}
