//! Presale lifecycle.
//!
//! ```text
//! CREATED ─start─► ACTIVE ─pause─► PAUSED
//!                    ▲                │
//!                    └─────resume─────┘
//! ACTIVE | PAUSED ─finish─► FINISHED
//! ```
//!
//! Transitions require [`Capabilities::SALE`]. FINISHED is terminal: every
//! transition and purchase fails with `InvalidStateTransition`, and the
//! desk stops selling.

use coinledger_core::{TokenLedger, access, supply};
use coinledger_types::{Address, Amount, Capabilities, LedgerError, LedgerEvent, Result, SalePhase};

/// Drives the sale phase of one token.
pub struct SaleController<'a> {
    ledger: &'a mut TokenLedger,
}

impl<'a> SaleController<'a> {
    pub fn new(ledger: &'a mut TokenLedger) -> Self {
        Self { ledger }
    }

    #[must_use]
    pub fn phase(&self) -> SalePhase {
        self.ledger.state().sale_phase()
    }

    pub fn start(&mut self, caller: Address) -> Result<()> {
        self.transition(caller, "start", &[SalePhase::Created], SalePhase::Active)
    }

    pub fn pause(&mut self, caller: Address) -> Result<()> {
        self.transition(caller, "pause", &[SalePhase::Active], SalePhase::Paused)
    }

    pub fn resume(&mut self, caller: Address) -> Result<()> {
        self.transition(caller, "resume", &[SalePhase::Paused], SalePhase::Active)
    }

    pub fn finish(&mut self, caller: Address) -> Result<()> {
        self.transition(
            caller,
            "finish",
            &[SalePhase::Active, SalePhase::Paused],
            SalePhase::Finished,
        )
    }

    /// `agent` mints `tokens` to `beneficiary` for an off-ledger payment.
    ///
    /// # Errors
    /// `InvalidStateTransition` unless the sale is ACTIVE, `Unauthorized`
    /// without [`Capabilities::MINT`], `SupplyCapExceeded` past TOKEN_LIMIT.
    pub fn purchase(&mut self, agent: Address, beneficiary: Address, tokens: Amount) -> Result<()> {
        self.ledger.execute("purchase", (), |tx, rules| {
            let phase = tx.sale_phase();
            if phase != SalePhase::Active {
                return Err(LedgerError::InvalidStateTransition {
                    from: phase,
                    action: "purchase",
                });
            }
            access::ensure_capability(tx, agent, Capabilities::MINT, "sell presale tokens")?;
            supply::issue(tx, rules, beneficiary, tokens)?;
            tracing::debug!(%agent, %beneficiary, %tokens, "Presale purchase");
            Ok(())
        })
    }

    fn transition(
        &mut self,
        caller: Address,
        action: &'static str,
        allowed: &[SalePhase],
        to: SalePhase,
    ) -> Result<()> {
        self.ledger.execute(action, (), |tx, _| {
            access::ensure_capability(tx, caller, Capabilities::SALE, action)?;
            let from = tx.sale_phase();
            if !allowed.contains(&from) {
                return Err(LedgerError::InvalidStateTransition { from, action });
            }
            tx.set_sale_phase(to);
            tx.emit(LedgerEvent::SalePhaseChanged { from, to });
            tracing::info!(%from, %to, code = to.code(), "Sale phase changed");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use coinledger_types::TokenConfig;
    use coinledger_types::fixtures::{account, units};

    use super::*;

    fn token() -> TokenLedger {
        TokenLedger::deploy(&TokenConfig::default(), account(1)).unwrap()
    }

    #[test]
    fn full_lifecycle() {
        let mut ledger = token();
        let mut sale = SaleController::new(&mut ledger);
        assert_eq!(sale.phase(), SalePhase::Created);
        sale.start(account(1)).unwrap();
        sale.pause(account(1)).unwrap();
        sale.resume(account(1)).unwrap();
        sale.pause(account(1)).unwrap();
        sale.finish(account(1)).unwrap();
        assert_eq!(sale.phase(), SalePhase::Finished);
        assert_eq!(sale.phase().code(), 3);
    }

    #[test]
    fn invalid_transitions() {
        let mut ledger = token();
        let mut sale = SaleController::new(&mut ledger);
        assert!(matches!(
            sale.pause(account(1)),
            Err(LedgerError::InvalidStateTransition { from: SalePhase::Created, action: "pause" })
        ));
        assert!(sale.finish(account(1)).is_err());
        sale.start(account(1)).unwrap();
        assert!(sale.start(account(1)).is_err());
        assert!(sale.resume(account(1)).is_err());
        sale.finish(account(1)).unwrap();
        for result in [
            sale.start(account(1)),
            sale.pause(account(1)),
            sale.resume(account(1)),
            sale.finish(account(1)),
        ] {
            assert!(matches!(
                result,
                Err(LedgerError::InvalidStateTransition { from: SalePhase::Finished, .. })
            ));
        }
    }

    #[test]
    fn transitions_need_sale_capability() {
        let mut ledger = token();
        let mut sale = SaleController::new(&mut ledger);
        assert!(matches!(
            sale.start(account(2)),
            Err(LedgerError::Unauthorized { .. })
        ));
        assert_eq!(sale.phase(), SalePhase::Created);
    }

    #[test]
    fn purchase_only_while_active() {
        let mut ledger = token();
        let mut sale = SaleController::new(&mut ledger);
        assert!(sale.purchase(account(1), account(3), units(5)).is_err());
        sale.start(account(1)).unwrap();
        sale.purchase(account(1), account(3), units(5)).unwrap();
        sale.pause(account(1)).unwrap();
        assert!(sale.purchase(account(1), account(3), units(5)).is_err());
        assert_eq!(ledger.balance_of(account(3)), units(5));
    }
}
