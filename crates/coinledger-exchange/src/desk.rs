//! ExchangeDesk: buy and sell tokens against the ledger's reserves.
//!
//! Tokens are sold from, and bought back into, the deployment's reserve
//! account, or the current owner when none is configured. Native currency
//! accumulates in `MarketState::native_reserve`.
//!
//! Every call that sends native currency out follows the same order:
//!
//! ```text
//! checks ─► ledger effects (tokens, reserve, events) ─► PayoutSink::pay
//! ```
//!
//! The sink runs last, inside the same transaction, so a sink failure still
//! rolls back everything.

use coinledger_core::{LedgerState, Rules, TokenLedger, Transaction, access, ledger};
use coinledger_types::{
    Address, Amount, Capabilities, LedgerError, LedgerEvent, MarketState, PriceRule, PricingMode,
    Result, checked_add, checked_mul,
};

use crate::{payout::PayoutSink, sale::SaleController};

/// Owner-priced market on top of a deployed token.
#[derive(Debug, Clone)]
pub struct ExchangeDesk {
    ledger: TokenLedger,
}

impl ExchangeDesk {
    #[must_use]
    pub fn new(ledger: TokenLedger) -> Self {
        Self { ledger }
    }

    #[must_use]
    pub fn ledger(&self) -> &TokenLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut TokenLedger {
        &mut self.ledger
    }

    /// The presale lifecycle of the underlying token.
    pub fn sale(&mut self) -> SaleController<'_> {
        SaleController::new(&mut self.ledger)
    }

    #[must_use]
    pub fn market(&self) -> &MarketState {
        self.ledger.state().market()
    }

    /// Tokens a `buy` carrying `value` would currently yield.
    pub fn quote_buy(&self, value: Amount) -> Result<Amount> {
        tokens_for(self.ledger.rules(), self.market(), value)
    }

    // =================================================================
    // Pricing (capability PRICING)
    // =================================================================

    /// Set the per-token sell and buy prices.
    ///
    /// # Errors
    /// `Unauthorized` without [`Capabilities::PRICING`]; `InvalidPriceConfig`
    /// if the deployment forbids a sell price above a non-zero buy price.
    pub fn set_prices(&mut self, caller: Address, sell_price: Amount, buy_price: Amount) -> Result<()> {
        self.ledger.execute("set_prices", (), |tx, rules| {
            access::ensure_capability(tx, caller, Capabilities::PRICING, "set prices")?;
            if rules.price_rule == PriceRule::SellNotAboveBuy
                && !buy_price.is_zero()
                && sell_price > buy_price
            {
                return Err(LedgerError::InvalidPriceConfig {
                    reason: format!("sell price {sell_price} exceeds buy price {buy_price}"),
                });
            }
            let mut market = tx.market().clone();
            market.sell_price = sell_price;
            market.buy_price = buy_price;
            tx.set_market(market);
            tx.emit(LedgerEvent::PricesUpdated {
                sell_price,
                buy_price,
            });
            tracing::info!(%sell_price, %buy_price, "Prices updated");
            Ok(())
        })
    }

    /// Set the tokens-per-native-unit multiplier used by `Rate` pricing.
    pub fn set_buy_rate(&mut self, caller: Address, rate: Amount) -> Result<()> {
        self.ledger.execute("set_buy_rate", (), |tx, _| {
            access::ensure_capability(tx, caller, Capabilities::PRICING, "set buy rate")?;
            let mut market = tx.market().clone();
            market.buy_rate = rate;
            tx.set_market(market);
            tx.emit(LedgerEvent::BuyRateUpdated { rate });
            tracing::info!(%rate, "Buy rate updated");
            Ok(())
        })
    }

    /// Open or close the desk to buyers.
    pub fn set_selling(&mut self, caller: Address, enabled: bool) -> Result<()> {
        self.ledger.execute("set_selling", (), |tx, _| {
            access::ensure_capability(tx, caller, Capabilities::PRICING, "toggle selling")?;
            let mut market = tx.market().clone();
            market.selling_enabled = enabled;
            tx.set_market(market);
            tx.emit(LedgerEvent::SellingChanged { enabled });
            tracing::info!(enabled, "Desk selling toggled");
            Ok(())
        })
    }

    // =================================================================
    // Trading
    // =================================================================

    /// Native currency sent to the ledger without buying anything.
    pub fn deposit_native(&mut self, from: Address, value: Amount) -> Result<()> {
        self.ledger.execute("deposit_native", (), |tx, _| {
            receive(tx, from, value)
        })
    }

    /// `caller` pays `value` native currency for tokens from the reserve.
    ///
    /// Returns the number of tokens bought.
    ///
    /// # Errors
    /// `SellingDisabled`, `InvalidStateTransition` while a presale is paused
    /// or finished, `InvalidPriceConfig` with no price set,
    /// `InsufficientReserve` if the reserve account holds too few tokens.
    pub fn buy(&mut self, caller: Address, value: Amount) -> Result<Amount> {
        self.ledger.execute("buy", Amount::ZERO, |tx, rules| {
            if !tx.market().selling_enabled {
                return Err(LedgerError::SellingDisabled);
            }
            let phase = tx.sale_phase();
            if !phase.allows_buying() {
                return Err(LedgerError::InvalidStateTransition {
                    from: phase,
                    action: "buy",
                });
            }
            let tokens = tokens_for(rules, tx.market(), value)?;
            let reserve = rules.reserve(tx);
            let available = tx.balance_of(reserve);
            if available < tokens {
                return Err(LedgerError::InsufficientReserve {
                    needed: tokens,
                    available,
                });
            }
            receive(tx, caller, value)?;
            ledger::transfer(tx, rules, reserve, caller, tokens)?;
            Ok(tokens)
        })
    }

    /// `caller` sells `amount` tokens back for native currency.
    ///
    /// Returns the native currency paid out.
    ///
    /// # Errors
    /// `InvalidPriceConfig` with no sell price, `InsufficientBalance`,
    /// `InsufficientReserve` if the native reserve cannot cover the payout,
    /// or whatever the sink reports.
    pub fn sell(
        &mut self,
        caller: Address,
        amount: Amount,
        sink: &mut impl PayoutSink,
    ) -> Result<Amount> {
        self.ledger.execute("sell", Amount::ZERO, |tx, rules| {
            let price = tx.market().sell_price;
            if price.is_zero() {
                return Err(LedgerError::InvalidPriceConfig {
                    reason: "sell price is not set".into(),
                });
            }
            let revenue = checked_mul(amount, price, "sell")?;
            let reserve = rules.reserve(tx);
            ledger::transfer(tx, rules, caller, reserve, amount)?;
            pay_out(tx, caller, revenue, sink)?;
            Ok(revenue)
        })
    }

    /// Send `amount` of the native reserve to the owner. Owner-only.
    pub fn withdraw_to_owner(
        &mut self,
        caller: Address,
        amount: Amount,
        sink: &mut impl PayoutSink,
    ) -> Result<()> {
        self.ledger.execute("withdraw_to_owner", (), |tx, _| {
            access::ensure_owner(tx, caller, "withdraw the reserve")?;
            pay_out(tx, caller, amount, sink)?;
            tracing::info!(owner = %caller, %amount, "Reserve withdrawn");
            Ok(())
        })
    }
}

fn tokens_for(rules: &Rules, market: &MarketState, value: Amount) -> Result<Amount> {
    match rules.pricing {
        PricingMode::PerToken => {
            if market.buy_price.is_zero() {
                return Err(LedgerError::InvalidPriceConfig {
                    reason: "buy price is not set".into(),
                });
            }
            Ok(value / market.buy_price)
        }
        PricingMode::Rate => {
            if market.buy_rate.is_zero() {
                return Err(LedgerError::InvalidPriceConfig {
                    reason: "buy rate is not set".into(),
                });
            }
            checked_mul(value, market.buy_rate, "buy")
        }
    }
}

fn receive(tx: &mut Transaction<'_>, from: Address, value: Amount) -> Result<()> {
    let mut market = tx.market().clone();
    market.native_reserve = checked_add(market.native_reserve, value, "native reserve")?;
    tx.set_market(market);
    tx.emit(LedgerEvent::NativeReceived {
        from,
        amount: value,
    });
    Ok(())
}

/// Debit the native reserve, then hand the currency to `sink`.
fn pay_out(
    tx: &mut Transaction<'_>,
    to: Address,
    amount: Amount,
    sink: &mut impl PayoutSink,
) -> Result<()> {
    let mut market = tx.market().clone();
    let available = market.native_reserve;
    market.native_reserve = available
        .checked_sub(amount)
        .ok_or(LedgerError::InsufficientReserve {
            needed: amount,
            available,
        })?;
    tx.set_market(market);
    tx.emit(LedgerEvent::NativePaid { to, amount });

    let view: &LedgerState = tx;
    sink.pay(to, amount, view)
}
