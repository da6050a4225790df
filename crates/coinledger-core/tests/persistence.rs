//! Snapshot persistence: a token survives save/restore with the same
//! state root, and corrupt snapshots are refused.

use coinledger_core::TokenLedger;
use coinledger_types::fixtures::{account, units};
use coinledger_types::{LedgerError, LedgerSnapshot, TokenConfig};

fn busy_token() -> (TokenConfig, TokenLedger) {
    let config = TokenConfig {
        initial_supply: units(1000),
        ..TokenConfig::default()
    };
    let mut token = TokenLedger::deploy(&config, account(1)).unwrap();
    token.transfer(account(1), account(2), units(250)).unwrap();
    token.approve(account(2), account(3), units(40)).unwrap();
    token.freeze_account(account(1), account(4), true).unwrap();
    token.mint_token(account(1), account(5), units(5)).unwrap();
    (config, token)
}

#[test]
fn json_round_trip_preserves_state_root() {
    let (config, token) = busy_token();
    let json = token.snapshot().to_json().unwrap();
    let restored =
        TokenLedger::restore(&config, &LedgerSnapshot::from_json(&json).unwrap()).unwrap();

    assert_eq!(restored.state_root().unwrap(), token.state_root().unwrap());
    assert_eq!(restored.allowance(account(2), account(3)), units(40));
    assert!(restored.is_frozen(account(4)));
    assert!(restored.events().is_empty());
}

#[test]
fn restored_token_keeps_working() {
    let (config, token) = busy_token();
    let mut restored = TokenLedger::restore(&config, &token.snapshot()).unwrap();
    restored
        .transfer_from(account(3), account(2), account(6), units(40))
        .unwrap();
    assert_eq!(restored.balance_of(account(6)), units(40));
    assert_eq!(restored.total_supply(), units(1005));
}

#[test]
fn tampered_snapshot_is_refused() {
    let (config, token) = busy_token();
    let mut snapshot = token.snapshot();
    snapshot.accounts[0].balance += units(1);
    assert!(matches!(
        TokenLedger::restore(&config, &snapshot),
        Err(LedgerError::SupplyInvariantViolation { .. })
    ));
}
