//! # coinledger-types
//!
//! Shared types, errors, and configuration for the **CoinLedger** token engine.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identity and amounts**: [`Address`], [`Amount`]
//! - **Privileges**: [`Capabilities`]
//! - **Per-deployment policies**: [`FailureMode`], [`ZeroAddressPolicy`],
//!   [`FreezeScope`], [`PricingMode`], [`PriceRule`]
//! - **Market and sale state**: [`MarketState`], [`SalePhase`]
//! - **Notifications**: [`LedgerEvent`]
//! - **Persistence records**: [`LedgerSnapshot`], [`AccountRecord`], [`AllowanceRecord`], [`AdminRecord`]
//! - **Configuration**: [`TokenConfig`], [`TokenMetadata`]
//! - **Errors**: [`LedgerError`] with `CL_ERR_` prefix codes
//! - **Units**: human-readable amount conversion in [`units`]

pub mod capability;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod market;
pub mod policy;
pub mod snapshot;
pub mod units;

#[cfg(any(test, feature = "test-helpers"))]
pub mod fixtures;

pub use capability::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use market::*;
pub use policy::*;
pub use snapshot::*;

// Constants and units are accessed via their module paths
// (`coinledger_types::constants::FOO`, `coinledger_types::units::parse_units`).
