//! System-wide constants for the CoinLedger engine.

/// Default token name.
pub const DEFAULT_NAME: &str = "CoinLedger Token";

/// Default token symbol.
pub const DEFAULT_SYMBOL: &str = "CLT";

/// Default number of decimals (matches ether).
pub const DEFAULT_DECIMALS: u8 = 18;

/// Largest decimals value whose scale factor still fits in 256 bits.
pub const MAX_DECIMALS: u8 = 77;

/// Maximum number of receivers in a single batch transfer.
pub const MAX_BATCH_RECEIVERS: usize = 20;

/// Decimals of the native currency (wei per ether).
pub const NATIVE_DECIMALS: u8 = 18;

/// Domain tag hashed in front of the canonical state encoding.
pub const STATE_ROOT_DOMAIN: &[u8] = b"coinledger:state_root:v1:";
