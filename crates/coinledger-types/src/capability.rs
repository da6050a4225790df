//! Capability bitmask for delegated administration.
//!
//! The owner implicitly holds every capability. Other accounts receive a
//! subset through the admin mapping (address → [`Capabilities`]), so a
//! variant that only lets a compliance officer freeze accounts grants
//! [`Capabilities::FREEZE`] and nothing else.

use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

/// A set of privileges, stored as a bitmask.
///
/// Serialized as the raw integer. Unknown bits are dropped on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Capabilities(u32);

impl Capabilities {
    /// No privileges.
    pub const NONE: Self = Self(0);
    /// May freeze and unfreeze individual accounts.
    pub const FREEZE: Self = Self(1 << 0);
    /// May mint new supply.
    pub const MINT: Self = Self(1 << 1);
    /// May change exchange prices, the buy rate, and the selling toggle.
    pub const PRICING: Self = Self(1 << 2);
    /// May lock or unlock all transfers token-wide.
    pub const LOCK: Self = Self(1 << 3);
    /// May drive the presale state machine.
    pub const SALE: Self = Self(1 << 4);
    /// Every capability.
    pub const ALL: Self = Self(0b1_1111);

    /// Build from raw bits, discarding unknown bits.
    #[must_use]
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::ALL.0)
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// `true` if every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for Capabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl From<u32> for Capabilities {
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl From<Capabilities> for u32 {
    fn from(capabilities: Capabilities) -> Self {
        capabilities.bits()
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#07b}", self.0)
    }
}
