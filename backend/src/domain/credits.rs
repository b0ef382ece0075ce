//! Credit balance value type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Non-negative number of generation credits.
///
/// Backed by an unsigned integer so a negative balance cannot be represented.
/// Debits go through [`Credits::debit_one`], which refuses to pass zero.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Credits(u32);

impl Credits {
    /// An empty balance.
    pub const ZERO: Self = Self(0);

    /// Wrap a raw balance.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Raw balance.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether no credits remain.
    #[must_use]
    pub const fn is_exhausted(self) -> bool {
        self.0 == 0
    }

    /// Balance after spending one credit, or `None` when already empty.
    #[must_use]
    pub fn debit_one(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }

    /// Balance after a top-up. Saturates rather than wrapping.
    #[must_use]
    pub const fn top_up(self, amount: u32) -> Self {
        Self(self.0.saturating_add(amount))
    }

    /// Label used next to the prompt box, e.g. `1 credit remaining`.
    pub fn remaining_label(self) -> String {
        format!("{self} remaining")
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 1 {
            write!(f, "1 credit")
        } else {
            write!(f, "{} credits", self.0)
        }
    }
}

impl From<u32> for Credits {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
