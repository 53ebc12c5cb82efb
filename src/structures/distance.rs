//! Extended integer distances.
//!
//! Shortest-path tables and coin-count tables need a value for "unreachable".
//! [`Distance`] is an `i64` extended with +∞, ordered so that every finite
//! value is below infinity. It serializes as a JSON number, or `null` for ∞.

use serde::{Deserialize, Serialize};

/// Path length or cost that may be unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum Distance {
    /// Reachable at this cost.
    Finite(i64),
    /// Unreachable.
    Infinite,
}

impl Distance {
    /// Zero cost.
    pub const ZERO: Self = Self::Finite(0);

    /// Check if reachable.
    #[must_use]
    pub const fn is_finite(self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// Finite value, if any.
    #[must_use]
    pub const fn finite(self) -> Option<i64> {
        match self {
            Self::Finite(v) => Some(v),
            Self::Infinite => None,
        }
    }

    /// Extend by an edge weight. Infinity absorbs; finite sums saturate.
    #[must_use]
    pub const fn add_weight(self, weight: i64) -> Self {
        match self {
            Self::Finite(v) => Self::Finite(v.saturating_add(weight)),
            Self::Infinite => Self::Infinite,
        }
    }

    /// Sum of two distances; infinite if either side is.
    #[must_use]
    pub const fn plus(self, other: Self) -> Self {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => Self::Finite(a.saturating_add(b)),
            _ => Self::Infinite,
        }
    }

    /// Check if strictly negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        matches!(self, Self::Finite(v) if v < 0)
    }
}

impl Default for Distance {
    fn default() -> Self {
        Self::Infinite
    }
}

impl From<Option<i64>> for Distance {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Self::Infinite, Self::Finite)
    }
}

impl From<Distance> for Option<i64> {
    fn from(value: Distance) -> Self {
        value.finite()
    }
}

impl From<i64> for Distance {
    fn from(value: i64) -> Self {
        Self::Finite(value)
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finite(v) => write!(f, "{v}"),
            Self::Infinite => f.write_str("∞"),
        }
    }
}
