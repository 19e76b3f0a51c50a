//! Sparse numeric ranks for ordering tasks inside a bucket.
//!
//! New tasks receive `lowest + gap`, leaving room for later inserts between
//! existing ranks. When two neighbours are adjacent integers there is no room
//! left and the bucket has to be renumbered (see [`Position::nth`]).

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Distance left between consecutive ranks on allocation and rebalance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct RankGap(i64);

impl RankGap {
    /// Gap used when none is configured.
    pub const DEFAULT: Self = Self(1000);

    /// Creates a validated gap.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidRankGap`] when `value < 2`, since a
    /// smaller gap leaves no integer between neighbours.
    pub const fn new(value: i64) -> Result<Self, TaskDomainError> {
        if value < 2 {
            return Err(TaskDomainError::InvalidRankGap(value));
        }
        Ok(Self(value))
    }

    /// Returns the gap as an integer.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl Default for RankGap {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for RankGap {
    type Error = TaskDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RankGap> for i64 {
    fn from(gap: RankGap) -> Self {
        gap.0
    }
}

/// Rank of a task within its bucket. Lower ranks display first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(i64);

impl Position {
    /// Wraps a raw rank.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw rank.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Allocates the rank for a task entering a bucket.
    ///
    /// Returns `gap` when the bucket is empty, otherwise `lowest + gap`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PositionOverflow`] when `lowest + gap`
    /// exceeds `i64::MAX`.
    pub const fn after_lowest(lowest: Option<Self>, gap: RankGap) -> Result<Self, TaskDomainError> {
        let Some(Self(position)) = lowest else {
            return Ok(Self(gap.0));
        };
        match position.checked_add(gap.0) {
            Some(value) => Ok(Self(value)),
            None => Err(TaskDomainError::PositionOverflow {
                position,
                gap: gap.0,
            }),
        }
    }

    /// Returns a rank strictly between `lower` and `upper`.
    ///
    /// Returns `None` when `lower >= upper` or the two ranks are adjacent, in
    /// which case the bucket needs rebalancing before the insert.
    /// The midpoint is computed in `i128`, so ranks at opposite ends of the
    /// `i64` range still split.
    #[must_use]
    pub fn between(lower: Self, upper: Self) -> Option<Self> {
        let (low, high) = (i128::from(lower.0), i128::from(upper.0));
        let span = high - low;
        if span < 2 {
            return None;
        }
        i64::try_from(low + span.div_euclid(2)).ok().map(Self)
    }

    /// Returns the rank of the `index`-th task (zero based) after a bucket is
    /// renumbered: `(index + 1) * gap`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PositionOverflow`] when the product leaves
    /// the representable range.
    pub fn nth(index: usize, gap: RankGap) -> Result<Self, TaskDomainError> {
        let overflow = || TaskDomainError::PositionOverflow {
            position: i64::MAX,
            gap: gap.0,
        };
        let ordinal = index
            .checked_add(1)
            .and_then(|value| i64::try_from(value).ok())
            .ok_or_else(overflow)?;
        ordinal.checked_mul(gap.0).map(Self).ok_or_else(overflow)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
