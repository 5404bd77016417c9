//! Score balances and the rules for changing them.
//!
//! A balance never drops below zero. Every mutation, including redemption
//! debits, goes through [`ScoreAdjustment::apply`] so the floor is enforced in
//! one place; persistence adapters only lock, apply and store.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors raised when a raw value cannot be a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScoreValidationError {
    #[error("score must not be negative (got {0})")]
    Negative(i64),
}

/// Non-negative point balance.
///
/// # Examples
/// ```
/// use idea_platform::domain::Score;
///
/// assert_eq!(Score::floor(-5), Score::ZERO);
/// assert!(Score::try_new(-1).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(try_from = "i64", into = "i64")]
#[schema(value_type = i64, example = 70)]
pub struct Score(i64);

impl Score {
    pub const ZERO: Score = Score(0);

    /// Validate a stored or requested balance.
    pub fn try_new(raw: i64) -> Result<Self, ScoreValidationError> {
        if raw < 0 {
            return Err(ScoreValidationError::Negative(raw));
        }
        Ok(Self(raw))
    }

    /// Clamp `raw` to the floor.
    pub const fn floor(raw: i64) -> Self {
        if raw < 0 { Self(0) } else { Self(raw) }
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    /// Whether this balance can pay `cost` without going negative.
    pub const fn covers(self, cost: i64) -> bool {
        self.0 >= cost
    }
}

impl TryFrom<i64> for Score {
    type Error = ScoreValidationError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::try_new(raw)
    }
}

impl From<Score> for i64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single ledger mutation.
///
/// Negative inputs are accepted and clamped: `Add(-20)` on a balance of 10
/// yields 0, and `Subtract(-5)` credits five points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreAdjustment {
    Add(i64),
    Subtract(i64),
    Set(i64),
}

impl ScoreAdjustment {
    /// Compute the balance that results from applying this adjustment.
    pub const fn apply(self, current: Score) -> Score {
        match self {
            Self::Add(points) => Score::floor(current.0.saturating_add(points)),
            Self::Subtract(points) => Score::floor(current.0.saturating_sub(points)),
            Self::Set(value) => Score::floor(value),
        }
    }

    /// Short label used in logs.
    pub const fn kind(self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Subtract(_) => "subtract",
            Self::Set(_) => "set",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ScoreAdjustment::Add(5), 10, 15)]
    #[case(ScoreAdjustment::Add(-20), 10, 0)]
    #[case(ScoreAdjustment::Subtract(999), 10, 0)]
    #[case(ScoreAdjustment::Subtract(4), 10, 6)]
    #[case(ScoreAdjustment::Subtract(-5), 10, 15)]
    #[case(ScoreAdjustment::Set(50), 10, 50)]
    #[case(ScoreAdjustment::Set(-3), 10, 0)]
    #[case(ScoreAdjustment::Add(i64::MAX), 10, i64::MAX)]
    #[case(ScoreAdjustment::Subtract(i64::MIN), 10, i64::MAX)]
    fn apply_respects_floor(
        #[case] adjustment: ScoreAdjustment,
        #[case] current: i64,
        #[case] expected: i64,
    ) {
        let current = Score::try_new(current).expect("fixture balance is valid");
        assert_eq!(adjustment.apply(current).value(), expected);
    }

    #[rstest]
    fn set_is_idempotent() {
        let once = ScoreAdjustment::Set(50).apply(Score::floor(7));
        let twice = ScoreAdjustment::Set(50).apply(once);
        assert_eq!(once, twice);
        assert_eq!(twice.value(), 50);
    }

    #[rstest]
    fn no_sequence_of_debits_goes_negative() {
        let steps = [
            ScoreAdjustment::Subtract(3),
            ScoreAdjustment::Set(-10),
            ScoreAdjustment::Subtract(1),
            ScoreAdjustment::Add(-7),
            ScoreAdjustment::Subtract(i64::MAX),
        ];
        let final_score = steps
            .iter()
            .fold(Score::floor(5), |score, step| step.apply(score));
        assert_eq!(final_score, Score::ZERO);
    }

    #[rstest]
    fn rejects_negative_balances_on_deserialise() {
        assert!(serde_json::from_str::<Score>("-1").is_err());
        let score: Score = serde_json::from_str("12").expect("valid balance");
        assert_eq!(score.value(), 12);
    }

    #[rstest]
    #[case(20, 30, false)]
    #[case(30, 30, true)]
    #[case(100, 30, true)]
    fn covers_compares_against_cost(#[case] balance: i64, #[case] cost: i64, #[case] expected: bool) {
        assert_eq!(Score::floor(balance).covers(cost), expected);
    }
}
