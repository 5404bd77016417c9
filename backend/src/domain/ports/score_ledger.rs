//! Driving port for score ledger use-cases.
//!
//! `get_score` treats an unknown user as a zero balance while the mutating
//! operations report `not_found`; callers relying on either behaviour should
//! not assume the other.

use async_trait::async_trait;

use crate::domain::{Error, Score, UserId};

use super::ScoreEntry;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreLedger: Send + Sync {
    /// Current balance; `0` for an unknown user.
    async fn get_score(&self, user_id: UserId) -> Result<Score, Error>;

    /// Credit `points`, clamping at zero.
    async fn add_score(&self, user_id: UserId, points: i64) -> Result<Score, Error>;

    /// Debit `points`, clamping at zero.
    async fn subtract_score(&self, user_id: UserId, points: i64) -> Result<Score, Error>;

    /// Overwrite the balance, clamping at zero.
    async fn set_score(&self, user_id: UserId, new_score: i64) -> Result<Score, Error>;

    /// Scoreboard of every user.
    async fn list_scores(&self) -> Result<Vec<ScoreEntry>, Error>;
}
