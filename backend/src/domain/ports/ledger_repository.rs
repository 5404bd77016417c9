//! Driven port for score balance storage.
//!
//! Adapters must make [`LedgerRepository::adjust`] a single atomic
//! read-modify-write on the user's row: lock it, apply the adjustment with
//! [`ScoreAdjustment::apply`](crate::domain::ScoreAdjustment::apply) and store
//! the result before releasing the lock.

use async_trait::async_trait;

use crate::domain::{Score, ScoreAdjustment, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ledger storage adapters.
    pub enum LedgerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "ledger repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "ledger repository query failed: {message}",
    }
}

/// One row of the scoreboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub user_id: UserId,
    pub name: String,
    pub score: Score,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Current balance, or `None` when the user does not exist.
    async fn find_score(&self, user_id: UserId) -> Result<Option<Score>, LedgerRepositoryError>;

    /// Atomically apply `adjustment` and return the stored balance.
    ///
    /// Returns `None` when the user does not exist; nothing is written then.
    async fn adjust(
        &self,
        user_id: UserId,
        adjustment: ScoreAdjustment,
    ) -> Result<Option<Score>, LedgerRepositoryError>;

    /// Every user's balance ordered by user id.
    async fn list_scores(&self) -> Result<Vec<ScoreEntry>, LedgerRepositoryError>;
}
