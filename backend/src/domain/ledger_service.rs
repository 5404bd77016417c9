//! Score ledger domain service.
//!
//! Implements the [`ScoreLedger`] driving port on top of a
//! [`LedgerRepository`]. Floor and saturation rules live in
//! [`ScoreAdjustment`]; the repository provides the row lock.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{LedgerRepository, LedgerRepositoryError, ScoreEntry, ScoreLedger};
use crate::domain::{Error, Score, ScoreAdjustment, UserId};

#[derive(Clone)]
pub struct LedgerService<R> {
    repository: Arc<R>,
}

impl<R> LedgerService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_ledger_error(error: LedgerRepositoryError) -> Error {
    match error {
        LedgerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("ledger repository unavailable: {message}"))
        }
        LedgerRepositoryError::Query { message } => {
            Error::internal(format!("ledger repository error: {message}"))
        }
    }
}

impl<R> LedgerService<R>
where
    R: LedgerRepository,
{
    async fn adjust(&self, user_id: UserId, adjustment: ScoreAdjustment) -> Result<Score, Error> {
        let score = self
            .repository
            .adjust(user_id, adjustment)
            .await
            .map_err(map_ledger_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))?;
        info!(
            user_id = user_id.get(),
            kind = adjustment.kind(),
            score = score.value(),
            "score adjusted"
        );
        Ok(score)
    }
}

#[async_trait]
impl<R> ScoreLedger for LedgerService<R>
where
    R: LedgerRepository,
{
    async fn get_score(&self, user_id: UserId) -> Result<Score, Error> {
        let score = self
            .repository
            .find_score(user_id)
            .await
            .map_err(map_ledger_error)?;
        Ok(score.unwrap_or(Score::ZERO))
    }

    async fn add_score(&self, user_id: UserId, points: i64) -> Result<Score, Error> {
        self.adjust(user_id, ScoreAdjustment::Add(points)).await
    }

    async fn subtract_score(&self, user_id: UserId, points: i64) -> Result<Score, Error> {
        self.adjust(user_id, ScoreAdjustment::Subtract(points)).await
    }

    async fn set_score(&self, user_id: UserId, new_score: i64) -> Result<Score, Error> {
        self.adjust(user_id, ScoreAdjustment::Set(new_score)).await
    }

    async fn list_scores(&self) -> Result<Vec<ScoreEntry>, Error> {
        self.repository.list_scores().await.map_err(map_ledger_error)
    }
}
