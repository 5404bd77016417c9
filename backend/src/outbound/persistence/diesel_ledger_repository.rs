//! PostgreSQL-backed score ledger adapter.
//!
//! Each adjustment runs in its own transaction: `SELECT score ... FOR UPDATE`
//! on the user row, apply the domain rule, write the result. Concurrent
//! adjustments on one user serialise on the row lock; different users never
//! contend.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{LedgerRepository, LedgerRepositoryError, ScoreEntry};
use crate::domain::{Score, ScoreAdjustment, UserId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the ledger port.
#[derive(Clone)]
pub struct DieselLedgerRepository {
    pool: DbPool,
}

impl DieselLedgerRepository {
    /// Create a new ledger repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use idea_platform::outbound::persistence::{DbPool, DieselLedgerRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/ideas")).await?;
    /// let ledger = DieselLedgerRepository::new(pool);
    /// # let _ = ledger;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LedgerRepositoryError {
    map_basic_pool_error(error, LedgerRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> LedgerRepositoryError {
    map_basic_diesel_error(
        error,
        LedgerRepositoryError::query,
        LedgerRepositoryError::connection,
    )
}

/// Lock the user's row, apply `adjustment` and persist the new balance.
///
/// Must run inside a transaction; the lock is released at commit. Returns
/// `None` without writing when the user does not exist.
pub(super) async fn adjust_locked(
    conn: &mut AsyncPgConnection,
    user_id: UserId,
    adjustment: ScoreAdjustment,
) -> QueryResult<Option<Score>> {
    let current: Option<i64> = users::table
        .find(user_id.get())
        .select(users::score)
        .for_update()
        .first(conn)
        .await
        .optional()?;
    let Some(current) = current else {
        return Ok(None);
    };

    let next = adjustment.apply(Score::floor(current));
    diesel::update(users::table.find(user_id.get()))
        .set(users::score.eq(next.value()))
        .execute(conn)
        .await?;
    Ok(Some(next))
}

#[async_trait]
impl LedgerRepository for DieselLedgerRepository {
    async fn find_score(&self, user_id: UserId) -> Result<Option<Score>, LedgerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let score: Option<i64> = users::table
            .find(user_id.get())
            .select(users::score)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(score.map(Score::floor))
    }

    async fn adjust(
        &self,
        user_id: UserId,
        adjustment: ScoreAdjustment,
    ) -> Result<Option<Score>, LedgerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move { adjust_locked(conn, user_id, adjustment).await }.scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn list_scores(&self) -> Result<Vec<ScoreEntry>, LedgerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(i32, String, String, i64)> = users::table
            .select((users::id, users::first_name, users::last_name, users::score))
            .order(users::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows
            .into_iter()
            .map(|(id, first_name, last_name, score)| ScoreEntry {
                user_id: UserId::new(id),
                name: format!("{first_name} {last_name}"),
                score: Score::floor(score),
            })
            .collect())
    }
}
