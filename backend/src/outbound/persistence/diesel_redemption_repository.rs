//! PostgreSQL-backed redemption adapter.
//!
//! One transaction per purchase. The product row is locked first, then the
//! buyer's row; holding both locks until commit is what prevents two
//! concurrent purchases from selling the last unit twice or spending the same
//! points twice. Fixed lock order means purchases cannot deadlock each other.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::warn;

use crate::domain::ports::{RedemptionRepository, RedemptionRepositoryError};
use crate::domain::{
    Ownership, ProductId, PurchasePlan, RedemptionOutcome, Score, StockLevel, UserId,
};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_ledger_repository::adjust_locked;
use super::models::{NewOwnershipRow, OwnershipRow};
use super::pool::{DbPool, PoolError};
use super::schema::{products, user_products, users};

/// Diesel-backed implementation of the redemption port.
#[derive(Clone)]
pub struct DieselRedemptionRepository {
    pool: DbPool,
}

impl DieselRedemptionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RedemptionRepositoryError {
    map_basic_pool_error(error, RedemptionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RedemptionRepositoryError {
    map_basic_diesel_error(
        error,
        RedemptionRepositoryError::query,
        RedemptionRepositoryError::connection,
    )
}

#[async_trait]
impl RedemptionRepository for DieselRedemptionRepository {
    async fn redeem(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<RedemptionOutcome, RedemptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let stock = products::table
                    .find(product_id.get())
                    .select((products::price, products::quantity))
                    .for_update()
                    .first::<(i64, i32)>(conn)
                    .await
                    .optional()?
                    .map(|(price, quantity)| StockLevel {
                        product_id,
                        price,
                        quantity,
                    });
                let stock = match StockLevel::check(stock) {
                    Ok(stock) => stock,
                    Err(reason) => return Ok(RedemptionOutcome::Unavailable(reason)),
                };

                let balance = users::table
                    .find(user_id.get())
                    .select(users::score)
                    .for_update()
                    .first::<i64>(conn)
                    .await
                    .optional()?
                    .map(Score::floor);
                let plan = match PurchasePlan::for_balance(stock, balance) {
                    Ok(plan) => plan,
                    Err(reason) => return Ok(RedemptionOutcome::Unavailable(reason)),
                };

                let debited = adjust_locked(conn, user_id, plan.debit).await?;
                if debited != Some(plan.new_score) {
                    warn!(
                        user_id = user_id.get(),
                        expected = plan.new_score.value(),
                        "ledger debit disagreed with purchase plan"
                    );
                    return Err(diesel::result::Error::RollbackTransaction);
                }

                diesel::update(products::table.find(product_id.get()))
                    .set(products::quantity.eq(plan.remaining_quantity))
                    .execute(conn)
                    .await?;

                let row = diesel::insert_into(user_products::table)
                    .values(&NewOwnershipRow {
                        user_id: user_id.get(),
                        product_id: product_id.get(),
                    })
                    .returning(OwnershipRow::as_returning())
                    .get_result::<OwnershipRow>(conn)
                    .await?;

                Ok(RedemptionOutcome::Redeemed(row.into()))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn owned_by(&self, user_id: UserId) -> Result<Vec<Ownership>, RedemptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<OwnershipRow> = user_products::table
            .filter(user_products::user_id.eq(user_id.get()))
            .order(user_products::id.asc())
            .select(OwnershipRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Ownership::from).collect())
    }
}
