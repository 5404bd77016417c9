//! PostgreSQL-backed achievements and awards.
//!
//! The `(user_id, achievement_id)` unique constraint turns a repeated award
//! into a `conflict`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::AchievementCatalogue;
use crate::domain::{Achievement, AchievementId, Award, Error, UserId};

use super::diesel_error_mapping::{map_domain_diesel_error, map_domain_pool_error};
use super::models::{AchievementRow, AwardRow, NewAwardRow};
use super::pool::DbPool;
use super::schema::{achievements, user_achievements};

#[derive(Clone)]
pub struct DieselAchievementCatalogue {
    pool: DbPool,
}

impl DieselAchievementCatalogue {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AchievementCatalogue for DieselAchievementCatalogue {
    async fn list_achievements(&self) -> Result<Vec<Achievement>, Error> {
        let mut conn = self.pool.get().await.map_err(map_domain_pool_error)?;
        let rows: Vec<AchievementRow> = achievements::table
            .order(achievements::id.asc())
            .select(AchievementRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_domain_diesel_error(err, "achievement"))?;
        Ok(rows.into_iter().map(Achievement::from).collect())
    }

    async fn achievements_for_user(&self, user_id: UserId) -> Result<Vec<Achievement>, Error> {
        let mut conn = self.pool.get().await.map_err(map_domain_pool_error)?;
        let rows: Vec<AchievementRow> = user_achievements::table
            .inner_join(achievements::table)
            .filter(user_achievements::user_id.eq(user_id.get()))
            .order(user_achievements::id.asc())
            .select(AchievementRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_domain_diesel_error(err, "achievement"))?;
        Ok(rows.into_iter().map(Achievement::from).collect())
    }

    async fn award(&self, user_id: UserId, achievement_id: AchievementId) -> Result<Award, Error> {
        let mut conn = self.pool.get().await.map_err(map_domain_pool_error)?;
        let row: AwardRow = diesel::insert_into(user_achievements::table)
            .values(&NewAwardRow {
                user_id: user_id.get(),
                achievement_id: achievement_id.get(),
            })
            .returning(AwardRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_domain_diesel_error(err, "award"))?;
        Ok(row.into())
    }
}
