//! PostgreSQL-backed idea board: ideas and moderation statuses.
//!
//! Missing statuses and authors are detected by foreign keys and reported as
//! `not_found`.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::IdeaBoard;
use crate::domain::{Error, Idea, IdeaDraft, IdeaId, IdeaPage, Status, StatusId, UserId};

use super::diesel_error_mapping::{map_domain_diesel_error, map_domain_pool_error};
use super::models::{IdeaRow, NewIdeaRow, StatusRow};
use super::pool::DbPool;
use super::schema::{ideas, statuses};

#[derive(Clone)]
pub struct DieselIdeaBoard {
    pool: DbPool,
}

impl DieselIdeaBoard {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_idea_error(error: diesel::result::Error) -> Error {
    map_domain_diesel_error(error, "idea")
}

#[async_trait]
impl IdeaBoard for DieselIdeaBoard {
    async fn list_ideas(&self, page: IdeaPage) -> Result<Vec<Idea>, Error> {
        let mut conn = self.pool.get().await.map_err(map_domain_pool_error)?;
        let rows: Vec<IdeaRow> = ideas::table
            .order(ideas::id.asc())
            .offset(page.skip())
            .limit(page.limit())
            .select(IdeaRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_idea_error)?;
        Ok(rows.into_iter().map(Idea::from).collect())
    }

    async fn ideas_by_author(&self, author_id: UserId) -> Result<Vec<Idea>, Error> {
        let mut conn = self.pool.get().await.map_err(map_domain_pool_error)?;
        let rows: Vec<IdeaRow> = ideas::table
            .filter(ideas::author_id.eq(author_id.get()))
            .order(ideas::id.asc())
            .select(IdeaRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_idea_error)?;
        Ok(rows.into_iter().map(Idea::from).collect())
    }

    async fn create_idea(&self, author_id: UserId, draft: &IdeaDraft) -> Result<Idea, Error> {
        let mut conn = self.pool.get().await.map_err(map_domain_pool_error)?;
        let row: IdeaRow = diesel::insert_into(ideas::table)
            .values(&NewIdeaRow {
                title: draft.title(),
                description: draft.description(),
                author_id: author_id.get(),
                status_id: draft.status_id().get(),
            })
            .returning(IdeaRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_idea_error)?;
        Ok(row.into())
    }

    async fn update_status(
        &self,
        idea_id: IdeaId,
        status_id: StatusId,
        moderator_id: UserId,
    ) -> Result<Idea, Error> {
        let mut conn = self.pool.get().await.map_err(map_domain_pool_error)?;
        let row: IdeaRow = diesel::update(ideas::table.find(idea_id.get()))
            .set((
                ideas::status_id.eq(status_id.get()),
                ideas::moderator_id.eq(Some(moderator_id.get())),
                ideas::updated_at.eq(Utc::now()),
            ))
            .returning(IdeaRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_idea_error)?;
        Ok(row.into())
    }

    async fn list_statuses(&self) -> Result<Vec<Status>, Error> {
        let mut conn = self.pool.get().await.map_err(map_domain_pool_error)?;
        let rows: Vec<StatusRow> = statuses::table
            .order(statuses::id.asc())
            .select(StatusRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_domain_diesel_error(err, "status"))?;
        Ok(rows.into_iter().map(Status::from).collect())
    }
}
