//! PostgreSQL-backed idea comments.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::CommentThread;
use crate::domain::{Comment, CommentDraft, Error, IdeaId, UserId};

use super::diesel_error_mapping::{map_domain_diesel_error, map_domain_pool_error};
use super::models::{CommentRow, NewCommentRow};
use super::pool::DbPool;
use super::schema::comments;

#[derive(Clone)]
pub struct DieselCommentThread {
    pool: DbPool,
}

impl DieselCommentThread {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentThread for DieselCommentThread {
    async fn comments_for_idea(&self, idea_id: IdeaId) -> Result<Vec<Comment>, Error> {
        let mut conn = self.pool.get().await.map_err(map_domain_pool_error)?;
        let rows: Vec<CommentRow> = comments::table
            .filter(comments::idea_id.eq(idea_id.get()))
            .order((comments::created_at.asc(), comments::id.asc()))
            .select(CommentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_domain_diesel_error(err, "comment"))?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn create_comment(&self, author_id: UserId, draft: &CommentDraft) -> Result<Comment, Error> {
        let mut conn = self.pool.get().await.map_err(map_domain_pool_error)?;
        let row: CommentRow = diesel::insert_into(comments::table)
            .values(&NewCommentRow {
                content: draft.content(),
                idea_id: draft.idea_id().get(),
                user_id: author_id.get(),
            })
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_domain_diesel_error(err, "comment"))?;
        Ok(row.into())
    }
}
