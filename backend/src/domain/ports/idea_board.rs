//! Driving port for submitting and moderating ideas.

use async_trait::async_trait;

use crate::domain::{Error, Idea, IdeaDraft, IdeaId, IdeaPage, Status, StatusId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdeaBoard: Send + Sync {
    /// One page of ideas ordered by id.
    async fn list_ideas(&self, page: IdeaPage) -> Result<Vec<Idea>, Error>;

    async fn ideas_by_author(&self, author_id: UserId) -> Result<Vec<Idea>, Error>;

    /// Store a new idea; `not_found` when the draft's status does not exist.
    async fn create_idea(&self, author_id: UserId, draft: &IdeaDraft) -> Result<Idea, Error>;

    /// Move an idea to `status_id`, recording `moderator_id` and bumping
    /// `updated_at`.
    async fn update_status(
        &self,
        idea_id: IdeaId,
        status_id: StatusId,
        moderator_id: UserId,
    ) -> Result<Idea, Error>;

    async fn list_statuses(&self) -> Result<Vec<Status>, Error>;
}
