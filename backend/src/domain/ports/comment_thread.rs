//! Driving port for idea comments.

use async_trait::async_trait;

use crate::domain::{Comment, CommentDraft, Error, IdeaId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentThread: Send + Sync {
    /// Comments on an idea, oldest first.
    async fn comments_for_idea(&self, idea_id: IdeaId) -> Result<Vec<Comment>, Error>;

    /// `not_found` when the idea does not exist.
    async fn create_comment(&self, author_id: UserId, draft: &CommentDraft) -> Result<Comment, Error>;
}
