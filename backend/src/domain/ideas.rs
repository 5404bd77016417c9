//! Ideas, their moderation statuses and discussion comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CommentId, IdeaId, StatusId, UserId};

/// Status assigned to ideas submitted without an explicit one.
pub const DEFAULT_STATUS: StatusId = StatusId::new(1);
/// Page size used when the caller gives none.
pub const DEFAULT_PAGE_LIMIT: i64 = 100;
/// Largest page a caller may request.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Validation errors for idea and comment input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdeaValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("skip must not be negative (got {0})")]
    NegativeSkip(i64),
    #[error("limit must be between 1 and {max} (got {got})")]
    LimitOutOfRange { got: i64, max: i64 },
}

impl IdeaValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } => field,
            Self::NegativeSkip(_) => "skip",
            Self::LimitOutOfRange { .. } => "limit",
        }
    }
}

fn non_empty(value: &str, field: &'static str) -> Result<String, IdeaValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IdeaValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

/// Moderation status such as `new` or `accepted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: StatusId,
    pub title: String,
}

/// Submitted idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    pub id: IdeaId,
    pub title: String,
    pub description: String,
    pub author_id: UserId,
    pub status_id: StatusId,
    /// Expert who last changed the status.
    pub moderator_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for a new idea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaDraft {
    title: String,
    description: String,
    status_id: StatusId,
}

impl IdeaDraft {
    pub fn try_new(
        title: &str,
        description: &str,
        status_id: Option<StatusId>,
    ) -> Result<Self, IdeaValidationError> {
        Ok(Self {
            title: non_empty(title, "title")?,
            description: non_empty(description, "description")?,
            status_id: status_id.unwrap_or(DEFAULT_STATUS),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status_id(&self) -> StatusId {
        self.status_id
    }
}

/// Offset window over the idea list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdeaPage {
    skip: i64,
    limit: i64,
}

impl Default for IdeaPage {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl IdeaPage {
    /// Validate optional query parameters, falling back to defaults.
    ///
    /// # Examples
    /// ```
    /// use idea_platform::domain::IdeaPage;
    ///
    /// let page = IdeaPage::try_new(None, Some(10)).expect("valid page");
    /// assert_eq!((page.skip(), page.limit()), (0, 10));
    /// assert!(IdeaPage::try_new(None, Some(0)).is_err());
    /// ```
    pub fn try_new(skip: Option<i64>, limit: Option<i64>) -> Result<Self, IdeaValidationError> {
        let skip = skip.unwrap_or(0);
        if skip < 0 {
            return Err(IdeaValidationError::NegativeSkip(skip));
        }
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(IdeaValidationError::LimitOutOfRange {
                got: limit,
                max: MAX_PAGE_LIMIT,
            });
        }
        Ok(Self { skip, limit })
    }

    pub fn skip(&self) -> i64 {
        self.skip
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }
}

/// Comment attached to an idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub idea_id: IdeaId,
    pub user_id: UserId,
}

/// Validated input for a new comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    idea_id: IdeaId,
    content: String,
}

impl CommentDraft {
    pub fn try_new(idea_id: IdeaId, content: &str) -> Result<Self, IdeaValidationError> {
        Ok(Self {
            idea_id,
            content: non_empty(content, "content")?,
        })
    }

    pub fn idea_id(&self) -> IdeaId {
        self.idea_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn draft_defaults_to_new_status() {
        let draft = IdeaDraft::try_new("Bike racks", "More of them", None).expect("valid draft");
        assert_eq!(draft.status_id(), DEFAULT_STATUS);
    }

    #[rstest]
    #[case("", "d", "title")]
    #[case("t", "   ", "description")]
    fn draft_requires_text(#[case] title: &str, #[case] description: &str, #[case] field: &str) {
        let err = IdeaDraft::try_new(title, description, None).expect_err("draft rejected");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    #[case(None, None, 0, 100)]
    #[case(Some(20), Some(1), 20, 1)]
    #[case(Some(0), Some(100), 0, 100)]
    fn page_accepts_bounds(
        #[case] skip: Option<i64>,
        #[case] limit: Option<i64>,
        #[case] expected_skip: i64,
        #[case] expected_limit: i64,
    ) {
        let page = IdeaPage::try_new(skip, limit).expect("valid page");
        assert_eq!(page.skip(), expected_skip);
        assert_eq!(page.limit(), expected_limit);
    }

    #[rstest]
    #[case(Some(-1), None, "skip")]
    #[case(None, Some(0), "limit")]
    #[case(None, Some(101), "limit")]
    fn page_rejects_out_of_range(
        #[case] skip: Option<i64>,
        #[case] limit: Option<i64>,
        #[case] field: &str,
    ) {
        let err = IdeaPage::try_new(skip, limit).expect_err("page rejected");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn comment_requires_content() {
        let err = CommentDraft::try_new(IdeaId::new(1), "  ").expect_err("comment rejected");
        assert_eq!(err.field(), "content");
    }
}
