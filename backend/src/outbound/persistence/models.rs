//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types live next to
//! each row.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Achievement, AchievementId, Award, AwardId, Comment, CommentId, Idea, IdeaId, Ownership,
    OwnershipId, Product, ProductId, Score, Status, StatusId, User, UserId,
};

use super::schema::{
    achievements, comments, ideas, products, statuses, user_achievements, user_products, users,
};

/// Row struct for reading from the users table (without the digest).
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub mail: String,
    pub expert: bool,
    pub score: i64,
}

impl UserRow {
    /// The CHECK constraint keeps `score >= 0`; clamp rather than fail if a
    /// row ever disagrees.
    pub(crate) fn into_domain(self) -> User {
        User {
            id: UserId::new(self.id),
            last_name: self.last_name,
            first_name: self.first_name,
            middle_name: self.middle_name,
            mail: self.mail,
            expert: self.expert,
            score: Score::floor(self.score),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub last_name: &'a str,
    pub first_name: &'a str,
    pub middle_name: Option<&'a str>,
    pub mail: &'a str,
    pub password_hash: &'a str,
    pub expert: bool,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub quantity: i32,
    pub image: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            title: row.title,
            description: row.description,
            price: row.price,
            quantity: row.quantity,
            image: row.image,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = products)]
pub(crate) struct NewProductRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub price: i64,
    pub quantity: i32,
    pub image: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OwnershipRow {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub purchased_at: DateTime<Utc>,
}

impl From<OwnershipRow> for Ownership {
    fn from(row: OwnershipRow) -> Self {
        Self {
            id: OwnershipId::new(row.id),
            user_id: UserId::new(row.user_id),
            product_id: ProductId::new(row.product_id),
            purchased_at: row.purchased_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_products)]
pub(crate) struct NewOwnershipRow {
    pub user_id: i32,
    pub product_id: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = statuses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StatusRow {
    pub id: i32,
    pub title: String,
}

impl From<StatusRow> for Status {
    fn from(row: StatusRow) -> Self {
        Self {
            id: StatusId::new(row.id),
            title: row.title,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ideas)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IdeaRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub author_id: i32,
    pub status_id: i32,
    pub moderator_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<IdeaRow> for Idea {
    fn from(row: IdeaRow) -> Self {
        Self {
            id: IdeaId::new(row.id),
            title: row.title,
            description: row.description,
            author_id: UserId::new(row.author_id),
            status_id: StatusId::new(row.status_id),
            moderator_id: row.moderator_id.map(UserId::new),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ideas)]
pub(crate) struct NewIdeaRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub author_id: i32,
    pub status_id: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub idea_id: i32,
    pub user_id: i32,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: CommentId::new(row.id),
            content: row.content,
            created_at: row.created_at,
            idea_id: IdeaId::new(row.idea_id),
            user_id: UserId::new(row.user_id),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub content: &'a str,
    pub idea_id: i32,
    pub user_id: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = achievements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AchievementRow {
    pub id: i32,
    pub title: String,
    pub image_file: String,
}

impl From<AchievementRow> for Achievement {
    fn from(row: AchievementRow) -> Self {
        Self {
            id: AchievementId::new(row.id),
            title: row.title,
            image_file: row.image_file,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_achievements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AwardRow {
    pub id: i32,
    pub user_id: i32,
    pub achievement_id: i32,
}

impl From<AwardRow> for Award {
    fn from(row: AwardRow) -> Self {
        Self {
            id: AwardId::new(row.id),
            user_id: UserId::new(row.user_id),
            achievement_id: AchievementId::new(row.achievement_id),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_achievements)]
pub(crate) struct NewAwardRow {
    pub user_id: i32,
    pub achievement_id: i32,
}
