//! Driving port for achievements and awarding them.

use async_trait::async_trait;

use crate::domain::{Achievement, AchievementId, Award, Error, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AchievementCatalogue: Send + Sync {
    async fn list_achievements(&self) -> Result<Vec<Achievement>, Error>;

    async fn achievements_for_user(&self, user_id: UserId) -> Result<Vec<Achievement>, Error>;

    /// Unlock an achievement. Unknown user or achievement is `not_found`;
    /// awarding the same achievement twice is a `conflict`.
    async fn award(&self, user_id: UserId, achievement_id: AchievementId) -> Result<Award, Error>;
}
