//! Achievements that experts award to users.

use serde::{Deserialize, Serialize};

use super::{AchievementId, AwardId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: String,
    /// File name under the achievement image directory.
    pub image_file: String,
}

/// Record of an achievement unlocked by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub id: AwardId,
    pub user_id: UserId,
    pub achievement_id: AchievementId,
}
