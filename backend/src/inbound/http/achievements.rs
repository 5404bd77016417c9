//! Achievement handlers.
//!
//! ```text
//! GET  /api/v1/achievements
//! GET  /api/v1/users/me/achievements
//! POST /api/v1/users/{user_id}/achievements {"achievementId":2}
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Achievement, AchievementId, Award, AwardId, Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::assets::{ImageKind, image_url};
use crate::inbound::http::auth::require_expert;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AchievementResponse {
    pub id: AchievementId,
    pub title: String,
    pub image_url: String,
}

impl AchievementResponse {
    fn render(req: &HttpRequest, achievement: Achievement) -> Self {
        Self {
            image_url: image_url(req, ImageKind::Achievement, &achievement.image_file),
            id: achievement.id,
            title: achievement.title,
        }
    }
}

fn render_all(req: &HttpRequest, achievements: Vec<Achievement>) -> Vec<AchievementResponse> {
    achievements
        .into_iter()
        .map(|achievement| AchievementResponse::render(req, achievement))
        .collect()
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwardRequest {
    pub achievement_id: Option<AchievementId>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwardResponse {
    pub id: AwardId,
    pub user_id: UserId,
    pub achievement_id: AchievementId,
}

impl From<Award> for AwardResponse {
    fn from(award: Award) -> Self {
        Self {
            id: award.id,
            user_id: award.user_id,
            achievement_id: award.achievement_id,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/achievements",
    responses((status = 200, description = "Achievements", body = [AchievementResponse])),
    tags = ["achievements"],
    operation_id = "listAchievements",
    security([])
)]
#[get("/achievements")]
pub async fn list_achievements(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<Vec<AchievementResponse>>> {
    let achievements = state.achievements.list_achievements().await?;
    Ok(web::Json(render_all(&req, achievements)))
}

/// Achievements unlocked by the authenticated user.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/achievements",
    responses(
        (status = 200, description = "Own achievements", body = [AchievementResponse]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["achievements"],
    operation_id = "listMyAchievements"
)]
#[get("/users/me/achievements")]
pub async fn my_achievements(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
) -> ApiResult<web::Json<Vec<AchievementResponse>>> {
    let user_id = session.require_user_id()?;
    let achievements = state.achievements.achievements_for_user(user_id).await?;
    Ok(web::Json(render_all(&req, achievements)))
}

/// Unlock an achievement for a user. Experts only.
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/achievements",
    params(("user_id" = i32, Path, description = "Recipient")),
    request_body = AwardRequest,
    responses(
        (status = 201, description = "Achievement awarded", body = AwardResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Expert account required", body = Error),
        (status = 404, description = "Unknown user or achievement", body = Error),
        (status = 409, description = "Already awarded", body = Error)
    ),
    tags = ["achievements"],
    operation_id = "awardAchievement"
)]
#[post("/users/{user_id}/achievements")]
pub async fn award_achievement(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<AwardRequest>,
) -> ApiResult<HttpResponse> {
    require_expert(&state, &session).await?;
    let achievement_id = payload
        .into_inner()
        .achievement_id
        .ok_or_else(|| missing_field_error(FieldName::new("achievementId")))?;
    let award = state
        .achievements
        .award(UserId::new(path.into_inner()), achievement_id)
        .await?;
    Ok(HttpResponse::Created().json(AwardResponse::from(award)))
}
