//! Score ledger handlers.
//!
//! ```text
//! GET  /api/v1/users/me/score
//! POST /api/v1/users/me/score/add {"points":10}
//! POST /api/v1/users/me/score/subtract {"points":10}
//! POST /api/v1/users/{user_id}/score {"newScore":50}
//! GET  /api/v1/users/scores
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::ScoreEntry;
use crate::domain::{Error, Score, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_expert;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub user_id: UserId,
    pub score: Score,
}

/// Body for the add and subtract endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointsRequest {
    pub points: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetScoreRequest {
    pub new_score: Option<i64>,
}

/// Balance after a mutation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreChangeResponse {
    pub user_id: UserId,
    pub new_score: Score,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardEntry {
    pub user_id: UserId,
    pub name: String,
    pub score: Score,
}

impl From<ScoreEntry> for ScoreboardEntry {
    fn from(entry: ScoreEntry) -> Self {
        Self {
            user_id: entry.user_id,
            name: entry.name,
            score: entry.score,
        }
    }
}

fn require_points(payload: PointsRequest) -> Result<i64, Error> {
    payload
        .points
        .ok_or_else(|| missing_field_error(FieldName::new("points")))
}

/// Current balance of the authenticated user; `0` for unknown accounts.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/score",
    responses(
        (status = 200, description = "Balance", body = ScoreResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["scores"],
    operation_id = "getMyScore"
)]
#[get("/users/me/score")]
pub async fn my_score(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ScoreResponse>> {
    let user_id = session.require_user_id()?;
    let score = state.ledger.get_score(user_id).await?;
    Ok(web::Json(ScoreResponse { user_id, score }))
}

/// Credit points to the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/users/me/score/add",
    request_body = PointsRequest,
    responses(
        (status = 200, description = "New balance", body = ScoreChangeResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Account no longer exists", body = Error)
    ),
    tags = ["scores"],
    operation_id = "addMyScore"
)]
#[post("/users/me/score/add")]
pub async fn add_my_score(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PointsRequest>,
) -> ApiResult<web::Json<ScoreChangeResponse>> {
    let user_id = session.require_user_id()?;
    let points = require_points(payload.into_inner())?;
    let new_score = state.ledger.add_score(user_id, points).await?;
    Ok(web::Json(ScoreChangeResponse {
        user_id,
        new_score,
        message: format!("Added {points} points"),
    }))
}

/// Debit points from the authenticated user, flooring at zero.
#[utoipa::path(
    post,
    path = "/api/v1/users/me/score/subtract",
    request_body = PointsRequest,
    responses(
        (status = 200, description = "New balance", body = ScoreChangeResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Account no longer exists", body = Error)
    ),
    tags = ["scores"],
    operation_id = "subtractMyScore"
)]
#[post("/users/me/score/subtract")]
pub async fn subtract_my_score(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PointsRequest>,
) -> ApiResult<web::Json<ScoreChangeResponse>> {
    let user_id = session.require_user_id()?;
    let points = require_points(payload.into_inner())?;
    let new_score = state.ledger.subtract_score(user_id, points).await?;
    Ok(web::Json(ScoreChangeResponse {
        user_id,
        new_score,
        message: format!("Subtracted {points} points"),
    }))
}

/// Overwrite any user's balance. Experts only.
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/score",
    params(("user_id" = i32, Path, description = "Account to update")),
    request_body = SetScoreRequest,
    responses(
        (status = 200, description = "New balance", body = ScoreChangeResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Expert account required", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["scores"],
    operation_id = "setUserScore"
)]
#[post("/users/{user_id}/score")]
pub async fn set_user_score(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<SetScoreRequest>,
) -> ApiResult<web::Json<ScoreChangeResponse>> {
    require_expert(&state, &session).await?;
    let user_id = UserId::new(path.into_inner());
    let requested = payload
        .into_inner()
        .new_score
        .ok_or_else(|| missing_field_error(FieldName::new("newScore")))?;
    let new_score = state.ledger.set_score(user_id, requested).await?;
    Ok(web::Json(ScoreChangeResponse {
        user_id,
        new_score,
        message: "Score updated".to_owned(),
    }))
}

/// Every user's balance ordered by id. Experts only.
#[utoipa::path(
    get,
    path = "/api/v1/users/scores",
    responses(
        (status = 200, description = "Scoreboard", body = [ScoreboardEntry]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Expert account required", body = Error)
    ),
    tags = ["scores"],
    operation_id = "listScores"
)]
#[get("/users/scores")]
pub async fn list_scores(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ScoreboardEntry>>> {
    require_expert(&state, &session).await?;
    let entries = state.ledger.list_scores().await?;
    Ok(web::Json(entries.into_iter().map(Into::into).collect()))
}
