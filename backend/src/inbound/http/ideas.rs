//! Idea and status handlers.
//!
//! ```text
//! GET  /api/v1/ideas?skip=0&limit=100
//! POST /api/v1/ideas {"title":"Bike racks","description":"More of them"}
//! GET  /api/v1/users/me/ideas
//! PUT  /api/v1/ideas/{idea_id}/status {"statusId":3}
//! GET  /api/v1/statuses
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Idea, IdeaDraft, IdeaId, IdeaPage, Status, StatusId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_expert;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, map_idea_error, missing_field_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdeaResponse {
    pub id: IdeaId,
    pub title: String,
    pub description: String,
    pub author_id: UserId,
    pub status_id: StatusId,
    pub moderator_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Idea> for IdeaResponse {
    fn from(idea: Idea) -> Self {
        Self {
            id: idea.id,
            title: idea.title,
            description: idea.description,
            author_id: idea.author_id,
            status_id: idea.status_id,
            moderator_id: idea.moderator_id,
            created_at: idea.created_at,
            updated_at: idea.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub id: StatusId,
    pub title: String,
}

impl From<Status> for StatusResponse {
    fn from(status: Status) -> Self {
        Self {
            id: status.id,
            title: status.title,
        }
    }
}

/// Offset pagination for `GET /ideas`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdeaListQuery {
    /// Ideas to skip; defaults to 0.
    pub skip: Option<i64>,
    /// Page size between 1 and 100; defaults to 100.
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIdeaRequest {
    pub title: String,
    pub description: String,
    /// Initial status; defaults to `1` ("new").
    #[serde(default)]
    pub status_id: Option<StatusId>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status_id: Option<StatusId>,
}

fn into_responses(ideas: Vec<Idea>) -> Vec<IdeaResponse> {
    ideas.into_iter().map(Into::into).collect()
}

/// Page through every submitted idea, ordered by id.
#[utoipa::path(
    get,
    path = "/api/v1/ideas",
    params(IdeaListQuery),
    responses(
        (status = 200, description = "Ideas", body = [IdeaResponse]),
        (status = 400, description = "Invalid pagination", body = Error)
    ),
    tags = ["ideas"],
    operation_id = "listIdeas",
    security([])
)]
#[get("/ideas")]
pub async fn list_ideas(
    state: web::Data<HttpState>,
    query: web::Query<IdeaListQuery>,
) -> ApiResult<web::Json<Vec<IdeaResponse>>> {
    let IdeaListQuery { skip, limit } = query.into_inner();
    let page = IdeaPage::try_new(skip, limit).map_err(map_idea_error)?;
    let ideas = state.ideas.list_ideas(page).await?;
    Ok(web::Json(into_responses(ideas)))
}

/// Submit an idea as the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/ideas",
    request_body = CreateIdeaRequest,
    responses(
        (status = 201, description = "Idea created", body = IdeaResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown status", body = Error)
    ),
    tags = ["ideas"],
    operation_id = "createIdea"
)]
#[post("/ideas")]
pub async fn create_idea(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateIdeaRequest>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user_id()?;
    let payload = payload.into_inner();
    let draft = IdeaDraft::try_new(&payload.title, &payload.description, payload.status_id)
        .map_err(map_idea_error)?;
    let idea = state.ideas.create_idea(author_id, &draft).await?;
    Ok(HttpResponse::Created().json(IdeaResponse::from(idea)))
}

/// Ideas authored by the authenticated user.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/ideas",
    responses(
        (status = 200, description = "Own ideas", body = [IdeaResponse]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["ideas"],
    operation_id = "listMyIdeas"
)]
#[get("/users/me/ideas")]
pub async fn my_ideas(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<IdeaResponse>>> {
    let author_id = session.require_user_id()?;
    let ideas = state.ideas.ideas_by_author(author_id).await?;
    Ok(web::Json(into_responses(ideas)))
}

/// Move an idea to another status. Experts only.
#[utoipa::path(
    put,
    path = "/api/v1/ideas/{idea_id}/status",
    params(("idea_id" = i32, Path, description = "Idea to moderate")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated idea", body = IdeaResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Expert account required", body = Error),
        (status = 404, description = "Unknown idea or status", body = Error)
    ),
    tags = ["ideas"],
    operation_id = "updateIdeaStatus"
)]
#[put("/ideas/{idea_id}/status")]
pub async fn update_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<UpdateStatusRequest>,
) -> ApiResult<web::Json<IdeaResponse>> {
    let moderator_id = require_expert(&state, &session).await?;
    let status_id = payload
        .into_inner()
        .status_id
        .ok_or_else(|| missing_field_error(FieldName::new("statusId")))?;
    let idea = state
        .ideas
        .update_status(IdeaId::new(path.into_inner()), status_id, moderator_id)
        .await?;
    Ok(web::Json(idea.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/statuses",
    responses((status = 200, description = "Moderation statuses", body = [StatusResponse])),
    tags = ["ideas"],
    operation_id = "listStatuses",
    security([])
)]
#[get("/statuses")]
pub async fn list_statuses(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<StatusResponse>>> {
    let statuses = state.ideas.list_statuses().await?;
    Ok(web::Json(statuses.into_iter().map(Into::into).collect()))
}
