//! Comment handlers.
//!
//! ```text
//! GET  /api/v1/ideas/{idea_id}/comments
//! POST /api/v1/comments {"ideaId":10,"content":"Seconded"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Comment, CommentDraft, CommentId, Error, IdeaId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, map_idea_error, missing_field_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: CommentId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub idea_id: IdeaId,
    pub user_id: UserId,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            created_at: comment.created_at,
            idea_id: comment.idea_id,
            user_id: comment.user_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub idea_id: Option<IdeaId>,
    pub content: String,
}

/// Comments on one idea, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/ideas/{idea_id}/comments",
    params(("idea_id" = i32, Path, description = "Idea whose thread to read")),
    responses((status = 200, description = "Comments", body = [CommentResponse])),
    tags = ["comments"],
    operation_id = "listIdeaComments",
    security([])
)]
#[get("/ideas/{idea_id}/comments")]
pub async fn idea_comments(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    let comments = state
        .comments
        .comments_for_idea(IdeaId::new(path.into_inner()))
        .await?;
    Ok(web::Json(comments.into_iter().map(Into::into).collect()))
}

/// Comment on an idea as the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/comments",
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown idea", body = Error)
    ),
    tags = ["comments"],
    operation_id = "createComment"
)]
#[post("/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateCommentRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let payload = payload.into_inner();
    let idea_id = payload
        .idea_id
        .ok_or_else(|| missing_field_error(FieldName::new("ideaId")))?;
    let draft = CommentDraft::try_new(idea_id, &payload.content).map_err(map_idea_error)?;
    let comment = state.comments.create_comment(user_id, &draft).await?;
    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{
        MockPorts, login_request, session_cookie, test_login_resource, test_session_middleware,
    };

    macro_rules! comment_app {
        ($ports:expr) => {
            test::init_service(
                App::new()
                    .app_data($ports.into_state())
                    .wrap(test_session_middleware())
                    .service(test_login_resource())
                    .service(
                        web::scope("/api/v1")
                            .service(idea_comments)
                            .service(create_comment),
                    ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn creates_comment_for_session_user() {
        let mut ports = MockPorts::default();
        ports
            .comments
            .expect_create_comment()
            .withf(|user, draft| {
                *user == UserId::new(2)
                    && draft.idea_id() == IdeaId::new(10)
                    && draft.content() == "Seconded"
            })
            .times(1)
            .returning(|user_id, draft| {
                Ok(Comment {
                    id: CommentId::new(1),
                    content: draft.content().to_owned(),
                    created_at: Utc::now(),
                    idea_id: draft.idea_id(),
                    user_id,
                })
            });
        let app = comment_app!(ports);
        let cookie = session_cookie(&test::call_service(&app, login_request(2).to_request()).await);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/comments")
                .cookie(cookie)
                .set_json(json!({"ideaId": 10, "content": "  Seconded "}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["ideaId"], 10);
        assert_eq!(body["userId"], 2);
    }

    #[actix_web::test]
    async fn blank_comments_are_rejected() {
        let app = comment_app!(MockPorts::default());
        let cookie = session_cookie(&test::call_service(&app, login_request(2).to_request()).await);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/comments")
                .cookie(cookie)
                .set_json(json!({"ideaId": 10, "content": "   "}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "content");
    }

    #[actix_web::test]
    async fn unknown_idea_is_not_found() {
        let mut ports = MockPorts::default();
        ports
            .comments
            .expect_create_comment()
            .returning(|_, _| Err(Error::not_found("idea not found")));
        let app = comment_app!(ports);
        let cookie = session_cookie(&test::call_service(&app, login_request(2).to_request()).await);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/comments")
                .cookie(cookie)
                .set_json(json!({"ideaId": 99, "content": "Hello"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn threads_are_public() {
        let mut ports = MockPorts::default();
        ports
            .comments
            .expect_comments_for_idea()
            .withf(|idea| *idea == IdeaId::new(10))
            .returning(|_| Ok(Vec::new()));
        let app = comment_app!(ports);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/ideas/10/comments")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!([]));
    }
}
