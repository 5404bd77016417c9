//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler plus the health probes and the
//! session cookie security scheme. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::{achievements, auth, comments, health, ideas, products, scores, users};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Idea platform API",
        description = "Idea submission, moderation and score-based rewards."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        auth::register,
        auth::login,
        auth::logout,
        users::current_user,
        scores::my_score,
        scores::add_my_score,
        scores::subtract_my_score,
        scores::set_user_score,
        scores::list_scores,
        products::list_products,
        products::create_product,
        products::buy_product,
        products::my_products,
        ideas::list_ideas,
        ideas::create_idea,
        ideas::my_ideas,
        ideas::update_status,
        ideas::list_statuses,
        comments::idea_comments,
        comments::create_comment,
        achievements::list_achievements,
        achievements::my_achievements,
        achievements::award_achievement,
        health::ready,
        health::live,
    ),
    components(schemas(Error, ErrorCode)),
    tags(
        (name = "auth", description = "Registration and sessions"),
        (name = "users", description = "Account profile"),
        (name = "scores", description = "Score ledger"),
        (name = "products", description = "Catalogue and redemption"),
        (name = "ideas", description = "Ideas and moderation statuses"),
        (name = "comments", description = "Discussion on ideas"),
        (name = "achievements", description = "Achievements awarded by experts"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
