//! HTTP inbound adapter exposing REST endpoints.

pub mod achievements;
pub mod assets;
pub mod auth;
pub mod comments;
pub mod error;
pub mod health;
pub mod ideas;
pub mod products;
pub mod scores;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api/v1` handler on `cfg`.
///
/// Literal `/users/me/...` and `/users/scores` routes are registered before the
/// `/users/{user_id}/...` ones so they are matched first.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::register)
        .service(auth::login)
        .service(auth::logout)
        .service(users::current_user)
        .service(scores::my_score)
        .service(scores::add_my_score)
        .service(scores::subtract_my_score)
        .service(scores::list_scores)
        .service(products::my_products)
        .service(ideas::my_ideas)
        .service(achievements::my_achievements)
        .service(scores::set_user_score)
        .service(achievements::award_achievement)
        .service(products::list_products)
        .service(products::create_product)
        .service(products::buy_product)
        .service(ideas::list_ideas)
        .service(ideas::create_idea)
        .service(ideas::update_status)
        .service(ideas::list_statuses)
        .service(comments::idea_comments)
        .service(comments::create_comment)
        .service(achievements::list_achievements);
}
