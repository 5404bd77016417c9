//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AchievementCatalogue, CommentThread, IdeaBoard, LoginService, ProductCatalogue,
    RedemptionCommand, ScoreLedger, UserProfileQuery, UserRegistration,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn UserRegistration>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub ledger: Arc<dyn ScoreLedger>,
    pub redemption: Arc<dyn RedemptionCommand>,
    pub products: Arc<dyn ProductCatalogue>,
    pub ideas: Arc<dyn IdeaBoard>,
    pub comments: Arc<dyn CommentThread>,
    pub achievements: Arc<dyn AchievementCatalogue>,
}
