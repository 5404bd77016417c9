//! Wire persistence adapters and domain services into [`HttpState`].

use std::sync::Arc;

use idea_platform::domain::{AccountService, LedgerService, RedemptionService};
use idea_platform::inbound::http::state::HttpState;
use idea_platform::outbound::credentials::Argon2CredentialHasher;
use idea_platform::outbound::persistence::{
    DbPool, DieselAchievementCatalogue, DieselCommentThread, DieselIdeaBoard,
    DieselLedgerRepository, DieselProductCatalogue, DieselRedemptionRepository,
    DieselUserRepository,
};

/// Build the port bundle shared by every worker.
///
/// One `AccountService` instance backs login, registration and profile
/// lookups; the ledger and redemption services wrap their own repositories.
pub(super) fn build_http_state(pool: &DbPool) -> HttpState {
    let accounts = Arc::new(AccountService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(Argon2CredentialHasher),
    ));
    let ledger = Arc::new(LedgerService::new(Arc::new(DieselLedgerRepository::new(
        pool.clone(),
    ))));
    let redemption = Arc::new(RedemptionService::new(Arc::new(
        DieselRedemptionRepository::new(pool.clone()),
    )));

    HttpState {
        login: accounts.clone(),
        registration: accounts.clone(),
        profile: accounts,
        ledger,
        redemption,
        products: Arc::new(DieselProductCatalogue::new(pool.clone())),
        ideas: Arc::new(DieselIdeaBoard::new(pool.clone())),
        comments: Arc::new(DieselCommentThread::new(pool.clone())),
        achievements: Arc::new(DieselAchievementCatalogue::new(pool.clone())),
    }
}
