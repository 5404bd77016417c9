//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`ScoreLedger`, `RedemptionCommand`, the account, idea and
//! catalogue ports) are called by inbound adapters. Driven ports
//! (`LedgerRepository`, `RedemptionRepository`, `UserRepository`,
//! `CredentialHasher`) are implemented by outbound adapters and declare typed
//! errors built with [`define_port_error!`].

mod macros;
pub(crate) use macros::define_port_error;

mod achievement_catalogue;
mod comment_thread;
mod credential_hasher;
mod idea_board;
mod ledger_repository;
mod login_service;
mod product_catalogue;
mod redemption_command;
mod redemption_repository;
mod score_ledger;
mod user_profile_query;
mod user_registration;
mod user_repository;

#[cfg(test)]
pub use achievement_catalogue::MockAchievementCatalogue;
pub use achievement_catalogue::AchievementCatalogue;
#[cfg(test)]
pub use comment_thread::MockCommentThread;
pub use comment_thread::CommentThread;
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
#[cfg(test)]
pub use idea_board::MockIdeaBoard;
pub use idea_board::IdeaBoard;
#[cfg(test)]
pub use ledger_repository::MockLedgerRepository;
pub use ledger_repository::{LedgerRepository, LedgerRepositoryError, ScoreEntry};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use product_catalogue::MockProductCatalogue;
pub use product_catalogue::ProductCatalogue;
#[cfg(test)]
pub use redemption_command::MockRedemptionCommand;
pub use redemption_command::RedemptionCommand;
#[cfg(test)]
pub use redemption_repository::MockRedemptionRepository;
pub use redemption_repository::{RedemptionRepository, RedemptionRepositoryError};
#[cfg(test)]
pub use score_ledger::MockScoreLedger;
pub use score_ledger::ScoreLedger;
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::UserRegistration;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
