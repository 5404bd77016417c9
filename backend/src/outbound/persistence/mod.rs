//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain ports backed by PostgreSQL via
//! `diesel-async` and `bb8` pooling.
//!
//! - Driven ports (`DieselLedgerRepository`, `DieselRedemptionRepository`,
//!   `DieselUserRepository`) map failures into their port error enums.
//! - The catalogue, idea, comment and achievement adapters implement driving
//!   ports directly and map constraint violations into domain errors.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) never leave
//!   this module.
//!
//! # Example
//!
//! ```ignore
//! use idea_platform::outbound::persistence::{DbPool, DieselLedgerRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/ideas")).await?;
//! let ledger = DieselLedgerRepository::new(pool);
//! ```

mod diesel_achievement_catalogue;
mod diesel_comment_thread;
mod diesel_error_mapping;
mod diesel_idea_board;
mod diesel_ledger_repository;
mod diesel_product_catalogue;
mod diesel_redemption_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_achievement_catalogue::DieselAchievementCatalogue;
pub use diesel_comment_thread::DieselCommentThread;
pub use diesel_idea_board::DieselIdeaBoard;
pub use diesel_ledger_repository::DieselLedgerRepository;
pub use diesel_product_catalogue::DieselProductCatalogue;
pub use diesel_redemption_repository::DieselRedemptionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
