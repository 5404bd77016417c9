//! Domain primitives, rules and services.
//!
//! Purpose: define strongly typed entities and the use-cases the inbound
//! adapters drive. Nothing in here knows about HTTP or SQL; adapters reach the
//! domain through [`ports`].
//!
//! Public surface:
//! - `Error`/`ErrorCode`: transport-agnostic failure payload.
//! - `Score`/`ScoreAdjustment`: balances and the floor-at-zero rule.
//! - `StockLevel`/`PurchasePlan`/`RedemptionOutcome`: purchase decisions.
//! - `LedgerService`, `RedemptionService`, `AccountService`: driving port
//!   implementations over driven repositories.

pub mod account_service;
pub mod achievements;
pub mod auth;
pub mod error;
pub mod ideas;
pub mod ids;
pub mod ledger_service;
pub mod ports;
pub mod product;
pub mod redemption;
pub mod redemption_service;
pub mod score;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::achievements::{Achievement, Award};
pub use self::auth::{
    CredentialValidationError, LoginCredentials, Mail, PASSWORD_MIN_CHARS, Password,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ideas::{
    Comment, CommentDraft, DEFAULT_STATUS, Idea, IdeaDraft, IdeaPage, IdeaValidationError, Status,
};
pub use self::ids::{
    AchievementId, AwardId, CommentId, IdeaId, OwnershipId, ProductId, StatusId, UserId,
};
pub use self::ledger_service::LedgerService;
pub use self::product::{Product, ProductDraft, ProductValidationError};
pub use self::redemption::{
    Ownership, PurchasePlan, RedemptionOutcome, StockLevel, UnavailableReason,
};
pub use self::redemption_service::RedemptionService;
pub use self::score::{Score, ScoreAdjustment, ScoreValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    NewUser, Registration, RegistrationInput, RegistrationValidationError, StoredCredentials, User,
};
