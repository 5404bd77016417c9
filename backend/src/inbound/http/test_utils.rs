//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::test::TestRequest;
use actix_web::{HttpResponse, Resource, web};

use crate::domain::ports::{
    MockAchievementCatalogue, MockCommentThread, MockIdeaBoard, MockLoginService,
    MockProductCatalogue, MockRedemptionCommand, MockScoreLedger, MockUserProfileQuery,
    MockUserRegistration,
};
use crate::domain::{Error, Score, User, UserId};

use super::session::SessionContext;
use super::state::HttpState;

/// Route used by handler tests to obtain an authenticated session.
pub const TEST_LOGIN_PATH: &str = "/__test/login";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// `GET /__test/login/{id}` stores `id` in the session.
pub fn test_login_resource() -> Resource {
    web::resource(format!("{TEST_LOGIN_PATH}/{{id}}")).route(web::get().to(
        |session: SessionContext, path: web::Path<i32>| async move {
            session.persist_user(UserId::new(path.into_inner()))?;
            Ok::<_, Error>(HttpResponse::Ok().finish())
        },
    ))
}

/// Request hitting [`test_login_resource`] for `user_id`.
pub fn login_request(user_id: i32) -> TestRequest {
    TestRequest::get().uri(&format!("{TEST_LOGIN_PATH}/{user_id}"))
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// A registered user suitable for profile lookups.
pub fn sample_user(id: i32, expert: bool) -> User {
    User {
        id: UserId::new(id),
        last_name: "Lovelace".to_owned(),
        first_name: "Ada".to_owned(),
        middle_name: None,
        mail: "ada@example.org".to_owned(),
        expert,
        score: Score::floor(100),
    }
}

/// Mock for every port; tests set expectations on the ones they exercise.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub registration: MockUserRegistration,
    pub profile: MockUserProfileQuery,
    pub ledger: MockScoreLedger,
    pub redemption: MockRedemptionCommand,
    pub products: MockProductCatalogue,
    pub ideas: MockIdeaBoard,
    pub comments: MockCommentThread,
    pub achievements: MockAchievementCatalogue,
}

impl MockPorts {
    /// Answer profile lookups for `user_id` with an expert or regular user.
    pub fn with_profile(mut self, user_id: i32, expert: bool) -> Self {
        self.profile
            .expect_fetch_profile()
            .returning(move |_| Ok(sample_user(user_id, expert)));
        self
    }

    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            login: Arc::new(self.login),
            registration: Arc::new(self.registration),
            profile: Arc::new(self.profile),
            ledger: Arc::new(self.ledger),
            redemption: Arc::new(self.redemption),
            products: Arc::new(self.products),
            ideas: Arc::new(self.ideas),
            comments: Arc::new(self.comments),
            achievements: Arc::new(self.achievements),
        })
    }
}
