//! # Auth gateway: login form state machine
//!
//! One [`LoginControl`] per login form; one [`AuthGateway`] per page.
//!
//! ```text
//! Idle ─submit─► Validating ─┬─ field errors ─────────────────► Idle
//!                            └─ ok ─► Submitting ─┬─ 2xx ─► Succeeded (navigates away)
//!                                                 └─ error ──► Idle (+ password error)
//! ```
//!
//! The flow is split in three steps so that the busy flag flips synchronously,
//! before anything is awaited:
//!
//! 1. [`LoginControl::begin`] validates and marks the control busy;
//! 2. [`AuthGateway::authenticate`] performs the request and saves the session;
//! 3. [`AuthGateway::complete`] navigates or restores the control.
//!
//! [`AuthGateway::submit`] chains the three for callers that own the control.

use api::routes;
use api::{ApiResult, Credentials, EndpointMap, HttpClient};
use store::{KeyValueTier, PersistenceStrategy, SessionRecord, SessionStore};

use crate::browser::Browser;
use crate::messages::Messages;

/// Durable-tier keys of the booking in progress, dropped on logout.
pub const BOOKING_KEYS: [&str; 5] = [
    "currentPassenger",
    "selectedSeats",
    "skyplan_extras_v2",
    "bookingTotal",
    "skyplan_trip_selection",
];

/// Raw form values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
    pub remember: bool,
}

/// Inline, per-field validation messages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// Check both fields independently. Email is trimmed, the password is not.
pub fn validate_login(input: &LoginInput, messages: &Messages) -> Result<Credentials, FieldErrors> {
    let email = input.email.trim();
    let mut errors = FieldErrors::default();

    if email.is_empty() {
        errors.email = Some(messages.email_required().to_string());
    } else if !api::auth::is_valid_email(email) {
        errors.email = Some(messages.email_invalid().to_string());
    }
    if input.password.is_empty() {
        errors.password = Some(messages.password_required().to_string());
    }

    if errors.is_empty() {
        Ok(Credentials::new(email, input.password.clone()))
    } else {
        Err(errors)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    /// Session saved and navigation issued. The control stays disabled.
    Succeeded,
}

/// A validated login ready to be sent.
#[derive(Clone, Debug, PartialEq)]
pub struct LoginRequest {
    pub credentials: Credentials,
    pub strategy: PersistenceStrategy,
}

/// UI state of one login form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginControl {
    pub phase: LoginPhase,
    pub errors: FieldErrors,
}

impl LoginControl {
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, LoginPhase::Submitting | LoginPhase::Succeeded)
    }

    /// Validate `input` and, if it passes, mark the control busy.
    ///
    /// Returns `None` (and issues nothing) when the control is already busy or
    /// a field is invalid.
    pub fn begin(&mut self, input: &LoginInput, messages: &Messages) -> Option<LoginRequest> {
        if self.is_busy() {
            tracing::debug!("login already in flight, ignoring submit");
            return None;
        }

        self.phase = LoginPhase::Validating;
        self.errors = FieldErrors::default();
        match validate_login(input, messages) {
            Ok(credentials) => {
                self.phase = LoginPhase::Submitting;
                Some(LoginRequest {
                    credentials,
                    strategy: PersistenceStrategy::from_remember(input.remember),
                })
            }
            Err(errors) => {
                self.errors = errors;
                self.phase = LoginPhase::Idle;
                None
            }
        }
    }
}

/// How a submit ended.
#[derive(Clone, Debug, PartialEq)]
pub enum LoginOutcome {
    /// Validation failed or the control was busy; no request was made.
    NotSubmitted,
    Redirected { target: String },
    Failed { message: String },
}

/// Login, logout and the login-page guard.
#[derive(Clone, Debug)]
pub struct AuthGateway<C, D, S, B> {
    client: C,
    endpoints: EndpointMap,
    sessions: SessionStore<D, S>,
    browser: B,
}

impl<C, D, S, B> AuthGateway<C, D, S, B>
where
    C: HttpClient,
    D: KeyValueTier,
    S: KeyValueTier,
    B: Browser,
{
    pub fn new(client: C, endpoints: EndpointMap, sessions: SessionStore<D, S>, browser: B) -> Self {
        Self {
            client,
            endpoints,
            sessions,
            browser,
        }
    }

    pub fn sessions(&self) -> &SessionStore<D, S> {
        &self.sessions
    }

    /// Send the credentials and store the session on success.
    pub async fn authenticate(&self, request: LoginRequest) -> ApiResult<SessionRecord> {
        let success = api::auth::login(&self.client, &self.endpoints, &request.credentials).await?;
        Ok(self.sessions.save(&success.user, &success.token, request.strategy))
    }

    /// Apply the result of [`authenticate`](Self::authenticate) to the control.
    pub fn complete(
        &self,
        control: &mut LoginControl,
        result: ApiResult<SessionRecord>,
        messages: &Messages,
    ) -> LoginOutcome {
        match result {
            Ok(record) => {
                let target = routes::redirect_target(&self.browser.href());
                tracing::info!(tier = %record.tier, %target, "login succeeded");
                control.phase = LoginPhase::Succeeded;
                self.browser.navigate(&target);
                LoginOutcome::Redirected { target }
            }
            Err(e) => {
                let message = e.user_message(messages.login_failed()).to_string();
                control.errors.password = Some(message.clone());
                control.phase = LoginPhase::Idle;
                LoginOutcome::Failed { message }
            }
        }
    }

    /// Validate, send and complete in one go.
    pub async fn submit(
        &self,
        control: &mut LoginControl,
        input: &LoginInput,
        messages: &Messages,
    ) -> LoginOutcome {
        let Some(request) = control.begin(input, messages) else {
            return LoginOutcome::NotSubmitted;
        };
        let result = self.authenticate(request).await;
        self.complete(control, result, messages)
    }

    /// Send an authenticated visitor away from the login page.
    ///
    /// Returns `true` if a navigation was issued.
    pub fn guard_login_page(&self) -> bool {
        if routes::is_login_path(&self.browser.path()) && self.sessions.is_logged_in() {
            self.browser.navigate(routes::SITE_ROOT);
            return true;
        }
        false
    }

    /// Send a visitor without a live session on a protected page to the login
    /// page, remembering where they were.
    pub fn guard_protected_page(&self) -> bool {
        self.guard_protected_page_at(api::clock::now_millis())
    }

    /// [`guard_protected_page`](Self::guard_protected_page) at `now_ms`. A
    /// stored session whose token has expired is cleared first.
    pub fn guard_protected_page_at(&self, now_ms: u64) -> bool {
        if !routes::is_protected(&self.browser.path()) {
            return false;
        }
        match self.sessions.load() {
            Some(record) if !api::auth::is_token_expired(&record.token, now_ms) => false,
            stored => {
                if stored.is_some() {
                    tracing::info!("session token expired, clearing session");
                    self.sessions.clear();
                }
                let target = routes::login_url_with_redirect(&self.browser.href());
                self.browser.navigate(&target);
                true
            }
        }
    }

    /// Forget the session in both tiers, drop the booking in progress and go
    /// to the login page.
    pub fn logout(&self) {
        self.sessions.clear();
        for key in BOOKING_KEYS {
            self.sessions.durable().remove(key);
        }
        self.browser.navigate(routes::LOGIN_PATH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::MemoryBrowser;
    use crate::messages::Language;
    use api::testing::StubClient;
    use api::ApiError;
    use serde_json::json;
    use store::{MemoryTier, Tier};

    type TestGateway = AuthGateway<StubClient, MemoryTier, MemoryTier, MemoryBrowser>;

    fn gateway(href: &str) -> (TestGateway, StubClient, MemoryBrowser) {
        let client = StubClient::new();
        let browser = MemoryBrowser::at(href);
        let gateway = AuthGateway::new(
            client.clone(),
            EndpointMap::from_base("http://localhost:5000"),
            SessionStore::new(MemoryTier::new(), MemoryTier::new()),
            browser.clone(),
        );
        (gateway, client, browser)
    }

    fn input(email: &str, password: &str, remember: bool) -> LoginInput {
        LoginInput {
            email: email.to_string(),
            password: password.to_string(),
            remember,
        }
    }

    #[tokio::test]
    async fn test_invalid_email_makes_no_request() {
        let (gateway, client, browser) = gateway("http://localhost:8080/login");
        let messages = Language::Vi.messages();
        let mut control = LoginControl::default();

        let outcome = gateway
            .submit(&mut control, &input("not-an-email", "secret", false), &messages)
            .await;

        assert_eq!(outcome, LoginOutcome::NotSubmitted);
        assert_eq!(client.request_count(), 0);
        assert_eq!(control.phase, LoginPhase::Idle);
        assert_eq!(control.errors.email.as_deref(), Some("Email không hợp lệ"));
        assert!(control.errors.password.is_none());
        assert!(browser.navigations().is_empty());
    }

    #[test]
    fn test_both_field_errors_reported() {
        let messages = Language::En.messages();
        let errors = validate_login(&input("   ", "", true), &messages).unwrap_err();
        assert_eq!(errors.email.as_deref(), Some("Please enter your email"));
        assert_eq!(errors.password.as_deref(), Some("Please enter your password"));

        let creds = validate_login(&input("  a@b.com ", " pw ", true), &messages).unwrap();
        assert_eq!(creds.email, "a@b.com");
        assert_eq!(creds.password, " pw ");
    }

    #[tokio::test]
    async fn test_remembered_login_saves_durable_and_redirects_home() {
        let (gateway, client, browser) = gateway("http://localhost:8080/login");
        client.reply(200, json!({"user": {"id": 7}, "token": "t1"}));
        let mut control = LoginControl::default();

        let outcome = gateway
            .submit(&mut control, &input("a@b.com", "pw", true), &Messages::default())
            .await;

        assert_eq!(outcome, LoginOutcome::Redirected { target: "/".to_string() });
        assert_eq!(browser.last_navigation().as_deref(), Some("/"));
        assert_eq!(control.phase, LoginPhase::Succeeded);
        assert!(control.is_busy());

        let record = gateway.sessions().load().unwrap();
        assert_eq!(record.user, json!({"id": 7}));
        assert_eq!(record.token, "t1");
        assert_eq!(record.tier, Tier::Durable);
        assert!(gateway.sessions().session_scoped().is_empty());
    }

    #[tokio::test]
    async fn test_login_follows_redirect_parameter() {
        let (gateway, client, browser) =
            gateway("http://localhost:8080/login?redirect=%2Fpayment%3Fbooking%3DSP1");
        client.reply(200, json!({"user": {"id": 1}, "token": "t"}));
        let mut control = LoginControl::default();

        gateway
            .submit(&mut control, &input("a@b.com", "pw", false), &Messages::default())
            .await;

        assert_eq!(browser.last_navigation().as_deref(), Some("/payment?booking=SP1"));
        assert_eq!(gateway.sessions().load().unwrap().tier, Tier::SessionScoped);
        assert!(gateway.sessions().durable().is_empty());
    }

    #[tokio::test]
    async fn test_failed_login_shows_server_message_and_reenables() {
        let (gateway, client, browser) = gateway("http://localhost:8080/login");
        client.reply(401, json!({"success": false, "message": "Invalid email or password"}));
        let mut control = LoginControl::default();

        let outcome = gateway
            .submit(&mut control, &input("a@b.com", "wrong", true), &Messages::default())
            .await;

        assert_eq!(
            outcome,
            LoginOutcome::Failed { message: "Invalid email or password".to_string() }
        );
        assert_eq!(control.phase, LoginPhase::Idle);
        assert!(!control.is_busy());
        assert_eq!(control.errors.password.as_deref(), Some("Invalid email or password"));
        assert!(browser.navigations().is_empty());
        assert!(gateway.sessions().load().is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_uses_generic_message() {
        let (gateway, client, _browser) = gateway("http://localhost:8080/login");
        client.fail(ApiError::transport("offline"));
        let messages = Language::En.messages();
        let mut control = LoginControl::default();

        let outcome = gateway
            .submit(&mut control, &input("a@b.com", "pw", true), &messages)
            .await;

        assert_eq!(
            outcome,
            LoginOutcome::Failed { message: messages.login_failed().to_string() }
        );
        assert_eq!(control.phase, LoginPhase::Idle);
    }

    #[test]
    fn test_busy_control_ignores_second_submit() {
        let messages = Messages::default();
        let mut control = LoginControl::default();
        let form = input("a@b.com", "pw", false);

        assert!(control.begin(&form, &messages).is_some());
        assert_eq!(control.phase, LoginPhase::Submitting);
        assert!(control.begin(&form, &messages).is_none());
        assert_eq!(control.phase, LoginPhase::Submitting);
    }

    #[test]
    fn test_login_page_guard() {
        let (gateway, _client, browser) = gateway("http://localhost:8080/login");
        assert!(!gateway.guard_login_page());

        gateway
            .sessions()
            .save(&json!({"id": 1}), "t", PersistenceStrategy::Durable);
        assert!(gateway.guard_login_page());
        assert_eq!(browser.last_navigation().as_deref(), Some("/"));

        let (elsewhere, _client, browser) = gateway_with_session("http://localhost:8080/search");
        assert!(!elsewhere.guard_login_page());
        assert!(browser.navigations().is_empty());
    }

    #[test]
    fn test_protected_page_guard() {
        let (gateway, _client, browser) = gateway("http://localhost:8080/payment?booking=SP1");
        assert!(gateway.guard_protected_page());
        assert_eq!(
            browser.last_navigation().as_deref(),
            Some("/login?redirect=http%3A%2F%2Flocalhost%3A8080%2Fpayment%3Fbooking%3DSP1")
        );

        let (gateway, _client, browser) = gateway_with_session("http://localhost:8080/payment");
        assert!(!gateway.guard_protected_page());
        assert!(browser.navigations().is_empty());
    }

    #[test]
    fn test_logout_clears_both_tiers() {
        let (gateway, _client, browser) = gateway_with_session("http://localhost:8080/profile");
        gateway
            .sessions()
            .save(&json!({"id": 1}), "t2", PersistenceStrategy::SessionScoped);

        gateway.logout();

        assert!(gateway.sessions().load().is_none());
        assert!(gateway.sessions().durable().is_empty());
        assert!(gateway.sessions().session_scoped().is_empty());
        assert_eq!(browser.last_navigation().as_deref(), Some("/login"));
    }

    #[test]
    fn test_logout_drops_booking_in_progress() {
        let (gateway, _client, _browser) = gateway_with_session("http://localhost:8080/extras");
        let durable = gateway.sessions().durable();
        for key in BOOKING_KEYS {
            durable.set(key, "{}");
        }
        durable.set("preferredLanguage", "en");

        gateway.logout();

        for key in BOOKING_KEYS {
            assert!(durable.get(key).is_none(), "{key} survived logout");
        }
        assert_eq!(durable.get("preferredLanguage").as_deref(), Some("en"));
    }

    #[test]
    fn test_expired_token_is_cleared_and_redirected() {
        let (gateway, _client, browser) = gateway("http://localhost:8080/payment");
        // {"sub":"7","exp":1600000000}
        let token = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiI3IiwiZXhwIjoxNjAwMDAwMDAwfQ.c2ln";
        gateway
            .sessions()
            .save(&json!({"id": 7}), token, PersistenceStrategy::Durable);

        assert!(!gateway.guard_protected_page_at(1_500_000_000_000));
        assert!(browser.navigations().is_empty());

        assert!(gateway.guard_protected_page_at(1_700_000_000_000));
        assert!(gateway.sessions().load().is_none());
        assert_eq!(
            browser.last_navigation().as_deref(),
            Some("/login?redirect=http%3A%2F%2Flocalhost%3A8080%2Fpayment")
        );
    }

    fn gateway_with_session(href: &str) -> (TestGateway, StubClient, MemoryBrowser) {
        let (gateway, client, browser) = gateway(href);
        gateway
            .sessions()
            .save(&json!({"id": 1}), "t", PersistenceStrategy::Durable);
        (gateway, client, browser)
    }
}
