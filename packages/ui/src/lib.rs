//! This crate contains all shared UI for the workspace.
//!
//! | Module | Role |
//! |--------|------|
//! | [`toast`] | Toast state machine and the alert fallback |
//! | [`auth_gateway`] | Login validation, submission and guards |
//! | [`payment`] | VNPay payment initiation |
//! | [`browser`] | `window` access behind a trait |
//! | [`context`] | The page's [`AppContext`] and platform constructors |
//!
//! The flow modules hold no Dioxus state and are tested directly. Components
//! wrap them in signals.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod auth_gateway;
pub mod browser;
pub mod context;
pub mod messages;
pub mod payment;
pub mod toast;

mod timer;

pub use auth_gateway::{
    validate_login, AuthGateway, FieldErrors, LoginControl, LoginInput, LoginOutcome, LoginPhase,
    LoginRequest,
};
#[cfg(target_arch = "wasm32")]
pub use browser::WebBrowser;
pub use browser::{Browser, MemoryBrowser};
pub use context::{make_browser, make_session_store, page_messages, use_app_context, AppContext};
pub use messages::{Language, Messages};
pub use payment::{PaymentControl, PaymentDraft, PaymentInitiator, PaymentOutcome};
pub use toast::{
    notify, NotificationCenter, Notifier, ToastId, ToastKind, ToastOptions, ToastPhase, ToastRecord,
};

mod toaster;
pub use toaster::{use_toaster, ToastProvider, Toaster};

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton, RouteGuard, UserBadge};

mod login_form;
pub use login_form::LoginForm;

mod payment_button;
pub use payment_button::PaymentButton;
