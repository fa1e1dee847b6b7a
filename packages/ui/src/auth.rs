//! Session context and hooks for the UI.

use dioxus::prelude::*;
use store::SessionRecord;

use crate::context::{make_session_store, page_messages, use_app_context};

/// Authentication state for the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    /// Stored session, if any (session-scoped tier first).
    pub session: Option<SessionRecord>,
}

impl AuthState {
    /// Read the current session from storage.
    pub fn load() -> Self {
        Self {
            session: make_session_store().load(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that exposes the stored session to its children.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let auth_state = use_signal(AuthState::load);
    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Renders `children` only for a logged-in visitor. On a protected page,
/// anyone without a live session is sent to the login page with a return link.
#[component]
pub fn RouteGuard(children: Element) -> Element {
    let ctx = use_app_context();
    let mut auth_state = use_auth();

    use_effect(move || {
        if ctx.auth_gateway().guard_protected_page() && auth_state.peek().is_logged_in() {
            auth_state.set(AuthState::default());
        }
    });

    if auth_state.read().is_logged_in() {
        rsx! { {children} }
    } else {
        rsx! {}
    }
}

/// The logged-in visitor's name.
#[component]
pub fn UserBadge(#[props(default = "".to_string())] class: String) -> Element {
    let auth_state = use_auth();
    let name = auth_state
        .read()
        .session
        .as_ref()
        .map(|session| session.display_name().to_string());

    match name {
        Some(name) => rsx! {
            span { class: "{class}", "{name}" }
        },
        None => rsx! {},
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = None)] label: Option<String>,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let ctx = use_app_context();
    let mut auth_state = use_auth();
    let label = label.unwrap_or_else(|| page_messages().logout().to_string());

    let onclick = move |_| {
        ctx.auth_gateway().logout();
        auth_state.set(AuthState::default());
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
