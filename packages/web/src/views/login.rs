//! Login page view.

use dioxus::prelude::*;
use ui::{page_messages, LoginForm};

/// Login page component. `redirect` is where the form sends the visitor after
/// signing in.
#[component]
pub fn Login(redirect: String) -> Element {
    let messages = use_hook(page_messages);

    rsx! {
        div {
            class: "login-container",

            h1 { class: "login-title", "SkyPlan" }

            if !redirect.is_empty() {
                p {
                    class: "login-hint",
                    {messages.login_required()}
                }
            }

            LoginForm {}
        }
    }
}
