//! Landing page with the session header.

use dioxus::prelude::*;
use ui::{page_messages, use_auth, LogoutButton, UserBadge};

use crate::Route;

#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let logged_in = auth.read().is_logged_in();
    let messages = use_hook(page_messages);

    rsx! {
        header {
            class: "site-header",
            span { class: "brand", "SkyPlan" }
            if logged_in {
                div {
                    class: "user-menu",
                    UserBadge { class: "user-name" }
                    LogoutButton { class: "logout-btn" }
                }
            } else {
                Link { to: Route::Login { redirect: String::new() }, class: "login-link", {messages.sign_in()} }
            }
        }

        main {
            class: "home",
            h1 { "SkyPlan" }
            p { {messages.tagline()} }
            if logged_in {
                Link {
                    to: Route::Payment { booking: String::new() },
                    class: "primary-link",
                    {messages.continue_to_payment()}
                }
            }
        }
    }
}
