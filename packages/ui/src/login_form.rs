//! Email/password login form.

use dioxus::prelude::*;

use crate::auth::AuthState;
use crate::auth_gateway::{LoginControl, LoginInput};
use crate::context::{page_messages, use_app_context};

/// Login form bound to an [`AuthGateway`](crate::AuthGateway).
///
/// A visitor who already has a session is sent to `/` on mount.
#[component]
pub fn LoginForm(#[props(default = "".to_string())] class: String) -> Element {
    let ctx = use_app_context();
    let gateway = use_hook(|| ctx.auth_gateway());
    let messages = use_hook(page_messages);
    let auth_state = try_use_context::<Signal<AuthState>>();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut remember = use_signal(|| false);
    let mut control = use_signal(LoginControl::default);

    use_hook({
        let gateway = gateway.clone();
        move || {
            gateway.guard_login_page();
        }
    });

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let input = LoginInput {
            email: email(),
            password: password(),
            remember: remember(),
        };
        // Flip to busy before anything is awaited.
        let Some(request) = control.write().begin(&input, &messages) else {
            return;
        };

        let gateway = gateway.clone();
        spawn(async move {
            let result = gateway.authenticate(request).await;
            if let (Ok(record), Some(mut auth_state)) = (&result, auth_state) {
                auth_state.set(AuthState {
                    session: Some(record.clone()),
                });
            }
            gateway.complete(&mut control.write(), result, &messages);
        });
    };

    let busy = control.read().is_busy();
    let email_error = control.read().errors.email.clone();
    let password_error = control.read().errors.password.clone();
    let email_class = if email_error.is_some() { "is-invalid" } else { "" };
    let password_class = if password_error.is_some() { "is-invalid" } else { "" };
    let label = if busy {
        messages.signing_in()
    } else {
        messages.sign_in()
    };

    rsx! {
        form {
            class: "login-form {class}",
            novalidate: true,
            onsubmit: onsubmit,

            div {
                class: "form-group",
                label { r#for: "email", "Email" }
                input {
                    id: "email",
                    r#type: "email",
                    class: email_class,
                    value: "{email}",
                    oninput: move |e| email.set(e.value()),
                }
                if let Some(error) = email_error {
                    div { class: "invalid-feedback", "{error}" }
                }
            }

            div {
                class: "form-group",
                label { r#for: "password", "Password" }
                input {
                    id: "password",
                    r#type: "password",
                    class: password_class,
                    value: "{password}",
                    oninput: move |e| password.set(e.value()),
                }
                if let Some(error) = password_error {
                    div { class: "invalid-feedback", "{error}" }
                }
            }

            label {
                class: "remember-me",
                input {
                    r#type: "checkbox",
                    checked: remember(),
                    onchange: move |e| remember.set(e.checked()),
                }
                " Remember me"
            }

            button {
                r#type: "submit",
                class: "login-btn",
                disabled: busy,
                "{label}"
            }
        }
    }
}
