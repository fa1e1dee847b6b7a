use dioxus::prelude::*;

use api::ClientSettings;
use ui::{AppContext, AuthProvider, ToastProvider};
use views::{Home, Login, Payment};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/login?:redirect")]
    Login { redirect: String },
    #[route("/payment?:booking")]
    Payment { booking: String },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const SETTINGS_TOML: &str = include_str!("../skyplan.toml");

fn main() {
    dioxus::launch(App);
}

/// Embedded settings, or the built-in defaults if they do not parse.
fn load_settings() -> ClientSettings {
    match ClientSettings::from_toml(SETTINGS_TOML) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Invalid skyplan.toml, using defaults: {}", e);
            ClientSettings::default()
        }
    }
}

#[component]
fn App() -> Element {
    // Resolved once per page load.
    use_context_provider(|| AppContext::for_page(&ui::make_browser(), &load_settings()));

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ToastProvider {
            AuthProvider {
                Router::<Route> {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_settings_parse() {
        let settings = ClientSettings::from_toml(SETTINGS_TOML).unwrap();
        assert_eq!(settings, ClientSettings::default());
        assert_eq!(load_settings(), settings);
    }
}
