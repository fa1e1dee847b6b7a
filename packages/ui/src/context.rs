//! Page-wide context and platform constructors.
//!
//! The web binary builds one [`AppContext`] at startup and provides it with
//! `use_context_provider`. Components get the resolved endpoints and the HTTP
//! client from it and pick storage and window access from here:
//! - **Web** (WASM + `web` feature): `localStorage`/`sessionStorage` and `window`
//! - **Native** (tests, desktop builds): process-wide [`MemoryTier`]s and a
//!   [`MemoryBrowser`](crate::MemoryBrowser)

use std::rc::Rc;

use api::{ClientConfig, ClientSettings, ReqwestClient};
use dioxus::prelude::*;
use store::{KeyValueTier, SessionStore};

use crate::auth_gateway::AuthGateway;
use crate::browser::Browser;
use crate::messages::{Language, Messages};
use crate::payment::PaymentInitiator;

/// A storage tier chosen at runtime.
pub type PageTier = Rc<dyn KeyValueTier>;

#[cfg(target_arch = "wasm32")]
pub type PageBrowser = crate::browser::WebBrowser;
#[cfg(not(target_arch = "wasm32"))]
pub type PageBrowser = crate::browser::MemoryBrowser;

pub type PageAuthGateway = AuthGateway<ReqwestClient, PageTier, PageTier, PageBrowser>;
pub type PagePaymentInitiator = PaymentInitiator<ReqwestClient, PageTier, PageBrowser>;

/// Immutable per-page configuration and transport.
#[derive(Clone, Debug)]
pub struct AppContext {
    pub config: ClientConfig,
    pub http: ReqwestClient,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: ReqwestClient::new(),
        }
    }

    /// Resolve the configuration for the page `browser` is on.
    pub fn for_page(browser: &impl Browser, settings: &ClientSettings) -> Self {
        Self::new(ClientConfig::resolve(
            &browser.host_name(),
            &browser.protocol(),
            settings,
        ))
    }

    pub fn auth_gateway(&self) -> PageAuthGateway {
        AuthGateway::new(
            self.http.clone(),
            self.config.endpoints().clone(),
            make_session_store(),
            make_browser(),
        )
    }

    pub fn payment_initiator(&self) -> PagePaymentInitiator {
        PaymentInitiator::new(
            self.http.clone(),
            self.config.endpoints().clone(),
            durable_tier(),
            make_browser(),
        )
    }
}

/// The [`AppContext`] provided by the app root.
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>()
}

/// Messages in the visitor's preferred language.
pub fn page_messages() -> Messages {
    Language::preferred(&durable_tier()).messages()
}

pub fn make_browser() -> PageBrowser {
    PageBrowser::default()
}

/// The platform's durable tier on its own.
pub fn durable_tier() -> PageTier {
    platform_tiers().0
}

/// Session store over the platform's two tiers.
pub fn make_session_store() -> SessionStore<PageTier, PageTier> {
    let (durable, session) = platform_tiers();
    SessionStore::new(durable, session)
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
fn platform_tiers() -> (PageTier, PageTier) {
    let durable: PageTier = match store::WebStorageTier::local() {
        Some(tier) => Rc::new(tier),
        None => {
            tracing::warn!("localStorage unavailable, session will not survive reload");
            Rc::new(store::MemoryTier::new())
        }
    };
    let session: PageTier = match store::WebStorageTier::session() {
        Some(tier) => Rc::new(tier),
        None => {
            tracing::warn!("sessionStorage unavailable");
            Rc::new(store::MemoryTier::new())
        }
    };
    (durable, session)
}

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
fn platform_tiers() -> (PageTier, PageTier) {
    use store::MemoryTier;

    thread_local! {
        static TIERS: (MemoryTier, MemoryTier) = (MemoryTier::new(), MemoryTier::new());
    }
    TIERS.with(|(durable, session)| {
        (
            Rc::new(durable.clone()) as PageTier,
            Rc::new(session.clone()) as PageTier,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::MemoryBrowser;
    use api::Environment;
    use serde_json::json;
    use store::PersistenceStrategy;

    #[test]
    fn test_context_resolves_from_page_location() {
        let settings = ClientSettings::default();

        let dev = AppContext::for_page(&MemoryBrowser::at("http://localhost:8080/"), &settings);
        assert_eq!(dev.config.environment(), Environment::Development);
        assert_eq!(
            dev.config.endpoints().login,
            "http://localhost:5000/api/auth/login"
        );

        let prod = AppContext::for_page(&MemoryBrowser::at("https://skyplan.vn/payment"), &settings);
        assert_eq!(prod.config.environment(), Environment::Production);
    }

    #[test]
    fn test_session_stores_share_native_tiers() {
        let first = make_session_store();
        first.save(&json!({"email": "a@b.com"}), "t", PersistenceStrategy::SessionScoped);

        let second = make_session_store();
        assert_eq!(second.load().unwrap().display_name(), "a@b.com");

        second.clear();
        assert!(first.load().is_none());
    }
}
