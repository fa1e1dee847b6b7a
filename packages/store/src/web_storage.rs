//! # Web Storage tier: browser-side persistence
//!
//! [`WebStorageTier`] is the [`KeyValueTier`] implementation used on the **web
//! platform**. It wraps a [`web_sys::Storage`] handle, either
//! `window.localStorage` ([`WebStorageTier::local`]) or `window.sessionStorage`
//! ([`WebStorageTier::session`]).
//!
//! ## Availability
//!
//! Both constructors return `None` when there is no `window` or when the
//! browser refuses access to the storage area (sandboxed iframes, some
//! private-browsing modes). Callers fall back to a
//! [`MemoryTier`](crate::MemoryTier) in that case.
//!
//! ## Error handling
//!
//! All trait methods swallow `JsValue` errors (quota exceeded, security
//! errors). The session simply looks absent on the next page load.

use crate::tier::KeyValueTier;
use web_sys::Storage;

/// `localStorage` / `sessionStorage` backed tier.
#[derive(Clone, Debug)]
pub struct WebStorageTier {
    storage: Storage,
}

impl WebStorageTier {
    /// Durable tier (`window.localStorage`).
    pub fn local() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }

    /// Tab-scoped tier (`window.sessionStorage`).
    pub fn session() -> Option<Self> {
        let storage = web_sys::window()?.session_storage().ok()??;
        Some(Self { storage })
    }
}

impl KeyValueTier for WebStorageTier {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if self.storage.set_item(key, value).is_err() {
            tracing::warn!(key, "web storage rejected write");
        }
    }

    fn remove(&self, key: &str) {
        let _ = self.storage.remove_item(key);
    }
}
