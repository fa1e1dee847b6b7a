//! Window access: location, navigation and the blocking alert.
//!
//! [`WebBrowser`] talks to `window` on WASM. [`MemoryBrowser`] records what the
//! flows asked for so tests (and native builds) can run without a page.

use std::cell::RefCell;
use std::rc::Rc;

/// The parts of `window` the client flows touch.
pub trait Browser {
    fn host_name(&self) -> String;
    /// Scheme with trailing colon, as `location.protocol` reports it.
    fn protocol(&self) -> String;
    fn path(&self) -> String;
    fn href(&self) -> String;
    /// Leave the page for `url`.
    fn navigate(&self, url: &str);
    /// Blocking platform alert. Last resort only.
    fn alert(&self, message: &str);
}

#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct WebBrowser;

#[cfg(target_arch = "wasm32")]
impl WebBrowser {
    fn location() -> Option<web_sys::Location> {
        web_sys::window().map(|window| window.location())
    }
}

#[cfg(target_arch = "wasm32")]
impl Browser for WebBrowser {
    fn host_name(&self) -> String {
        Self::location()
            .and_then(|l| l.hostname().ok())
            .unwrap_or_default()
    }

    fn protocol(&self) -> String {
        Self::location()
            .and_then(|l| l.protocol().ok())
            .unwrap_or_default()
    }

    fn path(&self) -> String {
        Self::location()
            .and_then(|l| l.pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }

    fn href(&self) -> String {
        Self::location()
            .and_then(|l| l.href().ok())
            .unwrap_or_default()
    }

    fn navigate(&self, url: &str) {
        match Self::location() {
            Some(location) => {
                if location.set_href(url).is_err() {
                    tracing::error!(url, "navigation refused");
                }
            }
            None => tracing::error!(url, "no window to navigate"),
        }
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

/// In-memory [`Browser`]. Clones share state.
#[derive(Clone, Debug)]
pub struct MemoryBrowser {
    inner: Rc<RefCell<MemoryBrowserState>>,
}

#[derive(Debug)]
struct MemoryBrowserState {
    href: String,
    navigations: Vec<String>,
    alerts: Vec<String>,
}

impl MemoryBrowser {
    /// A browser sitting on `href` (an absolute URL).
    pub fn at(href: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryBrowserState {
                href: href.to_string(),
                navigations: Vec::new(),
                alerts: Vec::new(),
            })),
        }
    }

    pub fn navigations(&self) -> Vec<String> {
        self.inner.borrow().navigations.clone()
    }

    pub fn last_navigation(&self) -> Option<String> {
        self.inner.borrow().navigations.last().cloned()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.inner.borrow().alerts.clone()
    }

    fn url(&self) -> Option<url::Url> {
        url::Url::parse(&self.inner.borrow().href).ok()
    }
}

impl Default for MemoryBrowser {
    fn default() -> Self {
        Self::at("http://localhost/")
    }
}

impl Browser for MemoryBrowser {
    fn host_name(&self) -> String {
        self.url()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default()
    }

    fn protocol(&self) -> String {
        self.url()
            .map(|u| format!("{}:", u.scheme()))
            .unwrap_or_default()
    }

    fn path(&self) -> String {
        self.url()
            .map(|u| u.path().to_string())
            .unwrap_or_else(|| "/".to_string())
    }

    fn href(&self) -> String {
        self.inner.borrow().href.clone()
    }

    fn navigate(&self, url: &str) {
        self.inner.borrow_mut().navigations.push(url.to_string());
    }

    fn alert(&self, message: &str) {
        self.inner.borrow_mut().alerts.push(message.to_string());
    }
}
