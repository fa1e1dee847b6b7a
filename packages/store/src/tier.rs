//! # Persistence tiers: the key/value contract behind the session store
//!
//! A browser offers two string-keyed stores with the same API but different
//! lifetimes: `localStorage` (durable, origin-scoped) and `sessionStorage`
//! (scoped to one tab, cleared when it closes). [`KeyValueTier`] abstracts both
//! so that [`SessionStore`](crate::SessionStore) can be exercised against
//! [`MemoryTier`](crate::MemoryTier) in tests and on native targets.
//!
//! Implementations swallow backend failures: a read that fails is `None`, a
//! write that fails is dropped. Storage that is full, disabled or blocked by
//! privacy settings degrades to "nothing stored" instead of breaking the page.

use serde::{Deserialize, Serialize};

/// Synchronous string key/value store.
pub trait KeyValueTier {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Which tier a record was read from or written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Survives browser restarts (`localStorage`).
    Durable,
    /// Lives as long as the tab (`sessionStorage`).
    SessionScoped,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Durable => "durable",
            Tier::SessionScoped => "session",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: KeyValueTier + ?Sized> KeyValueTier for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

impl<T: KeyValueTier + ?Sized> KeyValueTier for std::rc::Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}
