//! # Session store: one authenticated identity over two persistence tiers
//!
//! [`SessionStore`] owns the login state of the page. It writes a record into
//! exactly one tier, chosen by the caller through [`PersistenceStrategy`]:
//!
//! | Strategy | Tier | Typical trigger |
//! |----------|------|-----------------|
//! | [`PersistenceStrategy::Durable`] | `localStorage` | "remember me" checked |
//! | [`PersistenceStrategy::SessionScoped`] | `sessionStorage` | "remember me" unchecked |
//!
//! ## Layout
//!
//! Both tiers use the same keys: `user` (profile JSON), `token` (opaque bearer
//! string) and `isLoggedIn` (`"true"` sentinel).
//!
//! ## Precedence
//!
//! [`SessionStore::load`] reads the session-scoped tier first and only falls
//! back to the durable tier when the session-scoped tier has no complete
//! record. A tab-local login therefore shadows an older "remember me" login in
//! the same tab, even though the durable record is still valid.
//!
//! A tier holds a record only when both `user` and `token` are present and
//! `user` parses as JSON. Anything else reads as absent; it is never surfaced
//! as an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tier::{KeyValueTier, Tier};

pub const USER_KEY: &str = "user";
pub const TOKEN_KEY: &str = "token";
pub const LOGGED_IN_KEY: &str = "isLoggedIn";

/// Keys written by older pages of the site. Removed on [`SessionStore::clear`]
/// so a stale token cannot resurface.
const LEGACY_KEYS: [&str; 4] = ["authToken", "currentUser", "accessToken", "jwt"];

/// Where a new session record should live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersistenceStrategy {
    Durable,
    SessionScoped,
}

impl PersistenceStrategy {
    /// Map the "remember me" checkbox to a strategy.
    pub fn from_remember(remember: bool) -> Self {
        if remember {
            Self::Durable
        } else {
            Self::SessionScoped
        }
    }

    pub fn tier(&self) -> Tier {
        match self {
            Self::Durable => Tier::Durable,
            Self::SessionScoped => Tier::SessionScoped,
        }
    }
}

/// An authenticated identity as stored in one tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Opaque profile object returned by the login endpoint.
    pub user: Value,
    /// Opaque bearer token.
    pub token: String,
    pub tier: Tier,
}

impl SessionRecord {
    /// Name shown in the header: `fullname`, then `email`, then `"User"`.
    pub fn display_name(&self) -> &str {
        ["fullname", "email"]
            .iter()
            .find_map(|key| {
                self.user
                    .get(*key)
                    .and_then(Value::as_str)
                    .filter(|name| !name.is_empty())
            })
            .unwrap_or("User")
    }
}

/// Dual-tier session persistence.
#[derive(Clone, Debug)]
pub struct SessionStore<D, S> {
    durable: D,
    session: S,
}

impl<D: KeyValueTier, S: KeyValueTier> SessionStore<D, S> {
    pub fn new(durable: D, session: S) -> Self {
        Self { durable, session }
    }

    pub fn durable(&self) -> &D {
        &self.durable
    }

    pub fn session_scoped(&self) -> &S {
        &self.session
    }

    /// Write `user` and `token` into the tier selected by `strategy`.
    ///
    /// The other tier is left untouched.
    pub fn save(&self, user: &Value, token: &str, strategy: PersistenceStrategy) -> SessionRecord {
        let serialized = user.to_string();
        match strategy {
            PersistenceStrategy::Durable => write_record(&self.durable, &serialized, token),
            PersistenceStrategy::SessionScoped => write_record(&self.session, &serialized, token),
        }
        tracing::debug!(tier = %strategy.tier(), "session saved");

        SessionRecord {
            user: user.clone(),
            token: token.to_string(),
            tier: strategy.tier(),
        }
    }

    /// Read the authoritative record, session-scoped tier first.
    pub fn load(&self) -> Option<SessionRecord> {
        read_record(&self.session, Tier::SessionScoped)
            .or_else(|| read_record(&self.durable, Tier::Durable))
    }

    pub fn is_logged_in(&self) -> bool {
        self.load().is_some()
    }

    /// Remove every session key from both tiers.
    pub fn clear(&self) {
        for key in [USER_KEY, TOKEN_KEY, LOGGED_IN_KEY].iter().chain(LEGACY_KEYS.iter()) {
            self.durable.remove(key);
            self.session.remove(key);
        }
        tracing::debug!("session cleared");
    }
}

fn write_record(tier: &impl KeyValueTier, user: &str, token: &str) {
    tier.set(USER_KEY, user);
    tier.set(TOKEN_KEY, token);
    tier.set(LOGGED_IN_KEY, "true");
}

fn read_record(tier: &impl KeyValueTier, which: Tier) -> Option<SessionRecord> {
    let raw_user = tier.get(USER_KEY)?;
    let token = tier.get(TOKEN_KEY)?;
    if raw_user.is_empty() || token.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(&raw_user) {
        Ok(user) => Some(SessionRecord {
            user,
            token,
            tier: which,
        }),
        Err(e) => {
            tracing::warn!(tier = %which, "ignoring stored user that is not valid JSON: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryTier;
    use serde_json::json;

    fn store() -> SessionStore<MemoryTier, MemoryTier> {
        SessionStore::new(MemoryTier::new(), MemoryTier::new())
    }

    #[test]
    fn test_durable_save_and_load() {
        let store = store();
        store.save(&json!({"id": 1}), "abc", PersistenceStrategy::Durable);

        let record = store.load().unwrap();
        assert_eq!(record.user, json!({"id": 1}));
        assert_eq!(record.token, "abc");
        assert_eq!(record.tier, Tier::Durable);

        assert!(store.session_scoped().get(USER_KEY).is_none());
        assert!(store.session_scoped().get(TOKEN_KEY).is_none());
        assert_eq!(store.durable().get(LOGGED_IN_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn test_session_scoped_save_and_load() {
        let store = store();
        store.save(&json!({"id": 2}), "xyz", PersistenceStrategy::SessionScoped);

        let record = store.load().unwrap();
        assert_eq!(record.token, "xyz");
        assert_eq!(record.tier, Tier::SessionScoped);
        assert!(store.durable().is_empty());
    }

    #[test]
    fn test_clear_removes_both_tiers() {
        let store = store();
        store.save(&json!({"id": 1}), "abc", PersistenceStrategy::Durable);
        store.save(&json!({"id": 1}), "abc", PersistenceStrategy::SessionScoped);
        store.durable().set("authToken", "legacy");

        store.clear();

        assert!(store.load().is_none());
        assert!(store.durable().is_empty());
        assert!(store.session_scoped().is_empty());
    }

    #[test]
    fn test_session_scoped_tier_shadows_durable() {
        let store = store();
        store.save(&json!({"id": 1}), "old", PersistenceStrategy::Durable);
        store.save(&json!({"id": 1}), "new", PersistenceStrategy::SessionScoped);

        let record = store.load().unwrap();
        assert_eq!(record.token, "new");
        assert_eq!(record.tier, Tier::SessionScoped);
    }

    #[test]
    fn test_partial_record_is_absent() {
        let store = store();
        store.session_scoped().set(TOKEN_KEY, "orphan");
        assert!(store.load().is_none());

        // A complete durable record still wins over a partial session one.
        store.save(&json!({"id": 3}), "t3", PersistenceStrategy::Durable);
        assert_eq!(store.load().unwrap().tier, Tier::Durable);
    }

    #[test]
    fn test_malformed_user_reads_as_absent() {
        let store = store();
        store.session_scoped().set(USER_KEY, "{not json");
        store.session_scoped().set(TOKEN_KEY, "t");
        assert!(store.load().is_none());
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_display_name_fallbacks() {
        let store = store();
        let record = store.save(
            &json!({"fullname": "Nguyen Van A", "email": "a@b.vn"}),
            "t",
            PersistenceStrategy::Durable,
        );
        assert_eq!(record.display_name(), "Nguyen Van A");

        let record = store.save(&json!({"email": "a@b.vn"}), "t", PersistenceStrategy::Durable);
        assert_eq!(record.display_name(), "a@b.vn");

        let record = store.save(&json!({"id": 9}), "t", PersistenceStrategy::Durable);
        assert_eq!(record.display_name(), "User");
    }
}
