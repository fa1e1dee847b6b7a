//! # Toast notifications: state machine
//!
//! [`NotificationCenter`] holds every visible toast and decides when each one
//! appears, starts leaving and disappears. It works on explicit millisecond
//! timestamps and owns no timers: the Dioxus [`Toaster`](crate::Toaster)
//! sleeps until [`NotificationCenter::next_deadline`] and then calls
//! [`NotificationCenter::advance_to`]. Tests do the same with a fake clock.
//!
//! ## Lifecycle
//!
//! ```text
//! emit ─► Entering ──(layout tick)──► Shown ──(duration | dismiss)──► Leaving ──(exit transition)──► removed
//! ```
//!
//! - `duration_ms == 0` makes a toast sticky: it only leaves on dismissal.
//! - Toasts never merge or reorder; the stack is in emission order.
//! - A record is never mutated except to move its phase forward.

use crate::browser::Browser;

/// Auto-dismiss delay when the caller does not choose one.
pub const DEFAULT_DURATION_MS: u64 = 5_000;
/// Delay between insertion and the "shown" state, so the entry transition runs.
pub const LAYOUT_TICK_MS: u64 = 16;
/// Length of the exit transition before a toast is detached.
pub const EXIT_TRANSITION_MS: u64 = 350;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Presentation options of one toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToastOptions {
    pub kind: ToastKind,
    /// `0` = sticky.
    pub duration_ms: u64,
    pub dismissible: bool,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            kind: ToastKind::Info,
            duration_ms: DEFAULT_DURATION_MS,
            dismissible: true,
        }
    }
}

impl ToastOptions {
    pub fn error() -> Self {
        Self {
            kind: ToastKind::Error,
            ..Self::default()
        }
    }

    pub fn success() -> Self {
        Self {
            kind: ToastKind::Success,
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl std::fmt::Display for ToastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Shown,
    /// Exit transition running; detached at `remove_at`.
    Leaving { remove_at: u64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastRecord {
    pub id: ToastId,
    /// May carry simple markup.
    pub message: String,
    pub kind: ToastKind,
    pub duration_ms: u64,
    pub dismissible: bool,
    pub phase: ToastPhase,
    created_at: u64,
}

impl ToastRecord {
    pub fn is_shown(&self) -> bool {
        self.phase == ToastPhase::Shown
    }

    fn shown_at(&self) -> u64 {
        self.created_at.saturating_add(LAYOUT_TICK_MS)
    }

    fn expires_at(&self) -> Option<u64> {
        (self.duration_ms > 0).then(|| self.created_at.saturating_add(self.duration_ms))
    }
}

/// Ordered stack of live toasts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationCenter {
    toasts: Vec<ToastRecord>,
    next_id: u64,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a toast created at `now`.
    pub fn emit_at(&mut self, message: &str, options: ToastOptions, now: u64) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        self.toasts.push(ToastRecord {
            id,
            message: message.to_string(),
            kind: options.kind,
            duration_ms: options.duration_ms,
            dismissible: options.dismissible,
            phase: ToastPhase::Entering,
            created_at: now,
        });
        id
    }

    /// Start the exit transition of `id`. Returns `false` if it is unknown or
    /// already leaving.
    pub fn dismiss_at(&mut self, id: ToastId, now: u64) -> bool {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(toast) if !matches!(toast.phase, ToastPhase::Leaving { .. }) => {
                toast.phase = ToastPhase::Leaving {
                    remove_at: now.saturating_add(EXIT_TRANSITION_MS),
                };
                true
            }
            _ => false,
        }
    }

    /// Apply every transition due at or before `now`.
    pub fn advance_to(&mut self, now: u64) {
        for toast in &mut self.toasts {
            if toast.phase == ToastPhase::Entering && now >= toast.shown_at() {
                toast.phase = ToastPhase::Shown;
            }
            if let Some(expires_at) = toast.expires_at() {
                if !matches!(toast.phase, ToastPhase::Leaving { .. }) && now >= expires_at {
                    toast.phase = ToastPhase::Leaving {
                        remove_at: expires_at.saturating_add(EXIT_TRANSITION_MS),
                    };
                }
            }
        }
        self.toasts.retain(|toast| match toast.phase {
            ToastPhase::Leaving { remove_at } => now < remove_at,
            _ => true,
        });
    }

    /// When `id` next changes phase, or `None` if it never will on its own.
    pub fn next_deadline(&self, id: ToastId) -> Option<u64> {
        let toast = self.get(id)?;
        match toast.phase {
            ToastPhase::Entering => Some(toast.shown_at()),
            ToastPhase::Shown => toast.expires_at(),
            ToastPhase::Leaving { remove_at } => Some(remove_at),
        }
    }

    pub fn get(&self, id: ToastId) -> Option<&ToastRecord> {
        self.toasts.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: ToastId) -> bool {
        self.get(id).is_some()
    }

    pub fn toasts(&self) -> &[ToastRecord] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Whether anything was ever emitted (the container exists from then on).
    pub fn has_container(&self) -> bool {
        self.next_id > 0
    }
}

/// Something that can show a toast.
pub trait Notifier {
    /// Show `message`. `None` means the emitter could not take it.
    fn emit(&self, message: &str, options: ToastOptions) -> Option<ToastId>;
}

impl Notifier for std::cell::RefCell<NotificationCenter> {
    fn emit(&self, message: &str, options: ToastOptions) -> Option<ToastId> {
        let now = api::clock::now_millis();
        let mut center = self.try_borrow_mut().ok()?;
        Some(center.emit_at(message, options, now))
    }
}

/// Show `message` as a toast, or as a blocking alert when no emitter is
/// available.
pub fn notify<N: Notifier + ?Sized>(
    notifier: Option<&N>,
    browser: &impl Browser,
    message: &str,
    options: ToastOptions,
) -> Option<ToastId> {
    let id = notifier.and_then(|n| n.emit(message, options));
    if id.is_none() {
        tracing::warn!("toast emitter unavailable, falling back to alert");
        browser.alert(message);
    }
    id
}
