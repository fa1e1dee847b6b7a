//! Toast context, timers and rendering.

use std::time::Duration;

use api::clock::now_millis;
use dioxus::prelude::*;

use crate::context::page_messages;
use crate::icons::{FaCircleCheck, FaCircleInfo, FaCircleXmark, FaXmark};
use crate::timer::sleep;
use crate::toast::{NotificationCenter, Notifier, ToastId, ToastKind, ToastOptions, ToastRecord};
use crate::Icon;

const TOAST_CSS: Asset = asset!("/assets/toast.css");

/// Handle to the page's [`NotificationCenter`]. Cheap to copy.
#[derive(Clone, Copy, PartialEq)]
pub struct Toaster {
    center: Signal<NotificationCenter>,
}

impl Toaster {
    /// Show a toast and schedule its transitions.
    pub fn show(&self, message: &str, options: ToastOptions) -> ToastId {
        let mut center = self.center;
        let id = center.write().emit_at(message, options, now_millis());
        self.schedule(id);
        id
    }

    /// Start the exit transition of `id`.
    pub fn dismiss(&self, id: ToastId) {
        let mut center = self.center;
        if center.write().dismiss_at(id, now_millis()) {
            self.schedule(id);
        }
    }

    /// Sleep until each deadline of `id` and apply it, until the toast is
    /// removed or becomes sticky.
    ///
    /// The loop runs in the root scope, so it outlives the component that
    /// emitted the toast.
    fn schedule(&self, id: ToastId) {
        let mut center = self.center;
        let task = spawn_forever(async move {
            loop {
                let next = match center.try_peek() {
                    Ok(center) => center.next_deadline(id),
                    Err(_) => break,
                };
                let Some(deadline) = next else { break };
                let now = now_millis();
                if deadline > now {
                    sleep(Duration::from_millis(deadline - now)).await;
                }
                match center.try_write() {
                    Ok(mut center) => center.advance_to(now_millis().max(deadline)),
                    Err(_) => break,
                }
            }
        });
        if task.is_none() {
            tracing::warn!(%id, "no runtime to schedule toast");
        }
    }
}

impl Notifier for Toaster {
    fn emit(&self, message: &str, options: ToastOptions) -> Option<ToastId> {
        Some(self.show(message, options))
    }
}

/// The page's toaster, if a [`ToastProvider`] is mounted above.
pub fn use_toaster() -> Option<Toaster> {
    try_use_context::<Toaster>()
}

/// Provides a [`Toaster`] to its children and renders the toast stack.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let center = use_signal(NotificationCenter::new);
    use_context_provider(|| Toaster { center });

    rsx! {
        {children}
        ToastContainer { center }
    }
}

#[component]
fn ToastContainer(center: Signal<NotificationCenter>) -> Element {
    // The container is created lazily, on the first toast.
    if !center.read().has_container() {
        return rsx! {};
    }
    let toasts = center.read().toasts().to_vec();
    let toaster = Toaster { center };

    rsx! {
        document::Link { rel: "stylesheet", href: TOAST_CSS }
        div {
            id: "skyplan-toast-container",
            role: "status",
            for toast in toasts {
                ToastView { key: "{toast.id}", toast: toast.clone(), toaster }
            }
        }
    }
}

#[component]
fn ToastView(toast: ToastRecord, toaster: Toaster) -> Element {
    let id = toast.id;
    let close_label = use_hook(page_messages).close();
    let class = if toast.is_shown() {
        format!("skyplan-toast type-{} show", toast.kind.as_str())
    } else {
        format!("skyplan-toast type-{}", toast.kind.as_str())
    };

    rsx! {
        div {
            class: "{class}",
            div {
                class: "toast-icon",
                aria_hidden: "true",
                {toast_icon(toast.kind)}
            }
            div {
                class: "toast-body",
                dangerous_inner_html: "{toast.message}",
            }
            if toast.dismissible {
                button {
                    class: "toast-close",
                    aria_label: "{close_label}",
                    onclick: move |_| toaster.dismiss(id),
                    Icon { icon: FaXmark, width: 14, height: 14 }
                }
            }
        }
    }
}

fn toast_icon(kind: ToastKind) -> Element {
    match kind {
        ToastKind::Success => rsx! { Icon { icon: FaCircleCheck, width: 18, height: 18 } },
        ToastKind::Error => rsx! { Icon { icon: FaCircleXmark, width: 18, height: 18 } },
        ToastKind::Info => rsx! { Icon { icon: FaCircleInfo, width: 18, height: 18 } },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    thread_local! {
        static TOASTER: Cell<Option<Toaster>> = const { Cell::new(None) };
        static SHOW_EMITTER: Cell<Option<Signal<bool>>> = const { Cell::new(None) };
    }

    #[component]
    fn Harness() -> Element {
        let show_emitter = use_signal(|| true);
        SHOW_EMITTER.with(|cell| cell.set(Some(show_emitter)));

        rsx! {
            ToastProvider {
                if show_emitter() {
                    Emitter {}
                }
            }
        }
    }

    /// Shows a toast from its own task, the way `PaymentButton` does.
    #[component]
    fn Emitter() -> Element {
        let toaster = use_toaster();
        use_hook(move || {
            spawn(async move {
                if let Some(toaster) = toaster {
                    TOASTER.with(|cell| cell.set(Some(toaster)));
                    toaster.show("short", ToastOptions::error().with_duration(200));
                }
            });
        });

        rsx! {
            p { "emitter" }
        }
    }

    fn toast_count(dom: &VirtualDom) -> Option<usize> {
        let toaster = TOASTER.with(Cell::get)?;
        Some(dom.in_runtime(|| toaster.center.peek().toasts().len()))
    }

    async fn pump_until(dom: &mut VirtualDom, done: impl Fn(&VirtualDom) -> bool) -> bool {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(3);
        while !done(dom) {
            if tokio::time::timeout_at(deadline, dom.wait_for_work())
                .await
                .is_err()
            {
                return false;
            }
            dom.render_immediate_to_vec();
        }
        true
    }

    #[tokio::test]
    async fn test_timed_toast_outlives_emitting_component() {
        let mut dom = VirtualDom::new(Harness);
        dom.rebuild_in_place();

        assert!(pump_until(&mut dom, |dom| toast_count(dom) == Some(1)).await);

        // Unmount the emitter while its toast is still on screen.
        let mut show_emitter = SHOW_EMITTER.with(Cell::get).unwrap();
        dom.in_runtime(|| show_emitter.set(false));
        dom.process_events();
        dom.render_immediate_to_vec();
        assert_eq!(toast_count(&dom), Some(1));

        assert!(pump_until(&mut dom, |dom| toast_count(dom) == Some(0)).await);
    }
}
