//! "Pay with VNPay" button.

use dioxus::prelude::*;

use crate::context::{page_messages, use_app_context};
use crate::payment::{PaymentControl, PaymentDraft};
use crate::toaster::{use_toaster, Toaster};

/// Starts a VNPay payment for `draft` and follows the returned URL.
/// Failures are shown as toasts (or alerts without a
/// [`ToastProvider`](crate::ToastProvider)).
#[component]
pub fn PaymentButton(
    draft: PaymentDraft,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let ctx = use_app_context();
    let initiator = use_hook(|| ctx.payment_initiator());
    let messages = use_hook(page_messages);
    let toaster = use_toaster();
    let mut control = use_signal(|| PaymentControl::new(messages.pay_with_vnpay()));

    let onclick = move |_| {
        let now = api::clock::now_millis();
        let Some(request) = initiator.begin(&mut control.write(), &draft, &messages, now) else {
            return;
        };

        let initiator = initiator.clone();
        spawn(async move {
            let result = initiator.create(&request).await;
            initiator.complete::<Toaster>(&mut control.write(), result, toaster.as_ref(), &messages);
        });
    };

    let busy = control.read().busy;
    let label = control.read().label.clone();

    rsx! {
        button {
            class: "payment-btn {class}",
            disabled: busy,
            onclick: onclick,
            "{label}"
        }
    }
}
