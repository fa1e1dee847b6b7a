//! Payment page: order summary and the VNPay button.

use dioxus::prelude::*;
use ui::{page_messages, PaymentButton, PaymentDraft, RouteGuard};

/// Payment page for the booking in the `booking` query parameter.
#[component]
pub fn Payment(booking: String) -> Element {
    let draft = PaymentDraft::default().with_booking_code(booking);
    let total = format_vnd(draft.amount);
    let messages = use_hook(page_messages);

    rsx! {
        RouteGuard {
            div {
                class: "payment-container",
                h1 { {messages.payment_title()} }

                dl {
                    class: "order-summary",
                    dt { {messages.flight()} }
                    dd { "{draft.order_info}" }
                    if let Some(code) = draft.booking_code.as_ref() {
                        dt { {messages.booking_code()} }
                        dd { "{code}" }
                    }
                    dt { {messages.total()} }
                    dd { class: "total-amount", "{total}" }
                }

                PaymentButton { draft: draft.clone() }
            }
        }
    }
}

/// `1598000` → `"1.598.000 ₫"`.
fn format_vnd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out.push_str(" ₫");
    out
}
