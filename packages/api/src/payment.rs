//! # VNPay payment creation
//!
//! The client never talks to VNPay directly. It asks the SkyPlan backend to
//! sign a payment URL ([`create_vnpay_payment`]) and then sends the browser
//! there. Each attempt carries a fresh transaction reference from
//! [`TxnRefGenerator`].
//!
//! | Reply | Result |
//! |-------|--------|
//! | 2xx `{success: true, paymentUrl}` | `Ok(paymentUrl)` |
//! | any `{success: false, error}` | [`ApiError::Rejected`] (2xx) or [`ApiError::Status`] |
//! | non-2xx without a body we understand | [`ApiError::Status`] |
//! | 2xx that is not JSON / lacks `paymentUrl` | [`ApiError::Decode`] |

use std::cell::Cell;

use chrono::{Datelike, Local, TimeZone};

use crate::config::EndpointMap;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpClient, HttpReply};
use crate::models::{ErrorBody, PaymentCreatedBody, PaymentIntentRequest};

/// Amount charged when the page shows no parsable total.
pub const DEFAULT_AMOUNT: u64 = 1_598_000;
/// Order description sent with every payment.
pub const DEFAULT_ORDER_INFO: &str = "Ve may bay HAN-SGN";

/// `POST {apiBase}/api/payment/vnpay/create`. Returns the payment URL.
pub async fn create_vnpay_payment<C: HttpClient>(
    client: &C,
    endpoints: &EndpointMap,
    request: &PaymentIntentRequest,
) -> ApiResult<String> {
    let body = serde_json::to_string(request).map_err(ApiError::decode)?;
    tracing::debug!(txn_ref = %request.txn_ref, amount = request.amount, "vnpay create request");

    let reply = client.post_json(&endpoints.vnpay_create, body).await?;
    let result = parse_payment_reply(&reply);
    if let Err(e) = &result {
        tracing::warn!(txn_ref = %request.txn_ref, status = reply.status, "vnpay create failed: {e}");
    }
    result
}

fn parse_payment_reply(reply: &HttpReply) -> ApiResult<String> {
    if !reply.is_success() {
        return Err(ApiError::Status {
            status: reply.status,
            message: ErrorBody::message_from(&reply.body),
        });
    }

    let body: PaymentCreatedBody = serde_json::from_str(&reply.body).map_err(ApiError::decode)?;
    if !body.success {
        return Err(ApiError::Rejected {
            message: body.error,
        });
    }
    body.payment_url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ApiError::decode("payment response has no paymentUrl"))
}

/// Issues transaction references of the form `{bookingCode}_{stamp}`.
///
/// The stamp is the wall clock in milliseconds, bumped past the previous stamp
/// whenever the clock does not move forward, so two attempts within the same
/// millisecond still get distinct references.
#[derive(Debug, Default)]
pub struct TxnRefGenerator {
    last_stamp: Cell<u64>,
}

impl TxnRefGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, booking_code: &str, now_ms: u64) -> String {
        let stamp = now_ms.max(self.last_stamp.get() + 1);
        self.last_stamp.set(stamp);
        format!("{booking_code}_{stamp}")
    }
}

/// Booking code used when neither the page nor storage has one: `SP`, the
/// local year, then the five trailing digits of the timestamp.
pub fn placeholder_booking_code(now_ms: u64) -> String {
    let year = i64::try_from(now_ms)
        .ok()
        .and_then(|ms| Local.timestamp_millis_opt(ms).single())
        .map(|at| at.year())
        .unwrap_or(1970);
    format!("SP{year}{:05}", now_ms % 100_000)
}

/// Digits of a displayed price (`"1.598.000 ₫"` → `1598000`). Zero and
/// digit-free text yield `None`.
pub fn parse_amount(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<u64>().ok().filter(|amount| *amount > 0)
}
