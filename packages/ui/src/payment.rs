//! # Payment initiator: "Pay with VNPay" button logic
//!
//! | Step | Method |
//! |------|--------|
//! | disable the control, build the request | [`PaymentInitiator::begin`] |
//! | ask the backend for a signed URL | [`PaymentInitiator::create`] |
//! | navigate, or toast and restore the control | [`PaymentInitiator::complete`] |
//!
//! [`PaymentInitiator::initiate`] runs all three. The returned `paymentUrl` is
//! followed as-is.
//!
//! The booking code comes from the page, else from the durable tier
//! ([`CURRENT_BOOKING_KEY`], then [`LAST_BOOKING_KEY`]), else a placeholder.
//! The resolved code and the amount are written back for the confirmation
//! page.

use std::rc::Rc;

use api::payment::{self, TxnRefGenerator, DEFAULT_AMOUNT, DEFAULT_ORDER_INFO};
use api::{ApiResult, EndpointMap, HttpClient, PaymentIntentRequest};
use store::KeyValueTier;

use crate::browser::Browser;
use crate::messages::Messages;
use crate::toast::{notify, Notifier, ToastId, ToastOptions};

/// How long a payment error stays on screen.
pub const PAYMENT_ERROR_DURATION_MS: u64 = 6_000;

/// Durable-tier key of the booking being paid.
pub const CURRENT_BOOKING_KEY: &str = "currentBookingCode";
/// Durable-tier key of the most recent booking.
pub const LAST_BOOKING_KEY: &str = "lastBookingCode";
/// Durable-tier key of the amount sent to VNPay.
pub const FINAL_AMOUNT_KEY: &str = "finalPaymentAmount";

/// What the page knows about the order being paid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentDraft {
    pub order_info: String,
    pub amount: u64,
    pub booking_code: Option<String>,
}

impl Default for PaymentDraft {
    fn default() -> Self {
        Self {
            order_info: DEFAULT_ORDER_INFO.to_string(),
            amount: DEFAULT_AMOUNT,
            booking_code: None,
        }
    }
}

impl PaymentDraft {
    /// Draft for a displayed total such as `"1.598.000 ₫"`. Unparsable text
    /// keeps the default amount.
    pub fn with_displayed_total(mut self, text: &str) -> Self {
        match payment::parse_amount(text) {
            Some(amount) => self.amount = amount,
            None => tracing::warn!(text, "unreadable total, using default amount"),
        }
        self
    }

    pub fn with_booking_code(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        self.booking_code = (!code.trim().is_empty()).then_some(code);
        self
    }
}

/// The pay button's state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaymentControl {
    pub busy: bool,
    pub label: String,
    idle_label: Option<String>,
}

impl PaymentControl {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            busy: false,
            label: label.into(),
            idle_label: None,
        }
    }

    fn disable(&mut self, busy_label: &str) {
        self.busy = true;
        self.idle_label = Some(std::mem::replace(&mut self.label, busy_label.to_string()));
    }

    fn restore(&mut self) {
        self.busy = false;
        if let Some(label) = self.idle_label.take() {
            self.label = label;
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PaymentOutcome {
    /// The control was busy; nothing was sent.
    Ignored,
    Redirected { url: String },
    Failed { message: String, toast: Option<ToastId> },
}

/// Creates VNPay payments and follows the returned URL.
///
/// Clones share the transaction reference sequence.
#[derive(Clone, Debug)]
pub struct PaymentInitiator<C, D, B> {
    client: C,
    endpoints: EndpointMap,
    durable: D,
    browser: B,
    txn_refs: Rc<TxnRefGenerator>,
}

impl<C: HttpClient, D: KeyValueTier, B: Browser> PaymentInitiator<C, D, B> {
    pub fn new(client: C, endpoints: EndpointMap, durable: D, browser: B) -> Self {
        Self {
            client,
            endpoints,
            durable,
            browser,
            txn_refs: Rc::new(TxnRefGenerator::new()),
        }
    }

    /// Page value, then stored value, then a fresh placeholder.
    fn resolve_booking_code(&self, draft: &PaymentDraft, now_ms: u64) -> String {
        if let Some(code) = &draft.booking_code {
            return code.clone();
        }
        let stored = [CURRENT_BOOKING_KEY, LAST_BOOKING_KEY]
            .iter()
            .find_map(|key| self.durable.get(key).filter(|code| !code.trim().is_empty()));
        match stored {
            Some(code) => code,
            None => {
                let code = payment::placeholder_booking_code(now_ms);
                tracing::warn!(%code, "no booking code on page or in storage, using placeholder");
                code
            }
        }
    }

    /// Disable `control` and build the request for `draft` at `now_ms`.
    /// Returns `None` while a payment is already in flight.
    pub fn begin(
        &self,
        control: &mut PaymentControl,
        draft: &PaymentDraft,
        messages: &Messages,
        now_ms: u64,
    ) -> Option<PaymentIntentRequest> {
        if control.busy {
            tracing::debug!("payment already in flight, ignoring click");
            return None;
        }

        let booking_code = self.resolve_booking_code(draft, now_ms);
        self.durable.set(FINAL_AMOUNT_KEY, &draft.amount.to_string());
        self.durable.set(CURRENT_BOOKING_KEY, &booking_code);
        self.durable.set(LAST_BOOKING_KEY, &booking_code);

        control.disable(messages.vnpay_connecting());
        Some(PaymentIntentRequest {
            order_info: draft.order_info.clone(),
            amount: draft.amount,
            txn_ref: self.txn_refs.next(&booking_code, now_ms),
        })
    }

    pub async fn create(&self, request: &PaymentIntentRequest) -> ApiResult<String> {
        payment::create_vnpay_payment(&self.client, &self.endpoints, request).await
    }

    /// Follow the payment URL, or report the failure and restore `control`.
    pub fn complete<N: Notifier + ?Sized>(
        &self,
        control: &mut PaymentControl,
        result: ApiResult<String>,
        notifier: Option<&N>,
        messages: &Messages,
    ) -> PaymentOutcome {
        match result {
            Ok(url) => {
                tracing::info!("redirecting to VNPay");
                self.browser.navigate(&url);
                PaymentOutcome::Redirected { url }
            }
            Err(e) => {
                let message = format!(
                    "{}{}",
                    messages.error_prefix(),
                    e.user_message(messages.vnpay_create_fail())
                );
                let options = ToastOptions::error().with_duration(PAYMENT_ERROR_DURATION_MS);
                let toast = notify(notifier, &self.browser, &message, options);
                control.restore();
                PaymentOutcome::Failed { message, toast }
            }
        }
    }

    /// One click on the pay button.
    pub async fn initiate<N: Notifier + ?Sized>(
        &self,
        control: &mut PaymentControl,
        draft: &PaymentDraft,
        notifier: Option<&N>,
        messages: &Messages,
    ) -> PaymentOutcome {
        let Some(request) = self.begin(control, draft, messages, api::clock::now_millis()) else {
            return PaymentOutcome::Ignored;
        };
        let result = self.create(&request).await;
        self.complete(control, result, notifier, messages)
    }
}
