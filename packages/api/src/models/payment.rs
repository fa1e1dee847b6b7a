use serde::{Deserialize, Serialize};

/// Body of `POST /api/payment/vnpay/create`. One per click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub order_info: String,
    /// Minor currency units (VND has no subunit, so this is plain dong).
    pub amount: u64,
    pub txn_ref: String,
}

/// Response body of `POST /api/payment/vnpay/create`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreatedBody {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub payment_url: Option<String>,
    #[serde(default)]
    pub txn_ref: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
