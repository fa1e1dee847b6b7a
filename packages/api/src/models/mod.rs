//! Wire bodies exchanged with the SkyPlan backend.

mod login;
mod payment;

pub use login::{Credentials, LoginBody, LoginSuccess};
pub use payment::{PaymentCreatedBody, PaymentIntentRequest};

use serde::Deserialize;

/// Error body shape used by both endpoints (`{message}` or `{error}`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Best-effort extraction of the server's explanation from any body.
    pub fn message_from(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        parsed.message.or(parsed.error)
    }
}
