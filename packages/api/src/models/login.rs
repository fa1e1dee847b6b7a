use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Login form input. Lives only for the duration of one request.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response body of `POST /api/auth/login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Identity returned by a successful login.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginSuccess {
    pub user: Value,
    pub token: String,
}
