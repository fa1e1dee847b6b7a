//! Error type shared by every backend call.

use thiserror::Error;

/// Result type of the asynchronous backend calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Why a backend call did not produce its success value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (offline, DNS, CORS, ...).
    #[error("network error: {0}")]
    Transport(String),

    /// Non-2xx status. `message` is the server's explanation when the body
    /// carried one.
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    /// 2xx response whose body did not have the expected shape.
    #[error("unreadable response: {0}")]
    Decode(String),

    /// The server answered but refused the operation (`success: false`).
    #[error("request rejected")]
    Rejected { message: Option<String> },
}

impl ApiError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    /// Text supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } | Self::Rejected { message } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Server text, or `fallback` when the server gave none.
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.server_message().unwrap_or(fallback)
    }
}
