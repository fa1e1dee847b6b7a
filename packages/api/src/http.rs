//! # HTTP transport
//!
//! The backend calls in [`crate::auth`] and [`crate::payment`] only need one
//! verb: POST a JSON body and read back status + body text. [`HttpClient`]
//! captures exactly that, so the flows can be driven by [`ReqwestClient`] in the
//! browser (reqwest uses `fetch` on `wasm32`) and by a stub in tests.
//!
//! No timeout is configured here; requests run for as long as the underlying
//! transport allows.

use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::error::{ApiError, ApiResult};

/// Raw response of a JSON POST.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Async JSON POST transport.
pub trait HttpClient {
    fn post_json(
        &self,
        url: &str,
        body: String,
    ) -> impl std::future::Future<Output = ApiResult<HttpReply>>;
}

/// [`HttpClient`] backed by a shared [`reqwest::Client`].
#[derive(Clone, Debug, Default)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HttpClient for ReqwestClient {
    async fn post_json(&self, url: &str, body: String) -> ApiResult<HttpReply> {
        let response = self
            .inner
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(ApiError::transport)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(ApiError::transport)?;
        Ok(HttpReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        assert!(HttpReply::new(200, "{}").is_success());
        assert!(HttpReply::new(201, "").is_success());
        assert!(!HttpReply::new(401, "").is_success());
        assert!(!HttpReply::new(500, "").is_success());
    }
}
