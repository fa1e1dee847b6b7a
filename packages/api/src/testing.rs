//! Scripted [`HttpClient`] for tests of code that calls the backend.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::{ApiError, ApiResult};
use crate::http::{HttpClient, HttpReply};

/// One request seen by a [`StubClient`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub body: serde_json::Value,
}

/// Replays queued replies in order and records every request.
///
/// An empty queue answers with a transport error.
#[derive(Clone, Debug, Default)]
pub struct StubClient {
    replies: Rc<RefCell<VecDeque<ApiResult<HttpReply>>>>,
    requests: Rc<RefCell<Vec<RecordedRequest>>>,
}

impl StubClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, status: u16, body: serde_json::Value) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(HttpReply::new(status, body.to_string())));
        self
    }

    pub fn reply_raw(&self, status: u16, body: &str) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(HttpReply::new(status, body)));
        self
    }

    pub fn fail(&self, err: ApiError) -> &Self {
        self.replies.borrow_mut().push_back(Err(err));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl HttpClient for StubClient {
    async fn post_json(&self, url: &str, body: String) -> ApiResult<HttpReply> {
        let body = serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body));
        self.requests.borrow_mut().push(RecordedRequest {
            url: url.to_string(),
            body,
        });
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::transport("no stubbed reply")))
    }
}
