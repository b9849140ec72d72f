use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use serde_json::Value;

use super::{ApiClient, ApiRequest, RawResponse, Transport};
use crate::error::ApiError;

/// Replays queued replies in order and records every request it is given.
/// Running out of replies is reported as a transport error.
#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<VecDeque<Result<RawResponse, ApiError>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn client() -> ApiClient<MockTransport> {
        ApiClient::new(
            "http://api.test".to_string(),
            "http://api.test/images/".to_string(),
            MockTransport::default(),
        )
    }

    pub fn reply_json(&self, body: Value) {
        self.reply_status(200, &body.to_string());
    }

    pub fn reply_status(&self, status: u16, body: &str) {
        self.replies.borrow_mut().push_back(Ok(RawResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn fail(&self, message: &str) {
        self.replies
            .borrow_mut()
            .push_back(Err(ApiError::Transport(message.to_string())));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted reply".to_string())))
    }
}
