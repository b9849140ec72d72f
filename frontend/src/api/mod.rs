//! REST service layer.
//!
//! Each resource module adds request builders to [`ApiClient`]. Requests go
//! out through a [`Transport`], so the same code runs against the browser
//! `fetch` API or a scripted transport in tests.

mod auth;
mod categories;
mod http;
mod transactions;
mod uploads;
mod users;

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use http::GlooTransport;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::Reply;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Json(serde_json::Value),
    /// Single-file multipart upload.
    Multipart { field: &'static str, file: web_sys::File },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub body: Option<Body>,
}

impl ApiRequest {
    pub fn new(method: Method, url: String) -> Self {
        Self {
            method,
            url,
            query: Vec::new(),
            bearer: None,
            body: None,
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn query_pairs(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        self.body = Some(Body::Json(serde_json::to_value(body)?));
        Ok(self)
    }

    pub fn json_body(&self) -> Option<&serde_json::Value> {
        match &self.body {
            Some(Body::Json(value)) => Some(value),
            _ => None,
        }
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError>;
}

pub struct ApiClient<T: Transport = GlooTransport> {
    base_url: String,
    image_base_url: String,
    transport: T,
}

impl ApiClient<GlooTransport> {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.api_base_url.clone(),
            config.image_base_url.clone(),
            GlooTransport,
        )
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(base_url: String, image_base_url: String, transport: T) -> Self {
        Self {
            base_url,
            image_base_url,
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Public URL of an uploaded image; `None` for an empty filename.
    pub fn image_url(&self, filename: &str) -> Option<String> {
        if filename.is_empty() {
            None
        } else {
            Some(format!("{}{}", self.image_base_url, filename))
        }
    }

    pub fn image_base_url(&self) -> &str {
        &self.image_base_url
    }

    fn request(&self, method: Method, path: &str) -> ApiRequest {
        ApiRequest::new(method, format!("{}{}", self.base_url, path))
    }

    /// Sends `request` and decodes a reply carrying the `success` flag,
    /// turning `success: false` into [`ApiError::Rejected`].
    async fn call<R>(&self, request: ApiRequest) -> Result<R, ApiError>
    where
        R: DeserializeOwned + Reply,
    {
        let method = request.method;
        let url = request.url.clone();
        let response = self.transport.send(request).await.map_err(|err| {
            log::warn!("{:?} {} failed: {}", method, url, err);
            err
        })?;

        if !response.ok() {
            log::warn!("{:?} {} returned HTTP {}", method, url, response.status);
            return Err(ApiError::Transport(format!("HTTP {}", response.status)));
        }

        let reply: R = serde_json::from_str(&response.body)?;
        if !reply.success() {
            log::info!(
                "{:?} {} rejected: {}",
                method,
                url,
                reply.message().unwrap_or("<no message>")
            );
            return Err(ApiError::rejected(reply.message().map(str::to_string)));
        }
        Ok(reply)
    }
}
