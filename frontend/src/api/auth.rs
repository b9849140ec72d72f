use serde::Serialize;

use super::{ApiClient, Method, Transport};
use crate::error::ApiError;
use crate::models::{Ack, LoginReply, OtpReply, RegisterForm};

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct OtpCheck<'a> {
    otp: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
}

impl<T: Transport> ApiClient<T> {
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginReply, ApiError> {
        let request = self
            .request(Method::Post, "/login")
            .json(&Credentials { email, password })?;
        self.call(request).await
    }

    /// `email` is omitted from the body when unknown.
    pub async fn verify_otp(&self, otp: &str, email: Option<&str>) -> Result<OtpReply, ApiError> {
        let request = self
            .request(Method::Post, "/sendotp")
            .json(&OtpCheck { otp, email })?;
        self.call(request).await
    }

    pub async fn register(&self, form: &RegisterForm) -> Result<Ack, ApiError> {
        let request = self.request(Method::Post, "/register").json(form)?;
        self.call(request).await
    }
}
