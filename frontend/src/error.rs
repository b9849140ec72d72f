use thiserror::Error;

pub const GENERIC_FAILURE: &str = "Something went wrong";

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    /// The request never produced a usable HTTP reply, or the status was not 2xx.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with `success: false`.
    #[error("rejected by server: {}", .message.as_deref().unwrap_or("<no message>"))]
    Rejected { message: Option<String> },

    /// Caught on the client before any request went out.
    #[error("{0}")]
    Validation(String),

    #[error("unreadable reply: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn rejected(message: Option<String>) -> Self {
        ApiError::Rejected { message }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    /// Text to show the user. `generic` stands in for failures that carry no
    /// human-readable message of their own.
    pub fn user_message(&self, generic: &str) -> String {
        match self {
            ApiError::Rejected { message: Some(message) } if !message.is_empty() => {
                message.clone()
            }
            ApiError::Validation(message) => message.clone(),
            ApiError::Rejected { .. } | ApiError::Transport(_) | ApiError::Decode(_) => {
                generic.to_string()
            }
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_generic() {
        let err = ApiError::rejected(Some("Category in use".into()));
        assert_eq!(err.user_message(GENERIC_FAILURE), "Category in use");
    }

    #[test]
    fn silent_rejection_falls_back() {
        assert_eq!(ApiError::rejected(None).user_message("Invalid OTP"), "Invalid OTP");
        assert_eq!(
            ApiError::rejected(Some(String::new())).user_message("Invalid OTP"),
            "Invalid OTP"
        );
    }

    #[test]
    fn transport_and_decode_are_generic() {
        let transport = ApiError::Transport("HTTP 500".into());
        let decode = ApiError::Decode("expected value".into());
        assert_eq!(transport.user_message(GENERIC_FAILURE), GENERIC_FAILURE);
        assert_eq!(decode.user_message("Failed to verify"), "Failed to verify");
    }

    #[test]
    fn validation_keeps_its_text() {
        let err = ApiError::validation("Enter 4 digit OTP");
        assert!(err.is_validation());
        assert_eq!(err.user_message(GENERIC_FAILURE), "Enter 4 digit OTP");
    }
}
