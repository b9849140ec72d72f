//! Two-step sign-in: credentials first, then a 4-digit code sent by e-mail.
//!
//! ```text
//! Anonymous -> CredentialsSubmitted -> OtpPending -> Authenticated
//!     ^                |                   |  ^            |
//!     +----------------+ rejected          +--+ bad code   |
//!     +------------------------------------------ logout --+
//! ```

use crate::api::{ApiClient, Transport};
use crate::error::ApiError;
use crate::routes::{Location, NavState, Route};
use crate::session::{Session, SessionStore};
use crate::storage::KeyValueStore;

pub const OTP_LENGTH: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStage {
    Anonymous,
    CredentialsSubmitted,
    OtpPending,
    Authenticated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    SubmitCredentials,
    CredentialsAccepted,
    CredentialsRejected,
    OtpRejected,
    OtpVerified,
    LoggedOut,
    GuardRejected,
}

impl AuthStage {
    /// Best guess at the stage from persisted state alone.
    pub fn of(session: &Session) -> AuthStage {
        if session.is_authenticated {
            AuthStage::Authenticated
        } else if session.token.is_some() {
            AuthStage::OtpPending
        } else {
            AuthStage::Anonymous
        }
    }

    /// Events that make no sense in the current stage leave it unchanged.
    pub fn next(self, event: AuthEvent) -> AuthStage {
        use AuthEvent::*;
        use AuthStage::*;
        match (self, event) {
            (_, LoggedOut) | (_, GuardRejected) => Anonymous,
            (Anonymous | OtpPending, SubmitCredentials) => CredentialsSubmitted,
            (CredentialsSubmitted, CredentialsAccepted) => OtpPending,
            (CredentialsSubmitted, CredentialsRejected) => Anonymous,
            (OtpPending, OtpRejected) => OtpPending,
            (OtpPending, OtpVerified) => Authenticated,
            (stage, _) => stage,
        }
    }
}

/// Outcome of a successful step: what to tell the user and where to go.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub message: Option<String>,
    pub next: Location,
    pub stage: AuthStage,
}

/// Accepts exactly four ASCII digits, surrounding whitespace ignored.
pub fn validate_otp(code: &str) -> Result<&str, ApiError> {
    let code = code.trim();
    if code.len() == OTP_LENGTH && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(code)
    } else {
        Err(ApiError::validation("Enter 4 digit OTP"))
    }
}

/// Filters one OTP box edit: a single digit or empty.
pub fn accept_otp_digit(value: &str) -> Option<String> {
    match value.chars().collect::<Vec<_>>().as_slice() {
        [] => Some(String::new()),
        [c] if c.is_ascii_digit() => Some(c.to_string()),
        _ => None,
    }
}

pub struct AuthFlow<'a, T: Transport, S: KeyValueStore> {
    api: &'a ApiClient<T>,
    session: &'a SessionStore<S>,
}

impl<'a, T: Transport, S: KeyValueStore> AuthFlow<'a, T, S> {
    pub fn new(api: &'a ApiClient<T>, session: &'a SessionStore<S>) -> Self {
        Self { api, session }
    }

    /// Checks e-mail and password. On success the provisional token is
    /// stored and the OTP view is next, carrying the e-mail.
    pub async fn submit_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<StepOutcome, ApiError> {
        let reply = self.api.login(email, password).await?;
        let token = reply
            .token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Decode("login reply has no token".to_string()))?;
        self.session.set_token(token);
        log::info!("credentials accepted for {}", email);

        Ok(StepOutcome {
            message: reply.message,
            next: Location {
                route: Route::Otp,
                state: Some(NavState::Otp {
                    email: email.to_string(),
                }),
            },
            stage: AuthStage::CredentialsSubmitted.next(AuthEvent::CredentialsAccepted),
        })
    }

    /// Verifies the code, loads the profile and signs in. A malformed code is
    /// rejected before any request goes out.
    ///
    /// When the profile lookup yields nobody, or the server refuses it, the
    /// session stays signed out but the dashboard is still the destination;
    /// the guard sends the user back.
    pub async fn verify_otp(
        &self,
        code: &str,
        email: Option<&str>,
    ) -> Result<StepOutcome, ApiError> {
        let code = validate_otp(code)?;
        if email.is_none() {
            log::warn!("verifying OTP without an e-mail; the OTP view was opened directly");
        }

        let reply = self.api.verify_otp(code, email).await?;
        let user = match reply.id {
            Some(id) => match self.api.get_user(id).await {
                Ok(user) => user,
                Err(ApiError::Rejected { message }) => {
                    log::warn!("profile lookup for user {} refused: {:?}", id, message);
                    None
                }
                Err(err) => return Err(err),
            },
            None => None,
        };

        let stage = match user {
            Some(user) => {
                log::info!("signed in as user {}", user.id);
                self.session.login(user, self.session.token());
                AuthStage::OtpPending.next(AuthEvent::OtpVerified)
            }
            None => {
                log::warn!("OTP accepted but no profile was returned");
                AuthStage::OtpPending
            }
        };

        Ok(StepOutcome {
            message: Some("OTP Verified!".to_string()),
            next: Location::new(Route::Dashboard),
            stage,
        })
    }

    pub fn sign_out(&self) -> StepOutcome {
        let stage = AuthStage::of(&self.session.snapshot()).next(AuthEvent::LoggedOut);
        self.session.logout();
        StepOutcome {
            message: None,
            next: Location::new(Route::Login),
            stage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::models::User;
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn stage_transitions() {
        use AuthEvent::*;
        use AuthStage::*;
        assert_eq!(Anonymous.next(SubmitCredentials), CredentialsSubmitted);
        assert_eq!(OtpPending.next(SubmitCredentials), CredentialsSubmitted);
        assert_eq!(Authenticated.next(SubmitCredentials), Authenticated);
        assert_eq!(CredentialsSubmitted.next(SubmitCredentials), CredentialsSubmitted);
        assert_eq!(CredentialsSubmitted.next(CredentialsAccepted), OtpPending);
        assert_eq!(CredentialsSubmitted.next(CredentialsRejected), Anonymous);
        assert_eq!(OtpPending.next(OtpRejected), OtpPending);
        assert_eq!(OtpPending.next(OtpVerified), Authenticated);
        assert_eq!(Authenticated.next(LoggedOut), Anonymous);
        assert_eq!(OtpPending.next(GuardRejected), Anonymous);
        assert_eq!(Anonymous.next(OtpVerified), Anonymous);
    }

    #[test]
    fn otp_must_be_four_digits() {
        assert_eq!(validate_otp("1234").unwrap(), "1234");
        assert_eq!(validate_otp(" 0007 ").unwrap(), "0007");
        for bad in ["", "123", "12345", "12a4", "١٢٣٤"] {
            assert!(validate_otp(bad).unwrap_err().is_validation(), "{bad:?}");
        }
    }

    #[test]
    fn otp_boxes_take_one_digit() {
        assert_eq!(accept_otp_digit("7").as_deref(), Some("7"));
        assert_eq!(accept_otp_digit("").as_deref(), Some(""));
        assert_eq!(accept_otp_digit("x"), None);
        assert_eq!(accept_otp_digit("12"), None);
    }

    #[async_std::test]
    async fn accepted_credentials_store_token_and_go_to_otp() {
        let api = MockTransport::client();
        let session = SessionStore::restore(MemoryStorage::new());
        api.transport()
            .reply_json(json!({"success": true, "token": "T1", "message": "OTP sent"}));

        let outcome = AuthFlow::new(&api, &session)
            .submit_credentials("a@b.com", "x")
            .await
            .unwrap();

        assert_eq!(session.token().as_deref(), Some("T1"));
        assert!(!session.is_authenticated());
        assert_eq!(outcome.next.route, Route::Otp);
        assert_eq!(outcome.next.otp_email(), Some("a@b.com"));
        assert_eq!(outcome.stage, AuthStage::OtpPending);
        assert_eq!(outcome.message.as_deref(), Some("OTP sent"));
    }

    #[async_std::test]
    async fn rejected_credentials_leave_session_untouched() {
        let api = MockTransport::client();
        let session = SessionStore::restore(MemoryStorage::new());
        api.transport()
            .reply_json(json!({"success": false, "message": "Invalid password"}));

        let err = AuthFlow::new(&api, &session)
            .submit_credentials("a@b.com", "bad")
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::rejected(Some("Invalid password".into())));
        assert_eq!(session.snapshot(), Session::default());
    }

    #[async_std::test]
    async fn verified_otp_signs_in_with_fetched_profile() {
        let api = MockTransport::client();
        let session = SessionStore::restore(MemoryStorage::new());
        session.set_token("T1");
        api.transport().reply_json(json!({"success": true, "id": 7}));
        api.transport()
            .reply_json(json!({"success": true, "data": [{"id": 7, "name": "A"}]}));

        let outcome = AuthFlow::new(&api, &session)
            .verify_otp("1234", Some("a@b.com"))
            .await
            .unwrap();

        let expected_user: User = serde_json::from_value(json!({"id": 7, "name": "A"})).unwrap();
        assert_eq!(
            session.snapshot(),
            Session {
                user: Some(expected_user),
                token: Some("T1".into()),
                is_authenticated: true,
            }
        );
        assert_eq!(outcome.next.route, Route::Dashboard);
        assert_eq!(outcome.stage, AuthStage::Authenticated);

        let requests = api.transport().requests();
        assert_eq!(requests[0].url, "http://api.test/sendotp");
        assert_eq!(
            requests[0].json_body(),
            Some(&json!({"otp": "1234", "email": "a@b.com"}))
        );
        assert_eq!(requests[1].query_value("id"), Some("7"));
    }

    #[async_std::test]
    async fn malformed_otp_sends_nothing() {
        let api = MockTransport::client();
        let session = SessionStore::restore(MemoryStorage::new());

        for code in ["", "1", "123", "12345", "abcd"] {
            let err = AuthFlow::new(&api, &session)
                .verify_otp(code, Some("a@b.com"))
                .await
                .unwrap_err();
            assert!(err.is_validation());
        }
        assert_eq!(api.transport().request_count(), 0);
    }

    #[async_std::test]
    async fn wrong_code_keeps_waiting_for_otp() {
        let api = MockTransport::client();
        let session = SessionStore::restore(MemoryStorage::new());
        session.set_token("T1");
        api.transport()
            .reply_json(json!({"success": false, "message": "Invalid OTP"}));

        let err = AuthFlow::new(&api, &session)
            .verify_otp("9999", Some("a@b.com"))
            .await
            .unwrap_err();

        assert_eq!(err.user_message("Failed to verify"), "Invalid OTP");
        assert_eq!(AuthStage::of(&session.snapshot()), AuthStage::OtpPending);
        assert_eq!(api.transport().request_count(), 1);
    }

    #[async_std::test]
    async fn missing_profile_does_not_sign_in() {
        let api = MockTransport::client();
        let session = SessionStore::restore(MemoryStorage::new());
        session.set_token("T1");
        api.transport().reply_json(json!({"success": true, "id": 7}));
        api.transport().reply_json(json!({"success": true, "data": []}));

        let outcome = AuthFlow::new(&api, &session)
            .verify_otp("1234", Some("a@b.com"))
            .await
            .unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(outcome.stage, AuthStage::OtpPending);
        assert_eq!(outcome.next.route, Route::Dashboard);
    }

    #[async_std::test]
    async fn refused_profile_lookup_still_goes_to_dashboard() {
        let api = MockTransport::client();
        let session = SessionStore::restore(MemoryStorage::new());
        session.set_token("T1");
        api.transport().reply_json(json!({"success": true, "id": 7}));
        api.transport()
            .reply_json(json!({"success": false, "message": "User not found"}));

        let outcome = AuthFlow::new(&api, &session)
            .verify_otp("1234", Some("a@b.com"))
            .await
            .unwrap();

        assert_eq!(outcome.message.as_deref(), Some("OTP Verified!"));
        assert_eq!(outcome.next.route, Route::Dashboard);
        assert_eq!(outcome.stage, AuthStage::OtpPending);
        assert!(!session.is_authenticated());
        assert_eq!(api.transport().request_count(), 2);
    }

    #[async_std::test]
    async fn profile_lookup_network_failure_is_reported() {
        let api = MockTransport::client();
        let session = SessionStore::restore(MemoryStorage::new());
        session.set_token("T1");
        api.transport().reply_json(json!({"success": true, "id": 7}));
        api.transport().fail("connection reset");

        let err = AuthFlow::new(&api, &session)
            .verify_otp("1234", Some("a@b.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(err.user_message("Failed to verify"), "Failed to verify");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn sign_out_returns_to_login() {
        let api = MockTransport::client();
        let session = SessionStore::restore(MemoryStorage::new());
        session.set_token("T1");
        let outcome = AuthFlow::new(&api, &session).sign_out();
        assert_eq!(outcome.next.route, Route::Login);
        assert_eq!(outcome.stage, AuthStage::Anonymous);
        assert_eq!(outcome.message, None);
        assert_eq!(AuthStage::of(&session.snapshot()), AuthStage::Anonymous);
    }
}
