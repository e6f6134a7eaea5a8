//! Sign In Use Case
//!
//! Submits credentials to the backend and applies the lockout policy to
//! the outcome. One instance serves one login form session.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use derive_more::Display;
use platform::password::ClearTextPassword;

use crate::domain::entity::auth_session::AuthSession;
use crate::domain::entity::lockout::{LockoutPolicy, LockoutState};
use crate::domain::gateway::{AuthGateway, LoginRequest};
use crate::domain::value_object::{identifier::Identifier, recaptcha_token::RecaptchaToken};
use crate::error::{AuthError, AuthResult};

/// Sign in input
#[derive(Default)]
pub struct SignInInput {
    /// User name or email
    pub identifier: String,
    pub password: String,
    /// Token from the human-verification widget, if solved
    pub recaptcha_token: Option<String>,
    /// Protected page that sent the user to the login form
    pub return_to: Option<String>,
}

/// Where to go after signing in
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Destination {
    /// Back to the page that required authentication
    #[display("{_0}")]
    ReturnTo(String),
    #[display("/admin/dashboard")]
    AdminDashboard,
    #[display("/user/dashboard")]
    UserDashboard,
}

impl Destination {
    pub fn path(&self) -> &str {
        match self {
            Destination::ReturnTo(path) => path,
            Destination::AdminDashboard => "/admin/dashboard",
            Destination::UserDashboard => "/user/dashboard",
        }
    }
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub session: AuthSession,
    pub destination: Destination,
    /// Success notice from the backend
    pub message: String,
}

/// Sign in use case
pub struct SignInUseCase<G>
where
    G: AuthGateway,
{
    gateway: Arc<G>,
    policy: LockoutPolicy,
    lockout: LockoutState,
}

impl<G> SignInUseCase<G>
where
    G: AuthGateway,
{
    pub fn new(gateway: Arc<G>, policy: LockoutPolicy) -> Self {
        Self {
            gateway,
            policy,
            lockout: LockoutState::new(),
        }
    }

    pub async fn execute(&mut self, input: SignInInput) -> AuthResult<SignInOutput> {
        self.execute_at(input, Utc::now()).await
    }

    /// Run a submission as if the clock read `now`
    pub async fn execute_at(
        &mut self,
        input: SignInInput,
        now: DateTime<Utc>,
    ) -> AuthResult<SignInOutput> {
        self.lockout.expire(now);
        if self.lockout.is_locked(now) {
            let err = AuthError::AccountLocked {
                remaining: self.lockout.remaining(now),
            };
            err.log();
            return Err(err);
        }

        // Rejected input never reaches the backend and is not a failed attempt
        let request = Self::validate(input.identifier, input.password, input.recaptcha_token)
            .inspect_err(AuthError::log)?;

        let grant = match self.gateway.login(&request).await {
            Ok(grant) => grant,
            Err(err) => {
                self.lockout.record_failure(&self.policy, now);
                err.log();
                tracing::warn!(
                    by_email = request.identifier.is_email(),
                    failed_attempts = self.lockout.failed_attempts(),
                    attempts_remaining = self.lockout.attempts_remaining(&self.policy),
                    "Sign-in failed"
                );
                return Err(err);
            }
        };

        self.lockout.record_success();

        let destination = match input.return_to.filter(|path| !path.is_empty()) {
            Some(path) => Destination::ReturnTo(path),
            None if grant.user.role.is_admin() => Destination::AdminDashboard,
            None => Destination::UserDashboard,
        };

        let session = AuthSession::new(
            grant.access_token,
            grant.refresh_token,
            grant.expires_in,
            grant.user,
            now,
        );

        tracing::info!(
            user_id = %session.user.id,
            role = %session.user.role,
            destination = destination.path(),
            "User signed in"
        );

        Ok(SignInOutput {
            session,
            destination,
            message: grant.message,
        })
    }

    fn validate(
        identifier: String,
        password: String,
        recaptcha_token: Option<String>,
    ) -> AuthResult<LoginRequest> {
        let password = ClearTextPassword::new_unchecked(password)?;
        Ok(LoginRequest {
            identifier: Identifier::new(identifier)?,
            password,
            recaptcha_token: RecaptchaToken::new(recaptcha_token)?,
        })
    }

    pub fn policy(&self) -> &LockoutPolicy {
        &self.policy
    }

    pub fn lockout(&self) -> &LockoutState {
        &self.lockout
    }

    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.lockout.is_locked(now)
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        self.lockout.remaining(now)
    }

    /// Failures left before the lock engages
    pub fn attempts_remaining(&self) -> u32 {
        self.lockout.attempts_remaining(&self.policy)
    }

    /// Clear a lapsed lock, e.g. when the countdown expires
    pub fn expire(&mut self, now: DateTime<Utc>) -> bool {
        self.lockout.expire(now)
    }
}
