//! In-memory gateway for use case tests

use std::collections::HashSet;
use std::sync::Mutex;

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::ClearTextPassword;

use crate::domain::entity::user::UserProfile;
use crate::domain::gateway::{
    Acknowledgement, AuthGateway, LoginGrant, LoginRequest, SignupReceipt, SignupRequest,
    VerifyOtpRequest,
};
use crate::domain::value_object::{email::Email, otp_code::OtpCode, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct State {
    role: UserRole,
    offline: bool,
    taken_usernames: HashSet<String>,
    login_calls: usize,
    signup_calls: usize,
    otp_calls: usize,
    reset_calls: usize,
}

pub struct FakeGateway {
    state: Mutex<State>,
}

fn rejected(kind: ErrorKind, message: &str) -> AuthError {
    AuthError::Rejected {
        kind,
        message: message.to_string(),
    }
}

impl FakeGateway {
    pub const PASSWORD: &'static str = "Correct#Horse9";
    pub const OTP: &'static str = "123456";
    pub const PENDING_USER_ID: &'static str = "pending-42";
    pub const KNOWN_EMAIL: &'static str = "jane@example.com";

    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    pub fn set_role(&self, role: UserRole) {
        self.state.lock().unwrap().role = role;
    }

    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    pub fn take_username(&self, username: &str) {
        self.state
            .lock()
            .unwrap()
            .taken_usernames
            .insert(username.to_string());
    }

    pub fn login_calls(&self) -> usize {
        self.state.lock().unwrap().login_calls
    }

    pub fn signup_calls(&self) -> usize {
        self.state.lock().unwrap().signup_calls
    }

    pub fn otp_calls(&self) -> usize {
        self.state.lock().unwrap().otp_calls
    }

    pub fn reset_calls(&self) -> usize {
        self.state.lock().unwrap().reset_calls
    }

    fn check_online(state: &State) -> AuthResult<()> {
        if state.offline {
            return Err(AuthError::Transport(AppError::service_unavailable(
                "Auth service unavailable",
            )));
        }
        Ok(())
    }

    fn check_otp(otp: &OtpCode) -> AuthResult<()> {
        if otp.as_str() != Self::OTP {
            return Err(rejected(ErrorKind::BadRequest, "Invalid or expired OTP"));
        }
        Ok(())
    }

    fn ack(message: &str) -> Acknowledgement {
        Acknowledgement {
            message: message.to_string(),
        }
    }
}

impl AuthGateway for FakeGateway {
    async fn login(&self, request: &LoginRequest) -> AuthResult<LoginGrant> {
        let mut state = self.state.lock().unwrap();
        state.login_calls += 1;
        Self::check_online(&state)?;

        if request.password.expose() != Self::PASSWORD {
            return Err(rejected(ErrorKind::Unauthorized, "Invalid credentials"));
        }

        Ok(LoginGrant {
            access_token: "access-token".to_string(),
            refresh_token: "refresh-token".to_string(),
            expires_in: 900,
            user: UserProfile {
                id: "user-1".to_string(),
                full_name: "Jane Doe".to_string(),
                email: Self::KNOWN_EMAIL.to_string(),
                username: "jane_d".to_string(),
                role: state.role,
            },
            message: "Login successful".to_string(),
        })
    }

    async fn signup(&self, request: &SignupRequest) -> AuthResult<SignupReceipt> {
        let mut state = self.state.lock().unwrap();
        state.signup_calls += 1;
        Self::check_online(&state)?;

        if state.taken_usernames.contains(request.username.as_str()) {
            return Err(rejected(ErrorKind::Conflict, "Username already taken"));
        }

        Ok(SignupReceipt {
            user_id: Self::PENDING_USER_ID.to_string(),
            email: request.email.as_str().to_string(),
            message: "Signup successful. Please verify the OTP sent to your email".to_string(),
        })
    }

    async fn verify_email_otp(&self, request: &VerifyOtpRequest) -> AuthResult<Acknowledgement> {
        let mut state = self.state.lock().unwrap();
        state.otp_calls += 1;
        Self::check_online(&state)?;
        Self::check_otp(&request.otp)?;
        Ok(Self::ack("Email verified successfully"))
    }

    async fn request_password_reset(&self, email: &Email) -> AuthResult<Acknowledgement> {
        let state = self.state.lock().unwrap();
        Self::check_online(&state)?;
        if email.as_str() != Self::KNOWN_EMAIL {
            return Err(rejected(ErrorKind::NotFound, "User not found"));
        }
        Ok(Self::ack("OTP sent to your email"))
    }

    async fn verify_reset_otp(&self, _email: &Email, otp: &OtpCode) -> AuthResult<Acknowledgement> {
        let mut state = self.state.lock().unwrap();
        state.otp_calls += 1;
        Self::check_online(&state)?;
        Self::check_otp(otp)?;
        Ok(Self::ack("OTP verified successfully"))
    }

    async fn reset_password(
        &self,
        _email: &Email,
        _new_password: &ClearTextPassword,
    ) -> AuthResult<Acknowledgement> {
        let mut state = self.state.lock().unwrap();
        state.reset_calls += 1;
        Self::check_online(&state)?;
        Ok(Self::ack("Password reset successfully"))
    }
}
