//! Value Object Module

pub mod email;
pub mod full_name;
pub mod identifier;
pub mod otp_code;
pub mod recaptcha_token;
pub mod user_name;
pub mod user_role;
