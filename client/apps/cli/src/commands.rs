//! Subcommand implementations

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use auth::application::{
    PasswordResetUseCase, SignInInput, SignUpInput, SignUpUseCase, VerifyEmailInput,
    VerifyEmailUseCase,
};
use auth::presentation::view;
use auth::{AuthClientConfig, AuthError, HttpAuthGateway, LockStatus, LoginForm};
use kernel::error::app_error::AppError;
use platform::password_strength::{self, PasswordAssessment};

use crate::prompt::Prompt;

const PASSWORD_VAR: &str = "AUTHCTL_PASSWORD";

fn gateway(config: &Arc<AuthClientConfig>) -> anyhow::Result<Arc<HttpAuthGateway>> {
    let gateway = HttpAuthGateway::new(Arc::clone(config))
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    Ok(Arc::new(gateway))
}

/// Print an auth failure the way the forms show it
fn report(err: &AuthError) -> ExitCode {
    let app: AppError = err.to_app_error();
    eprintln!("error: {}", app.message());
    if let Some(action) = app.action() {
        eprintln!("hint: {action}");
    }
    ExitCode::FAILURE
}

fn print_assessment(assessment: &PasswordAssessment) {
    let strength = assessment.strength();
    println!(
        "{} ({}/{}, {} bar at {}%)",
        view::strength_label(assessment),
        assessment.score(),
        password_strength::MAX_SCORE,
        strength.color(),
        strength.bar_percent()
    );
    for requirement in assessment.requirements() {
        let mark = if requirement.met { "x" } else { " " };
        println!("  [{mark}] {}", requirement.label);
    }
}

pub async fn assess(
    password: Option<String>,
    username: &str,
    full_name: &str,
) -> anyhow::Result<ExitCode> {
    let password = match password {
        Some(password) => password,
        None => Prompt::new()
            .secret(PASSWORD_VAR, "Password")
            .await?
            .unwrap_or_default(),
    };
    print_assessment(&password_strength::assess(&password, username, full_name));
    Ok(ExitCode::SUCCESS)
}

pub async fn login(
    config: AuthClientConfig,
    identifier: String,
    return_to: Option<String>,
) -> anyhow::Result<ExitCode> {
    let config = Arc::new(config);
    let mut form = LoginForm::new(gateway(&config)?, &config);
    let mut prompt = Prompt::new();
    // A password from the environment gets one attempt; retrying it would
    // only walk into the lock
    let fixed_password = env::var(PASSWORD_VAR).ok().filter(|p| !p.is_empty());

    if let Some(site_key) = &config.recaptcha_site_key {
        eprintln!("Solve the reCAPTCHA for site key {site_key} and paste the token when asked.");
    }

    loop {
        if form.current_status().is_locked() {
            if !wait_for_unlock(&form).await? {
                return Ok(ExitCode::FAILURE);
            }
            form.refresh();
        }

        let password = match &fixed_password {
            Some(password) => password.clone(),
            None => match prompt.hidden("Password").await? {
                Some(password) => password,
                None => return Ok(ExitCode::FAILURE),
            },
        };

        let input = SignInInput {
            identifier: identifier.clone(),
            password,
            recaptcha_token: prompt.recaptcha_token().await?,
            return_to: return_to.clone(),
        };

        match form.submit(input).await {
            Ok(out) => {
                println!("{}", out.message);
                println!(
                    "Signed in as {} ({}), continue to {}",
                    out.session.user.username, out.session.user.role, out.destination
                );
                println!("Session expires at {}", out.session.expires_at.to_rfc3339());
                return Ok(ExitCode::SUCCESS);
            }
            Err(err) => {
                let code = report(&err);
                if let Some(banner) = form.attempts_banner() {
                    eprintln!("{banner}");
                }
                if fixed_password.is_some() {
                    return Ok(code);
                }
            }
        }
    }
}

/// Show the lock countdown until it lapses
///
/// Returns `false` when interrupted.
async fn wait_for_unlock<G>(form: &LoginForm<G>) -> anyhow::Result<bool>
where
    G: auth::domain::AuthGateway,
{
    let mut status = form.status();
    loop {
        let current = *status.borrow_and_update();
        match current {
            LockStatus::Unlocked => {
                eprintln!();
                return Ok(true);
            }
            LockStatus::Locked { .. } => eprint!("\r{current}"),
        }

        tokio::select! {
            changed = status.changed() => {
                if changed.is_err() {
                    return Ok(true);
                }
            }
            interrupted = tokio::signal::ctrl_c() => {
                interrupted.context("Failed to listen for Ctrl-C")?;
                eprintln!();
                return Ok(false);
            }
        }
    }
}

pub async fn signup(
    config: AuthClientConfig,
    full_name: String,
    email: String,
    username: String,
) -> anyhow::Result<ExitCode> {
    let config = Arc::new(config);
    let sign_up = SignUpUseCase::new(gateway(&config)?);
    let mut prompt = Prompt::new();

    let password = prompt
        .secret(PASSWORD_VAR, "Password")
        .await?
        .unwrap_or_default();
    print_assessment(&sign_up.assess(&password, &username, &full_name));

    let input = SignUpInput {
        full_name,
        email,
        username,
        password,
        recaptcha_token: prompt.recaptcha_token().await?,
    };

    match sign_up.execute(input).await {
        Ok(pending) => {
            println!("{}", pending.message);
            println!(
                "Next: authctl verify-email --user-id {} --email {} --otp <code>",
                pending.user_id, pending.email
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(report(&err)),
    }
}

pub async fn verify_email(
    config: AuthClientConfig,
    user_id: String,
    email: String,
    otp: String,
) -> anyhow::Result<ExitCode> {
    let config = Arc::new(config);
    let verify = VerifyEmailUseCase::new(gateway(&config)?);

    let input = VerifyEmailInput {
        user_id: Some(user_id),
        email: Some(email),
        otp,
    };
    match verify.execute(input).await {
        Ok(message) => {
            println!("{message}");
            println!("Next: authctl login --identifier <email or username>");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(report(&err)),
    }
}

pub async fn forgot_password(config: AuthClientConfig, email: String) -> anyhow::Result<ExitCode> {
    let config = Arc::new(config);
    let reset = PasswordResetUseCase::new(gateway(&config)?);

    match reset.request_otp(&email).await {
        Ok(sent) => {
            println!("{}", sent.message);
            println!("Next: authctl verify-reset-otp --email {} --otp <code>", sent.email);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(report(&err)),
    }
}

pub async fn verify_reset_otp(
    config: AuthClientConfig,
    email: String,
    otp: String,
) -> anyhow::Result<ExitCode> {
    let config = Arc::new(config);
    let reset = PasswordResetUseCase::new(gateway(&config)?);

    match reset.verify_otp(Some(email.as_str()), &otp).await {
        Ok(message) => {
            println!("{message}");
            println!("Next: authctl reset-password --email {email}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(report(&err)),
    }
}

pub async fn reset_password(config: AuthClientConfig, email: String) -> anyhow::Result<ExitCode> {
    let config = Arc::new(config);
    let reset = PasswordResetUseCase::new(gateway(&config)?);
    let mut prompt = Prompt::new();

    let new_password = prompt
        .secret(PASSWORD_VAR, "New password")
        .await?
        .unwrap_or_default();
    let confirm_password = match env::var(PASSWORD_VAR) {
        Ok(value) if !value.is_empty() => value,
        _ => prompt.hidden("Confirm password").await?.unwrap_or_default(),
    };
    print_assessment(&password_strength::assess(&new_password, "", ""));

    match reset
        .complete(Some(email.as_str()), new_password, confirm_password)
        .await
    {
        Ok(message) => {
            println!("{message}");
            println!("Next: authctl login --identifier {email}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(report(&err)),
    }
}
