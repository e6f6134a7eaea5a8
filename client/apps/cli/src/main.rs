//! authctl Entry Point
//!
//! Drives the account flows of the auth client from a terminal.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod commands;
mod prompt;

use std::env;
use std::process::ExitCode;

use auth::AuthClientConfig;
use auth::application::config::DEVELOPMENT_API_BASE_URL;
use clap::{Parser, Subcommand};
use kernel::error::app_error::AppError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "authctl")]
#[command(about = "Sign in, sign up and reset passwords against the authentication backend", long_about = None)]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides AUTH_API_BASE_URL)
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a password the way the sign-up form does
    Assess {
        /// Password to score (read from AUTHCTL_PASSWORD or stdin when omitted)
        #[arg(long)]
        password: Option<String>,

        #[arg(long, default_value = "")]
        username: String,

        #[arg(long, default_value = "")]
        full_name: String,
    },

    /// Sign in; prompts for the password until it succeeds or the lock engages
    Login {
        /// Email or user name
        #[arg(short, long)]
        identifier: String,

        /// Page to continue to after signing in
        #[arg(long)]
        return_to: Option<String>,
    },

    /// Create an account; a code is mailed for verification
    Signup {
        #[arg(long)]
        full_name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        username: String,
    },

    /// Verify the sign-up email with its one-time code
    VerifyEmail {
        #[arg(long)]
        user_id: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        otp: String,
    },

    /// Request a password reset code
    ForgotPassword {
        #[arg(long)]
        email: String,
    },

    /// Check a password reset code
    VerifyResetOtp {
        #[arg(long)]
        email: String,

        #[arg(long)]
        otp: String,
    },

    /// Choose a new password after the reset code was verified
    ResetPassword {
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "authctl=info,auth=info,platform=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Cli {
        api_base_url,
        command,
    } = Cli::parse();
    let config = || load_config(api_base_url.clone());

    match command {
        Commands::Assess {
            password,
            username,
            full_name,
        } => commands::assess(password, &username, &full_name).await,
        Commands::Login {
            identifier,
            return_to,
        } => commands::login(config()?, identifier, return_to).await,
        Commands::Signup {
            full_name,
            email,
            username,
        } => commands::signup(config()?, full_name, email, username).await,
        Commands::VerifyEmail {
            user_id,
            email,
            otp,
        } => commands::verify_email(config()?, user_id, email, otp).await,
        Commands::ForgotPassword { email } => commands::forgot_password(config()?, email).await,
        Commands::VerifyResetOtp { email, otp } => {
            commands::verify_reset_otp(config()?, email, otp).await
        }
        Commands::ResetPassword { email } => commands::reset_password(config()?, email).await,
    }
}

/// Environment config, with the command-line URL taking precedence
///
/// Debug builds without a configured backend use the local one.
fn load_config(api_base_url: Option<String>) -> Result<AuthClientConfig, AppError> {
    let base_url = api_base_url
        .or_else(|| env::var("AUTH_API_BASE_URL").ok())
        .or_else(|| {
            cfg!(debug_assertions).then(|| {
                tracing::warn!("AUTH_API_BASE_URL not set, using development backend");
                DEVELOPMENT_API_BASE_URL.to_string()
            })
        });

    let config = AuthClientConfig::from_lookup(|key| match key {
        "AUTH_API_BASE_URL" => base_url.clone(),
        _ => env::var(key).ok(),
    })?;

    tracing::info!(api_base_url = %config.api_base_url, "Using authentication backend");
    Ok(config)
}
