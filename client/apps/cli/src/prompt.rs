//! Terminal input
//!
//! Secrets come from an environment variable when set. Otherwise they are
//! read without echo on an attended terminal, or as a plain line when stdin
//! is piped.

use std::env;
use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Where a secret is read from
#[derive(Debug, PartialEq, Eq)]
enum SecretSource {
    Env(String),
    Masked,
    Line,
}

fn secret_source(preset: Option<String>, attended: bool) -> SecretSource {
    match preset.filter(|value| !value.is_empty()) {
        Some(value) => SecretSource::Env(value),
        None if attended => SecretSource::Masked,
        None => SecretSource::Line,
    }
}

pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Next line, `None` at end of input
    pub async fn line(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        eprint!("{label}: ");
        std::io::stderr().flush()?;
        Ok(self.lines.next_line().await?)
    }

    /// Environment variable `key`, else [`Prompt::hidden`]
    pub async fn secret(&mut self, key: &str, label: &str) -> anyhow::Result<Option<String>> {
        match secret_source(env::var(key).ok(), console::user_attended()) {
            SecretSource::Env(value) => Ok(Some(value)),
            SecretSource::Masked => Self::masked(label).await.map(Some),
            SecretSource::Line => self.line(label).await,
        }
    }

    /// Read a secret without echoing it
    pub async fn hidden(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        match secret_source(None, console::user_attended()) {
            SecretSource::Masked => Self::masked(label).await.map(Some),
            _ => self.line(label).await,
        }
    }

    async fn masked(label: &str) -> anyhow::Result<String> {
        let label = label.to_string();
        let input = tokio::task::spawn_blocking(move || {
            dialoguer::Password::new()
                .with_prompt(label)
                .allow_empty_password(true)
                .interact()
        })
        .await??;
        Ok(input)
    }

    /// Token from the human-verification widget
    ///
    /// An empty answer is passed on as missing so the form can report it.
    pub async fn recaptcha_token(&mut self) -> anyhow::Result<Option<String>> {
        Ok(self
            .secret("RECAPTCHA_TOKEN", "reCAPTCHA token")
            .await?
            .filter(|token| !token.trim().is_empty()))
    }
}
