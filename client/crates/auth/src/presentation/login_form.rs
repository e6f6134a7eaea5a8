//! Login Form Controller
//!
//! Owns one login form session: the sign-in use case with its lockout
//! state, and while locked, the countdown that refreshes the lock banner.
//! Lock status is published on a `watch` channel so a view can redraw on
//! every tick without polling.
//!
//! Dropping the form cancels the countdown.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use derive_more::Display;
use platform::countdown::{Countdown, Tick};
use tokio::sync::watch;

use crate::application::config::AuthClientConfig;
use crate::application::sign_in::{SignInInput, SignInOutput, SignInUseCase};
use crate::domain::gateway::AuthGateway;
use crate::error::AuthResult;
use crate::presentation::view;

/// Lock state as the view sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LockStatus {
    #[display("unlocked")]
    Unlocked,
    #[display("{}", view::lock_banner(*remaining))]
    Locked { remaining: Duration },
}

impl LockStatus {
    pub fn is_locked(&self) -> bool {
        matches!(self, LockStatus::Locked { .. })
    }
}

pub struct LoginForm<G>
where
    G: AuthGateway,
{
    sign_in: SignInUseCase<G>,
    tick: Duration,
    countdown: Option<Countdown>,
    status: watch::Sender<LockStatus>,
}

impl<G> LoginForm<G>
where
    G: AuthGateway,
{
    pub fn new(gateway: Arc<G>, config: &AuthClientConfig) -> Self {
        let (status, _) = watch::channel(LockStatus::Unlocked);
        Self {
            sign_in: SignInUseCase::new(gateway, config.lockout),
            tick: config.countdown_tick,
            countdown: None,
            status,
        }
    }

    /// Subscribe to lock status changes
    pub fn status(&self) -> watch::Receiver<LockStatus> {
        self.status.subscribe()
    }

    pub fn current_status(&self) -> LockStatus {
        *self.status.borrow()
    }

    pub async fn submit(&mut self, input: SignInInput) -> AuthResult<SignInOutput> {
        self.submit_at(input, Utc::now()).await
    }

    /// Submit as if the clock read `now`
    ///
    /// Must be called from within a tokio runtime; a submission that leaves
    /// the form locked starts the countdown.
    pub async fn submit_at(
        &mut self,
        input: SignInInput,
        now: DateTime<Utc>,
    ) -> AuthResult<SignInOutput> {
        let result = self.sign_in.execute_at(input, now).await;
        self.sync_lock(now);
        result
    }

    /// Warning banner for the current failure count
    pub fn attempts_banner(&self) -> Option<String> {
        view::attempts_banner(self.sign_in.lockout().failed_attempts(), self.sign_in.policy())
    }

    /// The underlying use case
    ///
    /// A lapsed lock stays in its lockout state until the next submission
    /// or [`LoginForm::refresh`].
    pub fn sign_in(&self) -> &SignInUseCase<G> {
        &self.sign_in
    }

    /// Clear a lapsed lock and republish the status
    pub fn refresh(&mut self) {
        self.refresh_at(Utc::now());
    }

    pub fn refresh_at(&mut self, now: DateTime<Utc>) {
        self.sign_in.expire(now);
        self.sync_lock(now);
    }

    fn sync_lock(&mut self, now: DateTime<Utc>) {
        if !self.sign_in.is_locked(now) {
            self.stop_countdown();
            self.status.send_replace(LockStatus::Unlocked);
            return;
        }

        if self.countdown.as_ref().is_some_and(|c| !c.is_finished()) {
            return;
        }

        let remaining = self.sign_in.remaining(now).to_std().unwrap_or_default();
        self.status.send_replace(LockStatus::Locked { remaining });

        let status = self.status.clone();
        self.countdown = Some(Countdown::start(remaining, self.tick, move |tick| {
            let next = match tick {
                Tick::Remaining(remaining) => LockStatus::Locked { remaining },
                Tick::Expired => LockStatus::Unlocked,
            };
            status.send_replace(next);
        }));
    }

    fn stop_countdown(&mut self) {
        if let Some(mut countdown) = self.countdown.take() {
            countdown.cancel();
        }
    }
}

impl<G> Drop for LoginForm<G>
where
    G: AuthGateway,
{
    fn drop(&mut self) {
        self.stop_countdown();
    }
}
