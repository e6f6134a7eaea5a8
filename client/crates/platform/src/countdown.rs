//! Countdown Ticker
//!
//! A cancellable periodic callback that counts down to a deadline. The
//! owner of a [`Countdown`] holds the only handle to the background task:
//! calling [`Countdown::cancel`] or dropping the value stops it, so a
//! torn-down view never leaves a recurring timer behind.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Deadline used when `remaining` overflows the clock
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Event delivered to the countdown callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Time left until the deadline
    Remaining(Duration),
    /// The deadline has passed; delivered once, as the final event
    Expired,
}

/// Handle to a running countdown
///
/// ## Examples
/// ```rust,no_run
/// use std::time::Duration;
/// use platform::countdown::{Countdown, Tick};
///
/// # async fn demo() {
/// let countdown = Countdown::start(
///     Duration::from_secs(90),
///     Duration::from_secs(1),
///     |tick| {
///         if let Tick::Remaining(left) = tick {
///             println!("{}s left", left.as_secs());
///         }
///     },
/// );
/// // Dropping the handle stops the ticks.
/// drop(countdown);
/// # }
/// ```
#[derive(Debug)]
pub struct Countdown {
    task: Option<JoinHandle<()>>,
}

impl Countdown {
    /// Start counting down `remaining`, calling `on_tick` every `period`
    ///
    /// The first tick fires immediately. Must be called from within a
    /// tokio runtime.
    pub fn start<F>(remaining: Duration, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(Tick) + Send + 'static,
    {
        let now = Instant::now();
        let deadline = now
            .checked_add(remaining)
            .unwrap_or_else(|| now + FAR_FUTURE);
        // `interval` rejects a zero period
        let period = period.max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let left = deadline.saturating_duration_since(Instant::now());
                        if left.is_zero() {
                            break;
                        }
                        on_tick(Tick::Remaining(left));
                    }
                    _ = time::sleep_until(deadline) => break,
                }
            }

            on_tick(Tick::Expired);
            tracing::debug!("Countdown expired");
        });

        tracing::debug!(
            remaining_secs = remaining.as_secs(),
            period_ms = period.as_millis() as u64,
            "Countdown started"
        );

        Self { task: Some(task) }
    }

    /// Stop the countdown; no further ticks are delivered
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                tracing::debug!("Countdown cancelled");
            }
            task.abort();
        }
    }

    /// Whether the countdown has expired or been cancelled
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|task| task.is_finished())
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}
