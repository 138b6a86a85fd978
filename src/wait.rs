//! Polling waiter for timing-dependent conditions.
//!
//! Every wait is built on one primitive: evaluate a tick, sleep for the
//! interval, repeat until the tick reports success or the deadline passes.
//! Each tick reports an explicit [`Tick`] outcome; only [`Tick::Fatal`] ends
//! the loop early with an error.
//!
//! | Function | Tick source | Errors during a tick |
//! |----------|-------------|----------------------|
//! | [`wait_for`] | predicate returning `bool` | transient ones retried when allowed, others fatal |
//! | [`wait_for_check`] | predicate returning `bool` | all retried |
//! | [`retry_until_success`] | fallible action | all retried, last one reported |
//!
//! # Timing
//!
//! The deadline is measured from the first evaluation with
//! [`tokio::time::Instant`], so slow evaluations count against it. After an
//! unsuccessful tick the loop gives up when the next tick would start past
//! the deadline. At least one evaluation always happens, even with a zero
//! timeout.
//!
//! # Example
//!
//! ```ignore
//! let options = WaitOptions::default().with_timeout(Duration::from_secs(5));
//! wait_for(&options, "banner never appeared", true, || async {
//!     page.is_displayed("#banner").await
//! })
//! .await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{Instant, sleep};
use tracing::{trace, warn};

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default overall timeout of a wait.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default pause between two ticks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

// ============================================================================
// WaitOptions
// ============================================================================

/// Timeout and polling interval of a wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitOptions {
    /// Overall time budget.
    pub timeout: Duration,
    /// Pause between ticks. Keep it at 250 ms or more against a real browser.
    pub interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl WaitOptions {
    /// Creates options with the given timeout and the default interval.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            interval: DEFAULT_INTERVAL,
        }
    }

    /// Sets the overall timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the pause between ticks.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Timeout in whole milliseconds, for error reports.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

// ============================================================================
// Tick
// ============================================================================

/// Outcome of one evaluation.
#[derive(Debug)]
pub enum Tick<T> {
    /// Condition met; stop with this value.
    Ready(T),
    /// Not yet; try again after the interval. Carries the failure observed
    /// during this tick, if any.
    Pending(Option<Error>),
    /// Unrecoverable; stop immediately with this error.
    Fatal(Error),
}

/// Why [`poll`] stopped without a value.
#[derive(Debug)]
pub enum PollError {
    /// A tick reported [`Tick::Fatal`].
    Fatal(Error),
    /// The deadline passed. Carries the last failure any tick reported.
    Timeout {
        /// Last failure observed by a pending tick.
        last: Option<Error>,
        /// Number of evaluations performed.
        attempts: usize,
    },
}

// ============================================================================
// Polling Primitive
// ============================================================================

/// Runs `tick` until it is ready, fatal, or the deadline passes.
///
/// # Errors
///
/// Returns [`PollError::Fatal`] as soon as a tick is fatal, and
/// [`PollError::Timeout`] once the next tick would start past the deadline.
pub async fn poll<T, F, Fut>(options: &WaitOptions, mut tick: F) -> std::result::Result<T, PollError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Tick<T>>,
{
    let start = Instant::now();
    let mut attempts = 0usize;
    let mut last = None;

    loop {
        attempts += 1;

        match tick().await {
            Tick::Ready(value) => {
                trace!(attempts, "Wait satisfied");
                return Ok(value);
            }
            Tick::Fatal(error) => return Err(PollError::Fatal(error)),
            Tick::Pending(error) => {
                if error.is_some() {
                    last = error;
                }
            }
        }

        let elapsed = start.elapsed();
        trace!(attempts, elapsed_ms = elapsed.as_millis() as u64, "Wait pending");

        if elapsed + options.interval > options.timeout {
            return Err(PollError::Timeout { last, attempts });
        }

        sleep(options.interval).await;
    }
}

// ============================================================================
// Condition Mode
// ============================================================================

/// Waits until `predicate` returns `true`.
///
/// With `ignore_transient`, stale-element and not-interactable failures count
/// as "not yet". Every other error is returned immediately.
///
/// # Errors
///
/// Returns [`Error::WaitTimeout`] carrying `message` when the deadline passes.
pub async fn wait_for<F, Fut>(
    options: &WaitOptions,
    message: &str,
    ignore_transient: bool,
    mut predicate: F,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let outcome = poll(options, || {
        let evaluation = predicate();
        async move {
            match evaluation.await {
                Ok(true) => Tick::Ready(()),
                Ok(false) => Tick::Pending(None),
                Err(e) if ignore_transient && e.is_transient() => Tick::Pending(Some(e)),
                Err(e) => Tick::Fatal(e),
            }
        }
    })
    .await;

    outcome.map_err(|stop| match stop {
        PollError::Fatal(e) => e,
        PollError::Timeout { last, attempts } => {
            warn!(reason = message, attempts, timeout_ms = options.timeout_ms(), "Wait timed out");
            Error::wait_timeout(message, options.timeout_ms(), last)
        }
    })
}

/// Waits until `check` returns `true`, treating any error as "not yet".
///
/// # Errors
///
/// Returns [`Error::WaitTimeout`] carrying `message` and the last error.
pub async fn wait_for_check<F, Fut>(options: &WaitOptions, message: &str, mut check: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let outcome = poll(options, || {
        let evaluation = check();
        async move {
            match evaluation.await {
                Ok(true) => Tick::Ready(()),
                Ok(false) => Tick::Pending(None),
                Err(e) => Tick::Pending(Some(e)),
            }
        }
    })
    .await;

    outcome.map_err(|stop| match stop {
        PollError::Fatal(e) => e,
        PollError::Timeout { last, attempts } => {
            warn!(reason = message, attempts, timeout_ms = options.timeout_ms(), "Check timed out");
            Error::wait_timeout(message, options.timeout_ms(), last)
        }
    })
}

// ============================================================================
// Action-Retry Mode
// ============================================================================

/// Runs `action` until it succeeds and returns its value.
///
/// # Errors
///
/// When the deadline passes, returns [`Error::WaitTimeout`] wrapping the last
/// failure if `message` is given, otherwise the last failure itself.
pub async fn retry_until_success<T, F, Fut>(
    options: &WaitOptions,
    message: Option<&str>,
    mut action: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let outcome = poll(options, || {
        let attempt = action();
        async move {
            match attempt.await {
                Ok(value) => Tick::Ready(value),
                Err(e) => Tick::Pending(Some(e)),
            }
        }
    })
    .await;

    outcome.map_err(|stop| match stop {
        PollError::Fatal(e) => e,
        PollError::Timeout { last, attempts } => {
            warn!(attempts, timeout_ms = options.timeout_ms(), "Retry timed out");
            match (message, last) {
                (Some(message), last) => Error::wait_timeout(message, options.timeout_ms(), last),
                (None, Some(last)) => last,
                (None, None) => {
                    Error::wait_timeout("action did not succeed", options.timeout_ms(), None)
                }
            }
        }
    })
}

// ============================================================================
// Tests
// ============================================================================
