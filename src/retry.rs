//! Polling until a condition holds.
//!
//! [`Retry`] evaluates a condition repeatedly, optionally running an action and
//! sleeping between evaluations, and fails once the attempt budget or the timeout
//! is exhausted.
//!
//! ```rust
//! use std::cell::Cell;
//! use std::time::Duration;
//!
//! use datajoin_testing::retry::Retry;
//!
//! let polls = Cell::new(0);
//! let result = Retry::new()
//!     .repeat(5)
//!     .with_polling(Duration::from_millis(1))
//!     .until(|| {
//!         polls.set(polls.get() + 1);
//!         polls.get() == 3
//!     });
//! assert!(result.is_ok());
//! assert_eq!(polls.get(), 3);
//! ```

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{VerifyError, VerifyResult, raise};
use crate::failure::AssertionFailureBuilder;

/// Timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for a polling assertion.
///
/// Every option may be set at most once. Misuse is reported as
/// [`VerifyError::InvalidInput`] by [`until`](Retry::until) and
/// [`try_until`](Retry::try_until) before the condition is evaluated.
#[must_use]
#[derive(Default)]
pub struct Retry<'a> {
    repeat: Option<u32>,
    polling: Option<Duration>,
    timeout: Option<Option<Duration>>,
    between: Option<Box<dyn FnMut() + 'a>>,
    message: Option<String>,
    misuse: Option<VerifyError>,
}

impl<'a> Retry<'a> {
    /// Unbounded attempts, no polling delay, 30 second timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of evaluations. Must be greater than zero.
    ///
    /// `repeat(n)` evaluates the condition at most `n` times, not `n + 1`. The
    /// [`do_between`](Self::do_between) action runs only between two evaluations,
    /// so at most `n - 1` times, and never after the final failed evaluation.
    pub fn repeat(mut self, attempts: u32) -> Self {
        if self.repeat.is_some() {
            self.reject("repeat", "the maximum number of attempts may be specified only once");
        } else if attempts == 0 {
            self.reject("repeat", "the maximum number of attempts must be greater than zero");
        } else {
            self.repeat = Some(attempts);
        }
        self
    }

    /// Sleep between two evaluations.
    pub fn with_polling(mut self, interval: Duration) -> Self {
        if self.polling.is_some() {
            self.reject("polling", "the polling interval may be specified only once");
        } else {
            self.polling = Some(interval);
        }
        self
    }

    /// Fail once the overall duration reaches `timeout`.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.set_timeout(Some(timeout))
    }

    /// Never time out. Combine with [`repeat`](Self::repeat) to stay bounded.
    pub fn without_timeout(self) -> Self {
        self.set_timeout(None)
    }

    /// Action run after every unsuccessful evaluation.
    pub fn do_between(mut self, action: impl FnMut() + 'a) -> Self {
        if self.between.is_some() {
            self.reject("action", "the between action may be specified only once");
        } else {
            self.between = Some(Box::new(action));
        }
        self
    }

    /// Message attached to the failure.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        if self.message.is_some() {
            self.reject("message", "the failure message may be specified only once");
        } else {
            self.message = Some(message.into());
        }
        self
    }

    /// Poll `condition` until it returns `true`.
    pub fn until(self, mut condition: impl FnMut() -> bool) -> VerifyResult {
        self.try_until(|| Ok::<_, std::convert::Infallible>(condition()))
    }

    /// Poll a fallible condition. An error stops polling and fails immediately.
    pub fn try_until<E: fmt::Display>(
        mut self,
        mut condition: impl FnMut() -> Result<bool, E>,
    ) -> VerifyResult {
        if let Some(misuse) = self.misuse.take() {
            return Err(misuse);
        }
        let timeout = self.timeout.unwrap_or(Some(DEFAULT_TIMEOUT));
        let polling = self.polling.unwrap_or_default();
        let started = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            attempts = attempts.saturating_add(1);
            match condition() {
                Ok(true) => {
                    tracing::debug!(attempts, "retry condition satisfied");
                    return Ok(());
                }
                Ok(false) => {
                    tracing::debug!(attempts, "retry condition not yet satisfied");
                }
                Err(error) => {
                    return Err(self
                        .failure("The 'Retry.Until' operation has failed because an error occurred during the evaluation of the condition.")
                        .error(error)
                        .build()
                        .into());
                }
            }

            if let Some(repeat) = self.repeat {
                if attempts >= repeat {
                    return Err(self
                        .failure("The 'Retry.Until' operation has failed too many times.")
                        .labeled("Maximum Number Of Attempts", &repeat)
                        .build()
                        .into());
                }
            }
            if let Some(timeout) = timeout {
                if started.elapsed() >= timeout {
                    return Err(self
                        .failure("The 'Retry.Until' operation has failed due to a timeout error.")
                        .labeled_text("Timeout Value", format!("{} ms", timeout.as_millis()))
                        .build()
                        .into());
                }
            }

            if let Some(between) = self.between.as_mut() {
                between();
            }
            if !polling.is_zero() {
                thread::sleep(polling);
            }
        }
    }

    /// Panicking form of [`until`](Self::until).
    ///
    /// # Panics
    ///
    /// Panics when polling fails or the builder was misused.
    #[track_caller]
    pub fn assert_until(self, condition: impl FnMut() -> bool) {
        raise(self.until(condition));
    }

    fn set_timeout(mut self, timeout: Option<Duration>) -> Self {
        if self.timeout.is_some() {
            self.reject("timeout", "the timeout may be specified only once");
        } else {
            self.timeout = Some(timeout);
        }
        self
    }

    fn reject(&mut self, argument: &'static str, reason: &str) {
        if self.misuse.is_none() {
            self.misuse = Some(VerifyError::invalid_input(argument, reason));
        }
    }

    fn failure(&self, description: &str) -> AssertionFailureBuilder {
        AssertionFailureBuilder::new(description).message(self.message.clone())
    }
}

impl fmt::Debug for Retry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Retry")
            .field("repeat", &self.repeat)
            .field("polling", &self.polling)
            .field("timeout", &self.timeout)
            .field("between", &self.between.is_some())
            .field("message", &self.message)
            .finish()
    }
}
