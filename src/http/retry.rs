//! Retry loop shared by the blocking and async transports.
//!
//! The decision of whether an attempt's outcome ends the call lives in
//! [`RetryState::settle`]; [`run_blocking`] and [`run`] only differ in how
//! they wait for an attempt to finish.

use std::future::Future;

use log::{debug, warn};

use crate::error::{SdkError, SdkResult};

/// What the loop does after an attempt has been classified.
pub(crate) enum Step<T> {
    Done(SdkResult<T>),
    Retry,
}

/// Attempt bookkeeping for one logical request.
pub(crate) struct RetryState<'a> {
    operation: &'a str,
    retries: u32,
    next: u32,
    last_error: Option<String>,
}

impl<'a> RetryState<'a> {
    pub(crate) fn new(operation: &'a str, retries: u32) -> Self {
        Self {
            operation,
            retries,
            next: 0,
            last_error: None,
        }
    }

    /// Index of the next attempt, or `None` once `retries + 1` have been made.
    pub(crate) fn next_attempt(&mut self) -> Option<u32> {
        if self.next > self.retries {
            return None;
        }
        let attempt = self.next;
        self.next += 1;
        Some(attempt)
    }

    /// Classifies the outcome of attempt `attempt`.
    ///
    /// Successes and non-transient errors end the call at once. Transient
    /// errors end it only on the last permitted attempt.
    pub(crate) fn settle<T>(&mut self, attempt: u32, outcome: SdkResult<T>) -> Step<T> {
        let err = match outcome {
            Ok(value) => {
                debug!("{}: attempt {} succeeded", self.operation, attempt + 1);
                return Step::Done(Ok(value));
            }
            Err(err) => err,
        };

        if !err.is_retryable() {
            debug!("{}: non-retryable error: {}", self.operation, err);
            return Step::Done(Err(err));
        }

        if attempt >= self.retries {
            debug!(
                "{}: giving up after {} attempt(s): {}",
                self.operation,
                attempt + 1,
                err
            );
            return Step::Done(Err(err));
        }

        warn!(
            "{}: attempt {}/{} failed ({}), retrying...",
            self.operation,
            attempt + 1,
            self.retries + 1,
            err
        );
        self.last_error = Some(err.to_string());
        Step::Retry
    }

    /// Error for a loop that ran out of attempts without settling.
    pub(crate) fn exhausted(self) -> SdkError {
        SdkError::network(
            format!(
                "Failed calling {}: {}",
                self.operation,
                self.last_error.as_deref().unwrap_or("no attempt was made")
            ),
            None,
        )
    }
}

/// Runs `attempt` on the calling thread until it settles.
pub(crate) fn run_blocking<T, F>(operation: &str, retries: u32, mut attempt: F) -> SdkResult<T>
where
    F: FnMut(u32) -> SdkResult<T>,
{
    let mut state = RetryState::new(operation, retries);
    while let Some(n) = state.next_attempt() {
        if let Step::Done(result) = state.settle(n, attempt(n)) {
            return result;
        }
    }
    Err(state.exhausted())
}

/// Async twin of [`run_blocking`]; attempts are still strictly sequential.
pub(crate) async fn run<T, F, Fut>(operation: &str, retries: u32, mut attempt: F) -> SdkResult<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = SdkResult<T>>,
{
    let mut state = RetryState::new(operation, retries);
    while let Some(n) = state.next_attempt() {
        if let Step::Done(result) = state.settle(n, attempt(n).await) {
            return result;
        }
    }
    Err(state.exhausted())
}
