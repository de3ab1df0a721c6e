//! Errors in the runner.
use std::time::Duration;
use thiserror::Error;

/// Fatal conditions of the producer/consumer coordination.
///
/// Channel timeouts signal that the other side has stalled or died; they
/// propagate instead of being retried.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// Pushing a batch did not complete within the timeout ceiling.
    #[error("timed out pushing a batch after {0:?}, the consumer has stalled")]
    PushTimeout(Duration),

    /// Pulling a batch did not complete within the timeout ceiling.
    #[error("timed out pulling a batch after {0:?}, the producer has stalled")]
    PullTimeout(Duration),

    /// The experience channel was disconnected.
    #[error("experience channel disconnected")]
    Disconnected,
}
