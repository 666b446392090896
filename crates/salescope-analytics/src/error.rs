use salescope_core::{IntervalError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("month and year are both required")]
    MissingParameters,

    #[error(transparent)]
    Interval(#[from] IntervalError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A reducer task panicked or was cancelled before producing a result.
    #[error("{reducer} task did not complete: {reason}")]
    TaskFailed {
        reducer: &'static str,
        reason: String,
    },
}

impl AnalyticsError {
    /// Whether the failure was caused by the caller's parameters rather than
    /// by the store or the runtime.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingParameters | Self::Interval(_))
    }
}
