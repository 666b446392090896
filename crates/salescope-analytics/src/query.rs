use salescope_core::{resolve_month, MonthInterval};
use serde::Deserialize;

use crate::AnalyticsError;

/// Month/year pair as supplied by a caller, before validation.
///
/// Empty or whitespace-only values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
    pub year: Option<String>,
}

impl MonthQuery {
    pub fn new(month: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            month: Some(month.into()),
            year: Some(year.into()),
        }
    }

    /// Both components, if both are present and non-blank.
    #[must_use]
    pub fn parts(&self) -> Option<(&str, &str)> {
        fn present(v: &Option<String>) -> Option<&str> {
            v.as_deref().filter(|s| !s.trim().is_empty())
        }
        Some((present(&self.month)?, present(&self.year)?))
    }

    /// Resolve into a UTC month interval.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::MissingParameters`] if either part is absent,
    /// or [`AnalyticsError::Interval`] if a part fails to parse.
    pub fn resolve(&self) -> Result<MonthInterval, AnalyticsError> {
        let (month, year) = self.parts().ok_or(AnalyticsError::MissingParameters)?;
        Ok(resolve_month(month, year)?)
    }
}
