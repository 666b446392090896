//! Concurrent fan-out of the three reducers into one dashboard payload.

use std::sync::Arc;

use salescope_core::{CategoryCount, RecordStore};
use serde::Serialize;
use tokio::task::{JoinError, JoinSet};

use crate::{
    category_breakdown, price_histogram, sales_summary, AnalyticsError, MonthQuery,
    PriceHistogram, SalesSummary,
};

/// What to do when one reducer fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Fail the whole combined call.
    Abort,
    /// Substitute the field's zero value and log a warning.
    Degrade,
}

/// Per-field failure handling for [`combined`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinePolicy {
    pub summary: FieldPolicy,
    pub histogram: FieldPolicy,
    pub categories: FieldPolicy,
}

impl Default for CombinePolicy {
    /// Summary failures abort; histogram and category failures degrade.
    fn default() -> Self {
        Self {
            summary: FieldPolicy::Abort,
            histogram: FieldPolicy::Degrade,
            categories: FieldPolicy::Degrade,
        }
    }
}

impl CombinePolicy {
    /// Every reducer failure aborts.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            summary: FieldPolicy::Abort,
            histogram: FieldPolicy::Abort,
            categories: FieldPolicy::Abort,
        }
    }

    #[must_use]
    pub fn from_strict_flag(strict: bool) -> Self {
        if strict {
            Self::strict()
        } else {
            Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedReport {
    pub statistics: SalesSummary,
    pub price_range_data: PriceHistogram,
    pub category_data: Vec<CategoryCount>,
}

/// One reducer's result, tagged so the join loop can route it.
enum Partial {
    Summary(Result<SalesSummary, AnalyticsError>),
    Histogram(Result<PriceHistogram, AnalyticsError>),
    Categories(Result<Vec<CategoryCount>, AnalyticsError>),
}

/// Run all three reducers concurrently for `query` and merge the results.
///
/// Each reducer runs on its own task and resolves the interval itself, so
/// the three reads are not guaranteed to see the same store snapshot. The
/// tasks live in a [`JoinSet`]: if this future is dropped they are aborted.
/// All three are awaited before `policy` is applied.
///
/// # Errors
///
/// Returns [`AnalyticsError::MissingParameters`] before spawning anything if
/// month or year is absent. Otherwise returns the first failure (in
/// summary, histogram, categories order) whose field policy is
/// [`FieldPolicy::Abort`].
pub async fn combined(
    store: Arc<dyn RecordStore>,
    query: MonthQuery,
    policy: CombinePolicy,
) -> Result<CombinedReport, AnalyticsError> {
    if query.parts().is_none() {
        return Err(AnalyticsError::MissingParameters);
    }
    let query = Arc::new(query);
    let mut tasks = JoinSet::new();

    let summary_id = tasks
        .spawn({
            let store = Arc::clone(&store);
            let query = Arc::clone(&query);
            async move { Partial::Summary(sales_summary(store.as_ref(), &query).await) }
        })
        .id();
    let histogram_id = tasks
        .spawn({
            let store = Arc::clone(&store);
            let query = Arc::clone(&query);
            async move { Partial::Histogram(price_histogram(store.as_ref(), &query).await) }
        })
        .id();
    tasks.spawn({
        let store = Arc::clone(&store);
        let query = Arc::clone(&query);
        async move { Partial::Categories(category_breakdown(store.as_ref(), &query).await) }
    });

    let mut summary = None;
    let mut histogram = None;
    let mut categories = None;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Partial::Summary(outcome)) => summary = Some(outcome),
            Ok(Partial::Histogram(outcome)) => histogram = Some(outcome),
            Ok(Partial::Categories(outcome)) => categories = Some(outcome),
            Err(error) if error.id() == summary_id => {
                summary = Some(Err(task_failed("summary", &error)));
            }
            Err(error) if error.id() == histogram_id => {
                histogram = Some(Err(task_failed("histogram", &error)));
            }
            Err(error) => categories = Some(Err(task_failed("categories", &error))),
        }
    }

    Ok(CombinedReport {
        statistics: settle("summary", collected("summary", summary), policy.summary)?,
        price_range_data: settle(
            "histogram",
            collected("histogram", histogram),
            policy.histogram,
        )?,
        category_data: settle(
            "categories",
            collected("categories", categories),
            policy.categories,
        )?,
    })
}

fn task_failed(reducer: &'static str, error: &JoinError) -> AnalyticsError {
    AnalyticsError::TaskFailed {
        reducer,
        reason: error.to_string(),
    }
}

/// A slot the join loop never filled means the set lost the task.
fn collected<T>(
    reducer: &'static str,
    slot: Option<Result<T, AnalyticsError>>,
) -> Result<T, AnalyticsError> {
    slot.unwrap_or_else(|| {
        Err(AnalyticsError::TaskFailed {
            reducer,
            reason: "task produced no result".to_string(),
        })
    })
}

fn settle<T: Default>(
    reducer: &'static str,
    outcome: Result<T, AnalyticsError>,
    policy: FieldPolicy,
) -> Result<T, AnalyticsError> {
    match (outcome, policy) {
        (Ok(value), _) => Ok(value),
        (Err(error), FieldPolicy::Degrade) => {
            tracing::warn!(reducer, error = %error, "reducer failed; substituting default");
            Ok(T::default())
        }
        (Err(error), FieldPolicy::Abort) => {
            tracing::error!(reducer, error = %error, "reducer failed; aborting combined report");
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use salescope_core::IntervalError;

    use super::*;

    #[test]
    fn default_policy_only_aborts_on_summary() {
        let policy = CombinePolicy::default();
        assert_eq!(policy.summary, FieldPolicy::Abort);
        assert_eq!(policy.histogram, FieldPolicy::Degrade);
        assert_eq!(policy.categories, FieldPolicy::Degrade);
        assert_eq!(CombinePolicy::from_strict_flag(false), policy);
        assert_eq!(CombinePolicy::from_strict_flag(true), CombinePolicy::strict());
    }

    #[test]
    fn settle_degrades_to_default() {
        let outcome: Result<Vec<CategoryCount>, _> =
            Err(AnalyticsError::Interval(IntervalError::InvalidMonth("x".into())));
        let settled = settle("categories", outcome, FieldPolicy::Degrade).expect("degraded");
        assert!(settled.is_empty());
    }

    #[test]
    fn settle_aborts_with_original_error() {
        let outcome: Result<PriceHistogram, _> = Err(AnalyticsError::MissingParameters);
        let err = settle("histogram", outcome, FieldPolicy::Abort).unwrap_err();
        assert!(matches!(err, AnalyticsError::MissingParameters));
    }

    #[test]
    fn unfilled_slot_is_a_task_failure() {
        let err = collected::<PriceHistogram>("histogram", None).unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::TaskFailed {
                reducer: "histogram",
                ..
            }
        ));
    }

    #[test]
    fn combined_report_uses_dashboard_field_names() {
        let report = CombinedReport {
            statistics: SalesSummary::default(),
            price_range_data: PriceHistogram::default(),
            category_data: vec![CategoryCount {
                category: "electronics".to_string(),
                count: 3,
            }],
        };
        let json = serde_json::to_value(&report).expect("serialize");
        assert!(json["statistics"].is_object());
        assert_eq!(json["priceRangeData"].as_array().map(Vec::len), Some(6));
        assert_eq!(json["categoryData"][0]["category"], "electronics");
        assert_eq!(json["categoryData"][0]["count"], 3);
    }
}
