//! Deterministic recurrence expansion for tests.

use chrono::{Duration, NaiveDate};
use fieldcal_domain::{RecurrenceExpander, RecurrencePattern};

/// Expander interpreting `daily`, `weekly` and `biweekly` as fixed day steps
/// from the start date. Unknown patterns expand to nothing.
pub struct StepExpander;

impl RecurrenceExpander for StepExpander {
    fn expand(
        &self,
        pattern: &RecurrencePattern,
        start_date: NaiveDate,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<NaiveDate> {
        let step = match pattern.as_str() {
            "daily" => 1,
            "weekly" => 7,
            "biweekly" => 14,
            _ => return Vec::new(),
        };

        let mut dates = Vec::new();
        let mut date = start_date;
        while date <= to {
            if date >= from {
                dates.push(date);
            }
            date = date + Duration::days(step);
        }
        dates
    }
}
