//! Recurrence expansion boundary contract.

use chrono::NaiveDate;

use crate::types::RecurrencePattern;

/// Expands a recurrence pattern into the set of matching dates within a
/// range.
///
/// Implementations must be pure: deterministic for identical inputs, with no
/// persisted state. The calendar aggregate never constructs an expander; it
/// receives one per command or query that needs expansion.
pub trait RecurrenceExpander: Send + Sync {
    /// Dates in `[from, to]` (inclusive) on which an event starting on
    /// `start_date` with `pattern` occurs.
    fn expand(
        &self,
        pattern: &RecurrencePattern,
        start_date: NaiveDate,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<NaiveDate>;
}
