//! Service configuration.

use serde::{Deserialize, Serialize};

/// Tunables for [`crate::CalendarService`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarServiceConfig {
    /// Largest allowed query span in days (inclusive). Guards the expansion
    /// collaborator against unbounded ranges.
    pub max_query_span_days: u32,
}

impl Default for CalendarServiceConfig {
    fn default() -> Self {
        Self { max_query_span_days: 366 }
    }
}
