//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::EventId;

/// Main error type for FieldCal
///
/// Every variant is a local, recoverable condition. Duplicate, not-found and
/// invalid-transition conditions also surface as `bool` results on the
/// aggregate's `try_*` commands; the typed variants exist for the throwing
/// facades and for the repository boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum CalendarError {
    #[error("event {0} already exists")]
    DuplicateEvent(EventId),

    #[error("event {0} not found")]
    EventNotFound(EventId),

    #[error("invalid time frame: {0}")]
    InvalidTimeFrame(String),

    #[error("invalid recurrence pattern: {0}")]
    InvalidPattern(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("concurrency conflict: {0}")]
    ConcurrencyConflict(String),
}

/// Result type alias for FieldCal operations
pub type Result<T> = std::result::Result<T, CalendarError>;
