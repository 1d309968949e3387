//! Opaque, validated recurrence pattern.
//!
//! The pattern grammar is owned by the recurrence expansion collaborator
//! (see [`crate::expand::RecurrenceExpander`]); the domain only guarantees
//! that a stored pattern is non-empty.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalendarError, Result};

/// A validated recurrence pattern string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecurrencePattern(String);

impl RecurrencePattern {
    /// Validate and wrap a raw pattern string.
    ///
    /// Fails on empty or whitespace-only input; any other content is
    /// accepted verbatim and interpreted by the expansion collaborator.
    pub fn parse(pattern: &str) -> Result<Self> {
        if pattern.trim().is_empty() {
            return Err(CalendarError::InvalidPattern(
                "pattern cannot be empty or whitespace".to_string(),
            ));
        }

        Ok(Self(pattern.to_string()))
    }

    /// The raw pattern string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecurrencePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
