//! Domain types and models

pub mod event;
pub mod pattern;
pub mod time_frame;

use uuid::Uuid;

// Re-export the event and value types for convenience
pub use event::{
    CalendarEntry, OccurrenceData, OneOffEvent, OneOffEventPatch, Occurrence, RecurringEvent,
    RecurringEventPatch,
};
pub use pattern::RecurrencePattern;
pub use time_frame::TimeFrame;

/// Identity of a calendar aggregate.
pub type CalendarId = Uuid;

/// Identity of an event. Globally unique and immutable; uniqueness is
/// enforced per collection (one-off ids and recurring ids are independent
/// namespaces).
pub type EventId = Uuid;

/// Integer classification code used for timesheet reporting.
pub type TimesheetCode = i32;
