//! Commands and queries accepted at the application boundary.
//!
//! Plain data carriers; validation and state transitions live in the
//! aggregate.

use chrono::NaiveDate;
use fieldcal_domain::{
    CalendarId, EventId, OccurrenceData, OneOffEvent, OneOffEventPatch, RecurringEvent,
    RecurringEventPatch,
};
use serde::{Deserialize, Serialize};

/// Add a one-off event to a calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOneOffEvent {
    pub calendar_id: CalendarId,
    pub event: OneOffEvent,
}

/// Delete a one-off event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOneOffEvent {
    pub calendar_id: CalendarId,
    pub event_id: EventId,
}

/// Change selected fields of a one-off event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeOneOffEvent {
    pub calendar_id: CalendarId,
    pub event_id: EventId,
    pub patch: OneOffEventPatch,
}

/// Add a recurring event to a calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddRecurringEvent {
    pub calendar_id: CalendarId,
    pub event: RecurringEvent,
}

/// Delete a recurring event along with its occurrence exceptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRecurringEvent {
    pub calendar_id: CalendarId,
    pub event_id: EventId,
}

/// Change selected fields of a recurring event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRecurringEvent {
    pub calendar_id: CalendarId,
    pub event_id: EventId,
    pub patch: RecurringEventPatch,
}

/// Tombstone one occurrence of a recurring event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOccurrence {
    pub calendar_id: CalendarId,
    pub parent_id: EventId,
    pub date: NaiveDate,
}

/// Restore a tombstoned occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnDeleteOccurrence {
    pub calendar_id: CalendarId,
    pub parent_id: EventId,
    pub date: NaiveDate,
}

/// Replace the content of one occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideOccurrence {
    pub calendar_id: CalendarId,
    pub parent_id: EventId,
    pub date: NaiveDate,
    pub data: OccurrenceData,
}

/// Remove the override of one occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevertOccurrenceOverride {
    pub calendar_id: CalendarId,
    pub parent_id: EventId,
    pub date: NaiveDate,
}

/// Materialize calendar entries over an inclusive date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetCalendarEvents {
    pub calendar_id: CalendarId,
    pub from: NaiveDate,
    pub to: NaiveDate,
}
