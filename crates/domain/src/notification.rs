//! State-change notifications emitted by the calendar aggregate.
//!
//! Each notification is an immutable record of one committed state change,
//! carrying exactly the data needed to replay or project it. The aggregate
//! appends to its pending log on every successful command; the caller drains
//! the log once the changes are durably persisted (outbox pattern, not an
//! event-bus dispatch).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{
    CalendarId, EventId, OccurrenceData, OneOffEvent, OneOffEventPatch, RecurringEvent,
    RecurringEventPatch,
};

/// A single committed state change.
///
/// `Changed` variants carry the patch exactly as the caller supplied it, not
/// the merged result, so downstream consumers can distinguish "untouched"
/// from "set to its current value". `None` in a patch always means "not
/// changed".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    CalendarCreated {
        calendar_id: CalendarId,
    },
    OneOffEventAdded {
        calendar_id: CalendarId,
        event: OneOffEvent,
    },
    OneOffEventDeleted {
        calendar_id: CalendarId,
        event_id: EventId,
    },
    OneOffEventChanged {
        calendar_id: CalendarId,
        event_id: EventId,
        patch: OneOffEventPatch,
    },
    RecurringEventAdded {
        calendar_id: CalendarId,
        event: RecurringEvent,
    },
    /// Carries the removed entity so projections can clean up derived state
    /// without a second lookup.
    RecurringEventDeleted {
        calendar_id: CalendarId,
        event: RecurringEvent,
    },
    RecurringEventChanged {
        calendar_id: CalendarId,
        event_id: EventId,
        patch: RecurringEventPatch,
    },
    RecurringEventOccurrenceDeleted {
        calendar_id: CalendarId,
        parent_id: EventId,
        date: NaiveDate,
    },
    RecurringEventOccurrenceUnDeleted {
        calendar_id: CalendarId,
        parent_id: EventId,
        date: NaiveDate,
    },
    RecurringEventOccurrenceOverridden {
        calendar_id: CalendarId,
        parent_id: EventId,
        date: NaiveDate,
        data: OccurrenceData,
    },
    RecurringEventOccurrenceOverrideReverted {
        calendar_id: CalendarId,
        parent_id: EventId,
        date: NaiveDate,
    },
}
