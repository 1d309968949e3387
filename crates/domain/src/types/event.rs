//! Event types: one-off events, recurring events, and derived occurrences.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::pattern::RecurrencePattern;
use super::time_frame::TimeFrame;
use super::{EventId, TimesheetCode};

/// A calendar entry occurring exactly once on a specific date.
///
/// Immutable value; "changing" an event replaces the stored entry with a new
/// value carrying the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneOffEvent {
    pub id: EventId,
    pub title: String,
    pub summary: String,
    pub date: NaiveDate,
    pub time_frame: TimeFrame,
    pub timesheet_code: TimesheetCode,
}

/// A calendar entry defined by a start date and a recurrence pattern,
/// expanding to many dated occurrences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringEvent {
    pub id: EventId,
    pub title: String,
    pub summary: String,
    pub start_date: NaiveDate,
    pub time_frame: TimeFrame,
    pub timesheet_code: TimesheetCode,
    pub pattern: RecurrencePattern,
}

/// Substitute content for a single occurrence of a recurring event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccurrenceData {
    pub title: String,
    pub summary: String,
    pub time_frame: TimeFrame,
}

/// One materialized instance of a recurring event on a specific date, after
/// exceptions are applied.
///
/// Derived, never stored. The parent is referenced by id rather than held as
/// an object so the value stays free of ownership cycles; its identity for
/// exception lookup is the `(parent_id, date)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    pub parent_id: EventId,
    pub date: NaiveDate,
    pub title: String,
    pub summary: String,
    pub time_frame: TimeFrame,
}

/// A single entry produced by the calendar query: either a one-off event
/// verbatim, or a resolved occurrence of a recurring event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarEntry {
    OneOff(OneOffEvent),
    Occurrence(Occurrence),
}

impl CalendarEntry {
    /// Date the entry falls on.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::OneOff(event) => event.date,
            Self::Occurrence(occurrence) => occurrence.date,
        }
    }

    /// Title of the entry.
    pub fn title(&self) -> &str {
        match self {
            Self::OneOff(event) => &event.title,
            Self::Occurrence(occurrence) => &occurrence.title,
        }
    }
}

/// Field set for changing a one-off event. `None` means "field not changed",
/// never "field cleared".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OneOffEventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_frame: Option<TimeFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timesheet_code: Option<TimesheetCode>,
}

impl OneOffEventPatch {
    /// Merge this patch over an existing event, keeping the original value
    /// for every absent field. The id never changes.
    pub fn apply_to(&self, original: &OneOffEvent) -> OneOffEvent {
        OneOffEvent {
            id: original.id,
            title: self.title.clone().unwrap_or_else(|| original.title.clone()),
            summary: self.summary.clone().unwrap_or_else(|| original.summary.clone()),
            date: self.date.unwrap_or(original.date),
            time_frame: self.time_frame.unwrap_or(original.time_frame),
            timesheet_code: self.timesheet_code.unwrap_or(original.timesheet_code),
        }
    }
}

/// Field set for changing a recurring event. `None` means "field not
/// changed".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecurringEventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_frame: Option<TimeFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timesheet_code: Option<TimesheetCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<RecurrencePattern>,
}

impl RecurringEventPatch {
    /// Merge this patch over an existing event, keeping the original value
    /// for every absent field. The id never changes.
    pub fn apply_to(&self, original: &RecurringEvent) -> RecurringEvent {
        RecurringEvent {
            id: original.id,
            title: self.title.clone().unwrap_or_else(|| original.title.clone()),
            summary: self.summary.clone().unwrap_or_else(|| original.summary.clone()),
            start_date: self.start_date.unwrap_or(original.start_date),
            time_frame: self.time_frame.unwrap_or(original.time_frame),
            timesheet_code: self.timesheet_code.unwrap_or(original.timesheet_code),
            pattern: self.pattern.clone().unwrap_or_else(|| original.pattern.clone()),
        }
    }

    /// Whether the patch touches the occurrence schedule (start date or
    /// pattern). Exception cleanup only runs when this is true and the
    /// merged value actually differs.
    pub fn affects_schedule(&self) -> bool {
        self.start_date.is_some() || self.pattern.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sample_one_off() -> OneOffEvent {
        OneOffEvent {
            id: Uuid::new_v4(),
            title: "Depot inventory".to_string(),
            summary: "Quarterly stock count".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            time_frame: TimeFrame::AllDay,
            timesheet_code: 410,
        }
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let event = sample_one_off();
        assert_eq!(OneOffEventPatch::default().apply_to(&event), event);
    }

    #[test]
    fn test_patch_keeps_unchanged_fields() {
        let event = sample_one_off();
        let patch = OneOffEventPatch { title: Some("Stock count".to_string()), ..Default::default() };

        let changed = patch.apply_to(&event);

        assert_eq!(changed.id, event.id);
        assert_eq!(changed.title, "Stock count");
        assert_eq!(changed.summary, event.summary);
        assert_eq!(changed.date, event.date);
        assert_eq!(changed.timesheet_code, event.timesheet_code);
    }

    #[test]
    fn test_recurring_patch_schedule_detection() {
        assert!(!RecurringEventPatch::default().affects_schedule());
        assert!(RecurringEventPatch {
            start_date: Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            ..Default::default()
        }
        .affects_schedule());
        assert!(RecurringEventPatch {
            pattern: Some(RecurrencePattern::parse("daily").unwrap()),
            ..Default::default()
        }
        .affects_schedule());
    }
}
