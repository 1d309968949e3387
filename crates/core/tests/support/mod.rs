//! Shared test helpers for `fieldcal-core` integration tests.
//!
//! These helpers provide reusable fixtures and lightweight mocks so that the
//! service tests can focus on behaviour instead of boilerplate.

pub mod expander;
pub mod repository;

use chrono::NaiveDate;
use fieldcal_domain::{OneOffEvent, RecurrencePattern, RecurringEvent, TimeFrame};
use uuid::Uuid;

/// Convenience date constructor for fixtures.
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

/// A one-off fixture event.
pub fn one_off(title: &str, on: NaiveDate) -> OneOffEvent {
    OneOffEvent {
        id: Uuid::new_v4(),
        title: title.to_string(),
        summary: String::new(),
        date: on,
        time_frame: TimeFrame::AllDay,
        timesheet_code: 100,
    }
}

/// A weekly recurring fixture event.
pub fn weekly_event(title: &str, start: NaiveDate) -> RecurringEvent {
    RecurringEvent {
        id: Uuid::new_v4(),
        title: title.to_string(),
        summary: String::new(),
        start_date: start,
        time_frame: TimeFrame::AllDay,
        timesheet_code: 200,
        pattern: RecurrencePattern::parse("weekly").expect("valid fixture pattern"),
    }
}
