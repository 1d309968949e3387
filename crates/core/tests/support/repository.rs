//! In-memory mock for `CalendarRepository`.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use fieldcal_core::{CalendarRepository, VersionMap};
use fieldcal_domain::{
    Calendar, CalendarError, CalendarId, Notification, OneOffEvent, RecurringEvent,
    Result as DomainResult,
};

#[derive(Default)]
struct MockState {
    one_off_events: Vec<OneOffEvent>,
    recurring_events: Vec<RecurringEvent>,
    saved_notifications: Vec<Notification>,
    save_calls: usize,
    next_version: u32,
    fail_next_save: bool,
}

/// In-memory mock for [`CalendarRepository`].
///
/// Rehydrates a calendar from seeded event lists and projects the event
/// notifications it receives on save back onto that seed state, so
/// subsequent loads observe committed adds, deletes and changes. Occurrence
/// exception notifications are recorded but not projected; the load contract
/// rehydrates event lists only.
#[derive(Clone)]
pub struct MockCalendarRepository {
    calendar_id: CalendarId,
    state: Arc<Mutex<MockState>>,
}

impl MockCalendarRepository {
    /// Create a mock for one calendar, with no seeded events.
    pub fn new(calendar_id: CalendarId) -> Self {
        Self { calendar_id, state: Arc::new(Mutex::new(MockState::default())) }
    }

    /// Seed a one-off event.
    pub fn with_one_off(self, event: OneOffEvent) -> Self {
        self.state.lock().unwrap().one_off_events.push(event);
        self
    }

    /// Seed a recurring event.
    pub fn with_recurring(self, event: RecurringEvent) -> Self {
        self.state.lock().unwrap().recurring_events.push(event);
        self
    }

    /// Make the next save fail with a storage error.
    pub fn fail_next_save(&self) {
        self.state.lock().unwrap().fail_next_save = true;
    }

    /// Every notification received across all saves, in order.
    pub fn saved_notifications(&self) -> Vec<Notification> {
        self.state.lock().unwrap().saved_notifications.clone()
    }

    /// Number of save calls that reached the repository.
    pub fn save_calls(&self) -> usize {
        self.state.lock().unwrap().save_calls
    }
}

#[async_trait]
impl CalendarRepository for MockCalendarRepository {
    async fn load(
        &self,
        calendar_id: CalendarId,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> DomainResult<Calendar> {
        if calendar_id != self.calendar_id {
            return Err(CalendarError::Storage(format!("unknown calendar {calendar_id}")));
        }

        let state = self.state.lock().unwrap();
        Calendar::load(
            calendar_id,
            state.one_off_events.clone(),
            state.recurring_events.clone(),
        )
    }

    async fn save(
        &self,
        _calendar_id: CalendarId,
        notifications: &[Notification],
    ) -> DomainResult<VersionMap> {
        let mut state = self.state.lock().unwrap();

        if state.fail_next_save {
            state.fail_next_save = false;
            return Err(CalendarError::Storage("save failed".to_string()));
        }

        let mut versions = VersionMap::default();
        for notification in notifications {
            state.next_version += 1;
            let version = state.next_version;

            match notification {
                Notification::CalendarCreated { .. } => {}
                Notification::OneOffEventAdded { event, .. } => {
                    versions.insert(event.id, version);
                    state.one_off_events.push(event.clone());
                }
                Notification::OneOffEventDeleted { event_id, .. } => {
                    versions.insert(*event_id, version);
                    state.one_off_events.retain(|event| event.id != *event_id);
                }
                Notification::OneOffEventChanged { event_id, patch, .. } => {
                    versions.insert(*event_id, version);
                    for event in &mut state.one_off_events {
                        if event.id == *event_id {
                            *event = patch.apply_to(event);
                        }
                    }
                }
                Notification::RecurringEventAdded { event, .. } => {
                    versions.insert(event.id, version);
                    state.recurring_events.push(event.clone());
                }
                Notification::RecurringEventDeleted { event, .. } => {
                    versions.insert(event.id, version);
                    state.recurring_events.retain(|stored| stored.id != event.id);
                }
                Notification::RecurringEventChanged { event_id, patch, .. } => {
                    versions.insert(*event_id, version);
                    for event in &mut state.recurring_events {
                        if event.id == *event_id {
                            *event = patch.apply_to(event);
                        }
                    }
                }
                Notification::RecurringEventOccurrenceDeleted { parent_id, .. }
                | Notification::RecurringEventOccurrenceUnDeleted { parent_id, .. }
                | Notification::RecurringEventOccurrenceOverridden { parent_id, .. }
                | Notification::RecurringEventOccurrenceOverrideReverted { parent_id, .. } => {
                    versions.insert(*parent_id, version);
                }
            }
        }

        state.saved_notifications.extend_from_slice(notifications);
        state.save_calls += 1;

        Ok(versions)
    }
}
