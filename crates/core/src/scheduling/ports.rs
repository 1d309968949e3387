//! Port interfaces for calendar persistence
//!
//! These traits define the boundary between the scheduling logic and
//! infrastructure implementations. The aggregate itself performs no I/O;
//! loading and saving, including optimistic-concurrency versioning, belong
//! to the repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use fieldcal_domain::{Calendar, CalendarId, EventId, Notification, Result};

/// Per-event version tokens returned by a successful save, for optimistic
/// concurrency at the storage layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionMap {
    versions: HashMap<EventId, u32>,
}

impl VersionMap {
    /// Record the version token for one event.
    pub fn insert(&mut self, event_id: EventId, version: u32) {
        self.versions.insert(event_id, version);
    }

    /// Version token for one event, if the save touched it.
    pub fn get(&self, event_id: EventId) -> Option<u32> {
        self.versions.get(&event_id).copied()
    }

    /// Number of events the save touched.
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Whether the save touched no events.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

/// Trait for loading and saving calendar aggregates.
///
/// Implementations signal duplicate / not-found / conflict conditions via
/// the corresponding `CalendarError` variants. `save` consumes the pending
/// notifications of an aggregate (outbox style); callers acknowledge the
/// notifications only after a successful save.
#[async_trait]
pub trait CalendarRepository: Send + Sync {
    /// Load the calendar aggregate, scoped to the date window the caller is
    /// operating on.
    async fn load(
        &self,
        calendar_id: CalendarId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Calendar>;

    /// Persist a batch of state-change notifications.
    async fn save(
        &self,
        calendar_id: CalendarId,
        notifications: &[Notification],
    ) -> Result<VersionMap>;
}
