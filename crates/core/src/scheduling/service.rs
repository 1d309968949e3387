//! Calendar command/query handler service.
//!
//! Each handler follows the same transaction shape: load the aggregate
//! through the repository port, apply one command, and when the aggregate
//! reports a change, save the pending notifications and acknowledge them.
//! Isolation across concurrent requests is the repository's job (optimistic
//! concurrency at the storage layer); the service itself holds no mutable
//! state.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use fieldcal_domain::{
    Calendar, CalendarEntry, CalendarError, RecurrenceExpander, RecurringEvent, Result,
};
use tracing::{debug, instrument, warn};

use super::commands::{
    AddOneOffEvent, AddRecurringEvent, ChangeOneOffEvent, ChangeRecurringEvent, DeleteOccurrence,
    DeleteOneOffEvent, DeleteRecurringEvent, GetCalendarEvents, OverrideOccurrence,
    RevertOccurrenceOverride, UnDeleteOccurrence,
};
use super::ports::{CalendarRepository, VersionMap};
use crate::config::CalendarServiceConfig;

/// Calendar scheduling service
pub struct CalendarService {
    repository: Arc<dyn CalendarRepository>,
    expander: Arc<dyn RecurrenceExpander>,
    config: CalendarServiceConfig,
}

impl CalendarService {
    /// Create a new calendar service with the default configuration.
    pub fn new(
        repository: Arc<dyn CalendarRepository>,
        expander: Arc<dyn RecurrenceExpander>,
    ) -> Self {
        Self { repository, expander, config: CalendarServiceConfig::default() }
    }

    /// Override the service configuration.
    pub fn with_config(mut self, config: CalendarServiceConfig) -> Self {
        self.config = config;
        self
    }

    // ========================================================================
    // One-off event commands
    // ========================================================================

    /// Add a one-off event. Returns false if the id already exists.
    #[instrument(skip(self, command), fields(calendar_id = %command.calendar_id))]
    pub async fn add_one_off_event(&self, command: AddOneOffEvent) -> Result<bool> {
        let window = command.event.date;
        let mut calendar = self.repository.load(command.calendar_id, window, window).await?;

        let added = calendar.try_add_one_off_event(command.event);
        if added {
            self.commit(&mut calendar).await?;
        } else {
            warn!("one-off event already exists, nothing to save");
        }

        Ok(added)
    }

    /// Delete a one-off event. Returns false if the id is unknown.
    #[instrument(skip(self, command), fields(calendar_id = %command.calendar_id))]
    pub async fn delete_one_off_event(&self, command: DeleteOneOffEvent) -> Result<bool> {
        let window = today();
        let mut calendar = self.repository.load(command.calendar_id, window, window).await?;

        let deleted = calendar.try_delete_one_off_event(command.event_id);
        if deleted {
            self.commit(&mut calendar).await?;
        }

        Ok(deleted)
    }

    /// Change selected fields of a one-off event. Returns false if the id is
    /// unknown.
    #[instrument(skip(self, command), fields(calendar_id = %command.calendar_id))]
    pub async fn change_one_off_event(&self, command: ChangeOneOffEvent) -> Result<bool> {
        let window = command.patch.date.unwrap_or_else(today);
        let mut calendar = self.repository.load(command.calendar_id, window, window).await?;

        let changed = calendar.try_change_one_off_event(command.event_id, command.patch);
        if changed {
            self.commit(&mut calendar).await?;
        }

        Ok(changed)
    }

    // ========================================================================
    // Recurring event commands
    // ========================================================================

    /// Add a recurring event. Returns false if the id already exists.
    #[instrument(skip(self, command), fields(calendar_id = %command.calendar_id))]
    pub async fn add_recurring_event(&self, command: AddRecurringEvent) -> Result<bool> {
        let window = command.event.start_date;
        let mut calendar = self.repository.load(command.calendar_id, window, window).await?;

        let added = calendar.try_add_recurring_event(command.event);
        if added {
            self.commit(&mut calendar).await?;
        } else {
            warn!("recurring event already exists, nothing to save");
        }

        Ok(added)
    }

    /// Delete a recurring event and its exceptions. Returns the removed
    /// entity, or `None` if the id is unknown.
    #[instrument(skip(self, command), fields(calendar_id = %command.calendar_id))]
    pub async fn delete_recurring_event(
        &self,
        command: DeleteRecurringEvent,
    ) -> Result<Option<RecurringEvent>> {
        let window = today();
        let mut calendar = self.repository.load(command.calendar_id, window, window).await?;

        let removed = calendar.try_delete_recurring_event(command.event_id);
        if removed.is_some() {
            self.commit(&mut calendar).await?;
        }

        Ok(removed)
    }

    /// Change selected fields of a recurring event, releasing stale
    /// occurrence exceptions when the schedule changed. Returns false if the
    /// id is unknown.
    #[instrument(skip(self, command), fields(calendar_id = %command.calendar_id))]
    pub async fn change_recurring_event(&self, command: ChangeRecurringEvent) -> Result<bool> {
        let window = command.patch.start_date.unwrap_or_else(today);
        let mut calendar = self.repository.load(command.calendar_id, window, window).await?;

        let changed = calendar.try_change_recurring_event(
            command.event_id,
            command.patch,
            self.expander.as_ref(),
        );
        if changed {
            self.commit(&mut calendar).await?;
        }

        Ok(changed)
    }

    // ========================================================================
    // Occurrence exception commands
    // ========================================================================

    /// Tombstone one occurrence. Returns false if the occurrence does not
    /// exist or is already tombstoned.
    #[instrument(skip(self, command), fields(calendar_id = %command.calendar_id, date = %command.date))]
    pub async fn delete_occurrence(&self, command: DeleteOccurrence) -> Result<bool> {
        let mut calendar =
            self.repository.load(command.calendar_id, command.date, command.date).await?;

        let deleted = calendar.try_delete_occurrence(
            command.parent_id,
            command.date,
            self.expander.as_ref(),
        );
        if deleted {
            self.commit(&mut calendar).await?;
        }

        Ok(deleted)
    }

    /// Restore a tombstoned occurrence. Returns false if the date is not
    /// tombstoned.
    #[instrument(skip(self, command), fields(calendar_id = %command.calendar_id, date = %command.date))]
    pub async fn undelete_occurrence(&self, command: UnDeleteOccurrence) -> Result<bool> {
        let mut calendar =
            self.repository.load(command.calendar_id, command.date, command.date).await?;

        let restored = calendar.try_undelete_occurrence(command.parent_id, command.date);
        if restored {
            self.commit(&mut calendar).await?;
        }

        Ok(restored)
    }

    /// Store or replace an occurrence override. Returns false if the
    /// occurrence does not exist or is tombstoned.
    #[instrument(skip(self, command), fields(calendar_id = %command.calendar_id, date = %command.date))]
    pub async fn override_occurrence(&self, command: OverrideOccurrence) -> Result<bool> {
        let mut calendar =
            self.repository.load(command.calendar_id, command.date, command.date).await?;

        let overridden = calendar.try_override_occurrence(
            command.parent_id,
            command.date,
            command.data,
            self.expander.as_ref(),
        );
        if overridden {
            self.commit(&mut calendar).await?;
        }

        Ok(overridden)
    }

    /// Remove an occurrence override. Returns false if the date is
    /// tombstoned or carries no override.
    #[instrument(skip(self, command), fields(calendar_id = %command.calendar_id, date = %command.date))]
    pub async fn revert_occurrence_override(
        &self,
        command: RevertOccurrenceOverride,
    ) -> Result<bool> {
        let mut calendar =
            self.repository.load(command.calendar_id, command.date, command.date).await?;

        let reverted = calendar.try_revert_occurrence_override(command.parent_id, command.date);
        if reverted {
            self.commit(&mut calendar).await?;
        }

        Ok(reverted)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Materialize calendar entries over the requested range.
    #[instrument(skip(self, query), fields(calendar_id = %query.calendar_id))]
    pub async fn get_calendar_events(&self, query: GetCalendarEvents) -> Result<Vec<CalendarEntry>> {
        self.validate_range(query.from, query.to)?;

        let calendar = self.repository.load(query.calendar_id, query.from, query.to).await?;
        let entries: Vec<CalendarEntry> =
            calendar.get_events(query.from, query.to, self.expander.as_ref()).collect();

        debug!(count = entries.len(), "materialized calendar entries");
        Ok(entries)
    }

    fn validate_range(&self, from: NaiveDate, to: NaiveDate) -> Result<()> {
        if from > to {
            return Err(CalendarError::InvalidQuery(format!(
                "range start {from} is after range end {to}"
            )));
        }

        let span_days = (to - from).num_days() + 1;
        if span_days > i64::from(self.config.max_query_span_days) {
            return Err(CalendarError::InvalidQuery(format!(
                "range spans {span_days} days, maximum is {}",
                self.config.max_query_span_days
            )));
        }

        Ok(())
    }

    async fn commit(&self, calendar: &mut Calendar) -> Result<VersionMap> {
        let versions =
            self.repository.save(calendar.id(), calendar.pending_notifications()).await?;
        calendar.acknowledge_notifications();

        debug!(events = versions.len(), "persisted calendar notifications");
        Ok(versions)
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
