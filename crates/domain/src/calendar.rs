//! The Calendar aggregate: non-job event state and mutation commands.
//!
//! Owns one-off events, recurring events, per-occurrence exceptions
//! (tombstones and overrides), and the pending-notification log. All
//! commands are synchronous, in-memory, and deterministic; the aggregate is
//! not internally thread-safe and expects the caller to provide isolation at
//! the request/transaction boundary.
//!
//! Exception state lives in side tables keyed by `(parent event id, date)`
//! rather than as flags on derived occurrence values, so the query path can
//! stay pure and occurrence values never hold references back into the
//! aggregate.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::errors::{CalendarError, Result};
use crate::expand::RecurrenceExpander;
use crate::notification::Notification;
use crate::types::{
    CalendarEntry, CalendarId, EventId, OccurrenceData, OneOffEvent, OneOffEventPatch, Occurrence,
    RecurringEvent, RecurringEventPatch,
};

/// A technician's calendar of non-job time.
///
/// `try_*` commands report expected domain conditions (duplicate, not-found,
/// invalid transition) through their return value and never fail otherwise.
/// The non-`try` counterparts are thin facades that convert a rejected
/// command into a typed [`CalendarError`].
#[derive(Debug, Clone)]
pub struct Calendar {
    id: CalendarId,
    one_off_events: BTreeMap<EventId, OneOffEvent>,
    recurring_events: BTreeMap<EventId, RecurringEvent>,
    tombstones: HashMap<EventId, BTreeSet<NaiveDate>>,
    overrides: HashMap<EventId, BTreeMap<NaiveDate, OccurrenceData>>,
    pending: Vec<Notification>,
}

impl Calendar {
    /// Create a new, empty calendar and record `CalendarCreated`.
    pub fn create(id: CalendarId) -> Self {
        let mut calendar = Self::empty(id);
        calendar.publish(Notification::CalendarCreated { calendar_id: id });
        calendar
    }

    /// Rehydrate a calendar from persisted event lists.
    ///
    /// Rehydration is not a state change: no notifications are appended.
    /// Fails with [`CalendarError::DuplicateEvent`] if either list repeats
    /// an id within its own collection.
    pub fn load(
        id: CalendarId,
        one_off_events: Vec<OneOffEvent>,
        recurring_events: Vec<RecurringEvent>,
    ) -> Result<Self> {
        let mut calendar = Self::empty(id);

        for event in one_off_events {
            let event_id = event.id;
            if calendar.one_off_events.insert(event_id, event).is_some() {
                return Err(CalendarError::DuplicateEvent(event_id));
            }
        }

        for event in recurring_events {
            let event_id = event.id;
            if calendar.recurring_events.insert(event_id, event).is_some() {
                return Err(CalendarError::DuplicateEvent(event_id));
            }
        }

        Ok(calendar)
    }

    fn empty(id: CalendarId) -> Self {
        Self {
            id,
            one_off_events: BTreeMap::new(),
            recurring_events: BTreeMap::new(),
            tombstones: HashMap::new(),
            overrides: HashMap::new(),
            pending: Vec::new(),
        }
    }

    /// Identity of this calendar.
    pub fn id(&self) -> CalendarId {
        self.id
    }

    /// Look up a stored one-off event.
    pub fn one_off_event(&self, event_id: EventId) -> Option<&OneOffEvent> {
        self.one_off_events.get(&event_id)
    }

    /// Look up a stored recurring event.
    pub fn recurring_event(&self, event_id: EventId) -> Option<&RecurringEvent> {
        self.recurring_events.get(&event_id)
    }

    // ========================================================================
    // Notification log
    // ========================================================================

    /// Notifications accumulated since the last acknowledgment, in command
    /// order.
    pub fn pending_notifications(&self) -> &[Notification] {
        &self.pending
    }

    /// Clear the pending log. Called by the owner once the notifications
    /// have been durably persisted; the aggregate never clears it on its
    /// own.
    pub fn acknowledge_notifications(&mut self) {
        self.pending.clear();
    }

    fn publish(&mut self, notification: Notification) {
        self.pending.push(notification);
    }

    // ========================================================================
    // One-off event commands
    // ========================================================================

    /// Add a one-off event. Returns false on a duplicate id.
    pub fn try_add_one_off_event(&mut self, event: OneOffEvent) -> bool {
        if self.one_off_events.contains_key(&event.id) {
            return false;
        }

        self.publish(Notification::OneOffEventAdded { calendar_id: self.id, event: event.clone() });
        self.one_off_events.insert(event.id, event);
        true
    }

    /// Add a one-off event, failing with [`CalendarError::DuplicateEvent`].
    pub fn add_one_off_event(&mut self, event: OneOffEvent) -> Result<()> {
        let event_id = event.id;
        if self.try_add_one_off_event(event) {
            Ok(())
        } else {
            Err(CalendarError::DuplicateEvent(event_id))
        }
    }

    /// Delete a one-off event. Returns false if the id is unknown.
    pub fn try_delete_one_off_event(&mut self, event_id: EventId) -> bool {
        if self.one_off_events.remove(&event_id).is_none() {
            return false;
        }

        self.publish(Notification::OneOffEventDeleted { calendar_id: self.id, event_id });
        true
    }

    /// Delete a one-off event, failing with [`CalendarError::EventNotFound`].
    pub fn delete_one_off_event(&mut self, event_id: EventId) -> Result<()> {
        if self.try_delete_one_off_event(event_id) {
            Ok(())
        } else {
            Err(CalendarError::EventNotFound(event_id))
        }
    }

    /// Change a one-off event by merging the supplied fields over the stored
    /// value. Returns false if the id is unknown.
    ///
    /// The emitted notification carries the patch exactly as supplied, not
    /// the merged values.
    pub fn try_change_one_off_event(&mut self, event_id: EventId, patch: OneOffEventPatch) -> bool {
        let Some(original) = self.one_off_events.get(&event_id) else {
            return false;
        };

        let changed = patch.apply_to(original);
        self.one_off_events.insert(event_id, changed);
        self.publish(Notification::OneOffEventChanged { calendar_id: self.id, event_id, patch });
        true
    }

    /// Change a one-off event, failing with [`CalendarError::EventNotFound`].
    pub fn change_one_off_event(&mut self, event_id: EventId, patch: OneOffEventPatch) -> Result<()> {
        if self.try_change_one_off_event(event_id, patch) {
            Ok(())
        } else {
            Err(CalendarError::EventNotFound(event_id))
        }
    }

    // ========================================================================
    // Recurring event commands
    // ========================================================================

    /// Add a recurring event. Returns false on a duplicate id.
    pub fn try_add_recurring_event(&mut self, event: RecurringEvent) -> bool {
        if self.recurring_events.contains_key(&event.id) {
            return false;
        }

        self.publish(Notification::RecurringEventAdded {
            calendar_id: self.id,
            event: event.clone(),
        });
        self.recurring_events.insert(event.id, event);
        true
    }

    /// Add a recurring event, failing with [`CalendarError::DuplicateEvent`].
    pub fn add_recurring_event(&mut self, event: RecurringEvent) -> Result<()> {
        let event_id = event.id;
        if self.try_add_recurring_event(event) {
            Ok(())
        } else {
            Err(CalendarError::DuplicateEvent(event_id))
        }
    }

    /// Delete a recurring event, cascading removal of its tombstones and
    /// overrides. Returns the removed entity, or `None` if the id is
    /// unknown.
    pub fn try_delete_recurring_event(&mut self, event_id: EventId) -> Option<RecurringEvent> {
        let event = self.recurring_events.remove(&event_id)?;

        self.tombstones.remove(&event_id);
        self.overrides.remove(&event_id);
        self.publish(Notification::RecurringEventDeleted {
            calendar_id: self.id,
            event: event.clone(),
        });

        Some(event)
    }

    /// Delete a recurring event, failing with
    /// [`CalendarError::EventNotFound`].
    pub fn delete_recurring_event(&mut self, event_id: EventId) -> Result<RecurringEvent> {
        self.try_delete_recurring_event(event_id)
            .ok_or(CalendarError::EventNotFound(event_id))
    }

    /// Change a recurring event by merging the supplied fields over the
    /// stored value. Returns false if the id is unknown.
    ///
    /// When the merged start date or pattern actually differs from the
    /// stored one, stale exceptions are cleaned up before the
    /// `RecurringEventChanged` notification is appended: every tombstoned or
    /// overridden date is re-expanded over the single-day range `[d, d]`
    /// against the new schedule, and dates that no longer match are released
    /// through the public un-delete / revert commands so their own
    /// notifications fire. The log therefore fully explains every state
    /// change.
    pub fn try_change_recurring_event(
        &mut self,
        event_id: EventId,
        patch: RecurringEventPatch,
        expander: &dyn RecurrenceExpander,
    ) -> bool {
        let Some(original) = self.recurring_events.get(&event_id) else {
            return false;
        };

        let changed = patch.apply_to(original);
        let schedule_changed = patch.affects_schedule()
            && (changed.start_date != original.start_date || changed.pattern != original.pattern);

        self.recurring_events.insert(event_id, changed);

        if schedule_changed {
            self.release_stale_exceptions(event_id, expander);
        }

        self.publish(Notification::RecurringEventChanged { calendar_id: self.id, event_id, patch });
        true
    }

    /// Change a recurring event, failing with
    /// [`CalendarError::EventNotFound`].
    pub fn change_recurring_event(
        &mut self,
        event_id: EventId,
        patch: RecurringEventPatch,
        expander: &dyn RecurrenceExpander,
    ) -> Result<()> {
        if self.try_change_recurring_event(event_id, patch, expander) {
            Ok(())
        } else {
            Err(CalendarError::EventNotFound(event_id))
        }
    }

    /// Drop tombstones and overrides whose dates the (new) schedule no
    /// longer produces.
    ///
    /// Tombstones are released first: a date can carry both an override and
    /// a tombstone, and the override can only be reverted once the tombstone
    /// is gone.
    fn release_stale_exceptions(&mut self, event_id: EventId, expander: &dyn RecurrenceExpander) {
        let Some(event) = self.recurring_events.get(&event_id).cloned() else {
            return;
        };

        let stale_tombstones: Vec<NaiveDate> = self
            .tombstones
            .get(&event_id)
            .map(|dates| {
                dates
                    .iter()
                    .copied()
                    .filter(|date| !Self::schedule_matches(&event, *date, expander))
                    .collect()
            })
            .unwrap_or_default();

        for date in stale_tombstones {
            self.try_undelete_occurrence(event_id, date);
        }

        let stale_overrides: Vec<NaiveDate> = self
            .overrides
            .get(&event_id)
            .map(|dates| {
                dates
                    .keys()
                    .copied()
                    .filter(|date| !Self::schedule_matches(&event, *date, expander))
                    .collect()
            })
            .unwrap_or_default();

        for date in stale_overrides {
            self.try_revert_occurrence_override(event_id, date);
        }
    }

    fn schedule_matches(
        event: &RecurringEvent,
        date: NaiveDate,
        expander: &dyn RecurrenceExpander,
    ) -> bool {
        expander.expand(&event.pattern, event.start_date, date, date).contains(&date)
    }

    // ========================================================================
    // Occurrence exception commands
    // ========================================================================

    /// Tombstone one occurrence date of a recurring event.
    ///
    /// Returns false if the parent is unknown, the event does not occur on
    /// `date`, or the date is already tombstoned (idempotent: resubmitting
    /// appends no duplicate notification). An existing override for the
    /// same date is left in place; un-deleting later restores its
    /// visibility.
    pub fn try_delete_occurrence(
        &mut self,
        parent_id: EventId,
        date: NaiveDate,
        expander: &dyn RecurrenceExpander,
    ) -> bool {
        if !self.occurs_on(parent_id, date, expander) {
            return false;
        }

        let inserted = self.tombstones.entry(parent_id).or_default().insert(date);
        if inserted {
            self.publish(Notification::RecurringEventOccurrenceDeleted {
                calendar_id: self.id,
                parent_id,
                date,
            });
        }

        inserted
    }

    /// Remove a tombstone, restoring the occurrence (and any override still
    /// stored for it). Returns false if the date is not tombstoned.
    pub fn try_undelete_occurrence(&mut self, parent_id: EventId, date: NaiveDate) -> bool {
        let removed = self
            .tombstones
            .get_mut(&parent_id)
            .is_some_and(|dates| dates.remove(&date));

        if removed {
            self.publish(Notification::RecurringEventOccurrenceUnDeleted {
                calendar_id: self.id,
                parent_id,
                date,
            });
        }

        removed
    }

    /// Store or replace the override for one occurrence date.
    ///
    /// Returns false if the occurrence does not exist on `date` or the date
    /// is currently tombstoned; a deleted occurrence must be un-deleted
    /// before it can be overridden.
    pub fn try_override_occurrence(
        &mut self,
        parent_id: EventId,
        date: NaiveDate,
        data: OccurrenceData,
        expander: &dyn RecurrenceExpander,
    ) -> bool {
        if !self.occurs_on(parent_id, date, expander) {
            return false;
        }

        if self.is_occurrence_deleted(parent_id, date) {
            return false;
        }

        self.overrides.entry(parent_id).or_default().insert(date, data.clone());
        self.publish(Notification::RecurringEventOccurrenceOverridden {
            calendar_id: self.id,
            parent_id,
            date,
            data,
        });

        true
    }

    /// Remove the override for one occurrence date. Returns false if the
    /// date is tombstoned or no override exists.
    pub fn try_revert_occurrence_override(&mut self, parent_id: EventId, date: NaiveDate) -> bool {
        if self.is_occurrence_deleted(parent_id, date) {
            return false;
        }

        let removed = self
            .overrides
            .get_mut(&parent_id)
            .is_some_and(|dates| dates.remove(&date).is_some());

        if removed {
            self.publish(Notification::RecurringEventOccurrenceOverrideReverted {
                calendar_id: self.id,
                parent_id,
                date,
            });
        }

        removed
    }

    fn is_occurrence_deleted(&self, parent_id: EventId, date: NaiveDate) -> bool {
        self.tombstones.get(&parent_id).is_some_and(|dates| dates.contains(&date))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Whether a recurring event occurs on `date` according to its pattern.
    ///
    /// Expands the range `[date-1, date+1]` and checks membership; the
    /// one-day buffer tolerates boundary behaviour of expansion
    /// implementations and is part of the expander contract.
    pub fn occurs_on(
        &self,
        parent_id: EventId,
        date: NaiveDate,
        expander: &dyn RecurrenceExpander,
    ) -> bool {
        let Some(event) = self.recurring_events.get(&parent_id) else {
            return false;
        };

        let from = date.pred_opt().unwrap_or(date);
        let to = date.succ_opt().unwrap_or(date);

        expander.expand(&event.pattern, event.start_date, from, to).contains(&date)
    }

    /// Materialize the calendar over `[from, to]` as a lazy, restartable
    /// sequence.
    ///
    /// Yields every one-off event verbatim (deliberately unfiltered by the
    /// requested range), then for each recurring event its expanded dates
    /// with tombstoned dates removed and overridden dates substituted.
    /// Iterating twice yields the same result provided no mutation occurred
    /// in between.
    pub fn get_events<'a>(
        &'a self,
        from: NaiveDate,
        to: NaiveDate,
        expander: &'a dyn RecurrenceExpander,
    ) -> impl Iterator<Item = CalendarEntry> + 'a {
        let one_offs = self.one_off_events.values().cloned().map(CalendarEntry::OneOff);

        let occurrences = self.recurring_events.values().flat_map(move |event| {
            let tombstoned = self.tombstones.get(&event.id);

            expander
                .expand(&event.pattern, event.start_date, from, to)
                .into_iter()
                .filter(move |date| !tombstoned.is_some_and(|dates| dates.contains(date)))
                .map(move |date| CalendarEntry::Occurrence(self.resolve_occurrence(event, date)))
        });

        one_offs.chain(occurrences)
    }

    /// Build the observable occurrence for one date, substituting override
    /// content when present.
    fn resolve_occurrence(&self, event: &RecurringEvent, date: NaiveDate) -> Occurrence {
        match self.overrides.get(&event.id).and_then(|dates| dates.get(&date)) {
            Some(data) => Occurrence {
                parent_id: event.id,
                date,
                title: data.title.clone(),
                summary: data.summary.clone(),
                time_frame: data.time_frame,
            },
            None => Occurrence {
                parent_id: event.id,
                date,
                title: event.title.clone(),
                summary: event.summary.clone(),
                time_frame: event.time_frame,
            },
        }
    }
}
