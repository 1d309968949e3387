//! # FieldCal Domain
//!
//! Business domain model for FieldCal: a technician's calendar of non-job
//! (administrative/blocking) time.
//!
//! This crate contains:
//! - The `Calendar` aggregate: one-off events, recurring events, occurrence
//!   exceptions (tombstones and overrides), and the pending-notification log
//! - Domain value types (`TimeFrame`, `RecurrencePattern`, event types)
//! - Domain error types and Result definitions
//! - The `RecurrenceExpander` boundary contract
//!
//! ## Architecture
//! - No dependencies on other FieldCal crates
//! - Only external dependencies allowed
//! - Pure, synchronous, deterministic domain logic; no I/O

pub mod calendar;
pub mod errors;
pub mod expand;
pub mod notification;
pub mod types;

// Re-export commonly used items
pub use calendar::Calendar;
pub use errors::*;
pub use expand::RecurrenceExpander;
pub use notification::Notification;
pub use types::*;
