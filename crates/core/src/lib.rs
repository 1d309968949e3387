//! # FieldCal Core
//!
//! Application layer over the FieldCal domain - no infrastructure
//! dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for persistence
//! - The `CalendarService` command/query handlers
//! - Service configuration
//!
//! ## Architecture Principles
//! - Only depends on `fieldcal-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits

pub mod config;
pub mod scheduling;

// Re-export specific items to avoid ambiguity
pub use config::CalendarServiceConfig;
pub use scheduling::ports::{CalendarRepository, VersionMap};
pub use scheduling::CalendarService;
