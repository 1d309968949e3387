//! Calendar scheduling: commands, queries, ports, and the handler service.

pub mod commands;
pub mod ports;
pub mod service;

pub use service::CalendarService;
