//! Core types for the diary CLI.
//!
//! This crate holds everything that does not talk to the terminal:
//! - `Event` and the JSON store that persists it
//! - date-window selection with repeat expansion
//! - the grouped-by-year text report
//! - configuration loading

pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod recurrence;
pub mod report;
pub mod store;
pub mod window;

pub use config::DiaryConfig;
pub use error::{DiaryError, DiaryResult};
pub use event::Event;
pub use report::Reporter;
pub use store::EventStore;
pub use window::{DateWindow, WindowPolicy};
