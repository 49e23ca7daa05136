//! clinic-hours-rs: editing core for weekly clinic shift templates.
//!
//! Operators define each day's shift blocks by clicking and dragging on a
//! 24-hour timeline bar. This crate turns those pointer events into snapped
//! minute math and keeps every day valid: blocks never overlap, stay inside
//! the day and last at least the minimum duration.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{EditorConfig, ScheduleDayEditor, WeeklyTemplateStore};
pub use error::{ScheduleError, ScheduleResult};
