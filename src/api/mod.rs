//! Host-facing editor surface.
//!
//! `ScheduleDayEditor` drives one day's timeline bar, `WeeklyTemplateStore`
//! aggregates seven of them and talks to the external persistence collaborators.

mod collaborators;
mod day_editor;
mod editor_config;
mod template_contract;
mod weekly_store;

pub use collaborators::{
    DoctorDirectory, InMemoryTemplateRepository, NotificationKind, NotificationSink,
    TemplateRepository,
};
pub use day_editor::ScheduleDayEditor;
pub use editor_config::EditorConfig;
pub use template_contract::{LoadReport, PersistedDay, PersistedTemplate, Section, encode_day};
pub use weekly_store::{SAVE_FAILURE_MESSAGE, SAVE_SUCCESS_MESSAGE, WeeklyTemplateStore};
