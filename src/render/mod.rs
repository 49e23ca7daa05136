//! Headless frame model for day bars.
//!
//! Hosts paint from a `DayFrame`; nothing here depends on a UI toolkit.

mod frame;

pub use frame::{BlockFrame, DayFrame, build_day_frame};
