pub mod day_schedule;
pub mod id;
pub mod interval_set;
pub mod primitives;
pub mod time_mapper;
pub mod types;

pub use day_schedule::DaySchedule;
pub use id::BlockIdAllocator;
pub use interval_set::{IntervalRules, overlaps};
pub use primitives::{
    GRAIN_MINUTES, MAX_MINUTE, MIN_DURATION_MINUTES, MINUTES_PER_DAY, minutes_to_clock,
    minutes_to_hhmm, parse_clock,
};
pub use time_mapper::{BarGeometry, TimeCoordinateMapper, minutes_to_percent};
pub use types::{BlockId, DayOfWeek, Doctor, TimeBlock, Work};
