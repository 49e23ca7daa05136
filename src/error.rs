use thiserror::Error;

use crate::core::BlockId;

pub type ScheduleResult<T> = Result<T, ScheduleError>;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid timeline bar geometry: left={left}, width={width}")]
    InvalidBarGeometry { left: f64, width: f64 },

    #[error("invalid day of week: {0} (expected 0..=6)")]
    InvalidDayOfWeek(u8),

    #[error("invalid clock time: {0:?}")]
    InvalidClockTime(String),

    #[error("invalid editor config: {0}")]
    InvalidConfig(String),

    #[error("day has no previous day to copy from")]
    NoPreviousDay,

    #[error("unknown block: {0}")]
    UnknownBlock(BlockId),

    #[error("unknown doctor: {0:?}")]
    UnknownDoctor(String),

    #[error("persistence failure: {0}")]
    Persistence(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
