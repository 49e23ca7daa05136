use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

/// Day index in `0..=6`, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub const SUNDAY: Self = Self(0);
    pub const SATURDAY: Self = Self(6);

    /// All seven days in template order.
    pub const ALL: [Self; 7] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
    ];

    pub fn new(index: u8) -> ScheduleResult<Self> {
        if index > 6 {
            return Err(ScheduleError::InvalidDayOfWeek(index));
        }
        Ok(Self(index))
    }

    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Previous day in the same template week. Sunday has none.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }

    #[must_use]
    pub fn short_name(self) -> &'static str {
        ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"][self.index()]
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = ScheduleError;

    fn try_from(value: u8) -> ScheduleResult<Self> {
        Self::new(value)
    }
}

impl From<DayOfWeek> for u8 {
    fn from(day: DayOfWeek) -> Self {
        day.0
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Opaque block identifier, unique within one editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(u64);

impl BlockId {
    #[must_use]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blk-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub specialties: Vec<String>,
}

/// Named sub-assignment inside a block, optionally staffed by a doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<Doctor>,
}

impl Work {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doctor: None,
        }
    }
}

/// A named interval `[start_minute, end_minute)` within one day.
///
/// Construction does not enforce the duration or overlap rules; those are
/// checked on whole days by [`crate::core::IntervalRules`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub id: BlockId,
    pub name: String,
    pub start_minute: u16,
    pub end_minute: u16,
    #[serde(default)]
    pub works: Vec<Work>,
}

impl TimeBlock {
    #[must_use]
    pub fn new(id: BlockId, name: impl Into<String>, start_minute: u16, end_minute: u16) -> Self {
        Self {
            id,
            name: name.into(),
            start_minute,
            end_minute,
            works: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_works(mut self, works: Vec<Work>) -> Self {
        self.works = works;
        self
    }

    #[must_use]
    pub fn duration_minutes(&self) -> i32 {
        i32::from(self.end_minute) - i32::from(self.start_minute)
    }

    #[must_use]
    pub fn with_span(&self, start_minute: u16, end_minute: u16) -> Self {
        Self {
            start_minute,
            end_minute,
            ..self.clone()
        }
    }
}
