use serde::{Deserialize, Serialize};

use crate::core::primitives::{
    GRAIN_MINUTES, MAX_MINUTE, MINUTES_PER_DAY, clamp_minute, snap_to_grain,
};
use crate::error::{ScheduleError, ScheduleResult};

/// Horizontal placement of a day timeline bar in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub left: f64,
    pub width: f64,
}

impl BarGeometry {
    #[must_use]
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.left.is_finite() && self.width.is_finite() && self.width > 0.0
    }

    fn validate(self) -> ScheduleResult<Self> {
        if !self.is_valid() {
            return Err(ScheduleError::InvalidBarGeometry {
                left: self.left,
                width: self.width,
            });
        }
        Ok(self)
    }
}

impl Default for BarGeometry {
    fn default() -> Self {
        Self {
            left: 0.0,
            width: f64::from(MINUTES_PER_DAY),
        }
    }
}

/// Pure conversion between client x offsets on a bar and minute-of-day values.
///
/// The full bar width spans 1440 minutes. Pointer-derived minutes are rounded to
/// the nearest `grain` and clamped to `[0, 1439]`, so mapping an on-grain minute
/// to a pixel and back returns the same minute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeCoordinateMapper {
    bar: BarGeometry,
    grain: u16,
}

impl Default for TimeCoordinateMapper {
    fn default() -> Self {
        Self {
            bar: BarGeometry::default(),
            grain: GRAIN_MINUTES,
        }
    }
}

impl TimeCoordinateMapper {
    pub fn new(bar: BarGeometry, grain: u16) -> ScheduleResult<Self> {
        if grain == 0 || grain >= MINUTES_PER_DAY {
            return Err(ScheduleError::InvalidConfig(format!(
                "grain must be in 1..{MINUTES_PER_DAY}, got {grain}"
            )));
        }
        Ok(Self {
            bar: bar.validate()?,
            grain,
        })
    }

    #[must_use]
    pub fn bar(self) -> BarGeometry {
        self.bar
    }

    #[must_use]
    pub fn grain(self) -> u16 {
        self.grain
    }

    pub fn set_bar(&mut self, bar: BarGeometry) -> ScheduleResult<()> {
        self.bar = bar.validate()?;
        Ok(())
    }

    /// Maps a client x coordinate to a snapped, clamped minute-of-day.
    #[must_use]
    pub fn pixel_to_minutes(self, client_x: f64) -> u16 {
        let pct = (client_x - self.bar.left) / self.bar.width;
        let raw = pct * f64::from(MINUTES_PER_DAY);
        if !raw.is_finite() {
            return if raw > 0.0 { MAX_MINUTE } else { 0 };
        }
        clamp_minute(snap_to_grain(raw, self.grain))
    }

    /// Converts a horizontal pointer displacement to a snapped minute delta.
    ///
    /// Unlike [`Self::pixel_to_minutes`] the result is signed and unclamped.
    #[must_use]
    pub fn pixel_delta_to_minutes(self, delta_x: f64) -> i32 {
        let raw = delta_x / self.bar.width * f64::from(MINUTES_PER_DAY);
        if !raw.is_finite() {
            return 0;
        }
        snap_to_grain(raw, self.grain)
    }

    /// Client x coordinate of a minute-of-day on this bar.
    #[must_use]
    pub fn minutes_to_pixel(self, minutes: u16) -> f64 {
        self.bar.left + f64::from(minutes) / f64::from(MINUTES_PER_DAY) * self.bar.width
    }
}

/// Rendering position of a minute on a bar, in `[0, 100]`.
///
/// Uses 1439 as the denominator so the last minute lands on the right edge.
/// Only meant for painting; invariants never depend on it.
#[must_use]
pub fn minutes_to_percent(minutes: u16) -> f64 {
    (f64::from(minutes) / f64::from(MAX_MINUTE)).clamp(0.0, 1.0) * 100.0
}
