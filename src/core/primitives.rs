use chrono::{NaiveTime, Timelike};

use crate::error::{ScheduleError, ScheduleResult};

/// Minutes represented by the full width of a day timeline bar.
pub const MINUTES_PER_DAY: u16 = 24 * 60;
/// Last addressable minute of the day (23:59).
pub const MAX_MINUTE: u16 = MINUTES_PER_DAY - 1;
/// Default snapping increment for pointer-derived times.
pub const GRAIN_MINUTES: u16 = 10;
/// Default shortest allowed block.
pub const MIN_DURATION_MINUTES: u16 = 120;

/// Clamps a signed minute value into `[0, MAX_MINUTE]`.
#[must_use]
pub fn clamp_minute(value: i32) -> u16 {
    value.clamp(0, i32::from(MAX_MINUTE)) as u16
}

/// Rounds a raw minute offset to the nearest multiple of `grain`.
///
/// No clamping is applied, so negative offsets stay negative.
#[must_use]
pub fn snap_to_grain(raw_minutes: f64, grain: u16) -> i32 {
    let grain = f64::from(grain.max(1));
    ((raw_minutes / grain).round() * grain) as i32
}

/// Formats a minute-of-day as the persisted `HH:mm:ss` form.
#[must_use]
pub fn minutes_to_clock(minutes: u16) -> String {
    let minutes = minutes.min(MAX_MINUTE);
    format!("{:02}:{:02}:00", minutes / 60, minutes % 60)
}

/// Formats a minute-of-day as the short `HH:MM` label used on block faces.
#[must_use]
pub fn minutes_to_hhmm(minutes: u16) -> String {
    let minutes = minutes.min(MAX_MINUTE);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parses `HH:mm` or `HH:mm:ss` into a minute-of-day.
///
/// Seconds are truncated. `24:00` and `24:00:00` are accepted as end of day
/// and, like every other value, clamp to [`MAX_MINUTE`].
pub fn parse_clock(input: &str) -> ScheduleResult<u16> {
    let trimmed = input.trim();
    if trimmed == "24:00" || trimmed == "24:00:00" {
        return Ok(MAX_MINUTE);
    }

    let time = NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| ScheduleError::InvalidClockTime(input.to_owned()))?;

    let total = time.hour() * 60 + time.minute();
    Ok(total.min(u32::from(MAX_MINUTE)) as u16)
}

#[cfg(test)]
mod tests {
    use super::{MAX_MINUTE, minutes_to_clock, minutes_to_hhmm, parse_clock, snap_to_grain};

    #[test]
    fn parse_clock_accepts_short_and_long_forms() {
        assert_eq!(parse_clock("09:30").expect("short form"), 570);
        assert_eq!(parse_clock("09:30:59").expect("long form"), 570);
        assert_eq!(parse_clock(" 00:00 ").expect("padded"), 0);
    }

    #[test]
    fn parse_clock_maps_end_of_day_to_last_minute() {
        assert_eq!(parse_clock("23:59").expect("last minute"), MAX_MINUTE);
        assert_eq!(parse_clock("24:00:00").expect("end of day"), MAX_MINUTE);
    }

    #[test]
    fn parse_clock_rejects_garbage() {
        let err = parse_clock("9h30").expect_err("garbage must fail");
        assert!(format!("{err}").contains("9h30"));
        assert!(parse_clock("25:00").is_err());
    }

    #[test]
    fn clock_formatting_pads_fields() {
        assert_eq!(minutes_to_clock(545), "09:05:00");
        assert_eq!(minutes_to_hhmm(MAX_MINUTE), "23:59");
        assert_eq!(minutes_to_hhmm(5_000), "23:59");
    }

    #[test]
    fn snap_rounds_half_away_from_zero() {
        assert_eq!(snap_to_grain(604.9, 10), 600);
        assert_eq!(snap_to_grain(605.0, 10), 610);
        assert_eq!(snap_to_grain(-14.0, 10), -10);
        assert_eq!(snap_to_grain(-15.0, 10), -20);
    }
}
