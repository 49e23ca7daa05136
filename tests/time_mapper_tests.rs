use clinic_hours::ScheduleError;
use clinic_hours::core::{BarGeometry, MAX_MINUTE, TimeCoordinateMapper, minutes_to_percent};

fn mapper(left: f64, width: f64) -> TimeCoordinateMapper {
    TimeCoordinateMapper::new(BarGeometry::new(left, width), 10).expect("valid mapper")
}

#[test]
fn click_at_417_of_1000_px_snaps_to_ten_o_clock() {
    let mapper = mapper(0.0, 1000.0);
    assert_eq!(mapper.pixel_to_minutes(417.0), 600);
}

#[test]
fn pixel_to_minutes_accounts_for_bar_left_offset() {
    let mapper = mapper(200.0, 1000.0);
    assert_eq!(mapper.pixel_to_minutes(617.0), 600);
    assert_eq!(mapper.pixel_to_minutes(200.0), 0);
}

#[test]
fn pixel_to_minutes_clamps_to_day_bounds() {
    let mapper = mapper(0.0, 1000.0);
    assert_eq!(mapper.pixel_to_minutes(-40.0), 0);
    assert_eq!(mapper.pixel_to_minutes(1000.0), MAX_MINUTE);
    assert_eq!(mapper.pixel_to_minutes(5_000.0), MAX_MINUTE);
    assert_eq!(mapper.pixel_to_minutes(990.0), 1430);
}

#[test]
fn on_grain_minutes_survive_a_pixel_round_trip() {
    let mapper = mapper(37.5, 913.0);
    for minute in (0..=1430u16).step_by(10) {
        let x = mapper.minutes_to_pixel(minute);
        assert_eq!(mapper.pixel_to_minutes(x), minute, "minute {minute}");
    }
}

#[test]
fn pixel_delta_is_signed_and_snapped() {
    let mapper = mapper(0.0, 1440.0);
    assert_eq!(mapper.pixel_delta_to_minutes(63.0), 60);
    assert_eq!(mapper.pixel_delta_to_minutes(-63.0), -60);
    assert_eq!(mapper.pixel_delta_to_minutes(4.0), 0);
    assert_eq!(mapper.pixel_delta_to_minutes(2_000.0), 2_000);
}

#[test]
fn mapper_rejects_degenerate_bar() {
    let err = TimeCoordinateMapper::new(BarGeometry::new(0.0, 0.0), 10)
        .expect_err("zero width must fail");
    assert!(matches!(err, ScheduleError::InvalidBarGeometry { .. }));

    let err = TimeCoordinateMapper::new(BarGeometry::new(f64::NAN, 100.0), 10)
        .expect_err("nan left must fail");
    assert!(matches!(err, ScheduleError::InvalidBarGeometry { .. }));

    let err = TimeCoordinateMapper::new(BarGeometry::default(), 0).expect_err("zero grain");
    assert!(matches!(err, ScheduleError::InvalidConfig(_)));
}

#[test]
fn set_bar_keeps_previous_geometry_on_error() {
    let mut mapper = mapper(0.0, 1000.0);
    assert!(mapper.set_bar(BarGeometry::new(0.0, -5.0)).is_err());
    assert_eq!(mapper.bar(), BarGeometry::new(0.0, 1000.0));
}

#[test]
fn minutes_to_percent_uses_last_minute_as_full_width() {
    assert_eq!(minutes_to_percent(0), 0.0);
    assert_eq!(minutes_to_percent(MAX_MINUTE), 100.0);
    assert_eq!(minutes_to_percent(u16::MAX), 100.0);
    approx::assert_relative_eq!(minutes_to_percent(720), 720.0 / 1439.0 * 100.0);
}
