use approx::assert_relative_eq;
use chrono::{TimeZone, Utc, Weekday};
use usage_chart::core::{
    AxisAdjust, ChartAxis, DAY_IN_MILLIS, InvertedAxis, MAX_TIME_TICKS, MB_IN_BYTES,
    MagnitudeAxis, MagnitudeScaleMode, TimeAxis, TimeAxisConfig,
};

fn utc_millis(year: i32, month: u32, day: u32, hour: u32) -> i64 {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid date")
        .timestamp_millis()
}

fn time_axis(first_day_of_week: Weekday) -> TimeAxis {
    TimeAxis::new(TimeAxisConfig {
        first_day_of_week,
        utc_offset_seconds: 0,
    })
    .expect("valid time axis")
}

#[test]
fn set_bounds_and_size_report_actual_changes() {
    let mut axis = time_axis(Weekday::Sun);

    assert!(axis.set_bounds(0, 1_000));
    assert!(!axis.set_bounds(0, 1_000));
    assert!(axis.set_bounds(0, 2_000));

    assert!(axis.set_size(640.0));
    assert!(!axis.set_size(640.0));
    assert!(!axis.set_size(-3.0));
    assert_eq!(axis.size(), 640.0);
}

#[test]
fn time_axis_maps_linearly_and_round_trips_entries() {
    let day0 = utc_millis(2024, 3, 1, 0);
    let start = day0 - DAY_IN_MILLIS / 2;
    let end = day0 + 29 * DAY_IN_MILLIS + DAY_IN_MILLIS;

    let mut axis = time_axis(Weekday::Sun);
    axis.set_bounds(start, end);
    axis.set_size(1080.5);

    assert_eq!(axis.convert_to_point(start), 0.0);
    assert_relative_eq!(axis.convert_to_point(end), 1080.5, epsilon = 1e-9);

    for day in 0..30 {
        let value = day0 + day * DAY_IN_MILLIS;
        let point = axis.convert_to_point(value);
        assert_eq!(axis.convert_to_value(point), value);
    }
}

#[test]
fn degenerate_axes_convert_to_defined_fallbacks() {
    let mut unsized_axis = MagnitudeAxis::new(MagnitudeScaleMode::Linear);
    unsized_axis.set_bounds(0, 100);
    assert_eq!(unsized_axis.convert_to_point(50), 0.0);
    assert_eq!(unsized_axis.convert_to_value(10.0), 0);

    let mut flat_axis = time_axis(Weekday::Sun);
    flat_axis.set_bounds(500, 500);
    flat_axis.set_size(100.0);
    assert_eq!(flat_axis.convert_to_point(700), 0.0);
    assert_eq!(flat_axis.convert_to_value(42.0), 500);
    assert!(flat_axis.convert_to_point(700).is_finite());
}

#[test]
fn time_ticks_fall_on_week_starts_inside_bounds() {
    let mut axis = time_axis(Weekday::Sun);
    axis.set_bounds(utc_millis(2024, 3, 1, 0), utc_millis(2024, 3, 31, 12));
    axis.set_size(1000.0);

    let expected: Vec<i64> = [31, 24, 17, 10, 3]
        .into_iter()
        .map(|day| utc_millis(2024, 3, day, 0))
        .collect();
    assert_eq!(axis.tick_values().to_vec(), expected);

    let points = axis.tick_points();
    assert_eq!(points.len(), expected.len());
    assert_eq!(points[0], axis.convert_to_point(expected[0]));
    assert!(points.iter().all(|p| (0.0..=1000.0).contains(p)));
}

#[test]
fn time_ticks_follow_configured_first_day_of_week() {
    let mut axis = time_axis(Weekday::Mon);
    axis.set_bounds(utc_millis(2024, 3, 1, 0), utc_millis(2024, 3, 31, 12));

    let expected: Vec<i64> = [25, 18, 11, 4]
        .into_iter()
        .map(|day| utc_millis(2024, 3, day, 0))
        .collect();
    assert_eq!(axis.tick_values().to_vec(), expected);
}

#[test]
fn time_ticks_include_boundary_equal_to_min() {
    let mut axis = time_axis(Weekday::Sun);
    let sunday = utc_millis(2024, 3, 3, 0);
    axis.set_bounds(sunday, sunday + 3 * DAY_IN_MILLIS);
    assert_eq!(axis.tick_values().to_vec(), vec![sunday]);
}

#[test]
fn time_ticks_respect_utc_offset() {
    let min = utc_millis(2024, 2, 26, 0);
    let max = utc_millis(2024, 3, 3, 2);

    let mut utc = time_axis(Weekday::Sun);
    utc.set_bounds(min, max);
    assert_eq!(utc.tick_values().to_vec(), vec![utc_millis(2024, 3, 3, 0)]);

    // At UTC-5 the maximum is still Saturday, so the week began before `min`.
    let mut shifted = TimeAxis::new(TimeAxisConfig {
        first_day_of_week: Weekday::Sun,
        utc_offset_seconds: -5 * 3600,
    })
    .expect("valid time axis");
    shifted.set_bounds(min, max);
    assert!(shifted.tick_values().is_empty());
}

#[test]
fn unbounded_history_emits_a_capped_run_of_recent_ticks() {
    let mut axis = time_axis(Weekday::Sun);
    let max = utc_millis(2024, 3, 31, 12);
    axis.set_bounds(i64::MIN, max);

    let ticks = axis.tick_values();
    assert_eq!(ticks.len(), MAX_TIME_TICKS);
    assert_eq!(ticks[0], utc_millis(2024, 3, 31, 0));
    assert!(ticks.windows(2).all(|pair| pair[0] - pair[1] == 7 * DAY_IN_MILLIS));
}

#[test]
fn time_axis_never_requests_adjustment_and_labels_dates() {
    let mut axis = time_axis(Weekday::Sun);
    axis.set_bounds(0, 10);
    axis.set_size(100.0);
    assert_eq!(axis.should_adjust_axis(10), AxisAdjust::Hold);
    assert_eq!(axis.should_adjust_axis(0), AxisAdjust::Hold);

    let value = utc_millis(2024, 3, 5, 12);
    let label = axis.build_label(value);
    assert_eq!(label.text, "Mar 05");
    assert_eq!(label.value, value);
}

#[test]
fn out_of_range_time_labels_are_empty() {
    let axis = time_axis(Weekday::Sun);
    let label = axis.build_label(i64::MAX);
    assert_eq!(label.text, "");
    assert_eq!(label.value, i64::MAX);
    assert_eq!(axis.build_label(i64::MIN).text, "");
}

#[test]
fn invalid_utc_offset_is_rejected() {
    let result = TimeAxis::new(TimeAxisConfig {
        first_day_of_week: Weekday::Sun,
        utc_offset_seconds: 90_000,
    });
    assert!(result.is_err());
}

#[test]
fn magnitude_ticks_use_power_of_two_step() {
    let mut axis = MagnitudeAxis::new(MagnitudeScaleMode::Linear);
    axis.set_bounds(0, 1_000);
    axis.set_size(100.0);

    assert_eq!(axis.tick_step(), 128);
    assert_eq!(
        axis.tick_values(),
        vec![0, 128, 256, 384, 512, 640, 768, 896]
    );
    let points = axis.tick_points();
    assert_relative_eq!(points[1], 12.8, epsilon = 1e-9);
}

#[test]
fn magnitude_ticks_are_empty_for_flat_or_inverted_bounds() {
    let mut axis = MagnitudeAxis::new(MagnitudeScaleMode::Linear);
    axis.set_bounds(10, 10);
    assert!(axis.tick_values().is_empty());
    axis.set_bounds(10, 5);
    assert!(axis.tick_values().is_empty());
}

#[test]
fn magnitude_adjust_hint_tracks_edges() {
    let mut axis = MagnitudeAxis::new(MagnitudeScaleMode::Linear);
    axis.set_bounds(0, 1_000);
    axis.set_size(100.0);

    assert_eq!(axis.should_adjust_axis(50), AxisAdjust::Shrink);
    assert_eq!(axis.should_adjust_axis(500), AxisAdjust::Hold);
    assert_eq!(axis.should_adjust_axis(900), AxisAdjust::Grow);
    assert_eq!(axis.should_adjust_axis(900).signum(), 1);
    assert_eq!(axis.should_adjust_axis(50).signum(), -1);
}

#[test]
fn magnitude_labels_switch_units_at_thousand_megabytes() {
    let axis = MagnitudeAxis::new(MagnitudeScaleMode::Linear);

    let small = axis.build_label(15 * MB_IN_BYTES / 2);
    assert_eq!(small.text, "7.5 MB");
    assert_eq!(small.value, MB_IN_BYTES * 75 / 10);

    let large = axis.build_label(1_500 * MB_IN_BYTES);
    assert_eq!(large.text, "1.5 GB");

    let round = axis.build_label(250 * MB_IN_BYTES);
    assert_eq!(round.text, "250 MB");
    assert_eq!(round.value, 250 * MB_IN_BYTES);
}

#[test]
fn log_weighted_mode_stays_finite_and_monotonic() {
    let mut axis = MagnitudeAxis::new(MagnitudeScaleMode::LogWeighted);
    axis.set_bounds(0, 1_000_000);
    axis.set_size(400.0);

    assert_eq!(axis.convert_to_point(0), 0.0);
    let mut previous = 0.0;
    for value in [1_000, 10_000, 100_000, 500_000, 1_000_000] {
        let point = axis.convert_to_point(value);
        assert!(point.is_finite());
        assert!(point > previous);
        assert!(point <= 400.0);
        previous = point;
    }

    assert_eq!(axis.convert_to_value(0.0), 0);
    assert!(axis.convert_to_value(200.0) < axis.convert_to_value(300.0));
}

#[test]
fn inverted_axis_flips_points_and_delegates_domain_logic() {
    let mut inner = MagnitudeAxis::new(MagnitudeScaleMode::Linear);
    inner.set_bounds(0, 1_000);
    inner.set_size(200.0);
    let axis = InvertedAxis::new(inner);

    assert_eq!(axis.convert_to_point(0), 200.0);
    assert_eq!(axis.convert_to_point(250), 150.0);
    assert_eq!(axis.convert_to_value(150.0), 250);
    assert_eq!(axis.convert_to_value(200.0), 0);

    assert_eq!(axis.bounds(), (0, 1_000));
    assert_eq!(axis.build_label(MB_IN_BYTES), inner.build_label(MB_IN_BYTES));
    assert_eq!(axis.should_adjust_axis(900), AxisAdjust::Grow);

    let ticks = axis.tick_points();
    assert_eq!(ticks[0], 200.0);
    assert_eq!(ticks.len(), inner.tick_points().len());
}

#[test]
fn inverted_axis_wraps_boxed_axes() {
    let mut boxed: Box<dyn ChartAxis> = Box::new(time_axis(Weekday::Sun));
    boxed.set_bounds(0, 100);
    boxed.set_size(10.0);

    let axis = InvertedAxis::new(boxed);
    assert_eq!(axis.convert_to_point(20), 8.0);
    assert_eq!(axis.convert_to_value(8.0), 20);
}
