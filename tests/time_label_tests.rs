use axis_rs::TimeLabelPrecision;
use axis_rs::core::ticks::{time_axis_label, units};

/// 1970-01-07 13:45:30.250 UTC.
const SAMPLE: f64 =
    6.0 * units::DAY + 13.0 * units::HOUR + 45.0 * units::MINUTE + 30.25 * units::SECOND;

#[test]
fn precision_buckets_follow_tick_step_thresholds() {
    assert_eq!(
        TimeLabelPrecision::for_tick_step(units::DAY),
        TimeLabelPrecision::Date
    );
    assert_eq!(
        TimeLabelPrecision::for_tick_step(6.0 * units::HOUR),
        TimeLabelPrecision::DateHourMinute
    );
    assert_eq!(
        TimeLabelPrecision::for_tick_step(units::HOUR),
        TimeLabelPrecision::DateHourMinute
    );
    assert_eq!(
        TimeLabelPrecision::for_tick_step(5.0 * units::MINUTE),
        TimeLabelPrecision::HourMinute
    );
    assert_eq!(
        TimeLabelPrecision::for_tick_step(15.0 * units::SECOND),
        TimeLabelPrecision::HourMinuteSecond
    );
    assert_eq!(
        TimeLabelPrecision::for_tick_step(100.0 * units::MILLISECOND),
        TimeLabelPrecision::MinuteSecondMillis
    );
}

#[test]
fn labels_never_show_sub_tick_precision() {
    assert_eq!(time_axis_label(SAMPLE, units::DAY), "7 Jan");
    assert_eq!(time_axis_label(SAMPLE, units::HOUR), "7-13:45");
    assert_eq!(time_axis_label(SAMPLE, units::MINUTE), "13:45");
    assert_eq!(time_axis_label(SAMPLE, units::SECOND), "13:45:30");
    assert_eq!(
        time_axis_label(SAMPLE, 100.0 * units::MILLISECOND),
        "45:30.250"
    );
}

#[test]
fn epoch_formats_without_padding_surprises() {
    assert_eq!(time_axis_label(0.0, units::DAY), "1 Jan");
    assert_eq!(time_axis_label(0.0, units::MINUTE), "0:00");
    assert_eq!(time_axis_label(0.0, units::MILLISECOND), "0:00.000");
}

#[test]
fn unrepresentable_timestamps_degrade_to_numeric_output() {
    let overflow = 1e300;
    assert_eq!(
        TimeLabelPrecision::Date.format(overflow),
        overflow.to_string()
    );

    let nan = f64::NAN;
    assert_eq!(TimeLabelPrecision::Date.format(nan), nan.to_string());
}
