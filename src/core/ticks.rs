//! Tick-step estimation and time-axis label formatting.

use chrono::{DateTime, Utc};

/// Time spans in axis units (seconds).
pub mod units {
    pub const MILLISECOND: f64 = 0.001;
    pub const SECOND: f64 = 1.0;
    pub const MINUTE: f64 = 60.0 * SECOND;
    pub const HOUR: f64 = 60.0 * MINUTE;
    pub const DAY: f64 = 24.0 * HOUR;
}

/// Candidate steps for the time axis, ascending. The estimator picks the
/// first entry wide enough on screen.
static TIME_TICK_STEPS: [f64; 21] = [
    units::MILLISECOND,
    5.0 * units::MILLISECOND,
    10.0 * units::MILLISECOND,
    50.0 * units::MILLISECOND,
    100.0 * units::MILLISECOND,
    500.0 * units::MILLISECOND,
    units::SECOND,
    5.0 * units::SECOND,
    15.0 * units::SECOND,
    30.0 * units::SECOND,
    units::MINUTE,
    5.0 * units::MINUTE,
    15.0 * units::MINUTE,
    30.0 * units::MINUTE,
    units::HOUR,
    2.0 * units::HOUR,
    3.0 * units::HOUR,
    4.0 * units::HOUR,
    6.0 * units::HOUR,
    12.0 * units::HOUR,
    units::DAY,
];

/// Estimates a "nice" 1/2/5×10ⁿ tick step for a value axis.
///
/// Starts from a tenth of the data delta rounded to a power-of-ten multiple,
/// then doubles/halves until adjacent ticks are about `min_spacing_px` apart.
#[must_use]
pub fn estimate_value_tick_step(area_px: i32, delta: f64, min_spacing_px: i32) -> f64 {
    if area_px <= 0 || !delta.is_finite() || delta < f64::EPSILON {
        return 1.0;
    }

    let min = f64::from(min_spacing_px);
    let area = f64::from(area_px);

    let mut step = delta / 10.0;
    let factor = 10.0_f64.powf(step.log10().floor());
    step = (step / factor).floor() * factor;

    while step * 2.0 * area / delta < min {
        step *= 2.0;
    }
    while step / 2.0 * area / delta > min {
        step /= 2.0;
    }
    step
}

/// Estimates a tick step for the time axis.
///
/// `pixels_per_second` is the current horizontal scale. Returns the first
/// table entry at least `min_spacing_px` wide, or the largest entry when the
/// scale is degenerate or every entry is too narrow.
#[must_use]
pub fn estimate_time_tick_step(pixels_per_second: f64, min_spacing_px: i32) -> f64 {
    let largest = TIME_TICK_STEPS[TIME_TICK_STEPS.len() - 1];
    if !pixels_per_second.is_finite() || pixels_per_second <= 0.0 {
        return largest;
    }

    for step in TIME_TICK_STEPS {
        let width_px = (step * pixels_per_second) as i32;
        if width_px >= min_spacing_px {
            return step;
        }
    }
    largest
}

/// Iterator over tick values of one axis.
///
/// The first value is the axis-start value snapped down to a multiple of the
/// step; iteration stops past `last` or as soon as the step no longer
/// advances the cursor.
#[derive(Debug, Clone)]
pub struct Ticks {
    next: f64,
    last: f64,
    step: f64,
    done: bool,
}

impl Ticks {
    /// Builds the tick sequence for `[first, last]` with the given step.
    /// `first` is snapped down via fmod, matching label alignment of the
    /// paint layer exactly.
    #[must_use]
    pub fn new(first: f64, last: f64, step: f64) -> Self {
        let degenerate = !step.is_finite() || step <= 0.0 || !first.is_finite();
        Self {
            next: first - first % step,
            last,
            step,
            done: degenerate,
        }
    }
}

impl Iterator for Ticks {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.done || self.next > self.last {
            return None;
        }
        let value = self.next;
        self.next += self.step;
        if self.next == value {
            // Step lost to float saturation; stop instead of spinning.
            self.done = true;
        }
        Some(value)
    }
}

/// Display precision bucket for time-axis labels, chosen from the tick step
/// so labels never show sub-tick precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLabelPrecision {
    /// Day and month, e.g. `7 Aug`.
    Date,
    /// Day plus hour:minute, e.g. `7-14:30`.
    DateHourMinute,
    /// Hour and minute, e.g. `14:30`.
    HourMinute,
    /// Hour, minute and second, e.g. `14:30:05`.
    HourMinuteSecond,
    /// Minute, second and millisecond, e.g. `30:05.250`.
    MinuteSecondMillis,
}

impl TimeLabelPrecision {
    #[must_use]
    pub fn for_tick_step(tick_step: f64) -> Self {
        if tick_step >= units::DAY {
            Self::Date
        } else if tick_step >= units::HOUR {
            Self::DateHourMinute
        } else if tick_step >= units::MINUTE {
            Self::HourMinute
        } else if tick_step >= units::SECOND {
            Self::HourMinuteSecond
        } else {
            Self::MinuteSecondMillis
        }
    }

    fn strftime(self) -> &'static str {
        match self {
            Self::Date => "%-d %b",
            Self::DateHourMinute => "%-d-%H:%M",
            Self::HourMinute => "%-H:%M",
            Self::HourMinuteSecond => "%-H:%M:%S",
            Self::MinuteSecondMillis => "%-M:%S%.3f",
        }
    }

    /// Formats a value (seconds since the Unix epoch) in UTC.
    ///
    /// A timestamp outside the representable span degrades to plain numeric
    /// output rather than failing.
    #[must_use]
    pub fn format(self, value: f64) -> String {
        let millis = (value * 1000.0).round();
        if millis.is_finite() {
            if let Some(instant) = DateTime::<Utc>::from_timestamp_millis(millis as i64) {
                return instant.format(self.strftime()).to_string();
            }
        }
        value.to_string()
    }
}

/// Formats one time-axis label for `value` at the given tick step.
#[must_use]
pub fn time_axis_label(value: f64, tick_step: f64) -> String {
    TimeLabelPrecision::for_tick_step(tick_step).format(value)
}
