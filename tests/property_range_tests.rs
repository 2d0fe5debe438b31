use axis_rs::{Axis, AxisHandle, Orientation, Range, RangeKind};
use proptest::prelude::*;

proptest! {
    #[test]
    fn contains_holds_on_bounds_property(
        low in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0
    ) {
        let range = Range::new(low, low + span);

        prop_assert!(range.contains(range.low()));
        prop_assert!(range.contains(range.high()));
        prop_assert!(!range.contains(range.low() - span * 0.5));
        prop_assert!(!range.contains(range.high() + span * 0.5));
    }

    #[test]
    fn combine_bounds_are_the_union_property(
        low_a in -1_000.0f64..1_000.0,
        span_a in 0.001f64..1_000.0,
        low_b in -1_000.0f64..1_000.0,
        span_b in 0.001f64..1_000.0
    ) {
        let a = Range::new(low_a, low_a + span_a);
        let b = Range::new(low_b, low_b + span_b);
        let combined = a.combine(b);

        prop_assert_eq!(combined.low(), a.low().min(b.low()));
        prop_assert_eq!(combined.high(), a.high().max(b.high()));
        prop_assert!(combined.contains(a.low()) && combined.contains(b.high()));
    }

    #[test]
    fn high_subrange_keeps_the_high_bound_property(
        low in -1_000.0f64..1_000.0,
        span in 0.001f64..1_000.0,
        width_factor in 0.01f64..1.0
    ) {
        let range = Range::with_kind(low, low + span, RangeKind::Time);
        let width = span * width_factor;
        let sub = range.high_subrange(width);

        prop_assert_eq!(sub.high(), range.high());
        prop_assert_eq!(sub.kind(), range.kind());
        prop_assert!((sub.delta() - width).abs() <= 1e-9 * span.max(1.0));
    }

    #[test]
    fn offset_round_trip_property(
        low in -1_000.0f64..1_000.0,
        span in 0.001f64..1_000.0,
        delta in -1_000.0f64..1_000.0
    ) {
        let range = Range::new(low, low + span);
        let round_tripped = range.offset(delta).offset(-delta);

        prop_assert!((round_tripped.low() - range.low()).abs() <= 1e-9);
        prop_assert!((round_tripped.high() - range.high()).abs() <= 1e-9);
    }

    #[test]
    fn transform_round_trip_stays_within_one_pixel(
        low in -1_000_000.0f64..1_000_000.0,
        span in 0.1f64..1_000_000.0,
        value_factor in 0.0f64..1.0
    ) {
        let mut axis = Axis::new(Orientation::Horizontal, AxisHandle::Horizontal);
        axis.resize(1022, 20);
        axis.set_range(Range::new(low, low + span));

        let value = low + value_factor * span;
        let pixel = axis.value_to_screen(value);
        let recovered = axis.screen_to_value(pixel);

        // value_to_screen floors to whole pixels; the recovered value is off
        // by at most one pixel's worth of data space, plus float noise
        // proportional to the domain magnitude.
        let pixel_worth = span / 1000.0;
        let noise = 1e-9 * low.abs().max(span).max(1.0);
        prop_assert!((recovered - value).abs() <= pixel_worth + noise);
    }

    #[test]
    fn vertical_transform_round_trip_property(
        low in -1_000.0f64..1_000.0,
        span in 0.1f64..1_000.0,
        value_factor in 0.0f64..1.0
    ) {
        let mut chart = axis_rs::Chart::new();
        let pane = chart.add_pane();
        let mut axis = Axis::new(Orientation::Vertical, AxisHandle::Vertical(pane));
        axis.resize(50, 514);
        axis.set_range(Range::new(low, low + span));

        let value = low + value_factor * span;
        let pixel = axis.value_to_screen(value);
        let recovered = axis.screen_to_value(pixel);

        let pixel_worth = span / 500.0;
        let noise = 1e-9 * low.abs().max(span).max(1.0);
        prop_assert!((recovered - value).abs() <= pixel_worth + noise);
    }
}
