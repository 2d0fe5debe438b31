use axis_rs::{Range, RangeKind};

#[test]
fn default_construction_is_empty_linear() {
    let range = Range::default();
    assert_eq!(range.kind(), RangeKind::Linear);
    assert!(range.is_empty());
}

#[test]
fn construction_exposes_bounds_and_delta() {
    let range = Range::new(10.0, 20.0);

    assert_eq!(range.low(), 10.0);
    assert_eq!(range.high(), 20.0);
    assert_eq!(range.delta(), 10.0);
    assert_eq!(range.kind(), RangeKind::Linear);
}

#[test]
fn construction_with_kind() {
    let range = Range::with_kind(0.0, 100.0, RangeKind::Time);
    assert_eq!(range.kind(), RangeKind::Time);
}

#[test]
#[should_panic(expected = "range low must not exceed high")]
fn inverted_bounds_are_a_contract_violation() {
    let _ = Range::new(20.0, 10.0);
}

#[test]
fn empty_detection() {
    assert!(Range::new(5.0, 5.0).is_empty());
    assert!(!Range::new(5.0, 10.0).is_empty());
}

#[test]
fn contains_is_inclusive_on_both_bounds() {
    let range = Range::new(10.0, 20.0);

    assert!(range.contains(10.0));
    assert!(range.contains(15.0));
    assert!(range.contains(20.0));
    assert!(!range.contains(9.9));
    assert!(!range.contains(20.1));
}

#[test]
fn contains_rejects_just_outside_bounds() {
    let range = Range::new(10.0, 20.0);
    let epsilon = 1e-9;

    assert!(!range.contains(10.0 - epsilon));
    assert!(!range.contains(20.0 + epsilon));
}

#[test]
fn offset_shifts_both_bounds() {
    let range = Range::new(10.0, 20.0).offset(5.0);
    assert_eq!(range, Range::new(15.0, 25.0));
}

#[test]
fn offset_demotes_logical_to_linear() {
    let range = Range::logical();
    assert_eq!(range.kind(), RangeKind::Logical);

    let panned = range.offset(1.0);
    assert_eq!(panned.kind(), RangeKind::Linear);
}

#[test]
fn high_subrange_anchors_at_the_high_bound() {
    let sub = Range::new(0.0, 100.0).high_subrange(30.0);

    assert_eq!(sub.low(), 70.0);
    assert_eq!(sub.high(), 100.0);
}

#[test]
fn high_subrange_preserves_kind() {
    let sub = Range::with_kind(0.0, 100.0, RangeKind::Time).high_subrange(30.0);
    assert_eq!(sub, Range::with_kind(70.0, 100.0, RangeKind::Time));
}

#[test]
fn high_subrange_of_empty_returns_original() {
    let empty = Range::new(50.0, 50.0);
    assert_eq!(empty.high_subrange(10.0), empty);
}

#[test]
fn combine_takes_the_bounding_union() {
    let combined = Range::new(10.0, 30.0).combine(Range::new(20.0, 50.0));
    assert_eq!(combined, Range::new(10.0, 50.0));
}

#[test]
fn combine_with_empty_is_identity() {
    let range = Range::new(10.0, 30.0);
    let empty = Range::new(20.0, 20.0);

    assert_eq!(range.combine(empty), range);
    assert_eq!(empty.combine(range), range);
}

#[test]
fn logical_is_the_unit_range() {
    let range = Range::logical();

    assert_eq!(range.low(), 0.0);
    assert_eq!(range.high(), 1.0);
    assert_eq!(range.kind(), RangeKind::Logical);
}

#[test]
fn to_time_retags_the_kind() {
    let range = Range::new(0.0, 100.0);
    assert_eq!(range.kind(), RangeKind::Linear);
    assert_eq!(range.to_time().kind(), RangeKind::Time);
}

#[test]
fn equality_is_structural_over_bounds_and_kind() {
    let a = Range::new(10.0, 20.0);
    let b = Range::new(10.0, 20.0);
    let c = Range::new(10.0, 30.0);
    let d = Range::with_kind(10.0, 20.0, RangeKind::Time);

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, d);
}
