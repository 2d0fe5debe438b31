//! External point-source contract.
//!
//! Concrete sources (fixed arrays, procedural generators, live time series)
//! live with the host; the engine only depends on this capability trait.

use crate::core::range::Range;

/// One sample of a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphPoint {
    pub x: f64,
    pub y: f64,
    /// Samples flagged not-good are rendered with a degraded stroke by the
    /// painting layer; the engine passes the flag through untouched.
    pub good: bool,
}

impl GraphPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, good: true }
    }
}

/// Optional reference-line values a source may declare. Drawn by the
/// (excluded) rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SourceLimits {
    pub lo: Option<f64>,
    pub hi: Option<f64>,
    pub lolo: Option<f64>,
    pub hihi: Option<f64>,
}

/// Source mutation kinds the host relays into
/// [`Chart::handle_source_event`](crate::api::Chart::handle_source_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEvent {
    /// Points were appended or removed.
    HistoryChanged,
    /// The source-reported current value changed.
    CurrentValueChanged,
    /// An existing sample changed in place.
    ItemChanged,
}

/// Forward-only enumerator over one `enum_points` query.
pub trait PointEnumerator {
    /// Number of points this enumerator will yield. Consistent with
    /// subsequent enumeration.
    fn count(&self) -> usize;

    /// Next point, or `None` at the end of the sequence.
    fn next_point(&mut self) -> Option<GraphPoint>;
}

/// Ordered, non-decreasing-by-x point sequence with O(1) range queries.
pub trait DataSource {
    /// Enumerates points intersecting `[from, to]`, with each bound included
    /// or excluded per flag. Returns a fresh, finite enumerator per call, or
    /// `None` when nothing intersects. `from <= to` is a caller obligation.
    fn enum_points(
        &self,
        from: f64,
        to: f64,
        include_left: bool,
        include_right: bool,
    ) -> Option<Box<dyn PointEnumerator + '_>>;

    /// Total x extent of the source. Must be O(1).
    fn horizontal_range(&self) -> Range;

    /// Declared y range, used when a line's auto-range is disabled. Must be
    /// O(1).
    fn vertical_range(&self) -> Range {
        Range::default()
    }

    /// Latest value, if the source reports one.
    fn current_value(&self) -> Option<f64> {
        None
    }

    /// Formats a y-axis label for a value of this source.
    fn y_axis_label(&self, value: f64) -> String {
        value.to_string()
    }

    fn limits(&self) -> SourceLimits {
        SourceLimits::default()
    }

    /// Min/max y over `[x1, x2)`, or `None` when no point falls inside.
    fn calculate_auto_range(&self, x1: f64, x2: f64) -> Option<Range> {
        let mut points = self.enum_points(x1, x2, true, false)?;

        let first = points.next_point()?;
        let mut low = first.y;
        let mut high = first.y;

        while let Some(point) = points.next_point() {
            if point.y < low {
                low = point.y;
            } else if point.y > high {
                high = point.y;
            }
        }

        Some(Range::new(low, high))
    }
}
