use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::range::{Range, RangeKind};
use crate::core::source::{DataSource, SourceLimits};

/// Hard cap on the number of points a line puts on screen. Correlates to the
/// screen resolution.
pub(crate) const MAX_VISIBLE_POINTS: usize = 10_000;

/// Bisection bound for the thinning search. A misbehaving source with a
/// non-monotonic count function must not be able to spin the search forever.
const THINNING_MAX_ITERATIONS: usize = 64;

/// Display policy of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePolicy {
    pub stepped: bool,
    pub auto_range: bool,
    pub dots: bool,
    pub smooth: bool,
}

impl Default for LinePolicy {
    fn default() -> Self {
        Self {
            stepped: true,
            auto_range: true,
            dots: true,
            smooth: false,
        }
    }
}

/// RGB line color, consumed by the painting layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Binds an external data source to display policy. Owns no points; the
/// source is shared with the host.
pub struct Line {
    source: Rc<dyn DataSource>,
    policy: LinePolicy,
    color: Color,

    vertical_range: Option<Range>,
    current_value: Option<f64>,
}

impl Line {
    pub(crate) fn new(source: Rc<dyn DataSource>) -> Self {
        let current_value = source.current_value();
        Self {
            source,
            policy: LinePolicy::default(),
            color: Color::BLACK,
            vertical_range: None,
            current_value,
        }
    }

    #[must_use]
    pub fn source(&self) -> &Rc<dyn DataSource> {
        &self.source
    }

    #[must_use]
    pub fn policy(&self) -> LinePolicy {
        self.policy
    }

    pub(crate) fn set_policy(&mut self, policy: LinePolicy) {
        self.policy = policy;
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Cached source-reported current value, shown as axis decoration.
    #[must_use]
    pub fn current_value(&self) -> Option<f64> {
        self.current_value
    }

    /// Reference-line values declared by the source.
    #[must_use]
    pub fn limits(&self) -> SourceLimits {
        self.source.limits()
    }

    /// The y range this line currently contributes to its pane's axis.
    #[must_use]
    pub fn vertical_range(&self) -> Option<Range> {
        self.vertical_range
    }

    /// Re-reads the current value; plain equality gates the update,
    /// mirroring the source's own change detection. Returns whether it
    /// changed.
    pub(crate) fn sync_current_value(&mut self) -> bool {
        let value = self.source.current_value();
        if self.current_value == value {
            return false;
        }
        self.current_value = value;
        true
    }

    /// Recomputes the contributed y range over the visible x interval
    /// `[x1, x2)` (auto-range), or from the source's declared range.
    /// An empty declared range counts as no contribution.
    pub(crate) fn update_vertical_range(&mut self, x1: f64, x2: f64) {
        self.vertical_range = if self.policy.auto_range {
            self.source.calculate_auto_range(x1, x2)
        } else {
            let declared = self.source.vertical_range();
            (!declared.is_empty()).then_some(declared)
        };
    }

    /// Whether the contributed range is a logical (percentage) range.
    pub(crate) fn is_logical(&self) -> bool {
        self.vertical_range
            .is_some_and(|range| range.kind() == RangeKind::Logical)
    }

    /// Shrinks the horizontal range by advancing the low bound so at most
    /// [`MAX_VISIBLE_POINTS`] points remain displayed.
    ///
    /// Binary-searches the low bound for a count within 5% under the cap,
    /// preserving the high bound. The search is bounded; on exhaustion the
    /// requested range is returned unchanged (thinning skipped).
    #[must_use]
    pub(crate) fn adjust_horizontal_range(&self, range: Range) -> Range {
        let count = self
            .source
            .enum_points(range.low(), range.high(), false, false)
            .map_or(0, |points| points.count());
        if count <= MAX_VISIBLE_POINTS {
            return range;
        }

        let mut min = range.low();
        let mut max = range.high();

        for _ in 0..THINNING_MAX_ITERATIONS {
            let value = (min + max) / 2.0;
            let count = self
                .source
                .enum_points(value, range.high(), false, false)
                .map_or(0, |points| points.count());

            // Allow 5% error.
            if count <= MAX_VISIBLE_POINTS && MAX_VISIBLE_POINTS - count <= MAX_VISIBLE_POINTS / 20
            {
                debug!(low = value, count, "thinned horizontal range");
                return Range::with_kind(value, range.high(), range.kind());
            }

            if count < MAX_VISIBLE_POINTS {
                max = value;
            } else {
                min = value;
            }
        }

        warn!(
            low = range.low(),
            high = range.high(),
            "point thinning did not converge; keeping requested range"
        );
        range
    }
}

impl std::fmt::Debug for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Line")
            .field("policy", &self.policy)
            .field("color", &self.color)
            .field("vertical_range", &self.vertical_range)
            .field("current_value", &self.current_value)
            .finish_non_exhaustive()
    }
}
