use serde::{Deserialize, Serialize};

/// Interpretation of an axis interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RangeKind {
    /// Plain numeric values.
    #[default]
    Linear,
    /// Unit [0, 1] range for percentage-style axes. Demoted to `Linear` on
    /// the first offset (pan).
    Logical,
    /// Seconds since the Unix epoch.
    Time,
}

/// Immutable data-space interval `[low, high]`.
///
/// Every operation returns a new value; a range held by an axis is replaced
/// wholesale, never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Range {
    low: f64,
    high: f64,
    kind: RangeKind,
}

impl Range {
    /// Creates a linear range.
    ///
    /// # Panics
    ///
    /// Panics if `low > high` or either bound is NaN. Callers constructing
    /// ranges from untrusted input must order the bounds first.
    #[must_use]
    pub fn new(low: f64, high: f64) -> Self {
        Self::with_kind(low, high, RangeKind::Linear)
    }

    /// Creates a range with an explicit kind.
    ///
    /// # Panics
    ///
    /// Panics if `low > high` or either bound is NaN.
    #[must_use]
    pub fn with_kind(low: f64, high: f64, kind: RangeKind) -> Self {
        assert!(
            low <= high,
            "range low must not exceed high: {low} > {high}"
        );
        Self { low, high, kind }
    }

    /// The unit logical range (0, 1).
    #[must_use]
    pub fn logical() -> Self {
        Self::with_kind(0.0, 1.0, RangeKind::Logical)
    }

    #[must_use]
    pub fn low(self) -> f64 {
        self.low
    }

    #[must_use]
    pub fn high(self) -> f64 {
        self.high
    }

    #[must_use]
    pub fn kind(self) -> RangeKind {
        self.kind
    }

    #[must_use]
    pub fn delta(self) -> f64 {
        self.high - self.low
    }

    /// A range is empty when its width is below machine epsilon.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.delta() < f64::EPSILON
    }

    /// Inclusive on both bounds.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    /// Shifts both bounds. Offsetting a logical range demotes it to linear:
    /// percentage axes exist only until interaction.
    #[must_use]
    pub fn offset(self, delta: f64) -> Self {
        let kind = match self.kind {
            RangeKind::Logical => RangeKind::Linear,
            kind => kind,
        };
        Self {
            low: self.low + delta,
            high: self.high + delta,
            kind,
        }
    }

    /// Bounding union of two ranges. An empty operand acts as identity.
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self {
            low: self.low.min(other.low),
            high: self.high.max(other.high),
            kind: self.kind,
        }
    }

    /// The `width`-sized sub-interval anchored at the high bound, used to pin
    /// a view to "now". An empty range is returned unchanged.
    #[must_use]
    pub fn high_subrange(self, width: f64) -> Self {
        if self.is_empty() {
            return self;
        }
        Self::with_kind(self.high - width, self.high, self.kind)
    }

    /// Re-tags the range as a time interval.
    #[must_use]
    pub fn to_time(self) -> Self {
        Self {
            kind: RangeKind::Time,
            ..self
        }
    }
}
