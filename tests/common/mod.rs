//! Shared fixture sources for the integration suites.

#![allow(dead_code)]

use std::cell::RefCell;

use axis_rs::{DataSource, GraphPoint, PointEnumerator, Range};

/// Enumerator over an owned point snapshot.
pub struct VecEnumerator {
    points: Vec<GraphPoint>,
    index: usize,
}

impl VecEnumerator {
    pub fn new(points: Vec<GraphPoint>) -> Self {
        Self { points, index: 0 }
    }
}

impl PointEnumerator for VecEnumerator {
    fn count(&self) -> usize {
        self.points.len() - self.index
    }

    fn next_point(&mut self) -> Option<GraphPoint> {
        let point = self.points.get(self.index).copied()?;
        self.index += 1;
        Some(point)
    }
}

pub const INITIAL_COUNT: usize = 100;
pub const X_OFFSET: f64 = 1000.0;

/// Appendable source with points at `x = X_OFFSET + i`, `y = i`. Enumeration
/// ignores the query bounds, like the original fixture: pipeline tests only
/// care about the full series.
pub struct TestDataSource {
    points: RefCell<Vec<GraphPoint>>,
}

impl TestDataSource {
    pub fn new() -> Self {
        let points = (0..INITIAL_COUNT)
            .map(|i| GraphPoint::new(X_OFFSET + i as f64, i as f64))
            .collect();
        Self {
            points: RefCell::new(points),
        }
    }

    /// Appends the next sample; the host then relays the matching
    /// `SourceEvent`s into the chart.
    pub fn add_point(&self) {
        let mut points = self.points.borrow_mut();
        let index = points.len() as f64;
        points.push(GraphPoint::new(X_OFFSET + index, index));
    }
}

impl DataSource for TestDataSource {
    fn enum_points(
        &self,
        _from: f64,
        _to: f64,
        _include_left: bool,
        _include_right: bool,
    ) -> Option<Box<dyn PointEnumerator + '_>> {
        Some(Box::new(VecEnumerator::new(self.points.borrow().clone())))
    }

    fn horizontal_range(&self) -> Range {
        let points = self.points.borrow();
        match (points.first(), points.last()) {
            (Some(first), Some(last)) => Range::new(first.x, last.x),
            _ => Range::default(),
        }
    }

    fn current_value(&self) -> Option<f64> {
        self.points.borrow().last().map(|point| point.y)
    }
}

/// Evenly spaced grid source honoring the enumeration bound flags, for
/// auto-range and thinning precision tests. Points at `x = i`, `y = i`.
pub struct EvenGridSource {
    points: Vec<GraphPoint>,
}

impl EvenGridSource {
    pub fn with_count(count: usize) -> Self {
        let points = (0..count)
            .map(|i| GraphPoint::new(i as f64, i as f64))
            .collect();
        Self { points }
    }
}

impl DataSource for EvenGridSource {
    fn enum_points(
        &self,
        from: f64,
        to: f64,
        include_left: bool,
        include_right: bool,
    ) -> Option<Box<dyn PointEnumerator + '_>> {
        let lower = self
            .points
            .partition_point(|p| p.x < from || (!include_left && p.x == from));
        let upper = self
            .points
            .partition_point(|p| p.x < to || (include_right && p.x == to));
        if lower >= upper {
            return None;
        }
        Some(Box::new(SliceEnumerator {
            points: &self.points[lower..upper],
        }))
    }

    fn horizontal_range(&self) -> Range {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Range::new(first.x, last.x),
            _ => Range::default(),
        }
    }
}

/// Enumerator borrowing the source's storage.
pub struct SliceEnumerator<'a> {
    points: &'a [GraphPoint],
}

impl PointEnumerator for SliceEnumerator<'_> {
    fn count(&self) -> usize {
        self.points.len()
    }

    fn next_point(&mut self) -> Option<GraphPoint> {
        let (first, rest) = self.points.split_first()?;
        self.points = rest;
        Some(*first)
    }
}
