//! Per-axis pixel↔value transform, tick state, and the time-fit controller.

use smallvec::SmallVec;

use crate::core::geometry::PixelRect;
use crate::core::handles::{AxisHandle, CursorId};
use crate::core::range::{Range, RangeKind};
use crate::core::ticks::{Ticks, estimate_time_tick_step, estimate_value_tick_step};

/// Offsets between the axis widget area and its drawing area.
pub(crate) const DRAWING_RECT_OFFSET_X: i32 = 10;
pub(crate) const DRAWING_RECT_OFFSET_Y: i32 = 7;

const VALUE_TICK_MIN_SPACING_PX: i32 = 30;
const TIME_TICK_MIN_SPACING_PX: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Marker bound to one axis at a data-space position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    id: CursorId,
    position: f64,
    axis: AxisHandle,
}

impl Cursor {
    #[must_use]
    pub fn id(&self) -> CursorId {
        self.id
    }

    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Non-owning back-reference to the axis holding this cursor.
    #[must_use]
    pub fn axis(&self) -> AxisHandle {
        self.axis
    }
}

/// One chart axis: view range, data-extent (scroll) range, tick step, pixel
/// geometry, time-fit state, and cursors.
///
/// Vertical axes map larger values nearer the top of the draw area.
#[derive(Debug, Clone)]
pub struct Axis {
    orientation: Orientation,
    handle: AxisHandle,

    range: Range,
    scroll_range: Range,

    tick_step: f64,

    width: i32,
    height: i32,
    draw_rect: PixelRect,

    cursors: SmallVec<[Cursor; 2]>,
    next_cursor: u64,

    time_fit: bool,
    // Suppresses the time-fit-disable side effect of `set_range` while an
    // internal fit is applying its result.
    fit_in_progress: bool,
}

impl Axis {
    #[must_use]
    pub fn new(orientation: Orientation, handle: AxisHandle) -> Self {
        let mut axis = Self {
            orientation,
            handle,
            range: Range::default(),
            scroll_range: Range::default(),
            tick_step: 0.0,
            width: 0,
            height: 0,
            draw_rect: PixelRect::default(),
            cursors: SmallVec::new(),
            next_cursor: 0,
            time_fit: true,
            fit_in_progress: false,
        };
        axis.update_layout();
        axis
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn handle(&self) -> AxisHandle {
        self.handle
    }

    #[must_use]
    pub fn range(&self) -> Range {
        self.range
    }

    #[must_use]
    pub fn scroll_range(&self) -> Range {
        self.scroll_range
    }

    #[must_use]
    pub fn tick_step(&self) -> f64 {
        self.tick_step
    }

    #[must_use]
    pub fn time_fit(&self) -> bool {
        self.time_fit
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub fn draw_rect(&self) -> PixelRect {
        self.draw_rect
    }

    /// Updates the widget area and recomputes draw rect and tick step.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width.max(0);
        self.height = height.max(0);
        self.update_layout();
    }

    /// Maps a pixel position to a data-space value.
    ///
    /// With a zero draw extent this returns the range's low bound instead of
    /// dividing by zero.
    #[must_use]
    pub fn screen_to_value(&self, pos: i32) -> f64 {
        let range = self.range;
        match self.orientation {
            Orientation::Vertical => {
                if self.draw_rect.height == 0 {
                    return range.low();
                }
                range.low()
                    + f64::from(self.draw_rect.bottom() - pos) * range.delta()
                        / f64::from(self.draw_rect.height)
            }
            Orientation::Horizontal => {
                if self.draw_rect.width == 0 {
                    return range.low();
                }
                range.low()
                    + f64::from(pos - self.draw_rect.x) * range.delta()
                        / f64::from(self.draw_rect.width)
            }
        }
    }

    /// Maps a data-space value to a pixel position, floored.
    ///
    /// An empty range anchors to the draw-rect bottom (vertical) or left
    /// (horizontal) edge.
    #[must_use]
    pub fn value_to_screen(&self, value: f64) -> i32 {
        let range = self.range;
        match self.orientation {
            Orientation::Vertical => {
                if range.is_empty() {
                    return self.draw_rect.bottom();
                }
                let offset = (value - range.low()) * f64::from(self.draw_rect.height)
                    / range.delta();
                self.draw_rect.bottom() - offset.floor() as i32
            }
            Orientation::Horizontal => {
                if range.is_empty() {
                    return self.draw_rect.x;
                }
                let offset =
                    (value - range.low()) * f64::from(self.draw_rect.width) / range.delta();
                self.draw_rect.x + offset.floor() as i32
            }
        }
    }

    /// First and last tick values for the current view, the first snapped
    /// down to a multiple of the tick step.
    #[must_use]
    pub fn tick_values(&self) -> (f64, f64) {
        let (first_pos, last_pos) = match self.orientation {
            Orientation::Vertical => (self.height, 0),
            Orientation::Horizontal => (0, self.width),
        };

        let first = self.screen_to_value(first_pos);
        let last = self.screen_to_value(last_pos);
        (first - first % self.tick_step, last)
    }

    /// Iterates tick values across the current view.
    #[must_use]
    pub fn ticks(&self) -> Ticks {
        let (first_pos, last_pos) = match self.orientation {
            Orientation::Vertical => (self.height, 0),
            Orientation::Horizontal => (0, self.width),
        };
        Ticks::new(
            self.screen_to_value(first_pos),
            self.screen_to_value(last_pos),
            self.tick_step,
        )
    }

    /// Replaces the view range.
    ///
    /// Recomputes the draw rect and tick step, and detaches live-follow:
    /// any range change that does not come through [`Axis::fit`] disables
    /// `time_fit`. Returns whether the range actually changed.
    pub fn set_range(&mut self, range: Range) -> bool {
        if self.range == range {
            return false;
        }

        self.range = range;
        self.update_layout();

        if !self.fit_in_progress {
            self.time_fit = false;
        }
        true
    }

    /// Applies an internally computed fit result without detaching
    /// live-follow.
    pub(crate) fn set_range_for_fit(&mut self, range: Range) -> bool {
        self.fit_in_progress = true;
        let changed = self.set_range(range);
        self.fit_in_progress = false;
        changed
    }

    /// The range a fit would apply right now: the trailing window of the
    /// scroll range when live-follow is active, otherwise the current view.
    /// `None` when the view range is empty.
    #[must_use]
    pub fn fit_target(&self) -> Option<Range> {
        if self.range.is_empty() {
            return None;
        }
        if self.time_fit && !self.scroll_range.is_empty() {
            return Some(self.scroll_range.high_subrange(self.range.delta()));
        }
        Some(self.range)
    }

    /// Pins the view's trailing edge to the newest data. No-op if the view
    /// range is empty. Returns whether the view changed.
    pub fn fit(&mut self) -> bool {
        match self.fit_target() {
            Some(target) => self.set_range_for_fit(target),
            None => false,
        }
    }

    /// Enables or disables live-follow. A rising edge fits immediately.
    pub fn set_time_fit(&mut self, time_fit: bool) {
        if self.time_fit == time_fit {
            return;
        }

        self.time_fit = time_fit;

        if self.time_fit {
            self.fit();
        }
    }

    /// Flips the live-follow flag without fitting. Returns `true` on a
    /// rising edge, so the caller can run its own fit path.
    pub(crate) fn set_time_fit_flag(&mut self, time_fit: bool) -> bool {
        if self.time_fit == time_fit {
            return false;
        }
        self.time_fit = time_fit;
        time_fit
    }

    /// Replaces the data-extent range; fits when live-follow is active.
    /// Returns whether the scroll range changed.
    pub fn set_scroll_range(&mut self, range: Range) -> bool {
        if !self.replace_scroll_range(range) {
            return false;
        }

        if self.time_fit {
            self.fit();
        }
        true
    }

    /// Stores a new scroll range without the fit side effect; the chart uses
    /// this and runs its thinning-aware fit instead.
    pub(crate) fn replace_scroll_range(&mut self, range: Range) -> bool {
        if self.scroll_range == range {
            return false;
        }
        self.scroll_range = range;
        true
    }

    pub fn add_cursor(&mut self, position: f64) -> CursorId {
        let id = CursorId(self.next_cursor);
        self.next_cursor += 1;
        self.cursors.push(Cursor {
            id,
            position,
            axis: self.handle,
        });
        id
    }

    /// Returns `false` when the cursor is unknown.
    pub fn move_cursor(&mut self, id: CursorId, position: f64) -> bool {
        match self.cursors.iter_mut().find(|cursor| cursor.id == id) {
            Some(cursor) => {
                cursor.position = position;
                true
            }
            None => false,
        }
    }

    /// Returns `false` when the cursor is unknown.
    pub fn delete_cursor(&mut self, id: CursorId) -> bool {
        let before = self.cursors.len();
        self.cursors.retain(|cursor| cursor.id != id);
        self.cursors.len() != before
    }

    #[must_use]
    pub fn cursor(&self, id: CursorId) -> Option<&Cursor> {
        self.cursors.iter().find(|cursor| cursor.id == id)
    }

    /// Cursors in creation order.
    #[must_use]
    pub fn cursors(&self) -> &[Cursor] {
        &self.cursors
    }

    fn update_layout(&mut self) {
        let full = PixelRect::new(0, 0, self.width, self.height);
        let delta = self.range.delta();

        match self.orientation {
            Orientation::Vertical => {
                self.draw_rect =
                    full.inset(0, DRAWING_RECT_OFFSET_Y, 0, DRAWING_RECT_OFFSET_Y);

                self.tick_step = if self.range.kind() == RangeKind::Logical {
                    delta
                } else {
                    estimate_value_tick_step(
                        self.draw_rect.height,
                        delta,
                        VALUE_TICK_MIN_SPACING_PX,
                    )
                };
            }
            Orientation::Horizontal => {
                self.draw_rect = full.inset(
                    DRAWING_RECT_OFFSET_X + 1,
                    0,
                    DRAWING_RECT_OFFSET_X + 1,
                    0,
                );

                let pixels_per_second = if delta < f64::EPSILON {
                    0.0
                } else {
                    f64::from(self.draw_rect.width) / delta
                };
                self.tick_step =
                    estimate_time_tick_step(pixels_per_second, TIME_TICK_MIN_SPACING_PX);
            }
        }
    }
}
