//! Continuous↔discrete mapping between the horizontal view window and a
//! scrollbar.

use crate::core::range::Range;

/// Advance by 10% of the view range on each page step.
const SCROLL_PAGE_STEP: i32 = 10;

/// State of the discrete scrollbar the (external) widget mirrors. The
/// minimum is pinned at zero; value is clamped into `[0, maximum]` on every
/// write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollBarState {
    value: i32,
    maximum: i32,
}

impl ScrollBarState {
    #[must_use]
    pub fn value(&self) -> i32 {
        self.value
    }

    #[must_use]
    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    #[must_use]
    pub fn page_step(&self) -> i32 {
        SCROLL_PAGE_STEP
    }

    pub fn set_maximum(&mut self, maximum: i32) {
        self.maximum = maximum.max(0);
        self.value = self.value.clamp(0, self.maximum);
    }

    pub fn set_value(&mut self, value: i32) {
        self.value = value.clamp(0, self.maximum);
    }
}

/// Maps scrollbar positions `[0, N]` onto the reachable data extent.
///
/// The `updating` guard is set before and cleared after any push in either
/// direction: a scrollbar-driven range update must not re-trigger a position
/// recompute and vice versa.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollSync {
    scroll_range: Range,
    scroll_step: f64,
    pub(crate) updating: bool,
}

impl ScrollSync {
    #[must_use]
    pub fn scroll_range(&self) -> Range {
        self.scroll_range
    }

    pub fn set_scroll_range(&mut self, range: Range) {
        self.scroll_range = range;
    }

    /// Recomputes the bar extent from the current ranges: one page step is a
    /// tenth of the view width, and the extent counts how many steps fit in
    /// the non-visible remainder. Empty ranges (or a vanishing step) clamp
    /// the extent to zero.
    pub fn update_bar(&mut self, view_range: Range, bar: &mut ScrollBarState) {
        if view_range.is_empty() || self.scroll_range.is_empty() {
            self.scroll_step = 0.0;
            bar.set_maximum(0);
            return;
        }

        self.scroll_step = view_range.delta() / f64::from(SCROLL_PAGE_STEP);
        if self.scroll_step < f64::EPSILON {
            bar.set_maximum(0);
            return;
        }

        let count = (self.scroll_range.delta() - view_range.delta()) / self.scroll_step;
        bar.set_maximum(count.floor() as i32);
    }

    /// Maps a bar position to the view range it selects, preserving the view
    /// width and kind. `None` when the bar has no extent.
    #[must_use]
    pub fn position_to_range(
        &self,
        pos: i32,
        view_range: Range,
        bar: &ScrollBarState,
    ) -> Option<Range> {
        if bar.maximum() == 0 {
            return None;
        }

        let low = self.scroll_range.low()
            + f64::from(pos) * (self.scroll_range.delta() - view_range.delta())
                / f64::from(bar.maximum());
        Some(Range::with_kind(
            low,
            low + view_range.delta(),
            view_range.kind(),
        ))
    }

    /// Maps the view range back to a bar position (the algebraic inverse of
    /// [`ScrollSync::position_to_range`], truncated). `None` when view and
    /// scroll width coincide.
    #[must_use]
    pub fn range_to_position(&self, view_range: Range, bar: &ScrollBarState) -> Option<i32> {
        let scroll_delta = self.scroll_range.delta() - view_range.delta();
        if scroll_delta.abs() < f64::EPSILON {
            return None;
        }

        // Out-of-range positions are tolerated; the bar clamps them.
        let pos = f64::from(bar.maximum()) * (view_range.low() - self.scroll_range.low())
            / scroll_delta;
        Some(pos as i32)
    }
}
