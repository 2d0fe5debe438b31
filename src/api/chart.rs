use std::rc::Rc;

use indexmap::IndexMap;
use tracing::trace;

use crate::api::line::{Color, Line, LinePolicy};
use crate::api::pane::Pane;
use crate::core::axis::{Axis, Cursor, Orientation};
use crate::core::handles::{AxisHandle, CursorId, LineId, PaneId};
use crate::core::range::{Range, RangeKind};
use crate::core::scroll::{ScrollBarState, ScrollSync};
use crate::core::source::{DataSource, SourceEvent};
use crate::core::ticks::time_axis_label;
use crate::error::{GraphError, GraphResult};

/// Outward notifications accumulated by the engine and drained by the host
/// with [`Chart::take_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    ViewRangeChanged {
        axis: AxisHandle,
        range: Range,
    },
    ScrollRangeChanged {
        range: Range,
    },
    ScrollBarChanged {
        value: i32,
        maximum: i32,
    },
    CurrentValueChanged {
        pane: PaneId,
        line: LineId,
        value: Option<f64>,
    },
}

/// The chart model: one shared horizontal axis, dynamic panes with vertical
/// axes and lines, and the scrollbar synchronizer.
///
/// All work is synchronous and runs on the caller's thread. The host relays
/// data-source mutations through [`Chart::handle_source_event`]; each
/// notification runs the fixed pipeline vertical auto-range → horizontal
/// adjustment/time-fit → tick recalculation → scroll-position recompute.
#[derive(Debug)]
pub struct Chart {
    horizontal_axis: Axis,
    panes: IndexMap<PaneId, Pane>,

    scroll: ScrollSync,
    scroll_bar: ScrollBarState,

    selected_cursor: Option<(AxisHandle, CursorId)>,

    events: Vec<ChartEvent>,

    next_pane: u64,
    next_line: u64,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

impl Chart {
    #[must_use]
    pub fn new() -> Self {
        Self {
            horizontal_axis: Axis::new(Orientation::Horizontal, AxisHandle::Horizontal),
            panes: IndexMap::new(),
            scroll: ScrollSync::default(),
            scroll_bar: ScrollBarState::default(),
            selected_cursor: None,
            events: Vec::new(),
            next_pane: 0,
            next_line: 0,
        }
    }

    // Axes.

    #[must_use]
    pub fn horizontal_axis(&self) -> &Axis {
        &self.horizontal_axis
    }

    pub fn axis(&self, handle: AxisHandle) -> GraphResult<&Axis> {
        match handle {
            AxisHandle::Horizontal => Ok(&self.horizontal_axis),
            AxisHandle::Vertical(pane) => Ok(self.pane(pane)?.vertical_axis()),
        }
    }

    /// Resizes the horizontal axis widget area, then refreshes auto-ranges
    /// and the scrollbar against the new geometry.
    pub fn resize_horizontal_axis(&mut self, width: i32, height: i32) {
        self.horizontal_axis.resize(width, height);
        self.update_auto_ranges();
        self.refresh_scroll_bar();
    }

    pub fn resize_pane(&mut self, pane: PaneId, width: i32, height: i32) -> GraphResult<()> {
        self.pane_mut(pane)?.vertical_axis_mut().resize(width, height);
        Ok(())
    }

    /// Replaces the horizontal view range. The requested range is thinned
    /// first (§ adaptive thinning); a change detaches live-follow.
    pub fn set_horizontal_range(&mut self, range: Range) {
        self.set_horizontal_range_internal(range);
    }

    pub fn set_vertical_range(&mut self, pane: PaneId, range: Range) -> GraphResult<()> {
        if self.pane_mut(pane)?.vertical_axis_mut().set_range(range) {
            let applied = self.pane(pane)?.vertical_axis().range();
            self.events.push(ChartEvent::ViewRangeChanged {
                axis: AxisHandle::Vertical(pane),
                range: applied,
            });
        }
        Ok(())
    }

    /// Zooms one pane: applies the vertical range to the pane's axis and the
    /// horizontal range chart-wide.
    pub fn zoom(
        &mut self,
        pane: PaneId,
        horizontal_range: Range,
        vertical_range: Range,
    ) -> GraphResult<()> {
        self.set_vertical_range(pane, vertical_range)?;
        self.set_horizontal_range(horizontal_range);
        Ok(())
    }

    // Time fit.

    /// Enables or disables live-follow on the horizontal axis; a rising edge
    /// fits immediately.
    pub fn set_time_fit(&mut self, time_fit: bool) {
        if self.horizontal_axis.set_time_fit_flag(time_fit) {
            self.fit_horizontal();
        }
    }

    /// Replaces the data-extent (scroll) range explicitly. Normally the
    /// extent is recomputed from the line sources on every history change.
    pub fn set_scroll_range(&mut self, range: Range) {
        self.apply_scroll_range(range);
    }

    // Panes.

    pub fn panes(&self) -> impl Iterator<Item = &Pane> {
        self.panes.values()
    }

    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    pub fn pane(&self, id: PaneId) -> GraphResult<&Pane> {
        self.panes.get(&id).ok_or(GraphError::UnknownPane(id))
    }

    pub fn add_pane(&mut self) -> PaneId {
        let id = PaneId(self.next_pane);
        self.next_pane += 1;
        self.panes.insert(id, Pane::new(id));
        id
    }

    /// Removes a pane with its axis, lines, and cursors.
    pub fn remove_pane(&mut self, id: PaneId) -> GraphResult<()> {
        if self.panes.shift_remove(&id).is_none() {
            return Err(GraphError::UnknownPane(id));
        }

        if matches!(self.selected_cursor, Some((AxisHandle::Vertical(pane), _)) if pane == id) {
            self.selected_cursor = None;
        }

        self.update_scroll_range();
        Ok(())
    }

    /// The pane after `id` in display order, if any.
    pub fn next_pane(&self, id: PaneId) -> GraphResult<Option<PaneId>> {
        let index = self
            .panes
            .get_index_of(&id)
            .ok_or(GraphError::UnknownPane(id))?;
        Ok(self
            .panes
            .get_index(index + 1)
            .map(|(next, _)| *next))
    }

    /// The pane before `id` in display order, if any.
    pub fn prev_pane(&self, id: PaneId) -> GraphResult<Option<PaneId>> {
        let index = self
            .panes
            .get_index_of(&id)
            .ok_or(GraphError::UnknownPane(id))?;
        Ok(index
            .checked_sub(1)
            .and_then(|prev| self.panes.get_index(prev))
            .map(|(prev, _)| *prev))
    }

    // Lines.

    /// Adds a line bound to `source` and primes its ranges against the
    /// current view.
    pub fn add_line(
        &mut self,
        pane_id: PaneId,
        source: Rc<dyn DataSource>,
    ) -> GraphResult<LineId> {
        let (x1, x2) = self.visible_horizontal_interval();

        let id = LineId(self.next_line);
        self.next_line += 1;

        let pane = self
            .panes
            .get_mut(&pane_id)
            .ok_or(GraphError::UnknownPane(pane_id))?;

        let mut line = Line::new(source);
        line.update_vertical_range(x1, x2);
        pane.insert_line(id, line);
        let pane_changed = pane.update_vertical_axis_range();
        let pane_range = pane.vertical_axis().range();

        if pane_changed {
            self.events.push(ChartEvent::ViewRangeChanged {
                axis: AxisHandle::Vertical(pane_id),
                range: pane_range,
            });
        }

        self.update_scroll_range();
        self.adjust_time_range();
        Ok(id)
    }

    pub fn remove_line(&mut self, pane_id: PaneId, line_id: LineId) -> GraphResult<()> {
        let pane = self
            .panes
            .get_mut(&pane_id)
            .ok_or(GraphError::UnknownPane(pane_id))?;
        if pane.remove_line(line_id).is_none() {
            return Err(GraphError::UnknownLine(line_id));
        }

        let pane_changed = pane.update_vertical_axis_range();
        let pane_range = pane.vertical_axis().range();
        if pane_changed {
            self.events.push(ChartEvent::ViewRangeChanged {
                axis: AxisHandle::Vertical(pane_id),
                range: pane_range,
            });
        }

        self.update_scroll_range();
        Ok(())
    }

    pub fn line(&self, pane: PaneId, line: LineId) -> GraphResult<&Line> {
        self.pane(pane)?
            .line(line)
            .ok_or(GraphError::UnknownLine(line))
    }

    /// Updates a line's display policy and refreshes its range contribution
    /// (the auto-range flag may have flipped).
    pub fn set_line_policy(
        &mut self,
        pane: PaneId,
        line: LineId,
        policy: LinePolicy,
    ) -> GraphResult<()> {
        let (x1, x2) = self.visible_horizontal_interval();

        let pane_ref = self
            .panes
            .get_mut(&pane)
            .ok_or(GraphError::UnknownPane(pane))?;
        pane_ref
            .line_mut(line)
            .ok_or(GraphError::UnknownLine(line))?
            .set_policy(policy);

        self.update_line_range(pane, line, x1, x2)
    }

    pub fn set_line_color(
        &mut self,
        pane: PaneId,
        line: LineId,
        color: Color,
    ) -> GraphResult<()> {
        self.panes
            .get_mut(&pane)
            .ok_or(GraphError::UnknownPane(pane))?
            .line_mut(line)
            .ok_or(GraphError::UnknownLine(line))?
            .set_color(color);
        Ok(())
    }

    // Source notifications.

    /// Entry point for relayed data-source mutations. Runs the recompute
    /// pipeline in its fixed order; later steps observe the final state of
    /// earlier ones.
    pub fn handle_source_event(
        &mut self,
        pane: PaneId,
        line: LineId,
        event: SourceEvent,
    ) -> GraphResult<()> {
        trace!(?event, ?pane, ?line, "source event");

        match event {
            SourceEvent::CurrentValueChanged => {
                let pane_ref = self
                    .panes
                    .get_mut(&pane)
                    .ok_or(GraphError::UnknownPane(pane))?;
                let line_ref = pane_ref
                    .line_mut(line)
                    .ok_or(GraphError::UnknownLine(line))?;

                if line_ref.sync_current_value() {
                    let value = line_ref.current_value();
                    self.events.push(ChartEvent::CurrentValueChanged {
                        pane,
                        line,
                        value,
                    });
                }
            }
            SourceEvent::HistoryChanged | SourceEvent::ItemChanged => {
                let (x1, x2) = self.visible_horizontal_interval();
                self.update_line_range(pane, line, x1, x2)?;
                self.update_scroll_range();
                self.adjust_time_range();
            }
        }
        Ok(())
    }

    /// Recomputes every auto-ranged line against the current visible
    /// interval, then each pane's vertical axis.
    pub fn update_auto_ranges(&mut self) {
        let (x1, x2) = self.visible_horizontal_interval();

        let mut changed_panes = Vec::new();
        for (pane_id, pane) in &mut self.panes {
            let auto_lines: Vec<LineId> = pane
                .lines()
                .filter(|(_, line)| line.policy().auto_range)
                .map(|(id, _)| id)
                .collect();
            for line_id in auto_lines {
                if let Some(line) = pane.line_mut(line_id) {
                    line.update_vertical_range(x1, x2);
                }
            }
            if pane.update_vertical_axis_range() {
                changed_panes.push((*pane_id, pane.vertical_axis().range()));
            }
        }

        for (pane_id, range) in changed_panes {
            self.events.push(ChartEvent::ViewRangeChanged {
                axis: AxisHandle::Vertical(pane_id),
                range,
            });
        }
    }

    // Scrollbar.

    /// Current scrollbar state for the host widget to mirror.
    #[must_use]
    pub fn scroll_bar(&self) -> ScrollBarState {
        self.scroll_bar
    }

    /// Handles a user-driven scrollbar move. Guarded against re-entrancy:
    /// the resulting range change does not push a position back.
    pub fn on_scroll(&mut self, pos: i32) {
        if self.scroll.updating {
            return;
        }
        self.scroll.updating = true;

        self.scroll_bar.set_value(pos);
        let view = self.horizontal_axis.range();
        if let Some(range) =
            self.scroll
                .position_to_range(self.scroll_bar.value(), view, &self.scroll_bar)
        {
            self.set_horizontal_range_internal(range);
        }

        self.scroll.updating = false;
    }

    // Cursors.

    pub fn add_cursor(&mut self, axis: AxisHandle, position: f64) -> GraphResult<CursorId> {
        validate_cursor_position(position)?;
        Ok(self.axis_mut(axis)?.add_cursor(position))
    }

    pub fn move_cursor(
        &mut self,
        axis: AxisHandle,
        cursor: CursorId,
        position: f64,
    ) -> GraphResult<()> {
        validate_cursor_position(position)?;
        if self.axis_mut(axis)?.move_cursor(cursor, position) {
            Ok(())
        } else {
            Err(GraphError::UnknownCursor(cursor))
        }
    }

    pub fn delete_cursor(&mut self, axis: AxisHandle, cursor: CursorId) -> GraphResult<()> {
        if !self.axis_mut(axis)?.delete_cursor(cursor) {
            return Err(GraphError::UnknownCursor(cursor));
        }
        if self.selected_cursor == Some((axis, cursor)) {
            self.selected_cursor = None;
        }
        Ok(())
    }

    pub fn cursors(&self, axis: AxisHandle) -> GraphResult<&[Cursor]> {
        Ok(self.axis(axis)?.cursors())
    }

    #[must_use]
    pub fn selected_cursor(&self) -> Option<(AxisHandle, CursorId)> {
        self.selected_cursor
    }

    /// Selects a cursor (or clears the selection with `None`).
    pub fn select_cursor(
        &mut self,
        selection: Option<(AxisHandle, CursorId)>,
    ) -> GraphResult<()> {
        if let Some((axis, cursor)) = selection {
            if self.axis(axis)?.cursor(cursor).is_none() {
                return Err(GraphError::UnknownCursor(cursor));
            }
        }
        self.selected_cursor = selection;
        Ok(())
    }

    // Labels.

    /// Formats a horizontal-axis value: bucketed time label for time ranges,
    /// plain numeric otherwise.
    #[must_use]
    pub fn x_axis_label(&self, value: f64) -> String {
        if self.horizontal_axis.range().kind() == RangeKind::Time {
            time_axis_label(value, self.horizontal_axis.tick_step())
        } else {
            value.to_string()
        }
    }

    /// Formats a vertical-axis value through the pane's primary line source.
    pub fn y_axis_label(&self, pane: PaneId, value: f64) -> GraphResult<String> {
        Ok(self
            .pane(pane)?
            .primary_line()
            .map(|line| line.source().y_axis_label(value))
            .unwrap_or_default())
    }

    /// Formats the label of one cursor, routed by its axis orientation.
    pub fn cursor_label(&self, axis: AxisHandle, cursor: CursorId) -> GraphResult<String> {
        let position = self
            .axis(axis)?
            .cursor(cursor)
            .ok_or(GraphError::UnknownCursor(cursor))?
            .position();

        match axis {
            AxisHandle::Horizontal => Ok(self.x_axis_label(position)),
            AxisHandle::Vertical(pane) => self.y_axis_label(pane, position),
        }
    }

    // Events.

    /// Drains the accumulated outward events.
    pub fn take_events(&mut self) -> Vec<ChartEvent> {
        std::mem::take(&mut self.events)
    }

    // Pipeline internals.

    fn pane_mut(&mut self, id: PaneId) -> GraphResult<&mut Pane> {
        self.panes.get_mut(&id).ok_or(GraphError::UnknownPane(id))
    }

    fn axis_mut(&mut self, handle: AxisHandle) -> GraphResult<&mut Axis> {
        match handle {
            AxisHandle::Horizontal => Ok(&mut self.horizontal_axis),
            AxisHandle::Vertical(pane) => Ok(self.pane_mut(pane)?.vertical_axis_mut()),
        }
    }

    /// The data-space interval the horizontal axis currently shows, taken
    /// from the widget edges through the transform.
    fn visible_horizontal_interval(&self) -> (f64, f64) {
        (
            self.horizontal_axis.screen_to_value(0),
            self.horizontal_axis
                .screen_to_value(self.horizontal_axis.width()),
        )
    }

    fn update_line_range(
        &mut self,
        pane_id: PaneId,
        line_id: LineId,
        x1: f64,
        x2: f64,
    ) -> GraphResult<()> {
        let pane = self
            .panes
            .get_mut(&pane_id)
            .ok_or(GraphError::UnknownPane(pane_id))?;
        pane.line_mut(line_id)
            .ok_or(GraphError::UnknownLine(line_id))?
            .update_vertical_range(x1, x2);

        let changed = pane.update_vertical_axis_range();
        let range = pane.vertical_axis().range();
        if changed {
            self.events.push(ChartEvent::ViewRangeChanged {
                axis: AxisHandle::Vertical(pane_id),
                range,
            });
        }
        Ok(())
    }

    /// Thins a candidate horizontal range through every line.
    fn adjust_horizontal_range(&self, range: Range) -> Range {
        let mut adjusted = range;
        for pane in self.panes.values() {
            for (_, line) in pane.lines() {
                adjusted = line.adjust_horizontal_range(adjusted);
            }
        }
        adjusted
    }

    /// Re-thins the current horizontal view, e.g. after new history arrived.
    fn adjust_time_range(&mut self) {
        let current = self.horizontal_axis.range();
        let adjusted = self.adjust_horizontal_range(current);
        if self.horizontal_axis.set_range(adjusted) {
            self.after_horizontal_range_changed();
        }
    }

    fn set_horizontal_range_internal(&mut self, range: Range) -> bool {
        let adjusted = self.adjust_horizontal_range(range);
        let changed = self.horizontal_axis.set_range(adjusted);
        if changed {
            self.after_horizontal_range_changed();
        }
        changed
    }

    /// Applies the fit target through the thinning path, preserving the
    /// live-follow flag.
    fn fit_horizontal(&mut self) -> bool {
        let Some(target) = self.horizontal_axis.fit_target() else {
            return false;
        };
        let adjusted = self.adjust_horizontal_range(target);
        let changed = self.horizontal_axis.set_range_for_fit(adjusted);
        if changed {
            self.after_horizontal_range_changed();
        }
        changed
    }

    /// Recomputes the reachable data extent as the union of every line
    /// source's horizontal range.
    fn update_scroll_range(&mut self) {
        let mut combined = Range::default();
        for pane in self.panes.values() {
            for (_, line) in pane.lines() {
                combined = combined.combine(line.source().horizontal_range());
            }
        }
        self.apply_scroll_range(combined);
    }

    fn apply_scroll_range(&mut self, range: Range) {
        if !self.horizontal_axis.replace_scroll_range(range) {
            return;
        }

        self.scroll.set_scroll_range(range);
        self.events.push(ChartEvent::ScrollRangeChanged { range });

        if self.horizontal_axis.time_fit() {
            self.fit_horizontal();
        }
        self.refresh_scroll_bar();
    }

    fn after_horizontal_range_changed(&mut self) {
        self.events.push(ChartEvent::ViewRangeChanged {
            axis: AxisHandle::Horizontal,
            range: self.horizontal_axis.range(),
        });
        self.refresh_scroll_bar();
    }

    /// Recomputes bar extent, and pushes the position back unless the update
    /// originated from the bar itself.
    fn refresh_scroll_bar(&mut self) {
        let before = self.scroll_bar;
        let view = self.horizontal_axis.range();

        self.scroll.update_bar(view, &mut self.scroll_bar);

        if !self.scroll.updating {
            self.scroll.updating = true;
            if let Some(pos) = self.scroll.range_to_position(view, &self.scroll_bar) {
                self.scroll_bar.set_value(pos);
            }
            self.scroll.updating = false;
        }

        if self.scroll_bar != before {
            self.events.push(ChartEvent::ScrollBarChanged {
                value: self.scroll_bar.value(),
                maximum: self.scroll_bar.maximum(),
            });
        }
    }
}

fn validate_cursor_position(position: f64) -> GraphResult<()> {
    if !position.is_finite() {
        return Err(GraphError::InvalidData(
            "cursor position must be finite".to_owned(),
        ));
    }
    Ok(())
}
