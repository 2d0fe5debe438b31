use indexmap::IndexMap;

use crate::api::line::Line;
use crate::core::axis::{Axis, Orientation};
use crate::core::handles::{AxisHandle, LineId, PaneId};
use crate::core::range::Range;

/// One chart pane: a vertical axis plus the lines plotted against it. The
/// shared horizontal axis lives on the chart.
#[derive(Debug)]
pub struct Pane {
    id: PaneId,
    vertical_axis: Axis,
    lines: IndexMap<LineId, Line>,
}

impl Pane {
    pub(crate) fn new(id: PaneId) -> Self {
        Self {
            id,
            vertical_axis: Axis::new(Orientation::Vertical, AxisHandle::Vertical(id)),
            lines: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> PaneId {
        self.id
    }

    #[must_use]
    pub fn vertical_axis(&self) -> &Axis {
        &self.vertical_axis
    }

    pub(crate) fn vertical_axis_mut(&mut self) -> &mut Axis {
        &mut self.vertical_axis
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> impl Iterator<Item = (LineId, &Line)> {
        self.lines.iter().map(|(id, line)| (*id, line))
    }

    #[must_use]
    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(&id)
    }

    pub(crate) fn line_mut(&mut self, id: LineId) -> Option<&mut Line> {
        self.lines.get_mut(&id)
    }

    /// The first line added to the pane; its source formats the pane's
    /// y-axis labels.
    #[must_use]
    pub fn primary_line(&self) -> Option<&Line> {
        self.lines.values().next()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub(crate) fn insert_line(&mut self, id: LineId, line: Line) {
        self.lines.insert(id, line);
    }

    pub(crate) fn remove_line(&mut self, id: LineId) -> Option<Line> {
        self.lines.shift_remove(&id)
    }

    /// Aggregates the lines' contributed y ranges and applies the result to
    /// the vertical axis: the union of all contributions, or the logical
    /// unit range when every contributing line is logical. With no
    /// contributions the axis is left untouched. Returns whether the axis
    /// range changed.
    pub(crate) fn update_vertical_axis_range(&mut self) -> bool {
        let mut combined: Option<Range> = None;
        let mut all_logical = true;

        for line in self.lines.values() {
            let Some(range) = line.vertical_range() else {
                continue;
            };
            all_logical &= line.is_logical();
            combined = Some(match combined {
                Some(current) => current.combine(range),
                None => range,
            });
        }

        let Some(combined) = combined else {
            return false;
        };

        let target = if all_logical {
            Range::logical()
        } else {
            combined
        };
        self.vertical_axis.set_range(target)
    }
}
