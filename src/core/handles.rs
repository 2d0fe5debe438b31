use serde::{Deserialize, Serialize};

/// Non-owning identifier of a pane within a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaneId(pub(crate) u64);

/// Non-owning identifier of a line within a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineId(pub(crate) u64);

/// Non-owning identifier of a cursor on an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CursorId(pub(crate) u64);

/// Locates an axis: the chart-wide horizontal axis, or the vertical axis of
/// one pane. Cursors carry this as their back-reference; ownership always
/// flows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisHandle {
    Horizontal,
    Vertical(PaneId),
}

impl AxisHandle {
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical(_))
    }
}
