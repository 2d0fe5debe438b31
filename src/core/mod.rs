pub mod axis;
pub mod geometry;
pub mod handles;
pub mod range;
pub mod scroll;
pub mod source;
pub mod ticks;

pub use axis::{Axis, Cursor, Orientation};
pub use geometry::PixelRect;
pub use handles::{AxisHandle, CursorId, LineId, PaneId};
pub use range::{Range, RangeKind};
pub use scroll::{ScrollBarState, ScrollSync};
pub use source::{DataSource, GraphPoint, PointEnumerator, SourceEvent, SourceLimits};
pub use ticks::{TimeLabelPrecision, Ticks, time_axis_label};
