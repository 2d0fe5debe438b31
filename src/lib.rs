//! axis-rs: axis range and scaling engine for streaming time-series charts.
//!
//! The crate maps data-space values (including time) to and from 1-D pixel
//! space, picks adaptive tick steps, auto-ranges line data, thins point
//! streams to bound on-screen complexity, and keeps a continuous view window
//! synchronized with a discrete scrollbar, including a live-follow
//! (time-fit) mode. Painting, layout, and pointer handling stay with the
//! host; the engine is purely synchronous, single-threaded model code.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{Chart, ChartEvent, Color, Line, LinePolicy, Pane};
pub use crate::core::{
    Axis, AxisHandle, Cursor, CursorId, DataSource, GraphPoint, LineId, Orientation, PaneId,
    PixelRect, PointEnumerator, Range, RangeKind, ScrollBarState, SourceEvent, SourceLimits,
    TimeLabelPrecision, Ticks,
};
pub use error::{GraphError, GraphResult};
