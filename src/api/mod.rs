pub mod chart;
pub mod line;
pub mod pane;

pub use chart::{Chart, ChartEvent};
pub use line::{Color, Line, LinePolicy};
pub use pane::Pane;
