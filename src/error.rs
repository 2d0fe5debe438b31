use thiserror::Error;

use crate::core::handles::{CursorId, LineId, PaneId};

pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("unknown pane: {0:?}")]
    UnknownPane(PaneId),

    #[error("unknown line: {0:?}")]
    UnknownLine(LineId),

    #[error("unknown cursor: {0:?}")]
    UnknownCursor(CursorId),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
