use thiserror::Error;

/// Rejected engine calls. The engine is left untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid grid dimensions {rows}x{columns}: rows and columns must be positive")]
    InvalidDimension { rows: i64, columns: i64 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("cell ({row}, {col}) is outside the {rows}x{columns} grid")]
    OutOfBounds {
        row: i64,
        col: i64,
        rows: usize,
        columns: usize,
    },

    #[error("the run loop is already running")]
    AlreadyRunning,
}
