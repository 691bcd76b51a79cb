use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RotateError {
    #[error("invalid matrix dimensions: {rows} rows x {cols} cols")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("buffer holds {actual} cells, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("index {index} out of range, bound is {bound}")]
    IndexOutOfRange { index: usize, bound: usize },

    #[error("launch grid of {blocks} blocks x {threads_per_block} threads cannot serve {cols} columns")]
    InvalidLaunch {
        blocks: usize,
        threads_per_block: usize,
        cols: usize,
    },

    #[error("unknown rotation strategy: {0}")]
    UnknownStrategy(String),
}

pub type RotateResult<T> = std::result::Result<T, RotateError>;
