use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Failures surfaced by chart sessions, renderers and data loaders.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The drawing surface has a zero dimension.
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    /// Malformed input records, unrenderable primitives or a failed
    /// (de)serialization.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A render state, range or zoom window that breaks its invariants.
    /// The session keeps its previous state.
    #[error("invalid render state: {0}")]
    InvalidState(String),
}
