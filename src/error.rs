use thiserror::Error;

use crate::markers::MarkerId;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown marker handle: {0:?}")]
    UnknownMarker(MarkerId),

    #[error("config serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
