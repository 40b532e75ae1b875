use thiserror::Error;

use crate::core::ItemId;

pub type TrackResult<T> = Result<T, TrackError>;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("item `{name}` has a start point after its end point")]
    InvalidInterval { name: String },

    #[error("invalid axis step: {0}")]
    InvalidStep(String),

    #[error("unknown track index: {0}")]
    UnknownTrack(usize),

    #[error("unknown item: {0:?}")]
    UnknownItem(ItemId),
}
