use crate::types::{TimeMs, TrackKind};
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Clip not found: {0}")]
    ClipNotFound(Uuid),

    #[error("Track not found: {0}")]
    TrackNotFound(Uuid),

    #[error("No {0:?} track in timeline")]
    TrackKindNotFound(TrackKind),

    #[error("Asset not found: {0}")]
    AssetNotFound(Uuid),

    #[error("Unsupported asset format: {0}")]
    UnsupportedAsset(PathBuf),

    #[error("Clip {id} would last {duration}, below the minimum clip duration")]
    ClipTooShort { id: Uuid, duration: TimeMs },

    #[error("Neighbouring clip {id} would last {duration}, below the minimum clip duration")]
    NeighborTooShort { id: Uuid, duration: TimeMs },

    #[error("Clip {id} overlaps an existing clip")]
    Overlap { id: Uuid },

    #[error("Clip {id} cannot start before the timeline origin")]
    NegativeStart { id: Uuid },

    #[error("Clip {id}: time {time} is out of range")]
    TimeOutOfRange { id: Uuid, time: TimeMs },

    #[error("Clip {0} is already on the track")]
    DuplicateClip(Uuid),

    #[error("Unknown clip type: {0}")]
    UnknownClipType(String),

    #[error("Invalid clip data: {0}")]
    InvalidClip(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl CoreError {
    /// True for errors produced by the invariant guards of an edit. The
    /// timeline is unchanged whenever one of these is returned.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            CoreError::ClipTooShort { .. }
                | CoreError::NeighborTooShort { .. }
                | CoreError::Overlap { .. }
                | CoreError::NegativeStart { .. }
                | CoreError::TimeOutOfRange { .. }
                | CoreError::DuplicateClip(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
