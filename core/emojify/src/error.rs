use thiserror::Error;

use crate::classify::EmojiCategory;

/// Errors returned by emojify operations.
#[derive(Debug, Error)]
pub enum EmojifyError {
    /// A face descriptor failed validation against the photo.
    #[error("invalid face descriptor: {0}")]
    InvalidInput(String),

    /// A catalog sprite could not be loaded or decoded.
    #[error("failed to load sprite for {category:?}: {reason}")]
    MissingAsset {
        /// Category whose sprite failed.
        category: EmojiCategory,
        /// Underlying failure.
        reason: String,
    },

    /// The output image buffer could not be allocated.
    #[error("failed to allocate a {width}x{height} output image")]
    BufferAllocation {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// A classifier threshold lies outside `[0, 1]`.
    #[error("threshold must be between 0.0 and 1.0, got {0}")]
    InvalidThreshold(f32),

    /// A viewport with a zero dimension was requested.
    #[error("viewport dimensions must be > 0")]
    InvalidViewport,

    /// A detector backend could not be initialised.
    #[error("face detector unavailable: {0}")]
    Detection(String),

    /// Reading sprite or model files failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EmojifyError>;
