//! Error types
//!
//! Everything here is a construction-time failure: wall input that cannot be
//! meshed, ghost tracks that cannot be followed, unreadable settings. Runtime
//! state transitions never fail, they are no-ops instead.

use thiserror::Error;

/// Errors raised while building walls, pickups or loading settings.
#[derive(Error, Debug)]
pub enum Error {
    /// Flat corner data must be `[x1, z1, x2, z2, ...]`.
    #[error("corner data must hold x/z pairs, got {len} values")]
    OddCoordinateCount {
        /// Number of values supplied.
        len: usize,
    },

    /// A wall needs at least one segment.
    #[error("a wall needs at least 2 corners, got {count}")]
    TooFewCorners {
        /// Number of corners supplied.
        count: usize,
    },

    /// Corner coordinate is NaN or infinite.
    #[error("corner {index} has a non-finite coordinate")]
    NonFiniteCorner {
        /// Index of the offending corner.
        index: usize,
    },

    /// Corner `index` coincides with the corner that follows it.
    #[error("corner {index} coincides with the next corner (zero-length segment)")]
    CoincidentCorners {
        /// Index of the first corner of the degenerate segment.
        index: usize,
    },

    /// Wall height or thickness out of range.
    #[error("{name} must be positive and finite, got {value}")]
    InvalidDimension {
        /// Which dimension was rejected.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// Ghost patrol that cannot be followed.
    #[error("invalid ghost path: {reason}")]
    InvalidPath {
        /// What is wrong with the path.
        reason: String,
    },

    /// Settings JSON could not be parsed or written.
    #[error("settings: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;
