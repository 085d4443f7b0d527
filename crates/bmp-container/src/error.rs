//! Errors raised while reading or writing containers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Container adapter failures.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The bytes are not a usable bitmap.
    #[error("invalid container: {0}")]
    InvalidContainer(&'static str),
    /// A synthesized image would not fit the 32-bit size fields of a bitmap.
    #[error("image of {width}x{height} pixels is too large for a bitmap")]
    TooLarge {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// The file could not be opened, read or written in full.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// Result alias for container operations.
pub type Result<T> = std::result::Result<T, ContainerError>;
