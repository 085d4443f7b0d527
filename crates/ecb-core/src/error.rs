//! Error type for the cipher core.

use thiserror::Error;

/// Errors raised by the cipher core.
///
/// Every transform past key validation is total, so the only failure is a key
/// of unsupported length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CipherError {
    /// The key is not one of the supported sizes.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Key length the cipher accepts.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
}

/// Result alias for cipher-core operations.
pub type Result<T> = core::result::Result<T, CipherError>;
