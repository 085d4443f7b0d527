//! AES-128 block cipher driven in Electronic Codebook mode.
//!
//! This crate follows the FIPS-197 forward cipher and provides:
//! - Arithmetic in GF(2^8) and the fixed substitution tables.
//! - Key schedule expansion with explicit [`CipherParams`].
//! - Single-block encryption with an optional [`CipherObserver`] hook.
//! - An ECB driver for payloads of any length, sequential or threaded.
//!
//! Its purpose is to make ECB's pattern leakage visible on image data. It is
//! not side-channel hardened and offers no real confidentiality.
//!
//! There is deliberately no inverse cipher:
//!
//! ```compile_fail
//! use ecb_core::decrypt_block;
//! ```
//!
//! ```
//! use ecb_core::{encrypt_ecb, KeySchedule};
//!
//! let schedule = KeySchedule::expand(&[0u8; 16]).unwrap();
//! let ct = encrypt_ecb(&[0u8; 32], &schedule);
//! assert_eq!(ct[..16], ct[16..]);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
pub mod ecb;
mod error;
pub mod gf;
mod key;
pub mod round;
mod sbox;
pub mod trace;

pub use crate::block::{Block, State, BLOCK_LEN};
pub use crate::cipher::{encrypt_block, encrypt_block_observed, expand_key};
pub use crate::ecb::{
    encrypt_ecb, encrypt_ecb_in_place, encrypt_ecb_observed, encrypt_ecb_parallel,
};
pub use crate::error::{CipherError, Result};
pub use crate::key::{Aes128Key, CipherParams, KeySchedule, AES128_KEY_LEN};
pub use crate::sbox::{round_constant, sbox, SBOX};
pub use crate::trace::{CipherObserver, Step};
