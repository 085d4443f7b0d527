//! Minimal BMP container handling.
//!
//! A bitmap is split into two opaque byte buffers: everything before the pixel
//! array (file header, info header, optional palette) and the pixel array
//! itself. Nothing here interprets pixels beyond what is needed to synthesize
//! a demo image.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod container;
mod error;
mod synth;

pub use crate::container::{read_container, write_container, Container, HEADER_LEN, SIGNATURE};
pub use crate::error::{ContainerError, Result};
pub use crate::synth::synthesize_pattern;
