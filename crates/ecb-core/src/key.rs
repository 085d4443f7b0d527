//! Key types, cipher parameters and the expanded key schedule.

use crate::block::{Block, BLOCK_LEN};
use crate::cipher::expand_with_params;
use crate::error::{CipherError, Result};

/// Length of an AES-128 key in bytes.
pub const AES128_KEY_LEN: usize = 16;

/// AES-128 key wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aes128Key(pub [u8; 16]);

impl From<[u8; 16]> for Aes128Key {
    fn from(value: [u8; 16]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Aes128Key {
    type Error = CipherError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let key: [u8; 16] = bytes
            .try_into()
            .map_err(|_| CipherError::InvalidKeyLength {
                expected: AES128_KEY_LEN,
                actual: bytes.len(),
            })?;
        Ok(Self(key))
    }
}

/// Round and word counts derived from the key length.
///
/// `nk` is the key length in 32-bit words and `nr = nk + 6` the number of
/// rounds. Only the 128-bit configuration is constructible today.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CipherParams {
    nk: usize,
    nr: usize,
}

impl CipherParams {
    /// Number of 32-bit columns in the state.
    pub const NB: usize = 4;

    /// Parameters for a 128-bit key.
    pub const AES128: Self = Self::from_key_words(4);

    const fn from_key_words(nk: usize) -> Self {
        Self { nk, nr: nk + 6 }
    }

    /// Selects parameters for a key of `len` bytes.
    pub fn for_key_len(len: usize) -> Result<Self> {
        match len {
            AES128_KEY_LEN => Ok(Self::AES128),
            actual => Err(CipherError::InvalidKeyLength {
                expected: AES128_KEY_LEN,
                actual,
            }),
        }
    }

    /// Key length in 32-bit words.
    #[inline]
    pub fn nk(&self) -> usize {
        self.nk
    }

    /// Number of rounds.
    #[inline]
    pub fn nr(&self) -> usize {
        self.nr
    }

    /// Number of 32-bit words in the expanded schedule.
    #[inline]
    pub fn schedule_words(&self) -> usize {
        Self::NB * (self.nr + 1)
    }

    /// Size of the expanded schedule in bytes.
    #[inline]
    pub fn schedule_len(&self) -> usize {
        BLOCK_LEN * (self.nr + 1)
    }
}

/// Expanded round keys, one per round plus the initial whitening key.
///
/// Only produced by key expansion, so `round_keys.len() == params.nr() + 1`
/// always holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeySchedule {
    params: CipherParams,
    round_keys: Vec<Block>,
}

impl KeySchedule {
    /// Validates `key` and expands it.
    ///
    /// Fails with [`CipherError::InvalidKeyLength`] before any expansion work
    /// when `key` is not 16 bytes long.
    pub fn expand(key: &[u8]) -> Result<Self> {
        let params = CipherParams::for_key_len(key.len())?;
        Ok(expand_with_params(key, params))
    }

    pub(crate) fn from_parts(params: CipherParams, round_keys: Vec<Block>) -> Self {
        debug_assert_eq!(round_keys.len(), params.nr() + 1);
        Self { params, round_keys }
    }

    /// Parameters the schedule was expanded for.
    #[inline]
    pub fn params(&self) -> CipherParams {
        self.params
    }

    /// Returns the round key at the requested index (`0..=nr`).
    ///
    /// # Panics
    ///
    /// Panics if `round` is greater than `nr`.
    #[inline]
    pub fn round_key(&self, round: usize) -> &Block {
        &self.round_keys[round]
    }

    /// Number of round keys (`nr + 1`).
    #[inline]
    pub fn len(&self) -> usize {
        self.round_keys.len()
    }

    /// Always false: a schedule holds at least the whitening key.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.round_keys.is_empty()
    }

    /// Flattened schedule bytes in round order.
    pub fn as_bytes(&self) -> Vec<u8> {
        self.round_keys.iter().flatten().copied().collect()
    }
}
