//! Observation hooks for intermediate cipher state.
//!
//! The cipher never prints. Callers that want to watch a block move through
//! the rounds pass a [`CipherObserver`]; everyone else gets `()`, which ignores
//! every event.

use core::fmt;

use crate::block::{Block, State};

/// A point in the encryption of one block at which the state is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// The plaintext copied into the state, before any key material.
    Initial,
    /// After SubBytes in the given round.
    SubBytes(usize),
    /// After ShiftRows in the given round.
    ShiftRows(usize),
    /// After MixColumns in the given round.
    MixColumns(usize),
    /// After AddRoundKey with the given round key. Round 0 is the whitening key.
    AddRoundKey(usize),
}

impl Step {
    /// Round this step belongs to; `Initial` is reported as round 0.
    pub fn round(&self) -> usize {
        match *self {
            Step::Initial => 0,
            Step::SubBytes(r) | Step::ShiftRows(r) | Step::MixColumns(r) | Step::AddRoundKey(r) => {
                r
            }
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Step::Initial => f.write_str("Initial State"),
            Step::SubBytes(r) => write!(f, "After SubBytes (Round {r})"),
            Step::ShiftRows(r) => write!(f, "After ShiftRows (Round {r})"),
            Step::MixColumns(r) => write!(f, "After MixColumns (Round {r})"),
            Step::AddRoundKey(r) => write!(f, "After AddRoundKey (Round {r})"),
        }
    }
}

/// Receives snapshots of the state while blocks are encrypted.
///
/// Both methods default to doing nothing. Observers only ever see copies; they
/// cannot influence the ciphertext.
pub trait CipherObserver {
    /// Called by the ECB driver before block `index` is encrypted.
    fn block_start(&mut self, _index: usize, _input: &Block) {}

    /// Called after each sub-step of the block cipher.
    fn step(&mut self, _step: Step, _state: &State) {}
}

impl CipherObserver for () {}

impl<O: CipherObserver + ?Sized> CipherObserver for &mut O {
    fn block_start(&mut self, index: usize, input: &Block) {
        (**self).block_start(index, input);
    }

    fn step(&mut self, step: Step, state: &State) {
        (**self).step(step, state);
    }
}

/// Observer that records every step; handy in tests and debugging tools.
#[derive(Clone, Debug, Default)]
pub struct StepRecorder {
    /// Recorded `(step, state)` pairs in order.
    pub steps: Vec<(Step, State)>,
}

impl CipherObserver for StepRecorder {
    fn step(&mut self, step: Step, state: &State) {
        self.steps.push((step, *state));
    }
}
