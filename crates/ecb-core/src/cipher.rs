//! AES-128 key schedule and block encryption.

use log::debug;

use crate::block::Block;
use crate::key::{Aes128Key, CipherParams, KeySchedule};
use crate::round::{add_round_key, mix_columns, shift_rows, sub_bytes};
use crate::sbox::{round_constant, sbox};
use crate::trace::{CipherObserver, Step};

fn rot_word(word: u32) -> u32 {
    word.rotate_left(8)
}

fn sub_word(word: u32) -> u32 {
    u32::from_be_bytes(word.to_be_bytes().map(sbox))
}

/// Expands a 128-bit key into 11 round keys.
pub fn expand_key(key: &Aes128Key) -> KeySchedule {
    expand_with_params(&key.0, CipherParams::AES128)
}

/// Word-wise expansion for a key whose length already matched `params`.
pub(crate) fn expand_with_params(key: &[u8], params: CipherParams) -> KeySchedule {
    let nk = params.nk();
    debug_assert_eq!(key.len(), nk * 4);

    let mut w = vec![0u32; params.schedule_words()];
    for (word, chunk) in w.iter_mut().zip(key.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    for i in nk..w.len() {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            temp = sub_word(rot_word(temp)) ^ (u32::from(round_constant(i / nk)) << 24);
        }
        w[i] = w[i - nk] ^ temp;
    }

    let round_keys = w
        .chunks_exact(CipherParams::NB)
        .map(|words| {
            let mut round_key = [0u8; 16];
            for (dst, word) in round_key.chunks_exact_mut(4).zip(words) {
                dst.copy_from_slice(&word.to_be_bytes());
            }
            round_key
        })
        .collect();

    debug!(
        "expanded key schedule: nk={} nr={} bytes={}",
        nk,
        params.nr(),
        params.schedule_len()
    );
    KeySchedule::from_parts(params, round_keys)
}

/// Encrypts a single 16-byte block with a pre-expanded schedule.
pub fn encrypt_block(block: &Block, schedule: &KeySchedule) -> Block {
    encrypt_block_observed(block, schedule, &mut ())
}

/// Encrypts a single block, reporting the state to `observer` after every
/// sub-step. The result is identical to [`encrypt_block`].
pub fn encrypt_block_observed<O: CipherObserver + ?Sized>(
    block: &Block,
    schedule: &KeySchedule,
    observer: &mut O,
) -> Block {
    let nr = schedule.params().nr();
    let mut state = *block;
    observer.step(Step::Initial, &state);

    add_round_key(&mut state, schedule.round_key(0));
    observer.step(Step::AddRoundKey(0), &state);

    for round in 1..nr {
        sub_bytes(&mut state);
        observer.step(Step::SubBytes(round), &state);
        shift_rows(&mut state);
        observer.step(Step::ShiftRows(round), &state);
        mix_columns(&mut state);
        observer.step(Step::MixColumns(round), &state);
        add_round_key(&mut state, schedule.round_key(round));
        observer.step(Step::AddRoundKey(round), &state);
    }

    // Final round skips MixColumns.
    sub_bytes(&mut state);
    observer.step(Step::SubBytes(nr), &state);
    shift_rows(&mut state);
    observer.step(Step::ShiftRows(nr), &state);
    add_round_key(&mut state, schedule.round_key(nr));
    observer.step(Step::AddRoundKey(nr), &state);

    state
}
