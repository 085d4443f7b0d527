//! AES round transformations.
//!
//! Each function rewrites a column-major [`State`] in place.

use crate::block::{xor_in_place, Block, State};
use crate::gf::xtime;
use crate::sbox::sbox;

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut State) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
}

/// Performs ShiftRows in place: row `r` rotates left by `r` columns.
#[inline]
pub fn shift_rows(state: &mut State) {
    let mut tmp = [0u8; 16];
    tmp[0] = state[0];
    tmp[1] = state[5];
    tmp[2] = state[10];
    tmp[3] = state[15];

    tmp[4] = state[4];
    tmp[5] = state[9];
    tmp[6] = state[14];
    tmp[7] = state[3];

    tmp[8] = state[8];
    tmp[9] = state[13];
    tmp[10] = state[2];
    tmp[11] = state[7];

    tmp[12] = state[12];
    tmp[13] = state[1];
    tmp[14] = state[6];
    tmp[15] = state[11];

    *state = tmp;
}

// Circulant {02, 03, 01, 01}; {03}·a is xtime(a) ^ a.
fn mix_single_column(col: &mut [u8; 4]) {
    let [a0, a1, a2, a3] = *col;
    col[0] = xtime(a0) ^ (xtime(a1) ^ a1) ^ a2 ^ a3;
    col[1] = a0 ^ xtime(a1) ^ (xtime(a2) ^ a2) ^ a3;
    col[2] = a0 ^ a1 ^ xtime(a2) ^ (xtime(a3) ^ a3);
    col[3] = (xtime(a0) ^ a0) ^ a1 ^ a2 ^ xtime(a3);
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut State) {
    for column in state.chunks_exact_mut(4) {
        let mut col = [column[0], column[1], column[2], column[3]];
        mix_single_column(&mut col);
        column.copy_from_slice(&col);
    }
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: &mut State, round_key: &Block) {
    xor_in_place(state, round_key);
}
