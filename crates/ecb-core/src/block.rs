//! Block and state representation helpers.

/// Cipher block of 16 bytes.
pub type Block = [u8; 16];

/// Working state of one block, a 4×4 byte matrix in column-major order:
/// byte `column * 4 + row`.
pub type State = Block;

/// Block length in bytes.
pub const BLOCK_LEN: usize = 16;

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}
