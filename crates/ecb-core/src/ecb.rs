//! Electronic Codebook mode over arbitrary-length payloads.
//!
//! The payload is cut into 16-byte blocks that are encrypted independently
//! under the same schedule. A trailing partial block is zero-filled for the
//! transform and truncated back to its original length afterwards, so output
//! length always equals input length. No inverse is provided: this driver
//! exists to show what ECB leaks, not to carry data.

use std::num::NonZeroUsize;
use std::thread;

use log::{debug, trace};

use crate::block::BLOCK_LEN;
use crate::cipher::encrypt_block_observed;
use crate::key::KeySchedule;
use crate::trace::CipherObserver;

/// Number of blocks, counting a trailing partial block, in `len` bytes.
#[inline]
pub fn block_count(len: usize) -> usize {
    (len + BLOCK_LEN - 1) / BLOCK_LEN
}

/// Encrypts `payload` in ECB mode and returns a ciphertext of the same length.
pub fn encrypt_ecb(payload: &[u8], schedule: &KeySchedule) -> Vec<u8> {
    encrypt_ecb_observed(payload, schedule, &mut ())
}

/// Like [`encrypt_ecb`], reporting each block and cipher step to `observer`.
pub fn encrypt_ecb_observed<O: CipherObserver + ?Sized>(
    payload: &[u8],
    schedule: &KeySchedule,
    observer: &mut O,
) -> Vec<u8> {
    let mut out = payload.to_vec();
    log_layout(out.len());
    encrypt_blocks(&mut out, 0, schedule, observer);
    out
}

/// Encrypts `data` in place in ECB mode.
pub fn encrypt_ecb_in_place(data: &mut [u8], schedule: &KeySchedule) {
    log_layout(data.len());
    encrypt_blocks(data, 0, schedule, &mut ());
}

/// Encrypts `payload` across up to `workers` scoped threads.
///
/// Each worker owns a disjoint, block-aligned slice of the output, so the
/// result is byte-identical to [`encrypt_ecb`].
pub fn encrypt_ecb_parallel(
    payload: &[u8],
    schedule: &KeySchedule,
    workers: NonZeroUsize,
) -> Vec<u8> {
    let mut out = payload.to_vec();
    let blocks = block_count(out.len());
    log_layout(out.len());
    if blocks == 0 {
        return out;
    }

    let per_worker = block_count_per_worker(blocks, workers.get());
    let span = per_worker * BLOCK_LEN;
    thread::scope(|scope| {
        for (worker, range) in out.chunks_mut(span).enumerate() {
            scope.spawn(move || {
                trace!("worker {worker}: {} bytes", range.len());
                encrypt_blocks(range, worker * per_worker, schedule, &mut ());
            });
        }
    });
    out
}

fn block_count_per_worker(blocks: usize, workers: usize) -> usize {
    (blocks + workers - 1) / workers
}

fn log_layout(len: usize) {
    debug!(
        "ecb payload: {} bytes, {} blocks, {} byte tail",
        len,
        block_count(len),
        len % BLOCK_LEN
    );
}

// `first_index` is the payload-wide index of the first block in `data`.
fn encrypt_blocks<O: CipherObserver + ?Sized>(
    data: &mut [u8],
    first_index: usize,
    schedule: &KeySchedule,
    observer: &mut O,
) {
    for (offset, chunk) in data.chunks_mut(BLOCK_LEN).enumerate() {
        let len = chunk.len();
        let mut block = [0u8; BLOCK_LEN];
        block[..len].copy_from_slice(chunk);
        observer.block_start(first_index + offset, &block);
        let ct = encrypt_block_observed(&block, schedule, observer);
        chunk.copy_from_slice(&ct[..len]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::cipher::encrypt_block;
    use crate::trace::Step;
    use proptest::prelude::*;

    fn schedule(key: [u8; 16]) -> KeySchedule {
        KeySchedule::expand(&key).unwrap()
    }

    #[test]
    fn seventeen_byte_payload_keeps_length() {
        let ks = schedule(*b"YELLOW SUBMARINE");
        let payload: Vec<u8> = (0..17u8).collect();
        let out = encrypt_ecb(&payload, &ks);
        assert_eq!(out.len(), 17);

        let first: Block = payload[..16].try_into().unwrap();
        assert_eq!(out[..16], encrypt_block(&first, &ks));
        let mut tail = [0u8; 16];
        tail[0] = payload[16];
        assert_eq!(out[16], encrypt_block(&tail, &ks)[0]);
    }

    #[test]
    fn empty_payload() {
        let ks = schedule([0u8; 16]);
        assert!(encrypt_ecb(&[], &ks).is_empty());
        let workers = NonZeroUsize::new(4).unwrap();
        assert!(encrypt_ecb_parallel(&[], &ks, workers).is_empty());
        assert_eq!(block_count(0), 0);
        assert_eq!(block_count(16), 1);
        assert_eq!(block_count(17), 2);
    }

    #[test]
    fn all_zero_payload_repeats_known_block() {
        let ks = schedule([0u8; 16]);
        let out = encrypt_ecb(&[0u8; 48], &ks);
        let expected = hex::decode("66e94bd4ef8a2c3b884cfa59ca342b2e").unwrap();
        for chunk in out.chunks(16) {
            assert_eq!(chunk, &expected[..]);
        }
    }

    #[test]
    fn in_place_matches_copying_driver() {
        let ks = schedule(*b"0123456789abcdef");
        let payload: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let mut data = payload.clone();
        encrypt_ecb_in_place(&mut data, &ks);
        assert_eq!(data, encrypt_ecb(&payload, &ks));
    }

    #[derive(Default)]
    struct Counter {
        blocks: Vec<(usize, Block)>,
        finals: usize,
    }

    impl CipherObserver for Counter {
        fn block_start(&mut self, index: usize, input: &Block) {
            self.blocks.push((index, *input));
        }

        fn step(&mut self, step: Step, _state: &Block) {
            if step == Step::AddRoundKey(10) {
                self.finals += 1;
            }
        }
    }

    #[test]
    fn observer_sees_padded_blocks_in_order() {
        let ks = schedule([3u8; 16]);
        let payload = [0xabu8; 35];
        let mut counter = Counter::default();
        let out = encrypt_ecb_observed(&payload, &ks, &mut counter);

        assert_eq!(out, encrypt_ecb(&payload, &ks));
        assert_eq!(counter.finals, 3);
        let indices: Vec<usize> = counter.blocks.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        let mut padded = [0u8; 16];
        padded[..3].copy_from_slice(&[0xab; 3]);
        assert_eq!(counter.blocks[2].1, padded);
    }

    proptest! {
        #[test]
        fn output_length_equals_input_length(
            key in any::<[u8; 16]>(),
            payload in proptest::collection::vec(any::<u8>(), 0..200),
        ) {
            let out = encrypt_ecb(&payload, &schedule(key));
            prop_assert_eq!(out.len(), payload.len());
        }

        #[test]
        fn identical_blocks_leak_identical_ciphertext(
            key in any::<[u8; 16]>(),
            repeated in any::<[u8; 16]>(),
            filler in proptest::collection::vec(any::<[u8; 16]>(), 0..6),
            tail in proptest::collection::vec(any::<u8>(), 0..16),
        ) {
            let mut payload = Vec::new();
            payload.extend_from_slice(&repeated);
            for block in &filler {
                payload.extend_from_slice(block);
            }
            let second = payload.len();
            payload.extend_from_slice(&repeated);
            payload.extend_from_slice(&tail);

            let out = encrypt_ecb(&payload, &schedule(key));
            prop_assert_eq!(&out[..16], &out[second..second + 16]);
        }

        #[test]
        fn permuting_blocks_permutes_ciphertext(
            key in any::<[u8; 16]>(),
            blocks in proptest::collection::vec(any::<[u8; 16]>(), 1..8),
            shift in 0usize..8,
        ) {
            let ks = schedule(key);
            let mut rotated = blocks.clone();
            let shift = shift % blocks.len();
            rotated.rotate_left(shift);

            let out = encrypt_ecb(&blocks.concat(), &ks);
            let out_rotated = encrypt_ecb(&rotated.concat(), &ks);

            let mut expected: Vec<&[u8]> = out.chunks(16).collect();
            expected.rotate_left(shift);
            prop_assert_eq!(expected.concat(), out_rotated);
        }

        #[test]
        fn parallel_matches_sequential(
            key in any::<[u8; 16]>(),
            payload in proptest::collection::vec(any::<u8>(), 0..400),
            workers in 1usize..9,
        ) {
            let ks = schedule(key);
            let workers = NonZeroUsize::new(workers).unwrap();
            prop_assert_eq!(
                encrypt_ecb_parallel(&payload, &ks, workers),
                encrypt_ecb(&payload, &ks)
            );
        }
    }
}
