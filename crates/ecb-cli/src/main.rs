//! Command-line pipeline that ECB-encrypts the pixel data of a BMP image so
//! the leaked structure can be inspected in any image viewer.

#![forbid(unsafe_code)]

mod trace;

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{bail, Context, Result};
use bmp_container::{read_container, synthesize_pattern, write_container};
use clap::{Parser, Subcommand};
use ecb_core::{encrypt_block, encrypt_ecb_observed, encrypt_ecb_parallel, KeySchedule};
use log::info;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::trace::StatePrinter;

const DEFAULT_KEY_HEX: &str = "000102030405060708090a0b0c0d0e0f";

/// ECB image encryption CLI.
#[derive(Parser)]
#[command(
    name = "ecbimg",
    version,
    author,
    about = "Encrypt BMP pixel data with AES-128 in ECB mode to expose pattern leakage"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt the pixel data of a BMP file, keeping its header intact.
    Encrypt {
        /// Input bitmap.
        #[arg(long, value_name = "FILE", default_value = "blackbuck.bmp")]
        input: PathBuf,
        /// Output bitmap.
        #[arg(long, value_name = "FILE", default_value = "encrypted.bmp")]
        output: PathBuf,
        /// AES-128 key as 32 hex characters.
        #[arg(long, value_name = "HEX", default_value = DEFAULT_KEY_HEX)]
        key_hex: String,
        /// Worker threads (defaults to available parallelism).
        #[arg(long)]
        threads: Option<NonZeroUsize>,
        /// Print every intermediate state for the first N blocks.
        #[arg(long, value_name = "N", default_value_t = 0)]
        trace_blocks: usize,
    },
    /// Synthesize a tiled bitmap, then write it and its ECB encryption.
    Demo {
        /// Where to write the plain synthetic bitmap.
        #[arg(long, value_name = "FILE", default_value = "pattern.bmp")]
        plain: PathBuf,
        /// Where to write the encrypted bitmap.
        #[arg(long, value_name = "FILE", default_value = "pattern-ecb.bmp")]
        output: PathBuf,
        /// Image width in pixels.
        #[arg(long, default_value_t = 256)]
        width: u32,
        /// Image height in pixels.
        #[arg(long, default_value_t = 192)]
        height: u32,
        /// Optional RNG seed for a reproducible random key.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Check the cipher against published known-answer vectors.
    Kat,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Encrypt {
            input,
            output,
            key_hex,
            threads,
            trace_blocks,
        } => cmd_encrypt(&input, &output, &key_hex, threads, trace_blocks),
        Commands::Demo {
            plain,
            output,
            width,
            height,
            seed,
        } => cmd_demo(&plain, &output, width, height, seed),
        Commands::Kat => cmd_kat(),
    }
}

fn cmd_encrypt(
    input: &Path,
    output: &Path,
    key_hex: &str,
    threads: Option<NonZeroUsize>,
    trace_blocks: usize,
) -> Result<()> {
    let schedule = parse_key_hex(key_hex)?;
    let image = read_container(input).with_context(|| format!("read {}", input.display()))?;
    info!(
        "read {}: {} header bytes, {} payload bytes",
        input.display(),
        image.header.len(),
        image.payload.len()
    );

    let ciphertext = if trace_blocks > 0 {
        let mut printer = StatePrinter::new(trace_blocks);
        encrypt_ecb_observed(&image.payload, &schedule, &mut printer)
    } else {
        let workers = threads.unwrap_or_else(default_workers);
        info!("encrypting with {} worker(s)", workers);
        encrypt_ecb_parallel(&image.payload, &schedule, workers)
    };

    write_container(output, &image.header, &ciphertext)
        .with_context(|| format!("write {}", output.display()))?;
    println!("encryption complete, encrypted image saved as {}", output.display());
    println!("open it next to the original: the patterns survive ECB mode");
    Ok(())
}

fn cmd_demo(
    plain_path: &Path,
    output: &Path,
    width: u32,
    height: u32,
    seed: Option<u64>,
) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key = [0u8; 16];
    rng.fill_bytes(&mut key);
    let schedule = KeySchedule::expand(&key).context("expand demo key")?;

    let image = synthesize_pattern(width, height).context("synthesize demo image")?;
    write_container(plain_path, &image.header, &image.payload)
        .with_context(|| format!("write {}", plain_path.display()))?;

    let ciphertext = encrypt_ecb_parallel(&image.payload, &schedule, default_workers());
    write_container(output, &image.header, &ciphertext)
        .with_context(|| format!("write {}", output.display()))?;

    println!("demo key: {}", hex::encode(key));
    println!("plain image: {}", plain_path.display());
    println!("encrypted image: {}", output.display());
    Ok(())
}

// (key, plaintext, ciphertext) from FIPS-197 and the all-zero reference.
const KNOWN_ANSWERS: [(&str, &str, &str); 3] = [
    (
        "000102030405060708090a0b0c0d0e0f",
        "00112233445566778899aabbccddeeff",
        "69c4e0d86a7b0430d8cdb78070b4c55a",
    ),
    (
        "2b7e151628aed2a6abf7158809cf4f3c",
        "3243f6a8885a308d313198a2e0370734",
        "3925841d02dc09fbdc118597196a0b32",
    ),
    (
        "00000000000000000000000000000000",
        "00000000000000000000000000000000",
        "66e94bd4ef8a2c3b884cfa59ca342b2e",
    ),
];

fn cmd_kat() -> Result<()> {
    let mut failures = 0;
    for (key_hex, plain_hex, expected_hex) in KNOWN_ANSWERS {
        let schedule = parse_key_hex(key_hex)?;
        let plain = parse_block_hex(plain_hex)?;
        let actual = hex::encode(encrypt_block(&plain, &schedule));
        let verdict = if actual == expected_hex { "ok" } else { "FAIL" };
        println!("{verdict:>4}  key={key_hex} pt={plain_hex} ct={actual}");
        if actual != expected_hex {
            failures += 1;
        }
    }
    if failures > 0 {
        bail!("{failures} known-answer vector(s) failed");
    }
    Ok(())
}

fn parse_key_hex(hex_str: &str) -> Result<KeySchedule> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    KeySchedule::expand(&bytes).context("AES-128 key must be 16 bytes (32 hex characters)")
}

fn parse_block_hex(hex_str: &str) -> Result<[u8; 16]> {
    let bytes = hex::decode(hex_str).context("decode block hex")?;
    match <[u8; 16]>::try_from(bytes.as_slice()) {
        Ok(block) => Ok(block),
        Err(_) => bail!("block must be 16 bytes, got {}", bytes.len()),
    }
}

fn default_workers() -> NonZeroUsize {
    thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
