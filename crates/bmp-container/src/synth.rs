//! Synthetic test images with large flat regions.

use crate::container::{Container, HEADER_LEN, SIGNATURE};
use crate::error::{ContainerError, Result};

const BITS_PER_PIXEL: u16 = 24;
const PIXELS_PER_METRE: u32 = 2835;

// BGR
const PALETTE: [[u8; 3]; 6] = [
    [0xff, 0xff, 0xff],
    [0x20, 0x20, 0x20],
    [0x30, 0x60, 0xe0],
    [0x40, 0xc0, 0x40],
    [0xe0, 0x90, 0x20],
    [0x90, 0x30, 0xa0],
];

/// Builds a 24-bit bottom-up bitmap of flat colour tiles.
///
/// Uniform regions are exactly what ECB fails to hide: after encryption the
/// tile outlines remain visible. Zero dimensions are clamped to one pixel.
/// Fails with [`ContainerError::TooLarge`] when the file size would not fit
/// in the header's 32-bit size field.
pub fn synthesize_pattern(width: u32, height: u32) -> Result<Container> {
    let width = width.max(1);
    let height = height.max(1);
    let image_size = pixel_array_len(width, height)
        .ok_or(ContainerError::TooLarge { width, height })?;
    let row_len = image_size as usize / height as usize;
    let tile_w = (width / 4).max(1);
    let tile_h = (height / 3).max(1);

    let mut payload = vec![0u8; row_len * height as usize];
    for (y, row) in payload.chunks_exact_mut(row_len).enumerate() {
        let tile_row = y as u32 / tile_h;
        for x in 0..width {
            let tile = (x / tile_w + tile_row) as usize % PALETTE.len();
            let at = x as usize * 3;
            row[at..at + 3].copy_from_slice(&PALETTE[tile]);
        }
    }

    Ok(Container {
        header: bitmap_header(width, height, image_size),
        payload,
    })
}

// Padded pixel array length, if header plus pixels stays within u32.
fn pixel_array_len(width: u32, height: u32) -> Option<u32> {
    let row_len = (u64::from(width) * 3 + 3) & !3;
    let total = row_len.checked_mul(u64::from(height))?;
    let limit = u64::from(u32::MAX) - HEADER_LEN as u64;
    if total > limit {
        return None;
    }
    u32::try_from(total).ok()
}

fn bitmap_header(width: u32, height: u32, image_size: u32) -> Vec<u8> {
    let mut header = Vec::with_capacity(HEADER_LEN);
    // BITMAPFILEHEADER
    header.extend_from_slice(&SIGNATURE);
    header.extend_from_slice(&(HEADER_LEN as u32 + image_size).to_le_bytes());
    header.extend_from_slice(&0u32.to_le_bytes());
    header.extend_from_slice(&(HEADER_LEN as u32).to_le_bytes());
    // BITMAPINFOHEADER
    header.extend_from_slice(&40u32.to_le_bytes());
    header.extend_from_slice(&width.to_le_bytes());
    header.extend_from_slice(&height.to_le_bytes());
    header.extend_from_slice(&1u16.to_le_bytes());
    header.extend_from_slice(&BITS_PER_PIXEL.to_le_bytes());
    header.extend_from_slice(&0u32.to_le_bytes());
    header.extend_from_slice(&image_size.to_le_bytes());
    header.extend_from_slice(&PIXELS_PER_METRE.to_le_bytes());
    header.extend_from_slice(&PIXELS_PER_METRE.to_le_bytes());
    header.extend_from_slice(&0u32.to_le_bytes());
    header.extend_from_slice(&0u32.to_le_bytes());
    debug_assert_eq!(header.len(), HEADER_LEN);
    header
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_describes_payload() {
        let image = synthesize_pattern(10, 3).unwrap();
        assert_eq!(image.header.len(), HEADER_LEN);
        // 10 px * 3 bytes = 30, padded to 32 per row
        assert_eq!(image.payload.len(), 32 * 3);
        let bytes = image.to_bytes();
        assert_eq!(
            u32::from_le_bytes(bytes[2..6].try_into().unwrap()) as usize,
            bytes.len()
        );
        assert_eq!(Container::parse(&bytes).unwrap(), image);
    }

    #[test]
    fn first_pixel_uses_first_colour() {
        let image = synthesize_pattern(64, 64).unwrap();
        assert_eq!(&image.payload[..3], &PALETTE[0]);
    }

    #[test]
    fn zero_dimensions_are_clamped() {
        let image = synthesize_pattern(0, 0).unwrap();
        assert_eq!(image.payload.len(), 4);
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        for (width, height) in [(u32::MAX, u32::MAX), (40_000, 40_000), (u32::MAX, 1)] {
            assert!(matches!(
                synthesize_pattern(width, height),
                Err(ContainerError::TooLarge { .. })
            ));
        }
        // Large, but header plus pixels still fits in 32 bits.
        assert_eq!(pixel_array_len(37_836, 37_836), Some(113_508 * 37_836));
    }
}
