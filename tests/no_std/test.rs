#![no_std]

use etc2::{compressed_size, decode_block, encode_block, Color32, EncodeOptions, Result};

pub fn round_trip(pixels: &[Color32; 16]) -> [Color32; 16] {
    decode_block(&encode_block(pixels, &EncodeOptions::default()))
}

pub fn band_bytes(width: u32) -> Result<usize> {
    compressed_size(width, 4 * etc2::BAND_TILE_ROWS as u32)
}
