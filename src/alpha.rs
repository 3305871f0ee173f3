//! EAC alpha blocks: an 8-bit base, a 4-bit multiplier, a 4-bit modifier row
//! and a 3-bit modifier index for each pixel.

use byteorder::{ByteOrder, BE};

use crate::{
    tables::{ETC2_ALPHA_MODIFIERS, ETC2_ALPHA_RANGE},
    Color32,
};

/// Encodes the alpha channel of a tile into an EAC alpha block.
pub fn encode_alpha_block(pixels: &[Color32; 16]) -> [u8; 8] {
    let mut alphas = [0u8; 16];
    for (alpha, pixel) in alphas.iter_mut().zip(pixels.iter()) {
        *alpha = pixel[3];
    }
    let mut block = [0u8; 8];
    BE::write_u64(&mut block, encode_alpha_bits(&alphas));
    block
}

/// Decodes an EAC alpha block into 16 row-major alpha values.
pub fn decode_alpha_block(block: &[u8; 8]) -> [u8; 16] {
    decode_alpha_bits(BE::read_u64(block))
}

// Bit position of the 3-bit index of pixel (x, y). Pixels are numbered
// top to bottom within each column, the first one is the most significant.
#[inline]
fn index_shift(x: usize, y: usize) -> u32 {
    45 - 3 * (x * 4 + y) as u32
}

pub(crate) fn encode_alpha_bits(alphas: &[u8; 16]) -> u64 {
    let first = alphas[0];
    if alphas.iter().all(|&a| a == first) {
        // Multiplier 0 reconstructs the base for every index.
        return (first as u64) << 56;
    }

    let (min, max) = alphas
        .iter()
        .fold((u8::MAX, u8::MIN), |(min, max), &a| (min.min(a), max.max(a)));
    let range = (max - min) as u32;
    let base = min as i32 + (range >> 1) as i32;

    let mut best_error = u32::MAX;
    let mut best_row = 0;
    let mut best_multiplier = 0;
    for (row, modifiers) in ETC2_ALPHA_MODIFIERS.iter().enumerate() {
        let multiplier = row_multiplier(range, row);
        let values = row_values(base, multiplier, modifiers);
        let error: u32 = alphas
            .iter()
            .map(|&a| nearest_value(&values, a).1)
            .sum();
        if error < best_error {
            best_error = error;
            best_row = row;
            best_multiplier = multiplier;
            if error == 0 {
                break;
            }
        }
    }

    let values = row_values(base, best_multiplier, &ETC2_ALPHA_MODIFIERS[best_row]);
    let mut indices = 0u64;
    for y in 0..4 {
        for x in 0..4 {
            let (index, _) = nearest_value(&values, alphas[y * 4 + x]);
            indices |= (index as u64) << index_shift(x, y);
        }
    }

    (base as u64) << 56 | (best_multiplier as u64) << 52 | (best_row as u64) << 48 | indices
}

fn row_multiplier(range: u32, row: usize) -> i32 {
    (((range * ETC2_ALPHA_RANGE[row]) >> 16) + 1).min(15) as i32
}

fn row_values(base: i32, multiplier: i32, modifiers: &[i8; 8]) -> [u8; 8] {
    let mut values = [0u8; 8];
    for (value, &modifier) in values.iter_mut().zip(modifiers.iter()) {
        *value = (base + modifier as i32 * multiplier).clamp(0, 255) as u8;
    }
    values
}

/// Index and squared error of the closest value, the lowest index on ties.
fn nearest_value(values: &[u8; 8], alpha: u8) -> (usize, u32) {
    let mut best = (0, u32::MAX);
    for (i, &value) in values.iter().enumerate() {
        let diff = value.abs_diff(alpha) as u32;
        let error = diff * diff;
        if error < best.1 {
            best = (i, error);
        }
    }
    best
}

pub(crate) fn decode_alpha_bits(bits: u64) -> [u8; 16] {
    let base = (bits >> 56) as i32;
    let multiplier = ((bits >> 52) & 0xF) as i32;
    let modifiers = &ETC2_ALPHA_MODIFIERS[((bits >> 48) & 0xF) as usize];

    let mut alphas = [0u8; 16];
    for y in 0..4 {
        for x in 0..4 {
            let index = ((bits >> index_shift(x, y)) & 0b111) as usize;
            let value = base + modifiers[index] as i32 * multiplier;
            alphas[y * 4 + x] = value.clamp(0, 255) as u8;
        }
    }
    alphas
}
