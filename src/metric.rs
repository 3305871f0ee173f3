use crate::{tables::ERROR_WEIGHTS, Color32};

/// Luma-weighted squared distance between the RGB parts of two colors.
/// Alpha is ignored.
#[inline]
pub fn pixel_error(a: Color32, b: Color32) -> u64 {
    let weighted: u32 = a.0[..3]
        .iter()
        .zip(b.0[..3].iter())
        .zip(ERROR_WEIGHTS.iter())
        .map(|((&a, &b), &w)| a.abs_diff(b) as u32 * w)
        .sum();
    let weighted = weighted as u64;
    weighted * weighted
}

/// Sum of [`pixel_error`] over a tile.
pub fn block_error(a: &[Color32; 16], b: &[Color32; 16]) -> u64 {
    a.iter().zip(b.iter()).map(|(&a, &b)| pixel_error(a, b)).sum()
}
