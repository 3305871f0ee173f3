use alloc::{fmt, vec, vec::Vec};
use core::ops::{Index, IndexMut};

use crate::tables::LUMA_WEIGHTS;

#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Color32(pub [u8; 4]);

impl Color32 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub const fn from_bgra(bgra: [u8; 4]) -> Self {
        Self([bgra[2], bgra[1], bgra[0], bgra[3]])
    }

    pub fn into_rgba_bytes(data: Vec<Self>) -> Vec<u8> {
        let mut result = vec![0u8; data.len() * 4];

        for (chunk, color) in result.chunks_exact_mut(4).zip(data.into_iter()) {
            chunk.copy_from_slice(&color.0);
        }

        result
    }

    pub fn to_rgba_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    pub fn from_rgba_u32(rgba: u32) -> Self {
        Color32(rgba.to_be_bytes())
    }

    /// Same RGB, different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self([self.0[0], self.0[1], self.0[2], a])
    }

    pub fn rgb_eq(self, other: Self) -> bool {
        self.0[..3] == other.0[..3]
    }

    /// Integer luma used by the mode heuristics and the T/H partitioning.
    /// The weights sum to 254, so the result stays in `0..=255`.
    pub fn luma(self) -> u8 {
        let sum: u32 = self.0[..3]
            .iter()
            .zip(LUMA_WEIGHTS.iter())
            .map(|(&c, &w)| c as u32 * w)
            .sum();
        (sum / 254) as u8
    }
}

impl fmt::Debug for Color32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:08X}", self.to_rgba_u32())
    }
}

impl Index<usize> for Color32 {
    type Output = u8;
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl IndexMut<usize> for Color32 {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.0[i]
    }
}

pub(crate) fn extend_4_to_8(x: u8) -> u8 {
    (x << 4) | x
}

pub(crate) fn extend_5_to_8(x: u8) -> u8 {
    (x << 3) | (x >> 2)
}

pub(crate) fn extend_6_to_8(x: u8) -> u8 {
    (x << 2) | (x >> 4)
}

pub(crate) fn extend_7_to_8(x: u8) -> u8 {
    (x << 1) | (x >> 6)
}

pub(crate) fn color_4_to_8(color4: [u8; 3]) -> Color32 {
    Color32::new(
        extend_4_to_8(color4[0]),
        extend_4_to_8(color4[1]),
        extend_4_to_8(color4[2]),
        255,
    )
}

pub(crate) fn color_5_to_8(color5: [u8; 3]) -> Color32 {
    Color32::new(
        extend_5_to_8(color5[0]),
        extend_5_to_8(color5[1]),
        extend_5_to_8(color5[2]),
        255,
    )
}

/// Adds `offset` to every color channel, saturating at 0 and 255.
pub(crate) fn offset_color(base: Color32, offset: i16) -> Color32 {
    Color32::new(
        (base[0] as i16 + offset).clamp(0, 255) as u8,
        (base[1] as i16 + offset).clamp(0, 255) as u8,
        (base[2] as i16 + offset).clamp(0, 255) as u8,
        255,
    )
}
