//! Tiles whose 16 pixels share one color.
//!
//! A single base color, modifier table and selector covers the whole tile,
//! so the search is over the base quantization only: for every modifier each
//! channel independently picks the base that lands closest.

use crate::{
    color::{extend_4_to_8, extend_5_to_8, extend_6_to_8, extend_7_to_8},
    metric::pixel_error,
    tables::ETC1_MODIFIERS,
    Color32,
};

use super::{planar, Candidate};

pub(crate) fn encode(color: Color32) -> Candidate {
    let color = color.with_alpha(255);

    let mut best = etc1_candidate(color, true);
    if best.error == 0 {
        return best;
    }
    let individual = etc1_candidate(color, false);
    if individual.error < best.error {
        best = individual;
    }
    if best.error == 0 {
        return best;
    }
    let flat = planar_candidate(color);
    if flat.error < best.error {
        best = flat;
    }
    best
}

/// Base channel value (in `bits` bits) whose expansion plus `modifier` is
/// closest to `target`, the lowest base on ties.
fn closest_base(target: u8, bits: u32, modifier: i16) -> (u8, u8) {
    let extend = if bits == 5 { extend_5_to_8 } else { extend_4_to_8 };
    let mut best = (0u8, 0u8, u8::MAX);
    for base in 0..(1u8 << bits) {
        let value = (extend(base) as i16 + modifier).clamp(0, 255) as u8;
        let diff = value.abs_diff(target);
        if diff < best.2 {
            best = (base, value, diff);
        }
    }
    (best.0, best.1)
}

/// Same base color in both halves, one table, one selector for all pixels.
fn etc1_candidate(color: Color32, differential: bool) -> Candidate {
    let bits = if differential { 5 } else { 4 };

    let mut best: Option<(u64, usize, usize, [u8; 3])> = None;
    for (table, modifiers) in ETC1_MODIFIERS.iter().enumerate() {
        for (selector, &modifier) in modifiers.iter().enumerate() {
            let mut base = [0u8; 3];
            let mut decoded = Color32::new(0, 0, 0, 255);
            for c in 0..3 {
                let (b, value) = closest_base(color[c], bits, modifier);
                base[c] = b;
                decoded[c] = value;
            }
            let error = pixel_error(color, decoded);
            if best.map_or(true, |(best_error, ..)| error < best_error) {
                best = Some((error, table, selector, base));
            }
        }
    }

    // The loops above always run, so `best` is set.
    let (error, table, selector, base) = best.unwrap_or_default();

    let mut control = 0u32;
    for (c, shift) in [24u32, 16, 8].into_iter().enumerate() {
        if differential {
            // zero delta
            control |= (base[c] as u32) << (shift + 3);
        } else {
            control |= (base[c] as u32) << (shift + 4) | (base[c] as u32) << shift;
        }
    }
    control |= (table as u32) << 5 | (table as u32) << 2;
    if differential {
        control |= 2;
    }

    let mut index_word = 0u32;
    if selector & 1 != 0 {
        index_word |= 0x0000_FFFF;
    }
    if selector & 2 != 0 {
        index_word |= 0xFFFF_0000;
    }

    Candidate {
        bits: (control as u64) << 32 | index_word as u64,
        error: error * 16,
    }
}

/// Planar block with all three corners equal.
fn planar_candidate(color: Color32) -> Candidate {
    fn closest(target: u8, extend: fn(u8) -> u8, bits: u32) -> (u8, u8) {
        (0..(1u8 << bits))
            .map(|v| (v, extend(v)))
            .min_by_key(|&(_, value)| value.abs_diff(target))
            .unwrap_or_default()
    }

    let (r, dr) = closest(color[0], extend_6_to_8, 6);
    let (g, dg) = closest(color[1], extend_7_to_8, 7);
    let (b, db) = closest(color[2], extend_6_to_8, 6);
    let corner = [r, g, b];
    Candidate {
        bits: planar::pack(corner, corner, corner),
        error: pixel_error(color, Color32::new(dr, dg, db, 255)) * 16,
    }
}
