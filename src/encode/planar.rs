//! Planar mode: three corner colors (origin, horizontal, vertical) in
//! 6-7-6 bits, fitted to the tile by least squares.

use crate::{tables::PLANAR_FLAGS, Color32};

/// Sample coordinates of the fit, centered on the tile.
const COORDS: [i32; 4] = [-255, -85, 85, 255];

pub(crate) fn encode(pixels: &[Color32; 16]) -> u64 {
    let mut sum = [0i32; 3];
    for pixel in pixels.iter() {
        for c in 0..3 {
            sum[c] += pixel[c] as i32;
        }
    }

    let mut dx = [0i32; 3];
    let mut dy = [0i32; 3];
    for (i, pixel) in pixels.iter().enumerate() {
        let (x, y) = (i % 4, i / 4);
        for c in 0..3 {
            let d = ((pixel[c] as i32) << 4) - sum[c];
            dx[c] += d * COORDS[x];
            dy[c] += d * COORDS[y];
        }
    }

    let scale = -4.0f32 / ((255.0 * 255.0 * 8.0 + 85.0 * 85.0 * 8.0) * 16.0);

    let mut origin = [0.0f32; 3];
    let mut horizontal = [0.0f32; 3];
    let mut vertical = [0.0f32; 3];
    for c in 0..3 {
        let a = dx[c] as f32 * scale;
        let b = dy[c] as f32 * scale;
        let d = sum[c] as f32 * 0.25;
        origin[c] = a * 255.0 + (b * 255.0 + d);
        horizontal[c] = a * -425.0 + (b * 255.0 + d);
        vertical[c] = a * 255.0 + (b * -425.0 + d);
    }

    let quantize = |v: [f32; 3]| [convert6(v[0]), convert7(v[1]), convert6(v[2])];
    pack(quantize(origin), quantize(horizontal), quantize(vertical))
}

/// Quantizes a corner channel scaled by 4 to 6 bits.
fn convert6(f: f32) -> u8 {
    let i = ((f as i32).clamp(0, 1023) - 15) >> 1;
    ((i + 11 - ((i + 11) >> 7) - ((i + 4) >> 7)) >> 3) as u8
}

/// Quantizes a corner channel scaled by 4 to 7 bits.
fn convert7(f: f32) -> u8 {
    let i = ((f as i32).clamp(0, 1023) - 15) >> 1;
    ((i + 9 - ((i + 9) >> 8) - ((i + 6) >> 8)) >> 2) as u8
}

/// Packs quantized corners (6-bit red and blue, 7-bit green) into a color
/// block. The escape bits make the blue channel overflow under the
/// differential interpretation while red and green stay in range.
pub(crate) fn pack(o: [u8; 3], h: [u8; 3], v: [u8; 3]) -> u64 {
    let [or, og, ob] = o.map(|c| c as u32);
    let [hr, hg, hb] = h.map(|c| c as u32);
    let [vr, vg, vb] = v.map(|c| c as u32);

    let mut control = or << 25;
    control |= (og & 0x40) << 18 | (og & 0x3F) << 17;
    control |= (ob & 0x20) << 11 | (ob & 0x18) << 8 | (ob & 0x07) << 7;
    control |= (hr & 0x3E) << 1 | (hr & 1);
    control |= PLANAR_FLAGS[((or & 0x20) | (og & 0x20) >> 1 | (ob & 0x1E) >> 1) as usize];

    let index_word = hg << 25 | hb << 19 | vr << 13 | vg << 6 | vb;

    (control as u64) << 32 | index_word as u64
}
