//! Individual and differential (ETC1 compatible) modes.
//!
//! The tile is split into two 2×4 halves, vertically or horizontally. Each
//! half gets a base color from its average and its own modifier table, and
//! each pixel a 2-bit selector into that table.

use crate::{
    color::{color_4_to_8, color_5_to_8, offset_color},
    metric::pixel_error,
    selector::Selector,
    tables::ETC1_MODIFIERS,
    Color32,
};

use super::Candidate;

/// Half index of pixel (x, y): left/right without flip, top/bottom with.
#[inline]
fn half_of(x: usize, y: usize, flip: bool) -> usize {
    if flip {
        y / 2
    } else {
        x / 2
    }
}

/// Per-channel sums and rounded averages of the four possible halves:
/// left, right, top, bottom.
struct HalfAverages {
    sums: [[u32; 3]; 4],
    averages: [[u32; 3]; 4],
}

impl HalfAverages {
    fn new(pixels: &[Color32; 16]) -> Self {
        let mut sums = [[0u32; 3]; 4];
        for (i, pixel) in pixels.iter().enumerate() {
            let (x, y) = (i % 4, i / 4);
            for c in 0..3 {
                sums[half_of(x, y, false)][c] += pixel[c] as u32;
                sums[2 + half_of(x, y, true)][c] += pixel[c] as u32;
            }
        }
        let mut averages = [[0u32; 3]; 4];
        for (average, sum) in averages.iter_mut().zip(sums.iter()) {
            for c in 0..3 {
                average[c] = (sum[c] + 4) >> 3;
            }
        }
        Self { sums, averages }
    }
}

/// Rounds an 8-bit value to `bits` bits with the same bias the format's
/// reference encoders use.
#[inline]
fn quantize(value: u32, bits: u32) -> u8 {
    let t = value * ((1 << bits) - 1) + 128;
    ((t + (t >> 8)) >> 8) as u8
}

/// Base colors of one split before the per-pixel fit.
#[derive(Clone, Copy, Debug)]
struct Split {
    flip: bool,
    differential: bool,
    // Quantized base colors, 4 or 5 bits per channel. For differential
    // splits the second one is already clamped to a 3-bit delta.
    bases: [[u8; 3]; 2],
}

impl Split {
    fn new(averages: &HalfAverages, flip: bool, differential: bool) -> Self {
        let first = &averages.averages[if flip { 2 } else { 0 }];
        let second = &averages.averages[if flip { 3 } else { 1 }];

        let mut bases = [[0u8; 3]; 2];
        for c in 0..3 {
            if differential {
                let base = quantize(first[c], 5);
                let delta = (quantize(second[c], 5) as i8 - base as i8).clamp(-4, 3);
                bases[0][c] = base;
                bases[1][c] = (base as i8 + delta) as u8;
            } else {
                bases[0][c] = quantize(first[c], 4);
                bases[1][c] = quantize(second[c], 4);
            }
        }
        Self {
            flip,
            differential,
            bases,
        }
    }

    fn colors(&self) -> [Color32; 2] {
        if self.differential {
            [color_5_to_8(self.bases[0]), color_5_to_8(self.bases[1])]
        } else {
            [color_4_to_8(self.bases[0]), color_4_to_8(self.bases[1])]
        }
    }

    /// Cheap ranking of splits: the squared error of each half against its
    /// expanded base color, minus terms common to all splits.
    fn proxy_error(&self, averages: &HalfAverages) -> i64 {
        let sums = if self.flip {
            [averages.sums[2], averages.sums[3]]
        } else {
            [averages.sums[0], averages.sums[1]]
        };
        let mut error = 0;
        for (color, sum) in self.colors().iter().zip(sums.iter()) {
            for c in 0..3 {
                let v = color[c] as i64;
                error += 8 * v * v - 2 * v * sum[c] as i64;
            }
        }
        error
    }

    fn control_word(&self, tables: [usize; 2]) -> u32 {
        let mut control = 0u32;
        for (c, shift) in [24u32, 16, 8].into_iter().enumerate() {
            let [b0, b1] = [self.bases[0][c] as u32, self.bases[1][c] as u32];
            if self.differential {
                let delta = (b1 as i32 - b0 as i32) as u32 & 0b111;
                control |= b0 << (shift + 3) | delta << shift;
            } else {
                control |= b0 << (shift + 4) | b1 << shift;
            }
        }
        control |= (tables[0] as u32) << 5 | (tables[1] as u32) << 2;
        control |= (self.differential as u32) << 1 | self.flip as u32;
        control
    }
}

pub(crate) fn encode(pixels: &[Color32; 16]) -> Candidate {
    let averages = HalfAverages::new(pixels);

    let mut best_split = Split::new(&averages, false, false);
    let mut best_proxy = best_split.proxy_error(&averages);
    for (differential, flip) in [(false, true), (true, false), (true, true)] {
        let split = Split::new(&averages, flip, differential);
        let proxy = split.proxy_error(&averages);
        if proxy < best_proxy {
            best_split = split;
            best_proxy = proxy;
        }
    }

    fit_selectors(pixels, &best_split)
}

/// Picks the modifier table of each half and the selector of each pixel.
fn fit_selectors(pixels: &[Color32; 16], split: &Split) -> Candidate {
    let colors = split.colors();

    let mut tables = [0usize; 2];
    let mut selector = Selector::default();
    let mut total_error = 0;

    for (half, &base) in colors.iter().enumerate() {
        let mut best_error = u64::MAX;
        let mut best_table = 0;
        let mut best_selector = Selector::default();

        for (table, modifiers) in ETC1_MODIFIERS.iter().enumerate() {
            let candidates = modifiers.map(|m| offset_color(base, m));
            let mut error = 0;
            let mut table_selector = Selector::default();
            for y in 0..4 {
                for x in 0..4 {
                    if half_of(x, y, split.flip) != half {
                        continue;
                    }
                    let pixel = pixels[y * 4 + x];
                    let (index, nearest) = candidates
                        .iter()
                        .map(|&c| pixel_error(pixel, c))
                        .enumerate()
                        .fold((0, u64::MAX), |best, (i, e)| if e < best.1 { (i, e) } else { best });
                    error += nearest;
                    table_selector.set_selector(x, y, index as u8);
                }
            }
            if error < best_error {
                best_error = error;
                best_table = table;
                best_selector = table_selector;
            }
        }

        tables[half] = best_table;
        total_error += best_error;
        for y in 0..4 {
            for x in 0..4 {
                if half_of(x, y, split.flip) == half {
                    selector.set_selector(x, y, best_selector.get_selector(x, y) as u8);
                }
            }
        }
    }

    let control = split.control_word(tables);
    Candidate {
        bits: (control as u64) << 32 | selector.index_word() as u64,
        error: total_error,
    }
}
