//! T and H modes: two 4-4-4 base colors and a shared distance. T paints
//! one base as is and the other at three offsets, H paints both bases at two
//! offsets each. Both hide their payload around a base channel overflow
//! under the differential interpretation: red for T, green for H.

use crate::{
    color::color_4_to_8,
    decode::{h_paint_colors, packed_444, t_paint_colors},
    metric::pixel_error,
    selector::Selector,
    tables::TH_SPLIT_BONUS,
    Color32,
};

pub(crate) fn encode(pixels: &[Color32; 16]) -> u64 {
    let luma: [u8; 16] = core::array::from_fn(|i| pixels[i].luma());
    let mut order: [usize; 16] = core::array::from_fn(|i| i);
    order.sort_by_key(|&i| luma[i]);
    let sorted: [u8; 16] = core::array::from_fn(|i| luma[order[i]]);

    // Cut the sorted pixels in two, minimizing the luma range of both groups.
    let mut split = 0;
    let mut best_sum = u32::MAX;
    for i in 0..15 {
        let sum = (sorted[i] - sorted[0]) as u32
            + (sorted[15] - sorted[i + 1]) as u32
            + TH_SPLIT_BONUS[i];
        if sum < best_sum {
            best_sum = sum;
            split = i;
        }
    }

    let low_range = (sorted[split] - sorted[0]) as u32;
    let high_range = (sorted[15] - sorted[split + 1]) as u32;

    // T when one group is at least twice as compact as the other. With
    // `swap` the compact group is the bright one.
    let (t_mode, swap) = if low_range >= high_range {
        let t_mode = low_range >= high_range * 2;
        (t_mode, t_mode)
    } else {
        (low_range * 2 <= high_range, false)
    };

    let ends = [
        pixels[order[0]],
        pixels[order[split]],
        pixels[order[split + 1]],
        pixels[order[15]],
    ];

    let mid_point = |a: Color32, b: Color32| -> [u32; 3] {
        core::array::from_fn(|c| (a[c] as u32 + b[c] as u32) / 2)
    };
    let upper_mean = || -> [u32; 3] {
        let count = (15 - split) as u32;
        core::array::from_fn(|c| {
            order[split + 1..]
                .iter()
                .map(|&i| pixels[i][c] as u32)
                .sum::<u32>()
                / count
        })
    };

    let centers = if swap {
        [upper_mean(), mid_point(ends[0], ends[1])]
    } else if t_mode {
        [mid_point(ends[0], ends[1]), upper_mean()]
    } else {
        [mid_point(ends[0], ends[1]), mid_point(ends[2], ends[3])]
    };

    let spread = |a: Color32, b: Color32| -> i32 {
        (0..3).map(|c| b[c] as i32 - a[c] as i32).sum()
    };
    let average_distance = if !t_mode {
        (spread(ends[0], ends[1]) + spread(ends[2], ends[3])) / 12
    } else if swap {
        spread(ends[0], ends[1]) / 6
    } else {
        spread(ends[2], ends[3]) / 6
    };

    let start_distance = match average_distance {
        d if d < 0 => 4,
        0..=16 => 0,
        17..=23 => 1,
        24..=32 => 2,
        33..=41 => 3,
        _ => 4,
    };

    let quantize = |v: u32, min: u32, max: u32| (15 * (v + 8) / 255).clamp(min, max) as u8;
    let mut colors = [[0u8; 3]; 2];
    for c in 0..3 {
        colors[0][c] = if t_mode {
            quantize(centers[0][c], 0, 15)
        } else {
            quantize(centers[0][c], 1, 14)
        };
        colors[1][c] = quantize(centers[1][c], 1, 14);
    }

    let (distance, mut selector) = find_distance(pixels, colors, t_mode, start_distance);

    let control = if t_mode {
        let [r0, g0, b0] = colors[0].map(|c| c as u32);
        let [r1, g1, b1] = colors[1].map(|c| c as u32);
        let packed = r0 << 23
            | g0 << 19
            | b0 << 15
            | r1 << 11
            | g1 << 7
            | b1 << 3
            | (distance as u32 & 0b111);
        stuff_t(packed)
    } else {
        // The distance LSB is implied by the order of the two colors.
        if (packed_444(colors[0]) >= packed_444(colors[1])) ^ (distance & 1 == 1) {
            colors.swap(0, 1);
            selector.flip_ms_bits();
        }
        let [r0, g0, b0] = colors[0].map(|c| c as u32);
        let [r1, g1, b1] = colors[1].map(|c| c as u32);
        let packed = r0 << 22
            | g0 << 18
            | b0 << 14
            | r1 << 10
            | g1 << 6
            | b1 << 2
            | (distance as u32 >> 1 & 0b11);
        stuff_h(packed)
    };

    (control as u64) << 32 | selector.index_word() as u64
}

/// Scans the distances upward from `start`, stopping once the best one is
/// two steps behind.
fn find_distance(
    pixels: &[Color32; 16],
    colors: [[u8; 3]; 2],
    t_mode: bool,
    start: usize,
) -> (usize, Selector) {
    let c0 = color_4_to_8(colors[0]);
    let c1 = color_4_to_8(colors[1]);

    let mut best: Option<(u64, usize, Selector)> = None;
    for distance in start..8 {
        if let Some((_, best_distance, _)) = best {
            if distance >= 2 && best_distance == distance - 2 {
                break;
            }
        }

        let paint_colors = if t_mode {
            t_paint_colors(c0, c1, distance)
        } else {
            h_paint_colors(c0, c1, distance)
        };

        let mut error = 0;
        let mut selector = Selector::default();
        for (i, &pixel) in pixels.iter().enumerate() {
            let mut best_pixel = (0, u64::MAX);
            for (index, &paint) in paint_colors.iter().enumerate() {
                let e = pixel_error(pixel, paint);
                if e < best_pixel.1 {
                    best_pixel = (index, e);
                }
            }
            error += best_pixel.1;
            selector.set_selector(i % 4, i / 4, best_pixel.0 as u8);
        }

        if best.map_or(true, |(best_error, ..)| error < best_error) {
            best = Some((error, distance, selector));
        }
    }

    best.map(|(_, distance, selector)| (distance, selector))
        .unwrap_or_default()
}

/// Bit 0 of a 59-bit T payload (red, green, blue of both colors and a 3-bit
/// distance from bit 26 down) goes to the block as is, the rest is shifted
/// up by one with red 0 split around bit 26. The red channel under the
/// differential interpretation then overflows.
fn stuff_t(packed: u32) -> u32 {
    let r0_high = (packed >> 25) & 0b11;

    let mut control = packed << 1;
    control = (control & !(0b11 << 27)) | r0_high << 27;
    control = (control & !1) | (packed & 1);

    let overflow = overflow_padding(control, 28, 27, 25, 24);
    control = (control & !(0b111 << 29)) | overflow * 0b111 << 29;
    control = (control & !(1 << 26)) | (overflow ^ 1) << 26;

    control | 2
}

/// Spreads a 58-bit H payload around the green overflow escape bits and
/// keeps red in range.
fn stuff_h(packed: u32) -> u32 {
    let part0 = (packed >> 19) & 0x7F;
    let part1 = (packed >> 17) & 0b11;
    let part2 = (packed >> 1) & 0xFFFF;
    let part3 = packed & 1;

    let mut control = part0 << 24 | part1 << 19 | part2 << 2 | part3;

    // red in range
    let bit30 = (control >> 30) & 1;
    control = (control & !(1 << 31)) | (bit30 ^ 1) << 31;

    // green out of range
    let overflow = overflow_padding(control, 20, 19, 17, 16);
    control = (control & !(0b111 << 21)) | overflow * 0b111 << 21;
    control = (control & !(1 << 18)) | (overflow ^ 1) << 18;

    control | 2
}

/// Whether the escape bits of a channel must be set to ones (rather than
/// the guard bit) for the base plus delta to leave `0..=31`. Looks at the
/// low two bits of the base and of the delta.
fn overflow_padding(control: u32, a: u32, b: u32, c: u32, d: u32) -> u32 {
    let [a, b, c, d] = [a, b, c, d].map(|shift| (control >> shift) & 1);
    (a & c) | ((a ^ 1) & b & c & d) | (a & b & (c ^ 1) & d)
}
