use byteorder::{ByteOrder, BE};

use crate::{
    alpha::decode_alpha_bits,
    color::{color_4_to_8, color_5_to_8, extend_6_to_8, extend_7_to_8, offset_color},
    mask,
    selector::Selector,
    tables::{ETC1_MODIFIERS, TH_DISTANCES},
    Color32,
};

/// Interpretation of a color block. Not stored explicitly; derived from the
/// differential bit and from which 5-bit base channel overflows when the
/// delta is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorMode {
    Individual,
    Differential,
    T,
    H,
    Planar,
}

/// Returns the mode an ETC2 decoder will use for this color block.
pub fn color_block_mode(block: &[u8; 8]) -> ColorMode {
    mode_of(BE::read_u64(block))
}

/// Decodes a full ETC2 RGBA8 block (alpha block followed by color block)
/// into 16 row-major pixels. Every bit pattern decodes to something.
pub fn decode_block(block: &[u8; 16]) -> [Color32; 16] {
    let alpha = decode_alpha_bits(BE::read_u64(&block[0..8]));
    let mut pixels = decode_color_bits(BE::read_u64(&block[8..16]));
    for (pixel, &a) in pixels.iter_mut().zip(alpha.iter()) {
        pixel[3] = a;
    }
    pixels
}

/// Decodes an ETC2 RGB color block into 16 row-major opaque pixels.
pub fn decode_color_block(block: &[u8; 8]) -> [Color32; 16] {
    decode_color_bits(BE::read_u64(block))
}

#[inline]
fn field(word: u32, shift: u32, count: u32) -> u8 {
    ((word >> shift) & mask!(count)) as u8
}

/// Sign-extends a 3-bit two's complement delta.
#[inline]
fn delta3(v: u8) -> i8 {
    ((v << 5) as i8) >> 5
}

pub(crate) fn mode_of(bits: u64) -> ColorMode {
    let control = (bits >> 32) as u32;
    if control & 2 == 0 {
        return ColorMode::Individual;
    }
    let in_range = |shift: u32| {
        let base = field(control, shift + 3, 5) as i8;
        let delta = delta3(field(control, shift, 3));
        (0..32).contains(&(base + delta))
    };
    if !in_range(24) {
        ColorMode::T
    } else if !in_range(16) {
        ColorMode::H
    } else if !in_range(8) {
        ColorMode::Planar
    } else {
        ColorMode::Differential
    }
}

pub(crate) fn decode_color_bits(bits: u64) -> [Color32; 16] {
    let control = (bits >> 32) as u32;
    let index_word = bits as u32;
    match mode_of(bits) {
        ColorMode::Individual | ColorMode::Differential => decode_etc1(control, index_word),
        ColorMode::T => decode_t(control, index_word),
        ColorMode::H => decode_h(control, index_word),
        ColorMode::Planar => decode_planar(control, index_word),
    }
}

/// Individual and differential modes, two sub-blocks with their own base
/// color and modifier table.
fn decode_etc1(control: u32, index_word: u32) -> [Color32; 16] {
    let flip = control & 1 != 0;

    let base_colors = if control & 2 == 0 {
        [
            color_4_to_8([field(control, 28, 4), field(control, 20, 4), field(control, 12, 4)]),
            color_4_to_8([field(control, 24, 4), field(control, 16, 4), field(control, 8, 4)]),
        ]
    } else {
        let mut c0 = [0u8; 3];
        let mut c1 = [0u8; 3];
        for (i, shift) in [24, 16, 8].into_iter().enumerate() {
            c0[i] = field(control, shift + 3, 5);
            // In range, the mode check has already verified it.
            c1[i] = (c0[i] as i8 + delta3(field(control, shift, 3))) as u8;
        }
        [color_5_to_8(c0), color_5_to_8(c1)]
    };

    let tables = [field(control, 5, 3) as usize, field(control, 2, 3) as usize];

    let selector = Selector::from_index_word(index_word);
    let mut pixels = [Color32::default(); 16];
    for y in 0..4 {
        for x in 0..4 {
            let subblock = if flip { y / 2 } else { x / 2 };
            let modifier = ETC1_MODIFIERS[tables[subblock]][selector.get_selector(x, y)];
            pixels[y * 4 + x] = offset_color(base_colors[subblock], modifier);
        }
    }
    pixels
}

fn paint(index_word: u32, colors: &[Color32; 4]) -> [Color32; 16] {
    let selector = Selector::from_index_word(index_word);
    let mut pixels = [Color32::default(); 16];
    for y in 0..4 {
        for x in 0..4 {
            pixels[y * 4 + x] = colors[selector.get_selector(x, y)];
        }
    }
    pixels
}

pub(crate) fn t_paint_colors(c0: Color32, c1: Color32, distance: usize) -> [Color32; 4] {
    let d = TH_DISTANCES[distance];
    [c0, offset_color(c1, d), c1, offset_color(c1, -d)]
}

pub(crate) fn h_paint_colors(c0: Color32, c1: Color32, distance: usize) -> [Color32; 4] {
    let d = TH_DISTANCES[distance];
    [
        offset_color(c0, d),
        offset_color(c0, -d),
        offset_color(c1, d),
        offset_color(c1, -d),
    ]
}

fn decode_t(control: u32, index_word: u32) -> [Color32; 16] {
    let r0 = field(control, 27, 2) << 2 | field(control, 24, 2);
    let c0 = color_4_to_8([r0, field(control, 20, 4), field(control, 16, 4)]);
    let c1 = color_4_to_8([field(control, 12, 4), field(control, 8, 4), field(control, 4, 4)]);
    let distance = (field(control, 2, 2) << 1 | field(control, 0, 1)) as usize;
    paint(index_word, &t_paint_colors(c0, c1, distance))
}

/// Packs a 4-bit color as `0xRGB`, the ordering that carries the implicit
/// H mode distance bit.
pub(crate) fn packed_444(c: [u8; 3]) -> u16 {
    (c[0] as u16) << 8 | (c[1] as u16) << 4 | c[2] as u16
}

fn decode_h(control: u32, index_word: u32) -> [Color32; 16] {
    let c0 = [
        field(control, 27, 4),
        field(control, 24, 3) << 1 | field(control, 20, 1),
        field(control, 19, 1) << 3 | field(control, 15, 3),
    ];
    let c1 = [field(control, 11, 4), field(control, 7, 4), field(control, 3, 4)];
    let order_bit = (packed_444(c0) >= packed_444(c1)) as u8;
    let distance = (field(control, 2, 1) << 2 | field(control, 0, 1) << 1 | order_bit) as usize;
    paint(
        index_word,
        &h_paint_colors(color_4_to_8(c0), color_4_to_8(c1), distance),
    )
}

fn decode_planar(control: u32, index_word: u32) -> [Color32; 16] {
    let origin = [
        extend_6_to_8(field(control, 25, 6)),
        extend_7_to_8(field(control, 24, 1) << 6 | field(control, 17, 6)),
        extend_6_to_8(
            field(control, 16, 1) << 5 | field(control, 11, 2) << 3 | field(control, 7, 3),
        ),
    ];
    let horizontal = [
        extend_6_to_8(field(control, 2, 5) << 1 | field(control, 0, 1)),
        extend_7_to_8(field(index_word, 25, 7)),
        extend_6_to_8(field(index_word, 19, 6)),
    ];
    let vertical = [
        extend_6_to_8(field(index_word, 13, 6)),
        extend_7_to_8(field(index_word, 6, 7)),
        extend_6_to_8(field(index_word, 0, 6)),
    ];
    planar_pixels(origin, horizontal, vertical)
}

/// Bilinear extrapolation from the three corner colors. The corners are
/// already expanded to 8 bits.
pub(crate) fn planar_pixels(o: [u8; 3], h: [u8; 3], v: [u8; 3]) -> [Color32; 16] {
    let mut pixels = [Color32::default(); 16];
    for y in 0..4i32 {
        for x in 0..4i32 {
            let pixel = &mut pixels[(y * 4 + x) as usize];
            for c in 0..3 {
                let (o, h, v) = (o[c] as i32, h[c] as i32, v[c] as i32);
                let value = (x * (h - o) + y * (v - o) + 4 * o + 2) >> 2;
                pixel[c] = value.clamp(0, 255) as u8;
            }
            pixel[3] = 255;
        }
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_bits(control: u32, index_word: u32) -> u64 {
        (control as u64) << 32 | index_word as u64
    }

    #[test]
    fn test_delta3() {
        assert_eq!(delta3(0b000), 0);
        assert_eq!(delta3(0b011), 3);
        assert_eq!(delta3(0b100), -4);
        assert_eq!(delta3(0b111), -1);
    }

    #[test]
    fn test_individual() {
        // R 0x1/0x2, G 0x3/0x4, B 0x5/0x6, tables 0 and 7, no flip
        let control = 0x1234_5600 | 7 << 2;
        // every selector 0b01 (the large positive modifier)
        let bits = color_bits(control, 0x0000_FFFF);
        assert_eq!(mode_of(bits), ColorMode::Individual);
        let pixels = decode_color_bits(bits);
        for y in 0..4 {
            assert_eq!(pixels[y * 4], Color32::new(0x11 + 8, 0x33 + 8, 0x55 + 8, 255));
            assert_eq!(pixels[y * 4 + 3], Color32::new(0x22 + 183, 0x44 + 183, 255, 255));
        }
    }

    #[test]
    fn test_differential_flip() {
        // R 16 with delta -1, G 8 with delta +3, B 0 with delta 0, table 1 and 0, flipped
        let control = 16 << 27 | 0b111 << 24 | 8 << 19 | 0b011 << 16 | 1 << 5 | 0b11;
        let bits = color_bits(control, 0xFFFF_0000);
        assert_eq!(mode_of(bits), ColorMode::Differential);
        let pixels = decode_color_bits(bits);
        // selector 0b10 is the small negative modifier
        assert_eq!(pixels[0], Color32::new(132 - 5, 66 - 5, 0, 255));
        assert_eq!(pixels[3], Color32::new(132 - 5, 66 - 5, 0, 255));
        assert_eq!(pixels[15], Color32::new(123 - 2, 90 - 2, 0, 255));
    }

    #[test]
    fn test_mode_classification() {
        // red 0 with delta -1 overflows
        assert_eq!(mode_of(color_bits(0b111 << 24 | 2, 0)), ColorMode::T);
        // red 31 with delta +1 overflows
        assert_eq!(mode_of(color_bits(31 << 27 | 1 << 24 | 2, 0)), ColorMode::T);
        // green 0 with delta -4 overflows
        assert_eq!(mode_of(color_bits(0b100 << 16 | 2, 0)), ColorMode::H);
        // blue 30 with delta +2 overflows
        assert_eq!(mode_of(color_bits(30 << 11 | 2 << 8 | 2, 0)), ColorMode::Planar);
        // same fields without the differential bit
        assert_eq!(mode_of(color_bits(30 << 11 | 2 << 8, 0)), ColorMode::Individual);
    }

    #[test]
    fn test_t_mode() {
        // R0 = 0b1011 split over 28..27 and 25..24, red escape: bits 31..29 set, 26 clear
        let control = 0b111 << 29 | 0b10 << 27 | 0b11 << 24
            | 0x2 << 20 | 0x3 << 16 | 0x4 << 12 | 0x5 << 8 | 0x6 << 4
            | 0b01 << 2 | 2 | 1;
        assert_eq!(mode_of(color_bits(control, 0)), ColorMode::T);
        // selectors: pixel 0 -> 0, pixel 1 -> 1, pixel 2 -> 2, pixel 3 -> 3
        let index_word = 0b1100 << 16 | 0b1010;
        let pixels = decode_color_bits(color_bits(control, index_word));
        let d = TH_DISTANCES[0b011] as u8;
        let c1 = [0x44, 0x55, 0x66];
        assert_eq!(pixels[0], Color32::new(0xBB, 0x22, 0x33, 255));
        assert_eq!(pixels[4], Color32::new(c1[0] + d, c1[1] + d, c1[2] + d, 255));
        assert_eq!(pixels[8], Color32::new(c1[0], c1[1], c1[2], 255));
        assert_eq!(pixels[12], Color32::new(c1[0] - d, c1[1] - d, c1[2] - d, 255));
    }

    #[test]
    fn test_h_mode_distance_bit() {
        let c0 = [1u32, 2, 3];
        let c1 = [4u32, 5, 6];
        let control = c0[0] << 27
            | (c0[1] >> 1) << 24
            | (c0[1] & 1) << 20
            | (c0[2] >> 3) << 19
            | (c0[2] & 7) << 15
            | c1[0] << 11
            | c1[1] << 7
            | c1[2] << 3
            | 1 << 2
            | 2;
        // green 0 with delta -3 overflows
        let bits = color_bits(control | 1 << 18, 0);
        assert_eq!(mode_of(bits), ColorMode::H);

        // 0x123 < 0x456, so the implicit distance bit is 0 and the distance is 0b100
        let pixels = decode_color_bits(bits);
        assert_eq!(TH_DISTANCES[0b100], 23);
        assert_eq!(pixels[0], Color32::new(0x11 + 23, 0x22 + 23, 0x33 + 23, 255));

        // swapping the colors flips the implicit bit
        let swapped = c1[0] << 27
            | (c1[1] >> 1) << 24
            | (c1[1] & 1) << 20
            | (c1[2] >> 3) << 19
            | (c1[2] & 7) << 15
            | c0[0] << 11
            | c0[1] << 7
            | c0[2] << 3
            | 1 << 2
            | 2;
        // green 30 with delta +3 overflows
        let bits = color_bits(swapped | 0b111 << 21, 0);
        assert_eq!(mode_of(bits), ColorMode::H);
        let pixels = decode_color_bits(bits);
        assert_eq!(TH_DISTANCES[0b101], 32);
        assert_eq!(pixels[0], Color32::new(0x44 + 32, 0x55 + 32, 0x66 + 32, 255));
    }

    #[test]
    fn test_planar_constant() {
        // All corners 32 (6-bit) / 64 (7-bit) -> 130 / 129
        let ro = 32u32;
        let go = 64u32;
        let bo = 32u32;
        let control = ro << 25
            | (go >> 6) << 24
            | (go & 0x3F) << 17
            | (bo >> 5) << 16
            | ((bo >> 3) & 3) << 11
            | (bo & 7) << 7
            | (ro >> 1) << 2
            | (ro & 1);
        let index_word = 64 << 25 | 32 << 19 | 32 << 13 | 64 << 6 | 32;
        let control = control | crate::tables::PLANAR_FLAGS[32];
        let bits = color_bits(control, index_word);
        assert_eq!(mode_of(bits), ColorMode::Planar);
        for pixel in decode_color_bits(bits).iter() {
            assert_eq!(*pixel, Color32::new(130, 129, 130, 255));
        }
    }

    #[test]
    fn test_planar_gradient() {
        let pixels = planar_pixels([0, 0, 0], [255, 0, 0], [0, 0, 255]);
        assert_eq!(pixels[0], Color32::new(0, 0, 0, 255));
        assert_eq!(pixels[1], Color32::new(64, 0, 0, 255));
        assert_eq!(pixels[3], Color32::new(191, 0, 0, 255));
        assert_eq!(pixels[12], Color32::new(0, 0, 191, 255));
        assert_eq!(pixels[15], Color32::new(191, 0, 191, 255));
    }

    #[test]
    fn test_any_pattern_decodes() {
        let mut state = 0x2545_F491_4F6C_DD1Du64;
        for _ in 0..10_000 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let mut block = [0u8; 16];
            BE::write_u64(&mut block[0..8], state.rotate_left(17));
            BE::write_u64(&mut block[8..16], state);
            let pixels = decode_block(&block);
            let color = decode_color_block(block[8..16].try_into().unwrap());
            for (a, b) in pixels.iter().zip(color.iter()) {
                assert!(a.rgb_eq(*b));
            }
        }
    }
}
