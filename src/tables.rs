/// Per-channel luma weights (R, G, B), summing to 254.
pub(crate) const LUMA_WEIGHTS: [u32; 3] = [76, 150, 28];

/// Per-channel error weights (R, G, B), summing to 128.
pub(crate) const ERROR_WEIGHTS: [u32; 3] = [38, 76, 14];

/// ETC1 intensity modifiers, in selector order: the selector's MSB picks
/// the sign, its LSB the magnitude.
#[rustfmt::skip]
pub(crate) static ETC1_MODIFIERS: [[i16; 4]; 8] = [
    [  2,   8,  -2,   -8 ],
    [  5,  17,  -5,  -17 ],
    [  9,  29,  -9,  -29 ],
    [ 13,  42, -13,  -42 ],
    [ 18,  60, -18,  -60 ],
    [ 24,  80, -24,  -80 ],
    [ 33, 106, -33, -106 ],
    [ 47, 183, -47, -183 ],
];

/// Paint color distances shared by the T and H modes.
pub(crate) static TH_DISTANCES: [i16; 8] = [3, 6, 11, 16, 23, 32, 41, 64];

pub(crate) const ETC2_ALPHA_MODIFIERS_MIN_INDEX: usize = 3;
pub(crate) const ETC2_ALPHA_MODIFIERS_MAX_INDEX: usize = 7;

#[rustfmt::skip]
pub(crate) const ETC2_ALPHA_MODIFIERS: [[i8; 8]; 16] = [
    [ -3, -6,  -9, -15, 2, 5, 8, 14 ],
    [ -3, -7, -10, -13, 2, 6, 9, 12 ],
    [ -2, -5,  -8, -13, 1, 4, 7, 12 ],
    [ -2, -4,  -6, -13, 1, 3, 5, 12 ],
    [ -3, -6,  -8, -12, 2, 5, 7, 11 ],
    [ -3, -7,  -9, -11, 2, 6, 8, 10 ],
    [ -4, -7,  -8, -11, 3, 6, 7, 10 ],
    [ -3, -5,  -8, -11, 2, 4, 7, 10 ],
    [ -2, -6,  -8, -10, 1, 5, 7,  9 ],
    [ -2, -5,  -8, -10, 1, 4, 7,  9 ],
    [ -2, -4,  -8, -10, 1, 3, 7,  9 ],
    [ -2, -5,  -7, -10, 1, 4, 6,  9 ],
    [ -3, -4,  -7, -10, 2, 3, 6,  9 ],
    [ -1, -2,  -3, -10, 0, 1, 2,  9 ],
    [ -4, -6,  -8,  -9, 3, 5, 7,  8 ],
    [ -3, -5,  -7,  -9, 2, 4, 6,  8 ],
];

/// `0x100FF / span` for every alpha modifier row, where span is the distance
/// between the row's smallest and largest modifier plus one. Multiplying a
/// block's alpha range by this and shifting right by 16 gives the row's
/// multiplier minus one.
pub(crate) static ETC2_ALPHA_RANGE: [u32; 16] = alpha_range_table();

const fn alpha_range_table() -> [u32; 16] {
    let mut table = [0u32; 16];
    let mut i = 0;
    while i < 16 {
        let row = ETC2_ALPHA_MODIFIERS[i];
        let span = 1 + row[ETC2_ALPHA_MODIFIERS_MAX_INDEX] as i32
            - row[ETC2_ALPHA_MODIFIERS_MIN_INDEX] as i32;
        table[i] = 0x100FF / span as u32;
        i += 1;
    }
    table
}

/// Escape bits OR-ed into the planar control word. Indexed by bit 5 of the
/// red origin, bit 5 of the green origin and bits 4..1 of the blue origin.
/// Each entry sets bit 1 (the differential bit) and forces the red and green
/// checks to stay in range while the blue one overflows.
pub(crate) static PLANAR_FLAGS: [u32; 64] = planar_flags_table();

const fn planar_flags_table() -> [u32; 64] {
    // Pattern of the blue escape across the 16 blue origin values.
    const BLUE_LOW: [bool; 16] = [
        false, false, false, false, false, false, false, true, false, false, true, true, false,
        true, true, true,
    ];
    const RED_GREEN: [u32; 4] = [0x8080_0000, 0x8000_0000, 0x0080_0000, 0x0000_0000];

    let mut table = [0u32; 64];
    let mut i = 0;
    while i < 64 {
        let blue = if BLUE_LOW[i % 16] { 0xE002 } else { 0x0402 };
        table[i] = RED_GREEN[i / 16] | blue;
        i += 1;
    }
    table
}

/// Penalty for T/H luma partitions that leave very few pixels on one side.
#[rustfmt::skip]
pub(crate) static TH_SPLIT_BONUS: [u32; 15] = [8, 4, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 4, 8];
