/// A tile with its expected block under the default options and with every
/// mode tried. Blocks are written as one big-endian number, alpha block
/// first.
pub struct BlockTestCase {
    pub name: &'static str,
    pub pixels: [[u8; 4]; 16],
    pub fast: u128,
    pub exhaustive: u128,
}

impl BlockTestCase {
    pub fn tile(&self) -> [etc2::Color32; 16] {
        self.pixels.map(etc2::Color32)
    }
}

pub const TEST_DATA_BLOCKS: &[BlockTestCase] = &[
    BlockTestCase {
        name: "gradient",
        pixels: [
            [0, 0, 0, 255], [84, 84, 84, 255], [168, 168, 168, 255], [252, 252, 252, 255],
            [0, 0, 0, 255], [84, 84, 84, 255], [168, 168, 168, 255], [252, 252, 252, 255],
            [0, 0, 0, 255], [84, 84, 84, 255], [168, 168, 168, 255], [252, 252, 252, 255],
            [0, 0, 0, 255], [84, 84, 84, 255], [168, 168, 168, 255], [252, 252, 252, 255],
        ],
        fast: 0xFF00000000000000_2C2C2CF80F0FF000,
        exhaustive: 0xFF00000000000000_2C2C2CF80F0FF000,
    },
    BlockTestCase {
        name: "outlier",
        pixels: [
            [10, 10, 10, 255], [10, 10, 10, 255], [10, 10, 10, 255], [10, 10, 10, 255],
            [10, 10, 10, 255], [255, 0, 0, 255], [10, 10, 10, 255], [10, 10, 10, 255],
            [10, 10, 10, 255], [10, 10, 10, 255], [10, 10, 10, 255], [10, 10, 10, 255],
            [10, 10, 10, 255], [10, 10, 10, 255], [10, 10, 10, 255], [10, 10, 10, 255],
        ],
        fast: 0xFF00000000000000_2C08084200FF00DF,
        exhaustive: 0xFF00000000000000_FB001113FFDFFFDF,
    },
    BlockTestCase {
        name: "smooth",
        pixels: [
            [40, 100, 200, 255], [56, 100, 190, 255], [72, 100, 180, 255], [88, 100, 170, 255],
            [40, 108, 190, 255], [56, 108, 180, 255], [72, 108, 170, 255], [88, 108, 160, 255],
            [40, 116, 180, 255], [56, 116, 170, 255], [72, 116, 160, 255], [88, 116, 150, 255],
            [40, 124, 170, 255], [56, 124, 160, 255], [72, 124, 150, 255], [88, 124, 140, 255],
        ],
        fast: 0xFF00000000000000_946514B665395067,
        exhaustive: 0xFF00000000000000_946514B665395067,
    },
    BlockTestCase {
        name: "halves",
        pixels: [
            [136, 17, 17, 255], [136, 17, 17, 255], [34, 153, 238, 128], [34, 153, 238, 128],
            [136, 17, 17, 255], [136, 17, 17, 255], [34, 153, 238, 128], [34, 153, 238, 128],
            [136, 17, 17, 255], [136, 17, 17, 255], [34, 153, 238, 128], [34, 153, 238, 128],
            [136, 17, 17, 255], [136, 17, 17, 255], [34, 153, 238, 128], [34, 153, 238, 128],
        ],
        fast: 0xBF8EFFFFFF492492_82191E0000000000,
        exhaustive: 0xBF8EFFFFFF492492_069E811200FF0000,
    },
    BlockTestCase {
        name: "noise",
        pixels: [
            [165, 77, 202, 24], [37, 48, 187, 29], [109, 19, 44, 222], [214, 35, 123, 46],
            [217, 30, 63, 114], [31, 203, 25, 113], [23, 68, 148, 214], [73, 60, 157, 92],
            [52, 96, 190, 49], [32, 30, 105, 254], [218, 160, 238, 232], [185, 153, 127, 92],
            [124, 41, 153, 253], [175, 229, 147, 37], [60, 214, 84, 175], [77, 250, 215, 20],
        ],
        fast: 0x89CA61743ADB544B_15DC657F335F4552,
        exhaustive: 0x89CA61743ADB544B_15DC657F335F4552,
    },
    BlockTestCase {
        name: "clusters",
        pixels: [
            [20, 30, 40, 0], [30, 40, 50, 85], [200, 210, 220, 170], [210, 220, 230, 255],
            [20, 30, 40, 0], [30, 40, 50, 85], [200, 210, 220, 170], [210, 220, 230, 255],
            [20, 30, 40, 0], [30, 40, 50, 85], [200, 210, 220, 170], [210, 220, 230, 255],
            [20, 30, 40, 0], [30, 40, 50, 85], [200, 210, 220, 170], [210, 220, 230, 255],
        ],
        fast: 0x7FA36DB249DB6FFF_1C2D3D200F0F0F00,
        exhaustive: 0x7FA36DB249DB6FFF_1C2D3D200F0F0F00,
    },
];
