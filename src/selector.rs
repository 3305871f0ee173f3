/// 2-bit per pixel selectors of an ETC color block.
///
/// ETC indexes pixels from top to bottom within each column, and stores the
/// two bits of each selector in separate 16-bit planes of the index word:
/// the LS bit of pixel `p` goes to bit `p`, the MS bit to bit `16 + p`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Selector {
    // Plain selectors (2-bits per value), one byte for each row
    selectors: [u8; 4],

    // Selectors in ETC format, ready to become the low half of a block
    index_word: u32,
}

impl Selector {
    pub fn from_index_word(index_word: u32) -> Self {
        let mut selector = Self::default();
        for y in 0..4 {
            for x in 0..4 {
                let pixel_id = x * 4 + y;
                let ls = (index_word >> pixel_id) & 1;
                let ms = (index_word >> (16 + pixel_id)) & 1;
                selector.set_selector(x, y, (ms << 1 | ls) as u8);
            }
        }
        selector
    }

    pub fn index_word(&self) -> u32 {
        self.index_word
    }

    // Returned selector value ranges from 0-3 and is a direct index into the
    // modifier or paint color table of the block.
    pub fn get_selector(&self, x: usize, y: usize) -> usize {
        assert!(x < 4);
        assert!(y < 4);

        let shift = 2 * x;
        let val = (self.selectors[y] >> shift) & 0b11;
        val as usize
    }

    pub fn set_selector(&mut self, x: usize, y: usize, val: u8) {
        assert!(x < 4);
        assert!(y < 4);
        assert!(val < 4);

        // Pack the two-bit value into the byte for the appropriate row
        let shift = 2 * x;
        self.selectors[y] &= !(0b11 << shift);
        self.selectors[y] |= val << shift;

        let pixel_id = x * 4 + y;
        let ls_bit = 1u32 << pixel_id;
        let ms_bit = 1u32 << (16 + pixel_id);

        self.index_word &= !(ls_bit | ms_bit);
        if val & 1 != 0 {
            self.index_word |= ls_bit;
        }
        if val & 2 != 0 {
            self.index_word |= ms_bit;
        }
    }

    /// Flips the MS bit of every selector.
    pub fn flip_ms_bits(&mut self) {
        for row in self.selectors.iter_mut() {
            *row ^= 0b1010_1010;
        }
        self.index_word ^= 0xFFFF_0000;
    }
}
