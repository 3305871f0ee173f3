//! ETC2 color block encoder.
//!
//! Individual and differential encodings are always tried. Planar and T/H
//! are only tried for tiles whose luma range suggests they could win, unless
//! [`EncodeOptions::use_heuristics`] is off, in which case every mode is
//! tried. Each alternate candidate is scored by decoding its bits, so the
//! chosen block is always the lowest-error one among those attempted.

mod differential;
mod planar;
mod solid;
mod th;

use byteorder::{ByteOrder, BE};

use crate::{alpha::encode_alpha_bits, decode::decode_color_bits, metric::block_error, Color32};

/// Byte order of the pixels handed to the image level encoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChannelOrder {
    #[default]
    Rgba,
    Bgra,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EncodeOptions {
    /// Skip the planar and T/H searches for tiles whose luma range makes
    /// them unlikely to help. Turning this off is slower but never worse.
    pub use_heuristics: bool,
    /// Channel order of the source pixels. Decoding always produces RGBA.
    pub channel_order: ChannelOrder,
}

impl EncodeOptions {
    /// Tries every mode for every tile.
    pub const fn exhaustive() -> Self {
        Self {
            use_heuristics: false,
            channel_order: ChannelOrder::Rgba,
        }
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            use_heuristics: true,
            channel_order: ChannelOrder::Rgba,
        }
    }
}

/// Encodes 16 row-major pixels into an ETC2 RGBA8 block, the alpha block
/// followed by the color block.
pub fn encode_block(pixels: &[Color32; 16], options: &EncodeOptions) -> [u8; 16] {
    let mut alphas = [0u8; 16];
    for (alpha, pixel) in alphas.iter_mut().zip(pixels.iter()) {
        *alpha = pixel[3];
    }
    let mut block = [0u8; 16];
    BE::write_u64(&mut block[0..8], encode_alpha_bits(&alphas));
    BE::write_u64(&mut block[8..16], encode_color_bits(pixels, options));
    block
}

/// Encodes the RGB part of 16 row-major pixels into an ETC2 color block.
/// Alpha is ignored.
pub fn encode_color_block(pixels: &[Color32; 16], options: &EncodeOptions) -> [u8; 8] {
    let mut block = [0u8; 8];
    BE::write_u64(&mut block, encode_color_bits(pixels, options));
    block
}

/// An encoded color block together with its error against the source tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub bits: u64,
    pub error: u64,
}

impl Candidate {
    /// Scores `bits` by decoding them.
    pub fn from_bits(bits: u64, pixels: &[Color32; 16]) -> Self {
        Self {
            bits,
            error: block_error(pixels, &decode_color_bits(bits)),
        }
    }

    /// Keeps the earlier candidate on ties.
    fn keep_better(&mut self, other: Candidate) {
        if other.error < self.error {
            *self = other;
        }
    }
}

/// Which of the expensive modes are worth trying for a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ModeHint {
    Undecided,
    Planar,
    TH,
    Exhaustive,
}

impl ModeHint {
    const LOW_CONTRAST: f32 = 0.03;
    const CORNER_GRADIENT: f32 = 0.09;
    const HIGH_CONTRAST: f32 = 0.38;

    fn classify(pixels: &[Color32; 16]) -> Self {
        let mut min = (u8::MAX, 0);
        let mut max = (u8::MIN, 0);
        for (i, pixel) in pixels.iter().enumerate() {
            let luma = pixel.luma();
            if luma < min.0 {
                min = (luma, i);
            }
            if luma > max.0 {
                max = (luma, i);
            }
        }

        let range = max.0.saturating_sub(min.0) as f32 / 255.0;
        if range <= Self::LOW_CONTRAST {
            ModeHint::Planar
        } else if range <= Self::CORNER_GRADIENT {
            // Opposite corners hold the extremes, likely a smooth gradient.
            match (min.1, max.1) {
                (0, 15) | (15, 0) | (3, 12) | (12, 3) => ModeHint::Planar,
                _ => ModeHint::Undecided,
            }
        } else if range >= Self::HIGH_CONTRAST {
            ModeHint::TH
        } else {
            ModeHint::Undecided
        }
    }

    fn try_planar(self) -> bool {
        matches!(self, ModeHint::Planar | ModeHint::Exhaustive)
    }

    fn try_th(self) -> bool {
        matches!(self, ModeHint::TH | ModeHint::Exhaustive)
    }
}

pub(crate) fn encode_color_bits(pixels: &[Color32; 16], options: &EncodeOptions) -> u64 {
    let first = pixels[0];
    if pixels.iter().all(|p| p.rgb_eq(first)) {
        return solid::encode(first).bits;
    }

    let hint = if options.use_heuristics {
        ModeHint::classify(pixels)
    } else {
        ModeHint::Exhaustive
    };

    let mut best = differential::encode(pixels);
    if best.error == 0 {
        return best.bits;
    }
    if hint.try_planar() {
        best.keep_better(Candidate::from_bits(planar::encode(pixels), pixels));
    }
    if hint.try_th() {
        best.keep_better(Candidate::from_bits(th::encode(pixels), pixels));
    }
    best.bits
}
