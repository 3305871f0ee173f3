//! ETC2 RGBA8 texture block codec.
//!
//! Every 4×4 tile of an RGBA image becomes a 16 byte record: an 8 byte EAC
//! alpha block followed by an 8 byte ETC2 color block. The color encoder
//! searches the individual, differential, planar, T and H modes and keeps
//! the one with the lowest luma-weighted error.
//!
//! ```
//! let pixels = vec![128u8; 8 * 8 * 4];
//! let blocks = etc2::encode(&pixels, 8, 8).unwrap();
//! assert_eq!(blocks.len(), etc2::compressed_size(8, 8).unwrap());
//!
//! let decoded = etc2::decode(&blocks, 8, 8).unwrap();
//! assert_eq!(decoded, pixels);
//! ```

#![no_std]
#![warn(clippy::all)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod alpha;
mod color;
mod decode;
mod encode;
mod error;
mod image;
mod metric;
mod selector;
mod tables;

pub use alpha::{decode_alpha_block, encode_alpha_block};
pub use color::Color32;
pub use decode::{color_block_mode, decode_block, decode_color_block, ColorMode};
pub use encode::{encode_block, encode_color_block, ChannelOrder, EncodeOptions};
pub use error::{Error, Result};
pub use image::{
    compressed_size, decode, decode_band, decode_into, encode, encode_band, encode_into,
    encode_with_options, BlockData, Image, BAND_TILE_ROWS, BLOCK_SIZE,
};
pub use metric::{block_error, pixel_error};

#[doc(hidden)]
#[macro_export]
macro_rules! mask {
    ($size:expr) => {
        !(!($size ^ $size)).checked_shl($size as u32).unwrap_or(0)
    };
}
