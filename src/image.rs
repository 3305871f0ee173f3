//! Whole images: a raster of 4×4 tiles, each stored as a 16 byte record
//! (alpha block, then color block) in left-to-right, top-to-bottom order.
//!
//! Work is split into bands of [`BAND_TILE_ROWS`] tile rows. With the
//! `rayon` feature the bands are processed in parallel; the output is the
//! same either way.

use alloc::{vec, vec::Vec};

use log::{debug, trace};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::{decode_block, encode_block, ChannelOrder, Color32, EncodeOptions, Error, Result};

/// Bytes per encoded tile.
pub const BLOCK_SIZE: usize = 16;

/// Tile rows per unit of work, 32 pixel lines.
pub const BAND_TILE_ROWS: usize = 8;

const TILE: usize = 4;
const CHANNELS: usize = 4;

pub struct Image<T> {
    pub w: u32,
    pub h: u32,
    pub data: Vec<T>,
}

impl Image<Color32> {
    pub fn into_rgba_bytes(self) -> Image<u8> {
        Image {
            w: self.w,
            h: self.h,
            data: Color32::into_rgba_bytes(self.data),
        }
    }
}

impl Image<u8> {
    /// Encodes tightly packed 8-bit pixels, in the channel order given by
    /// `options`.
    pub fn encode(&self, options: &EncodeOptions) -> Result<BlockData> {
        let data = encode_with_options(&self.data, self.w, self.h, options)?;
        Ok(BlockData {
            w: self.w,
            h: self.h,
            data,
        })
    }
}

/// An encoded image: the block stream together with its dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockData {
    w: u32,
    h: u32,
    data: Vec<u8>,
}

impl BlockData {
    /// Wraps an existing block stream, checking that it matches the
    /// dimensions.
    pub fn new(w: u32, h: u32, data: Vec<u8>) -> Result<Self> {
        let expected = compressed_size(w, h)?;
        if data.len() != expected {
            return Err(Error::InvalidInputLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { w, h, data })
    }

    pub fn width(&self) -> u32 {
        self.w
    }

    pub fn height(&self) -> u32 {
        self.h
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Decodes to tightly packed RGBA pixels.
    pub fn decode(&self) -> Image<u8> {
        let mut data = vec![0u8; self.w as usize * self.h as usize * CHANNELS];
        decode_bands(&self.data, self.w as usize, &mut data);
        Image {
            w: self.w,
            h: self.h,
            data,
        }
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 || width % TILE as u32 != 0 || height % TILE as u32 != 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Size in bytes of the block stream for a `width`×`height` image.
pub fn compressed_size(width: u32, height: u32) -> Result<usize> {
    check_dimensions(width, height)?;
    Ok((width as usize / TILE) * (height as usize / TILE) * BLOCK_SIZE)
}

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::InvalidInputLength { expected, actual });
    }
    Ok(())
}

fn check_output(needed: usize, actual: usize) -> Result<()> {
    if actual < needed {
        return Err(Error::OutputBufferTooSmall { needed, actual });
    }
    Ok(())
}

/// Encodes row-major RGBA pixels with the default options.
pub fn encode(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    encode_with_options(pixels, width, height, &EncodeOptions::default())
}

pub fn encode_with_options(
    pixels: &[u8],
    width: u32,
    height: u32,
    options: &EncodeOptions,
) -> Result<Vec<u8>> {
    let mut blocks = vec![0u8; compressed_size(width, height)?];
    encode_into(pixels, width, height, options, &mut blocks)?;
    Ok(blocks)
}

/// Encodes into a caller-provided buffer, which may be larger than needed.
pub fn encode_into(
    pixels: &[u8],
    width: u32,
    height: u32,
    options: &EncodeOptions,
    out: &mut [u8],
) -> Result<()> {
    let size = compressed_size(width, height)?;
    check_len(width as usize * height as usize * CHANNELS, pixels.len())?;
    check_output(size, out.len())?;

    debug!(
        "Encoding {}x{} image, {} bands, heuristics {}",
        width,
        height,
        (height as usize / TILE).div_ceil(BAND_TILE_ROWS),
        options.use_heuristics
    );

    encode_bands(pixels, width as usize, options, &mut out[..size]);
    Ok(())
}

/// Encodes a horizontal strip of whole tile rows. `pixels` holds a multiple
/// of 4 full lines of `width` pixels, `out` receives the strip's blocks.
pub fn encode_band(
    pixels: &[u8],
    width: u32,
    options: &EncodeOptions,
    out: &mut [u8],
) -> Result<()> {
    let height = lines_in(pixels.len(), width)?;
    let size = compressed_size(width, height)?;
    check_output(size, out.len())?;

    encode_tiles(pixels, width as usize, options, &mut out[..size]);
    Ok(())
}

/// Number of full lines in a band, rejecting partial lines.
fn lines_in(len: usize, width: u32) -> Result<u32> {
    let row_bytes = width as usize * CHANNELS;
    if row_bytes == 0 {
        return Err(Error::InvalidDimensions { width, height: 0 });
    }
    if len % row_bytes != 0 {
        return Err(Error::InvalidInputLength {
            expected: len.div_ceil(row_bytes) * row_bytes,
            actual: len,
        });
    }
    Ok((len / row_bytes) as u32)
}

fn encode_bands(pixels: &[u8], width: usize, options: &EncodeOptions, out: &mut [u8]) {
    let band_pixels = width * CHANNELS * TILE * BAND_TILE_ROWS;
    let band_blocks = width / TILE * BLOCK_SIZE * BAND_TILE_ROWS;

    #[cfg(feature = "rayon")]
    let bands = out
        .par_chunks_mut(band_blocks)
        .zip(pixels.par_chunks(band_pixels));
    #[cfg(not(feature = "rayon"))]
    let bands = out.chunks_mut(band_blocks).zip(pixels.chunks(band_pixels));

    bands.enumerate().for_each(|(band, (out, pixels))| {
        trace!("Encoding band {}", band);
        encode_tiles(pixels, width, options, out);
    });
}

fn encode_tiles(pixels: &[u8], width: usize, options: &EncodeOptions, out: &mut [u8]) {
    let row_bytes = width * CHANNELS;
    let row_blocks = width / TILE * BLOCK_SIZE;

    for (lines, out) in pixels
        .chunks_exact(row_bytes * TILE)
        .zip(out.chunks_exact_mut(row_blocks))
    {
        for (tile_x, block) in out.chunks_exact_mut(BLOCK_SIZE).enumerate() {
            let tile = load_tile(lines, row_bytes, tile_x, options.channel_order);
            block.copy_from_slice(&encode_block(&tile, options));
        }
    }
}

fn load_tile(lines: &[u8], row_bytes: usize, tile_x: usize, order: ChannelOrder) -> [Color32; 16] {
    core::array::from_fn(|i| {
        let (x, y) = (i % TILE, i / TILE);
        let offset = y * row_bytes + (tile_x * TILE + x) * CHANNELS;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&lines[offset..offset + CHANNELS]);
        match order {
            ChannelOrder::Rgba => Color32(bytes),
            ChannelOrder::Bgra => Color32::from_bgra(bytes),
        }
    })
}

/// Decodes a block stream to row-major RGBA pixels.
pub fn decode(blocks: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut pixels = vec![0u8; width as usize * height as usize * CHANNELS];
    decode_into(blocks, width, height, &mut pixels)?;
    Ok(pixels)
}

/// Decodes into a caller-provided buffer, which may be larger than needed.
pub fn decode_into(blocks: &[u8], width: u32, height: u32, out: &mut [u8]) -> Result<()> {
    check_len(compressed_size(width, height)?, blocks.len())?;
    let needed = width as usize * height as usize * CHANNELS;
    check_output(needed, out.len())?;

    debug!("Decoding {}x{} image", width, height);

    decode_bands(blocks, width as usize, &mut out[..needed]);
    Ok(())
}

/// Decodes the blocks of whole tile rows of a `width` pixel wide image.
/// Returns the number of pixel lines written.
pub fn decode_band(blocks: &[u8], width: u32, out: &mut [u8]) -> Result<u32> {
    check_dimensions(width, TILE as u32)?;
    let row_blocks = width as usize / TILE * BLOCK_SIZE;
    if blocks.is_empty() || blocks.len() % row_blocks != 0 {
        return Err(Error::InvalidInputLength {
            expected: blocks.len().div_ceil(row_blocks).max(1) * row_blocks,
            actual: blocks.len(),
        });
    }
    let lines = blocks.len() / row_blocks * TILE;
    let needed = lines * width as usize * CHANNELS;
    check_output(needed, out.len())?;

    decode_tiles(blocks, width as usize, &mut out[..needed]);
    Ok(lines as u32)
}

fn decode_bands(blocks: &[u8], width: usize, out: &mut [u8]) {
    let band_pixels = width * CHANNELS * TILE * BAND_TILE_ROWS;
    let band_blocks = width / TILE * BLOCK_SIZE * BAND_TILE_ROWS;

    #[cfg(feature = "rayon")]
    let bands = out
        .par_chunks_mut(band_pixels)
        .zip(blocks.par_chunks(band_blocks));
    #[cfg(not(feature = "rayon"))]
    let bands = out.chunks_mut(band_pixels).zip(blocks.chunks(band_blocks));

    bands.enumerate().for_each(|(band, (out, blocks))| {
        trace!("Decoding band {}", band);
        decode_tiles(blocks, width, out);
    });
}

fn decode_tiles(blocks: &[u8], width: usize, out: &mut [u8]) {
    let row_bytes = width * CHANNELS;
    let row_blocks = width / TILE * BLOCK_SIZE;

    for (row, lines) in blocks
        .chunks_exact(row_blocks)
        .zip(out.chunks_exact_mut(row_bytes * TILE))
    {
        for (tile_x, block) in row.chunks_exact(BLOCK_SIZE).enumerate() {
            let mut bytes = [0u8; BLOCK_SIZE];
            bytes.copy_from_slice(block);
            let tile = decode_block(&bytes);
            for (i, pixel) in tile.iter().enumerate() {
                let (x, y) = (i % TILE, i / TILE);
                let offset = y * row_bytes + (tile_x * TILE + x) * CHANNELS;
                lines[offset..offset + CHANNELS].copy_from_slice(&pixel.0);
            }
        }
    }
}
