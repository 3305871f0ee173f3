use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use png::{BitDepth, ColorType, Decoder, Encoder};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// RGBA test image made of 16×16 patches: smooth gradients, noise and a
/// flat color with striped alpha.
pub fn synthetic_image(width: u32, height: u32) -> Vec<u8> {
    let mut state = 0x9E37_79B9u32;
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let pixel = match (x / 16 + y / 16) % 3 {
                0 => [(x * 4) as u8, (y * 4) as u8, 128, 255],
                1 => state.to_le_bytes(),
                _ => [200, 60, 30, if x % 2 == 0 { 255 } else { 0 }],
            };
            data.extend_from_slice(&pixel);
        }
    }
    data
}

pub fn tiles(pixels: &[u8], width: u32) -> Vec<[etc2::Color32; 16]> {
    let row_bytes = width as usize * 4;
    let mut result = Vec::new();
    for lines in pixels.chunks_exact(row_bytes * 4) {
        for tile_x in 0..width as usize / 4 {
            result.push(std::array::from_fn(|i| {
                let offset = (i / 4) * row_bytes + (tile_x * 4 + i % 4) * 4;
                let mut rgba = [0u8; 4];
                rgba.copy_from_slice(&lines[offset..offset + 4]);
                etc2::Color32(rgba)
            }));
        }
    }
    result
}

pub fn save_png<P: AsRef<Path>>(path: P, width: u32, height: u32, data: &[u8]) -> Result<()> {
    let file = File::create(path)?;
    let w = BufWriter::new(file);

    let mut encoder = Encoder::new(w, width, height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(data)?;
    Ok(())
}

pub fn load_png<P: AsRef<Path>>(path: P) -> Result<etc2::Image<u8>> {
    let decoder = Decoder::new(File::open(path)?);
    let mut reader = decoder.read_info()?;
    let mut data = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut data)?;
    data.truncate(info.buffer_size());
    Ok(etc2::Image {
        w: info.width,
        h: info.height,
        data,
    })
}
