//! Grayscale 48x48 face tensor

use image::{imageops, DynamicImage, GrayImage, ImageReader};
use std::io::Cursor;

/// Side length of the square classifier input.
pub const FACE_SIZE: u32 = 48;

/// Decode any supported format (sniffed from the bytes, not the filename)
/// and convert it to 8-bit luma.
pub fn decode_grayscale(data: &[u8]) -> Result<GrayImage, anyhow::Error> {
    let cursor = Cursor::new(data);
    let reader = ImageReader::new(cursor).with_guessed_format()?;
    let img: DynamicImage = reader.decode()?;
    Ok(img.to_luma8())
}

/// Row-major 48x48 pixels scaled to `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceTensor {
    pixels: Vec<f32>,
}

impl FaceTensor {
    /// Resize with bilinear filtering (aspect ratio is not preserved) and
    /// normalize by 255.
    pub fn from_gray(image: &GrayImage) -> Self {
        let resized = imageops::resize(image, FACE_SIZE, FACE_SIZE, imageops::FilterType::Triangle);
        let pixels = resized
            .as_raw()
            .iter()
            .map(|&p| p as f32 / 255.0)
            .collect();
        Self { pixels }
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, anyhow::Error> {
        Ok(Self::from_gray(&decode_grayscale(data)?))
    }

    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}
