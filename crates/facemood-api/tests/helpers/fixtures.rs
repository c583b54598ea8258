//! Test fixtures: encoded images, stub classifiers and a failing store.

use async_trait::async_trait;
use facemood_processing::{Classifier, FaceTensor};
use facemood_storage::{Storage, StorageError, StorageResult};
use image::{DynamicImage, ImageBuffer, ImageFormat, Luma};
use std::io::Cursor;

/// Grayscale gradient PNG of the given size.
pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Png)
}

pub fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Jpeg)
}

fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = ImageBuffer::from_fn(width, height, |x, y| Luma([((x + y) % 256) as u8]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(img)
        .write_to(&mut buf, format)
        .expect("Failed to encode test image");
    buf.into_inner()
}

/// Always scores the given class highest out of `classes`.
pub struct FixedClassifier {
    pub winner: usize,
    pub classes: usize,
}

impl FixedClassifier {
    pub fn new(winner: usize) -> Self {
        Self {
            winner,
            classes: (winner + 1).max(7),
        }
    }
}

impl Classifier for FixedClassifier {
    fn name(&self) -> &str {
        "fixed"
    }

    fn scores(&self, face: &FaceTensor) -> Result<Vec<f32>, anyhow::Error> {
        assert_eq!(face.len(), 48 * 48);
        let mut scores = vec![0.0; self.classes];
        scores[self.winner] = 1.0;
        Ok(scores)
    }
}

pub struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn name(&self) -> &str {
        "failing"
    }

    fn scores(&self, _face: &FaceTensor) -> Result<Vec<f32>, anyhow::Error> {
        Err(anyhow::anyhow!("tensor shape mismatch"))
    }
}

pub struct PanickingClassifier;

impl Classifier for PanickingClassifier {
    fn name(&self) -> &str {
        "panicking"
    }

    fn scores(&self, _face: &FaceTensor) -> Result<Vec<f32>, anyhow::Error> {
        panic!("model exploded")
    }
}

/// Storage whose writes always fail.
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn upload(&self, _key: &str, _data: Vec<u8>) -> StorageResult<String> {
        Err(StorageError::UploadFailed("disk full".to_string()))
    }

    async fn download(&self, key: &str) -> StorageResult<Vec<u8>> {
        Err(StorageError::NotFound(key.to_string()))
    }
}
