//! Facemood Processing Library
//!
//! Upload validation, grayscale face preprocessing and emotion classification.
//! The tract-backed classifier lives behind the `onnx` feature and the
//! FER-2013 preparation tooling behind `dataset`.

pub mod classifier;
pub mod image;
pub mod upload;

#[cfg(feature = "dataset")]
pub mod dataset;

// Re-export commonly used types
pub use classifier::{argmax, classify_image, ClassIndex, Classifier};
pub use image::{decode_grayscale, FaceTensor, FACE_SIZE};
pub use upload::{sanitize_filename, UploadValidator, ValidationError};

#[cfg(feature = "onnx")]
pub use classifier::onnx::{InputLayout, OnnxClassifier};

#[cfg(feature = "dataset")]
pub use dataset::{prepare_fer2013, DatasetSplits, SplitStrategy};
