//! Image processing module
//!
//! Decoding uploaded bytes to grayscale and shrinking them to the fixed face
//! tensor the classifier consumes.

pub mod face;

pub use face::{decode_grayscale, FaceTensor, FACE_SIZE};
