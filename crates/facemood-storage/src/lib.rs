//! Facemood Storage Library
//!
//! Content store for uploaded images. Keys are sanitized filenames stored flat
//! inside one upload directory; writing an existing key overwrites it.
//!
//! A key must be a single plain file name: no separators, no `.` or `..`.

pub mod local;
pub mod traits;

// Re-export commonly used types
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
