//! Constants shared across crates.

/// Format of `uploads.timestamp` (second precision, local clock).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Name of the multipart field carrying the uploaded image.
pub const IMAGE_FIELD: &str = "image";

/// Extensions accepted when `ALLOWED_EXTENSIONS` is not set.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Upper bound on sanitized filename length.
pub const MAX_FILENAME_LENGTH: usize = 255;
