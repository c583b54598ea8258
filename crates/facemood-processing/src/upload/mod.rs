//! Upload validation: filename presence, extension allow-list and sanitizing.

mod sanitize;
mod validator;

pub use sanitize::sanitize_filename;
pub use validator::{UploadValidator, ValidationError};
