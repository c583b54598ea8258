//! Data models for the application

mod classification;
mod emotion;
mod upload;

pub use classification::*;
pub use emotion::*;
pub use upload::*;
