//! Facemood database layer: SQLite schema bootstrap and repositories.

pub mod db;

pub use db::{init_schema, UploadRepository};
