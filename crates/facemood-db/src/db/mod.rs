//! Database repositories for data access layer
//!
//! There is no connection pool: every repository call opens its own SQLite
//! connection and closes it once the statement has committed.

pub mod schema;
pub mod uploads;

pub use schema::init_schema;
pub use uploads::UploadRepository;
