//! Upload audit record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::TIMESTAMP_FORMAT;

/// One row of the `uploads` table: created once per stored image, never
/// mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: i64,
    /// Sanitized filename, also the key of the stored blob.
    pub filename: String,
    /// Local time the upload was recorded, truncated to seconds.
    pub timestamp: NaiveDateTime,
}

impl UploadRecord {
    /// Timestamp in the persisted `YYYY-MM-DD HH:MM:SS` form.
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn formatted_timestamp_has_second_precision() {
        let record = UploadRecord {
            id: 1,
            filename: "face.png".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 9)
                .unwrap()
                .and_hms_milli_opt(7, 5, 1, 999)
                .unwrap(),
        };
        assert_eq!(record.formatted_timestamp(), "2024-03-09 07:05:01");
    }
}
