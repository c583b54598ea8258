use facemood_core::ClassificationResult;

use super::sanitize::sanitize_filename;

/// Reasons an upload is rejected before anything is written.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No file selected")]
    NoFileSelected,

    #[error("Invalid file extension: {extension:?} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: Option<String>,
        allowed: Vec<String>,
    },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),
}

impl From<ValidationError> for ClassificationResult {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::NoFileSelected => ClassificationResult::NoFileSelected,
            ValidationError::InvalidExtension { .. } => ClassificationResult::InvalidFileType,
            ValidationError::InvalidFilename(_) => ClassificationResult::InvalidFilename,
        }
    }
}

/// Upload validator
///
/// Checks are applied to the raw client filename in order: presence, then
/// extension, then sanitizing.
#[derive(Clone, Debug)]
pub struct UploadValidator {
    allowed_extensions: Vec<String>,
}

impl UploadValidator {
    /// `allowed_extensions` are lowercase and without the leading dot.
    pub fn new(allowed_extensions: Vec<String>) -> Self {
        Self { allowed_extensions }
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn validate_present(&self, filename: &str) -> Result<(), ValidationError> {
        if filename.is_empty() {
            return Err(ValidationError::NoFileSelected);
        }
        Ok(())
    }

    /// Validate file extension (text after the last `.`, case-insensitive)
    pub fn validate_extension(&self, filename: &str) -> Result<(), ValidationError> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase());

        match extension {
            Some(ref ext) if self.allowed_extensions.iter().any(|a| a == ext) => Ok(()),
            _ => Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            }),
        }
    }

    /// Run every check and return the sanitized storage name.
    pub fn validate_all(&self, filename: &str) -> Result<String, ValidationError> {
        self.validate_present(filename)?;
        self.validate_extension(filename)?;

        let sanitized = sanitize_filename(filename);
        if sanitized.is_empty() {
            return Err(ValidationError::InvalidFilename(filename.to_string()));
        }
        Ok(sanitized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_validator() -> UploadValidator {
        UploadValidator::new(vec![
            "png".to_string(),
            "jpg".to_string(),
            "jpeg".to_string(),
            "gif".to_string(),
        ])
    }

    #[test]
    fn test_validate_extension_ok() {
        let validator = test_validator();
        assert!(validator.validate_extension("face.png").is_ok());
        assert!(validator.validate_extension("FACE.JPEG").is_ok()); // case insensitive
        assert!(validator.validate_extension("archive.tar.gif").is_ok());
    }

    #[test]
    fn test_validate_extension_invalid() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate_extension("notes.txt"),
            Err(ValidationError::InvalidExtension { extension: Some(ext), .. }) if ext == "txt"
        ));
        assert!(matches!(
            validator.validate_extension("png"),
            Err(ValidationError::InvalidExtension { extension: None, .. })
        ));
        assert!(validator.validate_extension("face.png.exe").is_err());
    }

    #[test]
    fn test_validate_all_empty_filename() {
        let validator = test_validator();
        assert_eq!(
            validator.validate_all(""),
            Err(ValidationError::NoFileSelected)
        );
    }

    #[test]
    fn test_validate_all_returns_sanitized_name() {
        let validator = test_validator();
        assert_eq!(
            validator.validate_all("my face.PNG").unwrap(),
            "my_face.PNG"
        );
        assert_eq!(
            validator.validate_all("../uploads/face.jpg").unwrap(),
            "uploads_face.jpg"
        );
    }

    #[test]
    fn test_validate_all_strips_to_extension() {
        let validator = test_validator();
        assert_eq!(validator.validate_all("ü.png").unwrap(), "png");
        assert_eq!(validator.validate_all("...png").unwrap(), "png");
        assert_eq!(validator.validate_all("__.gif").unwrap(), "gif");
    }

    #[test]
    fn test_validate_all_unsanitizable_name() {
        let validator = UploadValidator::new(vec!["ü".to_string()]);
        assert_eq!(
            validator.validate_all("é.ü"),
            Err(ValidationError::InvalidFilename("é.ü".to_string()))
        );
    }

    #[test]
    fn test_errors_map_to_results() {
        assert_eq!(
            ClassificationResult::from(ValidationError::NoFileSelected),
            ClassificationResult::NoFileSelected
        );
        assert_eq!(
            ClassificationResult::from(test_validator().validate_all("a.txt").unwrap_err()),
            ClassificationResult::InvalidFileType
        );
        assert_eq!(
            ClassificationResult::from(ValidationError::InvalidFilename("é.ü".to_string())),
            ClassificationResult::InvalidFilename
        );
    }
}
