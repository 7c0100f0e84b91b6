//! Storage layout for photographed lesions and QR cards.
//!
//! Everything lives under a single storage root with two fixed
//! subdirectories. Paths are computed here; the API crate does the actual
//! directory creation and writes.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::CoreError;
use crate::types::DbId;

/// Subdirectory for uploaded lesion images.
pub const IMAGES_SUBDIR: &str = "images";

/// Subdirectory for generated QR cards.
pub const QR_SUBDIR: &str = "qr_code";

/// Image file extensions accepted for upload.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Resolves artifact paths under the configured storage root.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding uploaded lesion images.
    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGES_SUBDIR)
    }

    /// Directory holding generated QR cards.
    pub fn qr_dir(&self) -> PathBuf {
        self.root.join(QR_SUBDIR)
    }

    /// Path of the QR card PNG for a patient business code.
    pub fn qr_path(&self, code: &str) -> PathBuf {
        self.qr_dir().join(format!("{code}.png"))
    }
}

/// Validate that a filename carries a supported image extension, returning
/// the lowercased extension.
pub fn validate_image_extension(filename: &str) -> Result<String, CoreError> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported image format '.{ext}'. Supported: .jpg, .jpeg, .png, .webp"
        )))
    }
}

/// Build the stored filename for an uploaded image:
/// `{patient_id}_{YYYYMMDD_HHMMSS}_{original}`.
///
/// The client-supplied name is reduced to its final path component so it
/// can never escape the images directory.
pub fn stored_image_filename(patient_id: DbId, at: DateTime<Utc>, original: &str) -> String {
    let base = Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");
    format!("{patient_id}_{}_{base}", at.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    #[test]
    fn test_store_paths() {
        let store = ImageStore::new("local_files");
        assert_eq!(store.images_dir(), PathBuf::from("local_files/images"));
        assert_eq!(store.qr_dir(), PathBuf::from("local_files/qr_code"));
        assert_eq!(
            store.qr_path("P-20250309-042"),
            PathBuf::from("local_files/qr_code/P-20250309-042.png")
        );
    }

    #[test]
    fn test_accepts_supported_extensions() {
        for name in ["a.jpg", "b.JPEG", "c.png", "d.WebP"] {
            let ext = validate_image_extension(name).expect("should accept");
            assert_eq!(ext, ext.to_lowercase());
        }
    }

    #[test]
    fn test_rejects_unsupported_extensions() {
        for name in ["clip.mp4", "doc.pdf", "noext", "trailing."] {
            let err = validate_image_extension(name).unwrap_err();
            assert_matches!(err, CoreError::Validation(_), "accepted {name:?}");
        }
    }

    #[test]
    fn test_stored_filename_shape() {
        let at = Utc.with_ymd_and_hms(2025, 3, 9, 14, 30, 5).unwrap();
        let name = stored_image_filename(17, at, "lesion.jpg");
        assert_eq!(name, "17_20250309_143005_lesion.jpg");
    }

    #[test]
    fn test_stored_filename_strips_directories() {
        let at = Utc.with_ymd_and_hms(2025, 3, 9, 14, 30, 5).unwrap();
        let name = stored_image_filename(17, at, "../../etc/passwd");
        assert_eq!(name, "17_20250309_143005_passwd");
    }
}
