//! Multipart upload plumbing shared by the operator endpoints and the
//! device push endpoint.

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use chrono::Utc;
use dermatrack_core::error::CoreError;
use dermatrack_core::storage::{self, ImageStore};
use dermatrack_core::types::DbId;

/// One image pulled out of a multipart request.
#[derive(Debug)]
pub struct UploadedImage {
    pub filename: String,
    pub data: Bytes,
}

/// Everything a session-bearing multipart request can carry.
#[derive(Debug, Default)]
pub struct SessionUpload {
    pub images: Vec<UploadedImage>,
    pub detection_result: Option<String>,
    pub diagnostic_result: Option<String>,
    pub follow_up_plan: Option<String>,
}

/// Drain a multipart stream into a [`SessionUpload`].
///
/// Recognizes repeated `images` file fields plus the three session text
/// fields. Unknown fields are read and discarded so the stream stays
/// consumable.
pub async fn collect_session_upload(
    multipart: &mut Multipart,
) -> Result<SessionUpload, MultipartError> {
    let mut upload = SessionUpload::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "images" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field.bytes().await?;
                upload.images.push(UploadedImage { filename, data });
            }
            "detection_result" => upload.detection_result = Some(field.text().await?),
            "diagnostic_result" => upload.diagnostic_result = Some(field.text().await?),
            "follow_up_plan" => upload.follow_up_plan = Some(field.text().await?),
            _ => {
                let _ = field.bytes().await?;
            }
        }
    }

    Ok(upload)
}

/// Write uploaded images under the store's images directory, returning the
/// storage-relative paths to record in the database.
///
/// Filenames are stamped `{patient_id}_{timestamp}_{original}`. Files
/// already written stay on disk if a later write fails; the caller's
/// transaction rollback only covers database rows.
pub async fn store_patient_images(
    store: &ImageStore,
    patient_id: DbId,
    images: &[UploadedImage],
) -> Result<Vec<String>, CoreError> {
    let dir = store.images_dir();
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| CoreError::Internal(format!("Failed to create {}: {e}", dir.display())))?;

    let mut paths = Vec::with_capacity(images.len());
    for image in images {
        storage::validate_image_extension(&image.filename)?;
        let filename = storage::stored_image_filename(patient_id, Utc::now(), &image.filename);
        let dest = dir.join(&filename);
        tokio::fs::write(&dest, &image.data)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to write {}: {e}", dest.display())))?;
        paths.push(format!("{}/{filename}", storage::IMAGES_SUBDIR));
    }

    Ok(paths)
}
