use thiserror::Error;

use crate::loader::LoadError;
use crate::normalizer::NormalizeError;

/// Everything that can reject an upload
///
/// Client mistakes map to 400 and processing failures to 500; the
/// `Display` text is the plain-text response body.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file uploaded")]
    NoFile,

    #[error("No file selected")]
    EmptyFilename,

    #[error("Unsupported file format")]
    UnsupportedFormat,

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("Error saving file: {0}")]
    Persist(#[from] std::io::Error),

    #[error("Error processing file: {0}")]
    Load(#[from] LoadError),
}

impl UploadError {
    /// Whether the client can fix this by sending a different file
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            UploadError::NoFile
                | UploadError::EmptyFilename
                | UploadError::UnsupportedFormat
                | UploadError::Normalize(_)
        )
    }
}

#[cfg(feature = "web")]
impl axum::response::IntoResponse for UploadError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        let status = if self.is_client_error() {
            log::warn!("upload rejected: {}", self);
            StatusCode::BAD_REQUEST
        } else {
            log::error!("upload failed: {}", self);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, self.to_string()).into_response()
    }
}
