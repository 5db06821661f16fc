//! Image attachments encoded as `data:` URLs.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::CreatorError;

const FALLBACK_MIME: &str = "application/octet-stream";

/// One attached image, ready to send as an `image_url` content part.
///
/// No type or size checks are made; whatever bytes were selected are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    mime: String,
    data_url: String,
}

impl ImageAttachment {
    /// Encode raw bytes. An empty `mime` is replaced by
    /// `application/octet-stream`.
    #[must_use]
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        let mime = if mime.trim().is_empty() { FALLBACK_MIME } else { mime.trim() };
        let data_url = format!("data:{mime};base64,{}", STANDARD.encode(bytes));
        Self { mime: mime.to_string(), data_url }
    }

    /// Read a file and encode it, guessing the MIME type from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`CreatorError::Image`] if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, CreatorError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| CreatorError::Image { path: path.display().to_string(), source })?;
        let mime = mime_guess::from_path(path).first_raw().unwrap_or(FALLBACK_MIME);
        Ok(Self::from_bytes(mime, &bytes))
    }

    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    #[must_use]
    pub fn data_url(&self) -> &str {
        &self.data_url
    }
}
