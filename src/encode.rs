//! Inline-embeddable encoding of captured images.

use crate::types::{EncodedImage, ImageFormat};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::path::Path;

impl EncodedImage {
    /// Encode raw image bytes as base64 plus a MIME-typed data URL.
    pub fn from_bytes(bytes: &[u8], format: ImageFormat) -> Self {
        let base64 = BASE64.encode(bytes);
        let mime_type = format.mime_type().to_string();
        let data_url = format!("data:{};base64,{}", mime_type, base64);
        Self {
            mime_type,
            base64,
            data_url,
        }
    }
}

/// Read a just-written capture back and encode it.
///
/// Callers treat failure here as non-fatal: the capture already succeeded,
/// the encoded fields are simply omitted.
pub async fn encode_file(path: &Path, format: ImageFormat) -> std::io::Result<EncodedImage> {
    let bytes = tokio::fs::read(path).await?;
    Ok(EncodedImage::from_bytes(&bytes, format))
}
