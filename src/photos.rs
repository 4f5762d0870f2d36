use std::path::Path;

use anyhow::Context;
use base64ct::{Base64, Encoding};
use bytes::Bytes;
use tracing::debug;

pub struct UploadItem {
    pub body: Bytes,
    pub content_type: &'static str,
}

impl UploadItem {
    /// Inline the image as a `data:` URL, the form stored on an entry.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            Base64::encode_string(&self.body)
        )
    }
}

pub async fn load_photo(path: &Path) -> anyhow::Result<UploadItem> {
    let body = tokio::fs::read(path)
        .await
        .with_context(|| format!("read photo {}", path.display()))?;
    let content_type = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(mime_from_ext)
        .unwrap_or("application/octet-stream");
    debug!(path = %path.display(), bytes = body.len(), content_type, "photo loaded");
    Ok(UploadItem {
        body: Bytes::from(body),
        content_type,
    })
}

fn mime_from_ext(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}
