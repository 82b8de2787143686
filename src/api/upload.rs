//! Recording upload transport
//!
//! Streams a local file as a multipart request, reporting integer percent
//! progress as chunks are handed to the transport. Abort is cooperative
//! through a cancellation token. The three failure causes (network,
//! abort, backend rejection) stay distinguishable so they can be logged
//! apart even though the UI surfaces them the same way.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use serde::Deserialize;
use tokio_util::io::ReaderStream;
use tokio_util::sync::CancellationToken;

use super::client::ApiClient;
use crate::meetings::types::UploadFileResponse;

const GENERIC_UPLOAD_ERROR: &str = "Failed to upload file";

/// Error for the upload operation.
///
/// Unlike the record operations, the backend's own message is surfaced
/// verbatim when its error body parses.
#[derive(Debug, Clone)]
pub enum UploadError {
    /// Connection dropped or the request never completed
    Network(String),
    /// User-initiated abort observed before the response arrived
    Aborted,
    /// Backend rejected the upload
    Status { status: u16, message: String },
    /// Success status with a body that did not decode
    InvalidResponse(String),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::Network(msg) => write!(f, "Network error during upload: {}", msg),
            UploadError::Aborted => write!(f, "Upload aborted"),
            UploadError::Status { message, .. } => write!(f, "{}", message),
            UploadError::InvalidResponse(_) => write!(f, "Failed to parse response"),
        }
    }
}

impl std::error::Error for UploadError {}

/// Backend error body shape
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiClient {
    /// Upload a recording as multipart form field `file`.
    ///
    /// `on_progress` receives a monotonically non-decreasing integer
    /// percentage in 0..=100; 100 fires exactly once, after the backend
    /// has accepted the file, and nothing is emitted after completion or
    /// failure. The transfer is a single bounded request: no chunked
    /// resume, no partial-progress recovery.
    pub async fn upload_file<F>(
        &self,
        path: &Path,
        cancel: Option<CancellationToken>,
        on_progress: F,
    ) -> Result<UploadFileResponse, UploadError>
    where
        F: Fn(u8) + Send + Sync + 'static,
    {
        let file = tokio::fs::File::open(path).await.map_err(|e| {
            UploadError::Network(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let total_bytes = file
            .metadata()
            .await
            .map_err(|e| UploadError::Network(format!("Failed to read file metadata: {}", e)))?
            .len();

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("recording")
            .to_string();

        let on_progress = Arc::new(on_progress);
        on_progress(0);

        // Count bytes as the transport pulls chunks off the stream. The
        // in-flight percentage is capped at 99: bytes handed to the
        // socket are not yet accepted by the backend.
        let progress = Arc::clone(&on_progress);
        let mut sent: u64 = 0;
        let mut last_percent: u8 = 0;
        let stream = ReaderStream::new(file).map(move |chunk| {
            if let Ok(bytes) = &chunk {
                sent += bytes.len() as u64;
                let percent = transfer_percent(sent, total_bytes);
                if percent > last_percent {
                    last_percent = percent;
                    progress(percent);
                }
            }
            chunk
        });

        let part = Part::stream_with_length(Body::wrap_stream(stream), total_bytes)
            .file_name(file_name)
            .mime_str(mime_for(path))
            .map_err(|e| UploadError::Network(format!("Invalid mime type: {}", e)))?;
        let form = Form::new().part("file", part);

        let request = self
            .http()
            .post(self.endpoint("/file/upload"))
            .multipart(form)
            .send();

        let result = match &cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    log::warn!("upload of {} aborted by user", path.display());
                    return Err(UploadError::Aborted);
                }
                result = request => result,
            },
            None => request.await,
        };

        let response = result.map_err(|e| {
            log::error!("upload of {} failed: {}", path.display(), e);
            UploadError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| GENERIC_UPLOAD_ERROR.to_string());
            log::error!("upload rejected with status {}: {}", status, message);
            return Err(UploadError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: UploadFileResponse = response
            .json()
            .await
            .map_err(|e| UploadError::InvalidResponse(e.to_string()))?;

        on_progress(100);
        log::info!("uploaded {} as file {}", path.display(), parsed.file_id);
        Ok(parsed)
    }
}

/// In-flight transfer percentage, capped below completion
fn transfer_percent(sent: u64, total: u64) -> u8 {
    (sent.saturating_mul(100) / total.max(1)).min(99) as u8
}

/// Content type by audio extension
fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("m4a") => "audio/mp4",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_percent_is_monotonic_and_capped() {
        let total = 1000;
        let mut last = 0;
        for sent in (0..=1000).step_by(37) {
            let percent = transfer_percent(sent, total);
            assert!(percent >= last);
            last = percent;
        }
        assert_eq!(transfer_percent(1000, 1000), 99);
        assert_eq!(transfer_percent(0, 0), 0);
    }

    #[test]
    fn mime_matches_extension_case_insensitively() {
        assert_eq!(mime_for(Path::new("a.mp3")), "audio/mpeg");
        assert_eq!(mime_for(Path::new("a.WAV")), "audio/wav");
        assert_eq!(mime_for(Path::new("a.m4a")), "audio/mp4");
        assert_eq!(mime_for(Path::new("a.ogg")), "application/octet-stream");
    }
}
