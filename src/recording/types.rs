//! Attach flow types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::{ApiError, UploadError};

/// Upload ceiling, enforced before any network call
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Audio containers the backend accepts
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["mp3", "wav", "m4a"];

/// Progress of the attach flow, suitable for driving a progress bar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadProgress {
    pub total_bytes: u64,
    pub percent: u8,
    pub phase: UploadPhase,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UploadPhase {
    /// Local duration probe, before any bytes leave the machine
    Probing,
    /// Binary transfer in flight
    Uploading,
    /// Upload accepted, metadata patch in flight
    Attaching,
    /// Recording attached to the meeting record
    Complete,
}

/// Failure of the attach flow. Local rejections reuse the backend's
/// wording so the user sees one message for one rule.
#[derive(Debug)]
pub enum AttachError {
    /// File missing or unreadable
    Unreadable(String),
    /// Extension outside the audio allow-list
    UnsupportedFormat(String),
    /// File exceeds [`MAX_UPLOAD_BYTES`]
    TooLarge(u64),
    /// Step 2 failed; no metadata patch was issued
    Upload(UploadError),
    /// Step 3 failed; the file is uploaded but unattached
    Attach(ApiError),
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachError::Unreadable(msg) => write!(f, "Cannot read file: {}", msg),
            AttachError::UnsupportedFormat(_) => {
                write!(f, "Only .mp3, .wav, and .m4a files are allowed")
            }
            AttachError::TooLarge(_) => write!(f, "File size exceeds 50MB"),
            AttachError::Upload(e) => write!(f, "{}", e),
            AttachError::Attach(e) => write!(f, "Failed to update meeting: {}", e),
        }
    }
}

impl std::error::Error for AttachError {}

impl From<UploadError> for AttachError {
    fn from(e: UploadError) -> Self {
        AttachError::Upload(e)
    }
}
