//! Recording attach flow
//!
//! A single file selection turns into three sequential steps: probe the
//! local duration, upload the bytes, then patch the meeting record with
//! the upload result. Size and format ceilings are enforced before the
//! first network call, and the metadata patch is never issued unless the
//! upload resolved successfully. The flow is not resumable: a failure
//! after partial transfer starts over from the local file.
//!
//! Module structure:
//! - types.rs: progress/phase reporting, AttachError, ceilings
//! - probe.rs: local duration estimation

pub mod probe;
pub mod types;

pub use types::{AttachError, UploadPhase, UploadProgress, ALLOWED_EXTENSIONS, MAX_UPLOAD_BYTES};

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api::ApiClient;
use crate::meetings::types::{Meeting, UpdateMeetingInput};

/// Reject a candidate file before any bytes leave the machine
pub fn check_candidate(path: &Path, size_bytes: u64) -> Result<(), AttachError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AttachError::UnsupportedFormat(extension));
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(AttachError::TooLarge(size_bytes));
    }
    Ok(())
}

/// Upload the file at `path` and attach it to meeting `meeting_id`.
///
/// Exactly one file per call. `on_progress` observes the flow phases with
/// a percentage that never decreases; failures are returned, not
/// reported through the callback. `cancel` aborts the transfer step only;
/// once the metadata patch is in flight it runs to completion or failure.
pub async fn attach_recording<F>(
    client: &ApiClient,
    meeting_id: u64,
    path: &Path,
    cancel: Option<CancellationToken>,
    on_progress: F,
) -> Result<Meeting, AttachError>
where
    F: Fn(UploadProgress) + Send + Sync + 'static,
{
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| AttachError::Unreadable(format!("{}: {}", path.display(), e)))?;
    let size_bytes = metadata.len();
    check_candidate(path, size_bytes)?;

    let on_progress = Arc::new(on_progress);
    on_progress(UploadProgress {
        total_bytes: size_bytes,
        percent: 0,
        phase: UploadPhase::Probing,
    });

    // Step 1: duration is best-effort; unknown is not a failure
    let duration_seconds = probe::audio_duration(path).await;
    if duration_seconds.is_none() {
        log::warn!("could not determine duration of {}", path.display());
    }

    // Step 2: upload, forwarding transfer progress to the flow callback
    let progress = Arc::clone(&on_progress);
    let uploaded = client
        .upload_file(path, cancel, move |percent| {
            progress(UploadProgress {
                total_bytes: size_bytes,
                percent,
                phase: UploadPhase::Uploading,
            });
        })
        .await?;

    // Step 3: only reached once the upload has resolved successfully
    on_progress(UploadProgress {
        total_bytes: size_bytes,
        percent: 100,
        phase: UploadPhase::Attaching,
    });
    let meeting = client
        .update_meeting(
            meeting_id,
            &UpdateMeetingInput::recording(uploaded.file_id.clone(), size_bytes, duration_seconds),
        )
        .await
        .map_err(AttachError::Attach)?;

    on_progress(UploadProgress {
        total_bytes: size_bytes,
        percent: 100,
        phase: UploadPhase::Complete,
    });
    log::info!(
        "attached recording {} to meeting {}",
        uploaded.file_id,
        meeting_id
    );
    Ok(meeting)
}
