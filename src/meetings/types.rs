//! Meeting record shapes
//!
//! Field names and optionality are stable across every transport
//! operation; the backend snapshot is always authoritative.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Processing lifecycle of a meeting's recording.
///
/// Transitions are driven entirely by the backend pipeline; the client
/// only reads this value. Re-fetches may observe any state the backend
/// holds at that instant, so nothing here assumes monotonic progress.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Created,
    Processing,
    Completed,
    Failed,
}

impl MeetingStatus {
    /// Badge text for list and detail screens
    pub fn label(&self) -> &'static str {
        match self {
            MeetingStatus::Created => "Created",
            MeetingStatus::Processing => "Processing",
            MeetingStatus::Completed => "Completed",
            MeetingStatus::Failed => "Failed",
        }
    }

    /// Terminal states: the pipeline will not move the record further
    pub fn is_terminal(&self) -> bool {
        matches!(self, MeetingStatus::Completed | MeetingStatus::Failed)
    }
}

impl fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A meeting record as the backend returns it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub id: u64,
    // Basic info
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    // Meeting details
    #[serde(default)]
    pub meeting_url: Option<String>,
    #[serde(default)]
    pub meeting_platform: Option<String>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    // Recording details, populated by the upload flow
    #[serde(default)]
    pub recording_path: Option<String>,
    #[serde(default)]
    pub recording_size_bytes: Option<u64>,
    #[serde(default)]
    pub recording_duration_seconds: Option<u64>,
    // AI results, populated by the processing pipeline
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub action_items: Option<Vec<String>>,
    pub status: MeetingStatus,
    #[serde(default)]
    pub user_id: Option<u64>,
    // Backend-assigned timestamps
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Meeting {
    pub fn has_recording(&self) -> bool {
        self.recording_path.is_some()
    }

    /// Whether any pipeline output has arrived. A `Completed` meeting with
    /// no output yet is a valid, displayable state, not an error.
    pub fn has_ai_output(&self) -> bool {
        self.transcript.is_some() || self.summary.is_some() || self.action_items.is_some()
    }
}

/// Payload for creating a meeting. Optional fields are omitted from the
/// body when absent; normalization upstream guarantees they are never
/// empty strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateMeetingInput {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// Partial update payload. `None` fields are left out of the serialized
/// body entirely, so the backend merge leaves the stored values untouched.
///
/// There is deliberately no status field here: lifecycle transitions are
/// never client-initiated.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UpdateMeetingInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_duration_seconds: Option<u64>,
}

impl UpdateMeetingInput {
    /// Metadata patch issued after a successful upload
    pub fn recording(
        file_id: impl Into<String>,
        size_bytes: u64,
        duration_seconds: Option<u64>,
    ) -> Self {
        Self {
            recording_path: Some(file_id.into()),
            recording_size_bytes: Some(size_bytes),
            recording_duration_seconds: duration_seconds,
            ..Default::default()
        }
    }
}

impl From<CreateMeetingInput> for UpdateMeetingInput {
    /// Full-field update built from a validated form payload
    fn from(input: CreateMeetingInput) -> Self {
        Self {
            title: Some(input.title),
            description: input.description,
            meeting_url: input.meeting_url,
            meeting_platform: input.meeting_platform,
            scheduled_at: input.scheduled_at,
            ..Default::default()
        }
    }
}

/// Response of the file upload endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadFileResponse {
    pub message: String,
    pub file_id: String,
    pub filename: String,
}

/// Short-lived signed link for fetching an uploaded recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadFileResponse {
    pub file_id: String,
    pub download_url: String,
    pub expires_in: String,
}
