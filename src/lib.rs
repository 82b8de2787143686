// Meeting dashboard client core
//
// Client-side pieces of the meeting-management dashboard:
// - Meeting data contract and status lifecycle
// - Typed REST transport (records, upload, download links)
// - Form validation and payload normalization
// - Recording attach flow (probe -> upload -> metadata patch)
//
// Rendering, routing and widgets live in the shell on top of this crate.

pub mod api;
pub mod config;
pub mod meetings;
pub mod recording;
pub mod util;

pub use api::{ApiClient, ApiError, UploadError};
pub use config::ApiConfig;
pub use meetings::{
    validate, CreateMeetingInput, Meeting, MeetingForm, MeetingStatus, UpdateMeetingInput,
    ValidationErrors,
};
pub use recording::{attach_recording, AttachError, UploadPhase, UploadProgress};
