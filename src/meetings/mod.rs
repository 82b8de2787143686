//! Meeting data contract and form validation
//!
//! Module structure:
//! - types.rs: Meeting record, status lifecycle, create/update payloads
//! - validation.rs: client-side form validation and normalization

pub mod types;
pub mod validation;

pub use types::{
    CreateMeetingInput, DownloadFileResponse, Meeting, MeetingStatus, UpdateMeetingInput,
    UploadFileResponse,
};
pub use validation::{validate, MeetingForm, ValidationErrors};
