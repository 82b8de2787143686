//! HTTP transport against the dashboard backend
//!
//! Single source of truth for endpoint paths and HTTP semantics. Every
//! operation is exactly one bounded request; whether to retry is the
//! caller's decision.
//!
//! Module structure:
//! - client.rs: ApiClient and the record operations (list/get/create/update/delete)
//! - upload.rs: streaming multipart upload with progress and abort

pub mod client;
pub mod upload;

pub use client::{ApiClient, ApiError};
pub use upload::UploadError;
