//! Typed REST client for meeting records

use std::fmt;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::meetings::types::{
    CreateMeetingInput, DownloadFileResponse, Meeting, UpdateMeetingInput,
};

/// Error for the record operations.
///
/// One undifferentiated taxonomy with a generic message: callers render
/// these as a dismissible banner, never as field-level detail, and a
/// missing record is indistinguishable from any other non-success
/// response.
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Connection-level failure before a response arrived
    Request(String),
    /// Backend answered outside the success range
    Status(u16),
    /// Success status with a body that did not decode
    InvalidResponse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Request(msg) => write!(f, "Request failed: {}", msg),
            ApiError::Status(code) => write!(f, "Backend returned status {}", code),
            ApiError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// REST client for the dashboard backend.
///
/// Holds one shared connection pool; cheap to clone. No timeout override
/// is applied, the HTTP stack's defaults govern every call.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Client against `MEETING_API_URL`, or the local development backend
    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Build a versioned endpoint URL
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.config.base_url, path)
    }

    /// Probe the backend, returning its greeting
    pub async fn check_connection(&self) -> Result<String, ApiError> {
        #[derive(serde::Deserialize)]
        struct Hello {
            message: String,
        }

        let hello: Hello = self.get_json(&self.endpoint("/hello")).await?;
        Ok(hello.message)
    }

    /// Fetch all meetings, ordered as the backend returns them
    pub async fn list_meetings(&self) -> Result<Vec<Meeting>, ApiError> {
        self.get_json(&self.endpoint("/meetings")).await
    }

    /// Fetch a single meeting
    pub async fn get_meeting(&self, id: u64) -> Result<Meeting, ApiError> {
        self.get_json(&self.endpoint(&format!("/meetings/{}", id))).await
    }

    /// Create a meeting from a validated payload. The returned snapshot
    /// carries the backend-assigned id, status and timestamps.
    pub async fn create_meeting(&self, input: &CreateMeetingInput) -> Result<Meeting, ApiError> {
        let response = self
            .http
            .post(self.endpoint("/meetings"))
            .json(input)
            .send()
            .await
            .map_err(|e| {
                log::error!("create meeting request failed: {}", e);
                ApiError::Request(e.to_string())
            })?;

        decode(response).await
    }

    /// Apply a partial update. Only the fields present in `input` reach
    /// the wire; the backend merges and returns the updated snapshot.
    pub async fn update_meeting(
        &self,
        id: u64,
        input: &UpdateMeetingInput,
    ) -> Result<Meeting, ApiError> {
        let response = self
            .http
            .put(self.endpoint(&format!("/meetings/{}", id)))
            .json(input)
            .send()
            .await
            .map_err(|e| {
                log::error!("update meeting {} request failed: {}", id, e);
                ApiError::Request(e.to_string())
            })?;

        decode(response).await
    }

    /// Delete a meeting. Follow-up navigation is the caller's concern.
    pub async fn delete_meeting(&self, id: u64) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.endpoint(&format!("/meetings/{}", id)))
            .send()
            .await
            .map_err(|e| {
                log::error!("delete meeting {} request failed: {}", id, e);
                ApiError::Request(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            log::error!("delete meeting {} failed with status {}", id, status);
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(())
    }

    /// Request a short-lived download link for an uploaded recording
    pub async fn download_url(&self, file_id: &str) -> Result<DownloadFileResponse, ApiError> {
        self.get_json(&self.endpoint(&format!("/file/download/{}", file_id))).await
    }

    /// GET with intermediate caching disabled; reads must reflect current
    /// backend state.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self
            .http
            .get(url)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| {
                log::error!("request to {} failed: {}", url, e);
                ApiError::Request(e.to_string())
            })?;

        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        log::error!("backend returned status {} for {}", status, response.url());
        return Err(ApiError::Status(status.as_u16()));
    }

    response
        .json()
        .await
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_share_the_versioned_base_path() {
        let client = ApiClient::new(ApiConfig::with_base_url("http://backend:9000/"));
        assert_eq!(client.endpoint("/meetings"), "http://backend:9000/api/v1/meetings");
        assert_eq!(
            client.endpoint("/meetings/12"),
            "http://backend:9000/api/v1/meetings/12"
        );
        assert_eq!(
            client.endpoint("/file/upload"),
            "http://backend:9000/api/v1/file/upload"
        );
    }

    #[test]
    fn errors_render_generic_messages() {
        assert_eq!(ApiError::Status(404).to_string(), "Backend returned status 404");
        assert_eq!(
            ApiError::Request("connection refused".to_string()).to_string(),
            "Request failed: connection refused"
        );
    }
}
