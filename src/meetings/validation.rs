//! Client-side validation of meeting form input
//!
//! Runs before any transport call. Returns either a normalized payload
//! ready for the wire or a map of field name -> message so the UI can
//! attach each error to its field and clear them independently. The
//! caller's form state is never touched.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use reqwest::Url;

use super::types::CreateMeetingInput;

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 2000;
pub const PLATFORM_MAX_CHARS: usize = 100;

/// Raw form state as a screen holds it. Text fields arrive exactly as the
/// user typed them; normalization happens in [`validate`].
#[derive(Debug, Clone, Default)]
pub struct MeetingForm {
    pub title: String,
    pub description: String,
    pub meeting_url: String,
    pub meeting_platform: String,
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// Field-keyed validation failures. Each field carries at most one
/// message; the first failing rule wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message for a field, if that field failed
    pub fn field(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: &'static str, message: &str) {
        self.errors.entry(field).or_insert_with(|| message.to_string());
    }
}

/// Validate and normalize a form into a transport payload.
///
/// Fields validate independently: a bad URL leaves the other fields'
/// outcomes unchanged. Empty optional fields normalize to absent, never
/// to an empty string.
pub fn validate(form: &MeetingForm) -> Result<CreateMeetingInput, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let title = form.title.trim();
    if title.is_empty() {
        errors.insert("title", "Title is required");
    } else if title.chars().count() > TITLE_MAX_CHARS {
        errors.insert("title", "Title must be less than 200 characters");
    }

    let description = normalize_optional(&form.description);
    if let Some(text) = &description {
        if text.chars().count() > DESCRIPTION_MAX_CHARS {
            errors.insert("description", "Description must be less than 2000 characters");
        }
    }

    let meeting_url = normalize_optional(&form.meeting_url);
    if let Some(raw) = &meeting_url {
        if Url::parse(raw).is_err() {
            errors.insert("meeting_url", "Please enter a valid URL");
        }
    }

    let meeting_platform = normalize_optional(&form.meeting_platform);
    if let Some(name) = &meeting_platform {
        if name.chars().count() > PLATFORM_MAX_CHARS {
            errors.insert("meeting_platform", "Platform name must be less than 100 characters");
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(CreateMeetingInput {
        title: title.to_string(),
        description,
        meeting_url,
        meeting_platform,
        scheduled_at: form.scheduled_at,
    })
}

fn normalize_optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> MeetingForm {
        MeetingForm {
            title: "Weekly sync".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn minimal_valid_form_normalizes() {
        let payload = validate(&valid_form()).unwrap();
        assert_eq!(payload.title, "Weekly sync");
        assert_eq!(payload.description, None);
        assert_eq!(payload.meeting_url, None);
        assert_eq!(payload.meeting_platform, None);
        assert_eq!(payload.scheduled_at, None);
    }

    #[test]
    fn title_is_trimmed() {
        let form = MeetingForm {
            title: "  Weekly sync  ".to_string(),
            ..Default::default()
        };
        assert_eq!(validate(&form).unwrap().title, "Weekly sync");
    }

    #[test]
    fn whitespace_title_is_rejected() {
        let form = MeetingForm {
            title: "   \t ".to_string(),
            ..Default::default()
        };
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.field("title"), Some("Title is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn overlong_title_is_rejected() {
        let form = MeetingForm {
            title: "x".repeat(201),
            ..Default::default()
        };
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.field("title"), Some("Title must be less than 200 characters"));
    }

    #[test]
    fn title_at_limit_passes() {
        let form = MeetingForm {
            title: "x".repeat(200),
            ..Default::default()
        };
        assert!(validate(&form).is_ok());
    }

    #[test]
    fn bad_url_only_flags_the_url_field() {
        let form = MeetingForm {
            meeting_url: "not a url".to_string(),
            ..valid_form()
        };
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.field("meeting_url"), Some("Please enter a valid URL"));
        assert_eq!(errors.field("title"), None);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn valid_url_passes_through() {
        let form = MeetingForm {
            meeting_url: "https://meet.example.com/room/42".to_string(),
            ..valid_form()
        };
        let payload = validate(&form).unwrap();
        assert_eq!(
            payload.meeting_url.as_deref(),
            Some("https://meet.example.com/room/42")
        );
    }

    #[test]
    fn empty_optionals_become_absent_not_empty() {
        let form = MeetingForm {
            description: "   ".to_string(),
            meeting_url: "".to_string(),
            meeting_platform: "".to_string(),
            ..valid_form()
        };
        let payload = validate(&form).unwrap();
        assert_eq!(payload.description, None);
        assert_eq!(payload.meeting_url, None);
        assert_eq!(payload.meeting_platform, None);
    }

    #[test]
    fn overlong_description_and_platform_are_flagged_together() {
        let form = MeetingForm {
            description: "d".repeat(2001),
            meeting_platform: "p".repeat(101),
            ..valid_form()
        };
        let errors = validate(&form).unwrap_err();
        assert_eq!(
            errors.field("description"),
            Some("Description must be less than 2000 characters")
        );
        assert_eq!(
            errors.field("meeting_platform"),
            Some("Platform name must be less than 100 characters")
        );
        assert_eq!(errors.len(), 2);
    }
}
