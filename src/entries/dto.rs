use serde::{Deserialize, Serialize};

use crate::entries::repo::Entry;
use crate::error::AppError;

/// Request body for a new journal entry. Fields are optional so a missing
/// field produces the journal's own 400 body, not a deserializer reject.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    #[serde(default)]
    pub apps: Option<Vec<String>>,
    #[serde(default)]
    pub screen_time: Option<i64>,
    #[serde(default)]
    pub reflection: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// A validated entry, ready to persist.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub apps: Vec<String>,
    pub screen_time: i64,
    pub reflection: String,
    pub tags: Vec<String>,
}

impl CreateEntryRequest {
    /// Checks rules in order and reports the first violated one. Zero screen
    /// time and an empty tag list are both acceptable at this layer.
    pub fn validate(self) -> Result<NewEntry, AppError> {
        let (apps, screen_time, reflection, tags) =
            match (self.apps, self.screen_time, self.reflection, self.tags) {
                (Some(a), Some(s), Some(r), Some(t)) => (a, s, r, t),
                _ => return Err(AppError::validation("All fields are required")),
            };

        if apps.is_empty() {
            return Err(AppError::validation("Please select at least one app"));
        }

        if screen_time < 0 {
            return Err(AppError::validation("Invalid screen time value"));
        }

        let reflection = reflection.trim().to_string();
        if reflection.is_empty() {
            return Err(AppError::validation("Reflection is required"));
        }

        Ok(NewEntry {
            apps,
            screen_time,
            reflection,
            tags,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CreateEntryResponse {
    pub success: bool,
    pub id: i64,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ListEntriesResponse {
    pub success: bool,
    pub entries: Vec<Entry>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        apps: &[&str],
        screen_time: i64,
        reflection: &str,
        tags: &[&str],
    ) -> CreateEntryRequest {
        CreateEntryRequest {
            apps: Some(apps.iter().map(|s| s.to_string()).collect()),
            screen_time: Some(screen_time),
            reflection: Some(reflection.into()),
            tags: Some(tags.iter().map(|s| s.to_string()).collect()),
        }
    }

    #[test]
    fn accepts_zero_screen_time_and_empty_tags() {
        let entry = request(&["X"], 0, "ok", &[]).validate().expect("valid");
        assert_eq!(entry.screen_time, 0);
        assert!(entry.tags.is_empty());
    }

    #[test]
    fn missing_field_is_reported_first() {
        let err = CreateEntryRequest {
            apps: Some(vec!["X".into()]),
            screen_time: None,
            reflection: Some("ok".into()),
            tags: Some(vec![]),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "All fields are required");
    }

    #[test]
    fn rejects_empty_app_list() {
        let err = request(&[], 30, "ok", &[]).validate().unwrap_err();
        assert_eq!(err.to_string(), "Please select at least one app");
    }

    #[test]
    fn rejects_negative_screen_time() {
        let err = request(&["X"], -5, "ok", &[]).validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid screen time value");
    }

    #[test]
    fn rejects_blank_reflection_and_trims() {
        let err = request(&["X"], 30, "   ", &[]).validate().unwrap_err();
        assert_eq!(err.to_string(), "Reflection is required");

        let entry = request(&["X"], 30, "  felt fine  ", &[])
            .validate()
            .expect("valid");
        assert_eq!(entry.reflection, "felt fine");
    }
}
