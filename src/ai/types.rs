use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The four-field coaching bundle the model is asked to produce.
///
/// `raw_response` is populated only on the unparseable-reply fallback path so
/// the client can still show what the model said.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionAnalysis {
    pub analysis: String,
    pub suggestions: Vec<String>,
    pub micro_habits: Vec<String>,
    pub motivational_tip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

/// Request body for `POST /api/ai-analysis` — the same four entry fields,
/// checked for presence only; nothing here is persisted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default)]
    pub apps: Option<Vec<String>>,
    #[serde(default)]
    pub screen_time: Option<i64>,
    #[serde(default)]
    pub reflection: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Validated analysis input.
#[derive(Debug)]
pub struct AnalysisInput {
    pub apps: Vec<String>,
    pub screen_time: i64,
    pub reflection: String,
    pub tags: Vec<String>,
}

impl AnalysisRequest {
    pub fn validate(self) -> Result<AnalysisInput, AppError> {
        match (self.apps, self.screen_time, self.reflection, self.tags) {
            (Some(apps), Some(screen_time), Some(reflection), Some(tags)) => Ok(AnalysisInput {
                apps,
                screen_time,
                reflection,
                tags,
            }),
            _ => Err(AppError::validation(
                "Missing required fields for AI analysis",
            )),
        }
    }
}
