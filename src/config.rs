use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    pub api_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub ai: AiConfig,
}

const DEFAULT_AI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://mindtrack.db".into());
        let ai = AiConfig {
            api_url: std::env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_AI_URL.into()),
            api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
        };
        Ok(Self { database_url, ai })
    }
}
