use crate::ai::types::{AnalysisInput, ReflectionAnalysis};
use tracing::warn;

/// Coaching prompt sent to the generative endpoint, embedding one entry.
pub fn build_prompt(input: &AnalysisInput) -> String {
    format!(
        r#"
You are a digital wellness coach. Analyze this user's digital consumption data and provide personalized suggestions, tips, and micro habits.

User Data:
- Apps used: {apps:?}
- Screen time: {screen_time} minutes
- Reflection: "{reflection}"
- Emotional tags: {tags:?}

Please provide:
1. A brief analysis of their digital consumption pattern
2. 3 specific suggestions for improvement
3. 2 micro habits they can implement today
4. 1 motivational tip

Keep the response concise, actionable, and encouraging. Focus on practical steps they can take immediately.

Format your response as JSON with these keys: analysis, suggestions, microHabits, motivationalTip
"#,
        apps = input.apps,
        screen_time = input.screen_time,
        reflection = input.reflection,
        tags = input.tags,
    )
}

/// Strict decode of the model's reply into the four-field shape. Any decode
/// failure resolves to a deterministic structured fallback carrying the raw
/// text; a partial or malformed structure is never passed through.
pub fn parse_analysis(raw: &str) -> ReflectionAnalysis {
    let candidate = strip_code_fences(raw);
    match serde_json::from_str::<ReflectionAnalysis>(candidate) {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!(error = %e, "model reply did not match the expected JSON shape");
            unparseable_fallback(raw)
        }
    }
}

/// Models often wrap JSON in a ```json fence; strip it before decoding.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn unparseable_fallback(raw: &str) -> ReflectionAnalysis {
    ReflectionAnalysis {
        analysis: "Based on your digital consumption patterns, I can see areas for improvement."
            .into(),
        suggestions: vec![
            "Set specific time limits for social media apps".into(),
            "Practice the 20-20-20 rule: every 20 minutes, look at something 20 feet away for 20 seconds".into(),
            "Create a mindful app usage routine".into(),
        ],
        micro_habits: vec![
            "Take a 5-minute break after every 30 minutes of screen time".into(),
            "Write down your intention before opening any app".into(),
        ],
        motivational_tip: "Remember, small changes lead to big transformations. You're taking the first step towards conscious digital consumption!".into(),
        raw_response: Some(raw.to_string()),
    }
}

/// Generic-advice bundle returned when the remote call itself fails.
pub fn service_failure_fallback() -> ReflectionAnalysis {
    ReflectionAnalysis {
        analysis: "I can see you're being mindful about your digital consumption. Keep tracking your usage patterns!".into(),
        suggestions: vec![
            "Set specific time limits for your most used apps".into(),
            "Practice mindful scrolling by asking 'Why am I opening this app?'".into(),
            "Create device-free zones in your home".into(),
        ],
        micro_habits: vec![
            "Take a deep breath before unlocking your phone".into(),
            "Set your phone to grayscale mode to reduce visual appeal".into(),
        ],
        motivational_tip: "Every moment of awareness is progress. You're building healthier digital habits!".into(),
        raw_response: None,
    }
}
