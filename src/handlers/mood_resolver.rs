//! Normalization of raw model replies into an [`AnalysisResult`].
//!
//! The reply is free-form generated text, so every stage is fallible and the
//! first failure short-circuits to [`AnalysisResult::fallback`].

use serde_json::{Map, Value};

use crate::models::{AnalysisResult, MoodCategory};

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("reply is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("reply is not a JSON object")]
    NotAnObject,
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` is not a string")]
    InvalidFieldType(&'static str),
    #[error("comment is empty")]
    EmptyComment,
    #[error("invalid mood category: {0}")]
    UnknownMood(String),
}

/// Resolves a raw reply, substituting the fallback on any failure.
pub fn resolve(raw: &str) -> AnalysisResult {
    match try_resolve(raw) {
        Ok(result) => {
            log::info!("✅ Mood Analysis: {}", result.mood);
            log::info!("✅ Comment: {}", result.comment);
            result
        }
        Err(ResolveError::Parse(e)) => {
            log::warn!("❌ JSON Parse Error: {}", e);
            log::warn!("Raw response: {}", raw);
            AnalysisResult::fallback()
        }
        Err(e) => {
            log::warn!("❌ Invalid mood reply: {}", e);
            AnalysisResult::fallback()
        }
    }
}

pub fn try_resolve(raw: &str) -> Result<AnalysisResult, ResolveError> {
    let cleaned = strip_fencing(raw);
    let value = parse_reply(cleaned)?;
    let (mood, comment) = extract_fields(&value)?;
    let mood = validate_mood(mood)?;

    Ok(AnalysisResult::success(mood, comment))
}

/// Removes a leading ```` ```json ```` / ```` ``` ```` fence and a trailing ```` ``` ````.
pub fn strip_fencing(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Parses as-is first, then again with raw line breaks escaped.
fn parse_reply(text: &str) -> Result<Value, ResolveError> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(_) => {
            let escaped = text.replace('\n', "\\n");
            Ok(serde_json::from_str(&escaped)?)
        }
    }
}

fn extract_fields(value: &Value) -> Result<(&str, &str), ResolveError> {
    let object: &Map<String, Value> = value.as_object().ok_or(ResolveError::NotAnObject)?;

    let mood = object.get("mood").ok_or(ResolveError::MissingField("mood"))?;
    let comment = object
        .get("comment")
        .ok_or(ResolveError::MissingField("comment"))?;

    let mood = mood.as_str().ok_or(ResolveError::InvalidFieldType("mood"))?;
    let comment = comment
        .as_str()
        .ok_or(ResolveError::InvalidFieldType("comment"))?;

    if comment.trim().is_empty() {
        return Err(ResolveError::EmptyComment);
    }

    Ok((mood, comment))
}

fn validate_mood(mood: &str) -> Result<MoodCategory, ResolveError> {
    MoodCategory::from_string(mood).ok_or_else(|| ResolveError::UnknownMood(mood.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_mood_is_normalized() {
        let result = resolve(r#"{"mood": "happy", "comment": "x"}"#);

        assert_eq!(result, AnalysisResult::success(MoodCategory::Happy, "x"));
        assert_eq!(result.status, "success");
    }

    #[test]
    fn test_fenced_reply() {
        let result = resolve("```json\n{\"mood\": \"SAD\", \"comment\": \"y\"}\n```");
        assert_eq!(result, AnalysisResult::success(MoodCategory::Sad, "y"));
    }

    #[test]
    fn test_untagged_fence() {
        let result = resolve("```\n{\"mood\": \"LOVE\", \"comment\": \"z\"}\n```\n");
        assert_eq!(result, AnalysisResult::success(MoodCategory::Love, "z"));
    }

    #[test]
    fn test_plain_text_falls_back() {
        assert_eq!(resolve("I think they are happy"), AnalysisResult::fallback());
        assert!(matches!(
            try_resolve("I think they are happy"),
            Err(ResolveError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_mood_falls_back() {
        let raw = r#"{"mood": "CONFUSED", "comment": "hmm"}"#;

        assert_eq!(resolve(raw), AnalysisResult::fallback());
        assert!(matches!(try_resolve(raw), Err(ResolveError::UnknownMood(m)) if m == "CONFUSED"));
    }

    #[test]
    fn test_padded_mood_falls_back() {
        assert_eq!(
            resolve(r#"{"mood": " happy ", "comment": "x"}"#),
            AnalysisResult::fallback()
        );
        assert!(matches!(
            try_resolve("{\"mood\": \"SAD\\t\", \"comment\": \"x\"}"),
            Err(ResolveError::UnknownMood(m)) if m == "SAD\t"
        ));
    }

    #[test]
    fn test_missing_fields_fall_back() {
        assert_eq!(resolve(r#"{"mood": "SAD"}"#), AnalysisResult::fallback());
        assert_eq!(resolve(r#"{"comment": "y"}"#), AnalysisResult::fallback());
        assert!(matches!(
            try_resolve(r#"{"mood": "SAD"}"#),
            Err(ResolveError::MissingField("comment"))
        ));
    }

    #[test]
    fn test_non_object_and_non_string_fields_fall_back() {
        assert!(matches!(try_resolve("42"), Err(ResolveError::NotAnObject)));
        assert!(matches!(try_resolve(r#"["HAPPY"]"#), Err(ResolveError::NotAnObject)));
        assert!(matches!(
            try_resolve(r#"{"mood": 3, "comment": "y"}"#),
            Err(ResolveError::InvalidFieldType("mood"))
        ));
        assert!(matches!(
            try_resolve(r#"{"mood": "SAD", "comment": null}"#),
            Err(ResolveError::InvalidFieldType("comment"))
        ));
        assert!(matches!(
            try_resolve(r#"{"mood": "SAD", "comment": "  "}"#),
            Err(ResolveError::EmptyComment)
        ));
    }

    #[test]
    fn test_raw_line_breaks_inside_comment_are_repaired() {
        let raw = "{\"mood\": \"energetic\", \"comment\": \"line one\nline two\"}";
        let result = resolve(raw);

        assert_eq!(result.mood, MoodCategory::Energetic);
        // The escaped sequence decodes back to a real line break.
        assert_eq!(result.comment, "line one\nline two");
    }

    #[test]
    fn test_escaped_line_breaks_are_kept_as_parsed() {
        let raw = r#"{"mood": "HAPPY", "comment": "a\\nb"}"#;
        assert_eq!(resolve(raw).comment, "a\\nb");
    }

    #[test]
    fn test_strip_fencing() {
        assert_eq!(strip_fencing("  ```json {} ```  "), "{}");
        assert_eq!(strip_fencing("```{}"), "{}");
        assert_eq!(strip_fencing("{}"), "{}");
        assert_eq!(strip_fencing(""), "");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        for raw in [
            r#"{"mood": "love", "comment": "x"}"#,
            "not json at all",
            r#"{"mood": "CONFUSED", "comment": "x"}"#,
        ] {
            assert_eq!(resolve(raw), resolve(raw));
        }
    }
}
