use serde::{Deserialize, Serialize};

/// Comment returned whenever the model reply can't be trusted.
/// Segments are joined with a literal backslash-n, same as model comments.
pub const FALLBACK_COMMENT: &str = "Oops! Something went wrong with our mood analyzer! 😅🔧\\nBut hey, let's stay positive anyway! 😊✨\\nEnjoy some great music while we fix things! 🎵💫\\nYour mood matters, even if tech is moody! 😄🎶\\nKeep smiling and jamming on! 🌟💖🎉";

pub const SUCCESS_STATUS: &str = "success";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MoodCategory {
    Happy,
    Sad,
    Love,
    Energetic,
}

impl MoodCategory {
    pub const ALL: [MoodCategory; 4] = [
        MoodCategory::Happy,
        MoodCategory::Sad,
        MoodCategory::Love,
        MoodCategory::Energetic,
    ];

    /// Case-insensitive lookup; the value is uppercased before matching.
    /// Surrounding whitespace is not a member.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "HAPPY" => Some(MoodCategory::Happy),
            "SAD" => Some(MoodCategory::Sad),
            "LOVE" => Some(MoodCategory::Love),
            "ENERGETIC" => Some(MoodCategory::Energetic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodCategory::Happy => "HAPPY",
            MoodCategory::Sad => "SAD",
            MoodCategory::Love => "LOVE",
            MoodCategory::Energetic => "ENERGETIC",
        }
    }

    /// Short headline shown next to the category in the mood listing.
    pub fn message(&self) -> &'static str {
        match self {
            MoodCategory::Happy => {
                "You are looking Happy and glowing with positivity! Let's make your day better with music."
            }
            MoodCategory::Sad => "You are looking Sad. Let's lift your mood with a calm track.",
            MoodCategory::Love => "You are in Love. Let's make you feel it deeper.",
            MoodCategory::Energetic => {
                "You are looking Energetic today. Let's play something that matches your vibe."
            }
        }
    }
}

impl std::fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Body of a `/mood-analysis` response.
///
/// `status` is always `"success"`: failures are absorbed into
/// [`AnalysisResult::fallback`] instead of being reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: String,
    pub mood: MoodCategory,
    pub comment: String,
}

impl AnalysisResult {
    pub fn success(mood: MoodCategory, comment: impl Into<String>) -> Self {
        Self {
            status: SUCCESS_STATUS.to_string(),
            mood,
            comment: comment.into(),
        }
    }

    pub fn fallback() -> Self {
        Self::success(MoodCategory::Happy, FALLBACK_COMMENT)
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MoodInfo {
    pub mood: MoodCategory,
    pub message: &'static str,
}

impl From<MoodCategory> for MoodInfo {
    fn from(mood: MoodCategory) -> Self {
        Self {
            mood,
            message: mood.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_from_string_is_case_insensitive() {
        assert_eq!(MoodCategory::from_string("happy"), Some(MoodCategory::Happy));
        assert_eq!(MoodCategory::from_string("Energetic"), Some(MoodCategory::Energetic));
        assert_eq!(MoodCategory::from_string(" love "), None);
        assert_eq!(MoodCategory::from_string("SAD\t"), None);
        assert_eq!(MoodCategory::from_string("CONFUSED"), None);
        assert_eq!(MoodCategory::from_string(""), None);
    }

    #[test]
    fn test_result_serializes_with_uppercase_mood() {
        let result = AnalysisResult::success(MoodCategory::Sad, "y");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"status": "success", "mood": "SAD", "comment": "y"})
        );

        let decoded: AnalysisResult = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, result);
    }

    #[test]
    fn test_fallback_shape() {
        let fallback = AnalysisResult::fallback();

        assert_eq!(fallback.status, "success");
        assert_eq!(fallback.mood, MoodCategory::Happy);
        assert_eq!(fallback.comment.split("\\n").count(), 5);
        assert!(!fallback.comment.contains('\n'));
        assert!(fallback.is_fallback());
    }
}
