use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use crate::handlers::mood_resolver;
use crate::models::AnalysisResult;
use crate::services::{build_mood_prompt, GenerativeModel};

/// Turns an uploaded image into a validated mood result.
pub struct MoodAnalyzer {
    model: Arc<dyn GenerativeModel>,
    timeout: Duration,
}

impl MoodAnalyzer {
    pub fn new(model: Arc<dyn GenerativeModel>, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    /// Only prompt construction can fail; model errors and timeouts
    /// resolve to [`AnalysisResult::fallback`].
    pub async fn analyze(&self, image: &[u8], mime_type: &str) -> Result<AnalysisResult> {
        log::debug!("📸 Starting mood analysis ({} bytes, {})", image.len(), mime_type);

        let prompt = build_mood_prompt(image, mime_type)?;

        let raw = match tokio::time::timeout(self.timeout, self.model.generate(&prompt)).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                log::error!("❌ Model call failed: {:#}", e);
                return Ok(AnalysisResult::fallback());
            }
            Err(_) => {
                log::error!("⏱️ Model call timed out after {:?}", self.timeout);
                return Ok(AnalysisResult::fallback());
            }
        };

        Ok(mood_resolver::resolve(&raw))
    }
}
