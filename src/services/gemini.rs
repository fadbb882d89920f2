use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ai_service::{GenerativeModel, Prompt, PromptPart};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Google Gemini `generateContent` client.
pub struct GeminiService {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiService {
    pub fn new(api_key: String, model: String, base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Every prompt part travels as its own user turn.
    fn build_request(prompt: &Prompt) -> GenerateRequest {
        let contents = prompt
            .parts
            .iter()
            .map(|part| {
                let part = match part {
                    PromptPart::Text(text) => RequestPart::Text { text: text.clone() },
                    PromptPart::InlineImage { mime_type, data } => RequestPart::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.clone(),
                            data: data.clone(),
                        },
                    },
                };
                Content {
                    role: "user".to_string(),
                    parts: vec![part],
                }
            })
            .collect();

        GenerateRequest { contents }
    }

    /// Joins the text parts of the first candidate.
    fn extract_text(response: GenerateResponse) -> Result<String> {
        let text = response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            anyhow::bail!("Gemini response contained no text");
        }

        Ok(text)
    }
}

#[async_trait::async_trait]
impl GenerativeModel for GeminiService {
    async fn generate(&self, prompt: &Prompt) -> Result<String> {
        let request = Self::build_request(prompt);

        log::info!("🤖 Sending request to Gemini with model: {}", self.model);
        log::debug!("📤 Request payload size: {} bytes", serde_json::to_string(&request)?.len());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        log::debug!("📥 Gemini response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await?;
            log::error!("❌ Gemini API error response: {}", error_text);
            anyhow::bail!("Gemini API error ({}): {}", status, error_text);
        }

        let response_text = response.text().await?;
        log::debug!("📄 Raw Gemini response size: {} bytes", response_text.len());

        let parsed: GenerateResponse = serde_json::from_str(&response_text)?;
        let content = Self::extract_text(parsed)?;
        log::info!("💬 Gemini response content: {}", content);

        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
