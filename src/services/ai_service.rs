use anyhow::Result;

/// One piece of a multi-part prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPart {
    Text(String),
    /// Base64-encoded image data tagged with its media type.
    InlineImage { mime_type: String, data: String },
}

/// Ordered list of parts sent to a generative model in one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prompt {
    pub parts: Vec<PromptPart>,
}

impl Prompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(PromptPart::Text(text.into()));
        self
    }

    pub fn inline_image(mut self, mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        self.parts.push(PromptPart::InlineImage {
            mime_type: mime_type.into(),
            data: data.into(),
        });
        self
    }
}

/// Trait for text-generating AI backends (Gemini, test doubles, ...)
#[async_trait::async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Sends the prompt and returns the raw generated text.
    async fn generate(&self, prompt: &Prompt) -> Result<String>;

    fn model_name(&self) -> &str;
}
