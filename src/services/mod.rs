pub mod ai_service; // Generative model trait + prompt types
pub mod gemini; // Google Gemini client
pub mod prompt;

pub use ai_service::{GenerativeModel, Prompt, PromptPart};
pub use gemini::GeminiService;
pub use prompt::{build_mood_prompt, image_mime_type};
