use anyhow::Result;
use base64::{engine::general_purpose, Engine};

use super::ai_service::Prompt;

/// Instruction block: the four categories, the JSON output shape and worked examples.
pub const MOOD_INSTRUCTIONS: &str = include_str!("../../prompts/mood_detection.txt");

/// Media type declared when the upload didn't carry a usable one.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Picks the media type sent alongside the image.
pub fn image_mime_type(content_type: Option<&str>) -> &str {
    match content_type.map(str::trim) {
        Some(ct) if ct.to_ascii_lowercase().starts_with("image/") => ct,
        _ => DEFAULT_IMAGE_MIME,
    }
}

/// Builds the two-part mood detection prompt: instructions, then the image.
pub fn build_mood_prompt(image: &[u8], mime_type: &str) -> Result<Prompt> {
    if image.is_empty() {
        anyhow::bail!("cannot build a mood prompt from an empty image");
    }

    let encoded = general_purpose::STANDARD.encode(image);
    log::debug!(
        "📊 Image size: {} bytes, base64 size: {} bytes",
        image.len(),
        encoded.len()
    );

    Ok(Prompt::new()
        .text(MOOD_INSTRUCTIONS)
        .inline_image(mime_type, encoded))
}
