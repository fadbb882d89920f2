use axum::{
    extract::multipart::{Multipart, MultipartError},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

pub const NOTHING_RECEIVED: &str = "Nothing Received";

/// Errors that reach the HTTP caller. Body shape: `{"detail": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    NothingReceived,
    PayloadTooLarge(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NothingReceived => (StatusCode::BAD_REQUEST, NOTHING_RECEIVED.to_string()),
            ApiError::PayloadTooLarge(detail) => (StatusCode::PAYLOAD_TOO_LARGE, detail),
            ApiError::Internal(detail) => (StatusCode::INTERNAL_SERVER_ERROR, detail),
        };

        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            log::warn!("⚠️ Upload rejected: {}", e.body_text());
            ApiError::PayloadTooLarge(e.body_text())
        } else {
            // An unreadable form is treated the same as a missing image.
            log::warn!("⚠️ Failed to read multipart payload: {}", e.body_text());
            ApiError::NothingReceived
        }
    }
}

#[derive(Debug)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

/// Reads the `image` field of the form. Empty uploads count as absent.
pub async fn read_image_field(multipart: &mut Multipart) -> Result<Option<ImageUpload>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }

        let content_type = field.content_type().map(|c| c.to_string());
        let file_name = field.file_name().map(|n| n.to_string());
        let bytes = field.bytes().await?;

        if bytes.is_empty() {
            return Ok(None);
        }

        return Ok(Some(ImageUpload {
            bytes: bytes.to_vec(),
            content_type,
            file_name,
        }));
    }

    Ok(None)
}

pub mod server {
    use super::*;
    use axum::{
        extract::{multipart::MultipartRejection, DefaultBodyLimit, State},
        routing::{get, post},
        Router,
    };
    use std::sync::Arc;
    use tower_http::cors::CorsLayer;

    use crate::handlers::MoodAnalyzer;
    use crate::models::{AnalysisResult, MoodCategory, MoodInfo};
    use crate::services::image_mime_type;

    pub struct AppState {
        pub analyzer: Arc<MoodAnalyzer>,
    }

    pub fn create_router(analyzer: Arc<MoodAnalyzer>, max_upload_bytes: usize) -> Router {
        let state = Arc::new(AppState { analyzer });

        Router::new()
            .route("/", get(root_handler))
            .route("/start-server", get(start_server))
            .route("/mood-analysis", post(mood_analysis_handler))
            .route("/api/analyze", post(mood_analysis_handler)) // path used by the web frontend
            .route("/api/analyse", post(mood_analysis_handler))
            .route("/moods", get(list_moods))
            .route("/health", get(health_check))
            .layer(DefaultBodyLimit::max(max_upload_bytes))
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    async fn start_server() -> Json<serde_json::Value> {
        log::info!("✅ Server Started Successfully !!");
        Json(serde_json::json!({ "status": "success" }))
    }

    async fn mood_analysis_handler(
        State(state): State<Arc<AppState>>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Json<AnalysisResult>, ApiError> {
        let mut multipart = multipart.map_err(|e| {
            log::warn!("🛑 NOTHING RECEIVED: {}", e.body_text());
            ApiError::NothingReceived
        })?;

        let upload = match read_image_field(&mut multipart).await? {
            Some(upload) => upload,
            None => {
                log::warn!("🛑 NOTHING RECEIVED");
                return Err(ApiError::NothingReceived);
            }
        };

        log::info!(
            "✅ Image received successfully, size: {} bytes, filename: {:?}",
            upload.bytes.len(),
            upload.file_name
        );

        let mime_type = image_mime_type(upload.content_type.as_deref());
        let result = state
            .analyzer
            .analyze(&upload.bytes, mime_type)
            .await
            .map_err(|e| {
                log::error!("❌ Mood analysis failed: {:#}", e);
                ApiError::Internal(e.to_string())
            })?;

        if result.is_fallback() {
            log::warn!("⚠️ Responding with the fallback mood");
        }

        Ok(Json(result))
    }

    async fn list_moods() -> Json<Vec<MoodInfo>> {
        Json(MoodCategory::ALL.into_iter().map(MoodInfo::from).collect())
    }

    async fn root_handler(State(state): State<Arc<AppState>>) -> String {
        format!(
            "Moodify mood analysis server ({}) - POST an image to /mood-analysis",
            state.analyzer.model_name()
        )
    }

    async fn health_check() -> &'static str {
        "OK"
    }
}
