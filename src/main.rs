mod api; // HTTP intake + router
mod config;
mod handlers;
mod models;
mod services;

use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;

use api::server::create_router;
use config::Config;
use handlers::MoodAnalyzer;
use services::{GeminiService, GenerativeModel};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("🚀 Starting Moodify mood analysis server...");

    let config = Config::from_env()?;

    let gemini: Arc<dyn GenerativeModel> = Arc::new(GeminiService::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_base_url.clone(),
        config.request_timeout,
    )?);
    log::info!("✅ Gemini service initialized with model: {}", config.gemini_model);

    let analyzer = Arc::new(MoodAnalyzer::new(gemini, config.request_timeout));
    let app = create_router(analyzer, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    log::info!("🌐 Server listening on {}", config.bind_addr);

    println!("\n😊 Moodify is running!");
    println!("🌐 Server: http://{}", config.bind_addr);
    println!("📸 POST an image (form field 'image') to /mood-analysis");
    println!("\n🛑 Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("🛑 Shutting down...");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("❌ Failed to listen for Ctrl+C: {}", e);
    }
}
