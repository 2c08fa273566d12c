use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use ai_doctor::application::ports::ScratchStore;
use ai_doctor::infrastructure::audio::{GroqWhisperEngine, SpeechEngineFactory};
use ai_doctor::infrastructure::llm::GroqVisionClient;
use ai_doctor::infrastructure::observability::{TracingConfig, init_tracing};
use ai_doctor::infrastructure::storage::LocalScratchStore;
use ai_doctor::presentation::{AppState, Collaborators, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let vars: HashMap<String, String> = std::env::vars().collect();
    let environment = Environment::from_vars(&vars).map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load configuration")?;

    init_tracing(&TracingConfig::from_settings(&settings.logging, environment))
        .context("Failed to install tracing subscriber")?;

    if !settings.has_api_key() {
        tracing::warn!("GROQ_API_KEY is not set; model calls will fail and /health reports degraded");
    }

    let upload_store = Arc::new(
        LocalScratchStore::new(settings.upload_dir()).context("Failed to prepare upload dir")?,
    );
    let audio_store = Arc::new(
        LocalScratchStore::new(settings.temp_audio_dir())
            .context("Failed to prepare temp audio dir")?,
    );

    sweep(upload_store.as_ref(), settings.stale_after(), "upload").await;
    sweep(audio_store.as_ref(), settings.stale_after(), "audio").await;

    let api_key = settings.api_key().unwrap_or_default();
    let vision_model = GroqVisionClient::new(
        &api_key,
        Some(&settings.groq.base_url),
        &settings.vision.model,
    )
    .with_sampling(settings.vision.max_tokens, settings.vision.temperature);
    let transcription_engine = GroqWhisperEngine::new(
        api_key,
        Some(settings.groq.base_url.clone()),
        Some(settings.transcription.model.clone()),
    );
    let speech_synthesizer = SpeechEngineFactory::create(
        settings.speech_provider(),
        &settings.speech.tld,
        settings.api_key(),
        settings.speech_base_url(),
        &settings.speech.model,
        &settings.speech.voice,
    )
    .context("Failed to configure speech synthesis")?;

    let state = AppState::new(
        &settings,
        Collaborators {
            vision_model: Arc::new(vision_model),
            transcription_engine: Arc::new(transcription_engine),
            speech_synthesizer,
            upload_store: upload_store.clone(),
            audio_store: audio_store.clone(),
        },
    );

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = %environment,
        vision_model = %settings.vision.model,
        "Listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweep(audio_store.as_ref(), Duration::ZERO, "audio").await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn sweep(store: &dyn ScratchStore, max_age: Duration, label: &str) {
    match store.sweep(max_age).await {
        Ok(0) => {}
        Ok(removed) => tracing::info!(store = label, removed, "Removed stale scratch files"),
        Err(e) => tracing::warn!(store = label, error = %e, "Scratch sweep failed"),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
