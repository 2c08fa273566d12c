use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use ai_doctor::application::ports::{SpeechSynthesizer, SynthesisError};
use ai_doctor::infrastructure::audio::OpenAiSpeechEngine;

type Captured = Arc<Mutex<Option<Value>>>;

async fn start_mock_speech_server(
    response_status: u16,
    response_body: &'static [u8],
) -> (String, Captured, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let captured: Captured = Arc::default();

    let app = Router::new()
        .route(
            "/v1/audio/speech",
            post(
                move |State(captured): State<Captured>, Json(body): Json<Value>| async move {
                    *captured.lock().unwrap() = Some(body);
                    let status = StatusCode::from_u16(response_status).unwrap();
                    (status, response_body).into_response()
                },
            ),
        )
        .with_state(captured.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}/v1", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, captured, shutdown_tx)
}

fn engine(base_url: String) -> OpenAiSpeechEngine {
    OpenAiSpeechEngine::new(
        "gsk_test".to_string(),
        base_url,
        "playai-tts".to_string(),
        "Fritz-PlayAI".to_string(),
    )
}

#[tokio::test]
async fn given_text_when_synthesizing_then_posts_mp3_request_and_returns_bytes() {
    let (base_url, captured, shutdown_tx) = start_mock_speech_server(200, b"ID3audio").await;

    let audio = engine(base_url).synthesize("Drink water", "en").await.unwrap();

    assert_eq!(audio, b"ID3audio");
    let body = captured.lock().unwrap().clone().unwrap();
    assert_eq!(body["model"], "playai-tts");
    assert_eq!(body["voice"], "Fritz-PlayAI");
    assert_eq!(body["input"], "Drink water");
    assert_eq!(body["response_format"], "mp3");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_error_status_when_synthesizing_then_returns_api_error() {
    let (base_url, _captured, shutdown_tx) =
        start_mock_speech_server(400, b"{\"error\":\"terms not accepted\"}").await;

    let result = engine(base_url).synthesize("Drink water", "en").await;

    assert!(matches!(result, Err(SynthesisError::ApiRequestFailed(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_empty_body_when_synthesizing_then_returns_empty_audio() {
    let (base_url, _captured, shutdown_tx) = start_mock_speech_server(200, b"").await;

    let result = engine(base_url).synthesize("Drink water", "en").await;

    assert!(matches!(result, Err(SynthesisError::EmptyAudio)));
    shutdown_tx.send(()).ok();
}
