use std::sync::Arc;
use std::time::Duration;

use ai_doctor::application::ports::ScratchStore;
use ai_doctor::application::services::{
    DIAGNOSIS_INSTRUCTION, DiagnosisService, ErrorKind, UploadPolicy, build_prompt,
    image_mime_type,
};
use ai_doctor::domain::{AssetCategory, UploadedAsset};
use ai_doctor::infrastructure::storage::LocalScratchStore;
use base64::Engine as _;

use crate::helpers::{
    FAKE_DIAGNOSIS, FailingVisionModel, PNG_BYTES, RecordingVisionModel, SlowVisionModel,
    count_files,
};

fn policy() -> UploadPolicy {
    UploadPolicy::new([".jpg", ".jpeg", ".png", ".webp"], [".mp3"], 1024)
}

fn store(dir: &tempfile::TempDir) -> Arc<dyn ScratchStore> {
    Arc::new(LocalScratchStore::new(dir.path().to_path_buf()).unwrap())
}

fn image(name: &str) -> UploadedAsset {
    UploadedAsset::new(Some(name.to_string()), AssetCategory::Image, PNG_BYTES)
}

#[test]
fn given_symptoms_when_building_prompt_then_appends_them_to_instruction() {
    let prompt = build_prompt(Some("dry cough"));

    assert!(prompt.starts_with(DIAGNOSIS_INSTRUCTION));
    assert!(prompt.ends_with("\n\nPatient's described symptoms: dry cough"));
}

#[test]
fn given_no_symptoms_when_building_prompt_then_instruction_only() {
    assert_eq!(build_prompt(None), DIAGNOSIS_INSTRUCTION);
}

#[test]
fn given_extensions_when_mapping_mime_then_jpeg_is_fallback() {
    assert_eq!(image_mime_type(".png"), "image/png");
    assert_eq!(image_mime_type("webp"), "image/webp");
    assert_eq!(image_mime_type(".jpg"), "image/jpeg");
    assert_eq!(image_mime_type(".jpeg"), "image/jpeg");
}

#[tokio::test]
async fn given_valid_image_when_analyzing_then_sends_base64_data_uri_and_cleans_up() {
    let dir = tempfile::TempDir::new().unwrap();
    let vision = Arc::new(RecordingVisionModel::default());
    let service = DiagnosisService::new(
        vision.clone(),
        store(&dir),
        policy(),
        Duration::from_secs(5),
    );

    let result = service
        .analyze(image("rash.png"), Some("burning"))
        .await
        .unwrap();

    assert_eq!(result.diagnosis, FAKE_DIAGNOSIS);
    assert_eq!(result.confidence.value(), 85.0);

    let requests = vision.requests.lock().unwrap();
    let expected = base64::engine::general_purpose::STANDARD.encode(PNG_BYTES);
    assert_eq!(requests[0].image_base64, expected);
    assert_eq!(
        requests[0].data_uri(),
        format!("data:image/png;base64,{expected}")
    );
    assert!(requests[0].prompt.ends_with("symptoms: burning"));
    assert_eq!(count_files(dir.path()), 0);
}

#[tokio::test]
async fn given_whitespace_symptoms_when_analyzing_then_counted_as_supplied() {
    let dir = tempfile::TempDir::new().unwrap();
    let vision = Arc::new(RecordingVisionModel::default());
    let service = DiagnosisService::new(
        vision.clone(),
        store(&dir),
        policy(),
        Duration::from_secs(5),
    );

    let result = service.analyze(image("rash.jpg"), Some("   ")).await.unwrap();

    assert_eq!(result.confidence.value(), 85.0);
    assert!(
        vision.requests.lock().unwrap()[0]
            .prompt
            .ends_with("Patient's described symptoms:    ")
    );
}

#[tokio::test]
async fn given_empty_symptoms_when_analyzing_then_treated_as_absent() {
    let dir = tempfile::TempDir::new().unwrap();
    let vision = Arc::new(RecordingVisionModel::default());
    let service = DiagnosisService::new(
        vision.clone(),
        store(&dir),
        policy(),
        Duration::from_secs(5),
    );

    let result = service.analyze(image("rash.jpg"), Some("")).await.unwrap();

    assert_eq!(result.confidence.value(), 75.0);
    assert_eq!(vision.requests.lock().unwrap()[0].prompt, DIAGNOSIS_INSTRUCTION);
}

#[tokio::test]
async fn given_model_failure_when_analyzing_then_model_error_and_no_leftover_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = DiagnosisService::new(
        Arc::new(FailingVisionModel),
        store(&dir),
        policy(),
        Duration::from_secs(5),
    );

    let error = service.analyze(image("rash.png"), None).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ModelError);
    assert_eq!(count_files(dir.path()), 0);
}

#[tokio::test]
async fn given_slow_model_when_analyzing_then_times_out_and_cleans_up() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = DiagnosisService::new(
        Arc::new(SlowVisionModel(Duration::from_secs(5))),
        store(&dir),
        policy(),
        Duration::from_millis(50),
    );

    let error = service.analyze(image("rash.png"), None).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Timeout);
    assert_eq!(count_files(dir.path()), 0);
}

#[tokio::test]
async fn given_rejected_upload_when_analyzing_then_model_is_never_called() {
    let dir = tempfile::TempDir::new().unwrap();
    let vision = Arc::new(RecordingVisionModel::default());
    let service = DiagnosisService::new(
        vision.clone(),
        store(&dir),
        policy(),
        Duration::from_secs(5),
    );

    let error = service.analyze(image("scan.gif"), None).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::InvalidFileType);
    assert!(vision.requests.lock().unwrap().is_empty());
    assert_eq!(count_files(dir.path()), 0);
}

#[tokio::test]
async fn given_audio_asset_when_analyzing_then_rejected_as_wrong_type() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = DiagnosisService::new(
        Arc::new(RecordingVisionModel::default()),
        store(&dir),
        policy(),
        Duration::from_secs(5),
    );
    let asset = UploadedAsset::new(Some("a.png".to_string()), AssetCategory::Audio, PNG_BYTES);

    let error = service.analyze(asset, None).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::InvalidFileType);
}
