use std::sync::Arc;
use std::time::Duration;

use ai_doctor::application::ports::{ScratchStore, ScratchStoreError};
use ai_doctor::application::services::{ErrorKind, SpeechService};
use ai_doctor::domain::{AudioFormat, ScratchPath};
use ai_doctor::infrastructure::storage::LocalScratchStore;

use crate::helpers::{FAKE_AUDIO, FailingSynthesizer, RecordingSynthesizer, count_files};

fn service_with(
    dir: &tempfile::TempDir,
    synthesizer: Arc<dyn ai_doctor::application::ports::SpeechSynthesizer>,
) -> SpeechService {
    SpeechService::new(
        synthesizer,
        Arc::new(LocalScratchStore::new(dir.path().to_path_buf()).unwrap()),
        "en".to_string(),
        Duration::from_secs(5),
    )
}

#[tokio::test]
async fn given_text_when_speaking_then_synthesizes_normalized_text() {
    let dir = tempfile::TempDir::new().unwrap();
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let service = service_with(&dir, synthesizer.clone());

    let artifact = service
        .speak("Dr. Smith recommends 5 mg")
        .await
        .unwrap();

    assert_eq!(artifact.data, FAKE_AUDIO);
    assert_eq!(artifact.format, AudioFormat::Mp3);
    assert_eq!(
        synthesizer.texts.lock().unwrap()[0],
        "Doctor Smith recommends 5 milligrams"
    );
    assert_eq!(count_files(dir.path()), 0);
}

#[tokio::test]
async fn given_synthesizer_failure_when_speaking_then_audio_processing_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = service_with(&dir, Arc::new(FailingSynthesizer));

    let error = service.speak("Rest well").await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::AudioProcessingError);
    assert!(error.to_string().starts_with("Failed to generate audio:"));
    assert_eq!(count_files(dir.path()), 0);
}

#[tokio::test]
async fn given_markup_only_text_when_speaking_then_nothing_is_synthesized() {
    let dir = tempfile::TempDir::new().unwrap();
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let service = service_with(&dir, synthesizer.clone());

    let error = service.speak("**").await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::AudioProcessingError);
    assert!(synthesizer.texts.lock().unwrap().is_empty());
}

/// Writes and deletes succeed on disk, reads always fail.
struct UnreadableStore(LocalScratchStore);

#[async_trait::async_trait]
impl ScratchStore for UnreadableStore {
    async fn put(&self, path: &ScratchPath, data: &[u8]) -> Result<u64, ScratchStoreError> {
        self.0.put(path, data).await
    }

    async fn fetch(&self, _path: &ScratchPath) -> Result<Vec<u8>, ScratchStoreError> {
        Err(ScratchStoreError::ReadFailed("disk unavailable".to_string()))
    }

    async fn delete(&self, path: &ScratchPath) -> Result<(), ScratchStoreError> {
        self.0.delete(path).await
    }

    async fn sweep(&self, max_age: Duration) -> Result<usize, ScratchStoreError> {
        self.0.sweep(max_age).await
    }
}

#[tokio::test]
async fn given_unreadable_audio_file_when_speaking_then_error_and_file_removed() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = UnreadableStore(LocalScratchStore::new(dir.path().to_path_buf()).unwrap());
    let service = SpeechService::new(
        Arc::new(RecordingSynthesizer::default()),
        Arc::new(store),
        "en".to_string(),
        Duration::from_secs(5),
    );

    let error = service.speak("Rest well").await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::AudioProcessingError);
    assert_eq!(
        error.to_string(),
        "Failed to read audio file: read failed: disk unavailable"
    );
    assert_eq!(count_files(dir.path()), 0);
}
