use std::sync::Arc;
use std::time::Duration;

use ai_doctor::application::ports::ScratchStore;
use ai_doctor::application::services::ScratchLease;
use ai_doctor::infrastructure::storage::LocalScratchStore;

use crate::helpers::count_files;

fn store(dir: &tempfile::TempDir) -> Arc<dyn ScratchStore> {
    Arc::new(LocalScratchStore::new(dir.path().to_path_buf()).unwrap())
}

#[tokio::test]
async fn given_acquired_lease_when_reading_then_returns_written_bytes() {
    let dir = tempfile::TempDir::new().unwrap();

    let lease = ScratchLease::acquire(store(&dir), ".jpg", b"image-bytes")
        .await
        .unwrap();

    assert!(lease.path().as_str().ends_with(".jpg"));
    assert_eq!(lease.read().await.unwrap(), b"image-bytes");
    assert_eq!(count_files(dir.path()), 1);

    lease.release().await;
    assert_eq!(count_files(dir.path()), 0);
}

#[tokio::test]
async fn given_unreleased_lease_when_dropped_then_file_is_removed_in_background() {
    let dir = tempfile::TempDir::new().unwrap();

    let lease = ScratchLease::acquire(store(&dir), "mp3", b"audio")
        .await
        .unwrap();
    assert_eq!(count_files(dir.path()), 1);
    drop(lease);

    for _ in 0..50 {
        if count_files(dir.path()) == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(count_files(dir.path()), 0);
}

#[tokio::test]
async fn given_file_already_gone_when_releasing_then_does_not_panic() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = store(&dir);

    let lease = ScratchLease::acquire(Arc::clone(&store), "png", b"x")
        .await
        .unwrap();
    store.delete(lease.path()).await.unwrap();

    lease.release().await;
    assert_eq!(count_files(dir.path()), 0);
}
