use ai_doctor::application::services::{UploadError, UploadPolicy};
use ai_doctor::domain::AssetCategory;

const MB: u64 = 1024 * 1024;

fn policy() -> UploadPolicy {
    UploadPolicy::new(
        ["jpg", ".JPEG", ".png", ".png"],
        [".mp3", ".wav"],
        5 * MB,
    )
}

#[test]
fn given_messy_extension_lists_when_building_policy_then_normalizes_and_dedups() {
    let policy = policy();

    assert_eq!(
        policy.allowed_extensions(AssetCategory::Image),
        [".jpg", ".jpeg", ".png"]
    );
    assert_eq!(policy.allowed_extensions(AssetCategory::Audio), [".mp3", ".wav"]);
}

#[test]
fn given_allowed_image_when_checking_then_returns_lowercase_extension() {
    let result = policy().check(Some("Photo.PNG"), 1024, AssetCategory::Image);

    assert_eq!(result, Ok(".png".to_string()));
}

#[test]
fn given_no_filename_when_checking_then_missing_file() {
    let result = policy().check(None, 1024, AssetCategory::Image);

    assert_eq!(result, Err(UploadError::MissingFile));
}

#[test]
fn given_blank_filename_when_checking_then_missing_file() {
    let result = policy().check(Some("  "), 1024, AssetCategory::Image);

    assert_eq!(result, Err(UploadError::MissingFile));
}

#[test]
fn given_empty_content_when_checking_then_missing_file() {
    let result = policy().check(Some("rash.png"), 0, AssetCategory::Image);

    assert_eq!(result, Err(UploadError::MissingFile));
}

#[test]
fn given_disallowed_extension_when_checking_then_lists_supported_formats() {
    let error = policy()
        .check(Some("notes.txt"), 10, AssetCategory::Image)
        .unwrap_err();

    assert_eq!(
        error.to_string(),
        "File type not allowed. Supported formats: .jpg, .jpeg, .png"
    );
    assert!(matches!(
        error,
        UploadError::InvalidFileType { extension: Some(ref ext), .. } if ext == ".txt"
    ));
}

#[test]
fn given_audio_extension_for_image_category_when_checking_then_rejects() {
    let result = policy().check(Some("voice.mp3"), 10, AssetCategory::Image);

    assert!(matches!(result, Err(UploadError::InvalidFileType { .. })));
}

#[test]
fn given_file_at_ceiling_when_checking_then_accepts() {
    let result = policy().check(Some("scan.jpg"), 5 * MB, AssetCategory::Image);

    assert!(result.is_ok());
}

#[test]
fn given_file_over_ceiling_when_checking_then_too_large_in_megabytes() {
    let error = policy()
        .check(Some("scan.jpg"), 5 * MB + 1, AssetCategory::Image)
        .unwrap_err();

    assert_eq!(error.to_string(), "File too large. Maximum size: 5.0MB");
}

#[test]
fn given_bad_extension_and_oversize_when_checking_then_extension_is_reported_first() {
    let result = policy().check(Some("scan.bmp"), 50 * MB, AssetCategory::Image);

    assert!(matches!(result, Err(UploadError::InvalidFileType { .. })));
}
