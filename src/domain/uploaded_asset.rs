use std::path::Path;

use bytes::Bytes;

use super::asset_category::AssetCategory;

/// Bytes received from a client together with the name it was sent under.
#[derive(Debug, Clone)]
pub struct UploadedAsset {
    pub filename: Option<String>,
    pub category: AssetCategory,
    pub data: Bytes,
}

impl UploadedAsset {
    pub fn new(filename: Option<String>, category: AssetCategory, data: impl Into<Bytes>) -> Self {
        Self {
            filename,
            category,
            data: data.into(),
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }

    /// Lowercased extension including the leading dot, e.g. `.jpg`.
    pub fn extension(&self) -> Option<String> {
        self.filename.as_deref().and_then(extension_of)
    }
}

/// Extension of the final path component; dotfiles such as `.jpg` have none.
pub fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}
