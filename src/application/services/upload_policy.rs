use crate::domain::{AssetCategory, UploadedAsset, extension_of};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UploadError {
    #[error("No file provided")]
    MissingFile,
    #[error("File type not allowed. Supported formats: {}", joined(.allowed))]
    InvalidFileType {
        extension: Option<String>,
        allowed: Vec<String>,
    },
    #[error("File too large. Maximum size: {:.1}MB", megabytes(.max_bytes))]
    FileTooLarge {
        size_bytes: Option<u64>,
        max_bytes: u64,
    },
}

fn joined(list: &[String]) -> String {
    list.join(", ")
}

fn megabytes(bytes: &u64) -> f64 {
    *bytes as f64 / (1024.0 * 1024.0)
}

/// Acceptance rules for uploads, checked before anything touches disk.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    image_extensions: Vec<String>,
    audio_extensions: Vec<String>,
    max_file_size: u64,
}

impl UploadPolicy {
    pub fn new<I, A, S>(image_extensions: I, audio_extensions: A, max_file_size: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        A: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            image_extensions: normalize_all(image_extensions),
            audio_extensions: normalize_all(audio_extensions),
            max_file_size,
        }
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub fn allowed_extensions(&self, category: AssetCategory) -> &[String] {
        match category {
            AssetCategory::Image => &self.image_extensions,
            AssetCategory::Audio => &self.audio_extensions,
        }
    }

    /// Returns the accepted, lowercased extension.
    pub fn validate(&self, asset: &UploadedAsset) -> Result<String, UploadError> {
        self.check(asset.filename.as_deref(), asset.size_bytes(), asset.category)
    }

    pub fn check(
        &self,
        filename: Option<&str>,
        size_bytes: u64,
        category: AssetCategory,
    ) -> Result<String, UploadError> {
        let filename = match filename.map(str::trim) {
            Some(name) if !name.is_empty() && size_bytes > 0 => name,
            _ => return Err(UploadError::MissingFile),
        };

        let allowed = self.allowed_extensions(category);
        let extension = extension_of(filename);
        let accepted = extension
            .as_ref()
            .filter(|ext| allowed.contains(*ext))
            .cloned();
        let Some(accepted) = accepted else {
            return Err(UploadError::InvalidFileType {
                extension,
                allowed: allowed.to_vec(),
            });
        };

        if size_bytes > self.max_file_size {
            return Err(UploadError::FileTooLarge {
                size_bytes: Some(size_bytes),
                max_bytes: self.max_file_size,
            });
        }

        Ok(accepted)
    }
}

fn normalize_all<I, S>(extensions: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for raw in extensions {
        let trimmed = raw.as_ref().trim().trim_start_matches('.').to_lowercase();
        if trimmed.is_empty() {
            continue;
        }
        let ext = format!(".{trimmed}");
        if !normalized.contains(&ext) {
            normalized.push(ext);
        }
    }
    normalized
}
