use std::fmt;

use uuid::Uuid;

/// Location of a scratch file, relative to the root of its store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScratchPath(String);

impl ScratchPath {
    /// Fresh collision-free name carrying the given extension (`.png` or `png`).
    pub fn unique(extension: &str) -> Self {
        let extension = extension.trim_start_matches('.');
        if extension.is_empty() {
            Self(Uuid::new_v4().to_string())
        } else {
            Self(format!("{}.{}", Uuid::new_v4(), extension))
        }
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScratchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
