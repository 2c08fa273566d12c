#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
}

impl AudioFormat {
    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
        }
    }
}

/// Synthesized speech ready to be streamed back to a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioArtifact {
    pub data: Vec<u8>,
    pub format: AudioFormat,
}

impl AudioArtifact {
    pub fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    pub fn download_name(&self) -> String {
        format!("response.{}", self.format.extension())
    }
}
