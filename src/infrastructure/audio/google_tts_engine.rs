use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{SpeechSynthesizer, SynthesisError};

/// Longest piece of text the translate endpoint will voice in one request.
pub const MAX_CHUNK_CHARS: usize = 100;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Google Translate's public text-to-speech endpoint. Long text is voiced
/// piecewise and the MP3 segments are concatenated.
pub struct GoogleTtsEngine {
    client: Client,
    base_url: String,
}

impl GoogleTtsEngine {
    pub fn new(tld: &str) -> Self {
        Self::with_base_url(&format!("https://translate.google.{tld}"))
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_segment(
        &self,
        chunk: &str,
        language: &str,
        index: usize,
        total: usize,
    ) -> Result<Vec<u8>, SynthesisError> {
        let url = format!("{}/translate_tts", self.base_url);
        let total = total.to_string();
        let index = index.to_string();
        let text_len = chunk.chars().count().to_string();

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", language),
                ("ttsspeed", "1"),
                ("total", total.as_str()),
                ("idx", index.as_str()),
                ("textlen", text_len.as_str()),
                ("client", "tw-ob"),
            ])
            .send()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("request: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::ApiRequestFailed(format!(
                "status {status}: {body}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("body: {e}")))?;

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTtsEngine {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SynthesisError> {
        let chunks = split_for_synthesis(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SynthesisError::EmptyInput);
        }

        tracing::debug!(segments = chunks.len(), language, "Requesting Google TTS");

        let mut audio = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            let segment = self
                .fetch_segment(chunk, language, index, chunks.len())
                .await?;
            audio.extend_from_slice(&segment);
        }

        if audio.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }

        Ok(audio)
    }
}

/// Packs words into pieces of at most `max_chars` characters, closing a piece
/// early at clause punctuation once it is at least half full.
pub fn split_for_synthesis(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        for piece in split_long_word(word, max_chars) {
            let piece_len = piece.chars().count();
            if current_len > 0 && current_len + 1 + piece_len > max_chars {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(&piece);
            current_len += piece_len;

            if ends_clause(&piece) && current_len * 2 >= max_chars {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
        }
    }

    if current_len > 0 {
        chunks.push(current);
    }

    chunks
}

fn split_long_word(word: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(max_chars)
        .map(|piece| piece.iter().collect())
        .collect()
}

fn ends_clause(piece: &str) -> bool {
    piece.ends_with(['.', ',', ';', ':', '!', '?'])
}
