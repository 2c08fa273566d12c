mod google_tts_engine;
mod groq_whisper_engine;
mod openai_speech_engine;
mod speech_engine_factory;

pub use google_tts_engine::{GoogleTtsEngine, MAX_CHUNK_CHARS, split_for_synthesis};
pub use groq_whisper_engine::{GroqWhisperEngine, audio_mime_type};
pub use openai_speech_engine::OpenAiSpeechEngine;
pub use speech_engine_factory::{SpeechEngineFactory, SpeechProvider};
