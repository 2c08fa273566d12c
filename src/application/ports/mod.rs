mod scratch_store;
mod speech_synthesizer;
mod transcription_engine;
mod vision_model;

pub use scratch_store::{ScratchStore, ScratchStoreError};
pub use speech_synthesizer::{SpeechSynthesizer, SynthesisError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
pub use vision_model::{VisionModel, VisionModelError, VisionRequest};
