//! Adapters implementing application ports

mod inference_adapter;
mod speech_adapter;

pub use inference_adapter::InferenceAdapter;
pub use speech_adapter::{SpeechToTextAdapter, TextToSpeechAdapter};
