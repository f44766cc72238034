//! AI Speech - speech-to-text and speech-synthesis backend clients
//!
//! Provides traits and HTTP implementations for the two speech backends:
//! - `SpeechToText` - forwards uploaded audio to `POST /transcribe`
//! - `TextToSpeech` - forwards text to `POST /synthesize`
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `providers` module contains the HTTP implementations (adapters)
//! - `wav` module encodes and inspects PCM WAV files
//!
//! Every backend call ends in a [`domain::BackendOutcome`]; none of them
//! return an error.
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{AudioData, HttpSpeechToText, SpeechConfig, SpeechToText};
//!
//! let stt = HttpSpeechToText::new(&SpeechConfig::default())?;
//! let audio = AudioData::new(bytes, "note.wav", "audio/wav");
//! match stt.transcribe(&audio).await {
//!     BackendOutcome::Success(t) => println!("Transcribed: {}", t.text),
//!     other => println!("Backend failed: {}", other.kind()),
//! }
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;
pub mod wav;

pub use config::SpeechConfig;
pub use error::SpeechError;
pub use ports::{SpeechToText, TextToSpeech};
pub use providers::http::{HttpSpeechToText, HttpTextToSpeech};
pub use types::{AudioData, SynthesizedSpeech, Transcription};
pub use wav::WavInfo;
