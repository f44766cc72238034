//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! the backend services. Adapters in the infrastructure layer implement
//! these ports.

mod inference_port;
mod speech_port;

#[cfg(test)]
pub use inference_port::MockInferencePort;
pub use inference_port::{GenerationRequest, GenerationResult, InferencePort};
#[cfg(test)]
pub use speech_port::{MockSpeechToTextPort, MockTextToSpeechPort};
pub use speech_port::{
    AudioUpload, SpeechToTextPort, SynthesisResult, TextToSpeechPort, TranscriptionResult,
};
