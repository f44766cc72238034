//! Integration tests for the infrastructure crate
//!
//! The adapters are driven over real HTTP against wiremock backends and
//! wired into the application services the way the server wires them.

use std::sync::Arc;

use application::ports::{AudioUpload, InferencePort, SpeechToTextPort, TextToSpeechPort};
use application::{ChatService, FallbackPolicy, StatusService, SynthesisService, TranscriptionService};
use domain::{BackendOutcome, Provenance};
use infrastructure::{InferenceAdapter, SpeechToTextAdapter, TextToSpeechAdapter};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn speech_config(stt: &str, tts: &str) -> ai_speech::SpeechConfig {
    ai_speech::SpeechConfig {
        stt_base_url: stt.to_string(),
        tts_base_url: tts.to_string(),
        stt_timeout_ms: 2_000,
        tts_timeout_ms: 2_000,
        health_timeout_ms: 500,
        ..Default::default()
    }
}

fn inference_config(base_url: &str) -> ai_core::InferenceConfig {
    ai_core::InferenceConfig {
        base_url: base_url.to_string(),
        timeout_ms: 2_000,
        health_timeout_ms: 500,
    }
}

mod inference_tests {
    use super::*;

    #[tokio::test]
    async fn chat_goes_live_through_the_adapter() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(body_json(json!({"prompt": "hola", "conversation_id": "c-1"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"response": "¡Hola!", "model": "luz-7b"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let adapter = Arc::new(InferenceAdapter::new(inference_config(&server.uri())).unwrap());
        let service = ChatService::new(adapter, FallbackPolicy::default());

        let envelope = service.chat("hola", Some("c-1"), None).await.unwrap();

        assert_eq!(envelope.status, Provenance::Success);
        assert_eq!(envelope.response, "¡Hola!");
        assert_eq!(envelope.model.as_deref(), Some("luz-7b"));
        assert!(envelope.note.is_none());
    }

    #[tokio::test]
    async fn chat_falls_back_on_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
            .mount(&server)
            .await;

        let adapter = Arc::new(InferenceAdapter::new(inference_config(&server.uri())).unwrap());
        let service = ChatService::new(adapter, FallbackPolicy::default());

        let envelope = service.chat("ping", None, None).await.unwrap();

        assert_eq!(envelope.status, Provenance::Fallback);
        assert!(envelope.response.contains("\"ping\""));
        assert!(!envelope.conversation_id.is_empty());
        assert!(!envelope.note.unwrap().contains("model crashed"));
    }

    #[tokio::test]
    async fn unreachable_backend_is_classified() {
        let adapter = InferenceAdapter::new(inference_config("http://127.0.0.1:1")).unwrap();
        assert_eq!(adapter.health().await, BackendOutcome::Unreachable);
    }
}

mod speech_tests {
    use super::*;

    #[tokio::test]
    async fn transcription_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transcribe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "text": "buenos días",
                "language": "es",
                "duration": 1.5
            })))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = SpeechToTextAdapter::new(&speech_config(&server.uri(), &server.uri())).unwrap();
        let upload = AudioUpload::new(b"RIFF-voice".to_vec(), "note.wav", "audio/wav");

        let BackendOutcome::Success(result) = adapter.transcribe(&upload).await else {
            unreachable!("Expected Success");
        };

        assert_eq!(result.text, "buenos días");
        assert_eq!(result.language.as_deref(), Some("es"));
        assert_eq!(result.duration_seconds, Some(1.5));
    }

    #[tokio::test]
    async fn transcription_unreachable_is_an_error_by_default() {
        let adapter = Arc::new(
            SpeechToTextAdapter::new(&speech_config("http://127.0.0.1:1", "http://127.0.0.1:1"))
                .unwrap(),
        );
        let service = TranscriptionService::new(adapter, FallbackPolicy::default());
        let upload = AudioUpload::new(vec![1, 2, 3], "note.ogg", "audio/ogg");

        let err = service.transcribe(upload).await.unwrap_err();

        assert!(matches!(
            err,
            application::ApplicationError::BackendUnavailable(domain::BackendKind::SpeechToText)
        ));
    }

    #[tokio::test]
    async fn synthesis_reads_wav_header() {
        let server = MockServer::start().await;
        let wav = ai_speech::wav::silence(16_000, 0.25);
        Mock::given(method("POST"))
            .and(path("/synthesize"))
            .and(body_json(json!({"text": "hola", "voice": "luz"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/wav")
                    .set_body_bytes(wav.clone()),
            )
            .expect(1)
            .mount(&server)
            .await;

        let adapter = Arc::new(
            TextToSpeechAdapter::new(&speech_config(&server.uri(), &server.uri())).unwrap(),
        );
        let voice = adapter.default_voice().to_string();
        let service = SynthesisService::new(adapter, FallbackPolicy::default(), voice);

        let envelope = service.synthesize("hola", None).await.unwrap();

        assert_eq!(envelope.status, Provenance::Success);
        assert_eq!(envelope.sample_rate, 16_000);
        assert!((envelope.duration_seconds - 0.25).abs() < 1e-9);
        assert_eq!(envelope.voice, "luz");
    }

    #[tokio::test]
    async fn synthesis_failure_yields_silent_clip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/synthesize"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let adapter = Arc::new(
            TextToSpeechAdapter::new(&speech_config(&server.uri(), &server.uri())).unwrap(),
        );
        let service = SynthesisService::new(adapter, FallbackPolicy::default(), "luz");

        let envelope = service.synthesize("hola", Some("nova")).await.unwrap();

        assert_eq!(envelope.status, Provenance::Fallback);
        assert_eq!(envelope.sample_rate, 24_000);
        assert!((envelope.duration_seconds - 2.0).abs() < 1e-9);
        assert_eq!(envelope.voice, "nova");
    }
}

mod status_tests {
    use super::*;

    #[tokio::test]
    async fn mixed_backends_are_reported_individually() {
        let healthy = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&healthy)
            .await;

        let broken = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&broken)
            .await;

        let speech = speech_config(&healthy.uri(), &broken.uri());
        let stt: Arc<dyn SpeechToTextPort> = Arc::new(SpeechToTextAdapter::new(&speech).unwrap());
        let tts: Arc<dyn TextToSpeechPort> = Arc::new(TextToSpeechAdapter::new(&speech).unwrap());
        let llm: Arc<dyn InferencePort> =
            Arc::new(InferenceAdapter::new(inference_config("http://127.0.0.1:1")).unwrap());

        let report = StatusService::new(stt, llm, tts).check_all().await;
        let value = serde_json::to_value(&report).unwrap();

        assert!(!report.all_online);
        assert_eq!(value["services"]["speech_to_text"]["status"], "online");
        assert_eq!(value["services"]["speech_synthesis"]["status"], "error");
        assert_eq!(value["services"]["speech_synthesis"]["http_status"], 500);
        assert_eq!(value["services"]["language_model"]["status"], "offline");
    }
}
