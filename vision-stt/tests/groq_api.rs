//! Tests for `GroqStt` against a local fake of the transcription endpoint.

use vision_stt::{AudioUpload, GroqStt, SpeechToText, SttError};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TRANSCRIPTIONS_PATH: &str = "/openai/v1/audio/transcriptions";

fn client_for(server: &MockServer) -> GroqStt {
    GroqStt::new(
        "gsk-test".to_string(),
        format!("{}/openai/v1", server.uri()),
        None,
    )
}

#[tokio::test]
async fn sends_deterministic_multipart_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TRANSCRIPTIONS_PATH))
        .and(header("authorization", "Bearer gsk-test"))
        .and(body_string_contains("name=\"model\"\r\n\r\nwhisper-large-v3-turbo"))
        .and(body_string_contains("name=\"response_format\"\r\n\r\ntext"))
        .and(body_string_contains("name=\"temperature\"\r\n\r\n0"))
        .and(body_string_contains("filename=\"talk.m4a\""))
        .and(body_string_contains("fake audio payload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("  hello world  \n"))
        .expect(1)
        .mount(&server)
        .await;

    let stt = client_for(&server);
    let text = stt
        .transcribe(AudioUpload::new(b"fake audio payload", "talk.m4a", "audio/m4a"))
        .await
        .unwrap();

    // Trimming is the caller's job
    assert_eq!(text, "  hello world  \n");
}

#[tokio::test]
async fn omits_language_for_auto_detection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TRANSCRIPTIONS_PATH))
        .and(body_string_contains("name=\"language\""))
        .respond_with(ResponseTemplate::new(400))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(TRANSCRIPTIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("bonjour"))
        .mount(&server)
        .await;

    let stt = client_for(&server);
    let text = stt
        .transcribe(AudioUpload::new(b"audio", "fr.mp3", "audio/mpeg"))
        .await
        .unwrap();
    assert_eq!(text, "bonjour");
}

#[tokio::test]
async fn non_success_status_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TRANSCRIPTIONS_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .expect(1)
        .mount(&server)
        .await;

    let stt = client_for(&server);
    let err = stt
        .transcribe(AudioUpload::new(b"audio", "clip.wav", "audio/wav"))
        .await
        .unwrap_err();

    match &err {
        SttError::Api { status, body } => {
            assert_eq!(*status, 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("expected API error, got {other:?}"),
    }
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn unreachable_server_is_request_error() {
    let stt = GroqStt::new(
        "gsk-test".to_string(),
        "http://127.0.0.1:1/openai/v1".to_string(),
        None,
    );

    let err = stt
        .transcribe(AudioUpload::new(b"audio", "clip.wav", "audio/wav"))
        .await
        .unwrap_err();
    assert!(matches!(err, SttError::Request(_)));
    assert_eq!(err.status(), None);
}
