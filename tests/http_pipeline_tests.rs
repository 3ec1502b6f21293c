//! Full pipeline against mocked Groq endpoints

use oral_eval::application::ports::NoopObserver;
use oral_eval::application::{EvaluateExamUseCase, EvaluateInput};
use oral_eval::domain::evaluation::{Confidence, Subject};
use oral_eval::domain::{AudioData, AudioMimeType};
use oral_eval::infrastructure::{GroqCompletion, GroqWhisperTranscriber};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    }))
}

async fn mount_chat(server: &MockServer, prompt_marker: &str, content: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains(prompt_marker))
        .respond_with(chat_reply(content))
        .expect(1)
        .mount(server)
        .await;
}

fn input() -> EvaluateInput {
    EvaluateInput {
        audio: AudioData::new(vec![0x52, 0x49, 0x46, 0x46], AudioMimeType::Wav),
        reference_material: "Newton's first law: a body stays at rest or in uniform motion \
            unless a net force acts on it. This property is called inertia."
            .to_string(),
        rubric: "Inertia named: 5 points. Net force condition: 5 points.".to_string(),
        normalize: true,
        language_hint: Some("en".to_string()),
    }
}

#[tokio::test]
async fn groq_pipeline_produces_evaluation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .and(body_string_contains("whisper-large-v3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "um so a body stays at rest unless uh a force acts on it",
            "duration": 12.0
        })))
        .expect(1)
        .mount(&server)
        .await;

    mount_chat(
        &server,
        "You clean up transcripts",
        "A body stays at rest unless a force acts on it.",
    )
    .await;
    mount_chat(
        &server,
        "curriculum analyst",
        r#"{"principal_concepts": ["inertia", "net force"], "secondary_concepts": ["uniform motion"],
            "specific_facts": [], "process_relations": ["net force -> change of motion"],
            "detected_subject": "Physics", "difficulty_level": "Basic"}"#,
    )
    .await;
    mount_chat(
        &server,
        "rigorous academic examiner",
        r#"{"correct_concepts": ["net force"], "omitted_concepts": ["inertia", "uniform motion"],
            "factual_errors": [], "fabricated_claims": [], "clarity": "good",
            "coherence": "good", "technical_vocabulary": "regular", "highlighted_quotes": []}"#,
    )
    .await;
    mount_chat(
        &server,
        "impartial academic grader",
        r#"{"final_grade": 5, "per_criterion_breakdown": [], "penalties": [], "bonuses": [],
            "confidence": "medium", "general_justification": "Net force only."}"#,
    )
    .await;
    mount_chat(
        &server,
        "encouraging but honest teacher",
        r#"{"student_feedback": {"summary": "Good start"}, "teacher_note": {"observations": "Missing inertia"}}"#,
    )
    .await;

    let use_case = EvaluateExamUseCase::new(
        GroqWhisperTranscriber::new("test-key").with_base_url(server.uri()),
        GroqCompletion::new("test-key").with_base_url(server.uri()),
        NoopObserver,
    );

    let envelope = use_case.execute(input()).await;

    assert!(envelope.success, "error: {:?}", envelope.error);
    let evaluation = envelope.evaluation.unwrap();
    assert_eq!(evaluation.audio_duration_seconds, Some(12.0));
    assert_eq!(
        evaluation.normalized_transcript,
        "A body stays at rest unless a force acts on it."
    );
    assert_eq!(evaluation.detected_subject, Subject::Physics);
    assert_eq!(evaluation.grade.final_grade, 5.0);
    assert_eq!(evaluation.grade.confidence, Confidence::Medium);
    // (1 principal hit * 2) / (2 * 2 + 1)
    assert!((evaluation.coverage_percentage - 40.0).abs() < 1e-9);
    assert_eq!(evaluation.feedback.teacher_note.observations, "Missing inertia");
}

#[tokio::test]
async fn rejected_key_fails_at_transcription() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let use_case = EvaluateExamUseCase::new(
        GroqWhisperTranscriber::new("bad").with_base_url(server.uri()),
        GroqCompletion::new("bad").with_base_url(server.uri()),
        NoopObserver,
    );

    let envelope = use_case.execute(input()).await;

    assert!(!envelope.success);
    assert!(envelope.evaluation.is_none());
    assert_eq!(
        envelope.error.as_deref(),
        Some("Transcription failed: Invalid API key")
    );
}
