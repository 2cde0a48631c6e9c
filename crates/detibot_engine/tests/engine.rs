use std::sync::mpsc::RecvTimeoutError;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use detibot_engine::{
    Backend, BackendError, EngineCommand, EngineEvent, EngineHandle, EngineServices, SourceRequest,
    SpeechError, SpeechRecognizer, SpeechSynthesizer,
};

const WAIT: Duration = Duration::from_secs(2);

#[derive(Default)]
struct FakeBackend {
    sources: Mutex<Vec<SourceRequest>>,
}

#[async_trait::async_trait]
impl Backend for FakeBackend {
    async fn submit_source(&self, source: &SourceRequest) -> Result<(), BackendError> {
        self.sources.lock().unwrap().push(source.clone());
        Ok(())
    }

    async fn send_prompt(
        &self,
        language: &str,
        prompt: &str,
        chat: &[String],
    ) -> Result<String, BackendError> {
        Ok(format!("[{language}] {prompt} after {}", chat.len()))
    }
}

/// Answers with a fixed phrase, or never answers when `phrase` is `None`.
struct FakeRecognizer {
    phrase: Option<&'static str>,
}

#[async_trait::async_trait]
impl SpeechRecognizer for FakeRecognizer {
    async fn recognize(&self, locale: &str) -> Result<String, SpeechError> {
        match self.phrase {
            Some(phrase) => Ok(format!("{phrase} ({locale})")),
            None => std::future::pending().await,
        }
    }
}

#[derive(Default)]
struct RecordingSynthesizer {
    spoken: Mutex<Vec<(String, String)>>,
}

impl SpeechSynthesizer for RecordingSynthesizer {
    fn speak(&self, text: &str, locale: &str) {
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), locale.to_string()));
    }
}

struct Harness {
    engine: EngineHandle,
    backend: Arc<FakeBackend>,
    synthesizer: Arc<RecordingSynthesizer>,
}

fn harness(phrase: Option<&'static str>) -> Harness {
    let backend = Arc::new(FakeBackend::default());
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let engine = EngineHandle::new(EngineServices {
        backend: backend.clone(),
        recognizer: Arc::new(FakeRecognizer { phrase }),
        synthesizer: synthesizer.clone(),
    })
    .expect("engine runtime");
    Harness {
        engine,
        backend,
        synthesizer,
    }
}

#[test]
fn prompt_result_is_reported_with_its_request_id() {
    let h = harness(None);
    h.engine.send(EngineCommand::SendPrompt {
        request_id: 7,
        language: "pt".into(),
        prompt: "olá".into(),
        chat: vec!["a".into(), "b".into()],
    });

    assert_eq!(
        h.engine.recv_timeout(WAIT),
        Some(EngineEvent::ChatReplied {
            request_id: 7,
            result: Ok("[pt] olá after 2".to_string()),
        })
    );
}

#[test]
fn feedback_is_stored_as_faq_source() {
    let h = harness(None);
    h.engine.send(EngineCommand::SubmitFeedback {
        index: 3,
        question: "q".into(),
        answer: "a".into(),
    });

    assert_eq!(
        h.engine.recv_timeout(WAIT),
        Some(EngineEvent::FeedbackSubmitted {
            index: 3,
            result: Ok(()),
        })
    );
    assert_eq!(
        *h.backend.sources.lock().unwrap(),
        vec![SourceRequest::Faq {
            question: "q".into(),
            answer: "a".into(),
        }]
    );
}

#[test]
fn timer_reports_its_ticket_after_the_delay() {
    let h = harness(None);
    h.engine.send(EngineCommand::ScheduleTimer {
        ticket: 4,
        after: Duration::from_millis(30),
    });

    assert_eq!(h.engine.try_recv(), None);
    assert_eq!(
        h.engine.recv_timeout(WAIT),
        Some(EngineEvent::TimerElapsed { ticket: 4 })
    );
}

#[test]
fn recognized_speech_is_reported() {
    let h = harness(Some("hello"));
    h.engine.send(EngineCommand::StartListening {
        capture_id: 3,
        locale: "en-US".into(),
    });

    assert_eq!(
        h.engine.recv_timeout(WAIT),
        Some(EngineEvent::SpeechRecognized {
            capture_id: 3,
            text: "hello (en-US)".to_string(),
        })
    );
}

#[test]
fn stopping_capture_produces_no_event() {
    let h = harness(None);
    h.engine.send(EngineCommand::StartListening {
        capture_id: 1,
        locale: "en-US".into(),
    });
    h.engine.send(EngineCommand::StopListening);
    h.engine.send(EngineCommand::ScheduleTimer {
        ticket: 1,
        after: Duration::from_millis(50),
    });

    // The timer is the only thing that can still report.
    assert_eq!(
        h.engine.recv_timeout(WAIT),
        Some(EngineEvent::TimerElapsed { ticket: 1 })
    );
    assert_eq!(h.engine.try_recv(), None);
}

#[test]
fn speak_reaches_the_synthesizer_with_locale() {
    let h = harness(None);
    h.engine.send(EngineCommand::Speak {
        text: "Ouvir isto".into(),
        locale: "pt-PT".into(),
    });
    // Commands are handled in order, so a timer round-trip proves Speak ran.
    h.engine.send(EngineCommand::ScheduleTimer {
        ticket: 9,
        after: Duration::ZERO,
    });
    assert!(h.engine.recv_timeout(WAIT).is_some());

    assert_eq!(
        *h.synthesizer.spoken.lock().unwrap(),
        vec![("Ouvir isto".to_string(), "pt-PT".to_string())]
    );
}

#[test]
fn quiet_engine_times_out_instead_of_reporting_disconnect() {
    let h = harness(None);
    assert_eq!(
        h.engine.recv_event(Duration::from_millis(20)),
        Err(RecvTimeoutError::Timeout)
    );
}
