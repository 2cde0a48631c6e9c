//! Speech capabilities, injected so platforms and tests can supply their own.

use detibot_logging::detibot_info;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("no speech was recognized")]
    NoMatch,
    #[error("speech capture unavailable: {0}")]
    Unavailable(String),
    #[error("speech backend error: {0}")]
    Backend(String),
}

/// One-shot, non-continuous speech capture.
///
/// A capture session is the lifetime of the returned future: the engine stops
/// listening by dropping it.
#[async_trait::async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn recognize(&self, locale: &str) -> Result<String, SpeechError>;
}

/// Fire-and-forget speech output. Implementations must not block the caller.
pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, text: &str, locale: &str);
}

/// Recognizer for platforms without a microphone: every capture fails immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableRecognizer;

#[async_trait::async_trait]
impl SpeechRecognizer for UnavailableRecognizer {
    async fn recognize(&self, _locale: &str) -> Result<String, SpeechError> {
        Err(SpeechError::Unavailable(
            "no speech capture on this platform".to_string(),
        ))
    }
}

/// Synthesizer that writes utterances to the log instead of a speaker.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSynthesizer;

impl SpeechSynthesizer for LoggingSynthesizer {
    fn speak(&self, text: &str, locale: &str) {
        detibot_info!("speak [{}]: {}", locale, text);
    }
}
