use std::time::Duration;

use crate::intake::{SelectedFile, UpdateFrequency};
use crate::Language;

/// Correlates a network-bound effect with the message that reports its result.
pub type RequestId = u64;

/// Identifies one speech-capture session so late results from an earlier one can be dropped.
pub type CaptureId = u64;

/// Side effects requested by an `update` call. The platform runs them and reports
/// the results back as messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Upload a knowledge-base source.
    SubmitSource {
        request_id: RequestId,
        submission: SourceSubmission,
    },
    /// Deliver `StatusResetElapsed { ticket }` once `after` has passed.
    ScheduleStatusReset { ticket: u64, after: Duration },
    /// Send one conversational turn.
    SendPrompt {
        request_id: RequestId,
        language: Language,
        prompt: String,
        chat: Vec<String>,
    },
    /// Store an upvoted question/answer pair as a FAQ source.
    SubmitFeedback {
        index: usize,
        question: String,
        answer: String,
    },
    StartListening {
        capture_id: CaptureId,
        language: Language,
    },
    StopListening,
    Speak { text: String, language: Language },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSubmission {
    File {
        file: SelectedFile,
        description: String,
    },
    Url(UrlSubmission),
    Faq {
        question: String,
        answer: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlSubmission {
    pub url: String,
    pub recursive: bool,
    /// Empty unless the path list was enabled on the form.
    pub paths: Vec<String>,
    pub update_period: UpdateFrequency,
    pub description: String,
}
