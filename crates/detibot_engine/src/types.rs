use std::fmt;

use crate::speech::SpeechError;

pub type RequestId = u64;
/// Speech-capture session; results carry it back so stale sessions can be told apart.
pub type CaptureId = u64;

/// Knowledge-base source as the engine uploads it.
#[derive(Clone, PartialEq, Eq)]
pub enum SourceRequest {
    File {
        file_name: String,
        bytes: Vec<u8>,
        description: String,
    },
    Url(UrlSourceRequest),
    Faq {
        question: String,
        answer: String,
    },
}

impl SourceRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            SourceRequest::File { .. } => "file",
            SourceRequest::Url(_) => "url",
            SourceRequest::Faq { .. } => "faq",
        }
    }
}

impl fmt::Debug for SourceRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceRequest::File {
                file_name,
                bytes,
                description,
            } => f
                .debug_struct("File")
                .field("file_name", file_name)
                .field("len", &bytes.len())
                .field("description", description)
                .finish(),
            SourceRequest::Url(url) => f.debug_tuple("Url").field(url).finish(),
            SourceRequest::Faq { question, answer } => f
                .debug_struct("Faq")
                .field("question", question)
                .field("answer", answer)
                .finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlSourceRequest {
    pub url: String,
    pub recursive: bool,
    pub paths: Vec<String>,
    /// `Daily`, `Weekly`, `Monthly` or `Quarterly`.
    pub update_period: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SourceSubmitted {
        request_id: RequestId,
        result: Result<(), BackendError>,
    },
    ChatReplied {
        request_id: RequestId,
        result: Result<String, BackendError>,
    },
    FeedbackSubmitted {
        index: usize,
        result: Result<(), BackendError>,
    },
    SpeechRecognized {
        capture_id: CaptureId,
        text: String,
    },
    SpeechFailed {
        capture_id: CaptureId,
        error: SpeechError,
    },
    TimerElapsed {
        ticket: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct BackendError {
    pub kind: FailureKind,
    pub message: String,
}

impl BackendError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    Network,
    /// Body did not have the expected shape.
    Decode,
    /// Backend answered, but without its success marker.
    Rejected { response: String },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "unexpected response body"),
            FailureKind::Rejected { response } => write!(f, "rejected by backend ({response})"),
        }
    }
}
