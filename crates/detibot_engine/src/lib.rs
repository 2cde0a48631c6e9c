//! DetiBot engine: REST backend client, speech capabilities and effect execution.
mod backend;
mod engine;
mod payload;
mod speech;
mod types;

pub use backend::{Backend, BackendSettings, ReqwestBackend};
pub use engine::{EngineCommand, EngineHandle, EngineServices};
pub use payload::{content_type_for, SUCCESS_MARKER, URL_LOADER_TYPE, URL_WAIT_TIME_SECS};
pub use speech::{
    LoggingSynthesizer, SpeechError, SpeechRecognizer, SpeechSynthesizer, UnavailableRecognizer,
};
pub use types::{
    BackendError, CaptureId, EngineEvent, FailureKind, RequestId, SourceRequest, UrlSourceRequest,
};
