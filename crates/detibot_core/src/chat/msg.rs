use crate::{CaptureId, Language, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatMsg {
    /// User edited the input box.
    InputChanged(String),
    /// User pressed Send (or Enter) with the current input.
    SendClicked,
    /// Backend answered a conversational turn.
    ReplyReceived { request_id: RequestId, text: String },
    /// The turn failed in transport or was refused by the backend.
    ReplyFailed { request_id: RequestId },
    LanguageSelected(Language),
    /// User clicked the thumbs-up on the message at `index`.
    FeedbackToggled { index: usize },
    /// Engine finished storing an upvoted pair.
    FeedbackSubmitted { index: usize, accepted: bool },
    /// User clicked the microphone button.
    ListenToggled,
    /// Capture session `capture_id` heard `text`.
    SpeechRecognized { capture_id: CaptureId, text: String },
    SpeechFailed { capture_id: CaptureId },
    /// User asked to hear a message read aloud.
    PlaybackRequested(String),
    /// Fallback for placeholder wiring.
    NoOp,
}
