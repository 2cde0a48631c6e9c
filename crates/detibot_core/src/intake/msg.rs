use crate::intake::{SelectedFile, SourceMode, UpdateFrequency};
use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeMsg {
    /// User switched tabs.
    ModeSelected(SourceMode),
    /// User edited a field of the given mode's draft.
    FieldEdited { mode: SourceMode, edit: FieldEdit },
    /// User pressed Submit on the active tab.
    SubmitClicked,
    /// Engine finished a source submission.
    SubmissionFinished {
        request_id: RequestId,
        outcome: SubmissionOutcome,
    },
    /// The success display window has elapsed.
    StatusResetElapsed { ticket: u64 },
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    /// `None` clears the picker.
    File(Option<SelectedFile>),
    /// Applies to File and Url modes.
    Description(String),
    Url(String),
    Recursive(bool),
    PathsEnabled(bool),
    PathAdded,
    PathChanged { index: usize, value: String },
    PathRemoved { index: usize },
    Frequency(Option<UpdateFrequency>),
    Question(String),
    Answer(String),
}

impl FieldEdit {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldEdit::File(_) => "file",
            FieldEdit::Description(_) => "description",
            FieldEdit::Url(_) => "url",
            FieldEdit::Recursive(_) => "recursive",
            FieldEdit::PathsEnabled(_) => "paths-enabled",
            FieldEdit::PathAdded => "path-added",
            FieldEdit::PathChanged { .. } => "path-changed",
            FieldEdit::PathRemoved { .. } => "path-removed",
            FieldEdit::Frequency(_) => "frequency",
            FieldEdit::Question(_) => "question",
            FieldEdit::Answer(_) => "answer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Backend answered with its success marker.
    Accepted,
    /// Backend answered, but without the success marker.
    Rejected,
    /// The request never produced a usable response.
    TransportFailed,
}
