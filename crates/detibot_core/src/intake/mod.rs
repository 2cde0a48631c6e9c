//! Source-intake form: three draft records, one active mode, one submission at a time.
mod draft;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use draft::{
    FileDraft, QaDraft, SelectedFile, SourceMode, UnknownVariant, UpdateFrequency, UrlDraft,
};
pub use msg::{FieldEdit, IntakeMsg, SubmissionOutcome};
pub use state::{FailureCause, IntakeState, SubmissionStatus, SUCCESS_DISPLAY};
pub use update::update;
pub use validate::{Field, ValidationErrors};
pub use view_model::IntakeViewModel;
