use crate::intake::{Field, QaDraft, SourceMode, SubmissionStatus, UrlDraft};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeViewModel {
    pub mode: SourceMode,
    pub file_name: Option<String>,
    pub file_description: String,
    pub url: UrlDraft,
    pub qa: QaDraft,
    /// Ordered by field.
    pub errors: Vec<(Field, &'static str)>,
    pub status: SubmissionStatus,
    pub submit_enabled: bool,
    pub show_success: bool,
    pub form_revision: u64,
    pub dirty: bool,
}

impl IntakeViewModel {
    pub fn error_for(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, message)| *message)
    }
}
