use std::time::Duration;

use crate::intake::view_model::IntakeViewModel;
use crate::intake::{FieldEdit, FileDraft, QaDraft, SourceMode, UrlDraft, ValidationErrors};
use crate::{RequestId, SourceSubmission, UrlSubmission};

/// How long the success banner stays up before the form returns to Idle.
pub const SUCCESS_DISPLAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(FailureCause),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// Required fields were missing; nothing was sent.
    Invalid,
    /// Backend answered without its success marker.
    Rejected,
    Transport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    request_id: RequestId,
    mode: SourceMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntakeState {
    mode: SourceMode,
    file: FileDraft,
    url: UrlDraft,
    qa: QaDraft,
    errors: ValidationErrors,
    status: SubmissionStatus,
    in_flight: Option<InFlight>,
    last_request_id: RequestId,
    reset_ticket: u64,
    form_revision: u64,
    dirty: bool,
}

impl IntakeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn file_draft(&self) -> &FileDraft {
        &self.file
    }

    pub fn url_draft(&self) -> &UrlDraft {
        &self.url
    }

    pub fn qa_draft(&self) -> &QaDraft {
        &self.qa
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Incremented every time a draft is reset; renderers recreate stateful inputs on change.
    pub fn form_revision(&self) -> u64 {
        self.form_revision
    }

    pub fn view(&self) -> IntakeViewModel {
        IntakeViewModel {
            mode: self.mode,
            file_name: self.file.file.as_ref().map(|file| file.name.clone()),
            file_description: self.file.description.clone(),
            url: self.url.clone(),
            qa: self.qa.clone(),
            errors: self.errors.iter().collect(),
            status: self.status,
            submit_enabled: !self.is_pending(),
            show_success: self.status == SubmissionStatus::Succeeded,
            form_revision: self.form_revision,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns `false` when the mode is already active.
    pub(crate) fn select_mode(&mut self, mode: SourceMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.errors.clear();
        self.cancel_status_reset();
        if !self.is_pending() {
            self.status = SubmissionStatus::Idle;
        }
        self.mark_dirty();
        true
    }

    /// Applies an edit to `mode`'s draft. Returns `false` if the edit does not fit that draft.
    pub(crate) fn apply_edit(&mut self, mode: SourceMode, edit: FieldEdit) -> bool {
        let applied = match (mode, edit) {
            (SourceMode::File, FieldEdit::File(file)) => {
                self.file.file = file;
                true
            }
            (SourceMode::File, FieldEdit::Description(text)) => {
                self.file.description = text;
                true
            }
            (SourceMode::Url, FieldEdit::Description(text)) => {
                self.url.description = text;
                true
            }
            (SourceMode::Url, FieldEdit::Url(text)) => {
                self.url.url = text;
                true
            }
            (SourceMode::Url, FieldEdit::Recursive(on)) => {
                self.url.recursive = on;
                true
            }
            (SourceMode::Url, FieldEdit::PathsEnabled(on)) => {
                self.url.paths_enabled = on;
                true
            }
            (SourceMode::Url, FieldEdit::PathAdded) => {
                self.url.paths.push(String::new());
                true
            }
            (SourceMode::Url, FieldEdit::PathChanged { index, value }) => {
                match self.url.paths.get_mut(index) {
                    Some(path) => {
                        *path = value;
                        true
                    }
                    None => false,
                }
            }
            (SourceMode::Url, FieldEdit::PathRemoved { index }) => {
                if index < self.url.paths.len() {
                    self.url.paths.remove(index);
                    true
                } else {
                    false
                }
            }
            (SourceMode::Url, FieldEdit::Frequency(freq)) => {
                self.url.frequency = freq;
                true
            }
            (SourceMode::Qa, FieldEdit::Question(text)) => {
                self.qa.question = text;
                true
            }
            (SourceMode::Qa, FieldEdit::Answer(text)) => {
                self.qa.answer = text;
                true
            }
            _ => false,
        };
        if applied {
            self.mark_dirty();
        }
        applied
    }

    /// Validates the active draft and builds its payload.
    pub(crate) fn prepare_submission(&self) -> Result<SourceSubmission, ValidationErrors> {
        match self.mode {
            SourceMode::File => {
                let errors = self.file.validate();
                match &self.file.file {
                    Some(file) if errors.is_empty() => Ok(SourceSubmission::File {
                        file: file.clone(),
                        description: self.file.description.clone(),
                    }),
                    _ => Err(errors),
                }
            }
            SourceMode::Url => {
                let errors = self.url.validate();
                match self.url.frequency {
                    Some(update_period) if errors.is_empty() => {
                        Ok(SourceSubmission::Url(UrlSubmission {
                            url: self.url.url.clone(),
                            recursive: self.url.recursive,
                            paths: self.url.effective_paths(),
                            update_period,
                            description: self.url.description.clone(),
                        }))
                    }
                    _ => Err(errors),
                }
            }
            SourceMode::Qa => {
                let errors = self.qa.validate();
                if errors.is_empty() {
                    Ok(SourceSubmission::Faq {
                        question: self.qa.question.clone(),
                        answer: self.qa.answer.clone(),
                    })
                } else {
                    Err(errors)
                }
            }
        }
    }

    pub(crate) fn reject_locally(&mut self, errors: ValidationErrors) {
        self.errors = errors;
        self.cancel_status_reset();
        self.status = SubmissionStatus::Failed(FailureCause::Invalid);
        self.mark_dirty();
    }

    pub(crate) fn begin_submission(&mut self) -> RequestId {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.in_flight = Some(InFlight {
            request_id,
            mode: self.mode,
        });
        self.errors.clear();
        self.cancel_status_reset();
        self.status = SubmissionStatus::Pending;
        self.mark_dirty();
        request_id
    }

    /// Ends the in-flight submission if `request_id` matches it, returning the submitted mode.
    pub(crate) fn take_in_flight(&mut self, request_id: RequestId) -> Option<SourceMode> {
        match self.in_flight {
            Some(flight) if flight.request_id == request_id => {
                self.in_flight = None;
                Some(flight.mode)
            }
            _ => None,
        }
    }

    /// Marks success, resets the submitted draft and returns the ticket of the revert timer.
    pub(crate) fn succeed(&mut self, mode: SourceMode) -> u64 {
        match mode {
            SourceMode::File => self.file = FileDraft::default(),
            SourceMode::Url => self.url = UrlDraft::default(),
            SourceMode::Qa => self.qa = QaDraft::default(),
        }
        self.form_revision += 1;
        self.errors.clear();
        self.status = SubmissionStatus::Succeeded;
        self.mark_dirty();
        self.cancel_status_reset()
    }

    pub(crate) fn fail(&mut self, cause: FailureCause) {
        self.status = SubmissionStatus::Failed(cause);
        self.mark_dirty();
    }

    /// Returns `false` for stale tickets.
    pub(crate) fn expire_success(&mut self, ticket: u64) -> bool {
        if ticket != self.reset_ticket || self.status != SubmissionStatus::Succeeded {
            return false;
        }
        self.status = SubmissionStatus::Idle;
        self.mark_dirty();
        true
    }

    /// Invalidates any scheduled revert and returns the fresh ticket.
    fn cancel_status_reset(&mut self) -> u64 {
        self.reset_ticket += 1;
        self.reset_ticket
    }
}
