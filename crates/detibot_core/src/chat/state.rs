use std::collections::BTreeMap;

use crate::chat::view_model::{ChatViewModel, MessageView};
use crate::{translate, CaptureId, Language, RequestId, UiText};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub author: Author,
    /// For bot replies, the user prompt that produced this answer.
    pub prompt: Option<String>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: Author::User,
            prompt: None,
        }
    }

    pub fn bot(text: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: Author::Bot,
            prompt: Some(prompt.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingTurn {
    request_id: RequestId,
    prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatState {
    transcript: Vec<Message>,
    history: Vec<String>,
    input: String,
    pending: Option<PendingTurn>,
    feedback: BTreeMap<usize, bool>,
    language: Language,
    /// Active capture session, if any.
    capture: Option<CaptureId>,
    last_request_id: RequestId,
    last_capture_id: CaptureId,
    dirty: bool,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Flattened utterances sent as context with every turn.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_listening(&self) -> bool {
        self.capture.is_some()
    }

    /// `None` until the message has been rated.
    pub fn feedback(&self, index: usize) -> Option<bool> {
        self.feedback.get(&index).copied()
    }

    pub fn view(&self) -> ChatViewModel {
        let messages = self
            .transcript
            .iter()
            .enumerate()
            .map(|(index, message)| MessageView {
                index,
                text: message.text.clone(),
                author: message.author,
                thumbs_up: match message.author {
                    Author::Bot => Some(self.feedback(index).unwrap_or(false)),
                    Author::User => None,
                },
            })
            .collect();

        let lang = self.language;
        ChatViewModel {
            title: translate(lang, UiText::ChatPageTitle),
            language: lang,
            language_label: lang.display_name(),
            messages,
            input: self.input.clone(),
            placeholder: translate(lang, UiText::Placeholder),
            send_label: translate(lang, UiText::SendButton),
            send_enabled: !self.is_pending(),
            loading: self.is_pending(),
            listening: self.is_listening(),
            mic_label: if self.is_listening() {
                translate(lang, UiText::StopAudioButton)
            } else {
                translate(lang, UiText::AudioButton)
            },
            play_label: translate(lang, UiText::PlayAudio),
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

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.mark_dirty();
        }
    }

    /// Records the user turn and returns the request id plus the context that precedes it.
    pub(crate) fn begin_turn(&mut self, prompt: String) -> (RequestId, Vec<String>) {
        let context = self.history.clone();
        self.transcript.push(Message::user(prompt.clone()));
        self.history.push(prompt.clone());
        self.input.clear();
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.pending = Some(PendingTurn { request_id, prompt });
        self.mark_dirty();
        (request_id, context)
    }

    /// Clears the pending turn if it matches, returning its prompt.
    pub(crate) fn finish_turn(&mut self, request_id: RequestId) -> Option<String> {
        let matches = self
            .pending
            .as_ref()
            .is_some_and(|turn| turn.request_id == request_id);
        if !matches {
            return None;
        }
        self.mark_dirty();
        self.pending.take().map(|turn| turn.prompt)
    }

    pub(crate) fn push_reply(&mut self, text: String, prompt: String) {
        self.history.push(text.clone());
        self.transcript.push(Message::bot(text, prompt));
        self.mark_dirty();
    }

    pub(crate) fn set_language(&mut self, language: Language) -> bool {
        if self.language == language {
            return false;
        }
        self.language = language;
        self.mark_dirty();
        true
    }

    /// Flips the thumbs state of a bot message, returning its question/answer pair.
    pub(crate) fn toggle_feedback(&mut self, index: usize) -> Option<(String, String)> {
        let message = self.transcript.get(index)?;
        if message.author != Author::Bot {
            return None;
        }
        let question = message.prompt.clone()?;
        let answer = message.text.clone();
        let entry = self.feedback.entry(index).or_insert(false);
        *entry = !*entry;
        self.mark_dirty();
        Some((question, answer))
    }

    pub(crate) fn start_capture(&mut self) -> CaptureId {
        self.last_capture_id += 1;
        self.capture = Some(self.last_capture_id);
        self.mark_dirty();
        self.last_capture_id
    }

    pub(crate) fn stop_capture(&mut self) {
        if self.capture.take().is_some() {
            self.mark_dirty();
        }
    }

    /// Ends the session if `capture_id` is the active one.
    pub(crate) fn finish_capture(&mut self, capture_id: CaptureId) -> bool {
        if self.capture != Some(capture_id) {
            return false;
        }
        self.stop_capture();
        true
    }
}
