use crate::chat::Author;
use crate::Language;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatViewModel {
    pub title: &'static str,
    pub language: Language,
    pub language_label: &'static str,
    pub messages: Vec<MessageView>,
    pub input: String,
    pub placeholder: &'static str,
    pub send_label: &'static str,
    pub send_enabled: bool,
    /// Spinner while a turn is in flight.
    pub loading: bool,
    pub listening: bool,
    pub mic_label: &'static str,
    pub play_label: &'static str,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub index: usize,
    pub text: String,
    pub author: Author,
    /// Only bot messages can be rated.
    pub thumbs_up: Option<bool>,
}
