use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Pt,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Pt];

    /// Path segment of the conversational endpoint.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pt => "pt",
        }
    }

    /// BCP 47 locale handed to the speech capabilities.
    pub fn locale(self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Pt => "pt-PT",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Pt => "Português",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language {0:?} (expected en or pt)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// Translatable copy on the chat screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiText {
    ChatPageTitle,
    SendButton,
    Placeholder,
    AudioButton,
    StopAudioButton,
    PlayAudio,
}

pub fn translate(language: Language, key: UiText) -> &'static str {
    match (language, key) {
        (_, UiText::ChatPageTitle) => "DetiBot",
        (Language::En, UiText::SendButton) => "Send",
        (Language::En, UiText::Placeholder) => "Type your message...",
        (Language::En, UiText::AudioButton) => "Speak",
        (Language::En, UiText::StopAudioButton) => "Stop",
        (Language::En, UiText::PlayAudio) => "Play",
        (Language::Pt, UiText::SendButton) => "Enviar",
        (Language::Pt, UiText::Placeholder) => "Escreva a sua mensagem...",
        (Language::Pt, UiText::AudioButton) => "Falar",
        (Language::Pt, UiText::StopAudioButton) => "Parar",
        (Language::Pt, UiText::PlayAudio) => "Ouvir",
    }
}
