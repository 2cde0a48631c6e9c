use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceMode {
    #[default]
    File,
    Url,
    Qa,
}

impl SourceMode {
    pub const ALL: [SourceMode; 3] = [SourceMode::File, SourceMode::Url, SourceMode::Qa];

    pub fn key(self) -> &'static str {
        match self {
            SourceMode::File => "file",
            SourceMode::Url => "url",
            SourceMode::Qa => "qa",
        }
    }

    /// Tab caption.
    pub fn title(self) -> &'static str {
        match self {
            SourceMode::File => "File",
            SourceMode::Url => "URL",
            SourceMode::Qa => "Q&A",
        }
    }
}

impl FromStr for SourceMode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceMode::ALL
            .into_iter()
            .find(|mode| mode.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// How often the backend re-crawls a URL source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateFrequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
}

impl UpdateFrequency {
    pub const ALL: [UpdateFrequency; 4] = [
        UpdateFrequency::Daily,
        UpdateFrequency::Weekly,
        UpdateFrequency::Monthly,
        UpdateFrequency::Quarterly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UpdateFrequency::Daily => "Daily",
            UpdateFrequency::Weekly => "Weekly",
            UpdateFrequency::Monthly => "Monthly",
            UpdateFrequency::Quarterly => "Quarterly",
        }
    }
}

impl fmt::Display for UpdateFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdateFrequency {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UpdateFrequency::ALL
            .into_iter()
            .find(|freq| freq.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized value {0:?}")]
pub struct UnknownVariant(pub String);

/// A file picked for upload, already read into memory by the platform.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileDraft {
    pub file: Option<SelectedFile>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlDraft {
    pub url: String,
    pub recursive: bool,
    pub paths_enabled: bool,
    pub paths: Vec<String>,
    pub frequency: Option<UpdateFrequency>,
    pub description: String,
}

impl UrlDraft {
    /// Paths as they go on the wire: the list only counts while it is enabled.
    pub fn effective_paths(&self) -> Vec<String> {
        if self.paths_enabled {
            self.paths.clone()
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QaDraft {
    pub question: String,
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_parses_display_names() {
        assert_eq!("weekly".parse(), Ok(UpdateFrequency::Weekly));
        assert_eq!("Quarterly".parse(), Ok(UpdateFrequency::Quarterly));
        assert!("".parse::<UpdateFrequency>().is_err());
    }

    #[test]
    fn unknown_mode_reports_the_rejected_text() {
        let err = "video".parse::<SourceMode>().unwrap_err();
        assert_eq!(err, UnknownVariant("video".to_string()));
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert_eq!(boxed.to_string(), "unrecognized value \"video\"");
    }

    #[test]
    fn disabled_paths_are_not_sent() {
        let mut draft = UrlDraft {
            paths: vec!["/docs".to_string()],
            ..UrlDraft::default()
        };
        assert!(draft.effective_paths().is_empty());
        draft.paths_enabled = true;
        assert_eq!(draft.effective_paths(), vec!["/docs".to_string()]);
    }

    #[test]
    fn selected_file_debug_hides_contents() {
        let file = SelectedFile::new("notes.txt", vec![0; 4096]);
        let rendered = format!("{file:?}");
        assert!(rendered.contains("len: 4096"));
        assert!(rendered.len() < 64);
    }
}
