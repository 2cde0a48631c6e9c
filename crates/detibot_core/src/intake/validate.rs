use std::collections::BTreeMap;

use super::draft::{FileDraft, QaDraft, UrlDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    File,
    Description,
    Url,
    Frequency,
    Question,
    Answer,
}

impl Field {
    pub fn key(self) -> &'static str {
        match self {
            Field::File => "file",
            Field::Description => "description",
            Field::Url => "url",
            Field::Frequency => "frequency",
            Field::Question => "question",
            Field::Answer => "answer",
        }
    }

    fn required_message(self) -> &'static str {
        match self {
            Field::File => "File is required",
            Field::Description => "Description is required",
            Field::Url => "URL is required",
            Field::Frequency => "Frequency is required",
            Field::Question => "Question is required",
            Field::Answer => "Answer is required",
        }
    }
}

/// Complete set of per-field errors from one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, &'static str>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors.iter().map(|(field, message)| (*field, *message))
    }

    pub(crate) fn clear(&mut self) {
        self.errors.clear();
    }

    fn require(&mut self, field: Field, present: bool) {
        if !present {
            self.errors.insert(field, field.required_message());
        }
    }
}

fn has_text(value: &str) -> bool {
    !value.trim().is_empty()
}

impl FileDraft {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        errors.require(Field::File, self.file.is_some());
        errors.require(Field::Description, has_text(&self.description));
        errors
    }
}

impl UrlDraft {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        errors.require(Field::Url, has_text(&self.url));
        errors.require(Field::Description, has_text(&self.description));
        errors.require(Field::Frequency, self.frequency.is_some());
        errors
    }
}

impl QaDraft {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        errors.require(Field::Question, has_text(&self.question));
        errors.require(Field::Answer, has_text(&self.answer));
        errors
    }
}
