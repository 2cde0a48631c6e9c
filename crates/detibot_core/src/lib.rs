//! DetiBot core: pure state machines for the source-intake form and the chat screen.
//!
//! Each controller follows the same shape: a state record, a `Msg` enum of
//! everything that can happen to it, and an `update` function that applies one
//! message and returns the [`Effect`]s the platform must run. Nothing in this
//! crate performs IO.
pub mod chat;
mod effect;
pub mod intake;
mod language;

pub use effect::{CaptureId, Effect, RequestId, SourceSubmission, UrlSubmission};
pub use language::{translate, Language, UiText, UnknownLanguage};
