use detibot_logging::{detibot_debug, detibot_info, detibot_warn};

use crate::chat::{ChatMsg, ChatState};
use crate::Effect;

/// Pure update function: applies a message to the conversation and returns any effects.
pub fn update(mut state: ChatState, msg: ChatMsg) -> (ChatState, Vec<Effect>) {
    let effects = match msg {
        ChatMsg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        ChatMsg::SendClicked => {
            if state.input().trim().is_empty() || state.is_pending() {
                return (state, Vec::new());
            }
            let prompt = state.input().to_string();
            let (request_id, chat) = state.begin_turn(prompt.clone());
            detibot_info!(
                "sending turn {} ({} context entries, lang={})",
                request_id,
                chat.len(),
                state.language()
            );
            vec![Effect::SendPrompt {
                request_id,
                language: state.language(),
                prompt,
                chat,
            }]
        }
        ChatMsg::ReplyReceived { request_id, text } => {
            match state.finish_turn(request_id) {
                Some(prompt) if !text.is_empty() => state.push_reply(text, prompt),
                Some(_) => detibot_warn!("turn {} returned an empty reply", request_id),
                None => detibot_debug!("ignoring reply to unknown turn {}", request_id),
            }
            Vec::new()
        }
        ChatMsg::ReplyFailed { request_id } => {
            if state.finish_turn(request_id).is_some() {
                detibot_warn!("turn {} failed; no bot reply recorded", request_id);
            }
            Vec::new()
        }
        ChatMsg::LanguageSelected(language) => {
            if state.set_language(language) {
                detibot_debug!("chat language -> {}", language);
            }
            Vec::new()
        }
        ChatMsg::FeedbackToggled { index } => match state.toggle_feedback(index) {
            Some((question, answer)) => vec![Effect::SubmitFeedback {
                index,
                question,
                answer,
            }],
            None => {
                detibot_debug!("feedback ignored for non-bot index {}", index);
                Vec::new()
            }
        },
        ChatMsg::FeedbackSubmitted { index, accepted } => {
            if accepted {
                detibot_info!("feedback for message {} stored", index);
            } else {
                detibot_warn!("feedback for message {} was not stored", index);
            }
            Vec::new()
        }
        ChatMsg::ListenToggled => {
            if state.is_listening() {
                state.stop_capture();
                vec![Effect::StopListening]
            } else {
                let capture_id = state.start_capture();
                vec![Effect::StartListening {
                    capture_id,
                    language: state.language(),
                }]
            }
        }
        ChatMsg::SpeechRecognized { capture_id, text } => {
            if state.finish_capture(capture_id) {
                state.set_input(text);
            } else {
                detibot_debug!("dropping speech result from inactive capture {}", capture_id);
            }
            Vec::new()
        }
        ChatMsg::SpeechFailed { capture_id } => {
            if !state.finish_capture(capture_id) {
                detibot_debug!("dropping speech failure from inactive capture {}", capture_id);
            }
            Vec::new()
        }
        ChatMsg::PlaybackRequested(text) => vec![Effect::Speak {
            text,
            language: state.language(),
        }],
        ChatMsg::NoOp => Vec::new(),
    };

    (state, effects)
}
