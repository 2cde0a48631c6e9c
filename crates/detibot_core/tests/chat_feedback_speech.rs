use std::sync::Once;

use detibot_core::chat::{update, ChatMsg, ChatState};
use detibot_core::{Effect, Language};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(detibot_logging::initialize_for_tests);
}

fn turn(state: ChatState, prompt: &str, reply: Option<&str>) -> ChatState {
    let (state, _) = update(state, ChatMsg::InputChanged(prompt.to_string()));
    let (state, effects) = update(state, ChatMsg::SendClicked);
    let Some(Effect::SendPrompt { request_id, .. }) = effects.first().cloned() else {
        panic!("expected prompt effect");
    };
    let msg = match reply {
        Some(text) => ChatMsg::ReplyReceived {
            request_id,
            text: text.to_string(),
        },
        None => ChatMsg::ReplyFailed { request_id },
    };
    update(state, msg).0
}

#[test]
fn every_toggle_submits_the_same_pair_while_state_flips() {
    init_logging();
    let state = turn(ChatState::new(), "What is DETI?", Some("A department."));
    assert_eq!(state.feedback(1), None);

    let expected = vec![Effect::SubmitFeedback {
        index: 1,
        question: "What is DETI?".to_string(),
        answer: "A department.".to_string(),
    }];

    let (state, effects) = update(state, ChatMsg::FeedbackToggled { index: 1 });
    assert_eq!(effects, expected);
    assert_eq!(state.feedback(1), Some(true));

    let (state, effects) = update(state, ChatMsg::FeedbackToggled { index: 1 });
    assert_eq!(effects, expected);
    assert_eq!(state.feedback(1), Some(false));
    assert_eq!(state.view().messages[1].thumbs_up, Some(false));
}

#[test]
fn feedback_on_user_or_missing_message_is_ignored() {
    init_logging();
    let state = turn(ChatState::new(), "hi", Some("hello"));

    let (state, effects) = update(state, ChatMsg::FeedbackToggled { index: 0 });
    assert!(effects.is_empty());
    let (state, effects) = update(state, ChatMsg::FeedbackToggled { index: 7 });
    assert!(effects.is_empty());
    assert_eq!(state.feedback(0), None);
    assert_eq!(state.view().messages[0].thumbs_up, None);
}

#[test]
fn feedback_pairs_answer_with_its_own_prompt_after_a_dropped_turn() {
    init_logging();
    let state = turn(ChatState::new(), "lost question", None);
    let state = turn(state, "real question", Some("real answer"));
    // transcript: [user lost, user real, bot answer]
    assert_eq!(state.transcript().len(), 3);

    let (_, effects) = update(state, ChatMsg::FeedbackToggled { index: 2 });

    assert_eq!(
        effects,
        vec![Effect::SubmitFeedback {
            index: 2,
            question: "real question".to_string(),
            answer: "real answer".to_string(),
        }]
    );
}

#[test]
fn failed_feedback_keeps_local_state() {
    init_logging();
    let state = turn(ChatState::new(), "q", Some("a"));
    let (state, _) = update(state, ChatMsg::FeedbackToggled { index: 1 });

    let (state, effects) = update(
        state,
        ChatMsg::FeedbackSubmitted {
            index: 1,
            accepted: false,
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.feedback(1), Some(true));
}

#[test]
fn listening_toggle_starts_and_stops_capture() {
    init_logging();
    let (state, effects) = update(ChatState::new(), ChatMsg::ListenToggled);
    assert!(state.is_listening());
    assert_eq!(
        effects,
        vec![Effect::StartListening {
            capture_id: 1,
            language: Language::En
        }]
    );
    assert_eq!(state.view().mic_label, "Stop");

    let (state, effects) = update(state, ChatMsg::ListenToggled);
    assert!(!state.is_listening());
    assert_eq!(effects, vec![Effect::StopListening]);
}

#[test]
fn recognized_speech_fills_input_and_stops_listening() {
    init_logging();
    let (state, _) = update(ChatState::new(), ChatMsg::LanguageSelected(Language::Pt));
    let (state, effects) = update(state, ChatMsg::ListenToggled);
    assert_eq!(
        effects,
        vec![Effect::StartListening {
            capture_id: 1,
            language: Language::Pt
        }]
    );

    let (state, _) = update(
        state,
        ChatMsg::SpeechRecognized {
            capture_id: 1,
            text: "bom dia".to_string(),
        },
    );

    assert_eq!(state.input(), "bom dia");
    assert!(!state.is_listening());
    assert!(state.transcript().is_empty());
}

#[test]
fn capture_error_stops_listening_without_touching_transcript() {
    init_logging();
    let (state, _) = update(ChatState::new(), ChatMsg::InputChanged("draft".into()));
    let (state, _) = update(state, ChatMsg::ListenToggled);

    let (state, effects) = update(state, ChatMsg::SpeechFailed { capture_id: 1 });

    assert!(effects.is_empty());
    assert!(!state.is_listening());
    assert_eq!(state.input(), "draft");
    assert!(state.transcript().is_empty());
}

#[test]
fn late_speech_result_is_dropped() {
    init_logging();
    let (state, _) = update(ChatState::new(), ChatMsg::ListenToggled);
    let (state, _) = update(state, ChatMsg::ListenToggled);

    let (state, _) = update(
        state,
        ChatMsg::SpeechRecognized {
            capture_id: 1,
            text: "too late".into(),
        },
    );

    assert_eq!(state.input(), "");
}

fn started_capture(effects: &[Effect]) -> u64 {
    match effects {
        [Effect::StartListening { capture_id, .. }] => *capture_id,
        other => panic!("expected one StartListening, got {other:?}"),
    }
}

#[test]
fn result_from_a_previous_capture_does_not_end_the_current_one() {
    init_logging();
    let (state, effects) = update(ChatState::new(), ChatMsg::ListenToggled);
    let first = started_capture(&effects);
    let (state, _) = update(state, ChatMsg::ListenToggled);
    let (state, effects) = update(state, ChatMsg::ListenToggled);
    let second = started_capture(&effects);
    assert_ne!(first, second);

    let (state, effects) = update(
        state,
        ChatMsg::SpeechRecognized {
            capture_id: first,
            text: "from the first capture".into(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.input(), "");
    assert!(state.is_listening());

    let (state, _) = update(state, ChatMsg::SpeechFailed { capture_id: first });
    assert!(state.is_listening());

    let (state, _) = update(
        state,
        ChatMsg::SpeechRecognized {
            capture_id: second,
            text: "from the second capture".into(),
        },
    );
    assert_eq!(state.input(), "from the second capture");
    assert!(!state.is_listening());
}

#[test]
fn playback_uses_current_language() {
    init_logging();
    let (state, _) = update(ChatState::new(), ChatMsg::LanguageSelected(Language::Pt));

    let (mut state, effects) = update(state, ChatMsg::PlaybackRequested("olá".into()));

    assert_eq!(
        effects,
        vec![Effect::Speak {
            text: "olá".to_string(),
            language: Language::Pt,
        }]
    );
    state.consume_dirty();
    let (mut state, _) = update(state, ChatMsg::PlaybackRequested("again".into()));
    assert!(!state.consume_dirty());
}
