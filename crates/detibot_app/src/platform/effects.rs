use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use detibot_core::chat::ChatMsg;
use detibot_core::intake::{IntakeMsg, SubmissionOutcome};
use detibot_core::{Effect, SourceSubmission};
use detibot_engine::{
    EngineCommand, EngineEvent, EngineHandle, FailureKind, SourceRequest, UrlSourceRequest,
};
use detibot_logging::{detibot_debug, detibot_info, detibot_warn};

use super::app::UiMsg;

const EVENT_POLL: Duration = Duration::from_millis(100);

/// Hands core effects to the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, msg_tx: mpsc::Sender<UiMsg>) -> Self {
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.engine.send(command_for(effect));
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<UiMsg>) {
        let engine = self.engine.clone();
        thread::spawn(move || pump_events(|| engine.recv_event(EVENT_POLL), &msg_tx));
    }
}

/// Forwards engine events until either side of the pump goes away.
fn pump_events(
    mut next: impl FnMut() -> Result<EngineEvent, RecvTimeoutError>,
    msg_tx: &mpsc::Sender<UiMsg>,
) {
    loop {
        let event = match next() {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                detibot_warn!("engine stopped; no further results will arrive");
                return;
            }
        };
        if msg_tx.send(msg_for(event)).is_err() {
            detibot_debug!("message loop closed; engine event pump stopping");
            return;
        }
    }
}

pub(crate) fn command_for(effect: Effect) -> EngineCommand {
    match effect {
        Effect::SubmitSource {
            request_id,
            submission,
        } => {
            let source = source_request(submission);
            detibot_info!("SubmitSource request_id={} kind={}", request_id, source.kind());
            EngineCommand::SubmitSource { request_id, source }
        }
        Effect::ScheduleStatusReset { ticket, after } => {
            EngineCommand::ScheduleTimer { ticket, after }
        }
        Effect::SendPrompt {
            request_id,
            language,
            prompt,
            chat,
        } => {
            detibot_info!(
                "SendPrompt request_id={} language={} history_len={}",
                request_id,
                language,
                chat.len()
            );
            EngineCommand::SendPrompt {
                request_id,
                language: language.code().to_string(),
                prompt,
                chat,
            }
        }
        Effect::SubmitFeedback {
            index,
            question,
            answer,
        } => EngineCommand::SubmitFeedback {
            index,
            question,
            answer,
        },
        Effect::StartListening {
            capture_id,
            language,
        } => EngineCommand::StartListening {
            capture_id,
            locale: language.locale().to_string(),
        },
        Effect::StopListening => EngineCommand::StopListening,
        Effect::Speak { text, language } => EngineCommand::Speak {
            text,
            locale: language.locale().to_string(),
        },
    }
}

fn source_request(submission: SourceSubmission) -> SourceRequest {
    match submission {
        SourceSubmission::File { file, description } => SourceRequest::File {
            file_name: file.name,
            bytes: file.bytes,
            description,
        },
        SourceSubmission::Url(url) => SourceRequest::Url(UrlSourceRequest {
            url: url.url,
            recursive: url.recursive,
            paths: url.paths,
            update_period: url.update_period.as_str().to_string(),
            description: url.description,
        }),
        SourceSubmission::Faq { question, answer } => SourceRequest::Faq { question, answer },
    }
}

pub(crate) fn msg_for(event: EngineEvent) -> UiMsg {
    match event {
        EngineEvent::SourceSubmitted { request_id, result } => {
            let outcome = match result {
                Ok(()) => SubmissionOutcome::Accepted,
                Err(err) => match err.kind {
                    FailureKind::Rejected { .. } => SubmissionOutcome::Rejected,
                    _ => SubmissionOutcome::TransportFailed,
                },
            };
            UiMsg::Intake(IntakeMsg::SubmissionFinished {
                request_id,
                outcome,
            })
        }
        EngineEvent::ChatReplied { request_id, result } => match result {
            Ok(text) => UiMsg::Chat(ChatMsg::ReplyReceived { request_id, text }),
            Err(_) => UiMsg::Chat(ChatMsg::ReplyFailed { request_id }),
        },
        EngineEvent::FeedbackSubmitted { index, result } => {
            if let Err(err) = &result {
                detibot_warn!("feedback for message {} not stored: {}", index, err);
            }
            UiMsg::Chat(ChatMsg::FeedbackSubmitted {
                index,
                accepted: result.is_ok(),
            })
        }
        EngineEvent::SpeechRecognized { capture_id, text } => {
            UiMsg::Chat(ChatMsg::SpeechRecognized { capture_id, text })
        }
        EngineEvent::SpeechFailed { capture_id, .. } => {
            UiMsg::Chat(ChatMsg::SpeechFailed { capture_id })
        }
        EngineEvent::TimerElapsed { ticket } => {
            UiMsg::Intake(IntakeMsg::StatusResetElapsed { ticket })
        }
    }
}
