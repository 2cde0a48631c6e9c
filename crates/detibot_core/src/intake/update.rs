use detibot_logging::{detibot_debug, detibot_info};

use crate::intake::{FailureCause, IntakeMsg, IntakeState, SubmissionOutcome, SUCCESS_DISPLAY};
use crate::Effect;

/// Pure update function: applies a message to the form and returns any effects.
pub fn update(mut state: IntakeState, msg: IntakeMsg) -> (IntakeState, Vec<Effect>) {
    let effects = match msg {
        IntakeMsg::ModeSelected(mode) => {
            if state.select_mode(mode) {
                detibot_debug!("intake mode -> {}", mode.key());
            }
            Vec::new()
        }
        IntakeMsg::FieldEdited { mode, edit } => {
            let kind = edit.kind();
            if !state.apply_edit(mode, edit) {
                detibot_debug!("ignored {} edit for mode {}", kind, mode.key());
            }
            Vec::new()
        }
        IntakeMsg::SubmitClicked => {
            if state.is_pending() {
                detibot_debug!("submit ignored: a submission is already pending");
                return (state, Vec::new());
            }
            match state.prepare_submission() {
                Ok(submission) => {
                    let request_id = state.begin_submission();
                    detibot_info!(
                        "submitting {} source as request {}",
                        state.mode().key(),
                        request_id
                    );
                    vec![Effect::SubmitSource {
                        request_id,
                        submission,
                    }]
                }
                Err(errors) => {
                    detibot_debug!("submit rejected locally with {} error(s)", errors.len());
                    state.reject_locally(errors);
                    Vec::new()
                }
            }
        }
        IntakeMsg::SubmissionFinished {
            request_id,
            outcome,
        } => {
            let Some(mode) = state.take_in_flight(request_id) else {
                detibot_debug!("ignoring completion of unknown request {}", request_id);
                return (state, Vec::new());
            };
            match outcome {
                SubmissionOutcome::Accepted => {
                    let ticket = state.succeed(mode);
                    detibot_info!("{} source accepted", mode.key());
                    vec![Effect::ScheduleStatusReset {
                        ticket,
                        after: SUCCESS_DISPLAY,
                    }]
                }
                SubmissionOutcome::Rejected => {
                    state.fail(FailureCause::Rejected);
                    Vec::new()
                }
                SubmissionOutcome::TransportFailed => {
                    state.fail(FailureCause::Transport);
                    Vec::new()
                }
            }
        }
        IntakeMsg::StatusResetElapsed { ticket } => {
            state.expire_success(ticket);
            Vec::new()
        }
        IntakeMsg::NoOp => Vec::new(),
    };

    (state, effects)
}
