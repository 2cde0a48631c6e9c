use detibot_core::chat::{Author, ChatViewModel};
use detibot_core::intake::{FailureCause, Field, IntakeViewModel, SourceMode, SubmissionStatus};

pub fn render_chat(view: &ChatViewModel) -> Vec<String> {
    let mut lines = vec![format!("== {} [{}] ==", view.title, view.language_label)];

    for message in &view.messages {
        let who = match message.author {
            Author::User => "you",
            Author::Bot => "bot",
        };
        let rating = match message.thumbs_up {
            Some(true) => " [+1]",
            Some(false) => " [ ]",
            None => "",
        };
        lines.push(format!("#{} {}: {}{}", message.index, who, message.text, rating));
    }

    if view.loading {
        lines.push("...".to_string());
    }
    if view.listening {
        lines.push(format!("(listening; :mic to {})", view.mic_label));
    }
    if view.input.is_empty() {
        lines.push(format!("> {}", view.placeholder));
    } else {
        lines.push(format!("> {}  (:send to {})", view.input, view.send_label));
    }
    lines
}

pub fn render_intake(view: &IntakeViewModel) -> Vec<String> {
    let tabs: Vec<String> = SourceMode::ALL
        .into_iter()
        .map(|mode| {
            if mode == view.mode {
                format!("[{}]", mode.title())
            } else {
                mode.title().to_string()
            }
        })
        .collect();
    let mut lines = vec![format!("== Add source: {} ==", tabs.join(" | "))];

    match view.mode {
        SourceMode::File => {
            let name = view.file_name.as_deref().unwrap_or("(none)");
            field(&mut lines, view, Field::File, "file", name);
            field(
                &mut lines,
                view,
                Field::Description,
                "description",
                &view.file_description,
            );
        }
        SourceMode::Url => {
            let url = &view.url;
            field(&mut lines, view, Field::Url, "url", &url.url);
            lines.push(format!("  recursive: {}", on_off(url.recursive)));
            lines.push(format!("  paths: {}", on_off(url.paths_enabled)));
            if url.paths_enabled {
                for (index, path) in url.paths.iter().enumerate() {
                    lines.push(format!("    {index}: {path}"));
                }
            }
            let frequency = url.frequency.map_or("(none)", |freq| freq.as_str());
            field(&mut lines, view, Field::Frequency, "frequency", frequency);
            field(
                &mut lines,
                view,
                Field::Description,
                "description",
                &url.description,
            );
        }
        SourceMode::Qa => {
            field(&mut lines, view, Field::Question, "question", &view.qa.question);
            field(&mut lines, view, Field::Answer, "answer", &view.qa.answer);
        }
    }

    if let Some(status) = status_line(view) {
        lines.push(status.to_string());
    }
    if view.submit_enabled {
        lines.push("(:submit to send)".to_string());
    }
    lines
}

fn field(lines: &mut Vec<String>, view: &IntakeViewModel, key: Field, label: &str, value: &str) {
    lines.push(format!("  {label}: {value}"));
    if let Some(message) = view.error_for(key) {
        lines.push(format!("    ! {message}"));
    }
}

fn status_line(view: &IntakeViewModel) -> Option<&'static str> {
    match view.status {
        SubmissionStatus::Idle => None,
        SubmissionStatus::Pending => Some("Submitting..."),
        SubmissionStatus::Succeeded if view.show_success => Some("Source added."),
        SubmissionStatus::Succeeded => None,
        SubmissionStatus::Failed(FailureCause::Invalid) => Some("Fill in the required fields."),
        SubmissionStatus::Failed(FailureCause::Rejected) => {
            Some("The server did not accept the source.")
        }
        SubmissionStatus::Failed(FailureCause::Transport) => Some("Could not reach the server."),
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
