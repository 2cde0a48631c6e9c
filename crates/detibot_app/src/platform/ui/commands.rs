//! Console line parsing for both screens.
use std::path::PathBuf;

use detibot_core::chat::ChatMsg;
use detibot_core::intake::{FieldEdit, IntakeMsg, SourceMode, UpdateFrequency};
use detibot_core::Language;

use crate::platform::app::UiMsg;
use crate::platform::Screen;

pub const CHAT_HELP: &str = "\
<text>            send a message
:send             send the current input (e.g. after :mic)
:lang en|pt       switch language
:up <n>           toggle thumbs-up on bot message n
:mic              start/stop voice capture
:play <n>         read message n aloud
:quit";

pub const ADMIN_HELP: &str = "\
:mode file|url|qa            switch tab
:file <path>                 pick a file (no path clears it)
:desc <text>                 description (file and url tabs)
:url <text>
:recursive on|off
:paths on|off                enable the path list
:path add | :path <i> <text> | :path rm <i>
:freq Daily|Weekly|Monthly|Quarterly|none
:question <text>
:answer <text>
:submit
:quit";

/// What a console line asks the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Msgs(Vec<UiMsg>),
    /// Read the file, then edit the file draft with it.
    LoadFile(PathBuf),
    Help,
    Invalid(String),
}

impl Line {
    fn msg(msg: UiMsg) -> Self {
        Line::Msgs(vec![msg])
    }

    fn edit(edit: FieldEdit) -> Self {
        Line::msg(UiMsg::EditActive(edit))
    }
}

pub fn parse(screen: Screen, line: &str) -> Line {
    match screen {
        Screen::Chat => parse_chat(line),
        Screen::Admin => parse_admin(line),
    }
}

fn parse_chat(line: &str) -> Line {
    let Some((command, rest)) = split_command(line) else {
        if line.trim().is_empty() {
            return Line::Msgs(Vec::new());
        }
        return Line::Msgs(vec![
            UiMsg::Chat(ChatMsg::InputChanged(line.to_string())),
            UiMsg::Chat(ChatMsg::SendClicked),
        ]);
    };

    match command {
        "send" => Line::msg(UiMsg::Chat(ChatMsg::SendClicked)),
        "lang" => match rest.parse::<Language>() {
            Ok(language) => Line::msg(UiMsg::Chat(ChatMsg::LanguageSelected(language))),
            Err(err) => Line::Invalid(err.to_string()),
        },
        "up" => with_index(rest, |index| UiMsg::Chat(ChatMsg::FeedbackToggled { index })),
        "mic" => Line::msg(UiMsg::Chat(ChatMsg::ListenToggled)),
        "play" => with_index(rest, |index| UiMsg::Play { index }),
        _ => common(command),
    }
}

fn parse_admin(line: &str) -> Line {
    let Some((command, rest)) = split_command(line) else {
        if line.trim().is_empty() {
            return Line::Msgs(Vec::new());
        }
        return Line::Invalid("commands start with ':' (try :help)".to_string());
    };

    match command {
        "mode" => match rest.parse::<SourceMode>() {
            Ok(mode) => Line::msg(UiMsg::Intake(IntakeMsg::ModeSelected(mode))),
            Err(err) => Line::Invalid(err.to_string()),
        },
        "file" if rest.is_empty() => Line::edit(FieldEdit::File(None)),
        "file" => Line::LoadFile(PathBuf::from(rest)),
        "desc" => Line::edit(FieldEdit::Description(rest.to_string())),
        "url" => Line::edit(FieldEdit::Url(rest.to_string())),
        "recursive" => with_switch(rest, FieldEdit::Recursive),
        "paths" => with_switch(rest, FieldEdit::PathsEnabled),
        "path" => parse_path(rest),
        "freq" if rest.eq_ignore_ascii_case("none") => Line::edit(FieldEdit::Frequency(None)),
        "freq" => match rest.parse::<UpdateFrequency>() {
            Ok(freq) => Line::edit(FieldEdit::Frequency(Some(freq))),
            Err(err) => Line::Invalid(err.to_string()),
        },
        "question" => Line::edit(FieldEdit::Question(rest.to_string())),
        "answer" => Line::edit(FieldEdit::Answer(rest.to_string())),
        "submit" => Line::msg(UiMsg::Intake(IntakeMsg::SubmitClicked)),
        _ => common(command),
    }
}

fn parse_path(rest: &str) -> Line {
    let (head, tail) = split_word(rest);
    match head {
        "add" => Line::edit(FieldEdit::PathAdded),
        "rm" => with_index(tail, |index| {
            UiMsg::EditActive(FieldEdit::PathRemoved { index })
        }),
        _ => match head.parse::<usize>() {
            Ok(index) => Line::edit(FieldEdit::PathChanged {
                index,
                value: tail.to_string(),
            }),
            Err(_) => Line::Invalid(format!("expected add, rm <i> or <i> <text>, got {head:?}")),
        },
    }
}

fn common(command: &str) -> Line {
    match command {
        "help" | "?" => Line::Help,
        "quit" | "q" => Line::msg(UiMsg::Quit),
        other => Line::Invalid(format!("unknown command :{other} (try :help)")),
    }
}

/// Splits `:cmd rest` into `("cmd", "rest")`; `None` for plain text.
fn split_command(line: &str) -> Option<(&str, &str)> {
    let body = line.trim().strip_prefix(':')?;
    Some(split_word(body))
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim();
    match text.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (text, ""),
    }
}

fn with_index(rest: &str, build: impl FnOnce(usize) -> UiMsg) -> Line {
    match rest.parse::<usize>() {
        Ok(index) => Line::msg(build(index)),
        Err(_) => Line::Invalid(format!("expected a message number, got {rest:?}")),
    }
}

fn with_switch(rest: &str, build: impl FnOnce(bool) -> FieldEdit) -> Line {
    match rest.to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" => Line::edit(build(true)),
        "off" | "no" | "false" => Line::edit(build(false)),
        _ => Line::Invalid(format!("expected on or off, got {rest:?}")),
    }
}
