use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use detibot_core::chat::{self, ChatMsg, ChatState};
use detibot_core::intake::{self, FieldEdit, IntakeMsg, IntakeState, SelectedFile};
use detibot_core::Effect;
use detibot_engine::{EngineHandle, EngineServices};
use detibot_logging::{detibot_debug, detibot_info, detibot_warn, LevelFilter};

use super::effects::EffectRunner;
use super::ui::commands::{self, Line, ADMIN_HELP, CHAT_HELP};
use super::ui::render::{render_chat, render_intake};
use super::{config, logging, Cli, Screen};

/// Everything the message loop reacts to: core messages plus console-only requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiMsg {
    Chat(ChatMsg),
    Intake(IntakeMsg),
    /// Edit of whichever intake tab is active.
    EditActive(FieldEdit),
    /// Read the transcript message at `index` aloud.
    Play { index: usize },
    Quit,
}

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let mut config = config::load(&cli.config)?;
    config.apply_overrides(|key| std::env::var(key).ok());
    let level = config.level_filter();
    logging::initialize(
        config.log_destination,
        level.unwrap_or(LevelFilter::Info),
        &config.log_file,
    );
    if level.is_none() {
        detibot_warn!("unknown log level {:?}; using info", config.log_level);
    }
    detibot_info!(
        "starting {:?} screen against {}",
        cli.screen,
        config.backend_url
    );

    let services = EngineServices::with_backend(config.backend_settings())
        .context("backend_url is not usable")?;
    let (msg_tx, msg_rx) = mpsc::channel::<UiMsg>();
    let engine = EngineHandle::new(services).context("failed to start the engine runtime")?;
    let runner = EffectRunner::new(engine, msg_tx.clone());
    spawn_input_reader(cli.screen, msg_tx);

    let mut screen = ScreenState::new(cli.screen);
    let mut out = io::stdout();
    print_lines(&mut out, &screen.render())?;

    while let Ok(msg) = msg_rx.recv() {
        if msg == UiMsg::Quit {
            break;
        }
        let effects = screen.dispatch(msg);
        runner.run(effects);
        if screen.consume_dirty() {
            print_lines(&mut out, &screen.render())?;
        }
    }

    detibot_info!("console closed");
    Ok(())
}

fn print_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    writeln!(out)?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

fn spawn_input_reader(screen: Screen, msg_tx: mpsc::Sender<UiMsg>) {
    let help = match screen {
        Screen::Chat => CHAT_HELP,
        Screen::Admin => ADMIN_HELP,
    };
    thread::spawn(move || {
        println!("{help}");
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    detibot_warn!("stdin read failed: {}", err);
                    break;
                }
            };
            let msgs = match commands::parse(screen, &line) {
                Line::Msgs(msgs) => msgs,
                Line::LoadFile(path) => match load_file(&path) {
                    Ok(file) => vec![UiMsg::EditActive(FieldEdit::File(Some(file)))],
                    Err(err) => {
                        eprintln!("{err:#}");
                        continue;
                    }
                },
                Line::Help => {
                    println!("{help}");
                    continue;
                }
                Line::Invalid(reason) => {
                    eprintln!("{reason}");
                    continue;
                }
            };
            for msg in msgs {
                if msg_tx.send(msg).is_err() {
                    return;
                }
            }
        }
        // End of input closes the console.
        let _ = msg_tx.send(UiMsg::Quit);
    });
}

fn load_file(path: &Path) -> anyhow::Result<SelectedFile> {
    let bytes = std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("{} is not a file", path.display()))?;
    detibot_debug!("picked {} ({} bytes)", name, bytes.len());
    Ok(SelectedFile::new(name, bytes))
}

/// The one controller this console drives.
#[derive(Debug)]
enum ScreenState {
    Chat(ChatState),
    Intake(IntakeState),
}

impl ScreenState {
    fn new(screen: Screen) -> Self {
        match screen {
            Screen::Chat => ScreenState::Chat(ChatState::new()),
            Screen::Admin => ScreenState::Intake(IntakeState::new()),
        }
    }

    fn dispatch(&mut self, msg: UiMsg) -> Vec<Effect> {
        match (self, msg) {
            (ScreenState::Chat(state), UiMsg::Chat(msg)) => apply_chat(state, msg),
            (ScreenState::Chat(state), UiMsg::Play { index }) => {
                let Some(text) = state.transcript().get(index).map(|m| m.text.clone()) else {
                    detibot_debug!("no message {} to play", index);
                    return Vec::new();
                };
                apply_chat(state, ChatMsg::PlaybackRequested(text))
            }
            (ScreenState::Intake(state), UiMsg::Intake(msg)) => apply_intake(state, msg),
            (ScreenState::Intake(state), UiMsg::EditActive(edit)) => {
                let mode = state.mode();
                apply_intake(state, IntakeMsg::FieldEdited { mode, edit })
            }
            (_, msg) => {
                detibot_debug!("message not handled by this screen: {:?}", msg);
                Vec::new()
            }
        }
    }

    fn consume_dirty(&mut self) -> bool {
        match self {
            ScreenState::Chat(state) => state.consume_dirty(),
            ScreenState::Intake(state) => state.consume_dirty(),
        }
    }

    fn render(&self) -> Vec<String> {
        match self {
            ScreenState::Chat(state) => render_chat(&state.view()),
            ScreenState::Intake(state) => render_intake(&state.view()),
        }
    }
}

fn apply_chat(state: &mut ChatState, msg: ChatMsg) -> Vec<Effect> {
    let (next, effects) = chat::update(std::mem::take(state), msg);
    *state = next;
    effects
}

fn apply_intake(state: &mut IntakeState, msg: IntakeMsg) -> Vec<Effect> {
    let (next, effects) = intake::update(std::mem::take(state), msg);
    *state = next;
    effects
}
