//! Console platform: wires the pure controllers to the engine and the terminal.
mod app;
mod config;
mod effects;
mod logging;
mod ui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use app::run_app;

#[derive(Debug, Parser)]
#[command(name = "detibot", about = "DetiBot chat and knowledge-base intake console")]
pub struct Cli {
    #[command(subcommand)]
    pub screen: Screen,

    /// RON configuration file; defaults apply when it does not exist.
    #[arg(long, default_value = "detibot.ron")]
    pub config: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Screen {
    /// Talk to the bot.
    Chat,
    /// Add file, URL or Q&A sources to the knowledge base.
    Admin,
}
