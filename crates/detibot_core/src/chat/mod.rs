//! Conversation screen: transcript, running history, feedback and speech toggles.
mod msg;
mod state;
mod update;
mod view_model;

pub use msg::ChatMsg;
pub use state::{Author, ChatState, Message};
pub use update::update;
pub use view_model::{ChatViewModel, MessageView};
