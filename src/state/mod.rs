// State management module
// Handles the conversation, agent directory and view bookkeeping

pub mod app_state;

pub use app_state::{ConversationState, Message};
