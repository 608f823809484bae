// UI module
// Contains the chat layout and its components

pub mod components;
pub mod layout;

pub use layout::{render_chat_layout, UiAction};
