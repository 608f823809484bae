//! Agent Chat Client Library
//!
//! Configuration, wire types and the HTTP client the chat screen uses to
//! talk to an agent backend. The GUI lives in the root crate.

pub mod api_client;
pub mod config;
pub mod error;
pub mod reply;
pub mod types;

pub use api_client::{AgentApi, HttpAgentClient};
pub use config::Config;
pub use error::ClientError;
pub use reply::{Reply, ReplyMessage, Sender, FALLBACK_REPLY_TEXT};
pub use types::{Agent, AgentId};
