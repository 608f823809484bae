//! Reply interpretation
//!
//! Turns the `data` payload of a text response into the messages the chat
//! screen appends. Shapes are tried in a fixed order: provider messages,
//! then flat text, then the fallback error message.

use crate::types::{
    ContentSegment, MessageContent, ProviderMessage, SegmentKind, TextResponseData,
};
use serde_json::Value;

/// Text shown whenever an exchange fails or the reply has no usable shape
pub const FALLBACK_REPLY_TEXT: &str = "Sorry, something went wrong. Please try again.";

/// Who a message in the conversation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    /// The person typing
    User,
    /// The agent's reply
    Assistant,
    /// Tool output forwarded by the agent
    Tool,
}

impl Sender {
    /// Map a backend role string to a sender
    ///
    /// Anything that is neither `user` nor `tool` is shown as the assistant.
    pub fn from_role(role: &str) -> Self {
        match role {
            "user" => Sender::User,
            "tool" => Sender::Tool,
            _ => Sender::Assistant,
        }
    }
}

/// A message decoded from a reply, ready to be appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyMessage {
    /// Provider-assigned id, if any
    pub id: Option<String>,
    /// Sender role supplied by the backend
    pub sender: Sender,
    /// Flattened text, never empty
    pub text: String,
}

/// Interpreted reply, one variant per response shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Structured provider messages, already flattened and filtered
    Messages(Vec<ReplyMessage>),
    /// A single flat text answer
    Text(String),
    /// Nothing usable; show the fallback message
    Fallback,
}

impl Reply {
    /// Interpret a response payload
    pub fn interpret(data: Option<TextResponseData>) -> Self {
        let Some(data) = data else {
            return Reply::Fallback;
        };

        let provider_messages = data
            .provider
            .and_then(|p| p.response)
            .and_then(|r| r.messages);

        if let Some(messages) = provider_messages {
            return Reply::Messages(messages.into_iter().filter_map(flatten_message).collect());
        }

        match data.text {
            Some(text) if !text.is_empty() => Reply::Text(text),
            _ => Reply::Fallback,
        }
    }

    /// Messages to append, in order
    pub fn into_messages(self) -> Vec<ReplyMessage> {
        match self {
            Reply::Messages(messages) => messages,
            Reply::Text(text) => vec![ReplyMessage {
                id: None,
                sender: Sender::Assistant,
                text,
            }],
            Reply::Fallback => vec![fallback_message()],
        }
    }
}

/// The assistant message shown for any failed exchange
pub fn fallback_message() -> ReplyMessage {
    ReplyMessage {
        id: None,
        sender: Sender::Assistant,
        text: FALLBACK_REPLY_TEXT.to_string(),
    }
}

/// Flatten one provider message; `None` when it has no text
fn flatten_message(message: ProviderMessage) -> Option<ReplyMessage> {
    let text = match message.content {
        Some(MessageContent::Text(text)) => text,
        Some(MessageContent::Segments(segments)) => {
            segments.iter().map(render_segment).collect::<String>()
        }
        Some(MessageContent::Other(_)) | None => String::new(),
    };

    if text.is_empty() {
        return None;
    }

    Some(ReplyMessage {
        id: message.id.filter(|id| !id.is_empty()),
        sender: Sender::from_role(message.role.as_deref().unwrap_or_default()),
        text,
    })
}

fn render_segment(segment: &ContentSegment) -> String {
    match segment.kind() {
        SegmentKind::Text => segment.text.clone().unwrap_or_default(),
        SegmentKind::ToolCall => format!(
            "Tool call: {}({})",
            segment.tool_name.as_deref().unwrap_or_default(),
            to_json(&segment.args)
        ),
        SegmentKind::ToolResult => format!("Tool result: {}", to_json(&segment.result)),
        SegmentKind::Unknown => String::new(),
    }
}

// Compact JSON, same as the backend's own serialization
fn to_json(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}
