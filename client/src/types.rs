//! Agent backend wire types
//!
//! Structs that mirror the backend's JSON request and response format.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Unique identifier for an agent
pub type AgentId = String;

/// Envelope every backend response is wrapped in
#[derive(Deserialize, Debug)]
pub struct ApiEnvelope<T> {
    /// Whether the backend considers the call successful
    #[serde(default)]
    pub success: bool,
    /// Payload, absent on some failures
    pub data: Option<T>,
}

/// An agent the backend can route messages to
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    /// Unique identifier for the agent
    pub id: AgentId,
    /// Display name of the agent
    pub name: String,
}

/// Body of `POST /api/agents/{agentId}/text`
#[derive(Serialize, Debug)]
pub struct SendTextRequest {
    /// The user's message text
    pub input: String,
    /// Routing options
    pub options: SendTextOptions,
}

/// Options carried with every exchange
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SendTextOptions {
    /// Fixed user identifier
    pub user_id: String,
    /// Conversation id generated at session start
    pub conversation_id: String,
}

/// `data` payload of a text response
#[derive(Deserialize, Debug, Default)]
pub struct TextResponseData {
    /// Flat reply text
    #[serde(default)]
    pub text: Option<String>,
    /// Raw provider output, when the backend forwards it
    #[serde(default)]
    pub provider: Option<ProviderOutput>,
}

/// Provider section of a text response
#[derive(Deserialize, Debug, Default)]
pub struct ProviderOutput {
    /// Provider response body
    #[serde(default)]
    pub response: Option<ProviderResponse>,
}

/// Provider response body
#[derive(Deserialize, Debug, Default)]
pub struct ProviderResponse {
    /// Structured messages produced during the turn
    #[serde(default)]
    pub messages: Option<Vec<ProviderMessage>>,
}

/// A structured message produced by the provider
#[derive(Deserialize, Debug)]
pub struct ProviderMessage {
    /// Provider-assigned id
    #[serde(default)]
    pub id: Option<String>,
    /// Sender role ("assistant", "tool", ...)
    #[serde(default)]
    pub role: Option<String>,
    /// Message content; `null` and missing are treated as empty
    #[serde(default)]
    pub content: Option<MessageContent>,
}

/// Content is either a bare string or a list of typed segments
///
/// Anything else decodes as `Other` and renders as nothing.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain string content
    Text(String),
    /// Typed content segments
    Segments(Vec<ContentSegment>),
    /// Content of a shape we do not render
    Other(Value),
}

/// Segment kinds the chat screen knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Plain text
    Text,
    /// Tool invocation requested by the model
    ToolCall,
    /// Result returned by a tool
    ToolResult,
    /// Images, reasoning, missing `type`, ...
    Unknown,
}

/// A typed content segment
///
/// Every field is optional so one malformed segment never fails the
/// whole reply.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ContentSegment {
    /// Segment type tag ("text", "tool-call", "tool-result", ...)
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Text of a text segment
    pub text: Option<String>,
    /// Tool name of a tool-call or tool-result segment
    #[serde(rename = "toolName")]
    pub tool_name: Option<String>,
    /// Arguments of a tool call
    pub args: Value,
    /// Payload of a tool result
    pub result: Value,
}

impl ContentSegment {
    /// Classify the segment by its `type` tag
    pub fn kind(&self) -> SegmentKind {
        match self.kind.as_deref() {
            Some("text") => SegmentKind::Text,
            Some("tool-call") => SegmentKind::ToolCall,
            Some("tool-result") => SegmentKind::ToolResult,
            _ => SegmentKind::Unknown,
        }
    }
}
