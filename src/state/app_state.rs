// Conversation state management
// Contains the message list, agent directory, selection, input buffer and loading flag

use agent_chat_client::reply::fallback_message;
use agent_chat_client::{Agent, AgentId, ClientError, Reply, ReplyMessage, Sender};
use std::collections::HashSet;
use uuid::Uuid;

/// Unique identifier for a message within a conversation
pub type MessageId = String;

/// A single message in the conversation
/// Immutable once appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Unique identifier within the conversation
    pub id: MessageId,
    /// Message text
    pub text: String,
    /// Who sent it
    pub sender: Sender,
}

impl Message {
    /// Whether this message should render as the loading placeholder
    pub fn is_placeholder(&self) -> bool {
        self.sender == Sender::Assistant && self.text.is_empty()
    }
}

/// A message that has been accepted for sending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// Agent the message is addressed to
    pub agent_id: AgentId,
    /// Text exactly as typed
    pub text: String,
    /// Conversation the message belongs to
    pub conversation_id: String,
}

/// View bookkeeping that is not part of the conversation itself
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Number of messages the list had when it was last drawn
    pub rendered_count: usize,
}

/// State of the chat screen
/// Messages are append-only; at most one exchange is in flight
#[derive(Debug, Clone)]
pub struct ConversationState {
    /// Generated once per session, sent with every exchange
    pub conversation_id: String,
    /// Agents fetched from the backend, in backend order
    pub agents: Vec<Agent>,
    /// ID of the currently selected agent, if any
    pub selected_agent_id: Option<AgentId>,
    /// Contents of the input box
    pub input: String,
    /// View bookkeeping
    pub ui_state: UiState,
    messages: Vec<Message>,
    message_ids: HashSet<MessageId>,
    is_loading: bool,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self {
            conversation_id: Uuid::new_v4().to_string(),
            agents: Vec::new(),
            selected_agent_id: None,
            input: String::new(),
            ui_state: UiState::default(),
            messages: Vec::new(),
            message_ids: HashSet::new(),
            is_loading: false,
        }
    }
}

impl ConversationState {
    /// Create a new conversation with a fresh conversation id
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new conversation seeded with an assistant greeting
    pub fn with_greeting(greeting: Option<&str>) -> Self {
        let mut state = Self::new();
        if let Some(text) = greeting.filter(|g| !g.trim().is_empty()) {
            state.push(None, Sender::Assistant, text.to_string());
        }
        state
    }

    /// Messages in send/receive order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether an exchange is in flight
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Get a reference to the selected agent, if any
    pub fn selected_agent(&self) -> Option<&Agent> {
        self.selected_agent_id
            .as_ref()
            .and_then(|id| self.agents.iter().find(|a| &a.id == id))
    }

    /// Replace the agent directory
    /// The first agent becomes the selection unless one is already set
    pub fn set_agents(&mut self, agents: Vec<Agent>) {
        self.agents = agents;
        if self.selected_agent_id.is_none() {
            self.selected_agent_id = self.agents.first().map(|a| a.id.clone());
        }
    }

    /// Select an agent by ID
    /// Returns true if the agent was found and selected
    pub fn select_agent(&mut self, id: &str) -> bool {
        if self.agents.iter().any(|a| a.id == id) {
            self.selected_agent_id = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Input box and agent selector accept interaction
    pub fn input_enabled(&self) -> bool {
        !self.is_loading && self.selected_agent_id.is_some()
    }

    /// Send control accepts interaction
    pub fn send_enabled(&self) -> bool {
        self.input_enabled() && !self.input.trim().is_empty()
    }

    /// Start an exchange
    ///
    /// Appends the user message, clears the input and raises the loading
    /// flag. Returns `None` without touching anything when the input is
    /// blank, an exchange is already in flight, or no agent is selected.
    pub fn begin_send(&mut self) -> Option<OutgoingMessage> {
        if !self.send_enabled() {
            return None;
        }
        let agent_id = self.selected_agent_id.clone()?;

        let text = std::mem::take(&mut self.input);
        self.push(None, Sender::User, text.clone());
        self.is_loading = true;

        Some(OutgoingMessage {
            agent_id,
            text,
            conversation_id: self.conversation_id.clone(),
        })
    }

    /// Conclude the in-flight exchange with its outcome
    /// Any error collapses into the fallback message
    pub fn finish_send(&mut self, outcome: Result<Reply, ClientError>) {
        match outcome {
            Ok(reply) => {
                for message in reply.into_messages() {
                    self.push_reply(message);
                }
                self.is_loading = false;
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    transport = e.is_transport(),
                    "Message exchange failed"
                );
                self.fail_send();
            }
        }
    }

    /// Conclude the in-flight exchange as failed
    pub fn fail_send(&mut self) {
        self.push_reply(fallback_message());
        self.is_loading = false;
    }

    fn push_reply(&mut self, message: ReplyMessage) {
        self.push(message.id, message.sender, message.text);
    }

    /// Append a message, keeping ids unique within the conversation
    fn push(&mut self, id: Option<MessageId>, sender: Sender, text: String) {
        let id = match id {
            Some(id) if !self.message_ids.contains(&id) => id,
            _ => Uuid::new_v4().to_string(),
        };
        self.message_ids.insert(id.clone());
        self.messages.push(Message { id, text, sender });
    }
}
