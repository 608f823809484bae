// Background exchanges with the agent backend
// Requests run on the tokio runtime; results come back over a channel polled each frame

use crate::state::ConversationState;
use agent_chat_client::{Agent, AgentApi, ClientError, Reply};
use eframe::egui;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use tokio::runtime::Handle;

/// Runs the agent directory fetch and message exchanges off the UI thread
pub struct ExchangeDriver {
    /// Backend the requests go to
    api: Arc<dyn AgentApi>,
    /// Runtime the requests are spawned on
    runtime: Handle,
    /// Woken when a request finishes so the result is drawn promptly
    repaint: Option<egui::Context>,
    /// Pending agent directory fetch
    agents_rx: Option<Receiver<Result<Vec<Agent>, ClientError>>>,
    /// Pending message exchange
    reply_rx: Option<Receiver<Result<Reply, ClientError>>>,
}

impl ExchangeDriver {
    /// Create a driver that spawns requests on `runtime`
    pub fn new(api: Arc<dyn AgentApi>, runtime: Handle) -> Self {
        Self {
            api,
            runtime,
            repaint: None,
            agents_rx: None,
            reply_rx: None,
        }
    }

    /// Request a repaint of `ctx` whenever a request finishes
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    /// Whether a message exchange is still waiting for its result
    pub fn exchange_pending(&self) -> bool {
        self.reply_rx.is_some()
    }

    /// Fetch the agent directory once
    pub fn fetch_agents(&mut self) {
        if self.agents_rx.is_some() {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let api = Arc::clone(&self.api);
        let repaint = self.repaint.clone();
        self.runtime.spawn(async move {
            let result = api.list_agents().await;
            let _ = tx.send(result);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
        self.agents_rx = Some(rx);
    }

    /// Start an exchange for the current input
    /// Returns false when the state refused to send
    pub fn send(&mut self, state: &mut ConversationState) -> bool {
        if self.reply_rx.is_some() {
            return false;
        }
        let Some(outgoing) = state.begin_send() else {
            return false;
        };

        tracing::info!(
            agent_id = %outgoing.agent_id,
            conversation_id = %outgoing.conversation_id,
            "Sending message"
        );

        let (tx, rx) = mpsc::channel();
        let api = Arc::clone(&self.api);
        let repaint = self.repaint.clone();
        self.runtime.spawn(async move {
            let result = api
                .send_text(&outgoing.agent_id, &outgoing.text, &outgoing.conversation_id)
                .await;
            let _ = tx.send(result);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
        self.reply_rx = Some(rx);
        true
    }

    /// Fold finished requests into the state. Call each frame.
    pub fn poll(&mut self, state: &mut ConversationState) {
        if let Some(rx) = &self.agents_rx {
            match rx.try_recv() {
                Ok(Ok(agents)) => {
                    tracing::info!(count = agents.len(), "Loaded agents");
                    state.set_agents(agents);
                    self.agents_rx = None;
                }
                Ok(Err(e)) => {
                    tracing::error!(
                        error = %e,
                        transport = e.is_transport(),
                        "Failed to fetch agents"
                    );
                    self.agents_rx = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    tracing::error!("Agent fetch ended without a result");
                    self.agents_rx = None;
                }
            }
        }

        if let Some(rx) = &self.reply_rx {
            match rx.try_recv() {
                Ok(outcome) => {
                    state.finish_send(outcome);
                    self.reply_rx = None;
                }
                Err(TryRecvError::Empty) => {}
                // Task died before reporting; the loading flag still has to drop
                Err(TryRecvError::Disconnected) => {
                    tracing::error!("Message exchange ended without a result");
                    state.fail_send();
                    self.reply_rx = None;
                }
            }
        }
    }
}
