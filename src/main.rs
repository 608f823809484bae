// Agent Chat GUI - Main Entry Point
// Native chat window for talking to agents behind an HTTP backend

mod exchange;
mod state;
mod ui;

use agent_chat_client::{AgentApi, Config, HttpAgentClient};
use eframe::egui;
use exchange::ExchangeDriver;
use state::ConversationState;
use std::sync::Arc;
use tracing::info;
use ui::{render_chat_layout, UiAction};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    // Network calls run here, off the UI thread
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("agent-chat-net")
        .enable_all()
        .build()?;

    // Shared client (connection pooling)
    let client = HttpAgentClient::new(reqwest::Client::new(), &config.api)?;
    info!(base_url = %client.base_url(), "Using agent backend");
    let api: Arc<dyn AgentApi> = Arc::new(client);

    // Configure window options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.chat.title.clone())
            .with_inner_size([720.0, 800.0])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    let app_name = config.chat.title.clone();
    eframe::run_native(
        &app_name,
        options,
        Box::new(move |cc| {
            let driver = ExchangeDriver::new(api, handle).with_repaint(cc.egui_ctx.clone());
            let mut app = ChatScreen::new(&config, driver);
            app.start();
            Box::new(app)
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run the chat window: {}", e))?;

    info!("Chat window closed");
    Ok(())
}

/// Main application struct
/// Owns the conversation and the driver for its network exchanges
struct ChatScreen {
    /// Conversation, agent directory and input
    state: ConversationState,
    /// Background requests
    driver: ExchangeDriver,
    /// Header title
    title: String,
}

impl ChatScreen {
    /// Create a new chat screen with a fresh conversation
    fn new(config: &Config, driver: ExchangeDriver) -> Self {
        let state = ConversationState::with_greeting(config.chat.greeting.as_deref());
        info!(conversation_id = %state.conversation_id, "Started conversation");
        Self {
            state,
            driver,
            title: config.chat.title.clone(),
        }
    }

    /// Kick off the one-time agent directory fetch
    fn start(&mut self) {
        self.driver.fetch_agents();
    }

    /// Apply a user intent from the view
    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::Send => {
                self.driver.send(&mut self.state);
            }
            UiAction::SelectAgent(id) => {
                if self.driver.exchange_pending() {
                    return;
                }
                if self.state.select_agent(&id) {
                    let name = self
                        .state
                        .selected_agent()
                        .map(|a| a.name.as_str())
                        .unwrap_or_default();
                    info!(agent_id = %id, agent_name = %name, "Selected agent");
                }
            }
        }
    }
}

impl eframe::App for ChatScreen {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.driver.poll(&mut self.state);

        let actions = render_chat_layout(ctx, &mut self.state, &self.title);
        if !actions.is_empty() {
            for action in actions {
                self.apply(action);
            }
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_chat_client::config::DEFAULT_GREETING;
    use agent_chat_client::Agent;

    fn test_screen(runtime: &tokio::runtime::Runtime, config: &Config) -> ChatScreen {
        let client = HttpAgentClient::new(reqwest::Client::new(), &config.api).unwrap();
        let driver = ExchangeDriver::new(Arc::new(client), runtime.handle().clone());
        ChatScreen::new(config, driver)
    }

    #[test]
    fn test_app_creation() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let screen = test_screen(&runtime, &Config::default());

        assert_eq!(screen.title, "Agent Chat");
        assert_eq!(screen.state.messages().len(), 1);
        assert_eq!(screen.state.messages()[0].text, DEFAULT_GREETING);
        assert!(!screen.state.is_loading());
    }

    #[test]
    fn test_app_without_greeting() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut config = Config::default();
        config.chat.greeting = None;
        let screen = test_screen(&runtime, &config);
        assert!(screen.state.messages().is_empty());
    }

    #[test]
    fn test_send_without_agent_is_ignored() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut screen = test_screen(&runtime, &Config::default());
        screen.state.input = "hello".to_string();

        screen.apply(UiAction::Send);

        assert_eq!(screen.state.messages().len(), 1);
        assert_eq!(screen.state.input, "hello");
        assert!(!screen.driver.exchange_pending());
    }

    #[test]
    fn test_select_agent_action() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut screen = test_screen(&runtime, &Config::default());
        screen.state.set_agents(vec![
            Agent {
                id: "a1".to_string(),
                name: "Alpha".to_string(),
            },
            Agent {
                id: "a2".to_string(),
                name: "Beta".to_string(),
            },
        ]);

        screen.apply(UiAction::SelectAgent("a2".to_string()));
        assert_eq!(screen.state.selected_agent_id.as_deref(), Some("a2"));

        screen.apply(UiAction::SelectAgent("missing".to_string()));
        assert_eq!(screen.state.selected_agent_id.as_deref(), Some("a2"));
    }
}
