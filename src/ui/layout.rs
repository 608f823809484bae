// Main application layout
// Handles the menu bar, header, message list and composer

use crate::state::ConversationState;
use crate::ui::components::*;
use agent_chat_client::AgentId;
use eframe::egui;

/// What the user asked for during a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Send the current input
    Send,
    /// Switch to another agent
    SelectAgent(AgentId),
}

/// Render the chat screen
/// Returns the user's intents; state changes other than typing are left to the caller
pub fn render_chat_layout(
    ctx: &egui::Context,
    state: &mut ConversationState,
    title: &str,
) -> Vec<UiAction> {
    let mut actions = Vec::new();

    // Panels must be added before the central panel
    render_menu_bar(ctx);
    render_header(ctx, state, title, &mut actions);
    render_composer(ctx, state, &mut actions);
    render_message_list(ctx, state);

    actions
}

/// Render the top menu bar
fn render_menu_bar(ctx: &egui::Context) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                let mut dark_mode = ctx.style().visuals.dark_mode;
                if ui.checkbox(&mut dark_mode, "Dark Mode").changed() {
                    ctx.set_visuals(if dark_mode {
                        egui::Visuals::dark()
                    } else {
                        egui::Visuals::light()
                    });
                    ui.close_menu();
                }
            });
        });
    });
}

/// Render the title and agent selector
fn render_header(
    ctx: &egui::Context,
    state: &ConversationState,
    title: &str,
    actions: &mut Vec<UiAction>,
) {
    egui::TopBottomPanel::top("chat_header").show(ctx, |ui| {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.heading(egui::RichText::new(title).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let choice = agent_selector(
                    ui,
                    &state.agents,
                    state.selected_agent_id.as_deref(),
                    !state.is_loading(),
                );
                ui.label(egui::RichText::new("Agent:").weak());
                if let Some(id) = choice {
                    actions.push(UiAction::SelectAgent(id));
                }
            });
        });
        ui.add_space(8.0);
    });
}

/// Render the input box and send button
fn render_composer(ctx: &egui::Context, state: &mut ConversationState, actions: &mut Vec<UiAction>) {
    egui::TopBottomPanel::bottom("composer").show(ctx, |ui| {
        ui.add_space(8.0);

        let input_enabled = state.input_enabled();
        let send_enabled = state.send_enabled();
        let input_id = egui::Id::new("composer_input");

        // Enter sends; Shift+Enter is left to the text box as a newline
        let has_focus = ui.memory(|m| m.has_focus(input_id));
        let enter_pressed = has_focus
            && ui.input_mut(|i| {
                !i.modifiers.shift && i.consume_key(egui::Modifiers::NONE, egui::Key::Enter)
            });
        if enter_pressed && send_enabled {
            actions.push(UiAction::Send);
        }

        ui.horizontal(|ui| {
            let button_width = 80.0;
            let text_width =
                (ui.available_width() - button_width - ui.spacing().item_spacing.x).max(80.0);
            ui.add_enabled(
                input_enabled,
                egui::TextEdit::multiline(&mut state.input)
                    .id(input_id)
                    .hint_text("Type your message...")
                    .desired_rows(2)
                    .desired_width(text_width),
            );
            if send_button(ui, send_enabled).clicked() {
                actions.push(UiAction::Send);
            }
        });

        ui.add_space(8.0);
    });
}

/// Render the scrolling message list
/// Newest message is scrolled into view whenever the list changes
fn render_message_list(
    ctx: &egui::Context,
    state: &mut ConversationState,
) -> egui::scroll_area::ScrollAreaOutput<()> {
    egui::CentralPanel::default()
        .show(ctx, |ui| {
            let count = state.messages().len();
            let changed = count != state.ui_state.rendered_count;

            let output = egui::ScrollArea::vertical()
                .id_source("message_list_scroll")
                .auto_shrink([false; 2])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    ui.add_space(8.0);
                    if count == 0 && !state.is_loading() {
                        render_empty_view(ui, state);
                    }
                    for message in state.messages() {
                        message_bubble(ui, message);
                        ui.add_space(8.0);
                    }
                    if state.is_loading() {
                        loading_placeholder(ui);
                    }
                    if changed {
                        ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                    }
                });

            state.ui_state.rendered_count = count;
            output
        })
        .inner
}

/// Render the hint shown before the first message
fn render_empty_view(ui: &mut egui::Ui, state: &ConversationState) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        let hint = if state.selected_agent_id.is_some() {
            "Say hello to start the conversation"
        } else {
            "No agent available"
        };
        ui.label(egui::RichText::new(hint).italics().weak().size(14.0));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_chat_client::{Agent, Reply};

    fn run_frame(ctx: &egui::Context, state: &mut ConversationState) -> Vec<UiAction> {
        run_frame_with(ctx, state, egui::RawInput::default())
    }

    fn run_frame_with(
        ctx: &egui::Context,
        state: &mut ConversationState,
        input: egui::RawInput,
    ) -> Vec<UiAction> {
        let mut actions = Vec::new();
        let _ = ctx.run(input, |ctx| {
            actions = render_chat_layout(ctx, state, "Test Chat");
        });
        actions
    }

    fn ready_state(input: &str) -> ConversationState {
        let mut state = ConversationState::new();
        state.set_agents(vec![Agent {
            id: "a1".to_string(),
            name: "Alpha".to_string(),
        }]);
        state.input = input.to_string();
        state
    }

    /// Render once so the input exists, then give it keyboard focus
    fn focus_composer(ctx: &egui::Context, state: &mut ConversationState) {
        run_frame(ctx, state);
        ctx.memory_mut(|m| m.request_focus(egui::Id::new("composer_input")));
        run_frame(ctx, state);
    }

    fn enter_press(shift: bool) -> egui::RawInput {
        let modifiers = egui::Modifiers {
            shift,
            ..Default::default()
        };
        egui::RawInput {
            modifiers,
            events: vec![egui::Event::Key {
                key: egui::Key::Enter,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_enter_sends() {
        let ctx = egui::Context::default();
        let mut state = ready_state("hi");
        focus_composer(&ctx, &mut state);

        let actions = run_frame_with(&ctx, &mut state, enter_press(false));

        assert_eq!(actions, vec![UiAction::Send]);
        // The key is consumed, so no newline reaches the text box
        assert_eq!(state.input, "hi");
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let ctx = egui::Context::default();
        let mut state = ready_state("hi");
        focus_composer(&ctx, &mut state);

        let actions = run_frame_with(&ctx, &mut state, enter_press(true));

        assert!(actions.is_empty());
        assert_eq!(state.input.matches('\n').count(), 1);
        assert_eq!(state.input.replace('\n', ""), "hi");
    }

    #[test]
    fn test_enter_while_loading_does_nothing() {
        let ctx = egui::Context::default();
        let mut state = ready_state("first");
        state.begin_send().unwrap();
        state.input = "second".to_string();
        focus_composer(&ctx, &mut state);

        let actions = run_frame_with(&ctx, &mut state, enter_press(false));
        assert!(actions.is_empty());

        // Typing is ignored too while the input is disabled
        let typing = egui::RawInput {
            events: vec![egui::Event::Text("x".to_string())],
            ..Default::default()
        };
        run_frame_with(&ctx, &mut state, typing);
        assert_eq!(state.input, "second");
    }

    fn add_exchanges(state: &mut ConversationState, n: usize) {
        for i in 0..n {
            state.input = format!("question {}", i);
            state.begin_send().unwrap();
            state.finish_send(Ok(Reply::Text(format!("answer {}", i))));
        }
    }

    #[test]
    fn test_list_scrolls_to_newest_message() {
        let ctx = egui::Context::default();
        let mut state = ready_state("");
        let screen = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(400.0, 300.0),
            )),
            ..Default::default()
        };

        let settle = |state: &mut ConversationState| {
            let mut last = None;
            for _ in 0..5 {
                let _ = ctx.run(screen.clone(), |ctx| {
                    last = Some(render_message_list(ctx, state));
                });
            }
            last.unwrap()
        };
        let at_bottom = |output: &egui::scroll_area::ScrollAreaOutput<()>| {
            let max_offset = output.content_size.y - output.inner_rect.height();
            max_offset > 0.0 && output.state.offset.y >= max_offset - 1.0
        };

        add_exchanges(&mut state, 20);
        assert!(at_bottom(&settle(&mut state)));

        add_exchanges(&mut state, 5);
        let output = settle(&mut state);
        assert!(at_bottom(&output));
        assert_eq!(state.ui_state.rendered_count, 50);
    }

    #[test]
    fn test_idle_frame_has_no_actions() {
        let ctx = egui::Context::default();
        let mut state = ConversationState::with_greeting(Some("Hello!"));

        let actions = run_frame(&ctx, &mut state);

        assert!(actions.is_empty());
        assert_eq!(state.ui_state.rendered_count, 1);
    }

    #[test]
    fn test_rendered_count_follows_messages() {
        let ctx = egui::Context::default();
        let mut state = ConversationState::new();
        state.set_agents(vec![Agent {
            id: "a1".to_string(),
            name: "Alpha".to_string(),
        }]);
        run_frame(&ctx, &mut state);
        assert_eq!(state.ui_state.rendered_count, 0);

        state.input = "hi".to_string();
        state.begin_send().unwrap();
        run_frame(&ctx, &mut state);
        assert_eq!(state.ui_state.rendered_count, 1);
        // Typing is still locked while the exchange is in flight
        assert!(!state.input_enabled());
    }
}
