// Reusable UI components
// Message bubbles, the agent selector and the send button

use crate::state::Message;
use agent_chat_client::{Agent, AgentId, Sender};
use eframe::egui;

/// Share of the list width a bubble may take
const BUBBLE_WIDTH_RATIO: f32 = 0.75;

/// Avatar circle diameter
const AVATAR_SIZE: f32 = 32.0;

/// Render one message as a bubble
/// User messages sit on the right, assistant and tool output on the left
pub fn message_bubble(ui: &mut egui::Ui, message: &Message) {
    let layout = match message.sender {
        Sender::User => egui::Layout::right_to_left(egui::Align::TOP),
        Sender::Assistant | Sender::Tool => egui::Layout::left_to_right(egui::Align::TOP),
    };

    ui.with_layout(layout, |ui| {
        avatar(ui, message.sender);
        let max_width = ui.available_width() * BUBBLE_WIDTH_RATIO;
        let visuals = ui.visuals().clone();
        let fill = match message.sender {
            Sender::User => visuals.selection.bg_fill,
            Sender::Assistant => visuals.faint_bg_color,
            Sender::Tool => visuals.extreme_bg_color,
        };

        egui::Frame::none()
            .fill(fill)
            .stroke(visuals.widgets.noninteractive.bg_stroke)
            .rounding(egui::Rounding::same(12.0))
            .inner_margin(egui::Margin::same(10.0))
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.with_layout(egui::Layout::top_down(egui::Align::LEFT), |ui| {
                    if message.is_placeholder() {
                        loading_placeholder(ui);
                        return;
                    }
                    match message.sender {
                        Sender::User => {
                            ui.label(
                                egui::RichText::new(&message.text)
                                    .color(visuals.selection.stroke.color),
                            );
                        }
                        Sender::Assistant => {
                            ui.label(&message.text);
                        }
                        Sender::Tool => {
                            ui.label(
                                egui::RichText::new(&message.text)
                                    .monospace()
                                    .size(12.0),
                            );
                        }
                    }
                });
            });
    });
}

/// Plain circle marking who sent a message
/// Sits outside the bubble: left of agent messages, right of the user's
pub fn avatar(ui: &mut egui::Ui, sender: Sender) {
    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(AVATAR_SIZE, AVATAR_SIZE), egui::Sense::hover());
    ui.painter()
        .circle_filled(rect.center(), AVATAR_SIZE / 2.0, avatar_color(sender));
}

fn avatar_color(sender: Sender) -> egui::Color32 {
    match sender {
        // indigo
        Sender::User => egui::Color32::from_rgb(165, 180, 252),
        Sender::Assistant | Sender::Tool => egui::Color32::from_rgb(209, 213, 219),
    }
}

/// Spinner row shown while the agent is answering
pub fn loading_placeholder(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(egui::RichText::new("Thinking...").italics().weak());
    });
}

/// Combo box listing the agent directory
/// Returns the newly chosen agent, if the user picked a different one
pub fn agent_selector(
    ui: &mut egui::Ui,
    agents: &[Agent],
    selected: Option<&str>,
    enabled: bool,
) -> Option<AgentId> {
    let selected_text = match selected.and_then(|id| agents.iter().find(|a| a.id == id)) {
        Some(agent) => agent.name.clone(),
        None if agents.is_empty() => "No agents".to_string(),
        None => "Select an agent".to_string(),
    };

    let mut choice = None;
    ui.add_enabled_ui(enabled && !agents.is_empty(), |ui| {
        egui::ComboBox::from_id_source("agent_selector")
            .selected_text(selected_text)
            .width(180.0)
            .show_ui(ui, |ui| {
                for agent in agents {
                    let is_selected = selected == Some(agent.id.as_str());
                    let row = ui.selectable_label(is_selected, agent.name.as_str());
                    if row.clicked() && !is_selected {
                        choice = Some(agent.id.clone());
                    }
                }
            });
    });
    choice
}

/// Render the send button
pub fn send_button(ui: &mut egui::Ui, enabled: bool) -> egui::Response {
    ui.spacing_mut().button_padding = egui::vec2(16.0, 10.0);
    ui.add_enabled(
        enabled,
        egui::Button::new(egui::RichText::new("Send").strong()),
    )
}
