use bevy::prelude::ResMut;
use bevy_egui::{egui, EguiContexts};

use crate::graph::GraphState;
use crate::ui::POPUP_W;

/// Detail card for the highlighted node.
pub fn node_popup(mut contexts: EguiContexts, mut st: ResMut<GraphState>) {
    let Some(node) = st.popup_node() else {
        return;
    };
    let title = node.title.clone();
    let description = node.description.clone();
    let tags = node.tags.join(", ");

    let mut open = true;
    let mut close_clicked = false;
    egui::Window::new(title)
        .id(egui::Id::new("node_popup"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(POPUP_W)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
        .show(contexts.ctx_mut(), |ui| {
            if !description.is_empty() {
                ui.label(description);
            }
            if !tags.is_empty() {
                ui.add_space(6.0);
                ui.small(format!("Tags: {tags}"));
            }
            ui.add_space(8.0);
            if ui.button("Close").clicked() {
                close_clicked = true;
            }
        });

    if !open || close_clicked {
        st.close_popup();
    }
}
