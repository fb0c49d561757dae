use bevy::prelude::Res;
use bevy_egui::{egui, EguiContexts};

use crate::graph::GraphState;

pub fn help_overlay(mut contexts: EguiContexts, st: Res<GraphState>) {
    if !st.ui.help_open {
        return;
    }

    egui::Window::new("Help / Shortcuts")
        .collapsible(false)
        .resizable(false)
        .show(contexts.ctx_mut(), |ui| {
            ui.label("1-9: Toggle layer by position");
            ui.label("Esc: Close popup, then clear active layer");
            ui.label("Space: Play / pause camera orbit");
            ui.label("F: Toggle fullscreen scene");
            ui.label("?: Toggle help");
            ui.separator();
            ui.label("Drag: Orbit camera");
            ui.label("Wheel: Zoom");
            ui.label("Click node: Highlight neighbours");
        });
}
