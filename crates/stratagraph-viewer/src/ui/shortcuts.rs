use bevy::prelude::{EventWriter, ResMut};
use bevy_egui::{egui, EguiContexts};

use crate::app::events::TogglePlayback;
use crate::graph::GraphState;

const LAYER_KEYS: [egui::Key; 9] = [
    egui::Key::Num1,
    egui::Key::Num2,
    egui::Key::Num3,
    egui::Key::Num4,
    egui::Key::Num5,
    egui::Key::Num6,
    egui::Key::Num7,
    egui::Key::Num8,
    egui::Key::Num9,
];

pub fn handle_shortcuts(
    mut contexts: EguiContexts,
    mut st: ResMut<GraphState>,
    mut playback: EventWriter<TogglePlayback>,
) {
    let ctx = contexts.ctx_mut();
    let esc_pressed = ctx.input(|i| i.key_pressed(egui::Key::Escape));
    let wants_keyboard = ctx.wants_keyboard_input();

    if esc_pressed {
        if st.ui.help_open {
            st.ui.help_open = false;
        } else {
            st.escape();
        }
    }

    if wants_keyboard {
        return;
    }

    if ctx.input(|i| i.key_pressed(egui::Key::Questionmark)) {
        st.ui.help_open = !st.ui.help_open;
    }
    if ctx.input(|i| i.key_pressed(egui::Key::F)) {
        st.ui.fullscreen = !st.ui.fullscreen;
    }
    if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
        playback.send(TogglePlayback);
    }
    for (i, key) in LAYER_KEYS.iter().enumerate() {
        if ctx.input(|inp| inp.key_pressed(*key)) {
            st.toggle_layer_shortcut(i + 1);
        }
    }
}
