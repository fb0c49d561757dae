use bevy::prelude::{EventWriter, Res};
use bevy_egui::{egui, EguiContexts};

use crate::app::events::{FitToView, TogglePlayback};
use crate::graph::state::LoadStatus;
use crate::graph::GraphState;
use crate::render::orbit::OrbitAnimator;
use crate::ui::{HUD_EDGE_PADDING, HUD_PANEL_GAP, PANEL_W};

pub fn hud_overlay(
    mut contexts: EguiContexts,
    st: Res<GraphState>,
    orbit: Res<OrbitAnimator>,
    mut playback: EventWriter<TogglePlayback>,
    mut fit: EventWriter<FitToView>,
) {
    let ctx = contexts.ctx_mut();
    let screen = ctx.screen_rect();
    let x = if st.ui.fullscreen {
        screen.min.x + HUD_EDGE_PADDING
    } else {
        screen.min.x + PANEL_W + HUD_PANEL_GAP
    };
    let y = screen.max.y - HUD_EDGE_PADDING;

    egui::Area::new("hud".into())
        .order(egui::Order::Foreground)
        .pivot(egui::Align2::LEFT_BOTTOM)
        .fixed_pos(egui::pos2(x, y))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let label = if orbit.is_playing() { "Pause" } else { "Play" };
                if ui.button(label).clicked() {
                    playback.send(TogglePlayback);
                }
                if ui.button("Fit").clicked() {
                    fit.send(FitToView);
                }
                if let LoadStatus::Loaded { nodes, connections } = st.ui.status {
                    ui.label(format!(
                        "{} layers / {nodes} nodes / {connections} connections",
                        st.graph.layers().len()
                    ));
                }
                if let Some(layer) = st.selection.active_layer().and_then(|id| st.graph.layer(id)) {
                    ui.label(format!("Layer: {}", layer.name));
                }
                let tags = st.selection.active_tags();
                if !tags.is_empty() {
                    let names: Vec<&str> = tags.iter().map(String::as_str).collect();
                    ui.label(format!("Tags: {}", names.join(", ")));
                }
            });
        });
}
