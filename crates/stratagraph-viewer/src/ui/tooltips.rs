use bevy::prelude::Res;
use bevy_egui::{egui, EguiContexts};

use crate::graph::GraphState;
use crate::ui::TOOLTIP_OFFSET;

pub fn render_tooltip(
    ctx: &egui::Context,
    id: &str,
    pos: egui::Pos2,
    lines: impl IntoIterator<Item = String>,
) {
    egui::Area::new(egui::Id::new(id))
        .order(egui::Order::Tooltip)
        .interactable(false)
        .fixed_pos(pos)
        .show(ctx, |ui| {
            ui.group(|ui| {
                for line in lines {
                    ui.label(line);
                }
            });
        });
}

/// Title of the node under the cursor, shown only for scene hover.
pub fn tooltip_overlay(mut contexts: EguiContexts, st: Res<GraphState>) {
    let Some((id, cursor)) = st.selection.tooltip() else {
        return;
    };
    let Some(title) = st.node_title(id) else {
        return;
    };
    let pos = egui::pos2(cursor.x + TOOLTIP_OFFSET.0, cursor.y + TOOLTIP_OFFSET.1);
    render_tooltip(contexts.ctx_mut(), "node_tooltip", pos, [title.to_string()]);
}
