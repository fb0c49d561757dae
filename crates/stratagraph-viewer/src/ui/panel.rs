use bevy::prelude::{ResMut, Vec2};
use bevy_egui::{egui, EguiContexts};
use stratagraph_core::{LayerId, NodeId};

use crate::graph::state::LoadStatus;
use crate::graph::{GraphState, HoverSource};
use crate::render::palette;
use crate::ui::PANEL_W;

enum PanelAction {
    ToggleLayer(LayerId),
    Click(NodeId),
    ToggleTag(String),
}

fn egui_color(c: bevy::prelude::Color) -> egui::Color32 {
    let s = c.to_srgba();
    egui::Color32::from_rgb(
        (s.red * 255.0) as u8,
        (s.green * 255.0) as u8,
        (s.blue * 255.0) as u8,
    )
}

/// Layer list, per-layer node lists and tag filters. Hidden in fullscreen.
pub fn nav_panel(mut contexts: EguiContexts, mut st: ResMut<GraphState>) {
    if st.ui.fullscreen {
        st.unhover(HoverSource::List);
        return;
    }

    let mut action = None;
    let mut list_hover: Option<NodeId> = None;

    egui::SidePanel::left("nav")
        .exact_width(PANEL_W)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Stratagraph");
            match &st.ui.status {
                LoadStatus::Failed(reason) => {
                    ui.colored_label(egui::Color32::LIGHT_RED, "Error loading data");
                    ui.small(reason.as_str());
                    return;
                }
                LoadStatus::NotLoaded => {
                    ui.label("No data loaded");
                    return;
                }
                LoadStatus::Loaded { .. } => {}
            }
            ui.separator();

            egui::ScrollArea::vertical()
                .id_source("nav_layers")
                .max_height(ui.available_height() * 0.7)
                .show(ui, |ui| {
                    for layer in st.graph.layers() {
                        let active = st.selection.active_layer() == Some(&layer.id);
                        let header = format!(
                            "{} ({})",
                            layer.name,
                            st.graph.layer_node_count(&layer.id)
                        );
                        if ui.selectable_label(active, header).clicked() {
                            action = Some(PanelAction::ToggleLayer(layer.id.clone()));
                        }
                        if !active {
                            continue;
                        }

                        ui.indent(layer.id.as_str(), |ui| {
                            for node in st.graph.nodes_in_layer(&layer.id) {
                                let entry = st.selection.list_entry(&st.graph, node);
                                if !entry.visible {
                                    continue;
                                }
                                let mut text = egui::RichText::new(&node.title);
                                if entry.active {
                                    text = text.color(egui_color(palette::NODE_SELECTED)).strong();
                                } else if entry.connected {
                                    text = text.color(egui_color(palette::NODE_HOVERED));
                                }
                                let resp = ui.selectable_label(entry.active, text);
                                if resp.hovered() {
                                    list_hover = Some(node.id.clone());
                                }
                                if resp.clicked() {
                                    action = Some(PanelAction::Click(node.id.clone()));
                                }
                            }
                        });
                    }
                });

            if !st.graph.tags().is_empty() {
                ui.separator();
                ui.label("Tags");
                ui.horizontal_wrapped(|ui| {
                    for tag in st.graph.tags() {
                        if ui
                            .selectable_label(st.selection.is_tag_active(tag), tag.as_str())
                            .clicked()
                        {
                            action = Some(PanelAction::ToggleTag(tag.clone()));
                        }
                    }
                });
            }
        });

    match list_hover {
        Some(id) => {
            st.hover_node(&id, HoverSource::List, Vec2::ZERO);
        }
        None => {
            st.unhover(HoverSource::List);
        }
    }

    match action {
        Some(PanelAction::ToggleLayer(id)) => {
            st.toggle_layer(&id);
        }
        Some(PanelAction::Click(id)) => {
            st.click_node(&id);
        }
        Some(PanelAction::ToggleTag(tag)) => {
            st.toggle_tag(&tag);
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colors_convert_to_egui() {
        assert_eq!(egui_color(palette::NODE_NORMAL), egui::Color32::WHITE);
        assert_eq!(
            egui_color(palette::NODE_SELECTED),
            egui::Color32::from_rgb(110, 211, 159)
        );
    }
}
