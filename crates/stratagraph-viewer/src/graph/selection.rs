//! Hover / highlight / layer / tag state and the styles derived from it.
//!
//! Nothing visual is cached here: every color, opacity and visibility flag is
//! recomputed from the current [`Selection`] so that un-hovering or closing a
//! popup always lands on the color the other rules dictate.

use bevy::prelude::Vec2;
use stratagraph_core::{Graph, LayerId, Node, NodeId, ResolvedConnection};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeTone {
    Normal,
    Dimmed,
    Selected,
    Hovered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverSource {
    Scene,
    List,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hover {
    pub node: NodeId,
    pub source: HoverSource,
    pub cursor: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionParams {
    pub base_opacity: f32,
    pub dimmed_opacity: f32,
    /// Selecting a node also makes its layer the active one.
    pub select_activates_layer: bool,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            base_opacity: 0.2,
            dimmed_opacity: 0.02,
            select_activates_layer: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStyle {
    pub tone: NodeTone,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionStyle {
    pub opacity: f32,
    pub visible: bool,
}

/// Styles for the whole scene, index-aligned with `Graph::nodes()` and
/// `Graph::connections()`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneStyle {
    pub nodes: Vec<NodeStyle>,
    pub connections: Vec<ConnectionStyle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListEntryState {
    pub active: bool,
    pub connected: bool,
    pub visible: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub params: SelectionParams,
    highlighted: Option<NodeId>,
    hovered: Option<Hover>,
    active_layer: Option<LayerId>,
    active_tags: BTreeSet<String>,
}

impl Selection {
    pub fn active_layer(&self) -> Option<&LayerId> {
        self.active_layer.as_ref()
    }

    pub fn active_tags(&self) -> &BTreeSet<String> {
        &self.active_tags
    }

    pub fn is_tag_active(&self, tag: &str) -> bool {
        self.active_tags.contains(tag)
    }

    /// The popup exists exactly while a node is highlighted.
    pub fn popup_node(&self) -> Option<&NodeId> {
        self.highlighted.as_ref()
    }

    /// Tooltips follow scene hover only; list hover drives color alone.
    pub fn tooltip(&self) -> Option<(&NodeId, Vec2)> {
        self.hovered
            .as_ref()
            .filter(|h| h.source == HoverSource::Scene)
            .map(|h| (&h.node, h.cursor))
    }

    pub fn clear(&mut self) {
        self.highlighted = None;
        self.hovered = None;
        self.active_layer = None;
        self.active_tags.clear();
    }

    // ----- transitions; each returns whether derived styles may have changed -----

    pub fn hover(&mut self, graph: &Graph, id: &NodeId, source: HoverSource, cursor: Vec2) -> bool {
        if graph.node(id).is_none() {
            return false;
        }
        if let Some(h) = self.hovered.as_mut() {
            if &h.node == id && h.source == source {
                h.cursor = cursor;
                return false;
            }
        }
        self.hovered = Some(Hover {
            node: id.clone(),
            source,
            cursor,
        });
        true
    }

    /// Leaving a surface only clears hover that surface started; the scene
    /// losing the pointer does not cancel a list-entry hover.
    pub fn unhover(&mut self, source: HoverSource) -> bool {
        if self.hovered.as_ref().is_some_and(|h| h.source == source) {
            self.hovered = None;
            return true;
        }
        false
    }

    pub fn click(&mut self, graph: &Graph, id: &NodeId) -> bool {
        let Some(node) = graph.node(id) else {
            return false;
        };
        if self.highlighted.as_ref() == Some(id) {
            self.highlighted = None;
            return true;
        }
        self.highlighted = Some(id.clone());
        if self.params.select_activates_layer && graph.layer(&node.layer_id).is_some() {
            self.active_layer = Some(node.layer_id.clone());
        }
        true
    }

    pub fn close_popup(&mut self) -> bool {
        self.highlighted.take().is_some()
    }

    pub fn toggle_layer(&mut self, graph: &Graph, layer: &LayerId) -> bool {
        if graph.layer(layer).is_none() {
            return false;
        }
        if self.active_layer.as_ref() == Some(layer) {
            self.active_layer = None;
        } else {
            self.active_layer = Some(layer.clone());
        }
        true
    }

    /// Digit shortcut: `digit` 1 toggles the first layer in document order.
    pub fn toggle_layer_shortcut(&mut self, graph: &Graph, digit: usize) -> bool {
        let Some(layer) = digit.checked_sub(1).and_then(|i| graph.layer_at(i)) else {
            return false;
        };
        let id = layer.id.clone();
        self.toggle_layer(graph, &id)
    }

    /// Tag filtering and selection are exclusive: any tag click drops the
    /// highlight and the active layer first.
    pub fn toggle_tag(&mut self, graph: &Graph, tag: &str) -> bool {
        if !graph.tags().iter().any(|t| t == tag) {
            return false;
        }
        self.highlighted = None;
        self.active_layer = None;
        if !self.active_tags.remove(tag) {
            self.active_tags.insert(tag.to_string());
        }
        true
    }

    pub fn escape(&mut self) -> bool {
        let closed = self.close_popup();
        let cleared = self.active_layer.take().is_some();
        closed || cleared
    }

    // ----- derivation -----

    pub fn node_visible(&self, node: &Node) -> bool {
        self.active_tags.is_empty() || node.has_any_tag(&self.active_tags)
    }

    fn base_tone(&self, graph: &Graph, node: &Node) -> NodeTone {
        if let Some(h) = &self.highlighted {
            if h == &node.id {
                NodeTone::Selected
            } else if graph.are_adjacent(h, &node.id) {
                NodeTone::Normal
            } else {
                NodeTone::Dimmed
            }
        } else if let Some(layer) = &self.active_layer {
            if &node.layer_id == layer {
                NodeTone::Normal
            } else {
                NodeTone::Dimmed
            }
        } else {
            NodeTone::Normal
        }
    }

    pub fn node_style(&self, graph: &Graph, node: &Node) -> NodeStyle {
        let hovered = self.hovered.as_ref().is_some_and(|h| h.node == node.id);
        let tone = match self.base_tone(graph, node) {
            NodeTone::Selected => NodeTone::Selected,
            _ if hovered => NodeTone::Hovered,
            tone => tone,
        };
        NodeStyle {
            tone,
            visible: self.node_visible(node),
        }
    }

    pub fn connection_style(&self, graph: &Graph, conn: &ResolvedConnection) -> ConnectionStyle {
        let opacity = match (&self.highlighted, &self.active_layer) {
            (Some(h), _) if conn.touches(h) => self.params.base_opacity,
            (Some(_), _) | (None, Some(_)) => self.params.dimmed_opacity,
            (None, None) => self.params.base_opacity,
        };
        let nodes = graph.nodes();
        let visible = nodes
            .get(conn.source_idx)
            .zip(nodes.get(conn.target_idx))
            .is_some_and(|(a, b)| self.node_visible(a) && self.node_visible(b));
        ConnectionStyle { opacity, visible }
    }

    pub fn derive(&self, graph: &Graph) -> SceneStyle {
        SceneStyle {
            nodes: graph
                .nodes()
                .iter()
                .map(|n| self.node_style(graph, n))
                .collect(),
            connections: graph
                .connections()
                .iter()
                .map(|c| self.connection_style(graph, c))
                .collect(),
        }
    }

    pub fn list_entry(&self, graph: &Graph, node: &Node) -> ListEntryState {
        let (active, connected) = match &self.highlighted {
            Some(h) => (h == &node.id, h == &node.id || graph.are_adjacent(h, &node.id)),
            None => (false, false),
        };
        ListEntryState {
            active,
            connected,
            visible: self.node_visible(node),
        }
    }
}
