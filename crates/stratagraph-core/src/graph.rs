use std::collections::{HashMap, HashSet};

use crate::{Connection, Dataset, Layer, LayerId, Node, NodeId};

/// A connection whose endpoints both resolved to nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConnection {
    pub source: NodeId,
    pub target: NodeId,
    pub source_idx: usize,
    pub target_idx: usize,
}

impl ResolvedConnection {
    pub fn touches(&self, id: &NodeId) -> bool {
        &self.source == id || &self.target == id
    }
}

/// Validated, indexed view of a [`Dataset`].
///
/// Layers and nodes keep dataset (document) order; the navigation panel and
/// digit shortcuts rely on it. Dangling connections and duplicate node ids
/// are dropped while indexing.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    layers: Vec<Layer>,
    nodes: Vec<Node>,
    node_index: HashMap<NodeId, usize>,
    connections: Vec<ResolvedConnection>,
    adjacency: HashMap<NodeId, HashSet<NodeId>>,
    tags: Vec<String>,
}

impl Graph {
    pub fn from_dataset(ds: Dataset) -> Self {
        let mut g = Graph {
            layers: Vec::with_capacity(ds.layers.len()),
            ..Default::default()
        };

        let mut seen_layers = HashSet::new();
        for layer in ds.layers {
            if !seen_layers.insert(layer.id.clone()) {
                tracing::warn!(layer = %layer.id, "duplicate layer id skipped");
                continue;
            }
            g.layers.push(layer);
        }

        let mut seen_tags = HashSet::new();
        for node in ds.nodes {
            if g.node_index.contains_key(&node.id) {
                tracing::warn!(node = %node.id, "duplicate node id skipped");
                continue;
            }
            if !seen_layers.contains(&node.layer_id) {
                tracing::debug!(node = %node.id, layer = %node.layer_id, "node references unknown layer");
            }
            for tag in &node.tags {
                if seen_tags.insert(tag.clone()) {
                    g.tags.push(tag.clone());
                }
            }
            g.node_index.insert(node.id.clone(), g.nodes.len());
            g.nodes.push(node);
        }

        for Connection { source, target } in ds.connections {
            let (Some(&source_idx), Some(&target_idx)) =
                (g.node_index.get(&source), g.node_index.get(&target))
            else {
                tracing::debug!(%source, %target, "dangling connection skipped");
                continue;
            };
            g.adjacency
                .entry(source.clone())
                .or_default()
                .insert(target.clone());
            g.adjacency
                .entry(target.clone())
                .or_default()
                .insert(source.clone());
            g.connections.push(ResolvedConnection {
                source,
                target,
                source_idx,
                target_idx,
            });
        }

        g
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| &l.id == id)
    }

    /// Zero-based position in document order.
    pub fn layer_at(&self, position: usize) -> Option<&Layer> {
        self.layers.get(position)
    }

    /// Smallest and largest `order` among layers.
    pub fn order_range(&self) -> Option<(i32, i32)> {
        let min = self.layers.iter().map(|l| l.order).min()?;
        let max = self.layers.iter().map(|l| l.order).max()?;
        Some((min, max))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn nodes_in_layer<'a>(&'a self, layer: &'a LayerId) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().filter(move |n| &n.layer_id == layer)
    }

    pub fn layer_node_count(&self, layer: &LayerId) -> usize {
        self.nodes_in_layer(layer).count()
    }

    pub fn connections(&self) -> &[ResolvedConnection] {
        &self.connections
    }

    /// Nodes one hop away from `id`, excluding `id` itself unless it has a self loop.
    pub fn neighbors(&self, id: &NodeId) -> impl Iterator<Item = &NodeId> {
        self.adjacency.get(id).into_iter().flatten()
    }

    /// `id` plus its one-hop neighbours; empty when `id` is unknown.
    pub fn neighborhood(&self, id: &NodeId) -> HashSet<NodeId> {
        if !self.node_index.contains_key(id) {
            return HashSet::new();
        }
        let mut out: HashSet<NodeId> = self.neighbors(id).cloned().collect();
        out.insert(id.clone());
        out
    }

    pub fn are_adjacent(&self, a: &NodeId, b: &NodeId) -> bool {
        self.adjacency.get(a).is_some_and(|set| set.contains(b))
    }

    /// Distinct tags in first-seen order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, layer: &str, tags: &[&str]) -> Node {
        Node {
            id: NodeId::from(id),
            layer_id: LayerId::from(layer),
            title: format!("Node {id}"),
            description: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn conn(a: &str, b: &str) -> Connection {
        Connection {
            source: NodeId::from(a),
            target: NodeId::from(b),
        }
    }

    fn sample() -> Dataset {
        Dataset {
            layers: vec![
                Layer {
                    id: LayerId::from("top"),
                    name: "Top".into(),
                    order: 1,
                },
                Layer {
                    id: LayerId::from("bottom"),
                    name: "Bottom".into(),
                    order: 0,
                },
            ],
            nodes: vec![
                node("a", "bottom", &["x", "y"]),
                node("b", "bottom", &["y"]),
                node("c", "top", &["z"]),
                node("a", "top", &[]),
            ],
            connections: vec![conn("a", "c"), conn("b", "ghost"), conn("c", "b")],
        }
    }

    #[test]
    fn keeps_document_order_and_drops_duplicates() {
        let g = Graph::from_dataset(sample());
        let layer_ids: Vec<_> = g.layers().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(layer_ids, ["top", "bottom"]);
        assert_eq!(g.nodes().len(), 3);
        assert_eq!(g.node(&NodeId::from("a")).map(|n| n.layer_id.as_str()), Some("bottom"));
        assert_eq!(g.order_range(), Some((0, 1)));
    }

    #[test]
    fn dangling_connections_are_skipped() {
        let g = Graph::from_dataset(sample());
        assert_eq!(g.connections().len(), 2);
        assert!(!g
            .connections()
            .iter()
            .any(|c| c.touches(&NodeId::from("ghost"))));
    }

    #[test]
    fn neighborhood_includes_self_and_is_undirected() {
        let g = Graph::from_dataset(sample());
        let hood = g.neighborhood(&NodeId::from("c"));
        assert_eq!(hood.len(), 3);
        assert!(g.are_adjacent(&NodeId::from("b"), &NodeId::from("c")));
        assert!(!g.are_adjacent(&NodeId::from("a"), &NodeId::from("b")));
        assert!(g.neighborhood(&NodeId::from("ghost")).is_empty());
    }

    #[test]
    fn tags_are_distinct_in_first_seen_order() {
        let g = Graph::from_dataset(sample());
        assert_eq!(g.tags(), ["x", "y", "z"]);
    }

    #[test]
    fn layer_lookup_by_position_and_count() {
        let g = Graph::from_dataset(sample());
        assert_eq!(g.layer_at(1).map(|l| l.name.as_str()), Some("Bottom"));
        assert!(g.layer_at(2).is_none());
        assert_eq!(g.layer_node_count(&LayerId::from("bottom")), 2);
        assert_eq!(g.layer_node_count(&LayerId::from("top")), 1);
    }
}
