use bevy::prelude::Vec3;
use rand::Rng;
use std::collections::HashMap;
use stratagraph_core::{Graph, LayerId};

use crate::graph::curve::ConnectionCurve;
use crate::graph::placement::{self, PlacementParams};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneParams {
    pub layer_spacing: f32,
    pub node_radius: f32,
    pub placement: PlacementParams,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            layer_spacing: 10.0,
            node_radius: 0.25,
            placement: PlacementParams::default(),
        }
    }
}

/// Where everything sits. Positions are fixed once built.
#[derive(Debug, Clone, Default)]
pub struct SceneModel {
    /// Index-aligned with `Graph::nodes()`.
    pub positions: Vec<Vec3>,
    /// Index-aligned with `Graph::connections()`.
    pub curves: Vec<ConnectionCurve>,
}

impl SceneModel {
    pub fn build<R: Rng + ?Sized>(graph: &Graph, params: &SceneParams, rng: &mut R) -> Self {
        let mut layer_heights: HashMap<&LayerId, f32> = HashMap::new();
        if let Some(range) = graph.order_range() {
            for layer in graph.layers() {
                layer_heights.insert(
                    &layer.id,
                    placement::layer_height(layer.order, range, params.layer_spacing),
                );
            }
        }

        let mut positions: Vec<Vec3> = Vec::with_capacity(graph.nodes().len());
        for node in graph.nodes() {
            let y = layer_heights.get(&node.layer_id).copied().unwrap_or(0.0);
            // nodes of unknown layers are sampled at y = 0 like any other
            let centred = graph.layer(&node.layer_id).is_some()
                && graph.layer_node_count(&node.layer_id) == 1;
            let pos = if centred {
                Vec3::new(0.0, y, 0.0)
            } else {
                placement::place(rng, &params.placement, y, &positions)
            };
            positions.push(pos);
        }

        let curves = graph
            .connections()
            .iter()
            .map(|c| {
                ConnectionCurve::between(
                    positions[c.source_idx],
                    positions[c.target_idx],
                    params.node_radius,
                    params.layer_spacing,
                )
            })
            .collect();

        Self { positions, curves }
    }

    /// Axis-aligned bounds of all spheres, radius included.
    pub fn bounds(&self, node_radius: f32) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        let (min, max) = self
            .positions
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        Some((min - Vec3::splat(node_radius), max + Vec3::splat(node_radius)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use stratagraph_core::{Connection, Dataset, Layer, Node, NodeId};

    fn graph() -> Graph {
        let node = |id: &str, layer: &str| Node {
            id: NodeId::from(id),
            layer_id: LayerId::from(layer),
            title: id.to_string(),
            description: String::new(),
            tags: Vec::new(),
        };
        Graph::from_dataset(Dataset {
            layers: vec![
                Layer {
                    id: LayerId::from("low"),
                    name: "Low".into(),
                    order: 0,
                },
                Layer {
                    id: LayerId::from("high"),
                    name: "High".into(),
                    order: 1,
                },
            ],
            nodes: vec![node("solo", "high"), node("a", "low"), node("b", "low"), node("c", "low")],
            connections: vec![Connection {
                source: NodeId::from("a"),
                target: NodeId::from("solo"),
            }],
        })
    }

    #[test]
    fn single_node_layer_is_centred_and_layers_are_stacked() {
        let g = graph();
        let scene = SceneModel::build(&g, &SceneParams::default(), &mut StdRng::seed_from_u64(3));
        assert_eq!(scene.positions[0], Vec3::new(0.0, 5.0, 0.0));
        for p in &scene.positions[1..] {
            assert_eq!(p.y, -5.0);
        }
    }

    #[test]
    fn lone_node_of_unknown_layer_is_sampled_not_centred() {
        let g = Graph::from_dataset(Dataset {
            layers: vec![Layer {
                id: LayerId::from("only"),
                name: "Only".into(),
                order: 3,
            }],
            nodes: vec![
                Node {
                    id: NodeId::from("stray"),
                    layer_id: LayerId::from("missing"),
                    title: "stray".into(),
                    description: String::new(),
                    tags: Vec::new(),
                },
                Node {
                    id: NodeId::from("lone"),
                    layer_id: LayerId::from("only"),
                    title: "lone".into(),
                    description: String::new(),
                    tags: Vec::new(),
                },
            ],
            connections: Vec::new(),
        });
        let params = SceneParams::default();
        let scene = SceneModel::build(&g, &params, &mut StdRng::seed_from_u64(9));
        let expected = placement::place(&mut StdRng::seed_from_u64(9), &params.placement, 0.0, &[]);
        assert_eq!(scene.positions[0], expected);
        assert_eq!(scene.positions[1], Vec3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn layer_nodes_keep_their_distance() {
        let g = graph();
        let scene = SceneModel::build(&g, &SceneParams::default(), &mut StdRng::seed_from_u64(11));
        let low = &scene.positions[1..];
        for (i, a) in low.iter().enumerate() {
            for b in &low[i + 1..] {
                assert!(a.distance(*b) >= 2.0);
            }
        }
    }

    #[test]
    fn curves_follow_connections_and_bounds_include_radius() {
        let g = graph();
        let scene = SceneModel::build(&g, &SceneParams::default(), &mut StdRng::seed_from_u64(5));
        assert_eq!(scene.curves.len(), 1);
        let curve = &scene.curves[0];
        assert!((curve.p0.y - (-4.75)).abs() < 1e-5);
        assert!((curve.p3.y - 4.75).abs() < 1e-5);

        let (min, max) = scene.bounds(0.25).expect("bounds");
        assert!((max.y - 5.25).abs() < 1e-5);
        assert!((min.y - (-5.25)).abs() < 1e-5);
        assert!(SceneModel::default().bounds(0.25).is_none());
    }
}
