use bevy::prelude::{Resource, Vec2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use stratagraph_core::{Dataset, Graph, LayerId, Node, NodeId};

use crate::graph::placement::PlacementParams;
use crate::graph::scene::{SceneModel, SceneParams};
use crate::graph::selection::{HoverSource, SceneStyle, Selection, SelectionParams};
use crate::render::orbit::OrbitParams;
use crate::util::config::ViewerConfig;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadStatus {
    #[default]
    NotLoaded,
    Loaded {
        nodes: usize,
        connections: usize,
    },
    Failed(String),
}

#[derive(Default)]
pub struct UiState {
    pub fullscreen: bool,
    pub help_open: bool,
    pub status: LoadStatus,
}

pub struct CfgState {
    pub dataset_path: PathBuf,
    pub seed: Option<u64>,
    pub autoplay: bool,
    pub scene: SceneParams,
    pub particles_per_connection: usize,
    pub particle_speed: f32,
    pub orbit: OrbitParams,
    pub fov: f32,
    pub bloom: bool,
    pub pick_radius_px: f32,
}

impl Default for CfgState {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/data.json"),
            seed: None,
            autoplay: true,
            scene: SceneParams::default(),
            particles_per_connection: 10,
            particle_speed: 0.05,
            orbit: OrbitParams::default(),
            fov: 65f32.to_radians(),
            bloom: true,
            pick_radius_px: 14.0,
        }
    }
}

#[derive(Resource)]
pub struct GraphState {
    pub graph: Graph,
    pub scene: SceneModel,
    pub selection: Selection,
    /// Last derived styles; refreshed whenever `needs_restyle` is consumed.
    pub style: SceneStyle,
    pub ui: UiState,
    pub cfg: CfgState,

    pub needs_respawn: AtomicBool,
    pub needs_restyle: AtomicBool,
}

impl Default for GraphState {
    fn default() -> Self {
        Self {
            graph: Graph::default(),
            scene: SceneModel::default(),
            selection: Selection::default(),
            style: SceneStyle::default(),
            ui: UiState::default(),
            cfg: CfgState::default(),
            needs_respawn: AtomicBool::new(false),
            needs_restyle: AtomicBool::new(true),
        }
    }
}

impl GraphState {
    pub fn apply_viewer_config(&mut self, cfg: &ViewerConfig) {
        self.cfg.dataset_path = PathBuf::from(&cfg.dataset_path);
        self.cfg.seed = cfg.seed;
        self.cfg.autoplay = cfg.autoplay;
        self.cfg.scene = SceneParams {
            layer_spacing: cfg.layer_spacing,
            node_radius: cfg.node_radius,
            placement: PlacementParams {
                extent: cfg.placement_extent,
                min_distance: cfg.min_distance,
                max_attempts: cfg.max_attempts.max(1),
            },
        };
        self.cfg.particles_per_connection = cfg.particles_per_connection;
        self.cfg.particle_speed = cfg.particle_speed;
        self.cfg.orbit = OrbitParams {
            time_scale: cfg.orbit_time_scale,
            angular_speed: cfg.orbit_angular_speed,
            resume_delay: cfg.resume_delay_ms as f64 / 1000.0,
        };
        self.cfg.fov = cfg.field_of_view_deg.clamp(10.0, 150.0).to_radians();
        self.cfg.bloom = cfg.bloom;
        self.cfg.pick_radius_px = cfg.pick_radius_px;
        self.selection.params = SelectionParams {
            base_opacity: cfg.base_opacity,
            dimmed_opacity: cfg.dimmed_opacity,
            select_activates_layer: cfg.select_activates_layer,
        };
        self.mark_restyle();
    }

    pub fn clear(&mut self) {
        self.graph = Graph::default();
        self.scene = SceneModel::default();
        self.selection.clear();
        self.style = SceneStyle::default();
        self.ui.status = LoadStatus::NotLoaded;
        self.needs_respawn.store(true, Ordering::Relaxed);
        self.mark_restyle();
    }

    /// Index and place a dataset; the layout RNG is seeded from config when set.
    pub fn install(&mut self, dataset: Dataset) {
        let graph = Graph::from_dataset(dataset);
        let mut rng = match self.cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let scene = SceneModel::build(&graph, &self.cfg.scene, &mut rng);
        self.ui.status = LoadStatus::Loaded {
            nodes: graph.nodes().len(),
            connections: graph.connections().len(),
        };
        self.selection.clear();
        self.graph = graph;
        self.scene = scene;
        self.needs_respawn.store(true, Ordering::Relaxed);
        self.mark_restyle();
    }

    pub fn load_failed(&mut self, reason: String) {
        self.clear();
        self.ui.status = LoadStatus::Failed(reason);
    }

    pub fn mark_restyle(&self) {
        self.needs_restyle.store(true, Ordering::Relaxed);
    }

    /// Re-derive styles if a transition asked for it. Returns true when styles changed.
    pub fn restyle_if_needed(&mut self) -> bool {
        if !self.needs_restyle.swap(false, Ordering::Relaxed) {
            return false;
        }
        self.style = self.selection.derive(&self.graph);
        true
    }

    fn changed(&self, changed: bool) -> bool {
        if changed {
            self.mark_restyle();
        }
        changed
    }

    // ----- transitions shared by the scene and the navigation panel -----

    pub fn hover_node(&mut self, id: &NodeId, source: HoverSource, cursor: Vec2) -> bool {
        let c = self.selection.hover(&self.graph, id, source, cursor);
        self.changed(c)
    }

    pub fn unhover(&mut self, source: HoverSource) -> bool {
        let c = self.selection.unhover(source);
        self.changed(c)
    }

    pub fn click_node(&mut self, id: &NodeId) -> bool {
        let c = self.selection.click(&self.graph, id);
        self.changed(c)
    }

    pub fn close_popup(&mut self) -> bool {
        let c = self.selection.close_popup();
        self.changed(c)
    }

    pub fn toggle_layer(&mut self, layer: &LayerId) -> bool {
        let c = self.selection.toggle_layer(&self.graph, layer);
        self.changed(c)
    }

    pub fn toggle_layer_shortcut(&mut self, digit: usize) -> bool {
        let c = self.selection.toggle_layer_shortcut(&self.graph, digit);
        self.changed(c)
    }

    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        let c = self.selection.toggle_tag(&self.graph, tag);
        self.changed(c)
    }

    pub fn escape(&mut self) -> bool {
        let c = self.selection.escape();
        self.changed(c)
    }

    // ----- lookups -----

    pub fn popup_node(&self) -> Option<&Node> {
        self.selection.popup_node().and_then(|id| self.graph.node(id))
    }

    pub fn node_title(&self, id: &NodeId) -> Option<&str> {
        self.graph.node(id).map(|n| n.title.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"{
        "layers": [
            {"id": "l0", "name": "Ground", "order": 0},
            {"id": "l1", "name": "Upper", "order": 1}
        ],
        "nodes": [
            {"id": "a", "layerId": "l0", "title": "Alpha", "description": "first node", "tags": ["core"]},
            {"id": "b", "layerId": "l0", "title": "Beta", "description": "second node"},
            {"id": "c", "layerId": "l1", "title": "Gamma", "description": "third node", "tags": ["core"]},
            {"id": "d", "layerId": "l1", "title": "Delta", "description": "fourth node"}
        ],
        "connections": [{"source": "a", "target": "c"}, {"source": "a", "target": "zzz"}]
    }"#;

    fn loaded() -> GraphState {
        let mut st = GraphState::default();
        st.cfg.seed = Some(1);
        st.install(Dataset::from_json(DATA).expect("dataset"));
        st
    }

    #[test]
    fn install_builds_scene_and_requests_respawn() {
        let st = loaded();
        assert_eq!(
            st.ui.status,
            LoadStatus::Loaded {
                nodes: 4,
                connections: 1
            }
        );
        assert_eq!(st.scene.positions.len(), 4);
        assert_eq!(st.scene.curves.len(), 1);
        assert!(st.needs_respawn.load(Ordering::Relaxed));
    }

    #[test]
    fn list_click_opens_popup_and_restyles_once() {
        let mut st = loaded();
        st.restyle_if_needed();
        assert!(!st.restyle_if_needed());

        assert!(st.click_node(&NodeId::from("a")));
        assert!(st.restyle_if_needed());
        let popup = st.popup_node().expect("popup");
        assert_eq!(popup.title, "Alpha");
        assert_eq!(popup.description, "first node");
        assert_eq!(st.style.connections[0].opacity, 0.2);

        assert!(st.close_popup());
        assert!(st.popup_node().is_none());
    }

    #[test]
    fn no_op_transitions_do_not_request_restyle() {
        let mut st = loaded();
        st.restyle_if_needed();
        assert!(!st.click_node(&NodeId::from("missing")));
        assert!(!st.toggle_tag("missing"));
        assert!(!st.escape());
        assert!(!st.restyle_if_needed());
    }

    #[test]
    fn failed_load_leaves_empty_scene() {
        let mut st = loaded();
        st.load_failed("boom".to_string());
        assert!(st.graph.is_empty());
        assert!(st.scene.positions.is_empty());
        assert_eq!(st.ui.status, LoadStatus::Failed("boom".to_string()));
    }

    #[test]
    fn config_is_applied_to_every_component() {
        let mut st = GraphState::default();
        let cfg = ViewerConfig {
            dimmed_opacity: 0.05,
            resume_delay_ms: 1500,
            field_of_view_deg: 90.0,
            max_attempts: 0,
            ..ViewerConfig::default()
        };
        st.apply_viewer_config(&cfg);
        assert_eq!(st.selection.params.dimmed_opacity, 0.05);
        assert_eq!(st.cfg.orbit.resume_delay, 1.5);
        assert!((st.cfg.fov - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(st.cfg.scene.placement.max_attempts, 1);
    }
}
