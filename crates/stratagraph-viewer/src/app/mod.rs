use bevy::prelude::*;

use crate::app::events::{FitToView, SceneClick, TogglePlayback};
use crate::graph::GraphState;
use crate::render::orbit::OrbitAnimator;
use crate::render::{palette, OrbitDrag};
use crate::util::config::{self, ViewerArgs};

pub mod events;

pub struct StratagraphViewerPlugin {
    pub args: ViewerArgs,
}

impl Plugin for StratagraphViewerPlugin {
    fn build(&self, app: &mut App) {
        let mut cfg = config::load_or_default();
        self.args.apply(&mut cfg);
        if self.args.save_config {
            match config::save(&cfg) {
                Ok(()) => info!("saved viewer config"),
                Err(err) => error!("failed to save viewer config: {err:#}"),
            }
        }

        let mut st = GraphState::default();
        st.apply_viewer_config(&cfg);
        let orbit = OrbitAnimator::new(st.cfg.orbit, st.cfg.autoplay);

        app.add_event::<SceneClick>()
            .add_event::<TogglePlayback>()
            .add_event::<FitToView>()
            .insert_resource(ClearColor(palette::BACKGROUND))
            .insert_resource(orbit)
            .insert_resource(OrbitDrag::default())
            .insert_resource(st)
            .add_systems(
                Startup,
                (crate::render::setup_scene, crate::graph::load_dataset).chain(),
            )
            .add_systems(
                Update,
                (
                    crate::ui::handle_shortcuts,
                    crate::ui::nav_panel,
                    crate::ui::node_popup,
                    crate::ui::help_overlay,
                    crate::ui::hud_overlay,
                    crate::ui::tooltip_overlay,
                    crate::render::orbit_controls,
                    crate::render::hover_detection,
                    crate::render::picking_select,
                    crate::render::animate_camera,
                    crate::render::apply_fit_to_view,
                    crate::render::spawn_scene,
                    crate::render::apply_styles,
                    crate::render::animate_particles,
                    crate::render::draw_connections,
                )
                    .chain(),
            );
    }
}
