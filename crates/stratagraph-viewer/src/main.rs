mod app;
mod graph;
mod render;
mod ui;
mod util;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use crate::app::StratagraphViewerPlugin;
use crate::util::config;

fn main() -> anyhow::Result<()> {
    let args = config::parse_args()?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Stratagraph".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .add_plugins(StratagraphViewerPlugin { args })
        .run();

    Ok(())
}
