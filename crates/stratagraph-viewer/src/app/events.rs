use bevy::prelude::{Event, Vec2};

/// Left click on the 3D view that did not turn into a drag, in window coordinates.
#[derive(Event, Debug, Clone, Copy)]
pub struct SceneClick(pub Vec2);

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct TogglePlayback;

/// Frame every node and re-centre the orbit.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct FitToView;
