use bevy::core_pipeline::bloom::BloomSettings;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::app::events::{FitToView, SceneClick, TogglePlayback};
use crate::graph::GraphState;
use crate::render::orbit::{self, OrbitAnimator};

const DRAG_THRESHOLD_PX: f32 = 4.0;
const PIXELS_PER_LINE: f32 = 40.0;

/// Pointer gesture bookkeeping for the orbit controls.
#[derive(Resource, Default)]
pub struct OrbitDrag {
    pressed: bool,
    travelled: f32,
    dragging: bool,
}

pub fn setup_scene(mut commands: Commands, st: Res<GraphState>) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 600.0,
    });

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 8000.0,
            ..default()
        },
        transform: Transform::from_xyz(10.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    let mut camera = commands.spawn(Camera3dBundle {
        camera: Camera {
            hdr: st.cfg.bloom,
            ..default()
        },
        projection: PerspectiveProjection {
            fov: st.cfg.fov,
            ..default()
        }
        .into(),
        transform: Transform::from_xyz(0.0, 180.0, 50.0).looking_at(Vec3::ONE, Vec3::Y),
        ..default()
    });
    if st.cfg.bloom {
        camera.insert(BloomSettings::NATURAL);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn orbit_controls(
    time: Res<Time>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut contexts: EguiContexts,
    mut drag: ResMut<OrbitDrag>,
    mut orbit: ResMut<OrbitAnimator>,
    mut clicks: EventWriter<SceneClick>,
    mut cam_q: Query<&mut Transform, With<Camera3d>>,
) {
    let now = time.elapsed_seconds_f64();
    let delta: Vec2 = motion.read().map(|m| m.delta).sum();
    let scroll: f32 = wheel
        .read()
        .map(|w| match w.unit {
            MouseScrollUnit::Line => w.y,
            MouseScrollUnit::Pixel => w.y / PIXELS_PER_LINE,
        })
        .sum();

    let over_ui = {
        let ctx = contexts.ctx_mut();
        ctx.wants_pointer_input() || ctx.is_pointer_over_area()
    };
    let Ok(mut cam_tf) = cam_q.get_single_mut() else {
        return;
    };
    let target = orbit.target;

    if buttons.just_pressed(MouseButton::Left) && !over_ui {
        *drag = OrbitDrag {
            pressed: true,
            ..default()
        };
    }

    if drag.pressed && buttons.pressed(MouseButton::Left) {
        drag.travelled += delta.length();
        if !drag.dragging && drag.travelled > DRAG_THRESHOLD_PX {
            drag.dragging = true;
            orbit.begin_user_control();
        }
        if drag.dragging && delta != Vec2::ZERO {
            cam_tf.translation = target + orbit::drag_offset(cam_tf.translation - target, -delta);
            cam_tf.look_at(target, Vec3::Y);
        }
    }

    if drag.pressed && buttons.just_released(MouseButton::Left) {
        drag.pressed = false;
        if drag.dragging {
            drag.dragging = false;
            orbit.end_user_control(now);
        } else if let Some(cursor) = windows.get_single().ok().and_then(|w| w.cursor_position()) {
            clicks.send(SceneClick(cursor));
        }
    }

    if scroll != 0.0 && !over_ui {
        orbit.begin_user_control();
        cam_tf.translation = target + orbit::zoom_offset(cam_tf.translation - target, scroll);
        cam_tf.look_at(target, Vec3::Y);
        if !drag.dragging {
            orbit.end_user_control(now);
        }
    }
}

/// Playback toggles, pending resumes and the per-frame orbit.
pub fn animate_camera(
    time: Res<Time>,
    mut orbit: ResMut<OrbitAnimator>,
    mut playback: EventReader<TogglePlayback>,
    mut cam_q: Query<&mut Transform, With<Camera3d>>,
) {
    let now = time.elapsed_seconds_f64();
    let Ok(mut cam_tf) = cam_q.get_single_mut() else {
        return;
    };

    for _ in playback.read() {
        orbit.toggle(now, cam_tf.translation);
        debug!(playing = orbit.is_playing(), "camera playback toggled");
    }

    orbit.poll(now, cam_tf.translation);

    if let Some(pos) = orbit.frame(now) {
        cam_tf.translation = pos;
        cam_tf.look_at(orbit.target, Vec3::Y);
    }
}

pub fn apply_fit_to_view(
    time: Res<Time>,
    st: Res<GraphState>,
    mut orbit: ResMut<OrbitAnimator>,
    mut requests: EventReader<FitToView>,
    mut cam_q: Query<&mut Transform, With<Camera3d>>,
) {
    if requests.read().count() == 0 {
        return;
    }
    let Some((min, max)) = st.scene.bounds(st.cfg.scene.node_radius) else {
        return;
    };
    let Ok(mut cam_tf) = cam_q.get_single_mut() else {
        return;
    };

    let (center, camera) = orbit::fit_view(min, max, st.cfg.fov);
    cam_tf.translation = camera;
    cam_tf.look_at(center, Vec3::Y);
    orbit.retarget(center, camera, time.elapsed_seconds_f64());
}
