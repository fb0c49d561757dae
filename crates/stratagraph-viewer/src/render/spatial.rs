use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;
use std::sync::atomic::Ordering;
use stratagraph_core::NodeId;

use crate::app::events::SceneClick;
use crate::graph::curve::advance_particle;
use crate::graph::selection::{NodeStyle, SceneStyle};
use crate::graph::{GraphState, HoverSource};
use crate::render::palette;

/// Index into `Graph::nodes()`.
#[derive(Component)]
pub struct NodeMarker(pub usize);

#[derive(Component)]
pub struct ParticleMarker {
    pub connection: usize,
    pub progress: f32,
}

const PARTICLE_RADIUS: f32 = 0.015;

fn visibility(visible: bool) -> Visibility {
    if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

/// Particles share their connection's visibility.
fn particle_visible(style: &SceneStyle, connection: usize) -> bool {
    style
        .connections
        .get(connection)
        .is_some_and(|c| c.visible)
}

/// Visible node under `cursor`: among those whose projected centre is within
/// `radius_px`, the one nearest the camera wins. `project` maps a world
/// position to (screen point, distance from camera).
fn pick_index(
    positions: &[Vec3],
    styles: &[NodeStyle],
    cursor: Vec2,
    radius_px: f32,
    project: impl Fn(Vec3) -> Option<(Vec2, f32)>,
) -> Option<usize> {
    let mut best: Option<(f32, f32, usize)> = None;
    for (idx, pos) in positions.iter().enumerate() {
        if !styles.get(idx).is_some_and(|s| s.visible) {
            continue;
        }
        let Some((screen, depth)) = project(*pos) else {
            continue;
        };
        let d = screen.distance(cursor);
        if d >= radius_px {
            continue;
        }
        let closer = best.map_or(true, |(bd, bdist, _)| {
            depth < bd || (depth == bd && d < bdist)
        });
        if closer {
            best = Some((depth, d, idx));
        }
    }
    best.map(|(_, _, idx)| idx)
}

/// (Re)create sphere and particle entities after a dataset load.
pub fn spawn_scene(
    mut commands: Commands,
    st: Res<GraphState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<StandardMaterial>>,
    existing: Query<Entity, Or<(With<NodeMarker>, With<ParticleMarker>)>>,
) {
    if !st.needs_respawn.swap(false, Ordering::Relaxed) {
        return;
    }
    for e in existing.iter() {
        commands.entity(e).despawn_recursive();
    }

    let sphere = meshes.add(Sphere::new(st.cfg.scene.node_radius).mesh().uv(32, 16));
    for (idx, pos) in st.scene.positions.iter().enumerate() {
        // one material per node so each sphere can be recolored on its own
        let material = mats.add(StandardMaterial {
            base_color: palette::NODE_NORMAL,
            emissive: palette::NODE_NORMAL.into(),
            ..default()
        });
        commands.spawn((
            PbrBundle {
                mesh: sphere.clone(),
                material,
                transform: Transform::from_translation(*pos),
                ..default()
            },
            NodeMarker(idx),
        ));
    }

    let count = st.cfg.particles_per_connection;
    if count == 0 {
        return;
    }
    let dot = meshes.add(Sphere::new(PARTICLE_RADIUS).mesh().uv(8, 6));
    let glow = mats.add(StandardMaterial {
        base_color: palette::PARTICLE,
        emissive: LinearRgba::from(palette::PARTICLE) * 0.5,
        ..default()
    });
    for (connection, curve) in st.scene.curves.iter().enumerate() {
        for i in 0..count {
            let progress = i as f32 / count as f32;
            commands.spawn((
                PbrBundle {
                    mesh: dot.clone(),
                    material: glow.clone(),
                    transform: Transform::from_translation(curve.point_at_arc(progress)),
                    ..default()
                },
                ParticleMarker {
                    connection,
                    progress,
                },
            ));
        }
    }
}

/// Push derived styles onto sphere materials and entity visibility.
pub fn apply_styles(
    mut st: ResMut<GraphState>,
    mut mats: ResMut<Assets<StandardMaterial>>,
    mut nodes: Query<(&NodeMarker, &Handle<StandardMaterial>, &mut Visibility)>,
    mut particles: Query<(&ParticleMarker, &mut Visibility), Without<NodeMarker>>,
) {
    if !st.restyle_if_needed() {
        return;
    }

    for (marker, handle, mut vis) in nodes.iter_mut() {
        let Some(style) = st.style.nodes.get(marker.0) else {
            continue;
        };
        if let Some(mat) = mats.get_mut(handle) {
            let color = palette::tone_color(style.tone);
            mat.base_color = color;
            mat.emissive = color.into();
        }
        *vis = visibility(style.visible);
    }

    for (marker, mut vis) in particles.iter_mut() {
        *vis = visibility(particle_visible(&st.style, marker.connection));
    }
}

pub fn animate_particles(
    time: Res<Time>,
    st: Res<GraphState>,
    mut particles: Query<(&mut ParticleMarker, &mut Transform)>,
) {
    let dt = time.delta_seconds();
    for (mut p, mut tf) in particles.iter_mut() {
        let Some(curve) = st.scene.curves.get(p.connection) else {
            continue;
        };
        p.progress = advance_particle(p.progress, st.cfg.particle_speed, dt);
        tf.translation = curve.point_at_arc(p.progress);
    }
}

pub fn draw_connections(st: Res<GraphState>, mut gizmos: Gizmos) {
    for (curve, style) in st.scene.curves.iter().zip(&st.style.connections) {
        if !style.visible {
            continue;
        }
        gizmos.linestrip(
            curve.points().iter().copied(),
            palette::connection_color(style.opacity),
        );
    }
}

fn pick_node(
    st: &GraphState,
    camera: &Camera,
    cam_tf: &GlobalTransform,
    cursor: Vec2,
    radius_px: f32,
) -> Option<NodeId> {
    let eye = cam_tf.translation();
    let idx = pick_index(&st.scene.positions, &st.style.nodes, cursor, radius_px, |pos| {
        camera
            .world_to_viewport(cam_tf, pos)
            .map(|screen| (screen, eye.distance(pos)))
    })?;
    st.graph.nodes().get(idx).map(|n| n.id.clone())
}

pub fn hover_detection(
    windows: Query<&Window, With<PrimaryWindow>>,
    cam_q: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut contexts: EguiContexts,
    mut st: ResMut<GraphState>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, cam_tf)) = cam_q.get_single() else {
        return;
    };
    if contexts.ctx_mut().is_pointer_over_area() {
        st.unhover(HoverSource::Scene);
        return;
    }
    let Some(cursor) = window.cursor_position() else {
        st.unhover(HoverSource::Scene);
        return;
    };

    match pick_node(&st, camera, cam_tf, cursor, st.cfg.pick_radius_px) {
        Some(id) => {
            st.hover_node(&id, HoverSource::Scene, cursor);
        }
        None => {
            st.unhover(HoverSource::Scene);
        }
    }
}

pub fn picking_select(
    mut clicks: EventReader<SceneClick>,
    cam_q: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut st: ResMut<GraphState>,
) {
    let Ok((camera, cam_tf)) = cam_q.get_single() else {
        return;
    };
    for SceneClick(cursor) in clicks.read() {
        if let Some(id) = pick_node(&st, camera, cam_tf, *cursor, st.cfg.pick_radius_px) {
            st.click_node(&id);
        }
    }
}
