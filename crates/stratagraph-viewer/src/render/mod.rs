pub mod camera;
pub mod orbit;
pub mod palette;
pub mod spatial;

pub use camera::{animate_camera, apply_fit_to_view, orbit_controls, setup_scene, OrbitDrag};
pub use spatial::{
    animate_particles, apply_styles, draw_connections, hover_detection, picking_select,
    spawn_scene,
};
