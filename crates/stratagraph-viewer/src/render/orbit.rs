use bevy::prelude::{Resource, Vec2, Vec3};

const ROTATE_SPEED: f32 = 0.005;
const MAX_PITCH: f32 = 1.45;
const ZOOM_STEP: f32 = 0.9;
const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    /// Elapsed-clock units per wall second.
    pub time_scale: f64,
    /// Radians per elapsed-clock unit.
    pub angular_speed: f64,
    /// Wait after a gesture ends before orbiting again, in seconds.
    pub resume_delay: f64,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            time_scale: 0.1,
            angular_speed: 0.5,
            resume_delay: 0.0,
        }
    }
}

/// Auto-rotation clock for the camera.
///
/// The angle at time `now` is
/// `base_angle + (accumulated + (now - start_time) * time_scale) * angular_speed`;
/// pausing folds the running session into `accumulated`, gestures and resumes
/// re-base `base_angle` on wherever the camera actually is.
#[derive(Resource, Debug, Clone)]
pub struct OrbitAnimator {
    pub params: OrbitParams,
    pub target: Vec3,
    base_angle: f32,
    radius: f32,
    height: f32,
    accumulated: f64,
    start_time: f64,
    user_controlling: bool,
    playing: bool,
    resume_at: Option<f64>,
}

impl Default for OrbitAnimator {
    fn default() -> Self {
        Self::new(OrbitParams::default(), true)
    }
}

impl OrbitAnimator {
    pub fn new(params: OrbitParams, playing: bool) -> Self {
        Self {
            params,
            target: Vec3::ZERO,
            base_angle: 0.0,
            radius: 25.0,
            height: 10.0,
            accumulated: 0.0,
            start_time: 0.0,
            user_controlling: false,
            playing,
            resume_at: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Re-derive angle, radius and height from a camera position.
    pub fn capture(&mut self, camera: Vec3) {
        let d = camera - self.target;
        self.base_angle = d.z.atan2(d.x);
        self.radius = Vec2::new(d.x, d.z).length();
        self.height = camera.y;
    }

    /// New orbit centre (fit-to-view); the clock restarts from the given camera.
    pub fn retarget(&mut self, target: Vec3, camera: Vec3, now: f64) {
        self.target = target;
        self.capture(camera);
        self.start_time = now;
        self.accumulated = 0.0;
    }

    pub fn begin_user_control(&mut self) {
        self.user_controlling = true;
        self.resume_at = None;
    }

    pub fn end_user_control(&mut self, now: f64) {
        if self.user_controlling {
            self.resume_at = Some(now + self.params.resume_delay);
        }
    }

    /// Fire the pending resume once its deadline has passed. Returns true when it fired.
    pub fn poll(&mut self, now: f64, camera: Vec3) -> bool {
        match self.resume_at {
            Some(at) if now >= at => {
                self.resume_at = None;
                self.capture(camera);
                self.start_time = now;
                // a drag while paused keeps the elapsed clock for the next resume
                if self.playing {
                    self.accumulated = 0.0;
                }
                self.user_controlling = false;
                true
            }
            _ => false,
        }
    }

    pub fn pause(&mut self, now: f64) {
        if !self.playing {
            return;
        }
        if !self.user_controlling {
            self.accumulated += (now - self.start_time) * self.params.time_scale;
        }
        self.playing = false;
    }

    /// Resuming starts fresh from the current camera: `accumulated` is reset,
    /// so time spent paused never shows up as a jump.
    pub fn resume(&mut self, now: f64, camera: Vec3) {
        if self.playing {
            return;
        }
        self.capture(camera);
        self.start_time = now;
        self.accumulated = 0.0;
        self.playing = true;
    }

    pub fn toggle(&mut self, now: f64, camera: Vec3) {
        if self.playing {
            self.pause(now);
        } else {
            self.resume(now, camera);
        }
    }

    /// Elapsed orbit clock; frozen while paused or under user control.
    pub fn total_elapsed(&self, now: f64) -> f64 {
        if self.playing && !self.user_controlling {
            self.accumulated + (now - self.start_time) * self.params.time_scale
        } else {
            self.accumulated
        }
    }

    pub fn angle_at(&self, now: f64) -> f32 {
        self.base_angle + (self.total_elapsed(now) * self.params.angular_speed) as f32
    }

    pub fn position_at(&self, now: f64) -> Vec3 {
        let angle = self.angle_at(now);
        Vec3::new(
            self.target.x + angle.cos() * self.radius,
            self.height,
            self.target.z + angle.sin() * self.radius,
        )
    }

    /// Camera position for this frame, or `None` while paused or under user control.
    pub fn frame(&self, now: f64) -> Option<Vec3> {
        (self.playing && !self.user_controlling).then(|| self.position_at(now))
    }
}

/// Rotate `offset` (camera minus target) by a pointer drag.
pub fn drag_offset(offset: Vec3, delta: Vec2) -> Vec3 {
    let radius = offset.length().max(f32::EPSILON);
    let yaw = offset.z.atan2(offset.x) + delta.x * ROTATE_SPEED;
    let pitch = ((offset.y / radius).clamp(-1.0, 1.0).asin() + delta.y * ROTATE_SPEED)
        .clamp(-MAX_PITCH, MAX_PITCH);
    let flat = radius * pitch.cos();
    Vec3::new(flat * yaw.cos(), radius * pitch.sin(), flat * yaw.sin())
}

/// Dolly `offset` toward (positive `scroll`) or away from the target.
pub fn zoom_offset(offset: Vec3, scroll: f32) -> Vec3 {
    let radius = offset.length();
    if radius <= f32::EPSILON {
        return offset;
    }
    let wanted = (radius * ZOOM_STEP.powf(scroll)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    offset * (wanted / radius)
}

/// Camera placement that frames the box `min..max` for a vertical field of
/// view `fov` (radians). Returns `(look_at, camera_position)`.
pub fn fit_view(min: Vec3, max: Vec3, fov: f32) -> (Vec3, Vec3) {
    let center = (min + max) * 0.5;
    let size = max - min;
    let max_dim = size.x.max(size.y).max(size.z);
    let distance = max_dim / (2.0 * (fov / 2.0).tan()) * 1.5;
    let camera = center + Vec3::new(distance * 0.7, distance * 0.25, distance * 0.7);
    (center, camera)
}
