use bevy::prelude::Vec3;

pub const CURVE_SEGMENTS: usize = 50;
const CONTROL_OFFSET: f32 = 0.4;

/// Cubic Bézier between two node surfaces, pre-sampled for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionCurve {
    pub p0: Vec3,
    pub p1: Vec3,
    pub p2: Vec3,
    pub p3: Vec3,
    points: Vec<Vec3>,
    // cumulative length at each sampled point, same length as `points`
    lengths: Vec<f32>,
}

impl ConnectionCurve {
    /// The curve leaves the source vertically toward the target and enters the
    /// target vertically, so edges between stacked layers read as flows.
    pub fn between(start: Vec3, end: Vec3, node_radius: f32, layer_spacing: f32) -> Self {
        let dir = if end.y >= start.y { 1.0 } else { -1.0 };
        let p0 = start + Vec3::Y * (node_radius * dir);
        let p3 = end - Vec3::Y * (node_radius * dir);
        let p1 = p0 + Vec3::Y * (layer_spacing * CONTROL_OFFSET * dir);
        let p2 = p3 - Vec3::Y * (layer_spacing * CONTROL_OFFSET * dir);
        Self::from_controls(p0, p1, p2, p3)
    }

    pub fn from_controls(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        let mut curve = Self {
            p0,
            p1,
            p2,
            p3,
            points: Vec::with_capacity(CURVE_SEGMENTS + 1),
            lengths: Vec::with_capacity(CURVE_SEGMENTS + 1),
        };
        let mut total = 0.0;
        for i in 0..=CURVE_SEGMENTS {
            let p = curve.point_at(i as f32 / CURVE_SEGMENTS as f32);
            if let Some(prev) = curve.points.last() {
                total += prev.distance(p);
            }
            curve.points.push(p);
            curve.lengths.push(total);
        }
        curve
    }

    pub fn point_at(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        self.p0 * (u * u * u)
            + self.p1 * (3.0 * u * u * t)
            + self.p2 * (3.0 * u * t * t)
            + self.p3 * (t * t * t)
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at fraction `u` of the arc length, interpolated on the sampled polyline.
    pub fn point_at_arc(&self, u: f32) -> Vec3 {
        let total = self.length();
        if total <= f32::EPSILON {
            return self.p0;
        }
        let wanted = u.clamp(0.0, 1.0) * total;
        let i = self.lengths.partition_point(|&l| l < wanted);
        if i == 0 {
            return self.points[0];
        }
        if i >= self.points.len() {
            return self.points[self.points.len() - 1];
        }
        let (l0, l1) = (self.lengths[i - 1], self.lengths[i]);
        let span = (l1 - l0).max(f32::EPSILON);
        self.points[i - 1].lerp(self.points[i], (wanted - l0) / span)
    }
}

/// Flow particles run from the target end back to the source end and wrap.
pub fn advance_particle(progress: f32, speed: f32, dt: f32) -> f32 {
    let next = progress - speed * dt;
    if next < 0.0 {
        1.0
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-4
    }

    #[test]
    fn upward_curve_exits_top_and_enters_bottom() {
        let c = ConnectionCurve::between(Vec3::new(1.0, -5.0, 2.0), Vec3::new(-3.0, 5.0, 0.0), 0.25, 10.0);
        assert!(close(c.p0, Vec3::new(1.0, -4.75, 2.0)));
        assert!(close(c.p3, Vec3::new(-3.0, 4.75, 0.0)));
        assert!(close(c.p1, Vec3::new(1.0, -0.75, 2.0)));
        assert!(close(c.p2, Vec3::new(-3.0, 0.75, 0.0)));
    }

    #[test]
    fn downward_curve_is_mirrored() {
        let c = ConnectionCurve::between(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -5.0, 0.0), 0.25, 10.0);
        assert!(close(c.p0, Vec3::new(0.0, 4.75, 0.0)));
        assert!(close(c.p1, Vec3::new(0.0, 0.75, 0.0)));
        assert!(close(c.p3, Vec3::new(0.0, -4.75, 0.0)));
    }

    #[test]
    fn sampled_points_cover_both_ends() {
        let c = ConnectionCurve::between(Vec3::ZERO, Vec3::new(4.0, 10.0, 4.0), 0.25, 10.0);
        assert_eq!(c.points().len(), CURVE_SEGMENTS + 1);
        assert!(close(c.points()[0], c.p0));
        assert!(close(*c.points().last().expect("points"), c.p3));
        assert!(close(c.point_at(-1.0), c.p0));
        assert!(close(c.point_at(2.0), c.p3));
    }

    #[test]
    fn arc_length_lookup_hits_endpoints_and_midpoint_of_straight_curve() {
        let c = ConnectionCurve::from_controls(
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
        );
        assert!((c.length() - 3.0).abs() < 1e-3);
        assert!(close(c.point_at_arc(0.0), Vec3::ZERO));
        assert!(close(c.point_at_arc(1.0), Vec3::new(0.0, 3.0, 0.0)));
        assert!(c.point_at_arc(0.5).distance(Vec3::new(0.0, 1.5, 0.0)) < 1e-2);
    }

    #[test]
    fn particles_move_backward_and_wrap() {
        let p = advance_particle(0.5, 0.05, 1.0);
        assert!((p - 0.45).abs() < 1e-6);
        assert_eq!(advance_particle(0.01, 0.05, 1.0), 1.0);
    }
}
