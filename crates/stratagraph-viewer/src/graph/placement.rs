use bevy::prelude::Vec3;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementParams {
    /// Side of the square (centred on the origin) candidates are drawn from.
    pub extent: f32,
    pub min_distance: f32,
    pub max_attempts: usize,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            extent: 15.0,
            min_distance: 2.0,
            max_attempts: 100,
        }
    }
}

fn candidate<R: Rng + ?Sized>(rng: &mut R, extent: f32, y: f32) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * extent,
        y,
        (rng.gen::<f32>() - 0.5) * extent,
    )
}

pub fn is_clear(pos: Vec3, existing: &[Vec3], min_distance: f32) -> bool {
    existing.iter().all(|p| p.distance(pos) >= min_distance)
}

/// Rejection-sample a node position at height `layer_y`.
///
/// Falls back to an unchecked candidate once `max_attempts` are used up, so
/// crowded layers overlap instead of failing.
pub fn place<R: Rng + ?Sized>(
    rng: &mut R,
    params: &PlacementParams,
    layer_y: f32,
    existing: &[Vec3],
) -> Vec3 {
    for _ in 0..params.max_attempts {
        let pos = candidate(rng, params.extent, layer_y);
        if is_clear(pos, existing, params.min_distance) {
            return pos;
        }
    }
    candidate(rng, params.extent, layer_y)
}

/// Height of a layer so the whole stack is centred on y = 0. Lower order sits lower.
pub fn layer_height(order: i32, order_range: (i32, i32), spacing: f32) -> f32 {
    let (min, max) = order_range;
    let center = (f64::from(min) + f64::from(max)) * 0.5;
    ((f64::from(order) - center) * f64::from(spacing)) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn placed_positions_respect_min_distance() {
        let mut rng = StdRng::seed_from_u64(7);
        let params = PlacementParams::default();
        let mut placed = Vec::new();
        for _ in 0..12 {
            let pos = place(&mut rng, &params, 4.0, &placed);
            assert!(is_clear(pos, &placed, params.min_distance));
            assert_eq!(pos.y, 4.0);
            assert!(pos.x.abs() <= params.extent * 0.5);
            assert!(pos.z.abs() <= params.extent * 0.5);
            placed.push(pos);
        }
    }

    #[test]
    fn exhausted_attempts_still_return_a_position() {
        let mut rng = StdRng::seed_from_u64(1);
        let params = PlacementParams {
            extent: 1.0,
            min_distance: 50.0,
            max_attempts: 5,
        };
        let existing = [Vec3::ZERO];
        let pos = place(&mut rng, &params, -2.0, &existing);
        assert_eq!(pos.y, -2.0);
        assert!(!is_clear(pos, &existing, params.min_distance));
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let params = PlacementParams::default();
        let a = place(&mut StdRng::seed_from_u64(42), &params, 0.0, &[]);
        let b = place(&mut StdRng::seed_from_u64(42), &params, 0.0, &[]);
        assert_eq!(a, b);
    }

    #[test]
    fn layer_stack_is_centred_with_low_order_below() {
        assert_eq!(layer_height(0, (0, 2), 10.0), -10.0);
        assert_eq!(layer_height(1, (0, 2), 10.0), 0.0);
        assert_eq!(layer_height(2, (0, 2), 10.0), 10.0);
        assert_eq!(layer_height(5, (5, 5), 10.0), 0.0);
    }

    #[test]
    fn extreme_orders_do_not_overflow() {
        assert_eq!(layer_height(i32::MAX, (i32::MAX - 1, i32::MAX), 10.0), 5.0);
        assert!(layer_height(i32::MIN, (i32::MIN, i32::MAX), 1.0) < -2.0e9);
        assert_eq!(layer_height(0, (i32::MIN, i32::MAX), 10.0), 5.0);
    }
}
