//! 2D point arithmetic and the per-axis motion integrator.

/// Screen-pixel point. Fractional while simulating; rounded only at render.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn delta_to(self, other: Vec2) -> Vec2 {
        Vec2::new(other.x - self.x, other.y - self.y)
    }

    pub fn distance_to(self, other: Vec2) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Advance `position` toward `target` by at most `step * speed` per axis.
/// An axis only moves while its absolute delta exceeds `axis_threshold`, so
/// repeated steps converge without oscillating around the target.
pub fn step_toward(
    position: Vec2,
    target: Vec2,
    step: f64,
    speed: f64,
    axis_threshold: f64,
) -> Vec2 {
    let delta = position.delta_to(target);
    let mut next = position;
    if delta.x.abs() > axis_threshold {
        next.x += delta.x.signum() * step * speed;
    }
    if delta.y.abs() > axis_threshold {
        next.y += delta.y.signum() * step * speed;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_step_moves_one_step_size() {
        let next = step_toward(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), 2.0, 1.0, 2.0);
        assert_eq!(next, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn axes_integrate_independently() {
        let next = step_toward(Vec2::new(0.0, 0.0), Vec2::new(-50.0, 1.0), 2.0, 1.0, 2.0);
        // y delta is within the threshold band and must not move
        assert_eq!(next, Vec2::new(-2.0, 0.0));
    }

    #[test]
    fn speed_multiplier_scales_the_step() {
        let next = step_toward(Vec2::new(0.0, 0.0), Vec2::new(100.0, -100.0), 2.0, 3.0, 0.0);
        assert_eq!(next, Vec2::new(6.0, -6.0));
    }

    #[test]
    fn converges_monotonically_without_overshoot() {
        let target = Vec2::new(100.0, 0.0);
        let mut pos = Vec2::new(0.0, 0.0);
        let mut last_dist = pos.distance_to(target);
        for _ in 0..200 {
            pos = step_toward(pos, target, 2.0, 1.0, 2.0);
            let dist = pos.distance_to(target);
            assert!(dist <= last_dist, "overshot: {dist} > {last_dist}");
            last_dist = dist;
        }
        // settles inside the threshold band and stays there
        assert!(last_dist <= 2.0);
        assert_eq!(pos, step_toward(pos, target, 2.0, 1.0, 2.0));
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
    }
}
