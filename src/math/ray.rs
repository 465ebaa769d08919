use glam::Vec3;

use super::AABB;

/// Half-line used for ground probes and marker picking
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Straight down from `origin`
    pub fn down(origin: Vec3) -> Self {
        Self::new(origin, Vec3::NEG_Y)
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    /// Distance to the first hit on `aabb`, or the exit distance when the ray starts inside.
    pub fn hit_distance(&self, aabb: &AABB) -> Option<f32> {
        const EPSILON: f32 = 1e-8;

        // Near-zero components are clamped so the slab test never divides by zero
        let inv = |d: f32| {
            if d.abs() < EPSILON {
                1.0 / EPSILON.copysign(d)
            } else {
                1.0 / d
            }
        };
        let inv_dir = Vec3::new(inv(self.direction.x), inv(self.direction.y), inv(self.direction.z));

        let t_min = (aabb.min - self.origin) * inv_dir;
        let t_max = (aabb.max - self.origin) * inv_dir;

        let t_near = t_min.min(t_max).max_element();
        let t_far = t_min.max(t_max).min_element();

        if t_near > t_far || t_far < 0.0 {
            return None;
        }

        if t_near < 0.0 {
            (t_far > 0.001).then_some(t_far)
        } else {
            Some(t_near)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_from_outside() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let aabb = AABB::new(Vec3::new(5.0, -1.0, -1.0), Vec3::new(10.0, 1.0, 1.0));
        let t = ray.hit_distance(&aabb).expect("ray should hit");
        assert!((t - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_miss() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let aabb = AABB::new(Vec3::new(5.0, 2.0, 2.0), Vec3::new(10.0, 3.0, 3.0));
        assert!(ray.hit_distance(&aabb).is_none());
    }

    #[test]
    fn test_inside_returns_exit() {
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::X);
        let aabb = AABB::new(Vec3::new(0.0, -1.0, -1.0), Vec3::new(10.0, 1.0, 1.0));
        let t = ray.hit_distance(&aabb).expect("exit distance");
        assert!((t - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_down_probe_hits_top_face() {
        let ray = Ray::down(Vec3::new(0.0, 2.0, 0.0));
        let step = AABB::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.3, 1.0));
        let t = ray.hit_distance(&step).expect("probe should land on the step");
        assert!((ray.at(t).y - 0.3).abs() < 1e-5);
    }
}
