use glam::Vec3;

/// Axis-aligned box used for scene colliders
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box of the given full size centred on `center`
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self::new(center - half, center + half)
    }

    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    /// Ellipsoid overlap test, done in the space where the ellipsoid is a unit sphere
    pub fn overlaps_ellipsoid(&self, center: Vec3, radii: Vec3) -> bool {
        if radii.min_element() <= 0.0 {
            return false;
        }
        let scaled = AABB::new(self.min / radii, self.max / radii);
        let local_center = center / radii;
        let closest = scaled.closest_point(local_center);
        closest.distance_squared(local_center) < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_new_orders_corners() {
        let aabb = AABB::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(aabb.min, Vec3::ZERO);
        assert_eq!(aabb.max, Vec3::ONE);
    }

    #[test]
    fn test_aabb_center() {
        let aabb = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.center(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_aabb_from_center_size() {
        let aabb = AABB::from_center_size(Vec3::new(1.0, 1.0, 1.0), Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(aabb.min, Vec3::ZERO);
        assert_eq!(aabb.max, Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_aabb_union_non_overlapping() {
        let aabb1 = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let aabb2 = AABB::new(Vec3::new(2.0, 2.0, 2.0), Vec3::new(3.0, 3.0, 3.0));
        let union = aabb1.union(&aabb2);
        assert_eq!(union.min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(union.max, Vec3::new(3.0, 3.0, 3.0));
    }

    #[test]
    fn test_aabb_contains() {
        let aabb = AABB::new(Vec3::ZERO, Vec3::ONE);
        assert!(aabb.contains(Vec3::splat(0.5)));
        assert!(aabb.contains(Vec3::ONE));
        assert!(!aabb.contains(Vec3::new(1.5, 0.5, 0.5)));
    }

    #[test]
    fn test_ellipsoid_overlap_touching_face() {
        let wall = AABB::new(Vec3::new(1.0, 0.0, -5.0), Vec3::new(1.2, 3.0, 5.0));
        let radii = Vec3::new(0.4, 0.8, 0.4);
        assert!(wall.overlaps_ellipsoid(Vec3::new(0.7, 1.0, 0.0), radii));
        assert!(!wall.overlaps_ellipsoid(Vec3::new(0.5, 1.0, 0.0), radii));
    }

    #[test]
    fn test_ellipsoid_overlap_uses_vertical_radius() {
        let slab = AABB::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.2, 1.0));
        let radii = Vec3::new(0.4, 0.5, 0.4);
        assert!(slab.overlaps_ellipsoid(Vec3::new(0.0, 0.6, 0.0), radii));
        assert!(!slab.overlaps_ellipsoid(Vec3::new(0.0, 0.8, 0.0), radii));
    }

    #[test]
    fn test_degenerate_ellipsoid_never_overlaps() {
        let aabb = AABB::new(Vec3::ZERO, Vec3::ONE);
        assert!(!aabb.overlaps_ellipsoid(Vec3::splat(0.5), Vec3::new(0.0, 1.0, 1.0)));
    }
}
