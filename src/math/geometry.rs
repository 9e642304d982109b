use nalgebra::{Point3, Unit, Vector2, Vector3};

/// Same containment rule as a filled circle: the rim counts as inside.
#[inline]
pub fn point_in_circle(point: &Vector2<f64>, center: &Vector2<f64>, radius: f64) -> bool {
    (point - center).norm_squared() <= radius * radius
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Unit<Vector3<f64>>,
}

impl Ray {
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self {
            origin,
            direction: Unit::new_normalize(direction),
        }
    }

    pub fn at(&self, distance: f64) -> Point3<f64> {
        self.origin + self.direction.into_inner() * distance
    }

    /// Distance along the ray to the nearest hit on the sphere, if any.
    /// A ray starting inside the sphere reports the exit point.
    pub fn intersect_sphere(&self, center: &Point3<f64>, radius: f64) -> Option<f64> {
        let oc = self.origin - center;
        let b = oc.dot(&*self.direction);
        let c = oc.norm_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let near = -b - root;
        if near >= 0.0 {
            return Some(near);
        }
        let far = -b + root;
        (far >= 0.0).then_some(far)
    }

    /// Hit point on the plane through `anchor` with the given normal.
    /// `None` when the ray runs parallel to the plane or points away from it.
    pub fn intersect_plane(&self, anchor: &Point3<f64>, normal: &Vector3<f64>) -> Option<Point3<f64>> {
        const EPSILON: f64 = 1e-9;
        let denom = normal.dot(&*self.direction);
        if denom.abs() < EPSILON {
            return None;
        }
        let distance = (anchor - self.origin).dot(normal) / denom;
        (distance >= 0.0).then(|| self.at(distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn circle_rim_is_inside() {
        let c = Vector2::new(10.0, 10.0);
        assert!(point_in_circle(&Vector2::new(20.0, 10.0), &c, 10.0));
        assert!(point_in_circle(&c, &c, 10.0));
        assert!(!point_in_circle(&Vector2::new(20.1, 10.0), &c, 10.0));
    }

    #[test]
    fn ray_hits_sphere_front_face() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, -1.0));
        let hit = ray.intersect_sphere(&Point3::origin(), 1.0).unwrap();
        assert_relative_eq!(hit, 9.0, epsilon = 1e-12);
    }

    #[test]
    fn ray_misses_sphere() {
        let ray = Ray::new(Point3::new(0.0, 5.0, 10.0), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(ray.intersect_sphere(&Point3::origin(), 1.0), None);
    }

    #[test]
    fn sphere_behind_ray_is_ignored() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(ray.intersect_sphere(&Point3::origin(), 1.0), None);
    }

    #[test]
    fn ray_meets_z_plane() {
        let ray = Ray::new(Point3::new(1.0, 2.0, 10.0), Vector3::new(1.0, 0.0, -1.0));
        let hit = ray
            .intersect_plane(&Point3::new(0.0, 0.0, 4.0), &Vector3::z())
            .unwrap();
        assert_relative_eq!(hit, Point3::new(7.0, 2.0, 4.0), epsilon = 1e-9);
    }

    #[test]
    fn parallel_ray_misses_plane() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 1.0), Vector3::new(1.0, 1.0, 0.0));
        assert_eq!(ray.intersect_plane(&Point3::origin(), &Vector3::z()), None);
    }
}
