//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction, representing a semi-infinite
//! line in 3D space used for intersection testing.

use glam::DVec3;

use crate::error::GeometryError;
use crate::hittable::Intersection;
use crate::util::{is_zero, normalized};

/// Ray in 3D space defined by origin and unit direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: DVec3,
    direction: DVec3,
}

impl Ray {
    /// Create a new ray, normalizing the direction.
    ///
    /// Fails with [`GeometryError::ZeroVector`] for a zero direction.
    pub fn new(origin: DVec3, direction: DVec3) -> Result<Self, GeometryError> {
        let direction = normalized(direction).ok_or(GeometryError::ZeroVector)?;
        Ok(Self { origin, direction })
    }

    /// Create a ray from a direction that is already unit length.
    pub(crate) fn from_unit(origin: DVec3, direction: DVec3) -> Self {
        debug_assert!(is_zero(direction.length() - 1.0));
        Self { origin, direction }
    }

    /// Starting point of the ray.
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Unit direction of the ray.
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Compute a point at distance t along the ray.
    ///
    /// Returns the origin itself when t is zero.
    pub fn point_at(&self, t: f64) -> DVec3 {
        if is_zero(t) {
            self.origin
        } else {
            self.origin + self.direction * t
        }
    }

    /// Pick the intersection nearest to the ray origin.
    ///
    /// Ties keep the first candidate in list order.
    pub fn find_closest_intersection<'a, I>(&self, intersections: I) -> Option<Intersection<'a>>
    where
        I: IntoIterator<Item = Intersection<'a>>,
    {
        let mut closest: Option<(f64, Intersection<'a>)> = None;
        for candidate in intersections {
            let distance = candidate.point.distance_squared(self.origin);
            match &closest {
                Some((best, _)) if distance >= *best => {}
                _ => closest = Some((distance, candidate)),
            }
        }
        closest.map(|(_, intersection)| intersection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::Sphere;
    use crate::util::assert_vec_eq;

    #[test]
    fn direction_is_normalized() {
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 3.0, 4.0)).unwrap();
        assert_vec_eq(ray.direction(), DVec3::new(0.0, 0.6, 0.8));
    }

    #[test]
    fn zero_direction_is_rejected() {
        assert_eq!(Ray::new(DVec3::ONE, DVec3::ZERO), Err(GeometryError::ZeroVector));
    }

    #[test]
    fn point_at_distance() {
        let ray = Ray::new(DVec3::new(1.0, 0.0, 0.0), DVec3::X).unwrap();
        assert_vec_eq(ray.point_at(1.0), DVec3::new(2.0, 0.0, 0.0));
        assert_vec_eq(ray.point_at(-1.0), DVec3::ZERO);
        assert_eq!(ray.point_at(0.0), ray.origin());
    }

    #[test]
    fn closest_intersection_picks_nearest() {
        let sphere = Sphere::new(DVec3::new(100.0, 0.0, 0.0), 1.0).unwrap();
        let ray = Ray::new(DVec3::ZERO, DVec3::X).unwrap();
        let hits = |xs: &[f64]| {
            xs.iter()
                .map(|&x| Intersection::new(&sphere, DVec3::new(x, 0.0, 0.0)))
                .collect::<Vec<_>>()
        };

        // Empty list
        assert!(ray.find_closest_intersection(hits(&[])).is_none());
        // Closest in the middle
        assert_eq!(ray.find_closest_intersection(hits(&[3.0, 1.0, 2.0])).unwrap().point.x, 1.0);
        // Closest first
        assert_eq!(ray.find_closest_intersection(hits(&[1.0, 3.0, 2.0])).unwrap().point.x, 1.0);
        // Closest last
        assert_eq!(ray.find_closest_intersection(hits(&[3.0, 2.0, 1.0])).unwrap().point.x, 1.0);
    }

    #[test]
    fn closest_intersection_ties_keep_first() {
        let first = Sphere::new(DVec3::new(100.0, 0.0, 0.0), 1.0).unwrap();
        let second = Sphere::new(DVec3::new(200.0, 0.0, 0.0), 1.0).unwrap();
        let ray = Ray::new(DVec3::ZERO, DVec3::X).unwrap();
        let point = DVec3::new(0.0, 2.0, 0.0);
        let list = vec![
            Intersection::new(&first, point),
            Intersection::new(&second, DVec3::new(0.0, -2.0, 0.0)),
        ];
        let closest = ray.find_closest_intersection(list).unwrap();
        assert_eq!(closest, Intersection::new(&first, point));
    }
}
