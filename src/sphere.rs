//! Sphere primitive for ray tracing.
//!
//! Intersection projects the center onto the ray and measures the half chord,
//! which keeps both roots exact for rays through the center.

use glam::DVec3;
use smallvec::smallvec;

use crate::error::GeometryError;
use crate::hittable::{Geometry, Intersectable, Intersection, Intersections};
use crate::material::{Color, Material, Surface};
use crate::ray::Ray;
use crate::util::{align_zero, direction_between, same_point};

/// Sphere primitive defined by center, radius, and surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    center: DVec3,
    /// Radius of the sphere (always positive).
    radius: f64,
    /// Appearance of the sphere.
    surface: Surface,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Fails for a radius that is not strictly positive.
    pub fn new(center: DVec3, radius: f64) -> Result<Self, GeometryError> {
        if radius.is_nan() || align_zero(radius) <= 0.0 {
            return Err(GeometryError::NonPositive { what: "radius", value: radius });
        }
        Ok(Self {
            center,
            radius,
            surface: Surface::default(),
        })
    }

    /// Replace the material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.surface.material = material;
        self
    }

    /// Replace the emission color.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.surface.emission = emission;
        self
    }

    /// Center of the sphere.
    pub fn center(&self) -> DVec3 {
        self.center
    }

    /// Radius of the sphere.
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Intersectable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Intersections<'_>> {
        let v = ray.direction();

        // Ray starts at the center: exactly one hit, one radius away
        if same_point(ray.origin(), self.center) {
            return Some(smallvec![Intersection::new(self, ray.point_at(self.radius))]);
        }

        let u = direction_between(ray.origin(), self.center)?;
        let tm = align_zero(v.dot(u));
        let d = align_zero((u.length_squared() - tm * tm).max(0.0).sqrt());

        // The ray's line passes outside the sphere or touches it
        if d >= self.radius {
            return None;
        }

        let th = align_zero((self.radius * self.radius - d * d).sqrt());
        let t1 = align_zero(tm - th);
        let t2 = align_zero(tm + th);

        match (t1 > 0.0, t2 > 0.0) {
            (true, true) => Some(smallvec![
                Intersection::new(self, ray.point_at(t1)),
                Intersection::new(self, ray.point_at(t2)),
            ]),
            (true, false) => Some(smallvec![Intersection::new(self, ray.point_at(t1))]),
            (false, true) => Some(smallvec![Intersection::new(self, ray.point_at(t2))]),
            (false, false) => None,
        }
    }
}

impl Geometry for Sphere {
    fn normal(&self, point: DVec3) -> DVec3 {
        (point - self.center).normalize()
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::assert_vec_eq;

    fn ray(origin: [f64; 3], direction: [f64; 3]) -> Ray {
        Ray::new(DVec3::from_array(origin), DVec3::from_array(direction)).unwrap()
    }

    fn points(sphere: &Sphere, r: &Ray) -> Vec<DVec3> {
        sphere
            .intersect(r)
            .map(|hits| hits.iter().map(|hit| hit.point).collect())
            .unwrap_or_default()
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        assert!(Sphere::new(DVec3::ZERO, 0.0).is_err());
        assert!(Sphere::new(DVec3::ZERO, -1.0).is_err());
        assert!(Sphere::new(DVec3::ZERO, f64::NAN).is_err());
    }

    #[test]
    fn normal_at_surface_points() {
        let sphere = Sphere::new(DVec3::ZERO, 1.0).unwrap();
        assert_vec_eq(sphere.normal(DVec3::X), DVec3::X);
        assert_vec_eq(sphere.normal(DVec3::Z), DVec3::Z);

        let sphere = Sphere::new(DVec3::new(1.0, 2.0, 3.0), 2.0).unwrap();
        assert_vec_eq(sphere.normal(DVec3::new(1.0, 2.0, 5.0)), DVec3::Z);
    }

    #[test]
    fn ray_through_center_hits_twice_in_order() {
        let sphere = Sphere::new(DVec3::new(1.0, 0.0, 0.0), 1.0).unwrap();
        let hits = points(&sphere, &ray([1.0, -2.0, 0.0], [0.0, 1.0, 0.0]));
        assert_eq!(hits.len(), 2);
        assert_vec_eq(hits[0], DVec3::new(1.0, -1.0, 0.0));
        assert_vec_eq(hits[1], DVec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn ray_crossing_off_center_hits_twice() {
        let sphere = Sphere::new(DVec3::new(1.0, 0.0, 0.0), 1.0).unwrap();
        let hits = points(&sphere, &ray([-1.0, 0.0, 0.0], [3.0, 1.0, 0.0]));
        assert_eq!(hits.len(), 2);
        assert!(hits[0].x < hits[1].x);
        for p in hits {
            assert!(((p - sphere.center()).length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn tangent_ray_misses() {
        let sphere = Sphere::new(DVec3::new(1.0, 0.0, 0.0), 1.0).unwrap();
        assert!(sphere.intersect(&ray([-1.0, 1.0, 0.0], [1.0, 0.0, 0.0])).is_none());
    }

    #[test]
    fn ray_outside_misses() {
        let sphere = Sphere::new(DVec3::new(1.0, 0.0, 0.0), 1.0).unwrap();
        assert!(sphere.intersect(&ray([-1.0, 0.0, 0.0], [1.0, 1.0, 0.0])).is_none());
    }

    #[test]
    fn ray_inside_hits_once() {
        let sphere = Sphere::new(DVec3::new(1.0, 0.0, 0.0), 1.0).unwrap();
        let hits = points(&sphere, &ray([1.5, 0.0, 0.0], [1.0, 0.0, 0.0]));
        assert_eq!(hits.len(), 1);
        assert_vec_eq(hits[0], DVec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn ray_from_center_hits_at_radius() {
        let sphere = Sphere::new(DVec3::new(1.0, 0.0, 0.0), 2.0).unwrap();
        let hits = points(&sphere, &ray([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]));
        assert_eq!(hits, vec![DVec3::new(1.0, 0.0, 2.0)]);
    }

    #[test]
    fn sphere_behind_ray_misses() {
        let sphere = Sphere::new(DVec3::new(1.0, 0.0, 0.0), 1.0).unwrap();
        assert!(sphere.intersect(&ray([3.0, 0.0, 0.0], [1.0, 0.0, 0.0])).is_none());
    }

    #[test]
    fn ray_starting_on_surface() {
        let sphere = Sphere::new(DVec3::new(1.0, 0.0, 0.0), 1.0).unwrap();
        // Going inward: only the far side
        let hits = points(&sphere, &ray([2.0, 0.0, 0.0], [-1.0, 0.0, 0.0]));
        assert_eq!(hits.len(), 1);
        assert_vec_eq(hits[0], DVec3::ZERO);
        // Going outward: nothing
        assert!(sphere.intersect(&ray([2.0, 0.0, 0.0], [1.0, 0.0, 0.0])).is_none());
    }
}
