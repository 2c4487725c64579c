//! Infinite cylinder (tube) around an axis ray.

use glam::DVec3;
use smallvec::SmallVec;

use crate::error::GeometryError;
use crate::hittable::{Geometry, Intersectable, Intersection, Intersections};
use crate::material::{Color, Material, Surface};
use crate::ray::Ray;
use crate::util::{align_zero, is_zero};

/// Tube defined by an axis ray and a radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Tube {
    /// Axis of the tube; its origin anchors axial measurements.
    pub(crate) axis: Ray,
    /// Radius of the tube (always positive).
    pub(crate) radius: f64,
    surface: Surface,
}

impl Tube {
    /// Create a new tube.
    ///
    /// Fails for a radius that is not strictly positive.
    pub fn new(axis: Ray, radius: f64) -> Result<Self, GeometryError> {
        if radius.is_nan() || align_zero(radius) <= 0.0 {
            return Err(GeometryError::NonPositive { what: "radius", value: radius });
        }
        Ok(Self {
            axis,
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

    /// Axis ray of the tube.
    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    /// Radius of the tube.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Signed length of the projection of `point` onto the axis.
    pub(crate) fn axial_projection(&self, point: DVec3) -> f64 {
        (point - self.axis.origin()).dot(self.axis.direction())
    }

    /// Distances along `ray` to the lateral surface, ascending, strictly positive.
    ///
    /// Solves |(P0 + t v - A) x a|^2 = r^2 using only the components
    /// perpendicular to the axis direction `a`.
    pub(crate) fn hit_distances(&self, ray: &Ray) -> SmallVec<[f64; 2]> {
        let mut distances = SmallVec::new();
        let va = self.axis.direction();
        let v = ray.direction();
        let dp = ray.origin() - self.axis.origin();

        let v_perp = v - va * v.dot(va);
        let dp_perp = dp - va * dp.dot(va);

        // Ray parallel to the axis never crosses the lateral surface
        let a = v_perp.length_squared();
        if is_zero(a) {
            return distances;
        }
        let b = 2.0 * v_perp.dot(dp_perp);
        let c = dp_perp.length_squared() - self.radius * self.radius;

        // Tangent or missing
        let discriminant = align_zero(b * b - 4.0 * a * c);
        if discriminant <= 0.0 {
            return distances;
        }

        let sqrtd = discriminant.sqrt();
        for t in [(-b - sqrtd) / (2.0 * a), (-b + sqrtd) / (2.0 * a)] {
            let t = align_zero(t);
            if t > 0.0 {
                distances.push(t);
            }
        }
        distances
    }
}

impl Intersectable for Tube {
    fn intersect(&self, ray: &Ray) -> Option<Intersections<'_>> {
        let hits: Intersections<'_> = self
            .hit_distances(ray)
            .into_iter()
            .map(|t| Intersection::new(self, ray.point_at(t)))
            .collect();
        if hits.is_empty() {
            None
        } else {
            Some(hits)
        }
    }
}

impl Geometry for Tube {
    fn normal(&self, point: DVec3) -> DVec3 {
        let to_point = point - self.axis.origin();
        let projection = to_point.dot(self.axis.direction());

        // Point sits level with the axis origin
        if is_zero(projection) {
            return to_point.normalize();
        }

        let on_axis = self.axis.point_at(projection);
        (point - on_axis).normalize()
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
