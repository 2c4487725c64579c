//! Finite cylinder: a tube cut to a height, closed by two cap discs.

use glam::DVec3;
use smallvec::SmallVec;

use crate::error::GeometryError;
use crate::hittable::{Geometry, Intersectable, Intersection, Intersections};
use crate::material::{Color, Material, Surface};
use crate::ray::Ray;
use crate::tube::Tube;
use crate::util::{align_zero, is_zero};

/// Cylinder of a given height along the axis of its tube.
///
/// The bottom cap lies at the axis origin, the top cap `height` further along
/// the axis direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
}

impl Cylinder {
    /// Create a new cylinder.
    ///
    /// Fails for a radius or height that is not strictly positive.
    pub fn new(axis: Ray, radius: f64, height: f64) -> Result<Self, GeometryError> {
        let tube = Tube::new(axis, radius)?;
        if height.is_nan() || align_zero(height) <= 0.0 {
            return Err(GeometryError::NonPositive { what: "height", value: height });
        }
        Ok(Self { tube, height })
    }

    /// Replace the material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.tube = self.tube.with_material(material);
        self
    }

    /// Replace the emission color.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.tube = self.tube.with_emission(emission);
        self
    }

    /// The lateral tube.
    pub fn tube(&self) -> &Tube {
        &self.tube
    }

    /// Height of the cylinder along its axis.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Distance along `ray` to the cap disc centered at `center`, if the ray
    /// crosses it strictly inside the rim.
    fn cap_distance(&self, ray: &Ray, center: DVec3) -> Option<f64> {
        let va = self.tube.axis.direction();
        let nv = va.dot(ray.direction());
        if is_zero(nv) {
            return None;
        }

        let t = align_zero(va.dot(center - ray.origin()) / nv);
        if t <= 0.0 {
            return None;
        }

        let radius = self.tube.radius;
        let offset = (ray.point_at(t) - center).length_squared();
        if align_zero(offset - radius * radius) < 0.0 {
            Some(t)
        } else {
            None
        }
    }
}

impl Intersectable for Cylinder {
    fn intersect(&self, ray: &Ray) -> Option<Intersections<'_>> {
        let axis = &self.tube.axis;
        let mut distances: SmallVec<[f64; 4]> = SmallVec::new();

        // Lateral surface, strictly between the caps
        for t in self.tube.hit_distances(ray) {
            let p = self.tube.axial_projection(ray.point_at(t));
            if align_zero(p) > 0.0 && align_zero(p - self.height) < 0.0 {
                distances.push(t);
            }
        }

        // Caps
        let bottom = axis.origin();
        let top = axis.point_at(self.height);
        distances.extend(self.cap_distance(ray, bottom));
        distances.extend(self.cap_distance(ray, top));

        if distances.is_empty() {
            return None;
        }

        distances.sort_by(f64::total_cmp);
        Some(
            distances
                .into_iter()
                .map(|t| Intersection::new(self, ray.point_at(t)))
                .collect(),
        )
    }
}

impl Geometry for Cylinder {
    fn normal(&self, point: DVec3) -> DVec3 {
        let axis_dir = self.tube.axis.direction();
        let p = self.tube.axial_projection(point);

        // Bottom cap, including its rim
        if is_zero(p) || p < 0.0 {
            return -axis_dir;
        }

        // Top cap, including its rim
        if is_zero(p - self.height) || p > self.height {
            return axis_dir;
        }

        self.tube.normal(point)
    }

    fn surface(&self) -> &Surface {
        self.tube.surface()
    }
}
