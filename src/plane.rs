//! Infinite plane primitive.

use glam::DVec3;
use smallvec::smallvec;

use crate::error::GeometryError;
use crate::hittable::{Geometry, Intersectable, Intersection, Intersections};
use crate::material::{Color, Material, Surface};
use crate::ray::Ray;
use crate::util::{align_zero, direction_between, is_zero, normalized};

/// Plane defined by a reference point and a unit normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// A point on the plane.
    q0: DVec3,
    /// Unit normal of the plane.
    normal: DVec3,
    /// Appearance of the plane.
    surface: Surface,
}

impl Plane {
    /// Create a plane through `q0` with the given normal (normalized here).
    pub fn new(q0: DVec3, normal: DVec3) -> Result<Self, GeometryError> {
        let normal = normalized(normal).ok_or(GeometryError::ZeroVector)?;
        Ok(Self {
            q0,
            normal,
            surface: Surface::default(),
        })
    }

    /// Create the plane through three points.
    ///
    /// The normal is (p2 - p1) x (p3 - p1), so its orientation follows the
    /// order of the points. `p1` becomes the reference point.
    pub fn from_points(p1: DVec3, p2: DVec3, p3: DVec3) -> Result<Self, GeometryError> {
        let v1 = direction_between(p1, p2).ok_or(GeometryError::CoincidentPoints)?;
        let v2 = direction_between(p1, p3).ok_or(GeometryError::CoincidentPoints)?;
        let normal = normalized(v1.cross(v2)).ok_or(GeometryError::CollinearPoints)?;
        Ok(Self {
            q0: p1,
            normal,
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

    /// Reference point of the plane.
    pub fn q0(&self) -> DVec3 {
        self.q0
    }

    /// Unit normal of the plane.
    pub fn plane_normal(&self) -> DVec3 {
        self.normal
    }

    /// Point where the ray crosses the plane strictly ahead of its origin.
    ///
    /// Rays parallel to the plane, including rays lying in it, never cross it.
    pub(crate) fn find_point(&self, ray: &Ray) -> Option<DVec3> {
        // Ray parallel to plane
        let nv = self.normal.dot(ray.direction());
        if is_zero(nv) {
            return None;
        }

        // Ray starts at the reference point
        let p0q0 = direction_between(ray.origin(), self.q0)?;

        let t = align_zero(self.normal.dot(p0q0) / nv);
        if t <= 0.0 {
            return None;
        }

        Some(ray.point_at(t))
    }
}

impl Intersectable for Plane {
    fn intersect(&self, ray: &Ray) -> Option<Intersections<'_>> {
        let point = self.find_point(ray)?;
        Some(smallvec![Intersection::new(self, point)])
    }
}

impl Geometry for Plane {
    fn normal(&self, _point: DVec3) -> DVec3 {
        self.normal
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
