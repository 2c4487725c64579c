//! Triangle primitive.
//!
//! The hit point comes from the supporting plane; the inside test compares the
//! sign of the ray direction against the three side planes spanned by the ray
//! origin and each edge. Edges and vertices count as outside.

use glam::DVec3;
use smallvec::smallvec;

use crate::error::GeometryError;
use crate::hittable::{Geometry, Intersectable, Intersection, Intersections};
use crate::material::{Color, Material, Surface};
use crate::plane::Plane;
use crate::ray::Ray;
use crate::util::{direction_between, is_zero, normalized};

/// Triangle defined by three ordered vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    vertices: [DVec3; 3],
    /// Supporting plane; its normal orientation follows the vertex order.
    plane: Plane,
    surface: Surface,
}

impl Triangle {
    /// Create a triangle from three vertices.
    ///
    /// Fails when two vertices coincide or all three lie on one line.
    pub fn new(p1: DVec3, p2: DVec3, p3: DVec3) -> Result<Self, GeometryError> {
        let plane = Plane::from_points(p1, p2, p3)?;
        Ok(Self {
            vertices: [p1, p2, p3],
            plane,
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

    /// The three vertices in construction order.
    pub fn vertices(&self) -> [DVec3; 3] {
        self.vertices
    }
}

impl Intersectable for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<Intersections<'_>> {
        let point = self.plane.find_point(ray)?;

        let p0 = ray.origin();
        let [p1, p2, p3] = self.vertices;

        // Ray starts at a vertex
        let v1 = direction_between(p0, p1)?;
        let v2 = direction_between(p0, p2)?;
        let v3 = direction_between(p0, p3)?;

        // Side plane normals; a zero cross product means the origin is on an edge line
        let n1 = normalized(v1.cross(v2))?;
        let n2 = normalized(v2.cross(v3))?;
        let n3 = normalized(v3.cross(v1))?;

        let v = ray.direction();
        let s1 = v.dot(n1);
        let s2 = v.dot(n2);
        let s3 = v.dot(n3);

        // On an edge or vertex
        if is_zero(s1) || is_zero(s2) || is_zero(s3) {
            return None;
        }

        let inside = (s1 > 0.0 && s2 > 0.0 && s3 > 0.0) || (s1 < 0.0 && s2 < 0.0 && s3 < 0.0);
        if inside {
            Some(smallvec![Intersection::new(self, point)])
        } else {
            None
        }
    }
}

impl Geometry for Triangle {
    fn normal(&self, point: DVec3) -> DVec3 {
        self.plane.normal(point)
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

    fn triangle() -> Triangle {
        Triangle::new(
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(0.0, 1.0, 1.0),
            DVec3::new(-1.0, 0.0, 1.0),
        )
        .unwrap()
    }

    #[test]
    fn collinear_vertices_are_rejected() {
        assert_eq!(
            Triangle::new(DVec3::ZERO, DVec3::X, DVec3::new(3.0, 0.0, 0.0)),
            Err(GeometryError::CollinearPoints)
        );
        assert_eq!(
            Triangle::new(DVec3::X, DVec3::X, DVec3::Y),
            Err(GeometryError::CoincidentPoints)
        );
    }

    #[test]
    fn normal_follows_winding() {
        let t = triangle();
        // (p2 - p1) x (p3 - p1) = (-1, 1, 0) x (-2, 0, 0) = (0, 0, 2)
        assert_vec_eq(t.normal(DVec3::new(0.0, 0.3, 1.0)), DVec3::Z);

        let reversed = Triangle::new(
            DVec3::new(-1.0, 0.0, 1.0),
            DVec3::new(0.0, 1.0, 1.0),
            DVec3::new(1.0, 0.0, 1.0),
        )
        .unwrap();
        assert_vec_eq(reversed.normal(DVec3::new(0.0, 0.3, 1.0)), -DVec3::Z);
    }

    #[test]
    fn ray_inside_triangle_hits() {
        let t = triangle();
        let hits = t.intersect(&ray([0.0, 0.3, 0.0], [0.0, 0.0, 1.0])).unwrap();
        assert_eq!(hits.len(), 1);
        assert_vec_eq(hits[0].point, DVec3::new(0.0, 0.3, 1.0));
    }

    #[test]
    fn ray_outside_triangle_misses() {
        // Against an edge
        assert!(triangle().intersect(&ray([0.0, -0.5, 0.0], [0.0, 0.0, 1.0])).is_none());
        // Against a vertex
        assert!(triangle().intersect(&ray([2.0, -0.5, 0.0], [0.0, 0.0, 1.0])).is_none());
    }

    #[test]
    fn ray_through_edge_or_vertex_misses() {
        // On an edge
        assert!(triangle().intersect(&ray([0.5, 0.5, 0.0], [0.0, 0.0, 1.0])).is_none());
        // At a vertex
        assert!(triangle().intersect(&ray([1.0, 0.0, 0.0], [0.0, 0.0, 1.0])).is_none());
        // On an edge's continuation
        assert!(triangle().intersect(&ray([2.0, -1.0, 0.0], [0.0, 0.0, 1.0])).is_none());
    }

    #[test]
    fn parallel_or_receding_ray_misses() {
        assert!(triangle().intersect(&ray([0.0, 0.3, 0.0], [1.0, 0.0, 0.0])).is_none());
        assert!(triangle().intersect(&ray([0.0, 0.3, 0.0], [0.0, 0.0, -1.0])).is_none());
    }
}
