//! The closed set of shapes a scene can contain.

use crate::cylinder::Cylinder;
use crate::hittable::{Geometry, Intersectable, Intersections};
use crate::plane::Plane;
use crate::ray::Ray;
use crate::sphere::Sphere;
use crate::triangle::Triangle;
use crate::tube::Tube;

/// Any shape supported by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Infinite plane
    Plane(Plane),
    /// Sphere
    Sphere(Sphere),
    /// Triangle
    Triangle(Triangle),
    /// Infinite cylinder
    Tube(Tube),
    /// Capped cylinder
    Cylinder(Cylinder),
}

impl Shape {
    /// View the shape through the common geometry interface.
    pub fn as_geometry(&self) -> &dyn Geometry {
        match self {
            Shape::Plane(plane) => plane,
            Shape::Sphere(sphere) => sphere,
            Shape::Triangle(triangle) => triangle,
            Shape::Tube(tube) => tube,
            Shape::Cylinder(cylinder) => cylinder,
        }
    }
}

impl Intersectable for Shape {
    fn intersect(&self, ray: &Ray) -> Option<Intersections<'_>> {
        match self {
            Shape::Plane(plane) => plane.intersect(ray),
            Shape::Sphere(sphere) => sphere.intersect(ray),
            Shape::Triangle(triangle) => triangle.intersect(ray),
            Shape::Tube(tube) => tube.intersect(ray),
            Shape::Cylinder(cylinder) => cylinder.intersect(ray),
        }
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

impl From<Tube> for Shape {
    fn from(tube: Tube) -> Self {
        Shape::Tube(tube)
    }
}

impl From<Cylinder> for Shape {
    fn from(cylinder: Cylinder) -> Self {
        Shape::Cylinder(cylinder)
    }
}
