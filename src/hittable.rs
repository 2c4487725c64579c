//! Ray-object intersection system.
//!
//! Defines the [`Intersectable`] and [`Geometry`] traits implemented by every shape,
//! the [`Intersection`] record, and the [`Geometries`] composite used to query a
//! whole scene as one object.

use std::fmt;

use glam::DVec3;
use log::trace;
use smallvec::SmallVec;

use crate::material::{Color, Material, Surface};
use crate::ray::Ray;
use crate::shape::Shape;

/// Candidate hits of one ray. Single shapes yield at most two.
pub type Intersections<'a> = SmallVec<[Intersection<'a>; 2]>;

/// A point where a ray meets a shape.
///
/// The material is a snapshot taken when the record is created; shading state
/// is kept outside the record.
#[derive(Clone, Copy)]
pub struct Intersection<'a> {
    /// The shape that was hit
    pub geometry: &'a dyn Geometry,
    /// Point where the ray meets the shape
    pub point: DVec3,
    /// Material of the shape at construction time
    pub material: Material,
}

impl<'a> Intersection<'a> {
    /// Record a hit of `geometry` at `point`.
    pub fn new(geometry: &'a dyn Geometry, point: DVec3) -> Self {
        Self {
            geometry,
            point,
            material: geometry.surface().material,
        }
    }

    /// Emission color of the hit shape.
    pub fn emission(&self) -> Color {
        self.geometry.surface().emission
    }
}

impl PartialEq for Intersection<'_> {
    /// Same shape instance and same point.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(self.geometry as *const dyn Geometry, other.geometry as *const dyn Geometry)
            && self.point == other.point
    }
}

impl fmt::Debug for Intersection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intersection")
            .field("geometry", &self.geometry)
            .field("point", &self.point)
            .finish()
    }
}

/// Anything a ray can be tested against.
///
/// Must be thread-safe (Sync + Send) for parallel rendering.
pub trait Intersectable: Sync + Send {
    /// Find all hits strictly ahead of the ray origin.
    ///
    /// Returns `None` when there are none; a returned list is never empty.
    fn intersect(&self, ray: &Ray) -> Option<Intersections<'_>>;
}

/// A single shape with a surface normal and an appearance.
pub trait Geometry: Intersectable + fmt::Debug {
    /// Unit normal at a point on the surface.
    fn normal(&self, point: DVec3) -> DVec3;

    /// Emission and material of the shape.
    fn surface(&self) -> &Surface;
}

/// Collection of shapes forming a scene.
///
/// Uses linear search; insertion order is preserved and determines the order of
/// the concatenated results.
#[derive(Debug, Default, Clone)]
pub struct Geometries {
    shapes: Vec<Shape>,
}

impl Geometries {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Add a shape unless an equal one is already present.
    pub fn add(&mut self, shape: impl Into<Shape>) {
        let shape = shape.into();
        if self.shapes.contains(&shape) {
            trace!("skipping duplicate shape {:?}", shape);
            return;
        }
        self.shapes.push(shape);
    }

    /// Number of shapes in the collection.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the collection holds no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// The shapes in insertion order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }
}

impl<S: Into<Shape>> FromIterator<S> for Geometries {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut geometries = Geometries::new();
        for shape in iter {
            geometries.add(shape);
        }
        geometries
    }
}

impl<S: Into<Shape>> Extend<S> for Geometries {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for shape in iter {
            self.add(shape);
        }
    }
}

impl Intersectable for Geometries {
    fn intersect(&self, ray: &Ray) -> Option<Intersections<'_>> {
        let mut result: Option<Intersections<'_>> = None;

        // Test intersection with each shape in the list
        for shape in &self.shapes {
            if let Some(hits) = shape.intersect(ray) {
                result.get_or_insert_with(SmallVec::new).extend(hits);
            }
        }

        result
    }
}
