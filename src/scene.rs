//! Scene container: shapes, lights and the background.

use crate::hittable::Geometries;
use crate::light::{AmbientLight, SceneLight};
use crate::material::{Color, BLACK};

/// Everything a ray tracer reads while rendering. Immutable during a render.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Name of the scene, used in log output
    pub name: String,
    /// Color of rays that hit nothing
    pub background: Color,
    /// Uniform ambient illumination
    pub ambient_light: AmbientLight,
    /// All shapes, queried as one
    pub geometries: Geometries,
    /// Light sources, shaded in order
    pub lights: Vec<SceneLight>,
}

impl Scene {
    /// Create an empty scene with a black background and no ambient light.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: BLACK,
            ambient_light: AmbientLight::NONE,
            geometries: Geometries::new(),
            lights: Vec::new(),
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Set the ambient light.
    pub fn with_ambient_light(mut self, ambient_light: AmbientLight) -> Self {
        self.ambient_light = ambient_light;
        self
    }

    /// Replace the shape collection.
    pub fn with_geometries(mut self, geometries: Geometries) -> Self {
        self.geometries = geometries;
        self
    }

    /// Replace the light list.
    pub fn with_lights(mut self, lights: Vec<SceneLight>) -> Self {
        self.lights = lights;
        self
    }
}
