//! Scene description files.
//!
//! A scene file is TOML with a `[scene]` table (background, ambient light,
//! shapes, lights) and a `[camera]` table. Vectors and colors are written as
//! `[x, y, z]` arrays.

use std::fs;
use std::path::Path;

use glam::DVec3;
use log::{debug, info};
use serde::Deserialize;

use crate::camera::CameraConfig;
use crate::cylinder::Cylinder;
use crate::error::{ConfigError, GeometryError};
use crate::hittable::Geometries;
use crate::light::{AmbientLight, DirectionalLight, PointLight, SceneLight, SpotLight};
use crate::material::{Coefficient, Color, Material};
use crate::plane::Plane;
use crate::ray::Ray;
use crate::scene::Scene;
use crate::shape::Shape;
use crate::sphere::Sphere;
use crate::triangle::Triangle;
use crate::tube::Tube;

/// Contents of a scene file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    /// Shapes, lights and background
    pub scene: SceneConfig,
    /// Camera placement and view plane
    pub camera: CameraConfig,
}

impl SceneFile {
    /// Read and parse a scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("Loading scene file {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parse a scene description from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

/// Description of a [`Scene`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    /// Scene name, used in log output
    #[serde(default = "default_name")]
    pub name: String,
    /// Color of rays that hit nothing
    #[serde(default)]
    pub background: DVec3,
    /// Ambient light intensity; none when absent
    #[serde(default)]
    pub ambient: Option<DVec3>,
    /// Shapes in insertion order
    #[serde(default)]
    pub shapes: Vec<ShapeConfig>,
    /// Light sources
    #[serde(default)]
    pub lights: Vec<LightConfig>,
}

fn default_name() -> String {
    "scene".to_string()
}

impl SceneConfig {
    /// Build every shape and light, failing on the first degenerate one.
    pub fn build(&self) -> Result<Scene, ConfigError> {
        let shapes = self
            .shapes
            .iter()
            .map(ShapeConfig::build)
            .collect::<Result<Vec<_>, _>>()?;
        let lights = self
            .lights
            .iter()
            .map(LightConfig::build)
            .collect::<Result<Vec<_>, _>>()?;

        let geometries: Geometries = shapes.into_iter().collect();
        debug!(
            "Scene '{}': {} shapes, {} lights",
            self.name,
            geometries.len(),
            lights.len()
        );

        Ok(Scene::new(self.name.clone())
            .with_background(self.background)
            .with_ambient_light(self.ambient.map_or(AmbientLight::NONE, AmbientLight::new))
            .with_geometries(geometries)
            .with_lights(lights))
    }
}

/// A reflection coefficient written as a scalar or as an RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CoefficientConfig {
    /// Same value on every channel
    Uniform(f64),
    /// Per-channel values
    Rgb(DVec3),
}

impl From<CoefficientConfig> for Coefficient {
    fn from(config: CoefficientConfig) -> Self {
        match config {
            CoefficientConfig::Uniform(value) => value.into(),
            CoefficientConfig::Rgb(value) => value.into(),
        }
    }
}

/// Description of a [`Material`]; absent fields keep the default material's values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialConfig {
    /// Ambient coefficient
    pub ka: Option<CoefficientConfig>,
    /// Diffuse coefficient
    pub kd: Option<CoefficientConfig>,
    /// Specular coefficient
    pub ks: Option<CoefficientConfig>,
    /// Specular exponent
    #[serde(default)]
    pub shininess: u32,
}

impl MaterialConfig {
    /// Resolve into a material.
    pub fn build(&self) -> Material {
        let mut material = Material::default().with_shininess(self.shininess);
        if let Some(ka) = self.ka {
            material = material.with_ka(ka);
        }
        if let Some(kd) = self.kd {
            material = material.with_kd(kd);
        }
        if let Some(ks) = self.ks {
            material = material.with_ks(ks);
        }
        material
    }
}

/// Description of one shape, selected by its `type` key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum ShapeConfig {
    /// Infinite plane through `point`
    Plane {
        point: DVec3,
        normal: DVec3,
        #[serde(default)]
        material: MaterialConfig,
        #[serde(default)]
        emission: Color,
    },
    /// Sphere
    Sphere {
        center: DVec3,
        radius: f64,
        #[serde(default)]
        material: MaterialConfig,
        #[serde(default)]
        emission: Color,
    },
    /// Triangle; vertex order sets the normal
    Triangle {
        vertices: [DVec3; 3],
        #[serde(default)]
        material: MaterialConfig,
        #[serde(default)]
        emission: Color,
    },
    /// Infinite cylinder around the axis `origin` + t * `direction`
    Tube {
        origin: DVec3,
        direction: DVec3,
        radius: f64,
        #[serde(default)]
        material: MaterialConfig,
        #[serde(default)]
        emission: Color,
    },
    /// Capped cylinder of `height` along its axis
    Cylinder {
        origin: DVec3,
        direction: DVec3,
        radius: f64,
        height: f64,
        #[serde(default)]
        material: MaterialConfig,
        #[serde(default)]
        emission: Color,
    },
}

impl ShapeConfig {
    /// Construct the shape, validating its geometry.
    pub fn build(&self) -> Result<Shape, GeometryError> {
        let shape = match self {
            ShapeConfig::Plane { point, normal, material, emission } => Plane::new(*point, *normal)?
                .with_material(material.build())
                .with_emission(*emission)
                .into(),
            ShapeConfig::Sphere { center, radius, material, emission } => Sphere::new(*center, *radius)?
                .with_material(material.build())
                .with_emission(*emission)
                .into(),
            ShapeConfig::Triangle { vertices: [p1, p2, p3], material, emission } => Triangle::new(*p1, *p2, *p3)?
                .with_material(material.build())
                .with_emission(*emission)
                .into(),
            ShapeConfig::Tube { origin, direction, radius, material, emission } => {
                Tube::new(Ray::new(*origin, *direction)?, *radius)?
                    .with_material(material.build())
                    .with_emission(*emission)
                    .into()
            }
            ShapeConfig::Cylinder { origin, direction, radius, height, material, emission } => {
                Cylinder::new(Ray::new(*origin, *direction)?, *radius, *height)?
                    .with_material(material.build())
                    .with_emission(*emission)
                    .into()
            }
        };
        Ok(shape)
    }
}

fn one() -> f64 {
    1.0
}

/// Description of one light source, selected by its `type` key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum LightConfig {
    /// Light travelling along `direction`
    Directional {
        intensity: Color,
        direction: DVec3,
    },
    /// Point light with attenuation
    Point {
        intensity: Color,
        position: DVec3,
        #[serde(default = "one")]
        kc: f64,
        #[serde(default)]
        kl: f64,
        #[serde(default)]
        kq: f64,
    },
    /// Point light concentrated along `direction`
    Spot {
        intensity: Color,
        position: DVec3,
        direction: DVec3,
        #[serde(default = "one")]
        kc: f64,
        #[serde(default)]
        kl: f64,
        #[serde(default)]
        kq: f64,
        #[serde(default = "one")]
        narrow_beam: f64,
    },
}

impl LightConfig {
    /// Construct the light, validating its direction.
    pub fn build(&self) -> Result<SceneLight, GeometryError> {
        let light = match *self {
            LightConfig::Directional { intensity, direction } => DirectionalLight::new(intensity, direction)?.into(),
            LightConfig::Point { intensity, position, kc, kl, kq } => PointLight::new(intensity, position)
                .with_kc(kc)
                .with_kl(kl)
                .with_kq(kq)
                .into(),
            LightConfig::Spot { intensity, position, direction, kc, kl, kq, narrow_beam } => {
                SpotLight::new(intensity, position, direction)?
                    .with_kc(kc)
                    .with_kl(kl)
                    .with_kq(kq)
                    .with_narrow_beam(narrow_beam)
                    .into()
            }
        };
        Ok(light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;

    const SCENE: &str = r#"
[scene]
name = "config test"
background = [0.1, 0.1, 0.1]
ambient = [0.2, 0.2, 0.2]

[[scene.shapes]]
type = "sphere"
center = [0.0, 0.0, -50.0]
radius = 50.0
emission = [0.2, 0.0, 0.0]
material = { kd = 0.5, ks = [0.5, 0.4, 0.3], shininess = 100 }

[[scene.shapes]]
type = "triangle"
vertices = [[-70.0, -40.0, 0.0], [-40.0, -70.0, 0.0], [-68.0, -68.0, -4.0]]

[[scene.shapes]]
type = "cylinder"
origin = [0.0, 0.0, 0.0]
direction = [0.0, 1.0, 0.0]
radius = 5.0
height = 10.0

[[scene.lights]]
type = "spot"
intensity = [1.0, 0.5, 0.5]
position = [-50.0, -50.0, 50.0]
direction = [1.0, 1.0, -2.0]
kl = 0.001
kq = 0.0001

[[scene.lights]]
type = "directional"
intensity = [0.3, 0.3, 0.3]
direction = [0.0, 0.0, -1.0]

[camera]
location = [0.0, 0.0, 1000.0]
forward = [0.0, 0.0, -1.0]
up = [0.0, 1.0, 0.0]
width = 150.0
height = 150.0
distance = 1000.0
resolution = [50, 40]
"#;

    #[test]
    fn parses_full_scene_file() {
        let file = SceneFile::from_toml_str(SCENE).unwrap();
        let scene = file.scene.build().unwrap();

        assert_eq!(scene.name, "config test");
        assert_eq!(scene.background, DVec3::splat(0.1));
        assert_eq!(scene.ambient_light, AmbientLight::new(DVec3::splat(0.2)));
        assert_eq!(scene.geometries.len(), 3);
        assert_eq!(scene.lights.len(), 2);

        let sphere = scene.geometries.shapes()[0].as_geometry();
        let surface = sphere.surface();
        assert_eq!(surface.emission, DVec3::new(0.2, 0.0, 0.0));
        assert_eq!(surface.material.ka, DVec3::ONE);
        assert_eq!(surface.material.kd, DVec3::splat(0.5));
        assert_eq!(surface.material.ks, DVec3::new(0.5, 0.4, 0.3));
        assert_eq!(surface.material.shininess, 100);

        let camera = Camera::new(&file.camera).unwrap();
        assert_eq!(camera.resolution(), (50, 40));
    }

    #[test]
    fn point_light_defaults() {
        let light: LightConfig = toml::from_str(
            r#"
type = "point"
intensity = [1.0, 1.0, 1.0]
position = [0.0, 0.0, 0.0]
"#,
        )
        .unwrap();
        assert_eq!(
            light,
            LightConfig::Point {
                intensity: DVec3::ONE,
                position: DVec3::ZERO,
                kc: 1.0,
                kl: 0.0,
                kq: 0.0,
            }
        );
    }

    #[test]
    fn unknown_shape_type_is_a_parse_error() {
        let text = r#"
[scene]
[[scene.shapes]]
type = "torus"
center = [0.0, 0.0, 0.0]

[camera]
"#;
        assert!(matches!(SceneFile::from_toml_str(text), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn degenerate_shape_fails_to_build() {
        let text = r#"
[scene]
[[scene.shapes]]
type = "sphere"
center = [0.0, 0.0, 0.0]
radius = 0.0

[camera]
"#;
        let file = SceneFile::from_toml_str(text).unwrap();
        assert!(matches!(
            file.scene.build(),
            Err(ConfigError::Geometry(GeometryError::NonPositive { what: "radius", .. }))
        ));
    }

    #[test]
    fn missing_camera_field_is_reported() {
        let text = r#"
[scene]

[camera]
location = [0.0, 0.0, 0.0]
forward = [0.0, 0.0, -1.0]
up = [0.0, 1.0, 0.0]
width = 1.0
height = 1.0
"#;
        let file = SceneFile::from_toml_str(text).unwrap();
        let err = Camera::new(&file.camera).unwrap_err();
        assert_eq!(err.to_string(), "missing rendering data: Camera view plane distance");
    }
}
