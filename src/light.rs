//! Light sources for local illumination.
//!
//! Every light reports its intensity at a point. Lights that illuminate from a
//! direction ([`DirectionalLight`], [`PointLight`], [`SpotLight`]) also report the
//! light-to-point direction through [`LightSource`].

use glam::DVec3;

use crate::error::GeometryError;
use crate::material::{Color, BLACK};
use crate::util::normalized;

/// Anything that delivers light to a point.
pub trait Light {
    /// Intensity arriving at `point`, attenuation included.
    fn intensity_at(&self, point: DVec3) -> Color;
}

/// A light arriving from a direction.
pub trait LightSource: Light {
    /// Unit direction used for shading at `point`.
    ///
    /// Positional lights report the light-to-point direction; a
    /// [`DirectionalLight`] reports the point-to-light direction.
    ///
    /// Returns `None` when the direction is undefined, e.g. for a point that
    /// coincides with a positional light.
    fn direction_at(&self, point: DVec3) -> Option<DVec3>;
}

/// Uniform light reaching every point from every direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    /// Constant intensity
    pub intensity: Color,
}

impl AmbientLight {
    /// No ambient light.
    pub const NONE: AmbientLight = AmbientLight { intensity: BLACK };

    /// Create an ambient light of the given intensity.
    pub fn new(intensity: Color) -> Self {
        Self { intensity }
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::NONE
    }
}

impl Light for AmbientLight {
    fn intensity_at(&self, _point: DVec3) -> Color {
        self.intensity
    }
}

/// Light from infinitely far away, e.g. sunlight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    intensity: Color,
    /// Direction the light travels in (unit length)
    direction: DVec3,
}

impl DirectionalLight {
    /// Create a directional light travelling along `direction`.
    pub fn new(intensity: Color, direction: DVec3) -> Result<Self, GeometryError> {
        let direction = normalized(direction).ok_or(GeometryError::ZeroVector)?;
        Ok(Self { intensity, direction })
    }
}

impl Light for DirectionalLight {
    fn intensity_at(&self, _point: DVec3) -> Color {
        self.intensity
    }
}

impl LightSource for DirectionalLight {
    /// The reversed travel direction: from the lit point back towards the light.
    fn direction_at(&self, _point: DVec3) -> Option<DVec3> {
        Some(-self.direction)
    }
}

/// Omnidirectional light at a position, attenuated with distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    intensity: Color,
    position: DVec3,
    kc: f64,
    kl: f64,
    kq: f64,
}

impl PointLight {
    /// Create a point light with no attenuation (kc = 1, kl = kq = 0).
    pub fn new(intensity: Color, position: DVec3) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }

    /// Set the constant attenuation coefficient.
    pub fn with_kc(mut self, kc: f64) -> Self {
        self.kc = kc;
        self
    }

    /// Set the linear attenuation coefficient.
    pub fn with_kl(mut self, kl: f64) -> Self {
        self.kl = kl;
        self
    }

    /// Set the quadratic attenuation coefficient.
    pub fn with_kq(mut self, kq: f64) -> Self {
        self.kq = kq;
        self
    }

    /// Position of the light.
    pub fn position(&self) -> DVec3 {
        self.position
    }
}

impl Light for PointLight {
    fn intensity_at(&self, point: DVec3) -> Color {
        let d = self.position.distance(point);
        self.intensity / (self.kc + self.kl * d + self.kq * d * d)
    }
}

impl LightSource for PointLight {
    fn direction_at(&self, point: DVec3) -> Option<DVec3> {
        normalized(point - self.position)
    }
}

/// Point light emitting mainly along a beam direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    point: PointLight,
    direction: DVec3,
    narrow_beam: f64,
}

impl SpotLight {
    /// Create a spot light at `position` aiming along `direction`.
    pub fn new(intensity: Color, position: DVec3, direction: DVec3) -> Result<Self, GeometryError> {
        let direction = normalized(direction).ok_or(GeometryError::ZeroVector)?;
        Ok(Self {
            point: PointLight::new(intensity, position),
            direction,
            narrow_beam: 1.0,
        })
    }

    /// Set the constant attenuation coefficient.
    pub fn with_kc(mut self, kc: f64) -> Self {
        self.point = self.point.with_kc(kc);
        self
    }

    /// Set the linear attenuation coefficient.
    pub fn with_kl(mut self, kl: f64) -> Self {
        self.point = self.point.with_kl(kl);
        self
    }

    /// Set the quadratic attenuation coefficient.
    pub fn with_kq(mut self, kq: f64) -> Self {
        self.point = self.point.with_kq(kq);
        self
    }

    /// Set the beam narrowing exponent; larger values give a tighter beam.
    pub fn with_narrow_beam(mut self, narrow_beam: f64) -> Self {
        self.narrow_beam = narrow_beam;
        self
    }
}

impl Light for SpotLight {
    fn intensity_at(&self, point: DVec3) -> Color {
        let Some(l) = self.point.direction_at(point) else {
            return BLACK;
        };
        let beam = self.direction.dot(l).max(0.0);
        let beam = if self.narrow_beam == 1.0 {
            beam
        } else {
            beam.powf(self.narrow_beam)
        };
        self.point.intensity_at(point) * beam
    }
}

impl LightSource for SpotLight {
    fn direction_at(&self, point: DVec3) -> Option<DVec3> {
        self.point.direction_at(point)
    }
}

/// Any light source a scene can hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneLight {
    /// Directional light
    Directional(DirectionalLight),
    /// Point light
    Point(PointLight),
    /// Spot light
    Spot(SpotLight),
}

impl Light for SceneLight {
    fn intensity_at(&self, point: DVec3) -> Color {
        match self {
            SceneLight::Directional(light) => light.intensity_at(point),
            SceneLight::Point(light) => light.intensity_at(point),
            SceneLight::Spot(light) => light.intensity_at(point),
        }
    }
}

impl LightSource for SceneLight {
    fn direction_at(&self, point: DVec3) -> Option<DVec3> {
        match self {
            SceneLight::Directional(light) => light.direction_at(point),
            SceneLight::Point(light) => light.direction_at(point),
            SceneLight::Spot(light) => light.direction_at(point),
        }
    }
}

impl From<DirectionalLight> for SceneLight {
    fn from(light: DirectionalLight) -> Self {
        SceneLight::Directional(light)
    }
}

impl From<PointLight> for SceneLight {
    fn from(light: PointLight) -> Self {
        SceneLight::Point(light)
    }
}

impl From<SpotLight> for SceneLight {
    fn from(light: SpotLight) -> Self {
        SceneLight::Spot(light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::assert_vec_eq;

    #[test]
    fn ambient_is_constant() {
        let ambient = AmbientLight::new(DVec3::splat(0.2));
        assert_eq!(ambient.intensity_at(DVec3::new(5.0, -3.0, 1.0)), DVec3::splat(0.2));
        assert_eq!(AmbientLight::NONE.intensity_at(DVec3::ZERO), BLACK);
    }

    #[test]
    fn directional_is_constant_and_normalized() {
        let light = DirectionalLight::new(DVec3::ONE, DVec3::new(0.0, 0.0, -3.0)).unwrap();
        assert_eq!(light.intensity_at(DVec3::new(100.0, 0.0, 0.0)), DVec3::ONE);
        assert_eq!(light.direction_at(DVec3::ZERO), Some(DVec3::Z));
        assert!(DirectionalLight::new(DVec3::ONE, DVec3::ZERO).is_err());
    }

    #[test]
    fn point_light_attenuation() {
        let light = PointLight::new(DVec3::splat(12.0), DVec3::ZERO)
            .with_kc(1.0)
            .with_kl(0.5)
            .with_kq(0.25);
        // d = 2: 1 + 1 + 1 = 3
        assert_vec_eq(light.intensity_at(DVec3::new(0.0, 2.0, 0.0)), DVec3::splat(4.0));
        assert_vec_eq(light.direction_at(DVec3::new(0.0, 2.0, 0.0)).unwrap(), DVec3::Y);
    }

    #[test]
    fn point_light_at_point_has_no_direction() {
        let light = PointLight::new(DVec3::ONE, DVec3::ONE);
        assert!(light.direction_at(DVec3::ONE).is_none());
    }

    #[test]
    fn spot_light_beam() {
        let spot = SpotLight::new(DVec3::ONE, DVec3::ZERO, DVec3::NEG_Z).unwrap();
        // Straight down the beam
        assert_vec_eq(spot.intensity_at(DVec3::new(0.0, 0.0, -1.0)), DVec3::ONE);
        // 60 degrees off the beam
        let off = DVec3::new(3.0_f64.sqrt(), 0.0, -1.0);
        assert_vec_eq(spot.intensity_at(off), DVec3::splat(0.5));
        // Behind the light
        assert_eq!(spot.intensity_at(DVec3::new(0.0, 0.0, 1.0)), BLACK);
    }

    #[test]
    fn spot_light_narrowing() {
        let spot = SpotLight::new(DVec3::ONE, DVec3::ZERO, DVec3::NEG_Z)
            .unwrap()
            .with_narrow_beam(3.0);
        let off = DVec3::new(3.0_f64.sqrt(), 0.0, -1.0);
        assert_vec_eq(spot.intensity_at(off), DVec3::splat(0.125));
    }

    #[test]
    fn scene_light_dispatch() {
        let light: SceneLight = PointLight::new(DVec3::ONE, DVec3::ZERO).with_kq(1.0).into();
        // d = 2: 1 + 0 + 4 = 5
        assert_vec_eq(light.intensity_at(DVec3::new(2.0, 0.0, 0.0)), DVec3::splat(0.2));
        assert_vec_eq(light.direction_at(DVec3::new(2.0, 0.0, 0.0)).unwrap(), DVec3::X);
    }
}
