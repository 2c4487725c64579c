//! Material system for Phong shading.
//!
//! A material carries the ambient, diffuse and specular reflection coefficients
//! plus the shininess exponent. Shapes embed it together with their emission
//! color in a [`Surface`].

use glam::DVec3;

/// Linear RGB color type using f64 channels.
pub type Color = DVec3;

/// Black, the color of "no contribution".
pub const BLACK: Color = DVec3::ZERO;

/// Phong reflection coefficients of a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Ambient reflection coefficient per channel.
    pub ka: DVec3,
    /// Diffuse reflection coefficient per channel.
    pub kd: DVec3,
    /// Specular reflection coefficient per channel.
    pub ks: DVec3,
    /// Exponent of the specular lobe.
    pub shininess: u32,
}

impl Material {
    /// Pass-through material: full ambient reflection, no diffuse or specular.
    pub const DEFAULT: Material = Material {
        ka: DVec3::ONE,
        kd: DVec3::ZERO,
        ks: DVec3::ZERO,
        shininess: 0,
    };

    /// Set the ambient coefficient on every channel.
    pub fn with_ka(mut self, ka: impl Into<Coefficient>) -> Self {
        self.ka = ka.into().0;
        self
    }

    /// Set the diffuse coefficient on every channel.
    pub fn with_kd(mut self, kd: impl Into<Coefficient>) -> Self {
        self.kd = kd.into().0;
        self
    }

    /// Set the specular coefficient on every channel.
    pub fn with_ks(mut self, ks: impl Into<Coefficient>) -> Self {
        self.ks = ks.into().0;
        self
    }

    /// Set the shininess exponent.
    pub fn with_shininess(mut self, shininess: u32) -> Self {
        self.shininess = shininess;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A reflection coefficient, given either per channel or as one scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficient(pub DVec3);

impl From<f64> for Coefficient {
    fn from(value: f64) -> Self {
        Coefficient(DVec3::splat(value))
    }
}

impl From<DVec3> for Coefficient {
    fn from(value: DVec3) -> Self {
        Coefficient(value)
    }
}

/// Appearance shared by every shape: reflection material plus emitted light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    /// Light emitted by the surface itself.
    pub emission: Color,
    /// Reflection coefficients.
    pub material: Material,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            emission: BLACK,
            material: Material::DEFAULT,
        }
    }
}
