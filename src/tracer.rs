//! Ray tracing with Phong local illumination.
//!
//! For every ray the closest hit is shaded with emission, ambient light and the
//! diffuse and specular reflection of each scene light. Shading state lives in a
//! shading context created fresh for every traced ray.

use glam::DVec3;

use crate::hittable::{Intersectable, Intersection};
use crate::light::{Light, LightSource};
use crate::material::{Color, Material, BLACK};
use crate::ray::Ray;
use crate::scene::Scene;
use crate::util::is_zero;

/// Computes the color seen along a ray.
///
/// Must be thread-safe (Sync) so pixels can be traced in parallel.
pub trait RayTracer: Sync {
    /// Color of the light arriving along `ray`.
    fn trace_ray(&self, ray: &Ray) -> Color;
}

/// Ray tracer with local effects only: no reflections, refractions or shadows.
#[derive(Debug, Clone, Copy)]
pub struct SimpleRayTracer<'s> {
    scene: &'s Scene,
}

impl<'s> SimpleRayTracer<'s> {
    /// Create a tracer reading from `scene`.
    pub fn new(scene: &'s Scene) -> Self {
        Self { scene }
    }

    /// Color at an intersection seen along `ray`.
    fn calc_color(&self, intersection: &Intersection<'_>, ray: &Ray) -> Color {
        match ShadingContext::new(intersection, ray.direction()) {
            Some(context) => self.calc_local_effects(&context, intersection),
            // Grazing incidence
            None => BLACK,
        }
    }

    fn calc_local_effects(&self, context: &ShadingContext, intersection: &Intersection<'_>) -> Color {
        let mut color = intersection.emission()
            + self.scene.ambient_light.intensity_at(context.point) * context.material.ka;

        for light in &self.scene.lights {
            let Some(light_context) = context.light(light) else {
                continue;
            };
            let intensity = light.intensity_at(context.point);
            let diffuse = context.diffuse(&light_context);
            let specular = context.specular(&light_context);
            color += intensity * (diffuse + specular);
        }

        color
    }
}

impl RayTracer for SimpleRayTracer<'_> {
    fn trace_ray(&self, ray: &Ray) -> Color {
        let Some(intersections) = self.scene.geometries.intersect(ray) else {
            return self.scene.background;
        };
        match ray.find_closest_intersection(intersections) {
            Some(closest) => self.calc_color(&closest, ray),
            None => self.scene.background,
        }
    }
}

/// Per-ray shading state at one intersection.
#[derive(Debug, Clone, Copy)]
struct ShadingContext {
    point: DVec3,
    material: Material,
    ray_direction: DVec3,
    normal: DVec3,
    n_dot_ray: f64,
}

/// Per-light shading state, derived from a [`ShadingContext`].
#[derive(Debug, Clone, Copy)]
struct LightContext {
    /// Unit direction from the light to the point
    light_direction: DVec3,
    n_dot_light: f64,
}

impl ShadingContext {
    /// Prepare shading at `intersection`, or `None` when the ray grazes the surface.
    fn new(intersection: &Intersection<'_>, ray_direction: DVec3) -> Option<Self> {
        let normal = intersection.geometry.normal(intersection.point);
        let n_dot_ray = normal.dot(ray_direction);
        if is_zero(n_dot_ray) {
            return None;
        }
        Some(Self {
            point: intersection.point,
            material: intersection.material,
            ray_direction,
            normal,
            n_dot_ray,
        })
    }

    /// Relate a light to this point, or `None` when it cannot contribute.
    fn light(&self, light: &impl LightSource) -> Option<LightContext> {
        let light_direction = light.direction_at(self.point)?;
        let n_dot_light = self.normal.dot(light_direction);
        if is_zero(self.n_dot_ray) || is_zero(n_dot_light) {
            return None;
        }
        Some(LightContext {
            light_direction,
            n_dot_light,
        })
    }

    /// kd * |n . l|
    ///
    /// The absolute value lights faces turned away from the light as well.
    fn diffuse(&self, light: &LightContext) -> DVec3 {
        self.material.kd * light.n_dot_light.abs()
    }

    /// ks * (r . v)^shininess, zero when r . v <= 0.
    ///
    /// `r` is the point-to-light direction reflected about the normal and `v`
    /// the point-to-viewer direction.
    fn specular(&self, light: &LightContext) -> DVec3 {
        let l = -light.light_direction;
        let n = self.normal;
        let r = l - n * (2.0 * n.dot(l));
        let v = -self.ray_direction;

        let r_dot_v = r.dot(v);
        if r_dot_v <= 0.0 {
            return DVec3::ZERO;
        }
        self.material.ks * r_dot_v.powf(f64::from(self.material.shininess))
    }
}
