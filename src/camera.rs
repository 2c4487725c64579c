//! Camera for ray generation and scene rendering

use glam::DVec3;
use image::Rgb;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;
use serde::Deserialize;

use crate::error::{ConfigError, GeometryError};
use crate::output::HdrImage;
use crate::ray::Ray;
use crate::tracer::RayTracer;
use crate::util::{is_zero, normalized};

/// Everything needed to build a [`Camera`].
///
/// Orientation is given either as `forward` + `up` (orthogonal), or as a
/// `target` point with an optional `up` hint that defaults to +Y.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraConfig {
    /// Camera position
    pub location: Option<DVec3>,
    /// Viewing direction
    pub forward: Option<DVec3>,
    /// Upward direction
    pub up: Option<DVec3>,
    /// Point to look at; takes precedence over `forward`
    pub target: Option<DVec3>,
    /// View plane width in world units
    pub width: Option<f64>,
    /// View plane height in world units
    pub height: Option<f64>,
    /// Distance from the camera to the view plane
    pub distance: Option<f64>,
    /// Image size as [columns, rows]
    #[serde(default = "default_resolution")]
    pub resolution: [u32; 2],
}

fn default_resolution() -> [u32; 2] {
    [1, 1]
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            location: None,
            forward: None,
            up: None,
            target: None,
            width: None,
            height: None,
            distance: None,
            resolution: default_resolution(),
        }
    }
}

/// Pinhole camera with a rectangular view plane.
///
/// Rays start at the camera location and pass through pixel centers on the
/// view plane. Immutable once built; safe to share across render threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    location: DVec3,
    /// Unit viewing direction
    forward: DVec3,
    /// Unit upward direction, orthogonal to `forward`
    up: DVec3,
    /// forward x up
    right: DVec3,
    width: f64,
    height: f64,
    distance: f64,
    /// Image width in pixel count
    image_width: u32,
    /// Image height in pixel count
    image_height: u32,
}

fn missing(field: &'static str) -> ConfigError {
    ConfigError::Missing { class: "Camera", field }
}

fn positive(what: &'static str, value: f64) -> Result<f64, GeometryError> {
    if value.is_nan() || value <= 0.0 || is_zero(value) {
        Err(GeometryError::NonPositive { what, value })
    } else {
        Ok(value)
    }
}

impl Camera {
    /// Validate a configuration and build the camera.
    pub fn new(config: &CameraConfig) -> Result<Self, ConfigError> {
        let location = config.location.ok_or_else(|| missing("location"))?;

        let (forward, up, right) = match (config.target, config.forward) {
            (Some(target), _) => {
                let up_hint = config.up.unwrap_or(DVec3::Y);
                let forward = normalized(target - location).ok_or(GeometryError::CoincidentPoints)?;
                let right = normalized(forward.cross(up_hint)).ok_or(GeometryError::ZeroVector)?;
                let up = normalized(right.cross(forward)).ok_or(GeometryError::ZeroVector)?;
                (forward, up, right)
            }
            (None, Some(forward)) => {
                let up = config.up.ok_or_else(|| missing("direction vector up"))?;
                if !is_zero(forward.dot(up)) {
                    return Err(GeometryError::NotOrthogonal.into());
                }
                let forward = normalized(forward).ok_or(GeometryError::ZeroVector)?;
                let up = normalized(up).ok_or(GeometryError::ZeroVector)?;
                let right = normalized(forward.cross(up)).ok_or(GeometryError::ZeroVector)?;
                (forward, up, right)
            }
            (None, None) => return Err(missing("direction vector forward")),
        };

        let width = positive("view plane width", config.width.ok_or_else(|| missing("view plane width"))?)?;
        let height = positive("view plane height", config.height.ok_or_else(|| missing("view plane height"))?)?;
        let distance = positive(
            "view plane distance",
            config.distance.ok_or_else(|| missing("view plane distance"))?,
        )?;

        let [image_width, image_height] = config.resolution;
        if image_width == 0 || image_height == 0 {
            return Err(GeometryError::NonPositive {
                what: "resolution",
                value: image_width.min(image_height) as f64,
            }
            .into());
        }

        let camera = Self {
            location,
            forward,
            up,
            right,
            width,
            height,
            distance,
            image_width,
            image_height,
        };
        debug!("Camera built: {:?}", camera);
        Ok(camera)
    }

    /// Same camera with a different image resolution.
    pub fn with_resolution(mut self, image_width: u32, image_height: u32) -> Result<Self, GeometryError> {
        if image_width == 0 || image_height == 0 {
            return Err(GeometryError::NonPositive {
                what: "resolution",
                value: image_width.min(image_height) as f64,
            });
        }
        self.image_width = image_width;
        self.image_height = image_height;
        Ok(self)
    }

    /// Camera position.
    pub fn location(&self) -> DVec3 {
        self.location
    }

    /// Unit basis as (forward, up, right).
    pub fn basis(&self) -> (DVec3, DVec3, DVec3) {
        (self.forward, self.up, self.right)
    }

    /// Image size as (columns, rows).
    pub fn resolution(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    /// Ray through the center of pixel (`j`, `i`) of an `nx` x `ny` grid.
    ///
    /// `j` counts columns to the right, `i` counts rows downward. A zero row or
    /// column count is treated as a single pixel.
    pub fn construct_ray(&self, nx: u32, ny: u32, j: u32, i: u32) -> Ray {
        let (nx, ny) = (nx.max(1), ny.max(1));
        let pc = self.location + self.forward * self.distance;

        let ry = self.height / ny as f64;
        let rx = self.width / nx as f64;

        let yi = -(i as f64 - (ny as f64 - 1.0) / 2.0) * ry;
        let xj = (j as f64 - (nx as f64 - 1.0) / 2.0) * rx;

        // Skip zero offsets so pixels on the principal axis stay exactly on it
        let mut pij = pc;
        if !is_zero(xj) {
            pij += self.right * xj;
        }
        if !is_zero(yi) {
            pij += self.up * yi;
        }

        // The view plane is at positive distance, so pij never equals location
        Ray::from_unit(self.location, (pij - self.location).normalize())
    }

    /// Ray through pixel (`j`, `i`) at the camera's own resolution.
    pub fn ray_through_pixel(&self, j: u32, i: u32) -> Ray {
        self.construct_ray(self.image_width, self.image_height, j, i)
    }

    /// Renders the scene seen through this camera.
    ///
    /// Pixels are traced in parallel; each pixel is written exactly once.
    ///
    /// Returns an HDR image buffer with linear f32 RGB values.
    pub fn render(&self, tracer: &impl RayTracer) -> HdrImage {
        let mut image = HdrImage::new(self.image_width, self.image_height);

        info!("Generating image using {} CPU cores...", rayon::current_num_threads());
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new(u64::from(self.image_width) * u64::from(self.image_height));
        if let Ok(style) = ProgressStyle::default_bar().template("{bar:40} {pos}/{len} ETA: {eta}") {
            pb.set_style(style);
        }

        // Parallel pixel processing using Rayon
        image.enumerate_pixels_mut().par_bridge().for_each(|(j, i, pixel)| {
            let ray = self.ray_through_pixel(j, i);
            let color = tracer.trace_ray(&ray);
            *pixel = Rgb([color.x as f32, color.y as f32, color.z as f32]);
            pb.inc(1);
        });

        pb.finish();
        info!("Image generated in {:.2?}", generation_start.elapsed());

        image
    }
}
