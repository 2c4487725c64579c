//! ChromaPhong ray tracer
//!
//! Casts one primary ray per pixel into a scene of analytic shapes (planes,
//! spheres, triangles, tubes and finite cylinders) and shades the closest hit
//! with the Phong model under ambient, directional, point and spot lights.
//! Scenes are built in code or loaded from TOML; images are written as PNG or EXR.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod config;
pub mod cylinder;
pub mod error;
pub mod hittable;
pub mod light;
pub mod material;
pub mod output;
pub mod plane;
pub mod ray;
pub mod scene;
pub mod shape;
pub mod sphere;
pub mod tracer;
pub mod triangle;
pub mod tube;
pub mod util;
