use anyhow::{Context, Result};
use clap::Parser;
use glam::DVec3;
use log::info;

use chromaphong::camera::{Camera, CameraConfig};
use chromaphong::config::SceneFile;
use chromaphong::cylinder::Cylinder;
use chromaphong::hittable::Geometries;
use chromaphong::light::{AmbientLight, DirectionalLight, PointLight, SceneLight, SpotLight};
use chromaphong::material::Material;
use chromaphong::output::{draw_grid, save_image};
use chromaphong::plane::Plane;
use chromaphong::ray::Ray;
use chromaphong::scene::Scene;
use chromaphong::sphere::Sphere;
use chromaphong::tracer::SimpleRayTracer;
use chromaphong::triangle::Triangle;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

const GRID_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// Sphere, two triangles and a cylinder on a dark floor, lit from several sides.
fn demo_scene() -> Result<(Scene, CameraConfig)> {
    let shiny = Material::default().with_kd(0.5).with_ks(0.5).with_shininess(100);

    let mut geometries = Geometries::new();
    geometries.add(
        Sphere::new(DVec3::new(0.0, 0.0, -50.0), 50.0)?
            .with_emission(DVec3::new(0.2, 0.0, 0.0))
            .with_material(shiny),
    );
    geometries.add(
        Triangle::new(
            DVec3::new(-150.0, -150.0, -115.0),
            DVec3::new(150.0, -150.0, -135.0),
            DVec3::new(75.0, 75.0, -150.0),
        )?
        .with_emission(DVec3::new(0.0, 0.0, 0.3))
        .with_material(Material::default().with_kd(0.8).with_ks(0.2).with_shininess(60)),
    );
    geometries.add(
        Triangle::new(
            DVec3::new(-150.0, -150.0, -115.0),
            DVec3::new(-70.0, 70.0, -140.0),
            DVec3::new(75.0, 75.0, -150.0),
        )?
        .with_emission(DVec3::new(0.0, 0.3, 0.0))
        .with_material(Material::default().with_kd(0.8).with_ks(0.2).with_shininess(60)),
    );
    geometries.add(
        Cylinder::new(Ray::new(DVec3::new(55.0, -60.0, -20.0), DVec3::new(0.0, 1.0, 0.2))?, 12.0, 40.0)?
            .with_emission(DVec3::new(0.15, 0.15, 0.0))
            .with_material(shiny),
    );
    geometries.add(
        Plane::new(DVec3::new(0.0, -80.0, 0.0), DVec3::Y)?
            .with_emission(DVec3::splat(0.05))
            .with_material(Material::default().with_kd(0.3)),
    );

    let lights: Vec<SceneLight> = vec![
        SpotLight::new(DVec3::new(1.0, 0.5, 0.5), DVec3::new(-50.0, -50.0, 50.0), DVec3::new(1.0, 1.0, -2.0))?
            .with_kl(0.001)
            .with_kq(0.0001)
            .into(),
        PointLight::new(DVec3::new(0.5, 0.5, 1.0), DVec3::new(50.0, 50.0, 50.0))
            .with_kl(0.001)
            .with_kq(0.0002)
            .into(),
        DirectionalLight::new(DVec3::splat(0.2), DVec3::new(0.0, -1.0, -1.0))?.into(),
    ];

    let scene = Scene::new("demo")
        .with_ambient_light(AmbientLight::new(DVec3::splat(0.1)))
        .with_geometries(geometries)
        .with_lights(lights);

    let camera = CameraConfig {
        location: Some(DVec3::new(0.0, 0.0, 1000.0)),
        forward: Some(DVec3::NEG_Z),
        up: Some(DVec3::Y),
        width: Some(200.0),
        height: Some(200.0),
        distance: Some(1000.0),
        resolution: [500, 500],
        ..CameraConfig::default()
    };

    Ok((scene, camera))
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    info!("ChromaPhong - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    let (scene, camera_config) = match &args.scene {
        Some(path) => {
            let file = SceneFile::load(path).with_context(|| format!("Cannot load scene {}", path.display()))?;
            let scene = file.scene.build().with_context(|| format!("Invalid scene {}", path.display()))?;
            (scene, file.camera)
        }
        None => {
            info!("No scene file given, rendering the built-in demo scene");
            demo_scene()?
        }
    };

    let mut camera = Camera::new(&camera_config).context("Invalid camera")?;
    if args.width.is_some() || args.height.is_some() {
        let (width, height) = camera.resolution();
        camera = camera.with_resolution(args.width.unwrap_or(width), args.height.unwrap_or(height))?;
    }

    let (width, height) = camera.resolution();
    info!(
        "Scene '{}': {} shapes, {} lights, {}x{} pixels",
        scene.name,
        scene.geometries.len(),
        scene.lights.len(),
        width,
        height
    );

    let tracer = SimpleRayTracer::new(&scene);
    let mut image = camera.render(&tracer);

    if let Some(interval) = args.grid {
        draw_grid(&mut image, interval, GRID_COLOR);
    }

    save_image(&image, &args.output)?;
    Ok(())
}
