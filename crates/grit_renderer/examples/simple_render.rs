//! Simple ray tracer example.
//!
//! Builds a small scene in code (three spheres over a mirror floor), renders
//! it with the uniform grid and saves a PNG.
//!
//! Run with: cargo run -p grit_renderer --example simple_render --release

use std::time::Instant;

use grit_core::{CameraDesc, Light, Material, Primitive, Scene, Shape};
use grit_renderer::{render, CancelToken, IndexKind, RenderConfig, RenderScene, Vec3};

fn main() {
    env_logger::init();

    println!("GRIT Ray Tracer - Simple Example");
    println!("================================");

    let config = RenderConfig::default()
        .with_index(IndexKind::Grid)
        .with_max_depth(4);

    let start = Instant::now();
    let scene = RenderScene::new(build_scene(), &config);
    println!("Scene built in {:?}", start.elapsed());

    println!(
        "Rendering {}x{} (max depth {})...",
        scene.camera.width(),
        scene.camera.height(),
        scene.resolve_max_depth(&config)
    );

    let start = Instant::now();
    let image = match render(&scene, &config, &CancelToken::new()) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Render failed: {}", e);
            return;
        }
    };
    println!("Rendered in {:?}", start.elapsed());

    let filename = "simple_render.png";
    match image.save(filename) {
        Ok(()) => println!("Saved to {}", filename),
        Err(e) => eprintln!("Failed to save image: {}", e),
    }
}

fn build_scene() -> Scene {
    let camera = CameraDesc {
        eye: Vec3::new(0.0, 2.0, 8.0),
        center: Vec3::new(0.0, 0.5, 0.0),
        up: Vec3::Y,
        fov_y: 40.0,
        width: 640,
        height: 360,
    };

    let floor = Material::diffuse(Vec3::splat(0.4))
        .with_ambient(Vec3::splat(0.05))
        .with_specular(Vec3::splat(0.3), 80.0);
    let corners = [
        Vec3::new(-20.0, 0.0, -20.0),
        Vec3::new(20.0, 0.0, -20.0),
        Vec3::new(20.0, 0.0, 20.0),
        Vec3::new(-20.0, 0.0, 20.0),
    ];

    let ball = |center: Vec3, color: Vec3| {
        Primitive::untransformed(
            Shape::sphere(center, 1.0),
            Material::diffuse(color)
                .with_ambient(color * 0.1)
                .with_specular(Vec3::splat(0.2), 40.0),
        )
    };

    Scene::new("simple_render", camera)
        .with_primitive(Primitive::untransformed(
            Shape::triangle(corners[0], corners[2], corners[1]),
            floor,
        ))
        .with_primitive(Primitive::untransformed(
            Shape::triangle(corners[0], corners[3], corners[2]),
            floor,
        ))
        .with_primitive(ball(Vec3::new(-2.2, 1.0, 0.0), Vec3::new(0.8, 0.2, 0.2)))
        .with_primitive(ball(Vec3::new(0.0, 1.0, -1.0), Vec3::new(0.2, 0.8, 0.2)))
        .with_primitive(ball(Vec3::new(2.2, 1.0, 0.0), Vec3::new(0.2, 0.2, 0.8)))
        .with_light(Light::point(
            Vec3::new(4.0, 6.0, 6.0),
            Vec3::splat(0.8),
            Vec3::new(1.0, 0.0, 0.0),
        ))
        .with_light(Light::directional(Vec3::new(-1.0, 1.0, 0.5), Vec3::splat(0.3)))
}
