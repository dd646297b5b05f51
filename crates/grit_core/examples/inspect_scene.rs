//! Example: Load and inspect a scene file.
//!
//! Run with: cargo run -p grit_core --example inspect_scene -- scenes/spheres.test

use std::env;

use grit_core::{load_scene, LightKind, Shape};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene-file>");
        println!("\nExamples:");
        println!("  cargo run -p grit_core --example inspect_scene -- scenes/spheres.test");
        println!("  cargo run -p grit_core --example inspect_scene -- scenes/mirror_room.test");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(scene) => {
            let camera = &scene.camera;
            println!("\n=== Scene: {} ===", scene.name);
            println!("Resolution: {}x{}", camera.width, camera.height);
            println!(
                "Camera: eye ({:.2}, {:.2}, {:.2}) -> center ({:.2}, {:.2}, {:.2}), fovy {:.1}",
                camera.eye.x,
                camera.eye.y,
                camera.eye.z,
                camera.center.x,
                camera.center.y,
                camera.center.z,
                camera.fov_y
            );
            if let Some(depth) = scene.max_depth {
                println!("Max depth: {}", depth);
            }
            if let Some(output) = &scene.output {
                println!("Output: {}", output.display());
            }

            println!("\n--- Primitives ({}) ---", scene.primitives.len());
            for (i, primitive) in scene.primitives.iter().enumerate() {
                let origin = primitive.transform.point_to_world(grit_math::Vec3::ZERO);
                let kind = match primitive.shape {
                    Shape::Sphere(sphere) => format!("sphere r={:.2}", sphere.radius),
                    Shape::Triangle(_) => "triangle".to_string(),
                };
                println!(
                    "  [{}] {} local origin at ({:.2}, {:.2}, {:.2})",
                    i, kind, origin.x, origin.y, origin.z
                );
            }

            println!("\n--- Lights ({}) ---", scene.lights.len());
            for light in &scene.lights {
                match light.kind {
                    LightKind::Point {
                        position,
                        attenuation,
                    } => println!(
                        "  point at ({:.2}, {:.2}, {:.2}), attenuation {:?}",
                        position.x, position.y, position.z, attenuation
                    ),
                    LightKind::Directional { direction } => println!(
                        "  directional towards ({:.2}, {:.2}, {:.2})",
                        direction.x, direction.y, direction.z
                    ),
                }
            }
        }
        Err(e) => {
            eprintln!("Error loading scene file: {}", e);
        }
    }
}
