//! Scene types for GRIT.
//!
//! This module defines the finalized scene handed to the renderer: flattened
//! primitives with their world transforms, lights, and the camera. Nothing
//! here changes once the scene has been built.

use std::path::PathBuf;

use grit_math::{AffineTransform, Mat4, Vec3};

/// Offset applied to secondary ray origins to avoid self-intersection.
pub const DEFAULT_EPSILON_BIAS: f32 = 0.001;

/// Surface description for the local illumination model.
///
/// Colors are linear RGB and may exceed 1.0; the shader clamps only the final
/// pixel value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    /// Blinn-Phong highlight color, also the mirror reflectance
    pub specular: Vec3,
    pub emission: Vec3,
    /// Phong cosine power
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec3::ZERO,
            diffuse: Vec3::ZERO,
            specular: Vec3::ZERO,
            emission: Vec3::ZERO,
            shininess: 0.0,
        }
    }
}

impl Material {
    /// A purely diffuse material.
    pub fn diffuse(color: Vec3) -> Self {
        Self {
            diffuse: color,
            ..Default::default()
        }
    }

    pub fn with_ambient(mut self, ambient: Vec3) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_specular(mut self, specular: Vec3, shininess: f32) -> Self {
        self.specular = specular;
        self.shininess = shininess;
        self
    }

    pub fn with_emission(mut self, emission: Vec3) -> Self {
        self.emission = emission;
        self
    }

    /// True if the surface reflects anything back along the mirror direction.
    pub fn is_reflective(&self) -> bool {
        self.specular.max_element() > 0.0
    }
}

/// Sphere in local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

/// Triangle in local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

/// The closed set of intersectable shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Triangle(Triangle),
}

impl Shape {
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Shape::Sphere(Sphere { center, radius })
    }

    pub fn triangle(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Shape::Triangle(Triangle { a, b, c })
    }
}

/// A shape with its own material and world transform.
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub material: Material,
    pub transform: AffineTransform,
}

impl Primitive {
    /// Create a primitive; the inverse matrices are computed here, once.
    pub fn new(shape: Shape, material: Material, matrix: Mat4) -> Self {
        Self {
            shape,
            material,
            transform: AffineTransform::new(matrix),
        }
    }

    /// Create a primitive that lives directly in world space.
    pub fn untransformed(shape: Shape, material: Material) -> Self {
        Self {
            shape,
            material,
            transform: AffineTransform::IDENTITY,
        }
    }
}

/// Light source type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    /// Positional light with quadratic falloff `c0 + c1*d + c2*d^2`.
    Point { position: Vec3, attenuation: Vec3 },
    /// Light at infinity; `direction` points from the surface towards the light.
    Directional { direction: Vec3 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Vec3,
}

impl Light {
    pub fn point(position: Vec3, color: Vec3, attenuation: Vec3) -> Self {
        Self {
            kind: LightKind::Point {
                position,
                attenuation,
            },
            color,
        }
    }

    pub fn directional(direction: Vec3, color: Vec3) -> Self {
        Self {
            kind: LightKind::Directional { direction },
            color,
        }
    }
}

/// Pinhole camera as described by the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraDesc {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub width: u32,
    pub height: u32,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            eye: Vec3::ZERO,
            center: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            fov_y: 90.0,
            width: 640,
            height: 480,
        }
    }
}

impl CameraDesc {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// A fully parsed scene.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Scene name (from the file stem)
    pub name: String,
    pub camera: CameraDesc,
    pub lights: Vec<Light>,
    pub primitives: Vec<Primitive>,
    pub epsilon_bias: f32,
    /// Reflection depth requested by the scene, if any
    pub max_depth: Option<u32>,
    /// Output image requested by the scene, if any
    pub output: Option<PathBuf>,
}

impl Scene {
    pub fn new(name: impl Into<String>, camera: CameraDesc) -> Self {
        Self {
            name: name.into(),
            camera,
            lights: Vec::new(),
            primitives: Vec::new(),
            epsilon_bias: DEFAULT_EPSILON_BIAS,
            max_depth: None,
            output: None,
        }
    }

    pub fn with_primitive(mut self, primitive: Primitive) -> Self {
        self.primitives.push(primitive);
        self
    }

    pub fn with_light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    pub fn sphere_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p.shape, Shape::Sphere(_)))
            .count()
    }

    pub fn triangle_count(&self) -> usize {
        self.primitives.len() - self.sphere_count()
    }
}
