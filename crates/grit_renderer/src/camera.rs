//! Pinhole camera for primary ray generation.

use grit_core::CameraDesc;
use grit_math::{Ray, Vec3};

/// Camera with its orthonormal basis computed once per frame.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    eye: Vec3,
    /// Right
    u: Vec3,
    /// Up
    v: Vec3,
    /// Backwards, away from the look-at point
    w: Vec3,
    tan_x: f32,
    tan_y: f32,
    width: u32,
    height: u32,
}

impl Camera {
    pub fn new(desc: &CameraDesc) -> Self {
        let w = (desc.eye - desc.center).normalize();
        let u = desc.up.cross(w).normalize();
        let v = w.cross(u);

        let tan_y = (desc.fov_y.to_radians() / 2.0).tan();
        let tan_x = tan_y * desc.aspect_ratio();

        Self {
            eye: desc.eye,
            u,
            v,
            w,
            tan_x,
            tan_y,
            width: desc.width,
            height: desc.height,
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Unit direction through the center of pixel (x, y), y growing downwards.
    pub fn ray_direction(&self, x: u32, y: u32) -> Vec3 {
        let half_w = self.width as f32 / 2.0;
        let half_h = self.height as f32 / 2.0;
        let a = self.tan_x * (x as f32 + 0.5 - half_w) / half_w;
        let b = self.tan_y * (half_h - (y as f32 + 0.5)) / half_h;
        (a * self.u + b * self.v - self.w).normalize()
    }

    /// Primary ray for pixel (x, y).
    pub fn ray(&self, x: u32, y: u32) -> Ray {
        Ray::new(self.eye, self.ray_direction(x, y))
    }
}
