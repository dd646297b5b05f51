//! Recursive Whitted shading.
//!
//! Each hit is lit by ambient and emission terms, by every light that is not
//! blocked (Lambert diffuse plus Blinn-Phong highlight), and by a mirror
//! reflection weighted with the specular color. Only the final sum is clamped.

use grit_core::{Light, LightKind, Material};
use grit_math::{Interval, Ray, Vec3};

use crate::hit::Fragment;
use crate::index::SceneIndex;

/// Linear RGB.
pub type Color = Vec3;

/// Reflection bounces when neither the scene nor the caller chooses.
pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// Clamp every channel to [0, 1].
#[inline]
pub fn clamp_color(color: Color) -> Color {
    Color::new(
        Interval::UNIT.clamp(color.x),
        Interval::UNIT.clamp(color.y),
        Interval::UNIT.clamp(color.z),
    )
}

/// Mirror `view` (pointing away from the surface) about `normal`.
#[inline]
pub fn reflect(view: Vec3, normal: Vec3) -> Vec3 {
    2.0 * view.dot(normal) * normal - view
}

/// Lambert plus Blinn-Phong contribution of one unblocked light.
///
/// `to_light`, `normal` and `to_eye` must be unit vectors.
pub fn shade_light(
    material: &Material,
    light_color: Color,
    to_light: Vec3,
    normal: Vec3,
    to_eye: Vec3,
) -> Color {
    let lambert = material.diffuse * light_color * Interval::UNIT.clamp(to_light.dot(normal));

    let half = (to_light + to_eye).normalize_or_zero();
    let highlight = Interval::UNIT.clamp(half.dot(normal)).powf(material.shininess);
    let phong = material.specular * light_color * highlight;

    lambert + phong
}

/// Traces rays through an immutable scene index.
#[derive(Debug, Clone)]
pub struct Tracer {
    index: SceneIndex,
    lights: Vec<Light>,
    epsilon_bias: f32,
}

impl Tracer {
    pub fn new(index: SceneIndex, lights: Vec<Light>, epsilon_bias: f32) -> Self {
        Self {
            index,
            lights,
            epsilon_bias,
        }
    }

    pub fn index(&self) -> &SceneIndex {
        &self.index
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn epsilon_bias(&self) -> f32 {
        self.epsilon_bias
    }

    /// Color seen along `direction` from `origin`, following at most `depth`
    /// mirror bounces.
    pub fn trace(&self, origin: Vec3, direction: Vec3, depth: u32) -> Color {
        let ray = Ray::new(origin, direction).normalized();
        let Some(fragment) = self.index.nearest_hit(&ray, f32::INFINITY) else {
            return Color::ZERO;
        };

        let material = fragment.material;
        let to_eye = -ray.direction;

        let mut color = material.ambient + material.emission;
        for light in &self.lights {
            color += self.direct_light(light, &fragment, to_eye);
        }

        if depth > 0 && material.is_reflective() {
            let mirror = reflect(to_eye, fragment.normal);
            let reflected = self.trace(
                fragment.position + self.epsilon_bias * mirror,
                mirror,
                depth - 1,
            );
            color += material.specular * reflected;
        }

        clamp_color(color)
    }

    /// Contribution of one light at `fragment`, zero when the light is blocked.
    pub fn direct_light(&self, light: &Light, fragment: &Fragment<'_>, to_eye: Vec3) -> Color {
        let position = fragment.position;

        match light.kind {
            LightKind::Point {
                position: light_position,
                attenuation,
            } => {
                let offset = light_position - position;
                let to_light = offset.normalize_or_zero();
                let distance = offset.dot(to_light);
                if self.occluded(position, to_light, distance) {
                    return Color::ZERO;
                }

                let falloff =
                    attenuation.x + attenuation.y * distance + attenuation.z * distance * distance;
                shade_light(fragment.material, light.color, to_light, fragment.normal, to_eye)
                    / falloff
            }
            LightKind::Directional { direction } => {
                let to_light = direction.normalize_or_zero();
                if self.occluded(position, to_light, f32::INFINITY) {
                    return Color::ZERO;
                }
                shade_light(fragment.material, light.color, to_light, fragment.normal, to_eye)
            }
        }
    }

    fn occluded(&self, position: Vec3, to_light: Vec3, t_limit: f32) -> bool {
        let shadow_ray = Ray::new(position + self.epsilon_bias * to_light, to_light);
        self.index.occluded(&shadow_ray, t_limit)
    }
}
