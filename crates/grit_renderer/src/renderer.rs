//! Frame rendering: configuration, the parallel bucket loop and the image
//! buffer it fills.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use grit_core::Scene;
use rayon::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::camera::Camera;
use crate::index::{build_index, IndexKind};
use crate::tracer::{clamp_color, Color, Tracer, DEFAULT_MAX_DEPTH};

/// Errors that can occur while rendering or writing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Render cancelled")]
    Cancelled,

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Render settings that are not part of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Reflection depth; falls back to the scene's `maxdepth`, then
    /// [`DEFAULT_MAX_DEPTH`]
    pub max_depth: Option<u32>,
    pub index: IndexKind,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            index: IndexKind::Grid,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_index(mut self, index: IndexKind) -> Self {
        self.index = index;
        self
    }

    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }
}

/// Cooperative cancellation flag shared between the caller and the workers.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Everything the workers read while rendering one frame.
#[derive(Debug, Clone)]
pub struct RenderScene {
    pub name: String,
    pub camera: Camera,
    pub tracer: Tracer,
    /// Depth requested by the scene file
    pub max_depth: Option<u32>,
}

impl RenderScene {
    /// Build the camera and the index chosen by `config.index`. The primitives
    /// move into the index.
    pub fn new(scene: Scene, config: &RenderConfig) -> Self {
        let camera = Camera::new(&scene.camera);
        let index = build_index(scene.primitives, config.index);
        Self {
            name: scene.name,
            camera,
            tracer: Tracer::new(index, scene.lights, scene.epsilon_bias),
            max_depth: scene.max_depth,
        }
    }

    /// Depth to render with under `config`.
    pub fn resolve_max_depth(&self, config: &RenderConfig) -> u32 {
        config
            .max_depth
            .or(self.max_depth)
            .unwrap_or(DEFAULT_MAX_DEPTH)
    }
}

/// Linear colors for a whole frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.offset(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let offset = self.offset(x, y);
        self.pixels[offset] = color;
    }

    /// Copy a finished bucket into place.
    pub fn blit(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (row, chunk) in result.pixels.chunks(bucket.width as usize).enumerate() {
            let start = self.offset(bucket.x, bucket.y + row as u32);
            self.pixels[start..start + chunk.len()].copy_from_slice(chunk);
        }
    }

    /// Packed 8-bit RGB, no gamma.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&color| {
                let c = clamp_color(color) * 255.0;
                [c.x as u8, c.y as u8, c.z as u8]
            })
            .collect()
    }

    /// Encode to `path`; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        image::save_buffer(
            path,
            &self.to_rgb8(),
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )?;
        Ok(())
    }
}

/// Primary ray color for pixel (x, y).
pub fn render_pixel(scene: &RenderScene, x: u32, y: u32, max_depth: u32) -> Color {
    scene
        .tracer
        .trace(scene.camera.eye(), scene.camera.ray_direction(x, y), max_depth)
}

/// Render the frame in parallel buckets.
///
/// `scene` must have been built with the same `config.index`. `cancel` is
/// checked before each bucket starts.
pub fn render(
    scene: &RenderScene,
    config: &RenderConfig,
    cancel: &CancelToken,
) -> RenderResult<ImageBuffer> {
    if config.bucket_size == 0 {
        return Err(RenderError::InvalidConfig(
            "bucket size must be positive".to_string(),
        ));
    }
    let built = scene.tracer.index().kind();
    if built != config.index {
        return Err(RenderError::InvalidConfig(format!(
            "scene was indexed with {} but the config asks for {}",
            built, config.index
        )));
    }

    let (width, height) = (scene.camera.width(), scene.camera.height());
    let max_depth = scene.resolve_max_depth(config);
    let buckets = generate_buckets(width, height, config.bucket_size);

    log::info!(
        "Rendering '{}' at {}x{}: {} buckets, max depth {}, {} threads",
        scene.name,
        width,
        height,
        buckets.len(),
        max_depth,
        rayon::current_num_threads()
    );
    let start = Instant::now();

    let results = buckets
        .par_iter()
        .map(|bucket| {
            if cancel.is_cancelled() {
                return Err(RenderError::Cancelled);
            }
            Ok(render_bucket(bucket, scene, max_depth))
        })
        .collect::<RenderResult<Vec<_>>>()?;

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        image.blit(result);
    }

    log::info!("Rendered '{}' in {:.2?}", scene.name, start.elapsed());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::Bucket;
    use grit_core::{CameraDesc, Light, Material, Primitive, Shape};
    use grit_math::Vec3;

    fn small_scene(max_depth: Option<u32>) -> RenderScene {
        let mut scene = Scene::new(
            "small",
            CameraDesc {
                eye: Vec3::ZERO,
                center: -Vec3::Z,
                width: 20,
                height: 10,
                fov_y: 45.0,
                ..Default::default()
            },
        )
        .with_primitive(Primitive::untransformed(
            Shape::sphere(Vec3::new(0.0, 0.0, -5.0), 1.0),
            Material::diffuse(Vec3::X).with_ambient(Vec3::splat(0.1)),
        ))
        .with_light(Light::point(Vec3::ZERO, Vec3::ONE, Vec3::X));
        scene.max_depth = max_depth;
        RenderScene::new(scene, &RenderConfig::default())
    }

    #[test]
    fn test_config_defaults_and_builders() {
        let config = RenderConfig::default();
        assert_eq!(config.max_depth, None);
        assert_eq!(config.index, IndexKind::Grid);
        assert_eq!(config.bucket_size, DEFAULT_BUCKET_SIZE);

        let config = config
            .with_max_depth(2)
            .with_index(IndexKind::Linear)
            .with_bucket_size(8);
        assert_eq!(config.max_depth, Some(2));
        assert_eq!(config.index, IndexKind::Linear);
        assert_eq!(config.bucket_size, 8);
    }

    #[test]
    fn test_max_depth_precedence() {
        let from_scene = small_scene(Some(3));
        assert_eq!(from_scene.resolve_max_depth(&RenderConfig::default()), 3);
        assert_eq!(
            from_scene.resolve_max_depth(&RenderConfig::default().with_max_depth(1)),
            1
        );

        let unset = small_scene(None);
        assert_eq!(
            unset.resolve_max_depth(&RenderConfig::default()),
            DEFAULT_MAX_DEPTH
        );
    }

    #[test]
    fn test_to_rgb8_clamps_without_gamma() {
        let mut image = ImageBuffer::new(2, 1);
        image.set(0, 0, Vec3::new(0.5, 2.0, -1.0));
        image.set(1, 0, Vec3::new(1.0, 0.0, 0.25));
        assert_eq!(image.to_rgb8(), vec![127, 255, 0, 255, 0, 63]);
    }

    #[test]
    fn test_blit_places_bucket() {
        let mut image = ImageBuffer::new(4, 4);
        let bucket = Bucket::new(2, 1, 2, 2, 0);
        let pixels = vec![Vec3::X, Vec3::Y, Vec3::Z, Vec3::ONE];
        image.blit(&BucketResult { bucket, pixels });

        assert_eq!(image.get(2, 1), Vec3::X);
        assert_eq!(image.get(3, 1), Vec3::Y);
        assert_eq!(image.get(2, 2), Vec3::Z);
        assert_eq!(image.get(3, 2), Vec3::ONE);
        assert_eq!(image.get(1, 1), Vec3::ZERO);
    }

    #[test]
    fn test_render_matches_single_pixel() {
        let scene = small_scene(None);
        let image = render(
            &scene,
            &RenderConfig::default().with_bucket_size(4),
            &CancelToken::new(),
        )
        .unwrap();

        assert_eq!(image.pixels.len(), 200);
        for (x, y) in [(0, 0), (10, 5), (19, 9), (9, 4)] {
            assert_eq!(image.get(x, y), render_pixel(&scene, x, y, DEFAULT_MAX_DEPTH));
        }
        // The sphere fills the middle of the frame
        assert!(image.get(10, 5).x > 0.5);
        assert_eq!(image.get(0, 0), Vec3::ZERO);
    }

    #[test]
    fn test_cancelled_render() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = render(&small_scene(None), &RenderConfig::default(), &cancel);
        assert!(matches!(result, Err(RenderError::Cancelled)));
    }

    #[test]
    fn test_index_follows_config() {
        let scene = small_scene(None);
        let linear = RenderConfig::default().with_index(IndexKind::Linear);
        let rebuilt = RenderScene::new(
            Scene::new("empty", CameraDesc::default()),
            &linear,
        );
        assert_eq!(rebuilt.tracer.index().kind(), IndexKind::Linear);
        assert_eq!(scene.tracer.index().kind(), IndexKind::Grid);

        let result = render(&scene, &linear, &CancelToken::new());
        assert!(matches!(result, Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_pixel_offset_does_not_wrap() {
        // 70000 * 69999 overflows u32
        let image = ImageBuffer {
            width: 70_000,
            height: 70_000,
            pixels: Vec::new(),
        };
        assert_eq!(image.offset(69_999, 69_999), 4_899_999_999);
        assert_eq!(image.offset(3, 1), 70_003);
    }

    #[test]
    fn test_zero_bucket_size_rejected() {
        let config = RenderConfig::default().with_bucket_size(0);
        let result = render(&small_scene(None), &config, &CancelToken::new());
        assert!(matches!(result, Err(RenderError::InvalidConfig(_))));
    }
}
