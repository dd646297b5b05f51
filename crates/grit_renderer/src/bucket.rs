//! Square image tiles rendered as independent parallel work items.

use crate::renderer::{render_pixel, RenderScene};
use crate::tracer::Color;

/// Default bucket edge length in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// A rectangular region of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Top-left corner
    pub x: u32,
    pub y: u32,
    /// Clipped to the image edge
    pub width: u32,
    pub height: u32,
    /// Position in render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    fn squared_distance_to(&self, cx: f32, cy: f32) -> f32 {
        let bx = self.x as f32 + self.width as f32 / 2.0;
        let by = self.y as f32 + self.height as f32 / 2.0;
        (bx - cx).powi(2) + (by - cy).powi(2)
    }
}

/// Tile a `width` x `height` image, ordered from the center outwards.
///
/// Buckets on the right and bottom edges are clipped, so every pixel belongs
/// to exactly one bucket. A zero `bucket_size` yields no buckets.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    if bucket_size == 0 {
        return Vec::new();
    }

    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(bucket_size as usize)
        .flat_map(|y| {
            (0..width).step_by(bucket_size as usize).map(move |x| {
                Bucket::new(
                    x,
                    y,
                    bucket_size.min(width - x),
                    bucket_size.min(height - y),
                    0,
                )
            })
        })
        .collect();

    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    buckets.sort_by(|a, b| a.squared_distance_to(cx, cy).total_cmp(&b.squared_distance_to(cx, cy)));

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }
    buckets
}

/// Pixels of one finished bucket, row-major within the bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    pub pixels: Vec<Color>,
}

/// Trace every pixel of `bucket`.
pub fn render_bucket(bucket: &Bucket, scene: &RenderScene, max_depth: u32) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);
    for y in bucket.y..bucket.y + bucket.height {
        for x in bucket.x..bucket.x + bucket.width {
            pixels.push(render_pixel(scene, x, y, max_depth));
        }
    }
    BucketResult {
        bucket: *bucket,
        pixels,
    }
}
