//! Scene file parser.
//!
//! Reads the command language line by line, keeping the "current" material,
//! attenuation and transform stack as it goes. Each `tri` and `sphere` is
//! flattened into a [`Primitive`] carrying the matrix on top of the stack.

use grit_math::{Mat4, Vec3};
use thiserror::Error;

use crate::scene::{CameraDesc, Light, Material, Primitive, Scene, Shape};

/// Shininess assigned before any `shininess` command.
pub const DEFAULT_SHININESS: f32 = 40.0;

/// Point light falloff before any `attenuation` command (c0, c1, c2).
pub const DEFAULT_ATTENUATION: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Errors that can occur during scene parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid number format at line {line}: {token}")]
    InvalidNumber { line: usize, token: String },

    #[error("Scene is missing a `{0}` command")]
    MissingCommand(&'static str),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parse scene file contents into a [`Scene`] named `name`.
pub fn parse_scene(content: &str, name: &str) -> ParseResult<Scene> {
    let mut parser = SceneParser::new();
    for (index, line) in content.lines().enumerate() {
        parser.parse_line(index + 1, line)?;
    }
    parser.finish(name)
}

/// Incremental scene parser state.
pub struct SceneParser {
    size: Option<(u32, u32)>,
    camera: Option<CameraDesc>,
    output: Option<String>,
    max_depth: Option<u32>,

    material: Material,
    attenuation: Vec3,

    /// Never empty: the bottom entry is the identity
    transform_stack: Vec<Mat4>,
    vertices: Vec<Vec3>,

    lights: Vec<Light>,
    primitives: Vec<Primitive>,
}

impl Default for SceneParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneParser {
    pub fn new() -> Self {
        Self {
            size: None,
            camera: None,
            output: None,
            max_depth: None,
            material: Material {
                shininess: DEFAULT_SHININESS,
                ..Default::default()
            },
            attenuation: DEFAULT_ATTENUATION,
            transform_stack: vec![Mat4::IDENTITY],
            vertices: Vec::new(),
            lights: Vec::new(),
            primitives: Vec::new(),
        }
    }

    /// Parse a single line. `line_num` is 1-based and only used for errors.
    pub fn parse_line(&mut self, line_num: usize, line: &str) -> ParseResult<()> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(());
        }

        let mut tokens = trimmed.split_whitespace();
        let Some(command) = tokens.next() else {
            return Ok(());
        };
        let args = Args {
            line: line_num,
            command,
            tokens: tokens.collect(),
        };

        match command {
            "size" => {
                let [width, height] = args.integers()?;
                if width == 0 || height == 0 {
                    return Err(args.error("image size must be non-zero"));
                }
                self.size = Some((width, height));
            }
            "camera" => {
                let [ex, ey, ez, cx, cy, cz, ux, uy, uz, fov_y] = args.floats()?;
                if !(fov_y > 0.0 && fov_y < 180.0) {
                    return Err(args.error("field of view must be between 0 and 180 degrees"));
                }
                self.camera = Some(CameraDesc {
                    eye: Vec3::new(ex, ey, ez),
                    center: Vec3::new(cx, cy, cz),
                    up: Vec3::new(ux, uy, uz),
                    fov_y,
                    ..Default::default()
                });
            }
            "output" => {
                let [filename] = args.words()?;
                self.output = Some(filename.to_string());
            }
            "maxdepth" => {
                let [depth] = args.integers()?;
                self.max_depth = Some(depth);
            }
            // Capacity hints; the vertex list grows as needed
            "maxverts" | "maxvertnorms" => {
                args.integers::<1>()?;
            }

            "vertex" => {
                let [x, y, z] = args.floats()?;
                self.vertices.push(Vec3::new(x, y, z));
            }
            "tri" => {
                let [i, j, k] = args.integers()?;
                let a = self.vertex(&args, i)?;
                let b = self.vertex(&args, j)?;
                let c = self.vertex(&args, k)?;
                self.add_primitive(&args, Shape::triangle(a, b, c))?;
            }
            "sphere" => {
                let [x, y, z, radius] = args.floats()?;
                if radius <= 0.0 {
                    return Err(args.error("sphere radius must be positive"));
                }
                self.add_primitive(&args, Shape::sphere(Vec3::new(x, y, z), radius))?;
            }

            "ambient" => self.material.ambient = args.color()?,
            "diffuse" => self.material.diffuse = args.color()?,
            "specular" => self.material.specular = args.color()?,
            "emission" => self.material.emission = args.color()?,
            "shininess" => {
                let [shininess] = args.floats()?;
                if shininess < 0.0 {
                    return Err(args.error("shininess must not be negative"));
                }
                self.material.shininess = shininess;
            }

            "attenuation" => {
                let [c0, c1, c2] = args.floats()?;
                self.attenuation = Vec3::new(c0, c1, c2);
            }
            "point" => {
                let [x, y, z, r, g, b] = args.floats()?;
                self.lights.push(Light::point(
                    Vec3::new(x, y, z),
                    Vec3::new(r, g, b),
                    self.attenuation,
                ));
            }
            "directional" => {
                let [x, y, z, r, g, b] = args.floats()?;
                let direction = Vec3::new(x, y, z);
                if direction == Vec3::ZERO {
                    return Err(args.error("directional light needs a non-zero direction"));
                }
                self.lights.push(Light::directional(direction, Vec3::new(r, g, b)));
            }

            "pushTransform" => {
                args.none()?;
                self.transform_stack.push(*self.top());
            }
            "popTransform" => {
                args.none()?;
                if self.transform_stack.len() > 1 {
                    self.transform_stack.pop();
                } else {
                    log::warn!("line {}: popTransform on an empty stack ignored", line_num);
                }
            }
            "translate" => {
                let [x, y, z] = args.floats()?;
                self.right_multiply(Mat4::from_translation(Vec3::new(x, y, z)));
            }
            "rotate" => {
                let [x, y, z, degrees] = args.floats()?;
                let axis = Vec3::new(x, y, z).normalize_or_zero();
                if axis == Vec3::ZERO {
                    return Err(args.error("rotation axis must be non-zero"));
                }
                self.right_multiply(Mat4::from_axis_angle(axis, degrees.to_radians()));
            }
            "scale" => {
                let [x, y, z] = args.floats()?;
                self.right_multiply(Mat4::from_scale(Vec3::new(x, y, z)));
            }

            unknown => {
                log::warn!("line {}: skipping unknown command `{}`", line_num, unknown);
            }
        }

        Ok(())
    }

    /// Validate the collected state and produce the scene.
    pub fn finish(self, name: &str) -> ParseResult<Scene> {
        let (width, height) = self.size.ok_or(ParseError::MissingCommand("size"))?;
        let camera = self.camera.ok_or(ParseError::MissingCommand("camera"))?;

        let mut scene = Scene::new(
            name,
            CameraDesc {
                width,
                height,
                ..camera
            },
        );
        scene.lights = self.lights;
        scene.primitives = self.primitives;
        scene.max_depth = self.max_depth;
        scene.output = self.output.map(Into::into);
        Ok(scene)
    }

    fn top(&self) -> &Mat4 {
        // The identity at the bottom is never popped
        &self.transform_stack[self.transform_stack.len() - 1]
    }

    fn right_multiply(&mut self, matrix: Mat4) {
        if let Some(top) = self.transform_stack.last_mut() {
            *top *= matrix;
        }
    }

    fn vertex(&self, args: &Args<'_>, index: u32) -> ParseResult<Vec3> {
        self.vertices.get(index as usize).copied().ok_or_else(|| {
            args.error(format!(
                "vertex index {} out of range ({} vertices defined)",
                index,
                self.vertices.len()
            ))
        })
    }

    fn add_primitive(&mut self, args: &Args<'_>, shape: Shape) -> ParseResult<()> {
        let primitive = Primitive::new(shape, self.material, *self.top());
        if !primitive.transform.is_invertible() {
            return Err(args.error("current transform is singular"));
        }
        self.primitives.push(primitive);
        Ok(())
    }
}

/// The arguments of one command line.
struct Args<'a> {
    line: usize,
    command: &'a str,
    tokens: Vec<&'a str>,
}

impl<'a> Args<'a> {
    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::Parse {
            line: self.line,
            message: format!("{}: {}", self.command, message.into()),
        }
    }

    fn words<const N: usize>(&self) -> ParseResult<[&'a str; N]> {
        <[&str; N]>::try_from(self.tokens.as_slice()).map_err(|_| {
            self.error(format!(
                "expected {} argument(s), found {}",
                N,
                self.tokens.len()
            ))
        })
    }

    fn none(&self) -> ParseResult<()> {
        self.words::<0>().map(|_| ())
    }

    fn floats<const N: usize>(&self) -> ParseResult<[f32; N]> {
        let words = self.words::<N>()?;
        let mut values = [0.0; N];
        for (value, token) in values.iter_mut().zip(words) {
            *value = token
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| self.invalid_number(token))?;
        }
        Ok(values)
    }

    fn integers<const N: usize>(&self) -> ParseResult<[u32; N]> {
        let words = self.words::<N>()?;
        let mut values = [0; N];
        for (value, token) in values.iter_mut().zip(words) {
            *value = token
                .parse::<u32>()
                .map_err(|_| self.invalid_number(token))?;
        }
        Ok(values)
    }

    fn color(&self) -> ParseResult<Vec3> {
        let [r, g, b] = self.floats()?;
        Ok(Vec3::new(r, g, b))
    }

    fn invalid_number(&self, token: &str) -> ParseError {
        ParseError::InvalidNumber {
            line: self.line,
            token: token.to_string(),
        }
    }
}
