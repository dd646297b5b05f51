//! End-to-end shading checks on small hand-built scenes.

use grit_core::{parse_scene, Light, Material, Primitive, Shape, DEFAULT_EPSILON_BIAS};
use grit_math::Vec3;
use grit_renderer::{
    build_index, render, CancelToken, IndexKind, RenderConfig, RenderScene, Tracer,
};

fn red_sphere(material: Material) -> Primitive {
    Primitive::untransformed(Shape::sphere(Vec3::new(0.0, 0.0, -5.0), 1.0), material)
}

fn origin_light() -> Light {
    Light::point(Vec3::ZERO, Vec3::ONE, Vec3::new(1.0, 0.0, 0.0))
}

fn tracer(primitives: Vec<Primitive>, lights: Vec<Light>, kind: IndexKind) -> Tracer {
    Tracer::new(build_index(primitives, kind), lights, DEFAULT_EPSILON_BIAS)
}

#[test]
fn test_lit_red_sphere() {
    for kind in [IndexKind::Linear, IndexKind::Grid] {
        let tracer = tracer(
            vec![red_sphere(Material::diffuse(Vec3::X))],
            vec![origin_light()],
            kind,
        );

        let fragment = tracer
            .index()
            .nearest_hit(&grit_math::Ray::new(Vec3::ZERO, -Vec3::Z), f32::INFINITY)
            .unwrap();
        assert!((fragment.position - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-4);

        let color = tracer.trace(Vec3::ZERO, -Vec3::Z, 5);
        assert!(color.x > 0.0, "{kind}");
        assert_eq!(color.y, 0.0);
        assert_eq!(color.z, 0.0);
    }
}

#[test]
fn test_wall_blocks_point_light() {
    let material = Material::diffuse(Vec3::X)
        .with_ambient(Vec3::new(0.1, 0.0, 0.0))
        .with_emission(Vec3::new(0.0, 0.0, 0.2));
    let wall = Primitive::untransformed(
        Shape::triangle(
            Vec3::new(-10.0, -10.0, -2.0),
            Vec3::new(10.0, -10.0, -2.0),
            Vec3::new(0.0, 10.0, -2.0),
        ),
        Material::default(),
    );

    for kind in [IndexKind::Linear, IndexKind::Grid] {
        let tracer = tracer(
            vec![red_sphere(material), wall.clone()],
            vec![origin_light()],
            kind,
        );

        // Look at the sphere from between the wall and the sphere
        let color = tracer.trace(Vec3::new(0.0, 0.0, -3.0), -Vec3::Z, 5);
        assert!((color - Vec3::new(0.1, 0.0, 0.2)).length() < 1e-6, "{kind}: {color:?}");
    }
}

#[test]
fn test_zero_depth_has_no_reflection() {
    let mirror_sphere = red_sphere(Material::default().with_specular(Vec3::ONE, 50.0));
    let glowing_backdrop = Primitive::untransformed(
        Shape::triangle(
            Vec3::new(-20.0, -20.0, 5.0),
            Vec3::new(20.0, -20.0, 5.0),
            Vec3::new(0.0, 20.0, 5.0),
        ),
        Material::default().with_emission(Vec3::new(0.0, 1.0, 0.0)),
    );
    let tracer = tracer(vec![mirror_sphere, glowing_backdrop], Vec::new(), IndexKind::Grid);

    // Straight back along the normal into the backdrop behind the eye
    assert_eq!(tracer.trace(Vec3::ZERO, -Vec3::Z, 0), Vec3::ZERO);
    let reflected = tracer.trace(Vec3::ZERO, -Vec3::Z, 1);
    assert!((reflected - Vec3::Y).length() < 1e-6);
}

#[test]
fn test_degenerate_triangle_is_invisible() {
    let sliver = Primitive::untransformed(
        Shape::triangle(
            Vec3::new(-1.0, 0.0, -3.0),
            Vec3::new(0.0, 0.0, -3.0),
            Vec3::new(1.0, 0.0, -3.0),
        ),
        Material::default().with_emission(Vec3::ONE),
    );
    let tracer = tracer(vec![sliver], Vec::new(), IndexKind::Grid);
    assert_eq!(tracer.trace(Vec3::ZERO, -Vec3::Z, 5), Vec3::ZERO);
}

const FLOOR_SCENE: &str = "\
size 16 12
camera 0 1 6 0 0 0 0 1 0 45
maxdepth 2
ambient 0.1 0.1 0.1
point 0 4 4 1 1 1
diffuse 0.8 0.2 0.2
specular 0.3 0.3 0.3
pushTransform
translate 0 0.5 0
sphere 0 0 0 0.5
popTransform
maxverts 4
vertex -3 0 -3
vertex 3 0 -3
vertex 3 0 3
vertex -3 0 3
diffuse 0.5 0.5 0.5
specular 0 0 0
tri 0 2 1
tri 0 3 2
";

#[test]
fn test_parsed_scene_renders_identically_with_both_indices() {
    let render_with = |kind| {
        let scene = parse_scene(FLOOR_SCENE, "floor").unwrap();
        let config = RenderConfig::default().with_index(kind).with_bucket_size(5);
        let scene = RenderScene::new(scene, &config);
        render(&scene, &config, &CancelToken::new()).unwrap()
    };

    let linear = render_with(IndexKind::Linear);
    let grid = render_with(IndexKind::Grid);

    assert_eq!(grid.width, 16);
    assert_eq!(grid.height, 12);
    assert_eq!(linear.to_rgb8(), grid.to_rgb8());
    assert!(grid.pixels.iter().any(|c| c.length() > 0.0));
}
