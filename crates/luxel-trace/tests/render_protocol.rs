//! End-to-end shading queries: primary ray, nearest hit, shadow ray, lights.

use approx::assert_abs_diff_eq;
use luxel_math::Vector3;
use luxel_trace::{
    closest_hit, Directional, Light, LightSource, Object, Plane, Punctual, Ray, Shape, Sphere,
    Surface, Triangle,
};

type SceneObject = Object<String, [u8; 3]>;

fn scene() -> Vec<SceneObject> {
    vec![
        Object::new(
            Shape::from(Plane::from_coefficients(Vector3::new(0.0, 1.0, 0.0), -5.0)),
            "floor".to_string(),
            [128, 128, 128],
        ),
        Object::new(
            Shape::from(Sphere::new(Vector3::new(0.0, 0.0, -10.0), 2.0)),
            "ball".to_string(),
            [255, 0, 0],
        ),
        Object::new(
            Shape::from(Triangle::new(
                Vector3::new(2.0, 0.0, -3.0),
                Vector3::new(4.0, 0.0, -3.0),
                Vector3::new(2.0, 2.0, -3.0),
            )),
            "panel".to_string(),
            [0, 255, 0],
        ),
    ]
}

fn lights() -> Vec<Light> {
    vec![
        Punctual::new(1.0, Vector3::new(0.0, 10.0, 0.0)).into(),
        Directional::new(
            0.5,
            Vector3::new(-1.0, 10.0, 0.0),
            Vector3::new(1.0, 10.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
        )
        .into(),
    ]
}

#[test]
fn floor_point_is_lit_by_both_lights() {
    let objects = scene();
    let camera = Ray::primary(Vector3::zero(), Vector3::new(0.0, -1.0, 0.0));

    let hit = closest_hit(&objects, &camera).unwrap();
    assert_eq!(objects[hit.index].material(), "floor");
    assert_eq!(hit.point, Vector3::new(0.0, -5.0, 0.0));
    assert_eq!(hit.normal, Vector3::new(0.0, 1.0, 0.0));
    assert_abs_diff_eq!(hit.distance, 5.0, epsilon = 1e-12);

    let target = Vector3::new(0.0, 10.0, 0.0);
    let shadow = objects[hit.index].secondary_ray(hit.point, target);
    assert!(shadow.is_secondary());
    assert_eq!(shadow.direction(), Vector3::new(0.0, 15.0, 0.0));

    for light in lights() {
        assert!(light.is_lit(&shadow));
        assert_eq!(light.origin(&shadow), Some(target));
    }

    let lights = lights();
    assert_eq!(lights[0].direction(&shadow), Vector3::new(0.0, 15.0, 0.0));
    assert_eq!(lights[1].direction(&shadow), Vector3::new(0.0, 4.0, 0.0));
}

#[test]
fn sphere_point_above_emission_anchor() {
    let objects = scene();
    let camera = Ray::primary(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));

    let hit = closest_hit(&objects, &camera).unwrap();
    assert_eq!(objects[hit.index].material(), "ball");
    assert_eq!(hit.point, Vector3::new(0.0, 0.0, -8.0));
    assert_eq!(hit.normal, Vector3::new(0.0, 0.0, 2.0));
    assert_abs_diff_eq!(hit.distance, 8.0, epsilon = 1e-12);

    let lights = lights();
    let shadow = objects[hit.index].secondary_ray(hit.point, Vector3::new(0.0, 10.0, 0.0));
    assert!(lights[0].is_lit(&shadow));

    // The segment solve succeeds, but y = 0 lies above the anchor at y = -1.
    assert!(!lights[1].is_lit(&shadow));
    assert_eq!(lights[1].origin(&shadow), None);
}

#[test]
fn triangle_in_front_of_floor() {
    let objects = scene();
    let camera = Ray::primary(Vector3::zero(), Vector3::new(2.5, 0.5, -3.0));

    let hit = closest_hit(&objects, &camera).unwrap();
    assert_eq!(objects[hit.index].material(), "panel");
    assert_eq!(*objects[hit.index].color(), [0, 255, 0]);
    assert_eq!(hit.point, Vector3::new(2.5, 0.5, -3.0));
    assert_eq!(hit.normal, Vector3::new(0.0, 0.0, 4.0));
}

#[test]
fn primary_rays_never_reach_lights() {
    let camera = Ray::primary(Vector3::new(0.0, -5.0, 0.0), Vector3::new(0.0, 15.0, 0.0));
    for light in lights() {
        assert!(!light.is_lit(&camera));
        assert_eq!(light.origin(&camera), None);
    }
}

#[test]
fn empty_scene_has_no_hit() {
    let objects: Vec<SceneObject> = Vec::new();
    let camera = Ray::primary(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));
    assert!(closest_hit(&objects, &camera).is_none());
}

#[test]
fn scene_loads_from_json() {
    let json = r#"{
        "objects": [
            { "shape": { "type": "plane", "normal": [0.0, 1.0, 0.0], "d": -5.0 },
              "material": "floor", "color": [128, 128, 128] },
            { "shape": { "type": "sphere", "center": [0.0, 0.0, -10.0], "radius": 2.0 },
              "material": "ball", "color": [255, 0, 0] },
            { "shape": { "type": "triangle", "a": [2.0, 0.0, -3.0], "b": [4.0, 0.0, -3.0],
                         "c": [2.0, 2.0, -3.0] },
              "material": "panel", "color": [0, 255, 0] }
        ],
        "lights": [
            { "type": "punctual", "intensity": 1.0, "origin": [0.0, 10.0, 0.0] },
            { "type": "directional", "intensity": 0.5, "origin_a": [-1.0, 10.0, 0.0],
              "origin_b": [1.0, 10.0, 0.0], "direction": [0.0, -1.0, 0.0] }
        ]
    }"#;

    #[derive(serde::Deserialize)]
    struct Scene {
        objects: Vec<SceneObject>,
        lights: Vec<Light>,
    }

    let loaded: Scene = serde_json::from_str(json).unwrap();
    assert_eq!(loaded.objects, scene());
    assert_eq!(loaded.lights, lights());
}
