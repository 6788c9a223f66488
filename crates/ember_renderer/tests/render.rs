//! End-to-end render properties: determinism and energy bookkeeping.

use std::sync::Arc;

use ember_core::RenderSettings;
use ember_renderer::{
    make_box, render, render_serial, render_with_bucket_size, BvhNode, Camera, Color,
    ConstantMedium, Dielectric, DiffuseLight, HittableList, Lambertian, Material, Metal, Quad,
    Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn small_settings(seed: u64) -> RenderSettings {
    RenderSettings {
        aspect_ratio: 1.5,
        image_width: 48,
        samples_per_pixel: 4,
        max_depth: 6,
        vfov: 40.0,
        look_from: Vec3::new(0.0, 1.0, 6.0),
        look_at: Vec3::new(0.0, 0.5, 0.0),
        background: Color::new(0.7, 0.8, 1.0),
        seed,
        ..Default::default()
    }
}

fn mixed_scene() -> BvhNode {
    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(Color::splat(0.5))),
    )));
    world.add(Arc::new(Sphere::new(Vec3::new(-1.2, 0.5, 0.0), 0.5, Arc::new(Dielectric::new(1.5)))));
    world.add(Arc::new(Sphere::new(
        Vec3::new(1.2, 0.5, 0.0),
        0.5,
        Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3)),
    )));
    let boundary = Arc::new(Sphere::new(
        Vec3::new(0.0, 0.5, 0.0),
        0.5,
        Arc::new(Dielectric::new(1.5)),
    ));
    world.add(Arc::new(ConstantMedium::new(boundary, 2.0, Color::splat(0.9))));
    BvhNode::from_list(world)
}

#[test]
fn parallel_render_is_idempotent_for_fixed_seed() {
    let world = mixed_scene();
    let camera = Camera::new(small_settings(11)).unwrap();

    let first = render(&camera, &world);
    let second = render(&camera, &world);
    assert_eq!(first.to_rgb8(), second.to_rgb8());
    assert_eq!(first.pixels.len(), 48 * 32);
}

#[test]
fn custom_bucket_size_is_deterministic() {
    let world = mixed_scene();
    let camera = Camera::new(small_settings(11)).unwrap();

    let a = render_with_bucket_size(&camera, &world, 16);
    let b = render_with_bucket_size(&camera, &world, 16);
    assert_eq!(a, b);
    assert_eq!((a.width, a.height), (48, 32));
}

#[test]
fn serial_render_is_idempotent_for_fixed_seed() {
    let world = mixed_scene();
    let camera = Camera::new(small_settings(0)).unwrap();

    let first = render_serial(&camera, &world, &mut StdRng::seed_from_u64(99));
    let second = render_serial(&camera, &world, &mut StdRng::seed_from_u64(99));
    assert_eq!(first, second);
}

#[test]
fn different_seeds_give_different_noise() {
    let world = mixed_scene();
    let a = render(&Camera::new(small_settings(1)).unwrap(), &world);
    let b = render(&Camera::new(small_settings(2)).unwrap(), &world);
    assert_ne!(a.pixels, b.pixels);
}

#[test]
fn black_scene_has_radiance_only_at_emitters() {
    let black: Arc<dyn Material> = Arc::new(Lambertian::new(Color::ZERO));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(3.0)));

    let mut world = HittableList::new();
    world.add(Arc::new(make_box(Vec3::splat(-1.0), Vec3::splat(1.0), black.clone())));
    world.add(Arc::new(Quad::new(
        Vec3::new(-5.0, -5.0, -3.0),
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(0.0, 10.0, 0.0),
        black,
    )));
    // Zero-radius light: never hit, contributes nothing.
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 0.0, light.clone())));
    // A visible emitter in the upper right of the frame.
    world.add(Arc::new(Quad::new(
        Vec3::new(1.5, 1.5, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        light,
    )));
    let world = BvhNode::from_list(world);

    let camera = Camera::new(RenderSettings {
        aspect_ratio: 1.0,
        image_width: 32,
        samples_per_pixel: 8,
        max_depth: 8,
        vfov: 60.0,
        look_from: Vec3::new(0.0, 0.0, 8.0),
        look_at: Vec3::ZERO,
        background: Color::ZERO,
        seed: 3,
        ..Default::default()
    })
    .unwrap();

    let image = render(&camera, &world);

    let mut lit = 0;
    for y in 0..image.height {
        for x in 0..image.width {
            let color = image.get(x, y);
            // The only non-zero values come from directly seen emitter samples.
            assert!(color.min_element() >= 0.0);
            if color != Color::ZERO {
                lit += 1;
                assert!(x >= image.width / 2 && y < image.height / 2, "radiance at ({}, {})", x, y);
                assert!(color.max_element() <= 3.0 + 1e-4);
            }
        }
    }
    assert!(lit > 0);
}
