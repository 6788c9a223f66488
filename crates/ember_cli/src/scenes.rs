//! Built-in demo scenes.
//!
//! Each scene supplies its own default render settings and builds its world
//! from a caller-supplied generator, so a seed reproduces the same layout.

use std::sync::Arc;

use ember_core::{ImageCache, RenderSettings};
use ember_renderer::sampling::{gen_f32, gen_range_f32, random_vec3};
use ember_renderer::{
    make_box, BvhNode, CheckerTexture, Color, ConstantMedium, Dielectric, DiffuseLight, Hittable,
    HittableList, ImageTexture, Lambertian, Material, Metal, NoiseTexture, Point3, Quad, Rotate,
    Sphere, Texture, Translate, Vec3,
};
use rand::RngCore;

use crate::cli::SceneName;

/// Image used by the earth and final scenes, found through the image search path.
const EARTH_IMAGE: &str = "earthmap.jpg";

const SKY: Color = Color::new(0.7, 0.8, 1.0);

/// Default settings for a scene, before file and flag overrides.
pub fn default_settings(scene: SceneName) -> RenderSettings {
    let wide = RenderSettings {
        aspect_ratio: 16.0 / 9.0,
        image_width: 400,
        samples_per_pixel: 100,
        max_depth: 50,
        vfov: 20.0,
        look_from: Point3::new(13.0, 2.0, 3.0),
        look_at: Point3::ZERO,
        vup: Vec3::Y,
        defocus_angle: 0.0,
        focus_dist: 10.0,
        background: SKY,
        seed: 0,
    };
    let cornell = RenderSettings {
        aspect_ratio: 1.0,
        image_width: 600,
        samples_per_pixel: 200,
        vfov: 40.0,
        look_from: Point3::new(278.0, 278.0, -800.0),
        look_at: Point3::new(278.0, 278.0, 0.0),
        background: Color::ZERO,
        ..wide.clone()
    };

    match scene {
        SceneName::BouncingSpheres => RenderSettings {
            defocus_angle: 0.6,
            ..wide
        },
        SceneName::CheckeredSpheres | SceneName::PerlinSpheres => wide,
        SceneName::Earth => RenderSettings {
            look_from: Point3::new(0.0, 0.0, 12.0),
            ..wide
        },
        SceneName::Quads => RenderSettings {
            aspect_ratio: 1.0,
            vfov: 80.0,
            look_from: Point3::new(0.0, 0.0, 9.0),
            ..wide
        },
        SceneName::SimpleLight => RenderSettings {
            look_from: Point3::new(26.0, 3.0, 6.0),
            look_at: Point3::new(0.0, 2.0, 0.0),
            background: Color::ZERO,
            ..wide
        },
        SceneName::CornellBox | SceneName::CornellSmoke => cornell,
        SceneName::FinalScene => RenderSettings {
            image_width: 400,
            samples_per_pixel: 250,
            max_depth: 4,
            look_from: Point3::new(478.0, 278.0, -600.0),
            ..cornell
        },
    }
}

/// Build the world for a scene.
pub fn build_world(scene: SceneName, rng: &mut dyn RngCore, images: &mut ImageCache) -> BvhNode {
    let world = match scene {
        SceneName::BouncingSpheres => bouncing_spheres(rng),
        SceneName::CheckeredSpheres => checkered_spheres(),
        SceneName::Earth => earth(images),
        SceneName::PerlinSpheres => perlin_spheres(rng),
        SceneName::Quads => quads(),
        SceneName::SimpleLight => simple_light(rng),
        SceneName::CornellBox => cornell_box(),
        SceneName::CornellSmoke => cornell_smoke(),
        SceneName::FinalScene => final_scene(rng, images),
    };

    log::info!("Scene {:?}: {} top-level objects", scene, world.len());
    BvhNode::from_list(world)
}

fn lambertian(color: Color) -> Arc<dyn Material> {
    Arc::new(Lambertian::new(color))
}

fn textured(texture: Arc<dyn Texture>) -> Arc<dyn Material> {
    Arc::new(Lambertian::textured(texture))
}

fn light(color: Color) -> Arc<dyn Material> {
    Arc::new(DiffuseLight::new(color))
}

fn sphere(center: Point3, radius: f32, material: Arc<dyn Material>) -> Arc<dyn Hittable> {
    Arc::new(Sphere::new(center, radius, material))
}

fn quad(q: Point3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Arc<dyn Hittable> {
    Arc::new(Quad::new(q, u, v, material))
}

fn checker() -> Arc<dyn Texture> {
    Arc::new(CheckerTexture::from_colors(
        0.32,
        Color::new(0.2, 0.3, 0.1),
        Color::splat(0.9),
    ))
}

fn bouncing_spheres(rng: &mut dyn RngCore) -> HittableList {
    let mut world = HittableList::new();
    world.add(sphere(Point3::new(0.0, -1000.0, 0.0), 1000.0, textured(checker())));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Point3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                let albedo = random_vec3(rng, 0.0, 1.0) * random_vec3(rng, 0.0, 1.0);
                let center1 = center + Vec3::new(0.0, gen_range_f32(rng, 0.0, 0.5), 0.0);
                world.add(Arc::new(Sphere::moving(center, center1, 0.2, lambertian(albedo))));
            } else if choose_mat < 0.95 {
                let albedo = random_vec3(rng, 0.5, 1.0);
                let fuzz = gen_range_f32(rng, 0.0, 0.5);
                world.add(sphere(center, 0.2, Arc::new(Metal::new(albedo, fuzz))));
            } else {
                world.add(sphere(center, 0.2, Arc::new(Dielectric::new(1.5))));
            }
        }
    }

    world.add(sphere(Point3::new(0.0, 1.0, 0.0), 1.0, Arc::new(Dielectric::new(1.5))));
    world.add(sphere(Point3::new(-4.0, 1.0, 0.0), 1.0, lambertian(Color::new(0.4, 0.2, 0.1))));
    world.add(sphere(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    ));

    world
}

fn checkered_spheres() -> HittableList {
    let material = textured(checker());
    let mut world = HittableList::new();
    world.add(sphere(Point3::new(0.0, -10.0, 0.0), 10.0, material.clone()));
    world.add(sphere(Point3::new(0.0, 10.0, 0.0), 10.0, material));
    world
}

fn earth(images: &mut ImageCache) -> HittableList {
    let surface = textured(Arc::new(ImageTexture::new(images.get_or_load(EARTH_IMAGE))));
    HittableList::from_object(sphere(Point3::ZERO, 2.0, surface))
}

fn perlin_spheres(rng: &mut dyn RngCore) -> HittableList {
    let marble = textured(Arc::new(NoiseTexture::new(4.0, rng)));
    let mut world = HittableList::new();
    world.add(sphere(Point3::new(0.0, -1000.0, 0.0), 1000.0, marble.clone()));
    world.add(sphere(Point3::new(0.0, 2.0, 0.0), 2.0, marble));
    world
}

fn quads() -> HittableList {
    let mut world = HittableList::new();
    let faces = [
        (Point3::new(-3.0, -2.0, 5.0), Vec3::new(0.0, 0.0, -4.0), Vec3::new(0.0, 4.0, 0.0), Color::new(1.0, 0.2, 0.2)),
        (Point3::new(-2.0, -2.0, 0.0), Vec3::new(4.0, 0.0, 0.0), Vec3::new(0.0, 4.0, 0.0), Color::new(0.2, 1.0, 0.2)),
        (Point3::new(3.0, -2.0, 1.0), Vec3::new(0.0, 0.0, 4.0), Vec3::new(0.0, 4.0, 0.0), Color::new(0.2, 0.2, 1.0)),
        (Point3::new(-2.0, 3.0, 1.0), Vec3::new(4.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 4.0), Color::new(1.0, 0.5, 0.0)),
        (Point3::new(-2.0, -3.0, 5.0), Vec3::new(4.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -4.0), Color::new(0.2, 0.8, 0.8)),
    ];
    for (q, u, v, color) in faces {
        world.add(quad(q, u, v, lambertian(color)));
    }
    world
}

fn simple_light(rng: &mut dyn RngCore) -> HittableList {
    let marble = textured(Arc::new(NoiseTexture::new(4.0, rng)));
    let lamp = light(Color::splat(4.0));

    let mut world = HittableList::new();
    world.add(sphere(Point3::new(0.0, -1000.0, 0.0), 1000.0, marble.clone()));
    world.add(sphere(Point3::new(0.0, 2.0, 0.0), 2.0, marble));
    world.add(sphere(Point3::new(0.0, 7.0, 0.0), 2.0, lamp.clone()));
    world.add(quad(
        Point3::new(3.0, 1.0, -2.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
        lamp,
    ));
    world
}

/// The five walls of the Cornell box, without the light.
fn cornell_walls(world: &mut HittableList, white: &Arc<dyn Material>) {
    let red = lambertian(Color::new(0.65, 0.05, 0.05));
    let green = lambertian(Color::new(0.12, 0.45, 0.15));

    world.add(quad(Point3::new(555.0, 0.0, 0.0), Vec3::new(0.0, 555.0, 0.0), Vec3::new(0.0, 0.0, 555.0), green));
    world.add(quad(Point3::ZERO, Vec3::new(0.0, 555.0, 0.0), Vec3::new(0.0, 0.0, 555.0), red));
    world.add(quad(Point3::ZERO, Vec3::new(555.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 555.0), white.clone()));
    world.add(quad(Point3::splat(555.0), Vec3::new(-555.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -555.0), white.clone()));
    world.add(quad(Point3::new(0.0, 0.0, 555.0), Vec3::new(555.0, 0.0, 0.0), Vec3::new(0.0, 555.0, 0.0), white.clone()));
}

/// A box of the given size rotated about Y and moved into place.
fn placed_box(size: Vec3, degrees: f32, offset: Vec3, material: Arc<dyn Material>) -> Arc<dyn Hittable> {
    let shape = Arc::new(make_box(Point3::ZERO, size, material));
    let shape = Arc::new(Rotate::y(shape, degrees));
    Arc::new(Translate::new(shape, offset))
}

fn cornell_box() -> HittableList {
    let white = lambertian(Color::splat(0.73));
    let mut world = HittableList::new();

    cornell_walls(&mut world, &white);
    world.add(quad(
        Point3::new(343.0, 554.0, 332.0),
        Vec3::new(-130.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -105.0),
        light(Color::splat(15.0)),
    ));

    world.add(placed_box(Vec3::new(165.0, 330.0, 165.0), 15.0, Vec3::new(265.0, 0.0, 295.0), white.clone()));
    world.add(placed_box(Vec3::splat(165.0), -18.0, Vec3::new(130.0, 0.0, 65.0), white));
    world
}

fn cornell_smoke() -> HittableList {
    let white = lambertian(Color::splat(0.73));
    let mut world = HittableList::new();

    cornell_walls(&mut world, &white);
    world.add(quad(
        Point3::new(113.0, 554.0, 127.0),
        Vec3::new(330.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 305.0),
        light(Color::splat(7.0)),
    ));

    let tall = placed_box(Vec3::new(165.0, 330.0, 165.0), 15.0, Vec3::new(265.0, 0.0, 295.0), white.clone());
    let short = placed_box(Vec3::splat(165.0), -18.0, Vec3::new(130.0, 0.0, 65.0), white);
    world.add(Arc::new(ConstantMedium::new(tall, 0.01, Color::ZERO)));
    world.add(Arc::new(ConstantMedium::new(short, 0.01, Color::ONE)));
    world
}

fn final_scene(rng: &mut dyn RngCore, images: &mut ImageCache) -> HittableList {
    let mut world = HittableList::new();

    // Floor of boxes with random heights, grouped under their own BVH
    let ground = lambertian(Color::new(0.48, 0.83, 0.53));
    let boxes_per_side = 20;
    let mut floor = HittableList::new();
    for i in 0..boxes_per_side {
        for j in 0..boxes_per_side {
            let w = 100.0;
            let x0 = -1000.0 + i as f32 * w;
            let z0 = -1000.0 + j as f32 * w;
            let y1 = gen_range_f32(rng, 1.0, 101.0);
            floor.add(Arc::new(make_box(
                Point3::new(x0, 0.0, z0),
                Point3::new(x0 + w, y1, z0 + w),
                ground.clone(),
            )));
        }
    }
    world.add(Arc::new(BvhNode::from_list(floor)));

    world.add(quad(
        Point3::new(123.0, 554.0, 147.0),
        Vec3::new(300.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 265.0),
        light(Color::splat(7.0)),
    ));

    let center0 = Point3::new(400.0, 400.0, 200.0);
    let center1 = center0 + Vec3::new(30.0, 0.0, 0.0);
    world.add(Arc::new(Sphere::moving(
        center0,
        center1,
        50.0,
        lambertian(Color::new(0.7, 0.3, 0.1)),
    )));

    world.add(sphere(Point3::new(260.0, 150.0, 45.0), 50.0, Arc::new(Dielectric::new(1.5))));
    world.add(sphere(
        Point3::new(0.0, 150.0, 145.0),
        50.0,
        Arc::new(Metal::new(Color::new(0.8, 0.8, 0.9), 1.0)),
    ));

    // Glass ball filled with blue fog; the shell is shared with the medium
    let shell = sphere(Point3::new(360.0, 150.0, 145.0), 70.0, Arc::new(Dielectric::new(1.5)));
    world.add(shell.clone());
    world.add(Arc::new(ConstantMedium::new(shell, 0.2, Color::new(0.2, 0.4, 0.9))));

    // Thin haze over the whole scene
    let haze = sphere(Point3::ZERO, 5000.0, Arc::new(Dielectric::new(1.5)));
    world.add(Arc::new(ConstantMedium::new(haze, 0.0001, Color::ONE)));

    let earth = Arc::new(ImageTexture::new(images.get_or_load(EARTH_IMAGE)));
    world.add(sphere(Point3::new(400.0, 200.0, 400.0), 100.0, textured(earth)));

    let marble = Arc::new(NoiseTexture::new(0.2, rng));
    world.add(sphere(Point3::new(220.0, 280.0, 300.0), 80.0, textured(marble)));

    // Cluster of small white spheres
    let white = lambertian(Color::splat(0.73));
    let mut cluster = HittableList::new();
    for _ in 0..1000 {
        cluster.add(sphere(random_vec3(rng, 0.0, 165.0), 10.0, white.clone()));
    }
    let cluster = Arc::new(Rotate::y(Arc::new(BvhNode::from_list(cluster)), 15.0));
    world.add(Arc::new(Translate::new(cluster, Vec3::new(-100.0, 270.0, 395.0))));

    world
}
