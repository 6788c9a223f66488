//! Simple path tracer example.
//!
//! Builds a small Cornell box through the library API, renders it on all
//! cores and saves a plain-text PPM.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Arc;

use ember_core::RenderSettings;
use ember_renderer::{
    color_to_rgb8, make_box, render, BvhNode, Camera, Color, DiffuseLight, HittableList,
    ImageBuffer, Lambertian, Material, Quad, Rotate, Translate, Vec3,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Ember Path Tracer - Simple Example");
    println!("==================================");

    let start = std::time::Instant::now();
    let world = build_scene();
    println!("Scene built in {:?}", start.elapsed());

    let camera = Camera::new(RenderSettings {
        aspect_ratio: 1.0,
        image_width: 200,
        samples_per_pixel: 32,
        max_depth: 10,
        vfov: 40.0,
        look_from: Vec3::new(278.0, 278.0, -800.0),
        look_at: Vec3::new(278.0, 278.0, 0.0),
        ..Default::default()
    })?;

    println!(
        "Rendering {}x{} @ {} spp...",
        camera.image_width(),
        camera.image_height(),
        camera.settings().samples_per_pixel
    );

    let start = std::time::Instant::now();
    let image = render(&camera, &world);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_ppm(&image, filename)?;
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> BvhNode {
    let red: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.73)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(15.0)));

    let mut world = HittableList::new();
    let walls = [
        (Vec3::new(555.0, 0.0, 0.0), Vec3::new(0.0, 555.0, 0.0), Vec3::new(0.0, 0.0, 555.0), green),
        (Vec3::ZERO, Vec3::new(0.0, 555.0, 0.0), Vec3::new(0.0, 0.0, 555.0), red),
        (Vec3::new(343.0, 554.0, 332.0), Vec3::new(-130.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -105.0), light),
        (Vec3::ZERO, Vec3::new(555.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 555.0), white.clone()),
        (Vec3::splat(555.0), Vec3::new(-555.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -555.0), white.clone()),
        (Vec3::new(0.0, 0.0, 555.0), Vec3::new(555.0, 0.0, 0.0), Vec3::new(0.0, 555.0, 0.0), white.clone()),
    ];
    for (q, u, v, material) in walls {
        world.add(Arc::new(Quad::new(q, u, v, material)));
    }

    let tall = Arc::new(make_box(Vec3::ZERO, Vec3::new(165.0, 330.0, 165.0), white));
    let tall = Arc::new(Rotate::y(tall, 15.0));
    world.add(Arc::new(Translate::new(tall, Vec3::new(265.0, 0.0, 295.0))));

    println!("Created {} objects", world.len());
    BvhNode::from_list(world)
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let [r, g, b] = color_to_rgb8(image.get(x, y));
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    writer.flush()
}
