//! Ember renderer - CPU path tracing
//!
//! A Monte Carlo path tracer: spheres, quads, boxes and participating media
//! behind a BVH, shaded with textured diffuse, metal, glass and emissive
//! materials, rendered in parallel buckets.

mod bucket;
mod bvh;
mod camera;
mod constant_medium;
mod hittable;
mod instance;
mod material;
mod perlin;
mod quad;
mod renderer;
pub mod sampling;
mod sphere;
mod texture;

pub use bucket::{
    bucket_seed, generate_buckets, render, render_bucket, render_with_bucket_size, Bucket,
    BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use bvh::BvhNode;
pub use camera::Camera;
pub use constant_medium::ConstantMedium;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use instance::{Rotate, Translate};
pub use material::{
    cannot_refract, reflect, reflectance, refract, Dielectric, DiffuseLight, Isotropic,
    Lambertian, Material, Metal, ScatterResult,
};
pub use perlin::Perlin;
pub use quad::{make_box, Quad};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, render_pixel, render_serial, ImageBuffer,
    SHADOW_ACNE_EPSILON,
};
pub use sphere::Sphere;
pub use texture::{
    CheckerTexture, ImageTexture, NoiseTexture, SolidColor, Texture, NO_IMAGE_COLOR,
};

/// Re-export common math types from ember_math
pub use ember_math::{Aabb, Color, Interval, Point3, Ray, Vec3};
