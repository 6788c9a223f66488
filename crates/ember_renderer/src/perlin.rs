//! Perlin gradient noise with turbulence.

use crate::sampling::random_vec3;
use ember_math::{Point3, Vec3};
use rand::seq::SliceRandom;
use rand::RngCore;

const POINT_COUNT: usize = 256;

/// Lattice of random unit gradients addressed through three permutation tables.
pub struct Perlin {
    gradients: Vec<Vec3>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let gradients = (0..POINT_COUNT)
            .map(|_| random_gradient(rng))
            .collect();

        Self {
            gradients,
            perm_x: generate_perm(rng),
            perm_y: generate_perm(rng),
            perm_z: generate_perm(rng),
        }
    }

    /// Smooth noise in roughly [-1, 1].
    pub fn noise(&self, p: Point3) -> f32 {
        let floor = p.floor();
        let frac = p - floor;

        let i = floor.x as i32;
        let j = floor.y as i32;
        let k = floor.z as i32;

        let mut c = [[[Vec3::ZERO; 2]; 2]; 2];
        for (di, plane) in c.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, cell) in row.iter_mut().enumerate() {
                    let index = self.perm_x[((i + di as i32) & 255) as usize]
                        ^ self.perm_y[((j + dj as i32) & 255) as usize]
                        ^ self.perm_z[((k + dk as i32) & 255) as usize];
                    *cell = self.gradients[index];
                }
            }
        }

        perlin_interp(&c, frac)
    }

    /// Sum of `depth` octaves of noise, each at double the frequency and
    /// half the weight of the last. Always non-negative.
    pub fn turb(&self, p: Point3, depth: u32) -> f32 {
        let mut accum = 0.0;
        let mut temp_p = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(temp_p);
            weight *= 0.5;
            temp_p *= 2.0;
        }

        accum.abs()
    }
}

fn random_gradient(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let v = random_vec3(rng, -1.0, 1.0);
        if v.length_squared() > 1e-12 {
            return v.normalize();
        }
    }
}

/// Identity permutation of 0..256, shuffled.
fn generate_perm(rng: &mut dyn RngCore) -> Vec<usize> {
    let mut p: Vec<usize> = (0..POINT_COUNT).collect();
    p.shuffle(rng);
    p
}

/// Trilinear interpolation of gradient dot products with Hermite smoothing.
fn perlin_interp(c: &[[[Vec3; 2]; 2]; 2], frac: Vec3) -> f32 {
    let (u, v, w) = (frac.x, frac.y, frac.z);
    let uu = u * u * (3.0 - 2.0 * u);
    let vv = v * v * (3.0 - 2.0 * v);
    let ww = w * w * (3.0 - 2.0 * w);

    let mut accum = 0.0;
    for (i, plane) in c.iter().enumerate() {
        let fi = i as f32;
        for (j, row) in plane.iter().enumerate() {
            let fj = j as f32;
            for (k, gradient) in row.iter().enumerate() {
                let fk = k as f32;
                let weight = Vec3::new(u - fi, v - fj, w - fk);
                accum += (fi * uu + (1.0 - fi) * (1.0 - uu))
                    * (fj * vv + (1.0 - fj) * (1.0 - vv))
                    * (fk * ww + (1.0 - fk) * (1.0 - ww))
                    * gradient.dot(weight);
            }
        }
    }

    accum
}
