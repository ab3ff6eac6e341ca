//! Classic 3D Perlin noise, matching `cnoise` in the water vertex shader.
//!
//! This is the periodic-permutation variant (hash by `(34x + 1)x mod 289`),
//! so the CPU and GPU sample the same field.

use glam::{Vec3, Vec4};

fn mod289(x: Vec4) -> Vec4 {
    x - (x / 289.0).floor() * 289.0
}

fn mod289_3(x: Vec3) -> Vec3 {
    x - (x / 289.0).floor() * 289.0
}

fn permute(x: Vec4) -> Vec4 {
    mod289((x * 34.0 + 1.0) * x)
}

fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    Vec4::splat(1.792_842_9) - r * 0.853_734_7
}

fn fade(t: Vec3) -> Vec3 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn fract(x: Vec4) -> Vec4 {
    x - x.floor()
}

// GLSL step(edge, x): 1 where x >= edge
fn step(edge: Vec4, x: Vec4) -> Vec4 {
    Vec4::select(x.cmpge(edge), Vec4::ONE, Vec4::ZERO)
}

fn gradients(ixy: Vec4) -> (Vec4, Vec4, Vec4) {
    let gx = ixy / 7.0;
    let gy = fract(gx.floor() / 7.0) - 0.5;
    let gx = fract(gx);
    let gz = Vec4::splat(0.5) - gx.abs() - gy.abs();
    let sz = step(gz, Vec4::ZERO);
    let gx = gx - sz * (step(Vec4::ZERO, gx) - 0.5);
    let gy = gy - sz * (step(Vec4::ZERO, gy) - 0.5);
    (gx, gy, gz)
}

/// Sample classic Perlin noise. Roughly in [-1, 1], exactly 0 on integer lattice points.
pub fn classic_3d(p: Vec3) -> f32 {
    let pi0 = mod289_3(p.floor());
    let pi1 = mod289_3(p.floor() + Vec3::ONE);
    let pf0 = p - p.floor();
    let pf1 = pf0 - Vec3::ONE;

    let ix = Vec4::new(pi0.x, pi1.x, pi0.x, pi1.x);
    let iy = Vec4::new(pi0.y, pi0.y, pi1.y, pi1.y);
    let iz0 = Vec4::splat(pi0.z);
    let iz1 = Vec4::splat(pi1.z);

    let ixy = permute(permute(ix) + iy);
    let ixy0 = permute(ixy + iz0);
    let ixy1 = permute(ixy + iz1);

    let (gx0, gy0, gz0) = gradients(ixy0);
    let (gx1, gy1, gz1) = gradients(ixy1);

    let mut g000 = Vec3::new(gx0.x, gy0.x, gz0.x);
    let mut g100 = Vec3::new(gx0.y, gy0.y, gz0.y);
    let mut g010 = Vec3::new(gx0.z, gy0.z, gz0.z);
    let mut g110 = Vec3::new(gx0.w, gy0.w, gz0.w);
    let mut g001 = Vec3::new(gx1.x, gy1.x, gz1.x);
    let mut g101 = Vec3::new(gx1.y, gy1.y, gz1.y);
    let mut g011 = Vec3::new(gx1.z, gy1.z, gz1.z);
    let mut g111 = Vec3::new(gx1.w, gy1.w, gz1.w);

    let norm0 = taylor_inv_sqrt(Vec4::new(
        g000.dot(g000),
        g010.dot(g010),
        g100.dot(g100),
        g110.dot(g110),
    ));
    g000 *= norm0.x;
    g010 *= norm0.y;
    g100 *= norm0.z;
    g110 *= norm0.w;

    let norm1 = taylor_inv_sqrt(Vec4::new(
        g001.dot(g001),
        g011.dot(g011),
        g101.dot(g101),
        g111.dot(g111),
    ));
    g001 *= norm1.x;
    g011 *= norm1.y;
    g101 *= norm1.z;
    g111 *= norm1.w;

    let n000 = g000.dot(pf0);
    let n100 = g100.dot(Vec3::new(pf1.x, pf0.y, pf0.z));
    let n010 = g010.dot(Vec3::new(pf0.x, pf1.y, pf0.z));
    let n110 = g110.dot(Vec3::new(pf1.x, pf1.y, pf0.z));
    let n001 = g001.dot(Vec3::new(pf0.x, pf0.y, pf1.z));
    let n101 = g101.dot(Vec3::new(pf1.x, pf0.y, pf1.z));
    let n011 = g011.dot(Vec3::new(pf0.x, pf1.y, pf1.z));
    let n111 = g111.dot(pf1);

    let f = fade(pf0);
    let n_z = Vec4::new(n000, n100, n010, n110).lerp(Vec4::new(n001, n101, n011, n111), f.z);
    let n_yz_x = n_z.x + (n_z.z - n_z.x) * f.y;
    let n_yz_y = n_z.y + (n_z.w - n_z.y) * f.y;
    let n_xyz = n_yz_x + (n_yz_y - n_yz_x) * f.x;

    2.2 * n_xyz
}
