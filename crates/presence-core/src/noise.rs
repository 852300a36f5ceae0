//! Deterministic 1D value noise used for particle turbulence.

/// Hermite smoothstep `3t² − 2t³`, with `t` clamped to [0, 1].
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lattice(i: i64) -> f32 {
    // integer avalanche hash (lowbias32)
    let mut h = (i as u32) ^ ((i >> 32) as u32).wrapping_mul(0x9E37_79B9);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7FEB_352D);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846C_A68B);
    h ^= h >> 16;
    h as f32 / u32::MAX as f32
}

/// Smooth pseudo-random value in [0, 1], continuous in `x`.
///
/// Pure: the same `x` always yields the same value. The slope is bounded by
/// 1.5 (the peak slope of smoothstep times a unit lattice gap).
pub fn noise1(x: f32) -> f32 {
    if !x.is_finite() {
        return 0.5;
    }
    let xf = x.floor();
    let i = xf as i64;
    let t = smoothstep(x - xf);
    let a = lattice(i);
    let b = lattice(i.wrapping_add(1));
    a + (b - a) * t
}
