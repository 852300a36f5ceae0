use glam::{Vec3, Vec4};

use crate::constants::{HUE_HIGH_VALENCE, HUE_LOW_VALENCE};

/// Base hue in degrees for a valence in [0, 1]: cool when low, warm when high.
#[inline]
pub fn hue_for_valence(valence: f32) -> f32 {
    let v = valence.clamp(0.0, 1.0);
    HUE_LOW_VALENCE + (HUE_HIGH_VALENCE - HUE_LOW_VALENCE) * v
}

/// HSL (degrees, 0..1, 0..1) to linear-ish RGB in [0, 1].
pub fn hsl_to_rgb(hue_deg: f32, saturation: f32, lightness: f32) -> Vec3 {
    let h = hue_deg.rem_euclid(360.0) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c * 0.5;
    Vec3::new(r + m, g + m, b + m)
}

#[inline]
pub fn hsla(hue_deg: f32, saturation: f32, lightness: f32, alpha: f32) -> Vec4 {
    hsl_to_rgb(hue_deg, saturation, lightness).extend(alpha.clamp(0.0, 1.0))
}

/// CSS `rgba()` string for canvas-style painters.
pub fn css_rgba(c: Vec4) -> String {
    let to8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("rgba({},{},{},{:.3})", to8(c.x), to8(c.y), to8(c.z), c.w.clamp(0.0, 1.0))
}
