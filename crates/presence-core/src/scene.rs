//! Per-frame drawing description handed to the output surface.
//!
//! The engine never touches a drawing API. It fills a [`Scene`] (one radial
//! background gradient plus two passes of soft dots) and the front end turns
//! that into Canvas 2D calls or GPU instances.

use glam::{Vec2, Vec4};

use crate::color::{hsla, hue_for_valence};
use crate::constants::*;
use crate::emotion::EmotionVector;
use crate::field::{ParticleSprite, Viewport};

/// Physical size of the output surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
    /// Physical pixels per CSS/logical pixel.
    pub pixel_ratio: f32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn viewport(&self, base_radius_fraction: f32) -> Viewport {
        let w = self.width as f32;
        let h = self.height as f32;
        let pixel_ratio = if self.pixel_ratio.is_finite() && self.pixel_ratio > 0.0 {
            self.pixel_ratio
        } else {
            1.0
        };
        Viewport {
            center: Vec2::new(w * 0.5, h * 0.5),
            base_radius_px: w.min(h) * base_radius_fraction,
            pixel_ratio,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Vec4,
}

/// Radial gradient filling the whole surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Background {
    pub center: Vec2,
    pub radius: f32,
    pub stops: [GradientStop; 3],
}

impl Background {
    /// Valence picks the hue, energy lifts the inner glow, and a slow
    /// oscillation keeps the hue breathing.
    pub fn derive(
        size: SurfaceSize,
        viewport: &Viewport,
        emotion: EmotionVector,
        energy: f32,
        time: f32,
    ) -> Self {
        let hue = hue_for_valence(emotion.valence())
            + (time * HUE_BREATH_RATE).sin() * HUE_BREATH_SHIFT;
        let glow = energy.clamp(0.0, 1.0);
        let radius = size.width.max(size.height) as f32 * 0.75;
        Self {
            center: viewport.center,
            radius: radius.max(1.0),
            stops: [
                GradientStop {
                    offset: 0.0,
                    color: hsla(hue, 0.45, 0.10 + glow * 0.08, 1.0),
                },
                GradientStop {
                    offset: 0.55,
                    color: hsla(hue + 20.0, 0.35, 0.05 + glow * 0.03, 1.0),
                },
                GradientStop {
                    offset: 1.0,
                    color: hsla(hue + 35.0, 0.30, 0.02, 1.0),
                },
            ],
        }
    }
}

/// One soft-edged disc. Layout matches the GPU instance buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Dot {
    pub center: [f32; 2],
    pub radius: f32,
    /// 0 = hard edge, 1 = alpha falls off across the whole radius.
    pub softness: f32,
    pub color: [f32; 4],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    Additive,
}

pub struct Scene<'a> {
    pub size: SurfaceSize,
    pub background: Background,
    /// Larger low-alpha pass, drawn first.
    pub halo: &'a [Dot],
    /// Smaller high-alpha pass, drawn over the halos.
    pub core: &'a [Dot],
    pub blend: BlendMode,
}

/// Rebuild both dot passes from the current sprites without reallocating.
pub fn fill_dot_passes(
    sprites: &[ParticleSprite],
    viewport: &Viewport,
    onset: f32,
    halo: &mut Vec<Dot>,
    core: &mut Vec<Dot>,
) {
    halo.clear();
    core.clear();
    let core_r = DOT_CORE_RADIUS_PX * viewport.pixel_ratio * (1.0 + onset.clamp(0.0, 1.0) * DOT_ONSET_GROWTH);
    let halo_r = core_r * DOT_HALO_SCALE;
    for s in sprites {
        let center = s.position.to_array();
        let c = s.color;
        halo.push(Dot {
            center,
            radius: halo_r,
            softness: 1.0,
            color: [c.x, c.y, c.z, c.w * DOT_HALO_ALPHA],
        });
        core.push(Dot {
            center,
            radius: core_r,
            softness: 0.35,
            color: c.to_array(),
        });
    }
}
