//! Swarm-driven particle field.
//!
//! Each particle lives in polar coordinates around the surface centre. Its
//! radius follows a particle-swarm style velocity rule: inertia, a random
//! pull toward its own slowly drifting "personal best" radius and a random
//! pull toward a population-wide target set by audio energy and emotion.
//! Nothing here draws; [`ParticleField::sprites`] exposes the pixel-space
//! result of the latest step.

use glam::{Vec2, Vec4};
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::TAU;

use crate::color::{hsla, hue_for_valence};
use crate::config::SwarmConfig;
use crate::constants::*;
use crate::emotion::EmotionVector;
use crate::noise::noise1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub angle: f32,
    /// Unitless, scaled by the base pixel radius when painted.
    pub radius: f32,
    pub velocity: f32,
    pub personal_best: f32,
    pub seed: f32,
}

/// Per-frame drivers for [`ParticleField::advance`].
#[derive(Clone, Copy, Debug)]
pub struct FieldInput {
    /// Engine time in seconds.
    pub time: f32,
    pub energy: f32,
    pub onset: f32,
    pub emotion: EmotionVector,
    pub talking: bool,
    pub hesitation: f32,
}

/// Where the field sits on the output surface, in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub center: Vec2,
    pub base_radius_px: f32,
    pub pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            base_radius_px: 1.0,
            pixel_ratio: 1.0,
        }
    }
}

/// Painted form of one particle for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSprite {
    pub position: Vec2,
    /// Distance from the centre in pixels, after breathing and turbulence.
    pub orbit_px: f32,
    pub color: Vec4,
}

/// Population-wide swarm parameters derived once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwarmParams {
    pub target_radius: f32,
    pub omega: f32,
    pub cognitive: f32,
    pub social: f32,
    pub turbulence: f32,
    pub breathing: f32,
    pub angular_step: f32,
    pub spin: f32,
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl SwarmParams {
    pub fn derive(cfg: &SwarmConfig, input: &FieldInput) -> Self {
        let e = input.emotion;
        let energy = input.energy.max(0.0);
        let onset = input.onset.clamp(0.0, 1.0);
        let hes = input.hesitation.clamp(0.0, 1.0);

        let inward_pull = if input.talking {
            0.0
        } else {
            -cfg.rest_inward_pull * (1.0 - energy).max(0.0)
        };
        let target_radius = 1.0
            + energy * (TARGET_ENERGY_BASE + e.arousal() * TARGET_ENERGY_AROUSAL)
            + onset * TARGET_ONSET_GAIN
            + inward_pull;

        let (omega, social) = if input.talking {
            let dominance_scale = SOCIAL_DOMINANCE_BASE + e.dominance() * SOCIAL_DOMINANCE_SPAN;
            (
                lerp(cfg.omega_talk.0, cfg.omega_talk.1, hes),
                lerp(cfg.social_talk.0, cfg.social_talk.1, hes) * dominance_scale,
            )
        } else {
            (cfg.omega_rest, cfg.social_rest)
        };

        let turbulence =
            cfg.turbulence * (TURBULENCE_AROUSAL_BASE + e.arousal() * TURBULENCE_AROUSAL_SPAN);
        let breathing = (input.time * BREATH_RATE).sin() * cfg.breath_depth;

        let angular_gain = cfg.angular_gain * (0.6 + e.dominance() * ANGULAR_GAIN_DOMINANCE);
        let angular_step = cfg.base_drift + (energy + onset) * angular_gain * hes;
        let spin = if input.talking {
            cfg.spin_talk * (0.7 + e.dominance() * 0.6)
        } else {
            cfg.spin_rest
        };

        Self {
            target_radius,
            omega,
            cognitive: cfg.cognitive_weight,
            social,
            turbulence,
            breathing,
            angular_step,
            spin,
        }
    }
}

pub struct ParticleField {
    cfg: SwarmConfig,
    rng: StdRng,
    particles: Vec<Particle>,
    sprites: Vec<ParticleSprite>,
    rotation: f32,
    last_params: Option<SwarmParams>,
}

impl ParticleField {
    pub fn new(cfg: SwarmConfig, rng: StdRng) -> Self {
        let n = cfg.particle_count;
        let mut field = Self {
            cfg,
            rng,
            particles: Vec::with_capacity(n),
            sprites: Vec::with_capacity(n),
            rotation: 0.0,
            last_params: None,
        };
        field.reinitialize();
        field
    }

    /// Scatter a fresh population on a loose ring around radius 1.
    ///
    /// Only needed when the surface is recreated; the population size never
    /// changes.
    pub fn reinitialize(&mut self) {
        let n = self.cfg.particle_count;
        let (lo, hi) = (self.cfg.radius_min, self.cfg.radius_max);
        self.particles.clear();
        for _ in 0..n {
            let radius = (1.0 + (self.rng.gen::<f32>() - 0.5) * INITIAL_RADIUS_JITTER).clamp(lo, hi);
            self.particles.push(Particle {
                angle: self.rng.gen::<f32>() * TAU,
                radius,
                velocity: 0.0,
                personal_best: radius,
                seed: self.rng.gen::<f32>() * 1000.0,
            });
        }
        self.sprites.clear();
        self.rotation = 0.0;
        self.last_params = None;
    }

    /// One simulation step for every particle, then refresh the sprites.
    pub fn advance(&mut self, input: &FieldInput, viewport: &Viewport) {
        let params = SwarmParams::derive(&self.cfg, input);
        let (lo, hi) = (self.cfg.radius_min, self.cfg.radius_max);
        let pb_rate = self.cfg.personal_best_rate;

        self.rotation = (self.rotation + params.spin).rem_euclid(TAU);

        let e = input.emotion;
        let onset = input.onset.clamp(0.0, 1.0);
        let hue_base = hue_for_valence(e.valence())
            + (input.time * HUE_BREATH_RATE).sin() * HUE_BREATH_SHIFT;
        let saturation = 0.55 + e.arousal() * 0.3;
        let lightness = 0.62 + onset * 0.12;
        let alpha = (ALPHA_BASE + e.valence() * ALPHA_VALENCE + onset * ALPHA_ONSET)
            .clamp(ALPHA_MIN, ALPHA_MAX);

        self.sprites.clear();
        for p in self.particles.iter_mut() {
            let n = noise1(p.seed + p.angle * NOISE_ANGLE_SCALE + input.time * NOISE_TIME_SCALE);
            let turbulence = (n - 0.5) * params.turbulence;

            p.angle = (p.angle + params.angular_step).rem_euclid(TAU);

            let r1: f32 = self.rng.gen();
            let r2: f32 = self.rng.gen();
            p.velocity = params.omega * p.velocity
                + params.cognitive * r1 * (p.personal_best - p.radius)
                + params.social * r2 * (params.target_radius - p.radius);
            if !p.velocity.is_finite() {
                p.velocity = 0.0;
            }
            p.radius = (p.radius + p.velocity).clamp(lo, hi);
            p.personal_best += (p.radius - p.personal_best) * pb_rate;

            let orbit_px =
                (viewport.base_radius_px * (p.radius + params.breathing + turbulence)).max(0.0);
            let theta = p.angle + self.rotation;
            let position = viewport.center + Vec2::new(theta.cos(), theta.sin()) * orbit_px;
            let hue = hue_base + p.seed.fract() * HUE_SEED_SPREAD;
            self.sprites.push(ParticleSprite {
                position,
                orbit_px,
                color: hsla(hue, saturation, lightness, alpha),
            });
        }
        self.last_params = Some(params);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn sprites(&self) -> &[ParticleSprite] {
        &self.sprites
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Parameters used by the most recent `advance`.
    pub fn last_params(&self) -> Option<SwarmParams> {
        self.last_params
    }

    pub fn radius_band(&self) -> (f32, f32) {
        (self.cfg.radius_min, self.cfg.radius_max)
    }

    pub fn mean_radius(&self) -> f32 {
        if self.particles.is_empty() {
            return 0.0;
        }
        self.particles.iter().map(|p| p.radius).sum::<f32>() / self.particles.len() as f32
    }
}
