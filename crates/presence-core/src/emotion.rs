//! Valence/arousal/dominance input.

/// Latest emotion estimate, every field in [0, 1].
///
/// Constructed only through [`EmotionVector::new`] (or `Default`), which
/// clamps, so a value of this type is always in range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmotionVector {
    valence: f32,
    arousal: f32,
    dominance: f32,
}

pub const NEUTRAL: f32 = 0.5;

#[inline]
fn unit(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        NEUTRAL
    }
}

impl EmotionVector {
    pub const NEUTRAL: Self = Self {
        valence: NEUTRAL,
        arousal: NEUTRAL,
        dominance: NEUTRAL,
    };

    pub fn new(valence: f32, arousal: f32, dominance: f32) -> Self {
        Self {
            valence: unit(valence),
            arousal: unit(arousal),
            dominance: unit(dominance),
        }
    }

    pub fn valence(&self) -> f32 {
        self.valence
    }
    pub fn arousal(&self) -> f32 {
        self.arousal
    }
    pub fn dominance(&self) -> f32 {
        self.dominance
    }

    /// Copy with one field nudged by `delta`, clamped back into range.
    pub fn nudged(self, axis: EmotionAxis, delta: f32) -> Self {
        let (v, a, d) = (self.valence, self.arousal, self.dominance);
        match axis {
            EmotionAxis::Valence => Self::new(v + delta, a, d),
            EmotionAxis::Arousal => Self::new(v, a + delta, d),
            EmotionAxis::Dominance => Self::new(v, a, d + delta),
        }
    }
}

impl Default for EmotionVector {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmotionAxis {
    Valence,
    Arousal,
    Dominance,
}
