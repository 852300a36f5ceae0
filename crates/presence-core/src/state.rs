//! Conversational presence state and the hesitation ramp.

use crate::config::SessionMode;
use crate::noise::smoothstep;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PresenceState {
    #[default]
    Idle,
    Listening,
    Talking,
    Done,
}

impl PresenceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceState::Idle => "idle",
            PresenceState::Listening => "listening",
            PresenceState::Talking => "talking",
            PresenceState::Done => "done",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "idle" => Some(PresenceState::Idle),
            "listening" => Some(PresenceState::Listening),
            "talking" => Some(PresenceState::Talking),
            "done" => Some(PresenceState::Done),
            _ => None,
        }
    }
}

/// What a `set_state` call actually did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// State unchanged (same state requested).
    Unchanged,
    /// Moved to a new state that is not `Talking`.
    Changed { from: PresenceState, to: PresenceState },
    /// Entered `Talking`; the talk start time was recorded.
    TalkStarted { from: PresenceState },
    /// Ignored because the one-shot session already reached `Done`.
    Rejected { requested: PresenceState },
}

#[derive(Clone, Debug)]
pub struct PresenceStateMachine {
    mode: SessionMode,
    ramp_sec: f64,
    state: PresenceState,
    talk_started_at: Option<f64>,
}

impl PresenceStateMachine {
    pub fn new(mode: SessionMode, ramp_sec: f64) -> Self {
        Self {
            mode,
            ramp_sec,
            state: PresenceState::Idle,
            talk_started_at: None,
        }
    }

    pub fn state(&self) -> PresenceState {
        self.state
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn talk_started_at(&self) -> Option<f64> {
        self.talk_started_at
    }

    pub fn is_talking(&self) -> bool {
        self.state == PresenceState::Talking
    }

    /// Apply an externally requested transition at engine time `now` (seconds).
    pub fn set_state(&mut self, next: PresenceState, now: f64) -> Transition {
        if self.mode == SessionMode::OneShot && self.state == PresenceState::Done {
            return if next == PresenceState::Done {
                Transition::Unchanged
            } else {
                Transition::Rejected { requested: next }
            };
        }
        // a looping session has no terminal state
        let next = match (self.mode, next) {
            (SessionMode::Looping, PresenceState::Done) => PresenceState::Idle,
            (_, s) => s,
        };
        let from = self.state;
        if from == next {
            return Transition::Unchanged;
        }
        self.state = next;
        if next == PresenceState::Talking {
            self.talk_started_at = Some(now);
            Transition::TalkStarted { from }
        } else {
            Transition::Changed { from, to: next }
        }
    }

    /// Eased 0→1 ramp over the first `ramp_sec` of talking; 0 otherwise.
    pub fn hesitation(&self, now: f64) -> f32 {
        match (self.state, self.talk_started_at) {
            (PresenceState::Talking, Some(t0)) => {
                let t = ((now - t0) / self.ramp_sec).clamp(0.0, 1.0);
                smoothstep(t as f32)
            }
            _ => 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.state = PresenceState::Idle;
        self.talk_started_at = None;
    }
}
