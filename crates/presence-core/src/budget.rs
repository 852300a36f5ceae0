use std::time::Duration;

/// Frame timing counters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub frames: u64,
    pub over_budget: u64,
    pub last_tick: Duration,
    pub worst_tick: Duration,
}

/// Tracks tick durations against the per-frame budget (one refresh period).
#[derive(Clone, Debug)]
pub struct FrameBudget {
    budget: Duration,
    warn_every: u64,
    last_warn: Option<u64>,
    stats: FrameStats,
}

impl FrameBudget {
    pub fn new(refresh_rate_hz: f64) -> Self {
        let budget = Duration::from_secs_f64(1.0 / refresh_rate_hz);
        Self {
            budget,
            // at most one warning every ~5 seconds of frames
            warn_every: (refresh_rate_hz * 5.0).max(1.0) as u64,
            last_warn: None,
            stats: FrameStats::default(),
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Record one tick; returns true if it ran over budget.
    pub fn record(&mut self, elapsed: Duration) -> bool {
        let s = &mut self.stats;
        s.frames += 1;
        s.last_tick = elapsed;
        s.worst_tick = s.worst_tick.max(elapsed);
        if elapsed <= self.budget {
            return false;
        }
        s.over_budget += 1;
        let due = match self.last_warn {
            None => true,
            Some(f) => s.frames - f >= self.warn_every,
        };
        if due {
            self.last_warn = Some(s.frames);
            log::warn!(
                "[frame] tick took {:.2}ms (budget {:.2}ms, {} over so far)",
                elapsed.as_secs_f64() * 1e3,
                self.budget.as_secs_f64() * 1e3,
                s.over_budget
            );
        }
        true
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}
