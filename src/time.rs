//! Timestamp-driven timers.
//!
//! `draw_web()` calls at ~60fps with variable delta. The timers here turn
//! those wall-clock timestamps into discrete events (income ticks, periodic
//! saves, debounced saves), keeping game logic deterministic and testable.

/// Timer periods in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    /// Passive income is paid once per period.
    pub income_ms: f64,
    /// Unconditional save period.
    pub autosave_ms: f64,
    /// Quiet period after a change before the debounced save fires.
    pub debounce_ms: f64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            income_ms: 1000.0,
            autosave_ms: 5000.0,
            debounce_ms: 300.0,
        }
    }
}

/// Periods a clamped [`Interval`] recovers from a single long frame gap.
const MAX_CATCH_UP_PERIODS: f64 = 5.0;

/// A fixed-period timer using an accumulator.
///
/// Frames stop while the tab is hidden. An unclamped interval reports every
/// period that passed in the meantime; a clamped one reports at most
/// [`MAX_CATCH_UP_PERIODS`].
pub struct Interval {
    period_ms: f64,
    /// Longest gap (ms) credited by one update, if capped
    max_gap_ms: Option<f64>,
    /// Accumulated milliseconds not yet consumed as periods
    accumulator: f64,
    /// Total periods fired since creation
    pub total_fired: u64,
    /// Timestamp of the last update (ms), None if first frame
    last_timestamp: Option<f64>,
}

impl Interval {
    /// An interval that catches up on every elapsed period.
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            max_gap_ms: None,
            accumulator: 0.0,
            total_fired: 0,
            last_timestamp: None,
        }
    }

    /// An interval that reports at most a few periods after a long gap.
    pub fn clamped(period_ms: f64) -> Self {
        Self {
            max_gap_ms: Some(period_ms * MAX_CATCH_UP_PERIODS),
            ..Self::new(period_ms)
        }
    }

    /// Feed a wall-clock timestamp. Returns how many periods elapsed since
    /// the previous call.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, self.max_gap_ms.unwrap_or(f64::INFINITY)),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let fired = (self.accumulator / self.period_ms) as u32;
        self.accumulator -= fired as f64 * self.period_ms;
        self.total_fired += fired as u64;
        fired
    }
}

/// Fires once after `delay_ms` of quiet following the last trigger.
pub struct Debounce {
    delay_ms: f64,
    deadline: Option<f64>,
}

impl Debounce {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the timer. A pending deadline is replaced.
    pub fn trigger(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.delay_ms);
    }

    /// Returns true exactly once when the deadline has passed.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(d) if now_ms >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// The three game timers. They run independently.
pub struct SaveSchedule {
    pub income: Interval,
    pub autosave: Interval,
    pub debounce: Debounce,
}

impl SaveSchedule {
    pub fn new(timing: Timing) -> Self {
        Self {
            income: Interval::new(timing.income_ms),
            autosave: Interval::clamped(timing.autosave_ms),
            debounce: Debounce::new(timing.debounce_ms),
        }
    }

    /// Record a tracked state change.
    pub fn mark_changed(&mut self, now_ms: f64) {
        self.debounce.trigger(now_ms);
    }

    /// Whether either the periodic or the debounced save is due.
    pub fn save_due(&mut self, now_ms: f64) -> bool {
        let periodic = self.autosave.update(now_ms) > 0;
        let debounced = self.debounce.poll(now_ms);
        periodic || debounced
    }
}

impl Default for SaveSchedule {
    fn default() -> Self {
        Self::new(Timing::default())
    }
}
