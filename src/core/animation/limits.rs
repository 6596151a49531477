use std::time::Duration;

/// Fixed-step timing for the rotation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationLimits {
    pub tick_hz: u32,
    /// Ticks run per `advance` at most; longer stalls drop the remaining time.
    pub max_ticks_per_advance: u32,
}

impl AnimationLimits {
    #[must_use]
    pub fn dt(&self) -> f64 {
        if self.tick_hz == 0 {
            0.0
        } else {
            1.0 / f64::from(self.tick_hz)
        }
    }

    /// Tick length truncated to whole nanoseconds; `None` when ticking is off.
    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        (self.tick_hz > 0)
            .then(|| Duration::from_secs(1) / self.tick_hz)
            .filter(|interval| !interval.is_zero())
    }
}

impl Default for AnimationLimits {
    fn default() -> Self {
        Self {
            tick_hz: 60,
            max_ticks_per_advance: 10,
        }
    }
}
