use std::time::Duration;

use crate::core::animation::AnimationLimits;
use crate::core::data::fractal_params::FractalParameters;

/// Turns wall-clock time into fixed rotation ticks.
pub struct RotationClock {
    limits: AnimationLimits,
    accumulator: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickResult {
    pub ticks_run: u32,
    /// True when the rotation angle moved, i.e. a new frame is needed.
    pub angle_changed: bool,
    pub params: FractalParameters,
}

impl RotationClock {
    #[must_use]
    pub fn new(limits: AnimationLimits) -> Self {
        Self {
            limits,
            accumulator: Duration::ZERO,
        }
    }

    /// Time is accumulated in whole nanoseconds so elapsed spans that are exact multiples of
    /// the tick interval run exactly that many ticks.
    pub fn advance(&mut self, elapsed: Duration, params: &FractalParameters) -> TickResult {
        let Some(interval) = self.limits.tick_interval() else {
            return TickResult {
                ticks_run: 0,
                angle_changed: false,
                params: *params,
            };
        };
        let dt = self.limits.dt();

        self.accumulator = self.accumulator.saturating_add(elapsed);

        let ticks_available = self.accumulator.as_nanos() / interval.as_nanos();
        let max_ticks = self.limits.max_ticks_per_advance;
        let ticks_run = u32::try_from(ticks_available).map_or(max_ticks, |t| t.min(max_ticks));

        let mut next = *params;
        for _ in 0..ticks_run {
            next = next.advanced_rotation(dt);
        }

        if ticks_available > u128::from(max_ticks) {
            self.accumulator = Duration::ZERO;
        } else {
            self.accumulator = self.accumulator.saturating_sub(interval * ticks_run);
        }

        TickResult {
            ticks_run,
            angle_changed: next.rotation().angle_degrees != params.rotation().angle_degrees,
            params: next,
        }
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}
