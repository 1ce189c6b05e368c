//! Logical timers on a shared simulation clock
//!
//! Nothing here reads wall time. The host feeds elapsed seconds in and timers
//! report how many times they fired.

use serde::{Deserialize, Serialize};

use crate::consts::{FRAME_DT, MAX_SUBSTEPS};

/// Periodic timer driven by explicit `dt`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepeatingTimer {
    interval: f32,
    elapsed: f32,
}

impl RepeatingTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Change the period without losing accumulated time
    pub fn set_interval(&mut self, interval: f32) {
        self.interval = interval;
    }

    /// Accumulate `dt` and return the number of firings (at most `MAX_SUBSTEPS`)
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        self.elapsed += dt.max(0.0);

        let mut fired = 0;
        while self.elapsed >= self.interval && fired < MAX_SUBSTEPS {
            self.elapsed -= self.interval;
            fired += 1;
        }
        // Drop the backlog instead of carrying it into the next frame
        if fired == MAX_SUBSTEPS {
            self.elapsed = self.elapsed.min(self.interval);
        }
        fired
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Splits variable host frame times into fixed simulation frames
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStepper {
    accumulator: f32,
}

impl FrameStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a wall-clock delta; `frame` runs once per fixed frame
    ///
    /// Deltas above 0.1s are clamped so a stalled host does not replay a
    /// burst of frames.
    pub fn run(&mut self, dt: f32, mut frame: impl FnMut(f32)) -> u32 {
        self.accumulator += dt.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
            frame(FRAME_DT);
            self.accumulator -= FRAME_DT;
            substeps += 1;
        }
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_on_interval() {
        let mut timer = RepeatingTimer::new(0.5);
        assert_eq!(timer.advance(0.4), 0);
        assert_eq!(timer.advance(0.2), 1);
        assert_eq!(timer.advance(1.0), 2);
    }

    #[test]
    fn test_timer_caps_burst() {
        let mut timer = RepeatingTimer::new(0.01);
        assert_eq!(timer.advance(5.0), MAX_SUBSTEPS);
        assert!(timer.advance(0.0) <= 1);
    }

    #[test]
    fn test_interval_change_keeps_elapsed() {
        let mut timer = RepeatingTimer::new(1.0);
        timer.advance(0.3);
        timer.set_interval(0.25);
        assert_eq!(timer.advance(0.0), 1);
    }

    #[test]
    fn test_stepper_runs_fixed_frames() {
        let mut stepper = FrameStepper::new();
        let mut frames = 0;
        stepper.run(FRAME_DT * 3.5, |dt| {
            assert_eq!(dt, FRAME_DT);
            frames += 1;
        });
        assert_eq!(frames, 3);
    }

    #[test]
    fn test_stepper_clamps_stall() {
        let mut stepper = FrameStepper::new();
        let ran = stepper.run(10.0, |_| {});
        assert!(ran <= 6);
    }
}
