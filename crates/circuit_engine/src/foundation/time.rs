//! Frame timing
//!
//! `FrameClock` measures elapsed wall time once per loop iteration and derives
//! the two timing values the rest of the engine consumes: an unclamped frame
//! time for diagnostics and a clamped delta time for gameplay math. It also
//! carries the fixed-step accumulator and the smoothed FPS counters used by
//! the title overlay.

use std::time::{Duration, Instant};

/// Upper bound on the delta time fed to gameplay code, in seconds.
///
/// A single stall (window drag, debugger pause) must not produce a huge
/// simulated step; diagnostics keep the unclamped frame time.
pub const MAX_DELTA_TIME: f64 = 0.1;

/// Default fixed simulation step, in seconds
pub const DEFAULT_FIXED_DELTA: f64 = 1.0 / 60.0;

/// Default cap on fixed-step catch-up work after a stall
pub const DEFAULT_MAX_CATCHUP_STEPS: u32 = 5;

/// Per-frame clock driving the main loop
pub struct FrameClock {
    last_frame: Instant,
    frame_time: f64,
    delta_time: f64,
    accumulator: f64,
    fixed_delta: f64,
    max_catchup_steps: u32,
    total_time: f64,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FIXED_DELTA, DEFAULT_MAX_CATCHUP_STEPS)
    }
}

impl FrameClock {
    /// Create a new clock with the given fixed step and catch-up cap
    pub fn new(fixed_delta: f64, max_catchup_steps: u32) -> Self {
        Self {
            last_frame: Instant::now(),
            frame_time: 0.0,
            delta_time: 0.0,
            accumulator: 0.0,
            fixed_delta,
            max_catchup_steps,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance the clock by the elapsed wall time (call once per iteration)
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advance the clock to an explicit timestamp
    ///
    /// Timestamps earlier than the previous frame count as zero elapsed time.
    pub fn tick_at(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        // unscaled, unclamped
        self.frame_time = elapsed.as_secs_f64();
        // regular delta time
        self.delta_time = self.frame_time.clamp(0.0, MAX_DELTA_TIME);

        self.accumulator += self.frame_time;
        self.total_time += self.frame_time;
        self.frame_count += 1;
    }

    /// Unclamped time the previous frame took, in seconds
    pub fn frame_time(&self) -> f64 {
        self.frame_time
    }

    /// Clamped delta time for gameplay math, in seconds
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// The fixed simulation step, in seconds
    pub fn fixed_delta(&self) -> f64 {
        self.fixed_delta
    }

    /// Total unclamped time since clock creation
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Drain whole fixed steps from the accumulator
    ///
    /// Returns how many steps the caller should simulate this frame, capped
    /// so a long stall cannot queue unbounded catch-up work. Accumulated time
    /// beyond the cap is discarded rather than carried into the next frame.
    pub fn drain_fixed_steps(&mut self) -> u32 {
        let mut steps = 0;
        while self.accumulator >= self.fixed_delta && steps < self.max_catchup_steps {
            self.accumulator -= self.fixed_delta;
            steps += 1;
        }
        if steps == self.max_catchup_steps {
            self.accumulator = self.accumulator.min(self.fixed_delta);
        }
        steps
    }
}

/// How long the loop should sleep to hit a target frame interval
///
/// Zero when the frame already took at least as long as the target, or when
/// no target is configured.
pub fn throttle_duration(target: Duration, frame_time: Duration) -> Duration {
    target.saturating_sub(frame_time)
}

/// A smoothed FPS / frame-time sample for the diagnostic title overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    /// Frames per second over the last reporting window
    pub fps: f64,
    /// Average frame time over the window, in milliseconds
    pub delta_ms: f64,
}

/// Accumulates frame times and reports a smoothed sample every 0.1 s
pub struct FrameStats {
    report_interval: f64,
    accum_frame_time: f64,
    frames: u32,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl FrameStats {
    /// Create stats with a custom reporting window, in seconds
    pub fn new(report_interval: f64) -> Self {
        Self {
            report_interval,
            accum_frame_time: 0.0,
            frames: 0,
        }
    }

    /// Record one frame; returns a sample when the reporting window elapsed
    pub fn record(&mut self, frame_time: f64) -> Option<FrameSample> {
        self.accum_frame_time += frame_time;
        self.frames += 1;

        if self.accum_frame_time < self.report_interval || self.frames == 0 {
            return None;
        }

        let fps = f64::from(self.frames) / self.accum_frame_time;
        let delta_ms = (self.accum_frame_time * 1000.0) / f64::from(self.frames);

        self.accum_frame_time = 0.0;
        self.frames = 0;

        Some(FrameSample { fps, delta_ms })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ticked_clock(elapsed: Duration) -> FrameClock {
        let mut clock = FrameClock::default();
        let start = Instant::now();
        clock.last_frame = start;
        clock.tick_at(start + elapsed);
        clock
    }

    #[test]
    fn delta_time_is_clamped_frame_time_is_not() {
        let clock = ticked_clock(Duration::from_secs(5));
        assert_relative_eq!(clock.frame_time(), 5.0, epsilon = 1e-9);
        assert_relative_eq!(clock.delta_time(), MAX_DELTA_TIME);
    }

    #[test]
    fn short_frames_pass_through_unclamped() {
        let clock = ticked_clock(Duration::from_micros(16_000));
        assert_relative_eq!(clock.delta_time(), 0.016, epsilon = 1e-9);
        assert_relative_eq!(clock.frame_time(), clock.delta_time());
    }

    #[test]
    fn fixed_steps_drain_in_whole_chunks() {
        let mut clock = ticked_clock(Duration::from_micros(33_400));
        // two whole 1/60 s steps fit into 33.4 ms
        assert_eq!(clock.drain_fixed_steps(), 2);
        assert_eq!(clock.drain_fixed_steps(), 0);
    }

    #[test]
    fn catchup_work_is_capped_after_a_stall() {
        let mut clock = ticked_clock(Duration::from_secs(3));
        assert_eq!(clock.drain_fixed_steps(), DEFAULT_MAX_CATCHUP_STEPS);
        // leftover backlog was dropped, not carried over
        assert!(clock.drain_fixed_steps() <= 1);
        assert_eq!(clock.drain_fixed_steps(), 0);
    }

    #[test]
    fn throttle_covers_the_remainder_of_the_interval() {
        let sleep = throttle_duration(Duration::from_millis(50), Duration::from_millis(10));
        assert_eq!(sleep, Duration::from_millis(40));
    }

    #[test]
    fn throttle_is_zero_for_slow_frames() {
        let sleep = throttle_duration(Duration::from_millis(50), Duration::from_millis(60));
        assert_eq!(sleep, Duration::ZERO);
    }

    #[test]
    fn stats_report_after_the_window_elapses() {
        let mut stats = FrameStats::default();
        assert!(stats.record(0.016).is_none());
        let sample = loop {
            if let Some(sample) = stats.record(0.016) {
                break sample;
            }
        };
        assert_relative_eq!(sample.fps, 62.5, epsilon = 1e-6);
        assert_relative_eq!(sample.delta_ms, 16.0, epsilon = 1e-6);
    }
}
