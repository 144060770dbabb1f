//! Time management utilities

use std::time::{Duration, Instant};

/// Frame timer with a once-per-second FPS sample
///
/// The sampled rate only changes once per window, so overlay text built
/// from it is re-rendered at most once a second.
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    frame_count: u64,
    window_start: Instant,
    window_frames: u32,
    sampled_fps: u32,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Length of the FPS sampling window
    pub const SAMPLE_WINDOW: Duration = Duration::from_secs(1);

    /// Create a new timer
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta_time: 0.0,
            frame_count: 0,
            window_start: now,
            window_frames: 0,
            sampled_fps: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    fn update_at(&mut self, now: Instant) {
        let elapsed = now.duration_since(self.last_frame);
        self.delta_time = elapsed.as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;
        self.window_frames += 1;

        let window = now.duration_since(self.window_start);
        if window >= Self::SAMPLE_WINDOW {
            self.sampled_fps = (f64::from(self.window_frames) / window.as_secs_f64()).round() as u32;
            self.window_frames = 0;
            self.window_start = now;
        }
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second measured over the last complete sampling window
    pub fn sampled_fps(&self) -> u32 {
        self.sampled_fps
    }
}

/// Sleeps out the remainder of a frame to honour a frame cap
///
/// A cap of `-1` (or any non-positive value) leaves pacing to the
/// presentation layer.
pub struct FrameLimiter {
    frame_budget: Option<Duration>,
    frame_start: Instant,
}

impl FrameLimiter {
    /// Create a limiter for `frame_cap` frames per second
    pub fn new(frame_cap: i32) -> Self {
        let frame_budget = u32::try_from(frame_cap)
            .ok()
            .filter(|cap| *cap > 0)
            .map(|cap| Duration::from_secs(1) / cap);
        Self {
            frame_budget,
            frame_start: Instant::now(),
        }
    }

    /// Per-frame time budget, if capped
    pub fn frame_budget(&self) -> Option<Duration> {
        self.frame_budget
    }

    /// Time left in the current frame's budget
    pub fn remaining(&self) -> Duration {
        self.frame_budget
            .map_or(Duration::ZERO, |budget| budget.saturating_sub(self.frame_start.elapsed()))
    }

    /// Sleep until the frame budget is spent, then start the next frame
    pub fn wait(&mut self) {
        let remaining = self.remaining();
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.frame_start = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_timer_counts_frames() {
        let mut timer = Timer::new();
        timer.update();
        timer.update();
        assert_eq!(timer.frame_count(), 2);
        assert!(timer.delta_time() >= 0.0);
    }

    #[test]
    fn test_sampled_fps_updates_after_window() {
        let mut timer = Timer::new();
        let start = timer.window_start;
        for i in 1..=30 {
            timer.update_at(start + Duration::from_millis(i * 10));
        }
        // Window not yet complete
        assert_eq!(timer.sampled_fps(), 0);
        assert_relative_eq!(timer.delta_time(), 0.01, epsilon = 1e-4);

        timer.update_at(start + Duration::from_secs(1));
        assert_eq!(timer.sampled_fps(), 31);
    }

    #[test]
    fn test_uncapped_limiter_never_sleeps() {
        let limiter = FrameLimiter::new(-1);
        assert!(limiter.frame_budget().is_none());
        assert_eq!(limiter.remaining(), Duration::ZERO);

        assert!(FrameLimiter::new(0).frame_budget().is_none());
    }

    #[test]
    fn test_capped_limiter_budget() {
        let limiter = FrameLimiter::new(50);
        assert_eq!(limiter.frame_budget(), Some(Duration::from_millis(20)));
        assert!(limiter.remaining() <= Duration::from_millis(20));
    }
}
