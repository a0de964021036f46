//! Frame clock shared by every animated component.
//!
//! All components read "now" from one [`FrameClock`] so that a single frame
//! sees a single timestamp. The clock is driven either from wall time
//! ([`FrameClock::update`]) or manually with an explicit delta
//! ([`FrameClock::tick`]), which is what tests and the headless runner use.
//!
//! # Example
//!
//! ```ignore
//! use volcano_fx::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//! clock.tick(1.0 / 60.0);
//! assert_eq!(clock.frame(), 1);
//! ```

use std::time::{Duration, Instant};

/// Time tracking for the render loop.
///
/// Times are in seconds since the clock started. Pausing freezes `now()` and
/// zeroes `delta()`.
#[derive(Debug)]
pub struct FrameClock {
    /// Wall time of the last `update` call.
    last_instant: Instant,
    /// Seconds since start (scaled, excluding pauses).
    now_secs: f32,
    /// Seconds since the previous frame.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Smoothed frames per second.
    fps: f32,
    fps_frames: u64,
    fps_window: f32,
    paused: bool,
    /// Fixed delta for deterministic stepping (optional).
    fixed_delta: Option<f32>,
    /// Time scale multiplier (1.0 = normal speed).
    time_scale: f32,
}

/// Deltas larger than this are treated as a stall (tab switch, debugger) and clamped.
const MAX_DELTA: f32 = 0.25;

const FPS_WINDOW: f32 = 0.5;

impl FrameClock {
    /// Create a new clock starting at zero.
    pub fn new() -> Self {
        Self {
            last_instant: Instant::now(),
            now_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frames: 0,
            fps_window: 0.0,
            paused: false,
            fixed_delta: None,
            time_scale: 1.0,
        }
    }

    /// Advance using wall time. Call once per rendered frame.
    ///
    /// Returns `(now, delta)` for convenience.
    pub fn update(&mut self) -> (f32, f32) {
        let wall = Instant::now();
        let raw = wall.duration_since(self.last_instant).as_secs_f32();
        self.last_instant = wall;
        self.tick(raw)
    }

    /// Advance by an explicit delta in seconds.
    ///
    /// A configured fixed delta takes precedence over `delta`.
    pub fn tick(&mut self, delta: f32) -> (f32, f32) {
        if self.paused {
            self.delta_secs = 0.0;
            return (self.now_secs, 0.0);
        }

        let raw = self.fixed_delta.unwrap_or(delta);
        let raw = if raw.is_finite() { raw.clamp(0.0, MAX_DELTA) } else { 0.0 };
        self.delta_secs = raw * self.time_scale;
        self.now_secs += self.delta_secs;
        self.frame_count += 1;

        self.fps_frames += 1;
        self.fps_window += raw;
        if self.fps_window >= FPS_WINDOW {
            self.fps = self.fps_frames as f32 / self.fps_window;
            self.fps_frames = 0;
            self.fps_window = 0.0;
        }

        (self.now_secs, self.delta_secs)
    }

    /// Seconds since the clock started.
    #[inline]
    pub fn now(&self) -> f32 {
        self.now_secs
    }

    /// Seconds since the previous frame.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed every half second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Pause time progression.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after pausing. Wall time spent paused is not counted.
    pub fn resume(&mut self) {
        if self.paused {
            self.last_instant = Instant::now();
            self.paused = false;
        }
    }

    /// Use a fixed delta regardless of real frame timing. `None` restores real timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Set time scale multiplier. Negative values clamp to zero.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Current delta as a `Duration`.
    #[inline]
    pub fn delta_duration(&self) -> Duration {
        Duration::from_secs_f32(self.delta_secs)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
