//! Central per-frame driver for time-based animations.
//!
//! Animations never reschedule themselves. They expose
//! [`Animation::advance`], and the owner calls it once per frame through a
//! [`Scheduler`]. Stopping an animation is an explicit [`Animation::cancel`],
//! and tearing the scheduler down cancels everything it drives so nothing
//! keeps running after its view is gone.

/// Result of advancing an animation by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// Not started, or already finished or cancelled. Nothing changed.
    Idle,
    /// Still running; call again next frame.
    Running,
    /// Reached its end state during this call.
    Finished,
}

/// A time-based animation advanced by the frame loop.
pub trait Animation {
    /// Advance to `now` (seconds on the frame clock).
    fn advance(&mut self, now: f32) -> Progress;

    /// Stop without reaching the end state. Further `advance` calls return `Idle`.
    fn cancel(&mut self);

    fn is_running(&self) -> bool;
}

/// Drives a set of animations once per frame.
#[derive(Debug)]
pub struct Scheduler {
    live: bool,
    frames: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self { live: true, frames: 0 }
    }

    /// Whether the scheduler is still driving animations.
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Frames driven since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance every running animation. Returns how many are still running.
    pub fn run_frame(&mut self, now: f32, tasks: &mut [&mut dyn Animation]) -> usize {
        if !self.live {
            return 0;
        }
        self.frames += 1;
        let mut running = 0;
        for task in tasks.iter_mut() {
            if task.is_running() && task.advance(now) == Progress::Running {
                running += 1;
            }
        }
        running
    }

    /// Cancel every animation and stop driving frames until [`Scheduler::resume`].
    pub fn teardown(&mut self, tasks: &mut [&mut dyn Animation]) {
        for task in tasks.iter_mut() {
            task.cancel();
        }
        self.live = false;
    }

    pub fn resume(&mut self) {
        self.live = true;
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
