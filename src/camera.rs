//! Camera poses and eased camera transitions.

use crate::scheduler::{Animation, Progress};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Camera placement: where it is and what it looks at.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub target: Vec3,
}

impl Pose {
    /// Overview pose of the model, looking at the origin.
    pub const DEFAULT: Pose = Pose {
        position: Vec3::new(15.0, 14.0, 25.0),
        target: Vec3::ZERO,
    };

    pub const fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Pose on a sphere around `target`, from yaw/pitch angles in radians.
    pub fn orbit(target: Vec3, yaw: f32, pitch: f32, distance: f32) -> Self {
        let x = distance * pitch.cos() * yaw.sin();
        let y = distance * pitch.sin();
        let z = distance * pitch.cos() * yaw.cos();
        Self {
            position: target + Vec3::new(x, y, z),
            target,
        }
    }

    /// Component-wise linear interpolation.
    pub fn lerp(&self, other: &Pose, t: f32) -> Pose {
        Pose {
            position: self.position.lerp(other.position, t),
            target: self.target.lerp(other.target, t),
        }
    }

    /// View matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The scene camera. Billboards face its position.
#[derive(Clone, Copy, Debug, Default)]
pub struct Camera {
    pub pose: Pose,
}

impl Camera {
    pub fn new(pose: Pose) -> Self {
        Self { pose }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.pose.view_matrix()
    }
}

/// Ease-in-out curve mapping linear progress in `[0, 1]` to eased progress.
#[inline]
pub fn ease_in_out(progress: f32) -> f32 {
    0.5 * (1.0 - (progress * PI).cos())
}

/// Moves the camera from one pose to another over a fixed duration.
///
/// Only one transition runs at a time; [`CameraAnimator::animate`] is a no-op
/// while one is in flight.
#[derive(Debug, Default)]
pub struct CameraAnimator {
    from: Pose,
    to: Pose,
    duration: f32,
    /// Frame time of the first step; set lazily so the transition starts on the next frame.
    started_at: Option<f32>,
    running: bool,
    pose: Option<Pose>,
}

impl CameraAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a transition lasting `duration` seconds.
    ///
    /// Returns `false` and changes nothing if a transition is already running.
    pub fn animate(&mut self, from: Pose, to: Pose, duration: f32) -> bool {
        if self.running {
            log::debug!("Camera transition already running, ignoring request");
            return false;
        }
        self.from = from;
        self.to = to;
        self.duration = duration.max(0.0);
        self.started_at = None;
        self.running = true;
        self.pose = Some(from);
        true
    }

    /// Pose produced by the latest step, if a transition has been started.
    pub fn pose(&self) -> Option<Pose> {
        self.pose
    }

    /// Destination of the current (or last) transition.
    pub fn destination(&self) -> Pose {
        self.to
    }
}

impl Animation for CameraAnimator {
    fn advance(&mut self, now: f32) -> Progress {
        if !self.running {
            return Progress::Idle;
        }
        let start = *self.started_at.get_or_insert(now);
        let linear = if self.duration > 0.0 {
            ((now - start) / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };

        if linear >= 1.0 {
            // Snap exactly; the eased lerp can leave float drift at the end
            self.pose = Some(self.to);
            self.running = false;
            log::debug!("Camera transition complete");
            return Progress::Finished;
        }

        self.pose = Some(self.from.lerp(&self.to, ease_in_out(linear)));
        Progress::Running
    }

    fn cancel(&mut self) {
        self.running = false;
        self.started_at = None;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn far() -> Pose {
        Pose::new(Vec3::new(-10.0, 3.0, 2.0), Vec3::new(1.0, 0.0, 0.0))
    }

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert!((ease_in_out(1.0) - 1.0).abs() < 1e-6);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_transition_snaps_to_target() {
        let mut animator = CameraAnimator::new();
        assert!(animator.animate(far(), Pose::DEFAULT, 1.5));
        assert_eq!(animator.advance(10.0), Progress::Running);
        assert_eq!(animator.pose(), Some(far()));

        assert_eq!(animator.advance(10.75), Progress::Running);
        let mid = animator.pose().unwrap();
        let expected = far().lerp(&Pose::DEFAULT, 0.5);
        assert!((mid.position - expected.position).length() < 1e-4);

        assert_eq!(animator.advance(11.6), Progress::Finished);
        assert_eq!(animator.pose(), Some(Pose::DEFAULT));
        assert!(!animator.is_running());
        assert_eq!(animator.advance(12.0), Progress::Idle);
    }

    #[test]
    fn test_reentry_is_ignored() {
        let mut animator = CameraAnimator::new();
        assert!(animator.animate(far(), Pose::DEFAULT, 1.0));
        animator.advance(0.0);
        let other = Pose::new(Vec3::splat(50.0), Vec3::ZERO);
        assert!(!animator.animate(Pose::DEFAULT, other, 0.1));

        animator.advance(2.0);
        assert_eq!(animator.pose(), Some(Pose::DEFAULT));
    }

    #[test]
    fn test_cancel_clears_guard() {
        let mut animator = CameraAnimator::new();
        animator.animate(far(), Pose::DEFAULT, 1.0);
        animator.advance(0.0);
        animator.cancel();
        assert!(!animator.is_running());
        assert!(animator.animate(Pose::DEFAULT, far(), 1.0));
    }

    #[test]
    fn test_orbit_distance() {
        let pose = Pose::orbit(Vec3::ZERO, 0.3, 0.4, 5.0);
        assert!((pose.position.length() - 5.0).abs() < 1e-4);
    }
}
