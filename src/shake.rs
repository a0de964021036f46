//! Eruption camera shake.
//!
//! While an eruption is running the camera alternates between shake bursts
//! and quiet spells of random length. The first burst also carries the
//! camera from wherever it was to the eruption vantage point; later bursts
//! shake around that point.

use crate::camera::Pose;
use crate::scheduler::{Animation, Progress};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;

/// Where the camera settles while an eruption is running.
pub const ERUPTION_VANTAGE: Pose = Pose {
    position: Vec3::new(19.0, 14.0, 24.0),
    target: Vec3::ZERO,
};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    /// Waiting for the next burst.
    Resting { until: f32 },
    Shaking { start: f32, duration: f32, amplitude: f32 },
}

/// Looping camera shake with randomized bursts.
#[derive(Debug)]
pub struct CameraShake {
    rng: SmallRng,
    running: bool,
    /// Scales every burst's amplitude; comes from the eruption regime.
    intensity: f32,
    origin: Pose,
    vantage: Pose,
    phase: Phase,
    arrived: bool,
    /// Progress of the first burst in `[0, 1]`, held at 1 afterwards.
    reveal: f32,
    pose: Option<Pose>,
}

impl CameraShake {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            running: false,
            intensity: 0.0,
            origin: Pose::DEFAULT,
            vantage: ERUPTION_VANTAGE,
            phase: Phase::Resting { until: f32::NEG_INFINITY },
            arrived: false,
            reveal: 0.0,
            pose: None,
        }
    }

    /// Begin shaking from `origin`. Restarts from scratch if already running.
    pub fn start(&mut self, origin: Pose, intensity: f32) {
        self.running = true;
        self.intensity = intensity.max(0.0);
        self.origin = origin;
        self.phase = Phase::Resting { until: f32::NEG_INFINITY };
        self.arrived = false;
        self.reveal = 0.0;
        self.pose = Some(origin);
    }

    /// Change the strength of subsequent bursts without restarting.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.max(0.0);
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Camera pose produced by the latest step.
    pub fn pose(&self) -> Option<Pose> {
        self.pose
    }

    /// How far the eruption look has faded in, driven by the first burst.
    pub fn reveal(&self) -> f32 {
        self.reveal
    }

    pub fn with_vantage(mut self, vantage: Pose) -> Self {
        self.vantage = vantage;
        self
    }

    fn jitter(&mut self, scale: f32) -> Vec3 {
        Vec3::new(
            self.rng.gen_range(-0.5..0.5),
            self.rng.gen_range(-0.5..0.5),
            self.rng.gen_range(-0.5..0.5),
        ) * scale
    }
}

impl Animation for CameraShake {
    fn advance(&mut self, now: f32) -> Progress {
        if !self.running {
            return Progress::Idle;
        }

        if let Phase::Resting { until } = self.phase {
            if now < until {
                return Progress::Running;
            }
            self.phase = Phase::Shaking {
                start: now,
                duration: self.rng.gen_range(2.0..5.0),
                amplitude: self.rng.gen_range(0.1..0.5),
            };
        }

        let Phase::Shaking { start, duration, amplitude } = self.phase else {
            return Progress::Running;
        };

        let progress = (now - start) / duration;
        if progress < 1.0 {
            let fade = (progress * PI).sin();
            let offset = self.jitter(amplitude * self.intensity * fade * 0.5);
            let base = if self.arrived {
                self.vantage
            } else {
                self.reveal = progress.clamp(0.0, 1.0);
                self.origin.lerp(&self.vantage, progress)
            };
            self.pose = Some(Pose::new(base.position + offset, base.target));
        } else {
            self.pose = Some(self.vantage);
            self.arrived = true;
            self.reveal = 1.0;
            let rest = self.rng.gen_range(3.0..10.0);
            self.phase = Phase::Resting { until: now + rest };
        }
        Progress::Running
    }

    fn cancel(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_until_started() {
        let mut shake = CameraShake::new(1);
        assert_eq!(shake.advance(0.0), Progress::Idle);
        assert!(shake.pose().is_none());
    }

    #[test]
    fn test_first_burst_arrives_at_vantage() {
        let mut shake = CameraShake::new(1);
        shake.start(Pose::DEFAULT, 1.0);
        let mut t = 0.0;
        while t < 5.5 {
            assert_eq!(shake.advance(t), Progress::Running);
            t += 1.0 / 60.0;
        }
        // Burst lasts at most 5 s, so the camera has settled
        assert_eq!(shake.reveal(), 1.0);
        let pose = shake.pose().unwrap();
        assert!((pose.position - ERUPTION_VANTAGE.position).length() < 0.5);
    }

    #[test]
    fn test_offsets_bounded_by_intensity() {
        let mut shake = CameraShake::new(9);
        shake.start(ERUPTION_VANTAGE, 0.5);
        for i in 0..300 {
            shake.advance(i as f32 / 60.0);
            let pose = shake.pose().unwrap();
            let d = pose.position - ERUPTION_VANTAGE.position;
            // amplitude < 0.5, times intensity, times 0.5, times jitter < 0.5 per axis
            assert!(d.abs().max_element() <= 0.0625 + 1e-5);
        }
    }

    #[test]
    fn test_cancel_stops() {
        let mut shake = CameraShake::new(3);
        shake.start(Pose::DEFAULT, 1.0);
        shake.advance(0.0);
        shake.cancel();
        assert_eq!(shake.advance(1.0), Progress::Idle);
    }
}
