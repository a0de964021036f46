//! Fixed pools of billboard particles for smoke and ash.
//!
//! A field allocates its whole pool up front. Each frame the active count
//! is derived from the gas density (or a manual fraction); particles with
//! an index below it are simulated and visible, the rest are hidden.
//! Particles that outlive their lifetime are recycled at the vent.
//!
//! ```ignore
//! let mut smoke = ParticleField::new(150, FieldProfile::smoke(), 7);
//! smoke.install_textures(TextureVariant::Default, bank.generate_set("smoke", 3, [200; 3]));
//!
//! let ctx = FrameContext { now, delta, camera: &camera };
//! smoke.update(&ctx, &params);
//! renderer.upload(bytemuck::cast_slice(&smoke.instances()));
//! ```

use super::particle::{BillboardInstance, Particle};
use super::physics::{self, Drift, ThermalState, REFERENCE_FPS};
use super::profile::{Activity, FieldProfile, Motion, Tint};
use super::spawn::Spawner;
use super::texture_state::{TextureSetState, TextureSlots, TextureVariant};
use crate::camera::Camera;
use crate::parameters::{Param, SimulationParameters};
use crate::textures::TextureSet;
use glam::{Quat, Vec3};

/// Newly activated particles have their births spread over this window.
pub const STAGGER_SECS: f32 = 1.0;

/// Respawned particles are born up to this far in the past.
pub const RESPAWN_SPREAD_SECS: f32 = 0.5;

/// Initial births are spread this far into the past.
pub const INITIAL_SPREAD_SECS: f32 = 2.5;

/// Per-frame color blend rate at the reference frame rate.
const COLOR_BLEND: f32 = 0.15;

/// Light smoke rises faster.
const LIGHT_LIFT: f32 = 1.5;

const DENSE_GREY: Vec3 = Vec3::splat(0.5);

/// Slack for fractions like 2/6 that land just under an integer count.
const ACTIVE_EPSILON: f32 = 1e-3;

/// Per-frame inputs shared by all fields.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext<'a> {
    /// Frame-clock time in seconds.
    pub now: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
    pub camera: &'a Camera,
}

/// A pool of particles driven by the eruption parameters.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    profile: FieldProfile,
    spawner: Spawner,
    textures: TextureSlots,
    activity: Activity,
    active: usize,
}

impl ParticleField {
    /// Allocate `capacity` particles, all hidden, with births spread over
    /// the last few seconds so the stream does not start in lockstep.
    pub fn new(capacity: usize, profile: FieldProfile, seed: u64) -> Self {
        let mut spawner = Spawner::new(seed);
        let particles = (0..capacity)
            .map(|_| {
                let offset = spawner.random_in_square(profile.spawn_jitter);
                Particle {
                    position: profile.spawn_point + offset,
                    velocity: Vec3::ZERO,
                    birth_time: -spawner.random() * INITIAL_SPREAD_SECS,
                    max_scale: spawner.random_range(profile.max_scale.0, profile.max_scale.1),
                    scale: profile.min_scale,
                    opacity: 0.0,
                    color: Vec3::ONE,
                    rotation: Quat::IDENTITY,
                    texture: None,
                    visible: false,
                }
            })
            .collect();

        let mut textures = TextureSlots::new();
        textures.request(profile.textures);

        Self {
            particles,
            activity: profile.activity,
            profile,
            spawner,
            textures,
            active: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn profile(&self) -> &FieldProfile {
        &self.profile
    }

    /// Number of particles simulated by the last update.
    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn texture_state(&self) -> TextureSetState {
        self.textures.state()
    }

    /// Drive the active count from a fixed fraction of the pool.
    pub fn set_active_fraction(&mut self, fraction: f32) {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.activity = Activity::Manual { fraction };
    }

    /// Drive the active count from the gas density parameter.
    pub fn follow_gas_density(&mut self) {
        self.activity = Activity::GasDensity;
    }

    pub fn install_textures(&mut self, variant: TextureVariant, set: TextureSet) {
        self.textures.install(variant, set);
    }

    /// Switch texture set; visible particles pick it up on the next update.
    pub fn on_regime_changed(&mut self, variant: TextureVariant) {
        self.textures.request(variant);
    }

    /// Hide everything. The next update restaggers from zero.
    pub fn hide_all(&mut self) {
        for particle in &mut self.particles {
            particle.visible = false;
        }
        self.active = 0;
    }

    /// Instance records for every visible particle.
    pub fn instances(&self) -> Vec<BillboardInstance> {
        self.particles
            .iter()
            .filter(|p| p.visible)
            .map(Particle::instance)
            .collect()
    }

    fn target_active(&self, gas: f32) -> usize {
        let fraction = match self.activity {
            Activity::GasDensity => gas,
            Activity::Manual { fraction } => fraction,
        };
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let count = (fraction * self.particles.len() as f32 + ACTIVE_EPSILON).floor() as usize;
        count.min(self.particles.len())
    }

    fn is_light(&self) -> bool {
        self.textures.wanted() == TextureVariant::White
    }

    /// Recycle particle `index` at the vent.
    fn respawn(&mut self, index: usize, birth_time: f32, gas: f32) {
        let offset = self.spawner.random_in_square(self.profile.spawn_jitter);
        let velocity = match self.profile.motion {
            Motion::Buoyant => Vec3::ZERO,
            Motion::Ballistic {
                launch_speed,
                spread,
                ..
            } => {
                let lateral = self.spawner.random_in_disk(spread);
                let up = launch_speed * (0.5 + 0.5 * gas) * self.spawner.random_range(0.7, 1.0);
                Vec3::new(lateral.x, up, lateral.z)
            }
        };
        let texture = self
            .textures
            .current()
            .and_then(|set| set.pick(self.spawner.rng()));

        let particle = &mut self.particles[index];
        particle.position = self.profile.spawn_point + offset;
        particle.velocity = velocity;
        particle.birth_time = birth_time;
        particle.scale = self.profile.min_scale;
        particle.texture = texture;
    }

    /// Advance every particle by one frame.
    pub fn update(&mut self, ctx: &FrameContext, params: &SimulationParameters) {
        if self.textures.state() == TextureSetState::Idle {
            if self.active > 0 || self.particles.iter().any(|p| p.visible) {
                self.hide_all();
            }
            return;
        }

        let now = ctx.now;
        let frame_scale = ctx.delta.max(0.0) * REFERENCE_FPS;
        let gas = finite_or_zero(params.normalized(Param::GasDensity));
        let depth = finite_or_zero(params.normalized(Param::Depth));
        let thermal = ThermalState::from_normalized(finite_or_zero(
            params.normalized(Param::Temperature),
        ));
        let lifetime = physics::lifetime(
            params.smoke_lifetime,
            gas,
            &thermal,
            self.profile.lifetime_scale,
        );
        let shallow = depth < self.profile.shallow_threshold;
        let depth_damp = physics::depth_dampening(depth);
        let light = self.is_light();

        // Pending texture swap applies to everything currently on screen.
        if let Some(set) = self.textures.take_transition() {
            log::debug!("applying new texture set to visible particles");
            for particle in self.particles.iter_mut().filter(|p| p.visible) {
                particle.texture = set.pick(self.spawner.rng());
            }
        }

        let active = self.target_active(gas);
        if active > self.active {
            let added = active - self.active;
            for i in self.active..active {
                let stagger = (i - self.active) as f32 / added as f32 * STAGGER_SECS;
                self.respawn(i, now - stagger, gas);
            }
            log::trace!("activated {} particles ({} -> {})", added, self.active, active);
        }
        self.active = active;

        let target_color = match self.profile.tint {
            Tint::GasDensity if light => Vec3::ONE,
            Tint::GasDensity => DENSE_GREY.lerp(Vec3::ONE, 1.0 - gas),
            Tint::Fixed { color } => color,
        };
        let blend = (COLOR_BLEND * frame_scale).min(1.0);
        let opacity_scale = physics::gas_opacity(gas);
        let size_scale = physics::gas_scale(gas);
        let wind = params.wind_speed * self.profile.wind_drift;
        let camera = ctx.camera.position();

        for index in 0..self.particles.len() {
            if index >= active {
                self.particles[index].visible = false;
                continue;
            }

            if self.particles[index].age(now) > lifetime {
                let birth = now - self.spawner.random() * RESPAWN_SPREAD_SECS;
                self.respawn(index, birth, gas);
            }

            let age = self.particles[index].age(now).max(0.0);
            let progress = (age / lifetime).min(1.0);

            match self.profile.motion {
                Motion::Buoyant => {
                    let preset = &thermal.preset;
                    let (dx, dz) = match thermal.drift {
                        Drift::Jiggle => (
                            self.spawner.centered(preset.drift_x),
                            self.spawner.centered(preset.drift_z),
                        ),
                        Drift::Directed => (preset.drift_x, preset.drift_z),
                    };
                    let force = preset.vertical_force * params.smoke_speed;
                    let mut up = self.spawner.random() * force + force / 2.0 + thermal.buoyancy_term();
                    if light {
                        up *= LIGHT_LIFT;
                    }
                    up *= physics::burst_factor(age, shallow);
                    up *= physics::age_damping(progress, shallow);

                    // Per-frame displacement, stored per second
                    let step = Vec3::new(dx + wind, up * params.smoke_height, dz) * depth_damp;
                    let particle = &mut self.particles[index];
                    particle.velocity = step * REFERENCE_FPS;
                    particle.position += step * frame_scale;
                }
                Motion::Ballistic { gravity, .. } => {
                    let dt = frame_scale / REFERENCE_FPS;
                    let particle = &mut self.particles[index];
                    particle.velocity.y -= gravity * dt;
                    let drift = Vec3::new(wind * REFERENCE_FPS, 0.0, 0.0);
                    particle.position += (particle.velocity + drift) * dt * depth_damp;
                }
            }

            let min_scale = self.profile.min_scale;
            let particle = &mut self.particles[index];
            let final_scale = particle.max_scale * size_scale;
            particle.scale = min_scale + (final_scale - min_scale) * progress;
            particle.opacity = (1.0 - progress) * opacity_scale;
            particle.color = particle.color.lerp(target_color, blend);
            particle.rotation = face_towards(particle.position, camera);
            particle.visible = true;
        }
    }
}

/// Billboard orientation turning +Z towards `eye`.
fn face_towards(position: Vec3, eye: Vec3) -> Quat {
    let dir = eye - position;
    if dir.length_squared() <= f32::EPSILON {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_arc(Vec3::Z, dir.normalize())
}

#[inline]
fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
