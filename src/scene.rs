//! The volcano scene: one owner for every animated component.
//!
//! [`VolcanoScene`] holds the parameters, the regime classifier, the smoke
//! and ash fields, the model deformer and the camera animations. The UI
//! writes parameters through it and the frame loop calls
//! [`VolcanoScene::frame`] once per rendered frame. Everything the UI must
//! react to (regime changes, info text, sound) comes back out as
//! [`SceneEvent`]s.
//!
//! ```ignore
//! let mut scene = VolcanoScene::new(SceneConfig::default());
//! scene.load_textures(&mut bank);
//! scene.attach_meshes(meshes);
//!
//! scene.set_param(Param::GasDensity, 5.0);
//! loop {
//!     scene.frame(1.0 / 60.0);
//!     for event in scene.drain_events() {
//!         ui.handle(event);
//!     }
//!     renderer.draw(scene.camera(), &scene.smoke().instances(), &scene.ash().instances());
//! }
//! ```

use crate::camera::{Camera, CameraAnimator, Pose};
use crate::config::SceneConfig;
use crate::deform::{DeformableGeometry, GeometryDeformer};
use crate::error::ParameterError;
use crate::eruption::{EruptionFeatures, SmokeType, SoundId};
use crate::parameters::{Param, ParameterStore, SimulationParameters};
use crate::particles::{FieldProfile, FrameContext, ParticleField, TextureVariant};
use crate::regime::{Regime, RegimeClassifier, RegimeTracker};
use crate::scheduler::{Animation, Scheduler};
use crate::shake::CameraShake;
use crate::sound::{AudioSink, NullSink, SoundSelector};
use crate::textures::{TextureBank, TextureSet};
use crate::time::FrameClock;

/// Generated stand-ins per field when no texture file loads.
const GENERATED_PUFFS: usize = 3;
const SMOKE_PUFF: [u8; 3] = [180, 180, 180];
const ASH_PUFF: [u8; 3] = [60, 55, 50];

/// Something the UI should react to.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    RegimeChanged { from: Regime, to: Regime },
    /// New text for the info box.
    InfoText(&'static str),
    /// The info box should go back to its empty state.
    InfoCleared,
    /// The selected sound changed.
    Sound(SoundId),
}

/// Owning context of the volcano model view.
pub struct VolcanoScene {
    config: SceneConfig,
    params: ParameterStore,
    classifier: RegimeClassifier,
    tracker: RegimeTracker,
    smoke: ParticleField,
    ash: ParticleField,
    deformer: GeometryDeformer,
    animator: CameraAnimator,
    shake: CameraShake,
    camera: Camera,
    clock: FrameClock,
    scheduler: Scheduler,
    sounds: SoundSelector,
    audio: Box<dyn AudioSink>,
    events: Vec<SceneEvent>,
}

impl VolcanoScene {
    pub fn new(config: SceneConfig) -> Self {
        let params = ParameterStore::with_values(config.parameters);
        let seed = config.seed;

        let smoke_profile = FieldProfile::smoke()
            .with_spawn_point(config.spawn_point)
            .with_spawn_jitter(config.spawn_jitter);
        let ash_profile = FieldProfile::ash().with_spawn_point(config.spawn_point);

        let mut deformer = GeometryDeformer::new(config.stretch);
        deformer.set_target(params.normalized(Param::Depth));

        let mut scene = Self {
            smoke: ParticleField::new(config.smoke_capacity, smoke_profile, seed),
            ash: ParticleField::new(config.ash_capacity, ash_profile, seed.wrapping_add(1)),
            shake: CameraShake::new(seed.wrapping_add(2)),
            camera: Camera::new(config.default_pose),
            params,
            classifier: RegimeClassifier::new(),
            tracker: RegimeTracker::new(),
            deformer,
            animator: CameraAnimator::new(),
            clock: FrameClock::new(),
            scheduler: Scheduler::new(),
            sounds: SoundSelector::default(),
            audio: Box::new(NullSink),
            events: Vec::new(),
            config,
        };
        scene.reclassify();
        scene
    }

    /// Route sound selection to a real audio backend.
    pub fn with_audio(mut self, sink: Box<dyn AudioSink>) -> Self {
        self.audio = sink;
        self
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn params(&self) -> &SimulationParameters {
        self.params.values()
    }

    pub fn parameter_store(&self) -> &ParameterStore {
        &self.params
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn smoke(&self) -> &ParticleField {
        &self.smoke
    }

    pub fn ash(&self) -> &ParticleField {
        &self.ash
    }

    pub fn deformer(&self) -> &GeometryDeformer {
        &self.deformer
    }

    pub fn shake(&self) -> &CameraShake {
        &self.shake
    }

    pub fn sounds(&self) -> &SoundSelector {
        &self.sounds
    }

    /// Last classified regime. Unclassifiable inputs leave it unchanged and
    /// [`VolcanoScene::reset`] returns it to [`Regime::Idle`].
    pub fn regime(&self) -> Regime {
        self.tracker.current()
    }

    /// Eruption column height in km for the current inputs, if classifiable.
    pub fn plume_height(&self) -> Option<f32> {
        let values = self.params.values();
        self.classifier
            .nearest(values.depth, values.gas_density)
            .map(|point| point.plume_height(values.wind_speed))
    }

    /// Whether frames are being driven (false after teardown).
    pub fn is_live(&self) -> bool {
        self.scheduler.is_live()
    }

    /// Take every event raised since the last call.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    /// Set a parameter. Returns the stored (clamped) value.
    pub fn set_param(&mut self, param: Param, value: f32) -> f32 {
        let stored = self.params.set(param, value);
        self.on_param_changed(param);
        stored
    }

    /// Set a parameter by UI name from raw slider text.
    pub fn set_param_str(&mut self, name: &str, raw: &str) -> Result<f32, ParameterError> {
        let param: Param = name.parse()?;
        let stored = self.params.set_str(name, raw)?;
        self.on_param_changed(param);
        Ok(stored)
    }

    fn on_param_changed(&mut self, param: Param) {
        match param {
            Param::Depth => {
                self.deformer.set_target(self.params.normalized(Param::Depth));
                self.reclassify();
            }
            Param::GasDensity => self.reclassify(),
            _ => {}
        }
    }

    fn reclassify(&mut self) {
        let values = *self.params.values();
        let Some(regime) = self.classifier.classify(values.depth, values.gas_density) else {
            log::debug!(
                "no regime near depth {} gas {}, keeping {}",
                values.depth,
                values.gas_density,
                self.tracker.current()
            );
            return;
        };
        let from = self.tracker.current();
        if let Some(to) = self.tracker.observe(regime) {
            self.apply_regime(from, to);
        }
    }

    fn apply_regime(&mut self, from: Regime, to: Regime) {
        log::info!("Eruption regime {} -> {}", from, to);
        let features = EruptionFeatures::of(to);
        self.events.push(SceneEvent::RegimeChanged { from, to });

        match features.smoke {
            Some(SmokeType::Light) => self.smoke.on_regime_changed(TextureVariant::White),
            Some(SmokeType::Dark) => self.smoke.on_regime_changed(TextureVariant::Default),
            None => {}
        }
        self.ash.set_active_fraction(features.ash.active_fraction());

        match features.shake_intensity {
            Some(intensity) if self.shake.is_running() => self.shake.set_intensity(intensity),
            Some(intensity) => {
                self.animator.cancel();
                self.shake.start(self.camera.pose, intensity);
            }
            None if self.shake.is_running() => {
                self.shake.cancel();
                self.transition_camera_to_default();
            }
            None => {}
        }

        self.sounds.set_sound(features.sound, self.audio.as_mut());
        self.events.push(SceneEvent::Sound(features.sound));

        if let Some(text) = features.info_text {
            self.events.push(SceneEvent::InfoText(text));
        }
    }

    /// Ease the camera to `to`. Returns `false` if a transition is already running.
    pub fn transition_camera_to(&mut self, to: Pose) -> bool {
        let duration = self.config.transition_secs;
        self.animator.animate(self.camera.pose, to, duration)
    }

    pub fn transition_camera_to_default(&mut self) -> bool {
        let to = self.config.default_pose;
        self.transition_camera_to(to)
    }

    /// Install a texture set on the smoke field.
    pub fn attach_smoke_textures(&mut self, variant: TextureVariant, set: TextureSet) {
        self.smoke.install_textures(variant, set);
    }

    pub fn attach_ash_textures(&mut self, set: TextureSet) {
        self.ash.install_textures(TextureVariant::Ash, set);
    }

    /// Load every configured texture into `bank` and install the sets.
    ///
    /// Files that fail to load are skipped. A field left with nothing to
    /// draw gets generated puffs, so ash still shows when only smoke
    /// artwork is configured. Missing white smoke falls back to the default
    /// smoke set.
    pub fn load_textures(&mut self, bank: &mut TextureBank) {
        let mut smoke = bank.load_set(self.config.textures.for_variant(TextureVariant::Default));
        let white = bank.load_set(self.config.textures.for_variant(TextureVariant::White));
        if smoke.is_empty() && white.is_empty() {
            log::warn!("No smoke textures loaded, using generated puffs");
            smoke = bank.generate_set("smoke_puff", GENERATED_PUFFS, SMOKE_PUFF);
        }
        self.smoke.install_textures(TextureVariant::Default, smoke);
        self.smoke.install_textures(TextureVariant::White, white);

        let mut ash = bank.load_set(self.config.textures.for_variant(TextureVariant::Ash));
        if ash.is_empty() {
            log::info!("No ash textures loaded, using generated puffs");
            ash = bank.generate_set("ash_puff", GENERATED_PUFFS, ASH_PUFF);
        }
        self.ash.install_textures(TextureVariant::Ash, ash);
    }

    /// Hand over the model meshes to stretch. Deforming starts right away
    /// if a depth target is pending.
    pub fn attach_meshes(&mut self, meshes: Vec<DeformableGeometry>) {
        self.deformer.attach(meshes);
    }

    /// Switch audio on, playing the current selection.
    pub fn enable_audio(&mut self) {
        self.sounds.resume(self.audio.as_mut());
    }

    pub fn mute_audio(&mut self) {
        self.sounds.pause(self.audio.as_mut());
    }

    /// Advance the scene by `delta` seconds. Returns `false` after teardown.
    pub fn frame(&mut self, delta: f32) -> bool {
        if !self.scheduler.is_live() {
            return false;
        }
        let (now, delta) = self.clock.tick(delta);
        self.step(now, delta);
        true
    }

    /// Advance the scene using wall time.
    pub fn frame_realtime(&mut self) -> bool {
        if !self.scheduler.is_live() {
            return false;
        }
        let (now, delta) = self.clock.update();
        self.step(now, delta);
        true
    }

    fn step(&mut self, now: f32, delta: f32) {
        let animating = self.animator.is_running();
        {
            let mut tasks: [&mut dyn Animation; 3] =
                [&mut self.deformer, &mut self.animator, &mut self.shake];
            self.scheduler.run_frame(now, &mut tasks);
        }

        if self.shake.is_running() {
            if let Some(pose) = self.shake.pose() {
                self.camera.pose = pose;
            }
        } else if animating {
            if let Some(pose) = self.animator.pose() {
                self.camera.pose = pose;
            }
        }

        let params = *self.params.values();
        let ctx = FrameContext {
            now,
            delta,
            camera: &self.camera,
        };
        self.smoke.update(&ctx, &params);
        self.ash.update(&ctx, &params);
    }

    /// Stop everything: cancel animations, hide particles, silence audio.
    /// [`VolcanoScene::frame`] does nothing until [`VolcanoScene::resume`].
    pub fn teardown(&mut self) {
        {
            let mut tasks: [&mut dyn Animation; 3] =
                [&mut self.deformer, &mut self.animator, &mut self.shake];
            self.scheduler.teardown(&mut tasks);
        }
        self.smoke.hide_all();
        self.ash.hide_all();
        self.sounds.pause(self.audio.as_mut());
        log::info!("Scene torn down");
    }

    /// Restart after [`VolcanoScene::teardown`], picking up the current regime.
    pub fn resume(&mut self) {
        if self.scheduler.is_live() {
            return;
        }
        self.scheduler.resume();
        self.deformer.set_target(self.params.normalized(Param::Depth));
        if let Some(intensity) = EruptionFeatures::of(self.tracker.current()).shake_intensity {
            self.shake.start(self.camera.pose, intensity);
        }
        log::info!("Scene resumed in {} regime", self.tracker.current());
    }

    /// Return to the pre-eruption state: default parameters, resting
    /// camera, no shake, silence, hidden particles and default smoke.
    ///
    /// The regime is [`Regime::Idle`] afterwards whatever came before; the
    /// next depth or gas change classifies again.
    pub fn reset(&mut self) {
        self.shake.cancel();
        self.animator.cancel();
        self.camera.pose = self.config.default_pose;
        self.params = ParameterStore::with_values(self.config.parameters);
        self.deformer.set_target(self.params.normalized(Param::Depth));

        let from = self.tracker.current();
        self.tracker.reset();
        let idle = EruptionFeatures::of(Regime::Idle);

        self.smoke.hide_all();
        self.smoke.on_regime_changed(TextureVariant::Default);
        self.ash.hide_all();
        self.ash.set_active_fraction(idle.ash.active_fraction());
        self.sounds.set_sound(idle.sound, self.audio.as_mut());

        if from != Regime::Idle {
            self.events.push(SceneEvent::RegimeChanged { from, to: Regime::Idle });
        }
        self.events.push(SceneEvent::Sound(idle.sound));
        self.events.push(SceneEvent::InfoCleared);
        log::info!("Scene reset from {} regime", from);
    }
}
