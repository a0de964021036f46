//! End-to-end tests for the volcano scene and its particle fields.
//!
//! These drive whole components through the public API with a manual
//! frame clock, so every run is deterministic.

use volcano_fx::particles::{
    FieldProfile, FrameContext, ParticleField, TextureSetState, TextureVariant, STAGGER_SECS,
};
use volcano_fx::prelude::*;
use volcano_fx::{
    emission_radius, CameraAnimator, GeometryDeformer, Param, ParameterStore, Progress,
    RadiusOptions, RegimeClassifier, SimulationParameters, SoundId, StretchBand, TextureRef,
};
use volcano_fx::scheduler::Animation;

fn textures(ids: &[u32]) -> TextureSet {
    TextureSet::new(ids.iter().map(|&i| TextureRef(i)).collect())
}

fn smoke_field(capacity: usize) -> ParticleField {
    let mut field = ParticleField::new(capacity, FieldProfile::smoke(), 5);
    field.install_textures(TextureVariant::Default, textures(&[0, 1, 2]));
    field
}

fn gas(value: f32) -> SimulationParameters {
    SimulationParameters {
        gas_density: value,
        ..Default::default()
    }
}

fn textured_scene(config: SceneConfig) -> VolcanoScene {
    let mut scene = VolcanoScene::new(config);
    scene.attach_smoke_textures(TextureVariant::Default, textures(&[0, 1]));
    scene.attach_smoke_textures(TextureVariant::White, textures(&[2]));
    scene.attach_ash_textures(textures(&[3]));
    scene
}

// ============================================================================
// Particle field
// ============================================================================

#[test]
fn test_growth_staggers_births_over_one_second() {
    let camera = Camera::default();
    let mut field = smoke_field(150);

    let ctx = FrameContext { now: 10.0, delta: 1.0 / 60.0, camera: &camera };
    field.update(&ctx, &gas(2.0));
    assert_eq!(field.active_count(), 50);

    let now = 10.0 + 1.0 / 60.0;
    let ctx = FrameContext { now, delta: 1.0 / 60.0, camera: &camera };
    field.update(&ctx, &gas(3.0));
    assert_eq!(field.active_count(), 75);

    let births: Vec<f32> = field.particles()[50..75].iter().map(|p| p.birth_time).collect();
    for pair in births.windows(2) {
        assert!(pair[1] < pair[0], "births should be distinct and decreasing");
    }
    for (k, birth) in births.iter().enumerate() {
        let expected = now - k as f32 / 25.0 * STAGGER_SECS;
        assert!((birth - expected).abs() < 1e-4);
    }
    let spread = births[0] - births[24];
    assert!(spread > 0.9 && spread < STAGGER_SECS);
}

#[test]
fn test_no_gas_hides_everything() {
    let camera = Camera::default();
    let mut field = smoke_field(150);
    let ctx = FrameContext { now: 1.0, delta: 1.0 / 60.0, camera: &camera };

    field.update(&ctx, &gas(4.0));
    field.update(&ctx, &gas(0.0));
    assert_eq!(field.active_count(), 0);
    assert!(field.particles().iter().all(|p| !p.visible));
    assert!(field.instances().is_empty());
}

#[test]
fn test_full_gas_shows_everything() {
    let camera = Camera::default();
    let mut field = smoke_field(150);
    let ctx = FrameContext { now: 1.0, delta: 1.0 / 60.0, camera: &camera };

    field.update(&ctx, &gas(6.0));
    assert_eq!(field.active_count(), 150);
    assert!(field.particles().iter().all(|p| p.visible));
    assert_eq!(field.instances().len(), 150);
}

#[test]
fn test_lifetime_never_zero() {
    let camera = Camera::default();
    let mut field = smoke_field(20);
    let params = SimulationParameters {
        gas_density: 6.0,
        smoke_lifetime: 0.0,
        ..Default::default()
    };
    let mut now = 0.0;
    for _ in 0..30 {
        now += 1.0 / 60.0;
        let ctx = FrameContext { now, delta: 1.0 / 60.0, camera: &camera };
        field.update(&ctx, &params);
    }
    for particle in field.particles() {
        assert!(particle.opacity.is_finite());
        assert!(particle.scale.is_finite());
        assert!(particle.position.is_finite());
    }
}

// ============================================================================
// Components
// ============================================================================

#[test]
fn test_classifier_table_entries() {
    let classifier = RegimeClassifier::new();
    for point in classifier.table() {
        assert_eq!(classifier.classify(point.depth, point.gas), Some(point.regime));
    }
    assert_eq!(classifier.classify(20.0, 20.0), None);
    assert_eq!(classifier.classify(-3.0, 3.0), None);
}

#[test]
fn test_emission_radius_contract() {
    let opts = RadiusOptions::default();
    let mut props = serde_json::Map::new();
    props.insert("2010".into(), serde_json::json!(0));
    props.insert("2011".into(), serde_json::json!(10));
    assert_eq!(emission_radius(&props, 2010, &opts), 4.0);
    assert_eq!(emission_radius(&props, 2011, &opts), 4.0 + 3.0 * 11f64.log10());
}

#[test]
fn test_deformer_idempotent_after_convergence() {
    let mut deformer = GeometryDeformer::new(StretchBand::default());
    deformer.attach(vec![DeformableGeometry::new(vec![
        Vec3::new(1.0, 1.0, 20.0),
        Vec3::new(1.0, 1.0, 50.0),
        Vec3::new(1.0, 1.0, 95.0),
    ])]);
    deformer.set_target(0.3);
    while deformer.tick() {}
    let frozen = deformer.meshes()[0].positions().to_vec();
    assert_eq!(deformer.current(), 0.3);

    for _ in 0..10 {
        deformer.tick();
    }
    assert_eq!(deformer.meshes()[0].positions(), frozen.as_slice());
}

#[test]
fn test_animator_ignores_second_request() {
    let mut animator = CameraAnimator::new();
    let elsewhere = Pose::new(Vec3::new(0.0, 50.0, 0.0), Vec3::ZERO);
    assert!(animator.animate(elsewhere, Pose::DEFAULT, 1.0));
    animator.advance(0.0);
    assert!(!animator.animate(Pose::DEFAULT, elsewhere, 1.0));

    assert_eq!(animator.advance(2.0), Progress::Finished);
    assert_eq!(animator.pose(), Some(Pose::DEFAULT));
}

#[test]
fn test_parameter_round_trip() {
    let mut store = ParameterStore::new();
    for param in Param::ALL {
        let domain = param.domain();
        let mid = (domain.min + domain.max) / 2.0;
        assert_eq!(store.set(param, mid), mid);
        assert_eq!(store.get(param), mid);
        assert_eq!(store.set(param, domain.max + 100.0), domain.max);
        assert_eq!(store.set(param, f32::NAN), domain.clamp(0.0));
    }
}

// ============================================================================
// Scene
// ============================================================================

#[test]
fn test_startup_regime_raises_events() {
    let mut scene = textured_scene(SceneConfig::default());
    // Default depth 5, gas 2 sits on a transitional table entry
    assert_eq!(scene.regime(), Regime::Transitional);
    let events = scene.drain_events();
    assert!(events.contains(&SceneEvent::RegimeChanged {
        from: Regime::Idle,
        to: Regime::Transitional,
    }));
    assert!(events.contains(&SceneEvent::Sound(SoundId::MildEruption)));
    assert!(events.iter().any(|e| matches!(e, SceneEvent::InfoText(_))));
}

#[test]
fn test_same_regime_has_no_side_effects() {
    let mut scene = textured_scene(SceneConfig::default());
    scene.drain_events();

    // (5, 3) is also transitional
    scene.set_param(Param::GasDensity, 3.0);
    assert_eq!(scene.regime(), Regime::Transitional);
    assert!(scene.drain_events().is_empty());

    scene.set_param(Param::GasDensity, 5.0);
    assert_eq!(scene.regime(), Regime::Plinian);
    assert_eq!(scene.drain_events().len(), 3);
}

#[test]
fn test_weak_regime_switches_to_light_smoke() {
    let mut scene = textured_scene(SceneConfig::default());
    scene.set_param(Param::GasDensity, 0.0);
    assert_eq!(scene.regime(), Regime::Weak);
    assert!(!scene.shake().is_running());

    scene.set_param(Param::GasDensity, 1.0);
    scene.frame(1.0 / 60.0);
    for particle in scene.smoke().particles().iter().filter(|p| p.visible) {
        assert_eq!(particle.texture, Some(TextureRef(2)));
    }
    assert_eq!(scene.ash().active_count(), 0);
}

#[test]
fn test_plinian_fills_ash_pool() {
    let mut scene = textured_scene(SceneConfig::default());
    scene.set_param(Param::GasDensity, 6.0);
    scene.frame(1.0 / 60.0);
    assert_eq!(scene.ash().active_count(), scene.ash().capacity());
    assert_eq!(scene.smoke().active_count(), scene.smoke().capacity());
    assert!(scene.shake().is_running());
    assert_eq!(scene.shake().intensity(), 1.0);
}

#[test]
fn test_ash_shows_with_smoke_only_artwork() {
    let dir = std::env::temp_dir().join(format!("volcano-fx-textures-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let grey = dir.join("smoke.png");
    let white = dir.join("white.png");
    image::RgbaImage::from_pixel(4, 4, image::Rgba([180, 180, 180, 200])).save(&grey).unwrap();
    image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 255, 255, 200])).save(&white).unwrap();

    let mut config = SceneConfig::default();
    config.textures.smoke = vec![grey];
    config.textures.white_smoke = vec![white];
    assert!(config.textures.ash.is_empty());

    let mut bank = TextureBank::new();
    let mut scene = VolcanoScene::new(config);
    scene.load_textures(&mut bank);
    let _ = std::fs::remove_dir_all(&dir);

    scene.set_param(Param::GasDensity, 6.0);
    for _ in 0..60 {
        scene.frame(1.0 / 60.0);
    }
    assert_eq!(scene.smoke().active_count(), scene.smoke().capacity());
    assert!(scene.ash().active_count() > 0);
    assert!(!scene.ash().instances().is_empty());
    assert_ne!(scene.ash().texture_state(), TextureSetState::Idle);
}

#[test]
fn test_missing_texture_files_fall_back_to_generated_puffs() {
    let mut config = SceneConfig::default();
    config.textures.smoke = vec!["/nonexistent/smoke.png".into()];
    config.textures.white_smoke = Vec::new();

    let mut bank = TextureBank::new();
    let mut scene = VolcanoScene::new(config);
    scene.load_textures(&mut bank);
    assert!(!bank.is_empty());

    scene.set_param(Param::GasDensity, 6.0);
    scene.frame(1.0 / 60.0);
    assert_eq!(scene.smoke().instances().len(), scene.smoke().capacity());
    assert_eq!(scene.ash().instances().len(), scene.ash().capacity());
}

#[test]
fn test_teardown_cancels_animations() {
    let mut scene = textured_scene(SceneConfig::default());
    scene.attach_meshes(vec![DeformableGeometry::new(vec![Vec3::new(0.0, 0.0, 100.0)])]);
    scene.set_param(Param::Depth, 2.5);
    scene.set_param(Param::GasDensity, 6.0);
    scene.frame(1.0 / 60.0);
    assert!(scene.shake().is_running());
    assert!(scene.deformer().is_running());

    scene.teardown();
    assert!(!scene.is_live());
    assert!(!scene.shake().is_running());
    assert!(!scene.deformer().is_running());
    assert!(scene.smoke().instances().is_empty());
    assert!(scene.ash().instances().is_empty());

    let frames = scene.clock().frame();
    let camera = *scene.camera();
    for _ in 0..30 {
        assert!(!scene.frame(1.0 / 60.0));
    }
    assert_eq!(scene.clock().frame(), frames);
    assert_eq!(scene.camera().pose, camera.pose);
}

#[test]
fn test_camera_transition_ends_on_default_pose() {
    let mut scene = textured_scene(SceneConfig::default());
    scene.set_param(Param::GasDensity, 0.0);
    // Weak regime stopped the shake and queued a move home
    assert!(!scene.transition_camera_to_default());

    for _ in 0..(2 * 60) {
        scene.frame(1.0 / 60.0);
    }
    assert_eq!(scene.camera().pose, Pose::DEFAULT);
    assert!(scene.transition_camera_to_default());
}

#[test]
fn test_reset_restores_defaults() {
    let mut scene = textured_scene(SceneConfig::default());
    scene.set_param(Param::GasDensity, 6.0);
    scene.set_param(Param::Temperature, 20.0);
    scene.reset();
    assert_eq!(*scene.params(), SimulationParameters::default());
    assert_eq!(scene.regime(), Regime::Idle);
    assert_eq!(scene.camera().pose, Pose::DEFAULT);
}

#[test]
fn test_reset_is_independent_of_history() {
    // One scene resets straight after startup, the other after going Plinian
    let mut fresh = textured_scene(SceneConfig::default());
    let mut erupted = textured_scene(SceneConfig::default());
    erupted.set_param(Param::GasDensity, 6.0);
    erupted.frame(1.0 / 60.0);
    assert!(erupted.shake().is_running());

    for scene in [&mut fresh, &mut erupted] {
        scene.drain_events();
        scene.reset();

        assert_eq!(scene.regime(), Regime::Idle);
        assert!(!scene.shake().is_running());
        assert_eq!(scene.sounds().last_played(), Some(SoundId::Silence));
        assert_eq!(scene.ash().active_count(), 0);
        assert!(scene.smoke().instances().is_empty());
        assert!(scene.ash().instances().is_empty());

        let events = scene.drain_events();
        assert!(events.contains(&SceneEvent::Sound(SoundId::Silence)));
        assert!(events.contains(&SceneEvent::InfoCleared));

        scene.frame(1.0 / 60.0);
        assert!(!scene.shake().is_running());
        assert_eq!(scene.ash().active_count(), 0);
    }

    assert_eq!(fresh.params(), erupted.params());
    assert_eq!(fresh.camera().pose, erupted.camera().pose);
}

#[test]
fn test_reset_restores_default_smoke_textures() {
    let mut scene = textured_scene(SceneConfig::default());
    scene.set_param(Param::GasDensity, 0.0);
    scene.set_param(Param::GasDensity, 1.0);
    scene.frame(1.0 / 60.0);
    assert_eq!(scene.smoke().texture_state(), TextureSetState::Steady(TextureVariant::White));

    scene.reset();
    scene.frame(1.0 / 60.0);
    assert_eq!(scene.smoke().texture_state(), TextureSetState::Steady(TextureVariant::Default));
    for particle in scene.smoke().particles().iter().filter(|p| p.visible) {
        assert!(matches!(particle.texture, Some(TextureRef(0)) | Some(TextureRef(1))));
    }
}

#[test]
fn test_reclassifies_after_reset() {
    let mut scene = textured_scene(SceneConfig::default());
    scene.reset();
    scene.drain_events();
    scene.set_param(Param::GasDensity, 6.0);
    assert_eq!(scene.regime(), Regime::Plinian);
    assert!(scene.drain_events().contains(&SceneEvent::RegimeChanged {
        from: Regime::Idle,
        to: Regime::Plinian,
    }));
}
