//! Headless runner: drives a scene at a fixed 60 fps and logs what happens.
//!
//! ```text
//! volcano-fx [config.json] [seconds] [name=value ...]
//! RUST_LOG=debug volcano-fx scene.json 20 gas=5 depth=8
//! ```

use std::env;
use std::path::PathBuf;

use volcano_fx::prelude::*;

const FPS: f32 = 60.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config_path = args.first().filter(|a| !a.contains('=')).map(PathBuf::from);
    let rest = if config_path.is_some() { &args[1..] } else { &args[..] };

    let config = match &config_path {
        Some(path) => match SceneConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to load config from {:?}: {}", path, e);
                log::warn!("Using default configuration.");
                SceneConfig::default()
            }
        },
        None => SceneConfig::default(),
    };

    let seconds = rest
        .first()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(10.0)
        .max(0.0);

    let mut scene = VolcanoScene::new(config);

    let mut bank = TextureBank::new();
    scene.load_textures(&mut bank);
    log::info!("{} textures in bank", bank.len());

    // Stand-in for the model: a ring of vertices every 10 units up the cone
    let cone: Vec<Vec3> = (0..=12)
        .flat_map(|level| {
            let z = level as f32 * 10.0;
            let r = 60.0 - z * 0.4;
            (0..16).map(move |i| {
                let a = i as f32 / 16.0 * std::f32::consts::TAU;
                Vec3::new(r * a.cos(), r * a.sin(), z)
            })
        })
        .collect();
    scene.attach_meshes(vec![DeformableGeometry::new(cone)]);

    for assignment in rest.iter().filter(|a| a.contains('=')) {
        let (name, raw) = assignment.split_once('=').unwrap_or((assignment.as_str(), ""));
        match scene.set_param_str(name, raw) {
            Ok(value) => log::info!("{} = {}", name, value),
            Err(e) => log::warn!("{}", e),
        }
    }

    let frames = (seconds * FPS).round() as u64;
    for frame in 0..frames {
        scene.frame(1.0 / FPS);

        for event in scene.drain_events() {
            match event {
                SceneEvent::RegimeChanged { from, to } => log::info!("regime: {} -> {}", from, to),
                SceneEvent::InfoText(text) => {
                    log::info!("info: {}", text.lines().next().unwrap_or_default())
                }
                SceneEvent::InfoCleared => log::info!("info cleared"),
                SceneEvent::Sound(sound) => log::info!("sound: {}", sound),
            }
        }

        if frame % FPS as u64 == 0 {
            let camera = scene.camera().position();
            log::info!(
                "t={:.1}s smoke={} ash={} stretch={:.3} plume={} camera=({:.2}, {:.2}, {:.2})",
                scene.clock().now(),
                scene.smoke().active_count(),
                scene.ash().active_count(),
                scene.deformer().current(),
                scene
                    .plume_height()
                    .map_or_else(|| "-".to_string(), |h| format!("{:.1}km", h)),
                camera.x,
                camera.y,
                camera.z,
            );
        }
    }

    scene.teardown();
}
