//! Clay chisel - headless sculpting session
//!
//! Loads the configuration, builds the pot scene and drives the chisel tool
//! through a scripted pair of hands, logging what the tool does each frame.

use clay_chisel::config::AppConfig;
use clay_chisel::input::RawInput;
use clay_chisel::scene::SceneBuilder;
use clay_chisel::systems::SessionSystem;

use chisel_input::{HandPair, PointerView};
use chisel_math::Vec3;
use chisel_volume::Volume;

/// Frames in the scripted session
const FRAMES: usize = 60;

/// Scripted hand poses: both hands glide toward the pot with a little tremor
fn hands_at(frame: usize, start: HandPair<Vec3>) -> HandPair<Vec3> {
    let glide = Vec3::new(0.0, 0.0, 0.002 * frame as f32);
    let tremor = if frame % 2 == 0 { 0.0 } else { 0.0003 };
    start.map(|p| p + glide + Vec3::new(tremor, 0.0, 0.0))
}

/// Raw input the script presses on a given frame
fn input_at(frame: usize) -> Vec<RawInput> {
    match frame {
        f if f > 0 && f % 10 == 0 => vec![RawInput::TriggerPressed, RawInput::TriggerReleased],
        25 => vec![RawInput::Thumbstick { x: 0.5, y: 0.0 }],
        45 => vec![RawInput::ResetPressed, RawInput::ResetReleased],
        _ => Vec::new(),
    }
}

fn main() {
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.debug.log_level))
        .init();
    log::info!("Starting clay chisel session");
    if let Err(e) = &loaded {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    let mut scene = match SceneBuilder::from_config(&config) {
        Ok(builder) => builder.build(),
        Err(e) => {
            log::error!("Failed to build scene: {}", e);
            std::process::exit(1);
        }
    };
    let pot = scene.first_volume();
    let filled_before = pot
        .and_then(|key| scene.get_volume(key))
        .map(|v| v.filled_count())
        .unwrap_or(0);

    // Primary hand behind the pot's centre line, secondary a hand-width in front
    let center = pot
        .and_then(|key| scene.get_volume(key))
        .map(|v| v.center())
        .unwrap_or(Vec3::new(0.0, 1.0, 0.5));
    let start = HandPair::new(
        Vec3::new(center.x + 0.005, center.y + 0.005, 0.0),
        Vec3::new(center.x + 0.005, center.y + 0.005, 0.1),
    );

    let mut view = PointerView::default();
    let mut session = SessionSystem::from_config(&config, start, pot);
    session.enable(start, &mut view);

    let mut locked_frames = 0;
    for frame in 0..FRAMES {
        for input in input_at(frame) {
            session.push_raw(input);
        }
        let result = session.update(hands_at(frame, start), &mut scene, &mut view);
        if !result.target.is_sentinel() {
            locked_frames += 1;
        }
        log::trace!(
            "frame {}: target {} cursor {}",
            frame,
            result.target,
            if view.cursor_visible { "shown" } else { "hidden" }
        );
    }

    session.disable(hands_at(FRAMES, start), &mut view);

    let (filled_after, rotation) = pot
        .and_then(|key| scene.get_volume(key))
        .map(|v| (v.filled_count(), v.rotation()))
        .unwrap_or((0, 0.0));
    log::info!(
        "Session finished: locked on {}/{} frames, filled cells {} -> {}, pot at {:.1} degrees",
        locked_frames,
        FRAMES,
        filled_before,
        filled_after,
        rotation
    );
}
