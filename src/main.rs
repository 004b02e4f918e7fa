//! Asteroid Speller entry point
//!
//! Headless runner: loads settings, then lets the demo pilot play with the
//! audio and render sinks reporting through the log. `RUST_LOG=debug` shows
//! the per-second status lines.

use std::time::{SystemTime, UNIX_EPOCH};

use asteroid_speller::consts::TARGET_FPS;
use asteroid_speller::render::LogRenderer;
use asteroid_speller::sim::TickInput;
use asteroid_speller::{AudioManager, FrameClock, Game, MusicTrack, Settings};

const DEFAULT_SETTINGS_PATH: &str = "asteroid_speller.json";

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Asteroid Speller (headless) starting...");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let settings = Settings::load_from(&path);

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    log::info!("Seed {} (target word {:?})", seed, settings.sim.target_word);

    let mut audio = AudioManager::from_settings(&settings);
    audio.play_music(MusicTrack::Background);
    let renderer = LogRenderer::new(settings.log_interval);
    let game = Game::with_sinks(settings.sim.clone(), seed, Box::new(audio), Box::new(renderer));
    let mut game = match game {
        Ok(game) => game,
        Err(e) => {
            log::error!("Invalid simulation config: {}", e);
            std::process::exit(1);
        }
    };

    if !settings.autopilot {
        // No keyboard backend yet: an idle ship just drifts until the rocks find it
        log::warn!("Autopilot disabled - the ship will sit idle");
    }
    let input = TickInput {
        autopilot: settings.autopilot,
        ..Default::default()
    };
    let clock = settings.realtime.then(|| FrameClock::new(TARGET_FPS));
    game.run(|_| input.clone(), clock, settings.max_frames);

    let state = &game.state;
    log::info!(
        "Stopped after {} frames: {:?}, {} rounds, collected {:?}",
        state.frame,
        state.phase,
        state.rounds,
        state.collected_sorted()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front-end; the library is the wasm surface
}
