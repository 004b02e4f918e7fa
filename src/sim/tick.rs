//! Fixed-rate simulation tick
//!
//! Core game loop step that advances the simulation deterministically.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{asteroids_vs_asteroids, bullets_vs_asteroids, ship_vs_asteroids};
use super::state::{GamePhase, GameState};
use crate::audio::{SoundEvent, SoundSink};
use crate::{heading_deg, normalize_deg};

/// Key state for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub fire: bool,
    /// Any key went down this frame (restarts from the win/loss screen)
    pub any_key: bool,
    /// Idle/demo mode - the simulation flies the ship itself
    pub autopilot: bool,
}

/// Frames the autopilot lingers on the win/loss screen before restarting
pub const AUTOPILOT_RESTART_DELAY: u64 = 120;

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, sound: &mut dyn SoundSink) {
    let input = if input.autopilot {
        autopilot_input(state)
    } else {
        input.clone()
    };

    state.frame += 1;

    if state.phase.is_over() {
        if !input.any_key {
            return;
        }
        state.restart();
    }

    // Ship
    state.ship.apply_input(&input, &state.config, sound);
    state.ship.step(&state.config);

    // Bullets vs asteroids
    let population = std::mem::take(&mut state.asteroids);
    let pass = bullets_vs_asteroids(
        &mut state.ship.bullets,
        population,
        &state.config,
        &mut state.rng,
    );
    state.asteroids = pass.asteroids;
    for letter in pass.collected {
        state.collected.push(letter);
        sound.play(SoundEvent::AsteroidHit);
        if state.phase == GamePhase::Playing && state.word_complete() {
            log::info!("spelled {:?} with {:?}", state.config.target_word, state.collected);
            sound.play(SoundEvent::Victory);
            state.set_phase(GamePhase::Won);
        }
    }

    // Ship vs asteroids
    if state.phase == GamePhase::Playing
        && ship_vs_asteroids(&mut state.ship, &state.asteroids, &state.config)
    {
        log::info!("ship hit, {} lives left", state.ship.lives);
        sound.play(SoundEvent::ShipHit);
        if state.ship.lives == 0 {
            sound.play(SoundEvent::GameOver);
            state.set_phase(GamePhase::Lost);
        }
    }

    // Asteroid motion
    let field = state.config.field();
    for asteroid in &mut state.asteroids {
        asteroid.step(field);
    }
    if state.config.asteroid_bounce {
        asteroids_vs_asteroids(&mut state.asteroids);
    }

    if state.phase == GamePhase::Playing {
        state.replenish();
    }
}

/// Shortest offset from `from` to `to` on the wrap-around field
fn wrapped_delta(from: Vec2, to: Vec2, (width, height): (f32, f32)) -> Vec2 {
    let d = to - from;
    Vec2::new(
        (d.x + width / 2.0).rem_euclid(width) - width / 2.0,
        (d.y + height / 2.0).rem_euclid(height) - height / 2.0,
    )
}

/// Input the demo pilot would press this frame
///
/// Turns toward the nearest asteroid, fires once roughly lined up, closes
/// distance when far away, and restarts after a pause on the end screen.
pub fn autopilot_input(state: &GameState) -> TickInput {
    let mut input = TickInput::default();

    if state.phase.is_over() {
        input.any_key = state.frame.saturating_sub(state.phase_frame) >= AUTOPILOT_RESTART_DELAY;
        return input;
    }

    let ship = &state.ship;
    let field = state.config.field();
    let nearest = state
        .asteroids
        .iter()
        .map(|a| (a, wrapped_delta(ship.pos, a.pos, field)))
        .min_by(|(_, a), (_, b)| a.length().total_cmp(&b.length()));

    let Some((target, delta)) = nearest else {
        return input;
    };

    let diff = normalize_deg(heading_deg(delta) - ship.angle);
    let half_step = state.config.ship_turn_speed / 2.0;
    input.turn_right = diff > half_step;
    input.turn_left = diff < -half_step;
    input.fire = diff.abs() < 10.0;

    let distance = delta.length();
    input.thrust = diff.abs() < 30.0 && distance > target.radius + 200.0;

    input
}
