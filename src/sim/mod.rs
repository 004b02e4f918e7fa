//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (asteroid population is an ordered Vec)
//! - No rendering, audio backend or platform dependencies

pub mod asteroid;
pub mod bullet;
pub mod collision;
pub mod config;
pub mod letters;
pub mod ship;
pub mod state;
pub mod tick;

pub use asteroid::{Asteroid, AsteroidSize, HitOutcome};
pub use bullet::Bullet;
pub use collision::{BulletPass, asteroids_vs_asteroids, bullets_vs_asteroids, ship_vs_asteroids};
pub use config::{AsteroidTiers, ConfigError, SimConfig, TierSpec};
pub use letters::{LETTER_SCORES, LetterPool, build_frequency_list, make_field_letters};
pub use ship::Ship;
pub use state::{Edge, GamePhase, GameState};
pub use tick::{TickInput, autopilot_input, tick};
