//! Asteroid Speller - a wrap-around asteroid shooter with a spelling twist
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `audio`: Sound event sink
//! - `render`: Per-frame snapshot handed to a render sink
//! - `game`: Frame-paced runner tying the simulation to its sinks
//! - `settings`: Player preferences and simulation overrides

pub mod audio;
pub mod game;
pub mod render;
pub mod settings;
pub mod sim;

pub use audio::{AudioManager, MusicTrack, NullSound, SoundEvent, SoundSink};
pub use game::{FrameClock, Game};
pub use render::{Frame, RenderSink};
pub use settings::Settings;

use glam::Vec2;

/// Default gameplay constants (overridable through `sim::SimConfig`)
pub mod consts {
    /// Target frame rate of the simulation loop
    pub const TARGET_FPS: u32 = 60;

    /// Playfield dimensions (wraps on every edge)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ship handling
    pub const SHIP_TURN_SPEED: f32 = 4.0; // degrees per frame
    pub const SHIP_ACCEL: f32 = 0.25;
    pub const SHIP_FRICTION: f32 = 0.985;
    pub const SHIP_MAX_SPEED: f32 = 6.0;
    pub const SHIP_COOLDOWN: u32 = 12; // frames between shots
    pub const SHIP_LIVES: u32 = 3;
    /// Invincibility after a hit (3 seconds at 60 Hz)
    pub const INVINCIBILITY_FRAMES: u32 = 180;
    /// Ship blinks on/off with this half-period while invincible
    pub const BLINK_PERIOD_FRAMES: u32 = 10;

    /// Bullets
    pub const BULLET_SPEED: f32 = 12.0;
    pub const BULLET_LIFETIME: u32 = 60; // frames

    /// Asteroids
    pub const ASTEROID_MIN_SPEED: f32 = 1.0;
    pub const ASTEROID_MAX_SPEED: f32 = 3.0;
    /// Children fan out within +/- this many degrees of the parent heading
    pub const SPLIT_SPREAD_DEG: f32 = 35.0;
    pub const SPLIT_SPEED_FACTOR: f32 = 1.2;
    pub const MIN_ASTEROIDS: usize = 6;
    pub const FIELD_LETTER_COUNT: usize = 8;

    pub const DEFAULT_TARGET_WORD: &str = "COMET";
}

/// Rotate a vector by an angle in degrees.
///
/// Uses the screen convention: with y pointing down, `(0, -1)` is "up" and
/// positive angles turn clockwise.
#[inline]
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Reflect `v` off the line whose normal is `normal`
///
/// Standard reflection: v' = v - 2(v·n)n, with n normalized.
/// A zero-length normal leaves `v` unchanged.
#[inline]
pub fn reflect(v: Vec2, normal: Vec2) -> Vec2 {
    let n = normal.normalize_or_zero();
    if n == Vec2::ZERO {
        return v;
    }
    v - 2.0 * v.dot(n) * n
}

/// True modulo into `[0, max)`, also for negative input
#[inline]
pub fn wrap_coordinate(value: f32, max: f32) -> f32 {
    let wrapped = value.rem_euclid(max);
    // rem_euclid can round up to exactly `max` for tiny negative inputs
    if wrapped >= max { 0.0 } else { wrapped }
}

/// Map a position onto the toroidal field `[0, width) x [0, height)`
#[inline]
pub fn wrap_position(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(wrap_coordinate(pos.x, width), wrap_coordinate(pos.y, height))
}

/// Angle (degrees, 0 = up, clockwise positive) pointing along `dir`
#[inline]
pub fn heading_deg(dir: Vec2) -> f32 {
    dir.x.atan2(-dir.y).to_degrees()
}

/// Normalize an angle in degrees to [-180, 180)
#[inline]
pub fn normalize_deg(angle: f32) -> f32 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rotate_up_clockwise() {
        let up = Vec2::new(0.0, -1.0);

        let right = rotate_deg(up, 90.0);
        assert!((right.x - 1.0).abs() < 1e-5);
        assert!(right.y.abs() < 1e-5);

        let left = rotate_deg(up, -90.0);
        assert!((left.x + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_heading_matches_rotation() {
        let up = Vec2::new(0.0, -5.0);
        for angle in [-170.0_f32, -90.0, -30.0, 0.0, 45.0, 120.0] {
            let dir = rotate_deg(up, angle);
            assert!((heading_deg(dir) - angle).abs() < 1e-3, "angle {}", angle);
        }
    }

    #[test]
    fn test_reflect() {
        // Moving right, reflected off a vertical wall (normal pointing left)
        let r = reflect(Vec2::new(3.0, 1.0), Vec2::new(-2.0, 0.0));
        assert!((r.x + 3.0).abs() < 1e-5);
        assert!((r.y - 1.0).abs() < 1e-5);

        // Degenerate normal
        assert_eq!(reflect(Vec2::new(3.0, 1.0), Vec2::ZERO), Vec2::new(3.0, 1.0));
    }

    #[test]
    fn test_wrap_negative() {
        assert_eq!(wrap_coordinate(-10.0, 800.0), 790.0);
        assert_eq!(wrap_coordinate(810.0, 800.0), 10.0);
        assert_eq!(wrap_coordinate(800.0, 800.0), 0.0);
        assert_eq!(wrap_coordinate(-1e-9, 800.0), 0.0);
    }

    #[test]
    fn test_normalize_deg() {
        assert_eq!(normalize_deg(190.0), -170.0);
        assert_eq!(normalize_deg(-190.0), 170.0);
        assert_eq!(normalize_deg(45.0), 45.0);
    }

    proptest! {
        #[test]
        fn wrap_stays_in_field(x in -1.0e6f32..1.0e6, y in -1.0e6f32..1.0e6) {
            let p = wrap_position(Vec2::new(x, y), 800.0, 600.0);
            prop_assert!(p.x >= 0.0 && p.x < 800.0);
            prop_assert!(p.y >= 0.0 && p.y < 600.0);
        }
    }
}
