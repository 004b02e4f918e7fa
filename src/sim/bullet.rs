//! Short-lived projectile fired by the ship

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::SimConfig;
use crate::{rotate_deg, wrap_position};

/// A bullet entity, owned by the ship that fired it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames since firing
    pub age: u32,
    /// Frames the bullet lives for
    pub lifetime: u32,
}

impl Bullet {
    /// Fire from `origin` toward `angle` (degrees, 0 = up)
    pub fn new(origin: Vec2, angle: f32, config: &SimConfig) -> Self {
        Self {
            pos: origin,
            vel: rotate_deg(Vec2::new(0.0, -config.bullet_speed), angle),
            age: 0,
            lifetime: config.bullet_lifetime,
        }
    }

    /// Advance one frame
    pub fn step(&mut self, (width, height): (f32, f32)) {
        self.pos = wrap_position(self.pos + self.vel, width, height);
        self.age += 1;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.age < self.lifetime
    }
}
