//! Letter-carrying asteroids
//!
//! Three size tiers. Large and medium rocks split in two when their hit points
//! run out; small ones give up their letter instead.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::SimConfig;
use crate::{reflect, rotate_deg, wrap_position};

/// Asteroid size tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Small = 1,
    Medium = 2,
    Large = 3,
}

impl AsteroidSize {
    pub const ALL: [AsteroidSize; 3] = [
        AsteroidSize::Small,
        AsteroidSize::Medium,
        AsteroidSize::Large,
    ];

    /// Tier from its numeric level (1 = small .. 3 = large)
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(AsteroidSize::Small),
            2 => Some(AsteroidSize::Medium),
            3 => Some(AsteroidSize::Large),
            _ => None,
        }
    }

    #[inline]
    pub fn level(&self) -> u8 {
        *self as u8
    }

    /// Tier the children of a destroyed rock belong to
    pub fn split(&self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

/// What a bullet hit did to an asteroid
#[derive(Debug, Clone, PartialEq)]
pub enum HitOutcome {
    /// Still has hit points left
    Damaged,
    /// Destroyed and replaced by two smaller rocks
    Split([Asteroid; 2]),
    /// Small rock destroyed, its letter goes to the player
    Collected(char),
}

/// An asteroid entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: AsteroidSize,
    pub radius: f32,
    pub hp: u8,
    pub letter: char,
}

impl Asteroid {
    /// Spawn with full hit points, heading in a random direction
    pub fn spawn(
        pos: Vec2,
        size: AsteroidSize,
        letter: char,
        config: &SimConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let angle = rng.random_range(0.0..360.0);
        let speed = rng.random_range(config.asteroid_min_speed..config.asteroid_max_speed);
        Self::with_velocity(pos, rotate_deg(Vec2::new(speed, 0.0), angle), size, letter, config)
    }

    /// Fixed-velocity constructor (splits and scripted setups)
    pub fn with_velocity(
        pos: Vec2,
        vel: Vec2,
        size: AsteroidSize,
        letter: char,
        config: &SimConfig,
    ) -> Self {
        let tier = config.tiers.get(size);
        Self {
            pos,
            vel,
            size,
            radius: tier.radius,
            hp: tier.hit_points,
            letter,
        }
    }

    /// Advance one frame
    pub fn step(&mut self, (width, height): (f32, f32)) {
        self.pos = wrap_position(self.pos + self.vel, width, height);
    }

    /// Circular hit test
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.pos.distance(p) <= self.radius
    }

    /// Whether two rocks' circles overlap
    #[inline]
    pub fn overlaps(&self, other: &Asteroid) -> bool {
        self.pos.distance(other.pos) < self.radius + other.radius
    }

    /// Take one bullet hit
    pub fn apply_hit(&mut self, config: &SimConfig, rng: &mut impl Rng) -> HitOutcome {
        self.hp = self.hp.saturating_sub(1);
        if self.hp > 0 {
            return HitOutcome::Damaged;
        }

        match self.size.split() {
            Some(child_size) => {
                let spread = config.split_spread_deg;
                let mut child = || {
                    let offset = rng.random_range(-spread..=spread);
                    let vel = rotate_deg(self.vel, offset) * config.split_speed_factor;
                    Asteroid::with_velocity(self.pos, vel, child_size, self.letter, config)
                };
                HitOutcome::Split([child(), child()])
            }
            None => HitOutcome::Collected(self.letter),
        }
    }

    /// Whether the two rocks are closing on each other
    #[inline]
    pub fn approaching(&self, other: &Asteroid) -> bool {
        (other.pos - self.pos).dot(other.vel - self.vel) < 0.0
    }

    /// Mutual reflection off each other's pre-bounce velocity
    pub fn bounce(&mut self, other: &mut Asteroid) {
        let (a, b) = (self.vel, other.vel);
        self.vel = reflect(a, b);
        other.vel = reflect(b, a);
    }

    /// Outline color for this tier
    pub fn color(&self, config: &SimConfig) -> [u8; 3] {
        config.tiers.get(self.size).color
    }
}
