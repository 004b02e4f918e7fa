//! Immutable simulation configuration
//!
//! Every gameplay constant lives here so alternate field sizes and tunings can
//! be tested deterministically. Built once, validated, then only read.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::asteroid::AsteroidSize;
use crate::consts::*;

/// Per-tier asteroid properties
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierSpec {
    pub radius: f32,
    pub hit_points: u8,
    /// Outline color (RGB) handed to the render sink
    pub color: [u8; 3],
}

/// Tier table indexed by `AsteroidSize`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidTiers {
    pub small: TierSpec,
    pub medium: TierSpec,
    pub large: TierSpec,
}

impl Default for AsteroidTiers {
    fn default() -> Self {
        Self {
            small: TierSpec {
                radius: 15.0,
                hit_points: 2,
                color: [220, 220, 220],
            },
            medium: TierSpec {
                radius: 25.0,
                hit_points: 3,
                color: [170, 170, 170],
            },
            large: TierSpec {
                radius: 40.0,
                hit_points: 4,
                color: [120, 120, 120],
            },
        }
    }
}

impl AsteroidTiers {
    pub fn get(&self, size: AsteroidSize) -> &TierSpec {
        match size {
            AsteroidSize::Small => &self.small,
            AsteroidSize::Medium => &self.medium,
            AsteroidSize::Large => &self.large,
        }
    }
}

/// Complete simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Ship ===
    /// Degrees per frame while a turn key is held
    pub ship_turn_speed: f32,
    pub ship_accel: f32,
    /// Multiplicative velocity decay per frame
    pub ship_friction: f32,
    pub ship_max_speed: f32,
    pub ship_cooldown: u32,
    pub ship_lives: u32,
    pub invincibility_frames: u32,
    pub blink_period_frames: u32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_lifetime: u32,

    // === Asteroids ===
    pub tiers: AsteroidTiers,
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,
    pub split_spread_deg: f32,
    pub split_speed_factor: f32,
    /// Population is topped back up to this count every frame
    pub min_asteroids: usize,
    /// Asteroid-asteroid bounce pass
    pub asteroid_bounce: bool,

    // === Word game ===
    pub target_word: String,
    pub field_letter_count: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            ship_turn_speed: SHIP_TURN_SPEED,
            ship_accel: SHIP_ACCEL,
            ship_friction: SHIP_FRICTION,
            ship_max_speed: SHIP_MAX_SPEED,
            ship_cooldown: SHIP_COOLDOWN,
            ship_lives: SHIP_LIVES,
            invincibility_frames: INVINCIBILITY_FRAMES,
            blink_period_frames: BLINK_PERIOD_FRAMES,

            bullet_speed: BULLET_SPEED,
            bullet_lifetime: BULLET_LIFETIME,

            tiers: AsteroidTiers::default(),
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            split_spread_deg: SPLIT_SPREAD_DEG,
            split_speed_factor: SPLIT_SPEED_FACTOR,
            min_asteroids: MIN_ASTEROIDS,
            asteroid_bounce: true,

            target_word: DEFAULT_TARGET_WORD.to_string(),
            field_letter_count: FIELD_LETTER_COUNT,
        }
    }
}

impl SimConfig {
    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let field_ok = self.field_width.is_finite() && self.field_height.is_finite();
        if !(field_ok && self.field_width > 0.0 && self.field_height > 0.0) {
            return Err(ConfigError::InvalidField {
                width: self.field_width,
                height: self.field_height,
            });
        }
        if self.ship_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if !(self.ship_friction > 0.0 && self.ship_friction <= 1.0) {
            return Err(ConfigError::InvalidFriction(self.ship_friction));
        }
        if !(self.ship_max_speed > 0.0) {
            return Err(ConfigError::InvalidSpeed("ship_max_speed"));
        }
        if !(self.bullet_speed > 0.0) {
            return Err(ConfigError::InvalidSpeed("bullet_speed"));
        }
        if !(self.asteroid_min_speed >= 0.0 && self.asteroid_min_speed < self.asteroid_max_speed)
        {
            return Err(ConfigError::InvalidSpeed("asteroid speed range"));
        }
        if !(self.split_spread_deg.is_finite() && self.split_spread_deg >= 0.0) {
            return Err(ConfigError::InvalidSplit("split_spread_deg"));
        }
        if !(self.split_speed_factor.is_finite() && self.split_speed_factor > 0.0) {
            return Err(ConfigError::InvalidSplit("split_speed_factor"));
        }
        if self.bullet_lifetime == 0 {
            return Err(ConfigError::ZeroDuration("bullet_lifetime"));
        }
        if self.blink_period_frames == 0 {
            return Err(ConfigError::ZeroDuration("blink_period_frames"));
        }
        for size in AsteroidSize::ALL {
            let tier = self.tiers.get(size);
            if !(tier.radius > 0.0) || tier.hit_points == 0 {
                return Err(ConfigError::InvalidTier(size));
            }
        }
        let (small, medium, large) = (&self.tiers.small, &self.tiers.medium, &self.tiers.large);
        if !(small.radius < medium.radius && medium.radius < large.radius)
            || !(small.hit_points <= medium.hit_points && medium.hit_points <= large.hit_points)
        {
            return Err(ConfigError::TierOrder);
        }
        if self.target_word.is_empty()
            || !self.target_word.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(ConfigError::InvalidTargetWord(self.target_word.clone()));
        }
        Ok(())
    }

    /// Field dimensions as a `(width, height)` pair
    #[inline]
    pub fn field(&self) -> (f32, f32) {
        (self.field_width, self.field_height)
    }
}

/// Invalid simulation configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidField { width: f32, height: f32 },
    NoLives,
    InvalidFriction(f32),
    InvalidSpeed(&'static str),
    InvalidSplit(&'static str),
    ZeroDuration(&'static str),
    InvalidTier(AsteroidSize),
    TierOrder,
    InvalidTargetWord(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidField { width, height } => {
                write!(f, "field must have positive size, got {}x{}", width, height)
            }
            ConfigError::NoLives => write!(f, "ship must start with at least one life"),
            ConfigError::InvalidFriction(v) => {
                write!(f, "ship friction must be in (0, 1], got {}", v)
            }
            ConfigError::InvalidSpeed(what) => write!(f, "invalid {}", what),
            ConfigError::InvalidSplit(what) => write!(f, "{} is out of range", what),
            ConfigError::ZeroDuration(what) => write!(f, "{} must be at least one frame", what),
            ConfigError::InvalidTier(size) => {
                write!(f, "{:?} asteroids need a positive radius and hit points", size)
            }
            ConfigError::TierOrder => write!(
                f,
                "tier radii must grow and hit points must not shrink from small to large"
            ),
            ConfigError::InvalidTargetWord(word) => {
                write!(f, "target word must be A-Z letters, got {:?}", word)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
