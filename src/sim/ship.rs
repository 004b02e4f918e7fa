//! The player's ship
//!
//! Turning, thrust, firing, post-hit invincibility and the bullets it owns.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::config::SimConfig;
use super::tick::TickInput;
use crate::audio::{SoundEvent, SoundSink};
use crate::{rotate_deg, wrap_position};

/// Ship outline in local space (tip forward, base corners behind)
const HULL: [Vec2; 3] = [
    Vec2::new(0.0, -16.0),
    Vec2::new(-10.0, 10.0),
    Vec2::new(10.0, 10.0),
];

/// The player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing angle in degrees (0 = up, positive = clockwise)
    pub angle: f32,
    pub lives: u32,
    /// Frames until the next shot is allowed
    pub cooldown: u32,
    pub invincible: bool,
    /// Frames of invincibility remaining
    pub invincibility_timer: u32,
    /// Live bullets in firing order
    pub bullets: Vec<Bullet>,
}

impl Ship {
    pub fn new(pos: Vec2, config: &SimConfig) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
            lives: config.ship_lives,
            cooldown: 0,
            invincible: false,
            invincibility_timer: 0,
            bullets: Vec::new(),
        }
    }

    /// Consume one frame of key state
    pub fn apply_input(
        &mut self,
        input: &TickInput,
        config: &SimConfig,
        sound: &mut dyn SoundSink,
    ) {
        if input.turn_left {
            self.angle -= config.ship_turn_speed;
        }
        if input.turn_right {
            self.angle += config.ship_turn_speed;
        }
        if input.thrust {
            self.vel += rotate_deg(Vec2::new(0.0, -config.ship_accel), self.angle);
        }
        if input.fire && self.cooldown == 0 {
            self.shoot(config);
            sound.play(SoundEvent::Shoot);
        }
    }

    fn shoot(&mut self, config: &SimConfig) {
        self.bullets.push(Bullet::new(self.pos, self.angle, config));
        self.cooldown = config.ship_cooldown;
    }

    /// Advance one frame: speed cap, friction, motion, timers, bullets
    pub fn step(&mut self, config: &SimConfig) {
        self.vel = self.vel.clamp_length_max(config.ship_max_speed);
        self.vel *= config.ship_friction;
        self.pos = wrap_position(self.pos + self.vel, config.field_width, config.field_height);

        self.cooldown = self.cooldown.saturating_sub(1);

        if self.invincible {
            self.invincibility_timer = self.invincibility_timer.saturating_sub(1);
            if self.invincibility_timer == 0 {
                self.invincible = false;
            }
        }

        for bullet in &mut self.bullets {
            bullet.step(config.field());
        }
        self.bullets.retain(Bullet::is_alive);
    }

    /// Start the invincibility window. Lives are the caller's business.
    pub fn take_damage(&mut self, config: &SimConfig) {
        self.invincible = true;
        self.invincibility_timer = config.invincibility_frames;
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    /// Whether the ship should be drawn this frame (blinks while invincible)
    pub fn is_visible(&self, config: &SimConfig) -> bool {
        !self.invincible || (self.invincibility_timer / config.blink_period_frames) % 2 == 0
    }

    /// Outline in world space: tip, left base, right base
    pub fn polygon(&self) -> [Vec2; 3] {
        HULL.map(|p| rotate_deg(p, self.angle) + self.pos)
    }

    /// Unit vector the ship is facing
    pub fn forward(&self) -> Vec2 {
        rotate_deg(Vec2::NEG_Y, self.angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingSound;
    use proptest::prelude::*;

    fn center_ship(config: &SimConfig) -> Ship {
        Ship::new(Vec2::new(400.0, 300.0), config)
    }

    #[test]
    fn test_turning() {
        let config = SimConfig::default();
        let mut ship = center_ship(&config);
        let mut sound = RecordingSound::default();

        let right = TickInput {
            turn_right: true,
            ..Default::default()
        };
        ship.apply_input(&right, &config, &mut sound);
        assert_eq!(ship.angle, 4.0);

        let both = TickInput {
            turn_left: true,
            turn_right: true,
            ..Default::default()
        };
        ship.apply_input(&both, &config, &mut sound);
        assert_eq!(ship.angle, 4.0);
    }

    #[test]
    fn test_thrust_moves_forward() {
        let config = SimConfig::default();
        let mut ship = center_ship(&config);
        let thrust = TickInput {
            thrust: true,
            ..Default::default()
        };
        ship.apply_input(&thrust, &config, &mut crate::NullSound);
        ship.step(&config);
        assert!(ship.pos.y < 300.0);
        assert!((ship.pos.x - 400.0).abs() < 1e-4);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let config = SimConfig::default();
        let mut ship = center_ship(&config);
        let mut sound = RecordingSound::default();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };

        for _ in 0..24 {
            ship.apply_input(&fire, &config, &mut sound);
            ship.step(&config);
        }
        // Frames 0 and 12 fire
        assert_eq!(ship.bullets.len(), 2);
        assert_eq!(sound.count(SoundEvent::Shoot), 2);
        // Firing order preserved: the older bullet is further along
        assert!(ship.bullets[0].age > ship.bullets[1].age);
    }

    #[test]
    fn test_bullets_expire() {
        let config = SimConfig::default();
        let mut ship = center_ship(&config);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        ship.apply_input(&fire, &config, &mut crate::NullSound);
        for _ in 0..59 {
            ship.step(&config);
        }
        assert_eq!(ship.bullets.len(), 1);
        ship.step(&config);
        assert!(ship.bullets.is_empty());
    }

    #[test]
    fn test_invincibility_lasts_180_steps() {
        let config = SimConfig::default();
        let mut ship = center_ship(&config);
        assert!(!ship.is_invincible());

        ship.take_damage(&config);
        assert_eq!(ship.lives, 3);
        for _ in 0..180 {
            assert!(ship.is_invincible());
            ship.step(&config);
        }
        assert!(!ship.is_invincible());
        assert_eq!(ship.invincibility_timer, 0);
    }

    #[test]
    fn test_blink_while_invincible() {
        let config = SimConfig::default();
        let mut ship = center_ship(&config);
        assert!(ship.is_visible(&config));

        ship.take_damage(&config);
        let mut visible = 0;
        let mut hidden = 0;
        for _ in 0..180 {
            if ship.is_visible(&config) {
                visible += 1;
            } else {
                hidden += 1;
            }
            ship.step(&config);
        }
        assert_eq!(visible, 90);
        assert_eq!(hidden, 90);
        assert!(ship.is_visible(&config));
    }

    #[test]
    fn test_polygon_points_up() {
        let config = SimConfig::default();
        let ship = center_ship(&config);
        let [tip, left, right] = ship.polygon();
        assert_eq!(tip, Vec2::new(400.0, 284.0));
        assert_eq!(left, Vec2::new(390.0, 310.0));
        assert_eq!(right, Vec2::new(410.0, 310.0));
    }

    proptest! {
        #[test]
        fn speed_never_exceeds_cap(
            inputs in proptest::collection::vec(any::<(bool, bool, bool)>(), 1..200)
        ) {
            let config = SimConfig::default();
            let mut ship = center_ship(&config);
            for (left, right, thrust) in inputs {
                let input = TickInput {
                    turn_left: left,
                    turn_right: right,
                    thrust,
                    ..Default::default()
                };
                ship.apply_input(&input, &config, &mut crate::NullSound);
                ship.step(&config);
                prop_assert!(ship.vel.length() <= config.ship_max_speed + 1e-4);
            }
        }
    }
}
