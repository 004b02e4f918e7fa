//! Collision passes between bullets, the ship and asteroids
//!
//! Each pass reads the current entity sets and hands back what changed. The
//! asteroid population is taken by value and returned whole, so membership
//! changes land atomically at the end of the pass.

use rand::Rng;

use super::asteroid::{Asteroid, HitOutcome};
use super::bullet::Bullet;
use super::config::SimConfig;
use super::ship::Ship;

/// Result of the bullets-vs-asteroids pass
#[derive(Debug, Clone, Default)]
pub struct BulletPass {
    /// Survivors in their original order, followed by split children
    pub asteroids: Vec<Asteroid>,
    /// Letters from destroyed small rocks, in hit order
    pub collected: Vec<char>,
    /// Number of bullets that hit something
    pub hits: usize,
}

/// Resolve bullet hits against the asteroid population
///
/// Each asteroid takes at most one bullet per frame: the first of the ship's
/// bullets (in firing order) inside it. That bullet is consumed.
pub fn bullets_vs_asteroids(
    bullets: &mut Vec<Bullet>,
    asteroids: Vec<Asteroid>,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> BulletPass {
    let mut pass = BulletPass {
        asteroids: Vec::with_capacity(asteroids.len()),
        ..Default::default()
    };
    let mut children = Vec::new();

    for mut asteroid in asteroids {
        let Some(idx) = bullets.iter().position(|b| asteroid.contains_point(b.pos)) else {
            pass.asteroids.push(asteroid);
            continue;
        };
        bullets.remove(idx);
        pass.hits += 1;

        match asteroid.apply_hit(config, rng) {
            HitOutcome::Damaged => pass.asteroids.push(asteroid),
            HitOutcome::Split(pair) => {
                log::debug!(
                    "{:?} asteroid '{}' split at ({:.0}, {:.0})",
                    asteroid.size,
                    asteroid.letter,
                    asteroid.pos.x,
                    asteroid.pos.y
                );
                children.extend(pair);
            }
            HitOutcome::Collected(letter) => {
                log::debug!("collected '{}'", letter);
                pass.collected.push(letter);
            }
        }
    }

    pass.asteroids.extend(children);
    pass
}

/// Ship against the population: at most one hit per frame, none while invincible
///
/// On a hit the ship loses a life and enters its invincibility window.
pub fn ship_vs_asteroids(ship: &mut Ship, asteroids: &[Asteroid], config: &SimConfig) -> bool {
    if ship.is_invincible() {
        return false;
    }
    if !asteroids.iter().any(|a| a.contains_point(ship.pos)) {
        return false;
    }
    ship.lives = ship.lives.saturating_sub(1);
    ship.take_damage(config);
    true
}

/// Bounce every overlapping, approaching pair of asteroids once
///
/// Pairs are visited as `(i, j)` with `i < j`. A rock touching several
/// neighbours is reflected once per neighbour, in index order. Pairs that are
/// already moving apart (fresh split siblings, rocks that just bounced) are
/// left alone. Returns the number of pairs bounced.
pub fn asteroids_vs_asteroids(asteroids: &mut [Asteroid]) -> usize {
    let mut bounced = 0;
    for i in 0..asteroids.len() {
        let (head, tail) = asteroids.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if a.overlaps(b) && a.approaching(b) {
                a.bounce(b);
                bounced += 1;
            }
        }
    }
    bounced
}
