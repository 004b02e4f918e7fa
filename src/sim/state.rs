//! Game state and core simulation types
//!
//! Everything a frame needs lives here, including the seeded RNG, so two
//! states built from the same seed and fed the same inputs stay identical.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::{Asteroid, AsteroidSize};
use super::config::{ConfigError, SimConfig};
use super::letters::{LetterPool, make_field_letters};
use super::ship::Ship;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Target word spelled
    Won,
    /// Out of lives
    Lost,
}

impl GamePhase {
    /// Win or loss screen, waiting for a key to restart
    #[inline]
    pub fn is_over(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Field edge a new asteroid drifts in from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// Random point pinned to this edge
    pub fn random_point(&self, (width, height): (f32, f32), rng: &mut impl Rng) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(rng.random_range(0.0..width), 0.0),
            Edge::Bottom => Vec2::new(rng.random_range(0.0..width), height - 1.0),
            Edge::Left => Vec2::new(0.0, rng.random_range(0.0..height)),
            Edge::Right => Vec2::new(width - 1.0, rng.random_range(0.0..height)),
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Tuning this run was started with
    pub config: SimConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation frame counter (never reset)
    pub frame: u64,
    pub phase: GamePhase,
    /// Frame at which the current phase began
    pub phase_frame: u64,
    pub ship: Ship,
    /// Active asteroids (order-stable)
    pub asteroids: Vec<Asteroid>,
    /// Letters collected so far, in collection order
    pub collected: String,
    /// Letters asteroids are labelled with for the whole session
    pub field_letters: Vec<char>,
    pub pool: LetterPool,
    /// Completed rounds (wins + losses)
    pub rounds: u32,
}

impl GameState {
    /// Create a new game with the given tuning and seed
    ///
    /// The target word is upper-cased before validation.
    pub fn new(mut config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.target_word.make_ascii_uppercase();
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let pool = LetterPool::new(&mut rng);
        let field_letters =
            make_field_letters(&pool, &config.target_word, config.field_letter_count, &mut rng);
        log::info!(
            "new game: seed {}, target {:?}, field letters {:?}",
            seed,
            config.target_word,
            field_letters.iter().collect::<String>()
        );

        let mut state = Self {
            ship: Ship::new(Self::center(&config), &config),
            config,
            seed,
            rng,
            frame: 0,
            phase: GamePhase::Playing,
            phase_frame: 0,
            asteroids: Vec::new(),
            collected: String::new(),
            field_letters,
            pool,
            rounds: 0,
        };
        state.replenish();
        Ok(state)
    }

    fn center(config: &SimConfig) -> Vec2 {
        Vec2::new(config.field_width / 2.0, config.field_height / 2.0)
    }

    pub fn target_word(&self) -> &str {
        &self.config.target_word
    }

    /// Every letter of the target word has been collected (in any order)
    pub fn word_complete(&self) -> bool {
        self.config
            .target_word
            .chars()
            .all(|c| self.collected.contains(c))
    }

    /// Collected letters sorted for display
    pub fn collected_sorted(&self) -> String {
        let mut letters: Vec<char> = self.collected.chars().collect();
        letters.sort_unstable();
        letters.into_iter().collect()
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("phase {:?} -> {:?} at frame {}", self.phase, phase, self.frame);
            if phase.is_over() {
                self.rounds += 1;
            }
            self.phase = phase;
            self.phase_frame = self.frame;
        }
    }

    /// Full reset for a new round: fresh ship, no letters, new asteroids
    ///
    /// Field letters and the RNG stream carry over.
    pub fn restart(&mut self) {
        log::info!("restarting after {:?} (round {})", self.phase, self.rounds);
        self.ship = Ship::new(Self::center(&self.config), &self.config);
        self.collected.clear();
        self.asteroids.clear();
        self.replenish();
        self.set_phase(GamePhase::Playing);
    }

    /// Spawn one medium or large asteroid at a random edge
    pub fn spawn_edge_asteroid(&mut self) {
        let edge = *Edge::ALL.choose(&mut self.rng).unwrap_or(&Edge::Top);
        let pos = edge.random_point(self.config.field(), &mut self.rng);
        let size = if self.rng.random_bool(0.5) {
            AsteroidSize::Medium
        } else {
            AsteroidSize::Large
        };
        // Field letters always hold at least the target word's letters
        let letter = self.field_letters.choose(&mut self.rng).copied().unwrap_or('A');
        let asteroid = Asteroid::spawn(pos, size, letter, &self.config, &mut self.rng);
        log::debug!(
            "spawned {:?} '{}' on {:?} edge at ({:.0}, {:.0})",
            size,
            letter,
            edge,
            pos.x,
            pos.y
        );
        self.asteroids.push(asteroid);
    }

    /// Top the population back up to the configured minimum
    pub fn replenish(&mut self) {
        while self.asteroids.len() < self.config.min_asteroids {
            self.spawn_edge_asteroid();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let state = GameState::new(SimConfig::default(), 42).unwrap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ship.lives, 3);
        assert_eq!(state.asteroids.len(), 6);
        assert!(state.collected.is_empty());
        assert_eq!(state.field_letters.len(), 8);
    }

    #[test]
    fn test_spawned_asteroids_sit_on_edges() {
        let state = GameState::new(SimConfig::default(), 9).unwrap();
        for a in &state.asteroids {
            assert!(matches!(a.size, AsteroidSize::Medium | AsteroidSize::Large));
            assert!(state.field_letters.contains(&a.letter));
            let on_edge = a.pos.x == 0.0 || a.pos.x == 799.0 || a.pos.y == 0.0 || a.pos.y == 599.0;
            assert!(on_edge, "{:?} not on an edge", a.pos);
        }
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = SimConfig {
            ship_lives: 0,
            ..Default::default()
        };
        assert_eq!(GameState::new(config, 1).unwrap_err(), ConfigError::NoLives);
    }

    #[test]
    fn test_target_word_upper_cased() {
        let config = SimConfig {
            target_word: "Cat".to_string(),
            ..Default::default()
        };
        let state = GameState::new(config, 1).unwrap();
        assert_eq!(state.target_word(), "CAT");
        for c in ['C', 'A', 'T'] {
            assert!(state.field_letters.contains(&c));
        }
    }

    #[test]
    fn test_word_complete_any_order() {
        let config = SimConfig {
            target_word: "CAT".to_string(),
            ..Default::default()
        };
        let mut state = GameState::new(config, 1).unwrap();
        state.collected = "TXC".to_string();
        assert!(!state.word_complete());
        state.collected.push('A');
        assert!(state.word_complete());
        assert_eq!(state.collected_sorted(), "ACTX");
    }

    #[test]
    fn test_restart_resets_round() {
        let mut state = GameState::new(SimConfig::default(), 5).unwrap();
        let field_letters = state.field_letters.clone();
        state.ship.lives = 0;
        state.collected = "CO".to_string();
        state.asteroids.truncate(1);
        state.set_phase(GamePhase::Lost);
        assert_eq!(state.rounds, 1);

        state.restart();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ship.lives, 3);
        assert!(state.collected.is_empty());
        assert_eq!(state.asteroids.len(), 6);
        assert_eq!(state.field_letters, field_letters);
    }

    #[test]
    fn test_same_seed_same_state() {
        let a = GameState::new(SimConfig::default(), 77).unwrap();
        let b = GameState::new(SimConfig::default(), 77).unwrap();
        assert_eq!(a.asteroids, b.asteroids);
        assert_eq!(a.field_letters, b.field_letters);
    }
}
