//! Render sink
//!
//! The simulation never draws. Once per frame the runner captures a `Frame`
//! snapshot of everything visible and hands it to whatever `RenderSink` is
//! plugged in (a window, a terminal, a log, nothing).

use glam::Vec2;
use serde::Serialize;

use crate::sim::{GamePhase, GameState};

/// Heart icon size and spacing on the HUD
pub const HEART_SIZE: f32 = 14.0;
pub const HEART_GAP: f32 = 8.0;
pub const HEART_COLOR: [u8; 3] = [220, 20, 60];
/// Most hearts the HUD will draw
pub const MAX_HEARTS: u32 = 10;

/// Pixel-heart outline, scaled by `s`, anchored at its top-left corner
pub fn heart_points(origin: Vec2, s: f32) -> [Vec2; 12] {
    [
        (1.0, 0.0),
        (3.0, 0.0),
        (4.0, 1.0),
        (5.0, 0.0),
        (7.0, 0.0),
        (8.0, 1.0),
        (8.0, 3.0),
        (7.0, 4.0),
        (4.0, 7.0),
        (1.0, 4.0),
        (0.0, 3.0),
        (0.0, 1.0),
    ]
    .map(|(x, y)| origin + Vec2::new(x, y) * s)
}

#[derive(Debug, Clone, Serialize)]
pub struct ShipSprite {
    /// Tip, left base, right base
    pub polygon: [Vec2; 3],
    /// False on the "off" half of the invincibility blink
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AsteroidSprite {
    pub pos: Vec2,
    pub radius: f32,
    pub letter: char,
    pub color: [u8; 3],
}

/// End-of-round message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overlay {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub color: [u8; 3],
}

/// Everything visible on one frame
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub frame: u64,
    pub field: (f32, f32),
    pub ship: ShipSprite,
    pub bullets: Vec<Vec2>,
    pub asteroids: Vec<AsteroidSprite>,
    /// One outline per remaining life
    pub hearts: Vec<[Vec2; 12]>,
    pub hud: String,
    pub overlay: Option<Overlay>,
}

impl Frame {
    /// Snapshot the state for drawing
    pub fn capture(state: &GameState) -> Self {
        let config = &state.config;
        let ship = &state.ship;

        let heart_origin = Vec2::new(10.0, config.field_height - 26.0);
        let hearts = (0..ship.lives.min(MAX_HEARTS))
            .map(|i| {
                let offset = Vec2::new(i as f32 * (HEART_SIZE + HEART_GAP), 0.0);
                heart_points(heart_origin + offset, 1.0)
            })
            .collect();

        let overlay = match state.phase {
            GamePhase::Playing => None,
            GamePhase::Won => Some(Overlay {
                title: "YOU WIN!",
                subtitle: "Press any key to restart",
                color: [255, 255, 0],
            }),
            GamePhase::Lost => Some(Overlay {
                title: "GAME OVER",
                subtitle: "Press any key to restart",
                color: [255, 255, 255],
            }),
        };

        Self {
            frame: state.frame,
            field: config.field(),
            ship: ShipSprite {
                polygon: ship.polygon(),
                visible: ship.is_visible(config),
            },
            bullets: ship.bullets.iter().map(|b| b.pos).collect(),
            asteroids: state
                .asteroids
                .iter()
                .map(|a| AsteroidSprite {
                    pos: a.pos,
                    radius: a.radius,
                    letter: a.letter,
                    color: a.color(config),
                })
                .collect(),
            hearts,
            hud: format!(
                "Target: {}  Collected: {}",
                state.target_word(),
                state.collected_sorted()
            ),
            overlay,
        }
    }
}

/// Consumer of per-frame snapshots
pub trait RenderSink {
    fn present(&mut self, frame: &Frame);
}

/// Draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl RenderSink for NullRenderer {
    fn present(&mut self, _frame: &Frame) {}
}

/// Headless renderer: logs a one-line summary every `interval` frames and
/// whenever the overlay changes
#[derive(Debug, Clone)]
pub struct LogRenderer {
    interval: u64,
    last_overlay: Option<Overlay>,
}

impl LogRenderer {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            last_overlay: None,
        }
    }
}

impl RenderSink for LogRenderer {
    fn present(&mut self, frame: &Frame) {
        if frame.overlay != self.last_overlay {
            if let Some(overlay) = &frame.overlay {
                log::info!("[{}] {} - {}", frame.frame, overlay.title, overlay.subtitle);
            }
            self.last_overlay = frame.overlay.clone();
        }
        if frame.frame % self.interval == 0 {
            let letters: String = frame.asteroids.iter().map(|a| a.letter).collect();
            log::debug!(
                "[{}] {} | lives {} | rocks {} ({}) | bullets {}",
                frame.frame,
                frame.hud,
                frame.hearts.len(),
                frame.asteroids.len(),
                letters,
                frame.bullets.len()
            );
        }
        log::trace!(
            "[{}] ship at ({:.1}, {:.1}) visible={}",
            frame.frame,
            frame.ship.polygon[0].x,
            frame.ship.polygon[0].y,
            frame.ship.visible
        );
    }
}
