//! Frame-paced runner
//!
//! Owns the simulation state and its sinks, steps one tick per frame and
//! hands the result to the renderer.

use std::thread;
use std::time::{Duration, Instant};

use crate::audio::{NullSound, SoundSink};
use crate::render::{Frame, NullRenderer, RenderSink};
use crate::sim::{ConfigError, GameState, SimConfig, TickInput, tick};

/// Sleeps away the rest of each frame to cap the loop rate
#[derive(Debug)]
pub struct FrameClock {
    frame_time: Duration,
    next_deadline: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        let frame_time = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
        Self {
            frame_time,
            next_deadline: Instant::now() + frame_time,
        }
    }

    /// Block until the current frame's slot is over
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next_deadline {
            thread::sleep(self.next_deadline - now);
            self.next_deadline += self.frame_time;
        } else {
            // Running behind: don't try to catch up with a burst of frames
            self.next_deadline = now + self.frame_time;
        }
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }
}

/// Game instance holding state and its collaborators
pub struct Game {
    pub state: GameState,
    sound: Box<dyn SoundSink>,
    renderer: Box<dyn RenderSink>,
    // FPS tracking
    frame_times: [Option<Instant>; 60],
    frame_index: usize,
    fps: u32,
}

impl Game {
    /// New game with silent, invisible sinks
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_sinks(config, seed, Box::new(NullSound), Box::new(NullRenderer))
    }

    pub fn with_sinks(
        config: SimConfig,
        seed: u64,
        sound: Box<dyn SoundSink>,
        renderer: Box<dyn RenderSink>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            state: GameState::new(config, seed)?,
            sound,
            renderer,
            frame_times: [None; 60],
            frame_index: 0,
            fps: 0,
        })
    }

    /// Run one simulation tick and present the result
    pub fn frame(&mut self, input: &TickInput) {
        tick(&mut self.state, input, self.sound.as_mut());
        self.renderer.present(&Frame::capture(&self.state));
        self.track_fps(Instant::now());
    }

    fn track_fps(&mut self, now: Instant) {
        self.frame_times[self.frame_index] = Some(now);
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest entry is the one we're about to overwrite next
        if let Some(oldest) = self.frame_times[self.frame_index] {
            let elapsed = now.duration_since(oldest).as_secs_f64();
            if elapsed > 0.0 {
                self.fps = ((self.frame_times.len() - 1) as f64 / elapsed).round() as u32;
            }
        }
    }

    /// Measured frames per second over the last 60 frames
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Drive frames until `max_frames` (forever when `None`)
    ///
    /// `input` is polled once per frame. With a clock the loop is capped to
    /// its rate, otherwise it runs flat out.
    pub fn run<F>(&mut self, mut input: F, mut clock: Option<FrameClock>, max_frames: Option<u64>)
    where
        F: FnMut(&GameState) -> TickInput,
    {
        let mut frames = 0u64;
        while max_frames.is_none_or(|max| frames < max) {
            let frame_input = input(&self.state);
            self.frame(&frame_input);
            frames += 1;

            if frames % 600 == 0 {
                log::debug!("frame {} at {} fps", self.state.frame, self.fps);
            }
            if let Some(clock) = clock.as_mut() {
                clock.wait();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct CountingRenderer(Rc<RefCell<Vec<u64>>>);

    impl RenderSink for CountingRenderer {
        fn present(&mut self, frame: &Frame) {
            self.0.borrow_mut().push(frame.frame);
        }
    }

    #[test]
    fn test_render_once_per_frame() {
        let renderer = CountingRenderer::default();
        let seen = renderer.0.clone();
        let mut game = Game::with_sinks(
            SimConfig::default(),
            11,
            Box::new(NullSound),
            Box::new(renderer),
        )
        .unwrap();

        game.run(|_| TickInput::default(), None, Some(5));
        assert_eq!(*seen.borrow(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_autopilot_run_stays_consistent() {
        let mut game = Game::new(SimConfig::default(), 2024).unwrap();
        let demo = TickInput {
            autopilot: true,
            ..Default::default()
        };
        game.run(|_| demo.clone(), None, Some(3000));

        assert_eq!(game.state.frame, 3000);
        if game.state.phase == GamePhase::Playing {
            assert!(game.state.asteroids.len() >= game.state.config.min_asteroids);
        }
        for a in &game.state.asteroids {
            assert!(a.hp > 0);
            assert!(a.pos.x >= 0.0 && a.pos.x < 800.0);
            assert!(a.pos.y >= 0.0 && a.pos.y < 600.0);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimConfig {
            target_word: String::new(),
            ..Default::default()
        };
        assert!(Game::new(config, 1).is_err());
    }

    #[test]
    fn test_frame_clock_caps_rate() {
        let mut clock = FrameClock::new(200);
        let start = Instant::now();
        for _ in 0..4 {
            clock.wait();
        }
        assert!(start.elapsed() >= clock.frame_time() * 3);
    }
}
