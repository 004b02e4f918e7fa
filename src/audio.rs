//! Sound event sink
//!
//! The simulation only announces named events; whoever owns the speakers
//! decides what (if anything) to play. Sinks never fail and never block.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundEvent {
    /// Ship fired a bullet
    Shoot,
    /// Small asteroid destroyed, letter collected
    AsteroidHit,
    /// Target word spelled
    Victory,
    /// Ship collided with an asteroid
    ShipHit,
    /// Last life lost
    GameOver,
}

impl SoundEvent {
    pub const ALL: [SoundEvent; 5] = [
        SoundEvent::Shoot,
        SoundEvent::AsteroidHit,
        SoundEvent::Victory,
        SoundEvent::ShipHit,
        SoundEvent::GameOver,
    ];

    /// Event key, also the sample name a backend would load
    pub fn name(&self) -> &'static str {
        match self {
            SoundEvent::Shoot => "shoot",
            SoundEvent::AsteroidHit => "asteroid_hit",
            SoundEvent::Victory => "victory",
            SoundEvent::ShipHit => "ship_hit",
            SoundEvent::GameOver => "game_over",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.name() == s)
    }
}

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MusicTrack {
    /// In-game loop, started when a game begins
    Background,
    Menu,
    GameOver,
}

impl MusicTrack {
    pub fn name(&self) -> &'static str {
        match self {
            MusicTrack::Background => "background",
            MusicTrack::Menu => "menu",
            MusicTrack::GameOver => "game_over",
        }
    }
}

/// Fire-and-forget receiver of sound events
pub trait SoundSink {
    fn play(&mut self, event: SoundEvent);
}

/// Sink that ignores everything (audio disabled)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSound;

impl SoundSink for NullSound {
    fn play(&mut self, _event: SoundEvent) {}
}

/// Sink that remembers every event in emission order
#[derive(Debug, Clone, Default)]
pub struct RecordingSound {
    pub events: Vec<SoundEvent>,
}

impl RecordingSound {
    pub fn count(&self, event: SoundEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }
}

impl SoundSink for RecordingSound {
    fn play(&mut self, event: SoundEvent) {
        self.events.push(event);
    }
}

/// Audio manager for the game
///
/// There is no mixer behind it yet: audible events are logged and counted so
/// a headless run still shows what would have played. Music is a single
/// looping track that can be paused, stopped or switched off entirely.
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_enabled: bool,
    /// Current track and whether it is paused
    music: Option<(MusicTrack, bool)>,
    played: BTreeMap<SoundEvent, u64>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
            music_enabled: true,
            music: None,
            played: BTreeMap::new(),
        }
    }

    /// Build from saved preferences
    pub fn from_settings(settings: &crate::Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        audio.music_enabled = settings.music_enabled;
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        if let Some((track, false)) = self.music {
            log::debug!("music {} volume {:.2}", track.name(), self.music_level());
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn toggle_muted(&mut self) {
        self.muted = !self.muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn music_level(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Start looping `track`, replacing whatever was playing
    pub fn play_music(&mut self, track: MusicTrack) {
        if !self.music_enabled {
            log::debug!("music disabled, not starting {}", track.name());
            return;
        }
        self.music = Some((track, false));
        log::info!("music {} started (volume {:.2})", track.name(), self.music_level());
    }

    pub fn stop_music(&mut self) {
        if let Some((track, _)) = self.music.take() {
            log::info!("music {} stopped", track.name());
        }
    }

    pub fn pause_music(&mut self) {
        if let Some((track, paused)) = &mut self.music {
            *paused = true;
            log::debug!("music {} paused", track.name());
        }
    }

    pub fn unpause_music(&mut self) {
        if let Some((track, paused)) = &mut self.music {
            *paused = false;
            log::debug!("music {} resumed", track.name());
        }
    }

    /// Switch music on/off; switching off stops the current track
    pub fn toggle_music(&mut self) {
        self.music_enabled = !self.music_enabled;
        if !self.music_enabled {
            self.stop_music();
        }
    }

    pub fn is_music_enabled(&self) -> bool {
        self.music_enabled
    }

    /// Track currently audible (not paused, not muted)
    pub fn current_music(&self) -> Option<MusicTrack> {
        match self.music {
            Some((track, false)) if self.music_level() > 0.0 => Some(track),
            _ => None,
        }
    }

    /// How many times an event was actually heard
    pub fn play_count(&self, event: SoundEvent) -> u64 {
        self.played.get(&event).copied().unwrap_or(0)
    }
}

impl SoundSink for AudioManager {
    fn play(&mut self, event: SoundEvent) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        *self.played.entry(event).or_default() += 1;
        log::debug!("sfx {} (volume {:.2})", event.name(), vol);
    }
}
