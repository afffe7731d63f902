//! Sound cues and the audio backend seam
//!
//! The simulation only names sounds. Playback is left to an `AudioAdapter`;
//! `AudioManager` applies the player's volume settings on the way through.

/// Sounds the game can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Reached the exit
    Success,
    /// Picked up fuel
    Collect,
    /// Ship hit something fatal
    Collision,
    /// Destroyed a breakable wall
    Breakable,
    /// Engine noise while thrusting
    Rocket,
}

impl SoundCue {
    pub const ALL: [SoundCue; 5] = [
        SoundCue::Success,
        SoundCue::Collect,
        SoundCue::Collision,
        SoundCue::Breakable,
        SoundCue::Rocket,
    ];

    /// Key used by backends to look up the sample (`<key>.wav` in the data dir)
    pub fn key(self) -> &'static str {
        match self {
            SoundCue::Success => "success",
            SoundCue::Collect => "collect",
            SoundCue::Collision => "collision",
            SoundCue::Breakable => "breakable",
            SoundCue::Rocket => "rocket",
        }
    }
}

/// What to do with a cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoundRequest {
    Play(SoundCue),
    /// Start or keep looping at `volume` (0.0 - 1.0)
    Loop { cue: SoundCue, volume: f32 },
    /// Fade a looping cue out over `ms` milliseconds
    Fade { cue: SoundCue, ms: u32 },
}

/// Audio backend
pub trait AudioAdapter {
    fn play(&mut self, cue: SoundCue, volume: f32);
    /// Called every frame a loop is wanted; only the volume may change
    fn looped(&mut self, cue: SoundCue, volume: f32);
    fn fade(&mut self, cue: SoundCue, ms: u32);
}

/// Backend that only logs requests (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioAdapter for LogAudio {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        log::debug!("play {} at {:.2}", cue.key(), volume);
    }

    fn looped(&mut self, cue: SoundCue, volume: f32) {
        log::trace!("loop {} at {:.2}", cue.key(), volume);
    }

    fn fade(&mut self, cue: SoundCue, ms: u32) {
        log::debug!("fade {} over {}ms", cue.key(), ms);
    }
}

/// Volume control in front of an audio backend
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(0.8)
    }
}

impl AudioManager {
    pub fn new(master_volume: f32) -> Self {
        Self {
            master_volume: master_volume.clamp(0.0, 1.0),
            muted: false,
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Forward a request to the backend with volume applied.
    /// Fades always go through so a muted loop can still be stopped.
    pub fn dispatch(&self, adapter: &mut dyn AudioAdapter, request: SoundRequest) {
        let vol = self.effective_volume();
        match request {
            SoundRequest::Play(cue) if vol > 0.0 => adapter.play(cue, vol),
            SoundRequest::Loop { cue, volume } if vol > 0.0 => {
                adapter.looped(cue, (volume * vol).clamp(0.0, 1.0))
            }
            SoundRequest::Fade { cue, ms } => adapter.fade(cue, ms),
            _ => {}
        }
    }
}
