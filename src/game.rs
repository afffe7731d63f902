//! Frame driver
//!
//! Each frame: poll input and dispatch it, tick the world, act on the
//! world's events (sounds, level loads), then draw.

use std::thread;
use std::time::{Duration, Instant};

use crate::audio::{AudioAdapter, AudioManager};
use crate::error::Result;
use crate::input::{ControlBindings, InputAdapter, world_bindings};
use crate::level::LevelSource;
use crate::renderer::{RenderAdapter, View};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, World, tick};

/// Game instance holding the world and its adapters
pub struct Game<I, A, R, L> {
    pub world: World,
    bindings: ControlBindings<World>,
    input: I,
    audio: A,
    audio_manager: AudioManager,
    renderer: R,
    levels: L,
    frame: u64,
}

impl<I, A, R, L> Game<I, A, R, L>
where
    I: InputAdapter,
    A: AudioAdapter,
    R: RenderAdapter,
    L: LevelSource,
{
    pub fn new(seed: u64, settings: &Settings, input: I, audio: A, renderer: R, levels: L) -> Self {
        let mut audio_manager = AudioManager::new(settings.master_volume);
        audio_manager.set_muted(settings.muted);

        let mut world = World::new(seed);
        let available = levels.available_levels();
        log::info!("{} levels available", available.len());
        world.set_levels(&available);

        Self {
            world,
            bindings: world_bindings(),
            input,
            audio,
            audio_manager,
            renderer,
            levels,
            frame: 0,
        }
    }

    /// Load `level`. With `start` set the game starts running; otherwise
    /// the phase is left as it was.
    pub fn load_level(&mut self, level: usize, start: bool) -> Result<()> {
        let data = self.levels.load(level)?;
        self.world.load_level(level, &data);
        if start {
            self.world.set_phase(GamePhase::Running);
        }
        Ok(())
    }

    /// Run one frame. Returns false once the game has quit.
    pub fn run_frame(&mut self) -> Result<bool> {
        for event in self.input.poll() {
            self.bindings.dispatch(&mut self.world, &event);
        }

        tick(&mut self.world);

        for event in self.world.drain_events() {
            match event {
                GameEvent::Sound(request) => self.audio_manager.dispatch(&mut self.audio, request),
                GameEvent::LoadLevel { level, start } => self.load_level(level, start)?,
            }
        }

        self.renderer.clear();
        View::for_adapter(&self.renderer).render(&self.world, &mut self.renderer);
        self.renderer.present();

        self.frame += 1;
        Ok(self.world.phase() != GamePhase::Quit)
    }

    /// Frames run so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

/// Sleeps out the rest of each frame so the game runs at a fixed rate
#[derive(Debug)]
pub struct FrameLimiter {
    frame_time: Duration,
    next: Instant,
}

impl FrameLimiter {
    pub fn new(frame_rate: u32) -> Self {
        let frame_time = Duration::from_secs(1) / frame_rate.max(1);
        Self {
            frame_time,
            next: Instant::now() + frame_time,
        }
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// Block until the current frame's time is used up
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next {
            thread::sleep(self.next - now);
            self.next += self.frame_time;
        } else {
            // Running behind: don't try to catch up
            self.next = now + self.frame_time;
        }
    }
}
