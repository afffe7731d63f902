//! Game state and the level world
//!
//! `World` owns every shape of the current level, the ship, the lives
//! counter, the menu and the scheduler that drives delayed transitions.

use std::collections::VecDeque;

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::game_shape::{GameShape, GameShapeType, ShapeId, ShapeStore};
use super::scheduler::{ScheduleEventName, Scheduler};
use super::shape::{Colour, ShapeLine};
use super::ship::{ShipModel, build_debris};
use crate::audio::{SoundCue, SoundRequest};
use crate::consts::*;
use crate::level::LevelData;
use crate::menu::{LEVELS_MENU, MAIN_MENU, Menu, MenuItem, MenuItemId, Selection};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Flying
    Running,
    /// Hit something; debris growing
    Exploding,
    /// Explosion finished
    Dead,
    /// Reached the exit
    Succeeded,
    Paused,
    /// Leave the frame loop
    Quit,
    Menu,
}

/// Requests from the world to whoever drives it
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Sound(SoundRequest),
    /// Load a level. With `start` set, play resumes as soon as it is loaded;
    /// otherwise the menu stays up.
    LoadLevel { level: usize, start: bool },
}

/// A ship position snapshot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SavedPosition {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
}

/// Fixed-capacity history that drops its oldest entry when full
#[derive(Debug, Clone)]
pub struct RingBuffer<T, const N: usize> {
    items: VecDeque<T>,
}

impl<T, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> RingBuffer<T, N> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::with_capacity(N),
        }
    }

    pub fn add(&mut self, item: T) {
        if N == 0 {
            return;
        }
        if self.items.len() == N {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    /// The entry added longest ago
    pub fn oldest(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Everything in play for the current level
#[derive(Debug)]
pub struct World {
    pub store: ShapeStore,
    pub ship: ShipModel,
    pub menu: Menu,
    pub(super) scheduler: Scheduler<World>,
    phase: GamePhase,
    lives: u32,
    level: usize,
    description: String,
    /// Where the ship started this level
    start: SavedPosition,
    saved_positions: RingBuffer<SavedPosition, SAVED_POSITIONS>,
    breakable_explosion: ShapeId,
    breakable_exploding: bool,
    /// Whether the rocket loop is currently playing
    rocket_playing: bool,
    level_loaded: bool,
    last_pause_toggle_ms: Option<u64>,
    events: Vec<GameEvent>,
    rng: Pcg32,
}

impl World {
    /// Create an empty world sitting in the menu
    pub fn new(seed: u64) -> Self {
        let mut store = ShapeStore::new();
        let ship = ShipModel::new(&mut store, seed);
        let mut menu = Menu::new();
        menu.add_menu_item(
            MAIN_MENU,
            MenuItem::new(MenuItemId::Play, "Play", 0).with_sub_menu(LEVELS_MENU),
        );
        menu.add_menu_item(MAIN_MENU, MenuItem::new(MenuItemId::Quit, "Quit", 100));

        let mut world = Self {
            store,
            ship,
            menu,
            scheduler: Scheduler::new(),
            phase: GamePhase::Menu,
            lives: STARTING_LIVES,
            level: 0,
            description: String::new(),
            start: SavedPosition::default(),
            saved_positions: RingBuffer::new(),
            breakable_explosion: ShapeId::default(),
            breakable_exploding: false,
            rocket_playing: false,
            level_loaded: false,
            last_pause_toggle_ms: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
        };
        world.initialise(0);
        world
    }

    /// Clear the level and rebuild the fixed shapes: breakable explosion,
    /// background grid, then the ship's body, flames and explosion.
    pub fn initialise(&mut self, level: usize) {
        self.store.clear();
        self.scheduler.clear();

        let mut breakable = GameShape::new(GameShapeType::Neutral, "BreakableExplosion");
        breakable.shape.visible = false;
        self.breakable_explosion = self.store.insert(breakable);
        self.breakable_exploding = false;
        self.reset_breakable_explosion();

        let mut background = GameShape::new(GameShapeType::Neutral, "Background");
        let grid = Colour::rgb(0, 32, 0);
        let mut n = 0.0;
        while n <= ARENA_SIZE {
            background
                .shape
                .add_shape_line(ShapeLine::new(n, 0.0, n, ARENA_SIZE, grid, 4));
            background
                .shape
                .add_shape_line(ShapeLine::new(0.0, n, ARENA_SIZE, n, grid, 4));
            n += GRID_SPACING;
        }
        self.store.insert(background);

        self.ship.initialise();
        self.ship.pos = DVec2::ZERO;
        self.ship.add_shapes(&mut self.store);

        self.saved_positions.clear();
        self.rocket_playing = false;
        self.lives = STARTING_LIVES;
        self.level = level;
    }

    /// Replace the current level with `data`. The phase is left alone.
    pub fn load_level(&mut self, level: usize, data: &LevelData) {
        self.initialise(level);

        let start = data.ship_start;
        self.start = SavedPosition {
            x: start.x,
            y: start.y,
            rotation: start.rotation,
        };
        self.ship
            .set_position(&mut self.store, DVec2::new(start.x, start.y));
        self.ship.set_rotation(&mut self.store, start.rotation);
        self.description = data.description.clone();

        for object in &data.objects {
            self.store.insert(object.build());
        }
        self.level_loaded = true;
        self.menu
            .add_menu_item(MAIN_MENU, MenuItem::new(MenuItemId::Resume, "Resume", 50));
        log::info!(
            "Level {} ready: {} ({} shapes)",
            level,
            self.description,
            self.store.len()
        );
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        if phase != self.phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_level_loaded(&self) -> bool {
        self.level_loaded
    }

    pub fn is_breakable_exploding(&self) -> bool {
        self.breakable_exploding
    }

    pub fn saved_positions(&self) -> &RingBuffer<SavedPosition, SAVED_POSITIONS> {
        &self.saved_positions
    }

    /// Take every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(super) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(super) fn sound(&mut self, request: SoundRequest) {
        self.emit(GameEvent::Sound(request));
    }

    /// Whether a scheduled event is pending
    pub fn is_scheduled(&self, name: ScheduleEventName) -> bool {
        self.scheduler.is_active(name)
    }

    /// Run this frame's scheduled callbacks against the world.
    ///
    /// The scheduler is detached while it runs; events the callbacks
    /// schedule are merged back in afterwards.
    pub fn process_schedule(&mut self) {
        let mut scheduler = std::mem::take(&mut self.scheduler);
        scheduler.process_schedule(self);
        scheduler.absorb(std::mem::take(&mut self.scheduler));
        self.scheduler = scheduler;
    }

    /// Record where the ship is. Skipped while exploding.
    pub fn save_position(&mut self) {
        if self.phase == GamePhase::Exploding || self.ship.is_exploding() {
            return;
        }
        self.saved_positions.add(SavedPosition {
            x: self.ship.pos.x,
            y: self.ship.pos.y,
            rotation: self.ship.rotation(),
        });
    }

    /// Lose a life; returns what is left
    pub fn life_lost(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn extra_life(&mut self) {
        self.lives += 1;
    }

    /// Put the ship back where it was a couple of seconds ago, or at the
    /// level start if there is no history, and resume.
    pub fn restart(&mut self) {
        let snapshot = self.saved_positions.oldest().copied().unwrap_or(self.start);
        self.ship.initialise();
        self.ship.pos = DVec2::new(snapshot.x, snapshot.y);
        self.ship.rebuild(&mut self.store);
        self.ship.set_is_exploding(&mut self.store, false);
        self.ship.set_rotation(&mut self.store, snapshot.rotation);
        self.ship.set_visible(&mut self.store, true);
        self.set_phase(GamePhase::Running);
        log::info!(
            "Restarted at ({:.0}, {:.0}) with {} lives",
            snapshot.x,
            snapshot.y,
            self.lives
        );
    }

    /// Explosion finished: lose a life and either restart or wind down to
    /// the menu.
    pub(super) fn on_death(&mut self) {
        self.set_phase(GamePhase::Dead);
        if self.life_lost() > 0 {
            self.restart();
        } else {
            log::info!("No lives left on level {}", self.level);
            self.scheduler
                .do_after(ScheduleEventName::EndLoops, END_LOOP_FRAMES, World::end_level);
        }
    }

    /// Level over: show the menu and reload the same level behind it
    pub(super) fn end_level(&mut self) {
        self.set_phase(GamePhase::Menu);
        self.menu.reset();
        self.emit(GameEvent::LoadLevel {
            level: self.level,
            start: false,
        });
    }

    /// Reached the exit
    pub(super) fn succeed(&mut self) {
        self.set_phase(GamePhase::Succeeded);
        self.ship.set_is_accelerating(false, 0.0);
        self.sound(SoundRequest::Play(SoundCue::Success));
        self.stop_rocket();
        self.scheduler
            .do_after(ScheduleEventName::EndLoops, END_LOOP_FRAMES, World::end_level);
    }

    /// Hit something fatal
    pub(super) fn explode(&mut self) {
        self.set_phase(GamePhase::Exploding);
        self.sound(SoundRequest::Play(SoundCue::Collision));
        self.stop_rocket();
    }

    pub(super) fn collect_fuel(&mut self, id: ShapeId) {
        if let Some(fuel) = self.store.get_mut(id) {
            fuel.active = false;
        }
        self.extra_life();
        self.sound(SoundRequest::Play(SoundCue::Collect));
    }

    /// Knock out a breakable wall and start its explosion
    pub(super) fn destroy_breakable(&mut self, id: ShapeId) {
        if let Some(breakable) = self.store.get_mut(id) {
            breakable.active = false;
        }
        self.set_breakable_exploding(true);
        self.sound(SoundRequest::Play(SoundCue::Breakable));
    }

    pub(super) fn set_breakable_exploding(&mut self, exploding: bool) {
        self.breakable_exploding = exploding;
        if let Some(gs) = self.store.get_mut(self.breakable_explosion) {
            gs.shape.visible = exploding;
        }
    }

    /// Grow the breakable explosion around the ship
    pub(super) fn grow_breakable_explosion(&mut self) {
        let pos = self.ship.pos;
        if let Some(gs) = self.store.get_mut(self.breakable_explosion) {
            gs.shape.visible = true;
            gs.shape.pos = pos;
            gs.shape.resize(EXPLOSION_GROWTH);
        }
    }

    /// Finish the breakable explosion and prepare a fresh one
    pub(super) fn reset_breakable_explosion(&mut self) {
        self.breakable_exploding = false;
        let Some(gs) = self.store.get_mut(self.breakable_explosion) else {
            return;
        };
        gs.shape.clear();
        build_debris(&mut gs.shape, &mut self.rng, 5, 6, |_| {
            Colour::rgb(255, 150, 50)
        });
        gs.shape.visible = false;
        gs.shape.resize(EXPLOSION_START_SCALE);
    }

    /// Keep the rocket loop in step with the thrust
    pub(super) fn update_rocket_sound(&mut self) {
        if self.ship.is_accelerating() {
            let volume = (self.ship.acceleration() * 10.0).clamp(0.0, 1.0) as f32;
            self.sound(SoundRequest::Loop {
                cue: SoundCue::Rocket,
                volume,
            });
            self.rocket_playing = true;
        } else {
            self.stop_rocket();
        }
    }

    fn stop_rocket(&mut self) {
        if self.rocket_playing {
            self.sound(SoundRequest::Fade {
                cue: SoundCue::Rocket,
                ms: 1000,
            });
            self.rocket_playing = false;
        }
    }

    /// Toggle between Running and Paused. Toggles within the debounce
    /// window of the last honoured one are ignored. Returns whether the
    /// toggle was honoured.
    pub fn toggle_pause(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_pause_toggle_ms {
            if now_ms.saturating_sub(last) < PAUSE_DEBOUNCE_MS {
                log::debug!("Pause toggle ignored ({}ms since last)", now_ms.saturating_sub(last));
                return false;
            }
        }
        let next = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            _ => return false,
        };
        self.last_pause_toggle_ms = Some(now_ms);
        if next == GamePhase::Paused {
            self.stop_rocket();
        }
        self.set_phase(next);
        true
    }

    /// Show the menu over the current level
    pub fn open_menu(&mut self) {
        if matches!(self.phase, GamePhase::Running | GamePhase::Paused) {
            self.stop_rocket();
            self.menu.reset();
            self.set_phase(GamePhase::Menu);
        }
    }

    /// Fill the level list submenu
    pub fn set_levels(&mut self, levels: &[usize]) {
        self.menu.clear_menu(LEVELS_MENU);
        for &level in levels {
            self.menu.add_menu_item(
                LEVELS_MENU,
                MenuItem::new(MenuItemId::Level(level), format!("Level {}", level), level as i32),
            );
        }
    }

    /// Act on the highlighted menu item
    pub fn menu_select(&mut self) {
        if self.phase != GamePhase::Menu {
            return;
        }
        match self.menu.select_current() {
            Some(Selection::Item(MenuItemId::Level(level))) => {
                self.emit(GameEvent::LoadLevel { level, start: true });
            }
            Some(Selection::Item(MenuItemId::Resume)) => self.resume(),
            Some(Selection::Item(MenuItemId::Quit)) => self.set_phase(GamePhase::Quit),
            Some(Selection::Item(MenuItemId::Play)) | Some(Selection::Submenu(_)) | None => {}
        }
    }

    /// Leave the current menu: a submenu returns to its parent, the main
    /// menu resumes the level
    pub fn menu_exit(&mut self) {
        if self.phase != GamePhase::Menu {
            return;
        }
        if !self.menu.back() {
            self.resume();
        }
    }

    fn resume(&mut self) {
        if self.level_loaded {
            self.set_phase(GamePhase::Running);
        }
    }

    pub fn quit(&mut self) {
        self.set_phase(GamePhase::Quit);
    }
}
