//! Control vocabulary and handler bindings
//!
//! Platform adapters translate keys, joystick axes and buttons into
//! `ControlEvent`s. The game dispatches each event to the handler bound to
//! its control.

use std::collections::{BTreeMap, HashMap};

use crate::consts::FULL_THRUST;
use crate::sim::{GamePhase, World};

/// Abstract game controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
    /// Joystick axis; `magnitude` is the signed rotation delta
    AnalogSteer,
    /// `magnitude` is the thrust when pressed
    Accelerate,
    Pause,
    Menu,
    Quit,
    // Menu navigation
    Up,
    Down,
    Enter,
    Exit,
}

/// One press, release or axis change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlEvent {
    pub control: Control,
    pub pressed: bool,
    pub magnitude: f64,
    pub timestamp_ms: u64,
}

impl ControlEvent {
    /// Digital press. Accelerate gets full thrust.
    pub fn press(control: Control, timestamp_ms: u64) -> Self {
        let magnitude = if control == Control::Accelerate {
            FULL_THRUST
        } else {
            1.0
        };
        Self {
            control,
            pressed: true,
            magnitude,
            timestamp_ms,
        }
    }

    pub fn release(control: Control, timestamp_ms: u64) -> Self {
        Self {
            control,
            pressed: false,
            magnitude: 0.0,
            timestamp_ms,
        }
    }

    /// Analog value, e.g. a joystick axis or trigger
    pub fn analog(control: Control, magnitude: f64, timestamp_ms: u64) -> Self {
        Self {
            control,
            pressed: magnitude != 0.0,
            magnitude,
            timestamp_ms,
        }
    }
}

/// Something that produces control events once per frame
pub trait InputAdapter {
    fn poll(&mut self) -> Vec<ControlEvent>;
}

pub type Handler<C> = Box<dyn FnMut(&mut C, &ControlEvent)>;

/// One handler per control
pub struct ControlBindings<C> {
    handlers: HashMap<Control, Handler<C>>,
}

impl<C> Default for ControlBindings<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ControlBindings<C> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Bind `handler` to `control`, replacing any existing binding
    pub fn register(&mut self, control: Control, handler: impl FnMut(&mut C, &ControlEvent) + 'static) {
        self.handlers.insert(control, Box::new(handler));
    }

    /// Run the handler for the event's control. Returns false if unbound.
    pub fn dispatch(&mut self, ctx: &mut C, event: &ControlEvent) -> bool {
        match self.handlers.get_mut(&event.control) {
            Some(handler) => {
                handler(ctx, event);
                true
            }
            None => {
                log::debug!("No handler for {:?}", event.control);
                false
            }
        }
    }
}

/// Steering direction of a digital control: left turns positive
fn steer_direction(control: Control) -> f64 {
    match control {
        Control::Left => 1.0,
        _ => -1.0,
    }
}

fn steer(world: &mut World, event: &ControlEvent) {
    let direction = steer_direction(event.control);
    if event.pressed {
        world.ship.rotation_delta = direction;
    } else if crate::sgn(world.ship.rotation_delta) == direction as i32 {
        // Releasing one key must not cancel a turn the other way
        world.ship.rotation_delta = 0.0;
    }
}

/// The standard bindings for playing the game
pub fn world_bindings() -> ControlBindings<World> {
    let mut bindings = ControlBindings::new();

    bindings.register(Control::Left, steer);
    bindings.register(Control::Right, steer);
    bindings.register(Control::AnalogSteer, |world: &mut World, event: &ControlEvent| {
        world.ship.rotation_delta = event.magnitude;
    });
    bindings.register(Control::Accelerate, |world: &mut World, event: &ControlEvent| {
        world.ship.set_is_accelerating(event.pressed, event.magnitude);
    });

    bindings.register(Control::Pause, |world: &mut World, event: &ControlEvent| {
        if event.pressed {
            world.toggle_pause(event.timestamp_ms);
        }
    });
    bindings.register(Control::Menu, |world: &mut World, event: &ControlEvent| {
        if event.pressed {
            world.open_menu();
        }
    });
    bindings.register(Control::Quit, |world: &mut World, event: &ControlEvent| {
        if event.pressed {
            world.quit();
        }
    });

    bindings.register(Control::Up, |world: &mut World, event: &ControlEvent| {
        if event.pressed && world.phase() == GamePhase::Menu {
            world.menu.highlight_previous();
        }
    });
    bindings.register(Control::Down, |world: &mut World, event: &ControlEvent| {
        if event.pressed && world.phase() == GamePhase::Menu {
            world.menu.highlight_next();
        }
    });
    bindings.register(Control::Enter, |world: &mut World, event: &ControlEvent| {
        if event.pressed {
            world.menu_select();
        }
    });
    bindings.register(Control::Exit, |world: &mut World, event: &ControlEvent| {
        if event.pressed {
            world.menu_exit();
        }
    });

    bindings
}

/// Replays events at fixed frame numbers. Used for demos and headless runs.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: BTreeMap<u64, Vec<ControlEvent>>,
    frame: u64,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` for delivery on `frame` (0-based poll count)
    pub fn at(mut self, frame: u64, event: ControlEvent) -> Self {
        self.script.entry(frame).or_default().push(event);
        self
    }
}

impl InputAdapter for ScriptedInput {
    fn poll(&mut self) -> Vec<ControlEvent> {
        let events = self.script.remove(&self.frame).unwrap_or_default();
        self.frame += 1;
        events
    }
}
