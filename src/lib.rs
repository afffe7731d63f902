//! Amaze - a vector-graphics maze flying game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (shapes, ship physics, scheduler, game state)
//! - `level`: Level file loading
//! - `menu`: Menu structure and navigation
//! - `input`: Control vocabulary and handler bindings
//! - `audio`: Sound cues and the audio adapter seam
//! - `renderer`: Camera-relative view producing draw requests
//! - `game`: One-frame driver tying the adapters to the simulation
//! - `settings`: Persisted preferences

pub mod audio;
pub mod error;
pub mod game;
pub mod input;
pub mod level;
pub mod menu;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{AmazeError, Result};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Target frame rate. Every delay in the game is a frame count, so the
    /// loop must be capped at this rate.
    pub const FRAME_RATE: u32 = 100;

    /// Arena is 2000x2000 world units, the viewport shows 480 of them across
    pub const ARENA_SIZE: f64 = 2000.0;
    pub const VIEWPORT_WIDTH: f64 = 480.0;
    /// Spacing of the background grid lines
    pub const GRID_SPACING: f64 = 50.0;

    /// Per-frame velocity damping
    pub const FRICTION: f64 = 0.9985;
    /// Thrust impulse for a fully pressed (digital) accelerate control
    pub const FULL_THRUST: f64 = 0.04;

    /// Explosion growth factor applied every exploding frame
    pub const EXPLOSION_GROWTH: f64 = 1.2;
    /// Starting size of freshly built explosion shapes
    pub const EXPLOSION_START_SCALE: f64 = 0.1;
    /// Shrink factor applied to the ship each frame after reaching the exit
    pub const SUCCESS_SETTLE: f64 = 0.97;

    /// Frames between collision and death
    pub const EXPLODING_FRAMES: i32 = 40;
    /// Frames a destroyed breakable stays on screen
    pub const BREAKABLE_EXPLODING_FRAMES: i32 = 40;
    /// Frames before returning to the menu after success or game over
    pub const END_LOOP_FRAMES: i32 = 300;

    /// Repeated pause toggles within this window are ignored
    pub const PAUSE_DEBOUNCE_MS: u64 = 500;

    /// Lives at the start of every level
    pub const STARTING_LIVES: u32 = 1;
    /// Ship position history length (about two seconds at 100 fps)
    pub const SAVED_POSITIONS: usize = 200;

    /// Gravity wells are clamped to this minimum distance
    pub const GRAVITY_MIN_DISTANCE: f64 = 1.0;
    /// Gravity reach is `strength * GRAVITY_RANGE_FACTOR`
    pub const GRAVITY_RANGE_FACTOR: f64 = 25.0;
}

/// Sine of an angle in degrees
#[inline]
pub fn sin_deg(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

/// Cosine of an angle in degrees
#[inline]
pub fn cos_deg(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let d = degrees % 360.0;
    if d < 0.0 { d + 360.0 } else { d }
}

/// Sign of a value as -1, 0 or 1
#[inline]
pub fn sgn(x: f64) -> i32 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_trig() {
        assert!((sin_deg(90.0) - 1.0).abs() < 1e-12);
        assert!(cos_deg(90.0).abs() < 1e-12);
        assert!((cos_deg(180.0) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(0.0), 0.0);
    }

    #[test]
    fn test_sgn() {
        assert_eq!(sgn(3.5), 1);
        assert_eq!(sgn(-0.1), -1);
        assert_eq!(sgn(0.0), 0);
    }
}
