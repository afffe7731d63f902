//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed-length frame per `tick`
//! - Seeded RNG only
//! - Stable iteration order (shape insertion order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod game_shape;
pub mod scheduler;
pub mod shape;
pub mod ship;
pub mod state;
pub mod tick;
pub mod vector_font;

pub use collision::{Collision, ShipPart, collision_detect};
pub use game_shape::{GameShape, GameShapeType, Motion, ShapeId, ShapeStore};
pub use scheduler::{ScheduleEventName, Scheduler};
pub use shape::{Colour, Shape, ShapeLine, segments_intersect};
pub use ship::ShipModel;
pub use state::{GameEvent, GamePhase, RingBuffer, SavedPosition, World};
pub use tick::tick;
