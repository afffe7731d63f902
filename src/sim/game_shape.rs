//! Gameplay-tagged shapes and the arena that owns them
//!
//! Behaviour differences between object kinds are shallow (who collides with
//! what, what happens on contact), so a single `GameShapeType` tag is matched
//! on instead of a type per kind.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::shape::Shape;
use crate::consts::{GRAVITY_MIN_DISTANCE, GRAVITY_RANGE_FACTOR};

/// Gameplay role of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameShapeType {
    #[default]
    Uninitialised,
    /// Scenery; never collides
    Neutral,
    Ship,
    Flames,
    /// Wall; fatal on contact
    Obstruction,
    /// Extra life
    Fuel,
    Prisoner,
    Key,
    /// Level goal
    Exit,
    /// Wall that is destroyed once hit
    Breakable,
    /// Oscillating hazard, optionally a gravity well
    Moving,
}

impl GameShapeType {
    /// Parse the object class names used in level files
    pub fn from_level_name(name: &str) -> Self {
        match name {
            "OBSTRUCTION" => GameShapeType::Obstruction,
            "FUEL" => GameShapeType::Fuel,
            "PRISONER" => GameShapeType::Prisoner,
            "KEY" => GameShapeType::Key,
            "EXIT" => GameShapeType::Exit,
            "BREAKABLE" => GameShapeType::Breakable,
            "MOVING" => GameShapeType::Moving,
            _ => GameShapeType::Neutral,
        }
    }
}

/// Oscillation and gravity parameters of a moving object
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Motion {
    /// Per-frame movement on each axis
    pub delta: DVec2,
    /// Distance from the starting point at which each axis reverses (0 = unbounded)
    pub max_difference: DVec2,
    /// Degrees turned per frame
    pub rotation_delta: f64,
    /// Gravity well strength (0 = none)
    #[serde(default)]
    pub gravity: f64,
}

/// Handle to a shape in a `ShapeStore`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShapeId(usize);

/// A shape with a gameplay role
#[derive(Debug, Clone, Default)]
pub struct GameShape {
    pub shape: Shape,
    pub kind: GameShapeType,
    /// Inactive shapes are neither drawn nor collided with
    pub active: bool,
    /// Debugging label
    pub name: String,
    pub motion: Option<Motion>,
    /// Where the oscillation started, set on the first step
    origin: Option<DVec2>,
}

impl GameShape {
    pub fn new(kind: GameShapeType, name: impl Into<String>) -> Self {
        Self {
            shape: Shape::new(),
            kind,
            active: true,
            name: name.into(),
            motion: None,
            origin: None,
        }
    }

    /// Whether this shape can take part in a collision at all
    pub fn collides(&self) -> bool {
        self.active && self.kind != GameShapeType::Neutral
    }

    /// Whether touching this shape with the ship body does anything.
    /// Prisoners, keys and gravity wells can be flown through.
    pub fn affects_ship(&self) -> bool {
        match self.kind {
            GameShapeType::Obstruction
            | GameShapeType::Fuel
            | GameShapeType::Exit
            | GameShapeType::Breakable => true,
            GameShapeType::Moving => self.gravity() == 0.0,
            GameShapeType::Prisoner
            | GameShapeType::Key
            | GameShapeType::Uninitialised
            | GameShapeType::Neutral
            | GameShapeType::Ship
            | GameShapeType::Flames => false,
        }
    }

    pub fn gravity(&self) -> f64 {
        self.motion.map_or(0.0, |m| m.gravity)
    }

    /// Advance one frame of oscillation. Each axis reverses independently
    /// once it has travelled its max difference from the starting point.
    pub fn move_step(&mut self) {
        let Some(motion) = self.motion.as_mut() else {
            return;
        };
        let origin = *self.origin.get_or_insert(self.shape.pos);

        self.shape.pos += motion.delta;

        let offset = self.shape.pos - origin;
        if motion.max_difference.x > 0.0
            && offset.x.abs() >= motion.max_difference.x
            && offset.x.signum() == motion.delta.x.signum()
        {
            motion.delta.x = -motion.delta.x;
        }
        if motion.max_difference.y > 0.0
            && offset.y.abs() >= motion.max_difference.y
            && offset.y.signum() == motion.delta.y.signum()
        {
            motion.delta.y = -motion.delta.y;
        }

        let rotation = motion.rotation_delta;
        self.shape.rotate(rotation);
    }

    /// Inverse-square pull towards this shape felt at `point`, or `None` when
    /// the shape has no gravity or `point` is out of range.
    pub fn gravity_pull(&self, point: DVec2) -> Option<DVec2> {
        let gravity = self.gravity();
        if gravity == 0.0 {
            return None;
        }
        let to_well = self.shape.pos - point;
        let distance = to_well.length();
        if distance > gravity.abs() * GRAVITY_RANGE_FACTOR {
            return None;
        }
        let distance = distance.max(GRAVITY_MIN_DISTANCE);
        let direction = to_well.normalize_or_zero();
        Some(direction * (gravity / (distance * distance)))
    }
}

/// Insertion-ordered arena of every dynamic shape in the level
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    shapes: Vec<GameShape>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    pub fn insert(&mut self, shape: GameShape) -> ShapeId {
        self.shapes.push(shape);
        ShapeId(self.shapes.len() - 1)
    }

    pub fn get(&self, id: ShapeId) -> Option<&GameShape> {
        self.shapes.get(id.0)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut GameShape> {
        self.shapes.get_mut(id.0)
    }

    /// Drop every shape. All previously issued ids become invalid.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &GameShape)> {
        self.shapes.iter().enumerate().map(|(i, s)| (ShapeId(i), s))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ShapeId, &mut GameShape)> {
        self.shapes
            .iter_mut()
            .enumerate()
            .map(|(i, s)| (ShapeId(i), s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mover(delta: DVec2, max: DVec2) -> GameShape {
        let mut gs = GameShape::new(GameShapeType::Moving, "mover");
        gs.shape.add_line(-5.0, 0.0, 5.0, 0.0, 1);
        gs.shape.set_pos(100.0, 100.0);
        gs.motion = Some(Motion {
            delta,
            max_difference: max,
            rotation_delta: 0.0,
            gravity: 0.0,
        });
        gs
    }

    #[test]
    fn test_level_names() {
        assert_eq!(GameShapeType::from_level_name("FUEL"), GameShapeType::Fuel);
        assert_eq!(
            GameShapeType::from_level_name("BREAKABLE"),
            GameShapeType::Breakable
        );
        assert_eq!(
            GameShapeType::from_level_name("scenery"),
            GameShapeType::Neutral
        );
    }

    #[test]
    fn test_neutral_and_inactive_do_not_collide() {
        let mut gs = GameShape::new(GameShapeType::Obstruction, "wall");
        assert!(gs.collides());
        gs.active = false;
        assert!(!gs.collides());
        let bg = GameShape::new(GameShapeType::Neutral, "bg");
        assert!(!bg.collides());
    }

    #[test]
    fn test_oscillation_reverses_at_bounds() {
        let mut gs = mover(DVec2::new(1.0, 0.0), DVec2::new(3.0, 0.0));
        let xs: Vec<f64> = (0..8)
            .map(|_| {
                gs.move_step();
                gs.shape.pos.x
            })
            .collect();
        assert_eq!(xs, vec![101.0, 102.0, 103.0, 102.0, 101.0, 100.0, 99.0, 98.0]);
    }

    #[test]
    fn test_oscillation_axes_are_independent() {
        let mut gs = mover(DVec2::new(1.0, 2.0), DVec2::new(2.0, 10.0));
        for _ in 0..3 {
            gs.move_step();
        }
        // x reversed after 2 steps, y still heading out
        assert_eq!(gs.shape.pos, DVec2::new(101.0, 106.0));
    }

    #[test]
    fn test_unbounded_axis_never_reverses() {
        let mut gs = mover(DVec2::new(0.5, 0.0), DVec2::ZERO);
        for _ in 0..100 {
            gs.move_step();
        }
        assert_eq!(gs.shape.pos.x, 150.0);
    }

    #[test]
    fn test_gravity_pull() {
        let mut gs = mover(DVec2::ZERO, DVec2::ZERO);
        assert!(gs.gravity_pull(DVec2::new(90.0, 100.0)).is_none());

        gs.motion = Some(Motion {
            gravity: 4.0,
            ..Motion::default()
        });
        let pull = gs.gravity_pull(DVec2::new(90.0, 100.0)).unwrap();
        assert!((pull - DVec2::new(0.04, 0.0)).length() < 1e-12);

        // Out of range: 4 * 25 = 100
        assert!(gs.gravity_pull(DVec2::new(-1.0, 100.0)).is_none());
    }

    #[test]
    fn test_gravity_distance_is_clamped() {
        let mut gs = mover(DVec2::ZERO, DVec2::ZERO);
        gs.motion = Some(Motion {
            gravity: 2.0,
            ..Motion::default()
        });
        let pull = gs.gravity_pull(DVec2::new(100.0, 100.1)).unwrap();
        assert!((pull.length() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_store_keeps_insertion_order() {
        let mut store = ShapeStore::new();
        let a = store.insert(GameShape::new(GameShapeType::Neutral, "a"));
        let b = store.insert(GameShape::new(GameShapeType::Fuel, "b"));
        let names: Vec<_> = store.iter().map(|(_, s)| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(store.get(b).unwrap().kind, GameShapeType::Fuel);
        store.get_mut(a).unwrap().active = false;
        assert!(!store.get(a).unwrap().active);
        store.clear();
        assert!(store.get(a).is_none());
    }
}
