//! Ship collision detection
//!
//! The ship body and its exhaust flames are tested against every dynamic
//! shape in insertion order. Only the first contact is reported.

use super::game_shape::{GameShapeType, ShapeId, ShapeStore};
use super::ship::ShipModel;

/// Which part of the ship made contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipPart {
    Body,
    /// Flames only count against breakables
    Flames,
}

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub part: ShipPart,
    /// The shape that was touched
    pub shape: ShapeId,
}

/// Find the first shape touched by the ship.
///
/// The ship's own shapes, neutral shapes and inactive shapes are skipped.
/// The body only reports shapes it can be affected by, so a gravity well or
/// a prisoner never hides a wall behind it. Flames are tested only while they are showing, and only against
/// breakable shapes.
pub fn collision_detect(store: &ShapeStore, ship: &ShipModel) -> Option<Collision> {
    let body = store.get(ship.body_id())?;
    let flames = store
        .get(ship.flames_id())
        .filter(|f| f.shape.visible && !f.shape.is_empty());

    for (id, obj) in store.iter() {
        if ship.owns(id) || !obj.collides() {
            continue;
        }
        if obj.affects_ship() && body.shape.intersect_check(&obj.shape) {
            return Some(Collision {
                part: ShipPart::Body,
                shape: id,
            });
        }
        if obj.kind == GameShapeType::Breakable
            && flames.is_some_and(|f| f.shape.intersect_check(&obj.shape))
        {
            return Some(Collision {
                part: ShipPart::Flames,
                shape: id,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FULL_THRUST;
    use crate::sim::game_shape::{GameShape, Motion};
    use glam::DVec2;

    /// Store with a ship parked at (500, 500)
    fn setup() -> (ShapeStore, ShipModel) {
        let mut store = ShapeStore::new();
        let mut ship = ShipModel::new(&mut store, 1);
        ship.set_position(&mut store, DVec2::new(500.0, 500.0));
        (store, ship)
    }

    fn wall(store: &mut ShapeStore, kind: GameShapeType, x: f64, y: f64) -> ShapeId {
        let mut gs = GameShape::new(kind, "wall");
        gs.shape.add_line(-30.0, 0.0, 30.0, 0.0, 1);
        gs.shape.set_pos(x, y);
        store.insert(gs)
    }

    #[test]
    fn test_no_collision_in_open_space() {
        let (mut store, ship) = setup();
        wall(&mut store, GameShapeType::Obstruction, 500.0, 900.0);
        assert_eq!(collision_detect(&store, &ship), None);
    }

    #[test]
    fn test_body_hit() {
        let (mut store, ship) = setup();
        let id = wall(&mut store, GameShapeType::Obstruction, 500.0, 500.0);
        assert_eq!(
            collision_detect(&store, &ship),
            Some(Collision {
                part: ShipPart::Body,
                shape: id
            })
        );
    }

    #[test]
    fn test_neutral_and_inactive_are_skipped() {
        let (mut store, ship) = setup();
        wall(&mut store, GameShapeType::Neutral, 500.0, 500.0);
        let id = wall(&mut store, GameShapeType::Fuel, 500.0, 500.0);
        store.get_mut(id).unwrap().active = false;
        assert_eq!(collision_detect(&store, &ship), None);
    }

    #[test]
    fn test_first_in_insertion_order_wins() {
        let (mut store, ship) = setup();
        let first = wall(&mut store, GameShapeType::Fuel, 500.0, 505.0);
        wall(&mut store, GameShapeType::Obstruction, 500.0, 495.0);
        assert_eq!(collision_detect(&store, &ship).unwrap().shape, first);
    }

    #[test]
    fn test_pass_through_shapes_do_not_hide_wall() {
        let (mut store, ship) = setup();
        let well = wall(&mut store, GameShapeType::Moving, 500.0, 500.0);
        store.get_mut(well).unwrap().motion = Some(Motion {
            gravity: 5.0,
            ..Motion::default()
        });
        wall(&mut store, GameShapeType::Prisoner, 500.0, 500.0);
        wall(&mut store, GameShapeType::Key, 500.0, 500.0);
        assert_eq!(collision_detect(&store, &ship), None);

        let obstruction = wall(&mut store, GameShapeType::Obstruction, 500.0, 500.0);
        assert_eq!(
            collision_detect(&store, &ship),
            Some(Collision {
                part: ShipPart::Body,
                shape: obstruction
            })
        );
    }

    #[test]
    fn test_flames_hit_breakable_only() {
        let (mut store, mut ship) = setup();
        ship.set_is_accelerating(true, FULL_THRUST);
        ship.draw_flames(&mut store);
        // Just below the hull, inside the flame tongues
        let obstruction = wall(&mut store, GameShapeType::Obstruction, 500.0, 535.0);
        assert_eq!(collision_detect(&store, &ship), None);

        store.get_mut(obstruction).unwrap().kind = GameShapeType::Breakable;
        assert_eq!(
            collision_detect(&store, &ship),
            Some(Collision {
                part: ShipPart::Flames,
                shape: obstruction
            })
        );
    }

    #[test]
    fn test_hidden_flames_do_not_collide() {
        let (mut store, ship) = setup();
        wall(&mut store, GameShapeType::Breakable, 500.0, 535.0);
        assert_eq!(collision_detect(&store, &ship), None);
    }
}
