//! Fixed-rate simulation frame
//!
//! One call advances the world by exactly one frame. All delays in the game
//! are frame counts, so the caller must hold the loop at `FRAME_RATE`.

use glam::DVec2;

use super::collision::{Collision, ShipPart, collision_detect};
use super::game_shape::GameShapeType;
use super::scheduler::ScheduleEventName;
use super::state::{GamePhase, World};
use crate::consts::*;

/// Advance the world by one frame
pub fn tick(world: &mut World) {
    if matches!(
        world.phase(),
        GamePhase::Paused | GamePhase::Quit | GamePhase::Menu
    ) {
        return;
    }

    world.process_schedule();
    if matches!(world.phase(), GamePhase::Quit | GamePhase::Menu) {
        return;
    }

    if world.phase() == GamePhase::Exploding {
        world.ship.set_is_exploding(&mut world.store, true);
        world.ship.set_visible(&mut world.store, false);
        world
            .scheduler
            .do_after(ScheduleEventName::Exploding, EXPLODING_FRAMES, World::on_death);
    }

    if world.is_breakable_exploding() {
        world.grow_breakable_explosion();
        world.scheduler.do_after(
            ScheduleEventName::BreakableExploding,
            BREAKABLE_EXPLODING_FRAMES,
            World::reset_breakable_explosion,
        );
    }

    if world.phase() == GamePhase::Succeeded {
        world.ship.settle(&mut world.store, SUCCESS_SETTLE);
    }

    if world.phase() != GamePhase::Dead {
        world.ship.process(&mut world.store);
    }

    move_objects(world);

    if world.phase() == GamePhase::Running {
        world.update_rocket_sound();
        if let Some(collision) = collision_detect(&world.store, &world.ship) {
            handle_collision(world, collision);
        }
        world.save_position();
    }
}

/// Step every oscillating shape and gather the pull of gravity wells on
/// the ship
fn move_objects(world: &mut World) {
    let ship_pos = world.ship.pos;
    let mut pull = DVec2::ZERO;

    for (_, gs) in world.store.iter_mut() {
        if !gs.active || gs.kind != GameShapeType::Moving || gs.motion.is_none() {
            continue;
        }
        gs.move_step();
        if let Some(p) = gs.gravity_pull(ship_pos) {
            pull += p;
        }
    }

    if world.phase() == GamePhase::Running && pull != DVec2::ZERO {
        world.ship.apply_pull(pull);
    }
}

fn handle_collision(world: &mut World, collision: Collision) {
    let Some((kind, name)) = world
        .store
        .get(collision.shape)
        .map(|gs| (gs.kind, gs.name.clone()))
    else {
        return;
    };
    log::debug!("{:?} touched {} ({:?})", collision.part, name, kind);

    match (kind, collision.part) {
        (GameShapeType::Breakable, ShipPart::Flames) => world.destroy_breakable(collision.shape),
        (_, ShipPart::Flames) => {}
        (GameShapeType::Fuel, ShipPart::Body) => world.collect_fuel(collision.shape),
        (GameShapeType::Exit, ShipPart::Body) => world.succeed(),
        (GameShapeType::Obstruction, ShipPart::Body) => world.explode(),
        // Gravity wells are not reported, so any moving hit is solid
        (GameShapeType::Moving, ShipPart::Body) => world.explode(),
        (GameShapeType::Breakable, ShipPart::Body) => {
            if world.lives() > 0 {
                world.life_lost();
                world.destroy_breakable(collision.shape);
            } else {
                world.explode();
            }
        }
        (GameShapeType::Prisoner | GameShapeType::Key, ShipPart::Body) => {}
        (
            GameShapeType::Uninitialised
            | GameShapeType::Neutral
            | GameShapeType::Ship
            | GameShapeType::Flames,
            ShipPart::Body,
        ) => {}
    }
}
