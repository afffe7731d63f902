//! Ship kinematics and ship visuals
//!
//! The ship stays in the middle of the screen and the world rotates around
//! it, so the body shape is turned the opposite way to the ship's heading.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::game_shape::{GameShape, GameShapeType, ShapeId, ShapeStore};
use super::shape::{Colour, Shape, ShapeLine};
use crate::consts::{EXPLOSION_GROWTH, EXPLOSION_START_SCALE, FRICTION, FULL_THRUST};
use crate::{cos_deg, normalize_degrees, sin_deg};

const HULL_COLOUR: Colour = Colour::rgb(192, 192, 255);

/// Hull outline, nose at the top
const HULL: [(f64, f64, f64, f64); 15] = [
    (0.0, -20.0, 6.0, -11.0),
    (6.0, -11.0, 6.0, 1.0),
    (6.0, 1.0, 12.0, 7.0),
    (12.0, 7.0, 12.0, 19.0),
    (12.0, 19.0, 6.0, 13.0),
    (6.0, 13.0, 2.0, 13.0),
    (2.0, 13.0, 6.0, 16.0),
    (6.0, 16.0, -6.0, 16.0),
    (-6.0, 16.0, -2.0, 13.0),
    (-2.0, 13.0, -6.0, 13.0),
    (-6.0, 13.0, -12.0, 19.0),
    (-12.0, 19.0, -12.0, 7.0),
    (-12.0, 7.0, -6.0, 1.0),
    (-6.0, 1.0, -6.0, -11.0),
    (-6.0, -11.0, 0.0, -20.0),
];

/// Flame tongue groups: colour, count, x spread, base length, length jitter
const FLAME_GROUPS: [(Colour, usize, i32, f64, i32); 4] = [
    (Colour::rgb(180, 0, 0), 8, 20, 80.0, 20),
    (Colour::rgb(255, 0, 0), 10, 30, 40.0, 30),
    (Colour::rgb(250, 214, 116), 6, 20, 35.0, 20),
    (Colour::rgb(255, 255, 255), 6, 8, 20.0, 10),
];

/// Where the flames leave the hull
const NOZZLE_Y: f64 = 17.0;

fn roll(rng: &mut Pcg32, n: i32) -> f64 {
    rng.random_range(0..n) as f64
}

/// Fill `shape` with a ring of jagged debris segments around the origin.
/// Roughly one segment in `skip_one_in` is left out.
pub fn build_debris(
    shape: &mut Shape,
    rng: &mut Pcg32,
    skip_one_in: i32,
    thickness: u32,
    mut colour: impl FnMut(&mut Pcg32) -> Colour,
) {
    for n in 0..11 {
        if rng.random_range(0..skip_one_in) == 1 {
            continue;
        }
        let a0 = n as f64 * 30.0;
        let a1 = (n + 1) as f64 * 30.0;
        let x0 = sin_deg(a0) * 20.0 + roll(rng, 10);
        let y0 = cos_deg(a0) * 20.0 + roll(rng, 10);
        let x1 = sin_deg(a1) * 20.0 + roll(rng, 10);
        let y1 = cos_deg(a1) * 20.0 + roll(rng, 10);
        let c = colour(&mut *rng);
        shape.add_shape_line(ShapeLine::new(x0, y0, x1, y1, c, thickness));
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct ShipModel {
    /// World position
    pub pos: DVec2,
    /// Heading in degrees, 0 = up
    rotation: f64,
    /// Steering applied every frame
    pub rotation_delta: f64,
    /// Per-frame displacement, subtracted from the position
    delta: DVec2,
    velocity: f64,
    accelerating: bool,
    acceleration: f64,
    exploding: bool,
    body: ShapeId,
    flames: ShapeId,
    explosion: ShapeId,
    rng: Pcg32,
}

impl ShipModel {
    /// Create the ship and add its three shapes to `store`
    pub fn new(store: &mut ShapeStore, seed: u64) -> Self {
        let (body, flames, explosion) = Self::insert_shapes(store);
        let mut ship = Self {
            pos: DVec2::ZERO,
            rotation: 0.0,
            rotation_delta: 0.0,
            delta: DVec2::ZERO,
            velocity: 0.0,
            accelerating: false,
            acceleration: 0.0,
            exploding: false,
            body,
            flames,
            explosion,
            rng: Pcg32::seed_from_u64(seed),
        };
        ship.rebuild(store);
        ship
    }

    fn insert_shapes(store: &mut ShapeStore) -> (ShapeId, ShapeId, ShapeId) {
        (
            store.insert(GameShape::new(GameShapeType::Ship, "Ship")),
            store.insert(GameShape::new(GameShapeType::Flames, "Flames")),
            store.insert(GameShape::new(GameShapeType::Neutral, "Explosion")),
        )
    }

    /// Add fresh body, flame and explosion shapes to `store`, replacing the
    /// handles held by the ship. Used after the store has been cleared.
    pub fn add_shapes(&mut self, store: &mut ShapeStore) {
        (self.body, self.flames, self.explosion) = Self::insert_shapes(store);
        self.rebuild(store);
    }

    /// Restore the ship's shapes to their unrotated, unexploded state
    pub fn rebuild(&mut self, store: &mut ShapeStore) {
        if let Some(body) = store.get_mut(self.body) {
            body.shape.clear();
            body.shape.set_colour(HULL_COLOUR);
            for &(x0, y0, x1, y1) in &HULL {
                body.shape.add_line(x0, y0, x1, y1, 1);
            }
            body.shape.pos = self.pos;
            body.shape.visible = true;
        }
        if let Some(flames) = store.get_mut(self.flames) {
            flames.shape.clear();
            flames.shape.visible = false;
        }
        self.build_explosion_shape(store);
    }

    /// Reset kinematics for a new level or a restart
    pub fn initialise(&mut self) {
        self.rotation = 0.0;
        self.rotation_delta = 0.0;
        self.delta = DVec2::ZERO;
        self.velocity = 0.0;
        self.accelerating = false;
        self.acceleration = 0.0;
        self.exploding = false;
    }

    pub fn body_id(&self) -> ShapeId {
        self.body
    }

    pub fn flames_id(&self) -> ShapeId {
        self.flames
    }

    pub fn explosion_id(&self) -> ShapeId {
        self.explosion
    }

    /// Whether `id` is one of the ship's own shapes
    pub fn owns(&self, id: ShapeId) -> bool {
        id == self.body || id == self.flames || id == self.explosion
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn delta(&self) -> DVec2 {
        self.delta
    }

    pub fn is_exploding(&self) -> bool {
        self.exploding
    }

    pub fn is_accelerating(&self) -> bool {
        self.accelerating
    }

    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    /// Nudge the ship's per-frame displacement (used by gravity wells)
    pub fn apply_pull(&mut self, pull: DVec2) {
        // Position moves by -delta, so a pull towards +x lowers delta.x
        self.delta -= pull;
    }

    /// Turn the ship by `delta` degrees; the body turns the other way
    pub fn set_rotation(&mut self, store: &mut ShapeStore, delta: f64) {
        self.rotation = normalize_degrees(self.rotation + delta);
        if let Some(body) = store.get_mut(self.body) {
            body.shape.rotate(-delta);
        }
    }

    pub fn set_is_accelerating(&mut self, accelerating: bool, amount: f64) {
        self.accelerating = accelerating;
        self.acceleration = if accelerating { amount } else { 0.0 };
    }

    /// Show or hide the debris and stop the ship dead
    pub fn set_is_exploding(&mut self, store: &mut ShapeStore, exploding: bool) {
        if let Some(explosion) = store.get_mut(self.explosion) {
            explosion.shape.visible = exploding;
        }
        self.exploding = exploding;
        self.velocity = 0.0;
        self.delta = DVec2::ZERO;
    }

    pub fn set_visible(&self, store: &mut ShapeStore, visible: bool) {
        if let Some(body) = store.get_mut(self.body) {
            body.shape.visible = visible;
        }
    }

    pub fn set_position(&mut self, store: &mut ShapeStore, pos: DVec2) {
        self.pos = pos;
        if let Some(body) = store.get_mut(self.body) {
            body.shape.pos = pos;
        }
    }

    /// Apply friction and thrust, then move
    pub fn update_ship_position(&mut self, store: &mut ShapeStore) {
        self.delta *= FRICTION;
        self.velocity = self.delta.length();

        if self.accelerating {
            self.delta.x += sin_deg(self.rotation) * self.acceleration;
            self.delta.y += cos_deg(self.rotation) * self.acceleration;
        }

        self.pos -= self.delta;
        if let Some(body) = store.get_mut(self.body) {
            body.shape.pos = self.pos;
        }
    }

    /// Slow the ship and shrink its hull by `factor` (after reaching the exit)
    pub fn settle(&mut self, store: &mut ShapeStore, factor: f64) {
        self.delta *= factor;
        if let Some(body) = store.get_mut(self.body) {
            body.shape.resize(factor);
        }
    }

    /// Per-frame update: steering, movement, explosion growth and flames
    pub fn process(&mut self, store: &mut ShapeStore) {
        self.set_rotation(store, self.rotation_delta);
        self.update_ship_position(store);

        if self.exploding {
            if let Some(explosion) = store.get_mut(self.explosion) {
                explosion.shape.pos = self.pos;
                explosion.shape.resize(EXPLOSION_GROWTH);
            }
            self.accelerating = false;
            self.acceleration = 0.0;
        }

        if self.accelerating {
            self.draw_flames(store);
        } else if let Some(flames) = store.get_mut(self.flames) {
            flames.shape.visible = false;
        }
    }

    /// Regenerate the flame tongues. Their length follows the thrust.
    pub fn draw_flames(&mut self, store: &mut ShapeStore) {
        let Some(flames) = store.get_mut(self.flames) else {
            return;
        };
        let power = (self.acceleration / FULL_THRUST).clamp(0.0, 1.0);
        let shape = &mut flames.shape;
        shape.clear();

        for &(colour, count, spread, length, jitter) in &FLAME_GROUPS {
            for _ in 0..count {
                let x0 = 4.0 - roll(&mut self.rng, 8);
                let x1 = (spread / 2) as f64 - roll(&mut self.rng, spread);
                let y1 = length + roll(&mut self.rng, jitter);
                shape.add_shape_line(ShapeLine::new(
                    x0,
                    NOZZLE_Y,
                    x0 + (x1 - x0) * power,
                    NOZZLE_Y + (y1 - NOZZLE_Y) * power,
                    colour,
                    1,
                ));
            }
        }

        shape.rotate(normalize_degrees(360.0 - self.rotation));
        shape.pos = self.pos;
        shape.visible = true;
    }

    /// Rebuild the explosion debris and flame ring, shrunk and hidden
    pub fn build_explosion_shape(&mut self, store: &mut ShapeStore) {
        let Some(explosion) = store.get_mut(self.explosion) else {
            return;
        };
        let rng = &mut self.rng;
        let shape = &mut explosion.shape;
        shape.clear();

        build_debris(shape, rng, 3, 4, |rng| {
            let grey = rng.random_range(96..224) as u8;
            Colour::rgb(grey, grey, grey)
        });

        for n in 0..60 {
            if rng.random_range(0..3) == 1 {
                continue;
            }
            let angle = n as f64 * 6.0;
            let (s, c) = (sin_deg(angle), cos_deg(angle));
            let ray = |from: f64, to: f64, colour: Colour, thickness: u32| {
                ShapeLine::new(s * from, c * from, s * to, c * to, colour, thickness)
            };
            shape.add_shape_line(ray(40.0, 50.0, Colour::WHITE, 3));
            shape.add_shape_line(ray(50.0, 60.0, Colour::rgb(250, 214, 116), 2));
            let reach = 70.0 + roll(rng, 50);
            shape.add_shape_line(ray(60.0, reach, Colour::rgb(255, 0, 0), 1));
        }

        shape.resize(EXPLOSION_START_SCALE);
        shape.visible = false;
    }
}
