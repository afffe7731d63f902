//! Ship-centred camera and HUD
//!
//! The ship always sits in the middle of the screen pointing up; the world
//! turns around it. The viewport spans `VIEWPORT_WIDTH` world units across
//! whatever the window width is.

use glam::DVec2;

use super::{DrawLine, DrawText, RenderAdapter};
use crate::consts::VIEWPORT_WIDTH;
use crate::sim::{Colour, GamePhase, World};
use crate::{cos_deg, sin_deg};

const HUD_COLOUR: Colour = Colour::rgb(192, 192, 255);
const MENU_COLOUR: Colour = Colour::rgb(160, 160, 160);
const HIGHLIGHT_COLOUR: Colour = Colour::rgb(255, 255, 0);
const HUD_TEXT_SIZE: u32 = 16;
const MENU_TEXT_SIZE: u32 = 28;

/// World-to-screen transform for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    scale: f64,
    centre: DVec2,
    height: f64,
}

impl View {
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width as f64, height as f64);
        Self {
            scale: width / VIEWPORT_WIDTH,
            centre: DVec2::new(width / 2.0, height / 2.0),
            height,
        }
    }

    pub fn for_adapter(adapter: &dyn RenderAdapter) -> Self {
        let (w, h) = adapter.window_size();
        Self::new(w, h)
    }

    /// Pixels per world unit
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Map a world point to the screen for a ship at `ship_pos` heading
    /// `rotation` degrees
    pub fn to_screen(&self, point: DVec2, ship_pos: DVec2, rotation: f64) -> DVec2 {
        let rel = point - ship_pos;
        let (s, c) = (sin_deg(rotation), cos_deg(rotation));
        let turned = DVec2::new(rel.x * c - rel.y * s, rel.x * s + rel.y * c);
        turned * self.scale + self.centre
    }

    /// Draw the world, then the HUD
    pub fn render(&self, world: &World, adapter: &mut dyn RenderAdapter) {
        self.draw_world(world, adapter);
        self.draw_hud(world, adapter);
    }

    /// Every visible, active shape in insertion order
    pub fn draw_world(&self, world: &World, adapter: &mut dyn RenderAdapter) {
        let ship_pos = world.ship.pos;
        let rotation = world.ship.rotation();

        for (_, game_shape) in world.store.iter() {
            let shape = &game_shape.shape;
            if !shape.visible || !game_shape.active {
                continue;
            }
            for line in shape.lines() {
                let p0 = self.to_screen(line.p0 + shape.pos, ship_pos, rotation);
                let p1 = self.to_screen(line.p1 + shape.pos, ship_pos, rotation);
                adapter.draw_line(DrawLine {
                    x0: p0.x,
                    y0: p0.y,
                    x1: p1.x,
                    y1: p1.y,
                    thickness: line.thickness,
                    colour: line.colour,
                });
            }
        }
    }

    pub fn draw_hud(&self, world: &World, adapter: &mut dyn RenderAdapter) {
        let margin = 8.0;
        adapter.draw_text(DrawText {
            text: format!("Lives: {}", world.lives()),
            colour: HUD_COLOUR,
            size: HUD_TEXT_SIZE,
            x: Some(margin),
            y: Some(margin),
        });
        if !world.description().is_empty() {
            adapter.draw_text(DrawText {
                text: world.description().to_string(),
                colour: HUD_COLOUR,
                size: HUD_TEXT_SIZE,
                x: None,
                y: Some(self.height - HUD_TEXT_SIZE as f64 - margin),
            });
        }

        match world.phase() {
            GamePhase::Paused => adapter.draw_text(DrawText {
                text: "PAUSED".to_string(),
                colour: HIGHLIGHT_COLOUR,
                size: MENU_TEXT_SIZE,
                x: None,
                y: None,
            }),
            GamePhase::Menu => self.draw_menu(world, adapter),
            _ => {}
        }
    }

    /// Menu items stacked around the middle of the screen
    fn draw_menu(&self, world: &World, adapter: &mut dyn RenderAdapter) {
        let items = world.menu.current_items();
        let spacing = MENU_TEXT_SIZE as f64 * 1.5;
        let top = (self.height - spacing * items.len() as f64) / 2.0;
        let highlighted = world.menu.highlighted();

        for (i, item) in items.iter().enumerate() {
            let (text, colour) = if i == highlighted {
                (format!("> {} <", item.text), HIGHLIGHT_COLOUR)
            } else {
                (item.text.clone(), MENU_COLOUR)
            };
            adapter.draw_text(DrawText {
                text,
                colour,
                size: MENU_TEXT_SIZE,
                x: None,
                y: Some(top + spacing * i as f64),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{Geometry, LevelData, ObjectDescriptor, ShipStart};
    use crate::renderer::RecordingRenderer;
    use crate::sim::{GameShapeType, ShapeLine};

    fn assert_close(a: DVec2, b: DVec2) {
        assert!((a - b).length() < 1e-9, "{:?} != {:?}", a, b);
    }

    fn world_with_wall() -> World {
        let mut world = World::new(5);
        let level = LevelData {
            description: "View test".to_string(),
            ship_start: ShipStart {
                x: 1000.0,
                y: 1000.0,
                rotation: 0.0,
            },
            objects: vec![ObjectDescriptor {
                kind: GameShapeType::Obstruction,
                id: Some("wall".to_string()),
                position: Some(DVec2::new(900.0, 900.0)),
                geometry: vec![Geometry::Line(ShapeLine::new(
                    0.0,
                    0.0,
                    200.0,
                    0.0,
                    Colour::WHITE,
                    2,
                ))],
                motion: None,
            }],
        };
        world.load_level(0, &level);
        world.set_phase(GamePhase::Running);
        world
    }

    #[test]
    fn test_ship_maps_to_screen_centre() {
        let view = View::new(800, 500);
        let ship = DVec2::new(1234.0, 567.0);
        for rotation in [0.0, 45.0, 180.0, 359.0] {
            assert_close(view.to_screen(ship, ship, rotation), DVec2::new(400.0, 250.0));
        }
    }

    #[test]
    fn test_scale_and_rotation() {
        let view = View::new(960, 600);
        assert_eq!(view.scale(), 2.0);
        let ship = DVec2::new(100.0, 100.0);
        // 10 units to the right of the ship
        let p = DVec2::new(110.0, 100.0);
        assert_close(view.to_screen(p, ship, 0.0), DVec2::new(500.0, 300.0));
        assert_close(view.to_screen(p, ship, 90.0), DVec2::new(480.0, 320.0));
    }

    #[test]
    fn test_hidden_and_inactive_shapes_not_drawn() {
        let mut world = world_with_wall();
        let view = View::new(800, 500);
        let mut renderer = RecordingRenderer::new(800, 500);
        view.draw_world(&world, &mut renderer);
        let before = renderer.lines.len();

        let wall = world
            .store
            .iter()
            .find(|(_, s)| s.name == "wall")
            .map(|(id, _)| id)
            .unwrap();
        world.store.get_mut(wall).unwrap().active = false;
        renderer.clear();
        view.draw_world(&world, &mut renderer);
        assert_eq!(renderer.lines.len(), before - 1);
    }

    #[test]
    fn test_hud_texts() {
        let mut world = world_with_wall();
        let view = View::new(800, 500);
        let mut renderer = RecordingRenderer::new(800, 500);

        view.render(&world, &mut renderer);
        assert!(renderer.has_text("Lives: 1"));
        assert!(renderer.has_text("View test"));
        assert!(!renderer.has_text("PAUSED"));

        world.toggle_pause(0);
        renderer.clear();
        view.render(&world, &mut renderer);
        assert!(renderer.has_text("PAUSED"));
    }

    #[test]
    fn test_menu_highlight_marked() {
        let mut world = world_with_wall();
        world.open_menu();
        let view = View::new(800, 500);
        let mut renderer = RecordingRenderer::new(800, 500);
        view.render(&world, &mut renderer);
        assert!(renderer.has_text("> Play <"));
        assert!(renderer.texts.iter().any(|t| t.text == "Quit"));
    }
}
