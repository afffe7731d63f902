//! Rendering module
//!
//! The core never touches a graphics toolkit. `View` turns the world into
//! screen-space `DrawLine`/`DrawText` requests and hands them to a
//! `RenderAdapter`.

pub mod view;

pub use view::View;

use crate::sim::Colour;

/// A screen-space segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawLine {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub thickness: u32,
    pub colour: Colour,
}

/// A line of HUD text. Missing coordinates mean centred on that axis.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawText {
    pub text: String,
    pub colour: Colour,
    pub size: u32,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Graphics toolkit seam
pub trait RenderAdapter {
    fn draw_line(&mut self, line: DrawLine);
    fn draw_text(&mut self, text: DrawText);
    /// Window size in pixels
    fn window_size(&self) -> (u32, u32);
    /// Start a new frame
    fn clear(&mut self) {}
    /// Show the finished frame
    fn present(&mut self) {}
}

/// Keeps the last frame's draw requests. Used headless and in tests.
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    width: u32,
    height: u32,
    pub lines: Vec<DrawLine>,
    pub texts: Vec<DrawText>,
}

impl RecordingRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            lines: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.text.contains(needle))
    }
}

impl RenderAdapter for RecordingRenderer {
    fn draw_line(&mut self, line: DrawLine) {
        self.lines.push(line);
    }

    fn draw_text(&mut self, text: DrawText) {
        self.texts.push(text);
    }

    fn window_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.lines.clear();
        self.texts.clear();
    }
}
