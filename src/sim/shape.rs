//! Line-segment shapes
//!
//! Every object in the game is drawn and collided as a list of straight
//! segments. Segment coordinates are local to the shape; the world-space
//! position of an endpoint is `endpoint + shape.pos`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::vector_font::{self, BLANK_GLYPH_WIDTH, GLYPH_SPACING};
use crate::{cos_deg, sin_deg};

/// RGBA colour of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const WHITE: Colour = Colour::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl Default for Colour {
    fn default() -> Self {
        Colour::WHITE
    }
}

/// A single coloured segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeLine {
    pub p0: DVec2,
    pub p1: DVec2,
    pub colour: Colour,
    pub thickness: u32,
}

impl ShapeLine {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64, colour: Colour, thickness: u32) -> Self {
        Self {
            p0: DVec2::new(x0, y0),
            p1: DVec2::new(x1, y1),
            colour,
            thickness,
        }
    }

    fn map(self, f: impl Fn(DVec2) -> DVec2) -> Self {
        Self {
            p0: f(self.p0),
            p1: f(self.p1),
            ..self
        }
    }
}

/// A collection of segments with a position, scale and visibility
#[derive(Debug, Clone)]
pub struct Shape {
    lines: Vec<ShapeLine>,
    /// World position of the local origin
    pub pos: DVec2,
    pub visible: bool,
    scale: f64,
    width: f64,
    height: f64,
    min: DVec2,
    max: DVec2,
    /// Colour used by `add_line`
    colour: Colour,
}

impl Default for Shape {
    fn default() -> Self {
        Self::new()
    }
}

impl Shape {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            pos: DVec2::ZERO,
            visible: true,
            scale: 1.0,
            width: 0.0,
            height: 0.0,
            min: DVec2::splat(f64::MAX),
            max: DVec2::splat(f64::MIN),
            colour: Colour::WHITE,
        }
    }

    pub fn lines(&self) -> &[ShapeLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_pos(&mut self, x: f64, y: f64) {
        self.pos = DVec2::new(x, y);
    }

    /// Set the default colour for subsequent `add_line` calls
    pub fn set_colour(&mut self, colour: Colour) {
        self.colour = colour;
    }

    /// Append a segment and grow the bounding box to contain it
    pub fn add_shape_line(&mut self, line: ShapeLine) {
        self.min = self.min.min(line.p0).min(line.p1);
        self.max = self.max.max(line.p0).max(line.p1);
        self.width = self.max.x - self.min.x;
        self.height = self.max.y - self.min.y;
        self.lines.push(line);
    }

    /// Append a segment in the current default colour
    pub fn add_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, thickness: u32) {
        self.add_shape_line(ShapeLine::new(x0, y0, x1, y1, self.colour, thickness));
    }

    /// Remove every segment and reset the bounding box
    pub fn clear(&mut self) {
        self.lines.clear();
        self.width = 0.0;
        self.height = 0.0;
        self.min = DVec2::splat(f64::MAX);
        self.max = DVec2::splat(f64::MIN);
    }

    /// Replace the segments with `text` rendered in the stroke font, centred
    /// on the local origin.
    pub fn make_from_text(&mut self, text: &str, colour: Colour, thickness: u32) {
        self.clear();
        let mut text_width = 0.0;

        for c in text.chars() {
            let glyph = vector_font::glyph(c);
            let mut char_width: f64 = if glyph.is_empty() {
                BLANK_GLYPH_WIDTH
            } else {
                0.0
            };
            let mut pen: Option<DVec2> = None;

            for &vertex in glyph {
                if vector_font::is_pen_up(vertex) {
                    pen = None;
                    continue;
                }
                let point = DVec2::new(vertex.0 as f64 + text_width, vertex.1 as f64);
                if let Some(prev) = pen {
                    self.add_shape_line(ShapeLine {
                        p0: prev,
                        p1: point,
                        colour,
                        thickness,
                    });
                }
                pen = Some(point);
                char_width = char_width.max(vertex.0 as f64);
            }

            text_width += char_width + GLYPH_SPACING;
        }

        // Built left to right from zero; shift so the middle is the origin
        let offset = DVec2::new(self.width / 2.0, self.height / 2.0);
        for line in &mut self.lines {
            *line = line.map(|p| p - offset);
        }
        self.min -= offset;
        self.max -= offset;
    }

    /// Rotate every segment about the local origin
    pub fn rotate(&mut self, degrees: f64) {
        if degrees == 0.0 {
            return;
        }
        let rd = degrees % 360.0;
        let (s, c) = (sin_deg(rd), cos_deg(rd));
        let turn = |p: DVec2| DVec2::new(p.x * c - p.y * s, p.x * s + p.y * c);

        self.lines = self.lines.iter().map(|line| line.map(&turn)).collect();
    }

    /// Scale every segment about the local origin. Width and height follow
    /// the stored scale, so repeated calls compound.
    pub fn resize(&mut self, factor: f64) {
        if factor > 0.0 {
            self.scale = factor;
        }
        for line in &mut self.lines {
            *line = line.map(|p| p * factor);
        }
        if !self.lines.is_empty() {
            self.min *= factor;
            self.max *= factor;
        }
        self.width *= self.scale;
        self.height *= self.scale;
    }

    /// Move the local origin to the bounding-box centre without moving the
    /// shape in the world. Needed before rotating a shape in place.
    pub fn set_pos_from_centre(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        let centre = (self.min + self.max) / 2.0;
        for line in &mut self.lines {
            *line = line.map(|p| p - centre);
        }
        self.min -= centre;
        self.max -= centre;
        self.pos += centre;
    }

    /// True if any of this shape's segments touches any of `other`'s
    pub fn intersect_check(&self, other: &Shape) -> bool {
        self.lines.iter().any(|mine| {
            let (p0, p1) = (mine.p0 + self.pos, mine.p1 + self.pos);
            other.lines.iter().any(|theirs| {
                segments_intersect(p0, p1, theirs.p0 + other.pos, theirs.p1 + other.pos)
            })
        })
    }
}

/// Closed segment test for `p0-p1` against `p2-p3`.
///
/// Bounding boxes are rejected first, then the parametric alpha/beta
/// numerators are compared against the shared denominator by sign so no
/// division happens. Collinear overlapping segments count as intersecting.
pub fn segments_intersect(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2) -> bool {
    let a = p1 - p0;
    let b = p2 - p3;

    // X bounding box
    let (x_lo, x_hi) = if a.x < 0.0 { (p1.x, p0.x) } else { (p0.x, p1.x) };
    if b.x > 0.0 {
        if x_hi < p3.x || p2.x < x_lo {
            return false;
        }
    } else if x_hi < p2.x || p3.x < x_lo {
        return false;
    }

    // Y bounding box
    let (y_lo, y_hi) = if a.y < 0.0 { (p1.y, p0.y) } else { (p0.y, p1.y) };
    if b.y > 0.0 {
        if y_hi < p3.y || p2.y < y_lo {
            return false;
        }
    } else if y_hi < p2.y || p3.y < y_lo {
        return false;
    }

    let c = p0 - p2;
    let alpha = b.y * c.x - b.x * c.y;
    let denom = a.y * b.x - a.x * b.y;
    if !within(alpha, denom) {
        return false;
    }

    let beta = a.x * c.y - a.y * c.x;
    within(beta, denom)
}

/// `numerator / denom` lies in [0, 1], tested without dividing
#[inline]
fn within(numerator: f64, denom: f64) -> bool {
    if denom > 0.0 {
        numerator >= 0.0 && numerator <= denom
    } else {
        numerator <= 0.0 && numerator >= denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square(size: f64) -> Shape {
        let mut s = Shape::new();
        s.add_line(0.0, 0.0, size, 0.0, 1);
        s.add_line(size, 0.0, size, size, 1);
        s.add_line(size, size, 0.0, size, 1);
        s.add_line(0.0, size, 0.0, 0.0, 1);
        s
    }

    fn assert_close(a: DVec2, b: DVec2) {
        assert!((a - b).length() < 1e-9, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_bounding_box_tracks_lines() {
        let mut s = Shape::new();
        s.add_line(-5.0, 2.0, 10.0, 8.0, 1);
        assert_eq!(s.width(), 15.0);
        assert_eq!(s.height(), 6.0);
        s.add_line(0.0, -4.0, 0.0, -4.0, 1);
        assert_eq!(s.width(), 15.0);
        assert_eq!(s.height(), 12.0);
        assert_eq!(s.lines().len(), 2);
    }

    #[test]
    fn test_clear_resets_size() {
        let mut s = square(10.0);
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.width(), 0.0);
        s.add_line(1.0, 1.0, 2.0, 3.0, 1);
        assert_eq!(s.width(), 1.0);
        assert_eq!(s.height(), 2.0);
    }

    #[test]
    fn test_crossing_segments_intersect() {
        let mut a = Shape::new();
        a.add_line(0.0, 0.0, 10.0, 10.0, 1);
        let mut b = Shape::new();
        b.add_line(0.0, 10.0, 10.0, 0.0, 1);
        assert!(a.intersect_check(&b));
        assert!(b.intersect_check(&a));
    }

    #[test]
    fn test_position_is_applied() {
        let a = square(10.0);
        let mut b = square(10.0);
        b.set_pos(5.0, 5.0);
        assert!(a.intersect_check(&b));
        b.set_pos(50.0, 0.0);
        assert!(!a.intersect_check(&b));
    }

    #[test]
    fn test_parallel_segments_miss() {
        let mut a = Shape::new();
        a.add_line(0.0, 0.0, 10.0, 0.0, 1);
        let mut b = Shape::new();
        b.add_line(0.0, 1.0, 10.0, 1.0, 1);
        assert!(!a.intersect_check(&b));
    }

    #[test]
    fn test_collinear_overlap_intersects() {
        assert!(segments_intersect(
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(5.0, 0.0),
            DVec2::new(15.0, 0.0),
        ));
        assert!(!segments_intersect(
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(11.0, 0.0),
            DVec2::new(15.0, 0.0),
        ));
    }

    #[test]
    fn test_touching_endpoints_intersect() {
        assert!(segments_intersect(
            DVec2::new(0.0, 0.0),
            DVec2::new(5.0, 5.0),
            DVec2::new(5.0, 5.0),
            DVec2::new(10.0, 0.0),
        ));
    }

    #[test]
    fn test_zero_length_segment_on_line() {
        let mut dot = Shape::new();
        dot.add_line(5.0, 0.0, 5.0, 0.0, 1);
        let mut line = Shape::new();
        line.add_line(0.0, 0.0, 10.0, 0.0, 1);
        assert!(dot.intersect_check(&line));
        dot.set_pos(0.0, 0.5);
        assert!(!dot.intersect_check(&line));
    }

    #[test]
    fn test_empty_shape_never_intersects() {
        let empty = Shape::new();
        let s = square(10.0);
        assert!(!empty.intersect_check(&s));
        assert!(!s.intersect_check(&empty));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let mut s = Shape::new();
        s.add_line(10.0, 0.0, 20.0, 0.0, 1);
        s.rotate(90.0);
        assert_close(s.lines()[0].p0, DVec2::new(0.0, 10.0));
        assert_close(s.lines()[0].p1, DVec2::new(0.0, 20.0));
    }

    #[test]
    fn test_rotate_zero_is_noop() {
        let mut s = square(10.0);
        let before = s.lines().to_vec();
        s.rotate(0.0);
        assert_eq!(s.lines(), &before[..]);
    }

    #[test]
    fn test_rotate_wraps_full_turns() {
        let mut a = square(10.0);
        let mut b = square(10.0);
        a.rotate(30.0);
        b.rotate(390.0);
        for (la, lb) in a.lines().iter().zip(b.lines()) {
            assert_close(la.p0, lb.p0);
            assert_close(la.p1, lb.p1);
        }
    }

    #[test]
    fn test_resize_compounds_size() {
        let mut s = square(10.0);
        s.resize(2.0);
        assert_eq!(s.scale(), 2.0);
        assert_eq!(s.width(), 20.0);
        assert_close(s.lines()[1].p1, DVec2::new(20.0, 20.0));
        s.resize(2.0);
        assert_eq!(s.width(), 40.0);
    }

    #[test]
    fn test_resize_ignores_non_positive_scale() {
        let mut s = square(10.0);
        s.resize(0.5);
        s.resize(0.0);
        assert_eq!(s.scale(), 0.5);
        assert_close(s.lines()[1].p1, DVec2::ZERO);
    }

    #[test]
    fn test_set_pos_from_centre_keeps_world_placement() {
        let mut s = Shape::new();
        s.add_line(100.0, 200.0, 140.0, 220.0, 1);
        s.set_pos(10.0, 10.0);
        s.set_pos_from_centre();
        assert_close(s.pos, DVec2::new(130.0, 220.0));
        assert_close(s.lines()[0].p0, DVec2::new(-20.0, -10.0));
        assert_close(s.lines()[0].p0 + s.pos, DVec2::new(110.0, 210.0));
    }

    #[test]
    fn test_make_from_text_is_centred() {
        let mut s = Shape::new();
        s.make_from_text("EXIT", Colour::rgb(0, 255, 0), 3);
        assert!(!s.is_empty());
        assert!(s.lines().iter().all(|l| l.thickness == 3));

        let (mut min, mut max) = (DVec2::splat(f64::MAX), DVec2::splat(f64::MIN));
        for l in s.lines() {
            min = min.min(l.p0).min(l.p1);
            max = max.max(l.p0).max(l.p1);
        }
        assert!((max.x - min.x - s.width()).abs() < 1e-9);
        assert!(min.x < 0.0 && max.x > 0.0);
        assert!(min.y < 0.0 && max.y > 0.0);
    }

    #[test]
    fn test_make_from_text_pen_up_splits_strokes() {
        // 'A' is three strokes of one segment each
        let mut s = Shape::new();
        s.make_from_text("A", Colour::WHITE, 1);
        assert_eq!(s.lines().len(), 3);

        // No stroke should join the two glyphs of "AA"
        let mut two = Shape::new();
        two.make_from_text("AA", Colour::WHITE, 1);
        assert_eq!(two.lines().len(), 6);
    }

    #[test]
    fn test_make_from_text_spaces_advance() {
        let mut a = Shape::new();
        a.make_from_text("I I", Colour::WHITE, 1);
        let mut b = Shape::new();
        b.make_from_text("II", Colour::WHITE, 1);
        // A blank glyph plus one more gap
        let advance = BLANK_GLYPH_WIDTH + GLYPH_SPACING;
        assert!((a.width() - b.width() - advance).abs() < 1e-9);
        assert_eq!(advance, 12.0);
    }

    fn shape_strategy(range: std::ops::Range<i16>) -> impl Strategy<Value = Shape> {
        let point = (range.clone(), range);
        prop::collection::vec((point.clone(), point), 1..6).prop_map(|segments| {
            let mut s = Shape::new();
            for ((x0, y0), (x1, y1)) in segments {
                s.add_line(x0 as f64, y0 as f64, x1 as f64, y1 as f64, 1);
            }
            s
        })
    }

    proptest! {
        #[test]
        fn prop_intersection_is_symmetric(
            a in shape_strategy(-50..50),
            b in shape_strategy(-50..50),
        ) {
            prop_assert_eq!(a.intersect_check(&b), b.intersect_check(&a));
        }

        #[test]
        fn prop_disjoint_boxes_never_intersect(
            a in shape_strategy(0..100),
            mut b in shape_strategy(0..100),
            gap in 101i16..1000,
        ) {
            b.set_pos(gap as f64, 0.0);
            prop_assert!(!a.intersect_check(&b));
        }

        #[test]
        fn prop_rotation_round_trip(a in shape_strategy(-100..100), theta in -720.0f64..720.0) {
            let mut rotated = a.clone();
            rotated.rotate(theta);
            rotated.rotate(-theta);
            for (orig, back) in a.lines().iter().zip(rotated.lines()) {
                prop_assert!((orig.p0 - back.p0).length() < 1e-6);
                prop_assert!((orig.p1 - back.p1).length() < 1e-6);
            }
        }
    }
}
