//! Stroke font for in-world text
//!
//! Each printable ASCII character (space through tilde) is a list of vertices
//! joined by strokes. A vertex with a `-1` coordinate lifts the pen so the
//! next vertex starts a fresh stroke. Glyphs are derived from the Hershey
//! simplex font with descenders shifted up and Y flipped for screen space:
//! the smallest vertex is (0, 0), X stays within 26 and Y within 33.

/// Vertex marking a pen lift
pub const PEN_UP: (i8, i8) = (-1, -1);

/// Width given to glyphs without any strokes
pub const BLANK_GLYPH_WIDTH: f64 = 10.0;

/// Gap between consecutive glyphs
pub const GLYPH_SPACING: f64 = 2.0;

const FIRST_GLYPH: u8 = b' ';

/// Glyph vertices for `c`. Characters outside the table map to a space.
pub fn glyph(c: char) -> &'static [(i8, i8)] {
    let index = (c as u32)
        .checked_sub(FIRST_GLYPH as u32)
        .map(|i| i as usize)
        .filter(|&i| i < GLYPHS.len())
        .unwrap_or(0);
    GLYPHS[index]
}

/// Whether a glyph vertex lifts the pen rather than drawing to it
#[inline]
pub fn is_pen_up(vertex: (i8, i8)) -> bool {
    vertex.0 == -1 || vertex.1 == -1
}

#[rustfmt::skip]
static GLYPHS: [&[(i8, i8)]; 95] = [
    // ' '
    &[],
    // '!'
    &[(5, 5), (5, 19), (-1, -1), (5, 24), (4, 25), (5, 26), (6, 25), (5, 24)],
    // '"'
    &[(4, 5), (4, 12), (-1, -1), (12, 5), (12, 12)],
    // '#'
    &[(11, 1), (4, 33), (-1, -1), (17, 1), (10, 33), (-1, -1), (4, 14), (18, 14), (-1, -1), (3, 20), (17, 20)],
    // '$'
    &[(8, 1), (8, 30), (-1, -1), (12, 1), (12, 30), (-1, -1), (17, 8), (15, 6), (12, 5), (8, 5), (5, 6), (3, 8), (3, 10), (4, 12), (5, 13), (7, 14), (13, 16), (15, 17), (16, 18), (17, 20), (17, 23), (15, 25), (12, 26), (8, 26), (5, 25), (3, 23)],
    // '%'
    &[(21, 5), (3, 26), (-1, -1), (8, 5), (10, 7), (10, 9), (9, 11), (7, 12), (5, 12), (3, 10), (3, 8), (4, 6), (6, 5), (8, 5), (10, 6), (13, 7), (16, 7), (19, 6), (21, 5), (-1, -1), (17, 19), (15, 20), (14, 22), (14, 24), (16, 26), (18, 26), (20, 25), (21, 23), (21, 21), (19, 19), (17, 19)],
    // '&'
    &[(23, 14), (23, 13), (22, 12), (21, 12), (20, 13), (19, 15), (17, 20), (15, 23), (13, 25), (11, 26), (7, 26), (5, 25), (4, 24), (3, 22), (3, 20), (4, 18), (5, 17), (12, 13), (13, 12), (14, 10), (14, 8), (13, 6), (11, 5), (9, 6), (8, 8), (8, 10), (9, 13), (11, 16), (16, 23), (18, 25), (20, 26), (22, 26), (23, 25), (23, 24)],
    // "'"
    &[(5, 7), (4, 6), (5, 5), (6, 6), (6, 8), (5, 10), (4, 11)],
    // '('
    &[(11, 1), (9, 3), (7, 6), (5, 10), (4, 15), (4, 19), (5, 24), (7, 28), (9, 31), (11, 33)],
    // ')'
    &[(3, 1), (5, 3), (7, 6), (9, 10), (10, 15), (10, 19), (9, 24), (7, 28), (5, 31), (3, 33)],
    // '*'
    &[(8, 5), (8, 17), (-1, -1), (3, 8), (13, 14), (-1, -1), (13, 8), (3, 14)],
    // '+'
    &[(13, 8), (13, 26), (-1, -1), (4, 17), (22, 17)],
    // ','
    &[(6, 25), (5, 26), (4, 25), (5, 24), (6, 25), (6, -1), (5, 29), (4, 30)],
    // '-'
    &[(4, 17), (22, 17)],
    // '.'
    &[(5, 24), (4, 25), (5, 26), (6, 25), (5, 24)],
    // '/'
    &[(20, 1), (2, 33)],
    // '0'
    &[(9, 5), (6, 6), (4, 9), (3, 14), (3, 17), (4, 22), (6, 25), (9, 26), (11, 26), (14, 25), (16, 22), (17, 17), (17, 14), (16, 9), (14, 6), (11, 5), (9, 5)],
    // '1'
    &[(6, 9), (8, 8), (11, 5), (11, 26)],
    // '2'
    &[(4, 10), (4, 9), (5, 7), (6, 6), (8, 5), (12, 5), (14, 6), (15, 7), (16, 9), (16, 11), (15, 13), (13, 16), (3, 26), (17, 26)],
    // '3'
    &[(5, 5), (16, 5), (10, 13), (13, 13), (15, 14), (16, 15), (17, 18), (17, 20), (16, 23), (14, 25), (11, 26), (8, 26), (5, 25), (4, 24), (3, 22)],
    // '4'
    &[(13, 5), (3, 19), (18, 19), (-1, -1), (13, 5), (13, 26)],
    // '5'
    &[(15, 5), (5, 5), (4, 14), (5, 13), (8, 12), (11, 12), (14, 13), (16, 15), (17, 18), (17, 20), (16, 23), (14, 25), (11, 26), (8, 26), (5, 25), (4, 24), (3, 22)],
    // '6'
    &[(16, 8), (15, 6), (12, 5), (10, 5), (7, 6), (5, 9), (4, 14), (4, 19), (5, 23), (7, 25), (10, 26), (11, 26), (14, 25), (16, 23), (17, 20), (17, 19), (16, 16), (14, 14), (11, 13), (10, 13), (7, 14), (5, 16), (4, 19)],
    // '7'
    &[(17, 5), (7, 26), (-1, -1), (3, 5), (17, 5)],
    // '8'
    &[(8, 5), (5, 6), (4, 8), (4, 10), (5, 12), (7, 13), (11, 14), (14, 15), (16, 17), (17, 19), (17, 22), (16, 24), (15, 25), (12, 26), (8, 26), (5, 25), (4, 24), (3, 22), (3, 19), (4, 17), (6, 15), (9, 14), (13, 13), (15, 12), (16, 10), (16, 8), (15, 6), (12, 5), (8, 5)],
    // '9'
    &[(16, 12), (15, 15), (13, 17), (10, 18), (9, 18), (6, 17), (4, 15), (3, 12), (3, 11), (4, 8), (6, 6), (9, 5), (10, 5), (13, 6), (15, 8), (16, 12), (16, 17), (15, 22), (13, 25), (10, 26), (8, 26), (5, 25), (4, 23)],
    // ':'
    &[(5, 12), (4, 13), (5, 14), (6, 13), (5, 12), (-1, -1), (5, 24), (4, 25), (5, 26), (6, 25), (5, 24)],
    // ';'
    &[(5, 12), (4, 13), (5, 14), (6, 13), (5, 12), (-1, -1), (6, 25), (5, 26), (4, 25), (5, 24), (6, 25), (6, -1), (5, 29), (4, 30)],
    // '<'
    &[(20, 8), (4, 17), (20, 26)],
    // '='
    &[(4, 14), (22, 14), (-1, -1), (4, 20), (22, 20)],
    // '>'
    &[(4, 8), (20, 17), (4, 26)],
    // '?'
    &[(3, 10), (3, 9), (4, 7), (5, 6), (7, 5), (11, 5), (13, 6), (14, 7), (15, 9), (15, 11), (14, 13), (13, 14), (9, 16), (9, 19), (-1, -1), (9, 24), (8, 25), (9, 26), (10, 25), (9, 24)],
    // '@'
    &[(18, 13), (17, 11), (15, 10), (12, 10), (10, 11), (9, 12), (8, 15), (8, 18), (9, 20), (11, 21), (14, 21), (16, 20), (17, 18), (-1, -1), (12, 10), (10, 12), (9, 15), (9, 18), (10, 20), (11, 21), (-1, -1), (18, 10), (17, 18), (17, 20), (19, 21), (21, 21), (23, 19), (24, 16), (24, 14), (23, 11), (22, 9), (20, 7), (18, 6), (15, 5), (12, 5), (9, 6), (7, 7), (5, 9), (4, 11), (3, 14), (3, 17), (4, 20), (5, 22), (7, 24), (9, 25), (12, 26), (15, 26), (18, 25), (20, 24), (21, 23), (-1, -1), (19, 10), (18, 18), (18, 20), (19, 21)],
    // 'A'
    &[(9, 5), (1, 26), (-1, -1), (9, 5), (17, 26), (-1, -1), (4, 19), (14, 19)],
    // 'B'
    &[(4, 5), (4, 26), (-1, -1), (4, 5), (13, 5), (16, 6), (17, 7), (18, 9), (18, 11), (17, 13), (16, 14), (13, 15), (-1, -1), (4, 15), (13, 15), (16, 16), (17, 17), (18, 19), (18, 22), (17, 24), (16, 25), (13, 26), (4, 26)],
    // 'C'
    &[(18, 10), (17, 8), (15, 6), (13, 5), (9, 5), (7, 6), (5, 8), (4, 10), (3, 13), (3, 18), (4, 21), (5, 23), (7, 25), (9, 26), (13, 26), (15, 25), (17, 23), (18, 21)],
    // 'D'
    &[(4, 5), (4, 26), (-1, -1), (4, 5), (11, 5), (14, 6), (16, 8), (17, 10), (18, 13), (18, 18), (17, 21), (16, 23), (14, 25), (11, 26), (4, 26)],
    // 'E'
    &[(4, 5), (4, 26), (-1, -1), (4, 5), (17, 5), (-1, -1), (4, 15), (12, 15), (-1, -1), (4, 26), (17, 26)],
    // 'F'
    &[(4, 5), (4, 26), (-1, -1), (4, 5), (17, 5), (-1, -1), (4, 15), (12, 15)],
    // 'G'
    &[(18, 10), (17, 8), (15, 6), (13, 5), (9, 5), (7, 6), (5, 8), (4, 10), (3, 13), (3, 18), (4, 21), (5, 23), (7, 25), (9, 26), (13, 26), (15, 25), (17, 23), (18, 21), (18, 18), (-1, -1), (13, 18), (18, 18)],
    // 'H'
    &[(4, 5), (4, 26), (-1, -1), (18, 5), (18, 26), (-1, -1), (4, 15), (18, 15)],
    // 'I'
    &[(4, 5), (4, 26)],
    // 'J'
    &[(12, 5), (12, 21), (11, 24), (10, 25), (8, 26), (6, 26), (4, 25), (3, 24), (2, 21), (2, 19)],
    // 'K'
    &[(4, 5), (4, 26), (-1, -1), (18, 5), (4, 19), (-1, -1), (9, 14), (18, 26)],
    // 'L'
    &[(4, 5), (4, 26), (-1, -1), (4, 26), (16, 26)],
    // 'M'
    &[(4, 5), (4, 26), (-1, -1), (4, 5), (12, 26), (-1, -1), (20, 5), (12, 26), (-1, -1), (20, 5), (20, 26)],
    // 'N'
    &[(4, 5), (4, 26), (-1, -1), (4, 5), (18, 26), (-1, -1), (18, 5), (18, 26)],
    // 'O'
    &[(9, 5), (7, 6), (5, 8), (4, 10), (3, 13), (3, 18), (4, 21), (5, 23), (7, 25), (9, 26), (13, 26), (15, 25), (17, 23), (18, 21), (19, 18), (19, 13), (18, 10), (17, 8), (15, 6), (13, 5), (9, 5)],
    // 'P'
    &[(4, 5), (4, 26), (-1, -1), (4, 5), (13, 5), (16, 6), (17, 7), (18, 9), (18, 12), (17, 14), (16, 15), (13, 16), (4, 16)],
    // 'Q'
    &[(9, 5), (7, 6), (5, 8), (4, 10), (3, 13), (3, 18), (4, 21), (5, 23), (7, 25), (9, 26), (13, 26), (15, 25), (17, 23), (18, 21), (19, 18), (19, 13), (18, 10), (17, 8), (15, 6), (13, 5), (9, 5), (-1, -1), (12, 22), (18, 28)],
    // 'R'
    &[(4, 5), (4, 26), (-1, -1), (4, 5), (13, 5), (16, 6), (17, 7), (18, 9), (18, 11), (17, 13), (16, 14), (13, 15), (4, 15), (-1, -1), (11, 15), (18, 26)],
    // 'S'
    &[(17, 8), (15, 6), (12, 5), (8, 5), (5, 6), (3, 8), (3, 10), (4, 12), (5, 13), (7, 14), (13, 16), (15, 17), (16, 18), (17, 20), (17, 23), (15, 25), (12, 26), (8, 26), (5, 25), (3, 23)],
    // 'T'
    &[(8, 5), (8, 26), (-1, -1), (1, 5), (15, 5)],
    // 'U'
    &[(4, 5), (4, 20), (5, 23), (7, 25), (10, 26), (12, 26), (15, 25), (17, 23), (18, 20), (18, 5)],
    // 'V'
    &[(1, 5), (9, 26), (-1, -1), (17, 5), (9, 26)],
    // 'W'
    &[(2, 5), (7, 26), (-1, -1), (12, 5), (7, 26), (-1, -1), (12, 5), (17, 26), (-1, -1), (22, 5), (17, 26)],
    // 'X'
    &[(3, 5), (17, 26), (-1, -1), (17, 5), (3, 26)],
    // 'Y'
    &[(1, 5), (9, 15), (9, 26), (-1, -1), (17, 5), (9, 15)],
    // 'Z'
    &[(17, 5), (3, 26), (-1, -1), (3, 5), (17, 5), (-1, -1), (3, 26), (17, 26)],
    // '['
    &[(4, 1), (4, 33), (-1, -1), (5, 1), (5, 33), (-1, -1), (4, 1), (11, 1), (-1, -1), (4, 33), (11, 33)],
    // '\\'
    &[(0, 5), (14, 29)],
    // ']'
    &[(9, 1), (9, 33), (-1, -1), (10, 1), (10, 33), (-1, -1), (3, 1), (10, 1), (-1, -1), (3, 33), (10, 33)],
    // '^'
    &[(6, 11), (8, 8), (10, 11), (-1, -1), (3, 14), (8, 9), (13, 14), (-1, -1), (8, 9), (8, 26)],
    // '_'
    &[(0, 28), (16, 28)],
    // '`'
    &[(6, 5), (5, 6), (4, 8), (4, 10), (5, 11), (6, 10), (5, 9)],
    // 'a'
    &[(15, 12), (15, 26), (-1, -1), (15, 15), (13, 13), (11, 12), (8, 12), (6, 13), (4, 15), (3, 18), (3, 20), (4, 23), (6, 25), (8, 26), (11, 26), (13, 25), (15, 23)],
    // 'b'
    &[(4, 5), (4, 26), (-1, -1), (4, 15), (6, 13), (8, 12), (11, 12), (13, 13), (15, 15), (16, 18), (16, 20), (15, 23), (13, 25), (11, 26), (8, 26), (6, 25), (4, 23)],
    // 'c'
    &[(15, 15), (13, 13), (11, 12), (8, 12), (6, 13), (4, 15), (3, 18), (3, 20), (4, 23), (6, 25), (8, 26), (11, 26), (13, 25), (15, 23)],
    // 'd'
    &[(15, 5), (15, 26), (-1, -1), (15, 15), (13, 13), (11, 12), (8, 12), (6, 13), (4, 15), (3, 18), (3, 20), (4, 23), (6, 25), (8, 26), (11, 26), (13, 25), (15, 23)],
    // 'e'
    &[(3, 18), (15, 18), (15, 16), (14, 14), (13, 13), (11, 12), (8, 12), (6, 13), (4, 15), (3, 18), (3, 20), (4, 23), (6, 25), (8, 26), (11, 26), (13, 25), (15, 23)],
    // 'f'
    &[(10, 5), (8, 5), (6, 6), (5, 9), (5, 26), (-1, -1), (2, 12), (9, 12)],
    // 'g'
    &[(15, 12), (15, 28), (14, 31), (13, 32), (11, 33), (8, 33), (6, 32), (-1, -1), (15, 15), (13, 13), (11, 12), (8, 12), (6, 13), (4, 15), (3, 18), (3, 20), (4, 23), (6, 25), (8, 26), (11, 26), (13, 25), (15, 23)],
    // 'h'
    &[(4, 5), (4, 26), (-1, -1), (4, 16), (7, 13), (9, 12), (12, 12), (14, 13), (15, 16), (15, 26)],
    // 'i'
    &[(3, 5), (4, 6), (5, 5), (4, 4), (3, 5), (-1, -1), (4, 12), (4, 26)],
    // 'j'
    &[(5, 5), (6, 6), (7, 5), (6, 4), (5, 5), (-1, -1), (6, 12), (6, 29), (5, 32), (3, 33), (1, 33)],
    // 'k'
    &[(4, 5), (4, 26), (-1, -1), (14, 12), (4, 22), (-1, -1), (8, 18), (15, 26)],
    // 'l'
    &[(4, 5), (4, 26)],
    // 'm'
    &[(4, 12), (4, 26), (-1, -1), (4, 16), (7, 13), (9, 12), (12, 12), (14, 13), (15, 16), (15, 26), (-1, -1), (15, 16), (18, 13), (20, 12), (23, 12), (25, 13), (26, 16), (26, 26)],
    // 'n'
    &[(4, 12), (4, 26), (-1, -1), (4, 16), (7, 13), (9, 12), (12, 12), (14, 13), (15, 16), (15, 26)],
    // 'o'
    &[(8, 12), (6, 13), (4, 15), (3, 18), (3, 20), (4, 23), (6, 25), (8, 26), (11, 26), (13, 25), (15, 23), (16, 20), (16, 18), (15, 15), (13, 13), (11, 12), (8, 12)],
    // 'p'
    &[(4, 12), (4, 33), (-1, -1), (4, 15), (6, 13), (8, 12), (11, 12), (13, 13), (15, 15), (16, 18), (16, 20), (15, 23), (13, 25), (11, 26), (8, 26), (6, 25), (4, 23)],
    // 'q'
    &[(15, 12), (15, 33), (-1, -1), (15, 15), (13, 13), (11, 12), (8, 12), (6, 13), (4, 15), (3, 18), (3, 20), (4, 23), (6, 25), (8, 26), (11, 26), (13, 25), (15, 23)],
    // 'r'
    &[(4, 12), (4, 26), (-1, -1), (4, 18), (5, 15), (7, 13), (9, 12), (12, 12)],
    // 's'
    &[(14, 15), (13, 13), (10, 12), (7, 12), (4, 13), (3, 15), (4, 17), (6, 18), (11, 19), (13, 20), (14, 22), (14, 23), (13, 25), (10, 26), (7, 26), (4, 25), (3, 23)],
    // 't'
    &[(5, 5), (5, 22), (6, 25), (8, 26), (10, 26), (-1, -1), (2, 12), (9, 12)],
    // 'u'
    &[(4, 12), (4, 22), (5, 25), (7, 26), (10, 26), (12, 25), (15, 22), (-1, -1), (15, 12), (15, 26)],
    // 'v'
    &[(2, 12), (8, 26), (-1, -1), (14, 12), (8, 26)],
    // 'w'
    &[(3, 12), (7, 26), (-1, -1), (11, 12), (7, 26), (-1, -1), (11, 12), (15, 26), (-1, -1), (19, 12), (15, 26)],
    // 'x'
    &[(3, 12), (14, 26), (-1, -1), (14, 12), (3, 26)],
    // 'y'
    &[(2, 12), (8, 26), (-1, -1), (14, 12), (8, 26), (6, 30), (4, 32), (2, 33), (1, 33)],
    // 'z'
    &[(14, 12), (3, 26), (-1, -1), (3, 12), (14, 12), (-1, -1), (3, 26), (14, 26)],
    // '{'
    &[(9, 1), (7, 2), (6, 3), (5, 5), (5, 7), (6, 9), (7, 10), (8, 12), (8, 14), (6, 16), (-1, -1), (7, 2), (6, 4), (6, 6), (7, 8), (8, 9), (9, 11), (9, 13), (8, 15), (4, 17), (8, 19), (9, 21), (9, 23), (8, 25), (7, 26), (6, 28), (6, 30), (7, 32), (-1, -1), (6, 18), (8, 20), (8, 22), (7, 24), (6, 25), (5, -1), (5, 29), (6, 31), (7, 32), (9, 33)],
    // '|'
    &[(4, 1), (4, 33)],
    // '}'
    &[(5, 1), (7, 2), (8, 3), (9, 5), (9, 7), (8, 9), (7, 10), (6, 12), (6, 14), (8, 16), (-1, -1), (7, 2), (8, 4), (8, 6), (7, 8), (6, 9), (5, 11), (5, 13), (6, 15), (10, 17), (6, 19), (5, 21), (5, 23), (6, 25), (7, 26), (8, 28), (8, 30), (7, 32), (-1, -1), (8, 18), (6, 20), (6, 22), (7, 24), (8, 25), (9, -1), (9, 29), (8, 31), (7, 32), (5, 33)],
    // '~'
    &[(3, 20), (3, 18), (4, 15), (6, 14), (8, 14), (10, 15), (14, 18), (16, 19), (18, 19), (20, 18), (21, 16), (-1, -1), (3, 18), (4, 16), (6, 15), (8, 15), (10, 16), (14, 19), (16, 20), (18, 20), (20, 19), (21, 16), (21, 14)],
];
