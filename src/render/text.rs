//! Bitmap text rendering
//!
//! Text is drawn with a fixed 5x7 dot-matrix font scaled to the requested
//! size. No font files or shaping are involved so output is identical on
//! every machine.

use super::primitives::fill_rect;
use super::surface::Surface;
use crate::config::ShapeColor;
use crate::domain::{Point, Rect, TextAnnotation};

/// Font size used when an annotation carries none
pub const DEFAULT_FONT_SIZE: u32 = 16;
/// Largest cell height; bigger font sizes are capped
pub const MAX_FONT_SIZE: u32 = 512;
/// Margin of the background panel around the text block
pub const PANEL_PADDING: i32 = 4;
/// Background panel behind text
pub const PANEL_COLOR: ShapeColor = ShapeColor::rgba(0, 0, 0, 160);

const GLYPH_COLS: usize = 5;
const GLYPH_ROWS: usize = 7;

/// Glyph rows for `' '..='~'`; bit 4 is the leftmost column
#[rustfmt::skip]
static FONT_5X7: [[u8; GLYPH_ROWS]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
    [0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x0A, 0x1F, 0x0A, 0x0A, 0x1F, 0x0A, 0x00],
    [0x04, 0x0F, 0x14, 0x0E, 0x05, 0x1E, 0x04],
    [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03],
    [0x08, 0x14, 0x14, 0x08, 0x15, 0x12, 0x0D],
    [0x04, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
    [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
    [0x00, 0x0A, 0x04, 0x1F, 0x04, 0x0A, 0x00],
    [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x08],
    [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04],
    [0x01, 0x01, 0x02, 0x04, 0x08, 0x10, 0x10],
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
    [0x0E, 0x11, 0x01, 0x06, 0x08, 0x10, 0x1F],
    [0x0E, 0x11, 0x01, 0x06, 0x01, 0x11, 0x0E],
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
    [0x00, 0x00, 0x04, 0x00, 0x00, 0x04, 0x00],
    [0x00, 0x00, 0x04, 0x00, 0x00, 0x04, 0x08],
    [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02],
    [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
    [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08],
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
    [0x0E, 0x11, 0x17, 0x15, 0x17, 0x10, 0x0E],
    [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
    [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
    [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11],
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
    [0x0E, 0x11, 0x10, 0x0E, 0x01, 0x11, 0x0E],
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
    [0x11, 0x11, 0x11, 0x11, 0x0A, 0x0A, 0x04],
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x1B, 0x11],
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
    [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
    [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E],
    [0x10, 0x10, 0x08, 0x04, 0x02, 0x01, 0x01],
    [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E],
    [0x04, 0x0A, 0x11, 0x00, 0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
    [0x08, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F],
    [0x10, 0x10, 0x1E, 0x11, 0x11, 0x11, 0x1E],
    [0x00, 0x00, 0x0E, 0x11, 0x10, 0x11, 0x0E],
    [0x01, 0x01, 0x0F, 0x11, 0x11, 0x11, 0x0F],
    [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E],
    [0x06, 0x08, 0x1E, 0x08, 0x08, 0x08, 0x08],
    [0x00, 0x00, 0x0F, 0x11, 0x0F, 0x01, 0x0E],
    [0x10, 0x10, 0x1E, 0x11, 0x11, 0x11, 0x11],
    [0x04, 0x00, 0x0C, 0x04, 0x04, 0x04, 0x0E],
    [0x02, 0x00, 0x06, 0x02, 0x02, 0x12, 0x0C],
    [0x10, 0x10, 0x12, 0x14, 0x18, 0x14, 0x12],
    [0x0C, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
    [0x00, 0x00, 0x1A, 0x15, 0x15, 0x15, 0x15],
    [0x00, 0x00, 0x1E, 0x11, 0x11, 0x11, 0x11],
    [0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E],
    [0x00, 0x00, 0x1E, 0x11, 0x1E, 0x10, 0x10],
    [0x00, 0x00, 0x0F, 0x11, 0x0F, 0x01, 0x01],
    [0x00, 0x00, 0x16, 0x19, 0x10, 0x10, 0x10],
    [0x00, 0x00, 0x0F, 0x10, 0x0E, 0x01, 0x1E],
    [0x08, 0x08, 0x1E, 0x08, 0x08, 0x09, 0x06],
    [0x00, 0x00, 0x11, 0x11, 0x11, 0x11, 0x0F],
    [0x00, 0x00, 0x11, 0x11, 0x11, 0x0A, 0x04],
    [0x00, 0x00, 0x11, 0x11, 0x15, 0x15, 0x0A],
    [0x00, 0x00, 0x11, 0x0A, 0x04, 0x0A, 0x11],
    [0x00, 0x00, 0x11, 0x11, 0x0F, 0x01, 0x0E],
    [0x00, 0x00, 0x1F, 0x02, 0x04, 0x08, 0x1F],
    [0x02, 0x04, 0x04, 0x08, 0x04, 0x04, 0x02],
    [0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
    [0x08, 0x04, 0x04, 0x02, 0x04, 0x04, 0x08],
    [0x00, 0x00, 0x08, 0x15, 0x02, 0x00, 0x00],
];

fn glyph(ch: char) -> Option<&'static [u8; GLYPH_ROWS]> {
    let code = ch as u32;
    if !(0x20..=0x7E).contains(&code) {
        return None;
    }
    FONT_5X7.get((code - 0x20) as usize)
}

/// Per-character cell size `(width, height)` for a font size
pub fn cell_size(font_size: u32) -> (i32, i32) {
    let font = match font_size {
        0 => DEFAULT_FONT_SIZE,
        size => size.min(MAX_FONT_SIZE),
    } as i32;
    (font * 3 / 5, font)
}

/// Size of the text block in pixels, without the panel padding
pub fn measure(text: &str, font_size: u32) -> (i32, i32) {
    let (char_w, char_h) = cell_size(font_size);
    let mut lines = 0i32;
    let mut widest = 0i32;
    for line in text.split('\n') {
        lines = lines.saturating_add(1);
        widest = widest.max(i32::try_from(line.chars().count()).unwrap_or(i32::MAX));
    }
    (widest.saturating_mul(char_w), lines.saturating_mul(char_h))
}

/// Draw a text annotation: background panel first, then glyphs
pub fn draw_text<S: Surface + ?Sized>(s: &mut S, text: &TextAnnotation) {
    if text.text.is_empty() {
        return;
    }
    let (char_w, char_h) = cell_size(text.font_size);
    let Point { x: x0, y: y0 } = text.anchor;

    let (block_w, block_h) = measure(&text.text, text.font_size);
    let panel = Rect::new(
        x0.saturating_sub(PANEL_PADDING),
        y0.saturating_sub(PANEL_PADDING),
        x0.saturating_add(block_w).saturating_add(PANEL_PADDING),
        y0.saturating_add(block_h).saturating_add(PANEL_PADDING),
    );
    fill_rect(s, &panel, PANEL_COLOR);

    let color = if text.color.a == 0 {
        ShapeColor::rgb(255, 255, 255)
    } else {
        text.color
    };

    for (row, line) in text.text.split('\n').enumerate() {
        let y = y0.saturating_add((row as i32).saturating_mul(char_h));
        if y >= s.height() as i32 {
            break;
        }
        for (col, ch) in line.chars().enumerate() {
            let x = x0.saturating_add((col as i32).saturating_mul(char_w));
            if x >= s.width() as i32 {
                break;
            }
            let cell = Rect::from_xywh(x, y, char_w, char_h);
            match glyph(ch) {
                Some(rows) => draw_glyph(s, &cell, rows, color),
                None => fill_rect(s, &cell.inflate(-1), color),
            }
        }
    }
}

/// Scale a 5x7 glyph into `cell`
fn draw_glyph<S: Surface + ?Sized>(
    s: &mut S,
    cell: &Rect,
    rows: &[u8; GLYPH_ROWS],
    color: ShapeColor,
) {
    let scale_x = cell.width() as f32 / GLYPH_COLS as f32;
    let scale_y = cell.height() as f32 / GLYPH_ROWS as f32;

    for (row, bits) in rows.iter().enumerate() {
        for col in 0..GLYPH_COLS {
            if bits & (1 << (GLYPH_COLS - 1 - col)) == 0 {
                continue;
            }
            let dot = Rect::new(
                cell.left + (col as f32 * scale_x) as i32,
                cell.top + (row as f32 * scale_y) as i32,
                cell.left + ((col + 1) as f32 * scale_x) as i32,
                cell.top + ((row + 1) as f32 * scale_y) as i32,
            );
            fill_rect(s, &dot, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    fn text(anchor: Point, content: &str, font_size: u32, color: ShapeColor) -> TextAnnotation {
        TextAnnotation {
            anchor,
            text: content.to_string(),
            font_size,
            color,
        }
    }

    #[test]
    fn test_font_table_covers_printable_ascii() {
        assert_eq!(glyph(' '), Some(&[0; 7]));
        assert!(glyph('~').is_some());
        assert!(glyph('A').is_some());
        assert!(glyph('\u{7f}').is_none());
        assert!(glyph('é').is_none());
        assert!(glyph('\t').is_none());
    }

    #[test]
    fn test_measure_counts_characters_not_bytes() {
        // font 20 -> 12x20 cells
        assert_eq!(measure("abc", 20), (36, 20));
        assert_eq!(measure("日本", 20), (24, 20));
        assert_eq!(measure("a\nlonger", 20), (72, 40));
        assert_eq!(cell_size(0), (9, 16));
    }

    #[test]
    fn test_huge_font_size_is_capped() {
        assert_eq!(cell_size(1_000_000_000), cell_size(MAX_FONT_SIZE));
        assert_eq!(cell_size(u32::MAX), (307, 512));
        assert_eq!(measure("fourteen chars", u32::MAX), (14 * 307, 512));

        let mut img = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
        let red = ShapeColor::rgb(255, 0, 0);
        let huge = text(Point::new(5, 5), "fourteen chars", 1_000_000_000, red);
        draw_text(&mut img, &huge);
        assert_eq!(img.get_pixel(2, 2).0, [95, 95, 95, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);

        // Anchored near the edge of the coordinate space
        let far = text(Point::new(i32::MAX - 3, i32::MAX - 3), "xy\nz", 40, red);
        draw_text(&mut img, &far);
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let mut img = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
        draw_text(&mut img, &text(Point::new(5, 5), "", 20, ShapeColor::rgb(255, 0, 0)));
        assert!(img.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_panel_and_glyph_pixels() {
        let mut img = RgbaImage::from_pixel(40, 40, Rgba([255, 255, 255, 255]));
        // font 10 -> 6x10 cells; 'I' top row is 0x0E (columns 1..=3)
        draw_text(&mut img, &text(Point::new(10, 10), "I", 10, ShapeColor::rgb(255, 0, 0)));

        // Panel only: 255*95/255 = 95
        assert_eq!(img.get_pixel(6, 6).0, [95, 95, 95, 255]);
        assert_eq!(img.get_pixel(19, 23).0, [95, 95, 95, 255]);
        assert_eq!(img.get_pixel(5, 5).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(20, 24).0, [255, 255, 255, 255]);
        // Glyph dot at column 2 (x 12..14), row 0 (y 10)
        assert_eq!(img.get_pixel(12, 10).0, [255, 0, 0, 255]);
        // Column 0 of row 0 is clear
        assert_eq!(img.get_pixel(10, 10).0, [95, 95, 95, 255]);
    }

    #[test]
    fn test_transparent_color_draws_white() {
        let mut img = RgbaImage::from_pixel(40, 40, Rgba([0, 0, 0, 255]));
        draw_text(&mut img, &text(Point::new(10, 10), "I", 10, ShapeColor::rgba(9, 9, 9, 0)));
        assert_eq!(img.get_pixel(12, 10).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_non_ascii_draws_inset_block() {
        let mut img = RgbaImage::from_pixel(40, 40, Rgba([255, 255, 255, 255]));
        draw_text(&mut img, &text(Point::new(10, 10), "é", 10, ShapeColor::rgb(0, 0, 255)));
        // Cell 10..16 x 10..20, block inset by one pixel
        assert_eq!(img.get_pixel(11, 11).0, [0, 0, 255, 255]);
        assert_eq!(img.get_pixel(14, 18).0, [0, 0, 255, 255]);
        assert_eq!(img.get_pixel(10, 10).0, [95, 95, 95, 255]);
        assert_eq!(img.get_pixel(15, 19).0, [95, 95, 95, 255]);
    }
}
