//! Embedded 5x7 bitmap font for on-frame text
//!
//! The display stack has no text primitive, so the HUD carries its own
//! glyph table. Each glyph is five column bytes, least significant bit at
//! the top row. Printable ASCII only; anything else is skipped.

use image::{Rgb, RgbImage};

const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;

/// Advance per character at a given scale (glyph plus one column of spacing)
fn advance(scale: u32) -> u32 {
    (GLYPH_WIDTH + 1) * scale
}

/// Draw a string with its top-left corner at (x, y).
///
/// Pixels falling outside the image are clipped, not an error.
pub fn draw_text(image: &mut RgbImage, text: &str, x: i32, y: i32, scale: u32, color: Rgb<u8>) {
    let mut cursor = x;
    for ch in text.chars() {
        draw_glyph(image, ch, cursor, y, scale, color);
        cursor += advance(scale) as i32;
    }
}

fn draw_glyph(image: &mut RgbImage, ch: char, x: i32, y: i32, scale: u32, color: Rgb<u8>) {
    let code = ch as u32;
    if !(0x20..=0x7e).contains(&code) {
        return;
    }
    let columns = &FONT_5X7[(code - 0x20) as usize];
    let (width, height) = image.dimensions();
    for (col, bits) in columns.iter().enumerate() {
        for row in 0..GLYPH_HEIGHT {
            if bits & (1 << row) == 0 {
                continue;
            }
            for dx in 0..scale {
                for dy in 0..scale {
                    let px = x + (col as u32 * scale + dx) as i32;
                    let py = y + (row * scale + dy) as i32;
                    if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                        image.put_pixel(px as u32, py as u32, color);
                    }
                }
            }
        }
    }
}

/// Classic 5x7 LCD glyphs for ASCII 0x20-0x7E, column-major, LSB on top
#[rustfmt::skip]
const FONT_5X7: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // space
    [0x00, 0x00, 0x5f, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7f, 0x14, 0x7f, 0x14], // #
    [0x24, 0x2a, 0x7f, 0x2a, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1c, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1c, 0x00], // )
    [0x14, 0x08, 0x3e, 0x08, 0x14], // *
    [0x08, 0x08, 0x3e, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3e, 0x51, 0x49, 0x45, 0x3e], // 0
    [0x00, 0x42, 0x7f, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4b, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7f, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3c, 0x4a, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1e], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3e], // @
    [0x7e, 0x11, 0x11, 0x11, 0x7e], // A
    [0x7f, 0x49, 0x49, 0x49, 0x36], // B
    [0x3e, 0x41, 0x41, 0x41, 0x22], // C
    [0x7f, 0x41, 0x41, 0x22, 0x1c], // D
    [0x7f, 0x49, 0x49, 0x49, 0x41], // E
    [0x7f, 0x09, 0x09, 0x09, 0x01], // F
    [0x3e, 0x41, 0x49, 0x49, 0x7a], // G
    [0x7f, 0x08, 0x08, 0x08, 0x7f], // H
    [0x00, 0x41, 0x7f, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3f, 0x01], // J
    [0x7f, 0x08, 0x14, 0x22, 0x41], // K
    [0x7f, 0x40, 0x40, 0x40, 0x40], // L
    [0x7f, 0x02, 0x0c, 0x02, 0x7f], // M
    [0x7f, 0x04, 0x08, 0x10, 0x7f], // N
    [0x3e, 0x41, 0x41, 0x41, 0x3e], // O
    [0x7f, 0x09, 0x09, 0x09, 0x06], // P
    [0x3e, 0x41, 0x51, 0x21, 0x5e], // Q
    [0x7f, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7f, 0x01, 0x01], // T
    [0x3f, 0x40, 0x40, 0x40, 0x3f], // U
    [0x1f, 0x20, 0x40, 0x20, 0x1f], // V
    [0x3f, 0x40, 0x38, 0x40, 0x3f], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7f, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x00, 0x41, 0x41, 0x7f, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7f, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7f], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7e, 0x09, 0x01, 0x02], // f
    [0x0c, 0x52, 0x52, 0x52, 0x3e], // g
    [0x7f, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7d, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3d, 0x00], // j
    [0x7f, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7f, 0x40, 0x00], // l
    [0x7c, 0x04, 0x18, 0x04, 0x78], // m
    [0x7c, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7c, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7c], // q
    [0x7c, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3f, 0x44, 0x40, 0x20], // t
    [0x3c, 0x40, 0x40, 0x20, 0x7c], // u
    [0x1c, 0x20, 0x40, 0x20, 0x1c], // v
    [0x3c, 0x40, 0x30, 0x40, 0x3c], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0c, 0x50, 0x50, 0x50, 0x3c], // y
    [0x44, 0x64, 0x54, 0x4c, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7f, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x10, 0x08, 0x08, 0x10, 0x08], // ~
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawing_changes_pixels_inside_the_glyph_cell() {
        let mut image = RgbImage::new(40, 20);
        draw_text(&mut image, "A", 0, 0, 1, Rgb([255, 255, 255]));
        let lit = image.pixels().filter(|p| p.0 != [0, 0, 0]).count();
        assert!(lit > 0);
    }

    #[test]
    fn out_of_bounds_text_is_clipped_not_fatal() {
        let mut image = RgbImage::new(10, 10);
        draw_text(&mut image, "clipped text", -3, 7, 2, Rgb([255, 255, 255]));
    }

    #[test]
    fn non_ascii_characters_are_skipped() {
        let mut image = RgbImage::new(20, 20);
        draw_text(&mut image, "\u{3042}", 0, 0, 1, Rgb([255, 255, 255]));
        assert!(image.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn characters_advance_by_the_glyph_cell() {
        let mut image = RgbImage::new(40, 10);
        draw_text(&mut image, "ll", 0, 0, 1, Rgb([255, 255, 255]));
        // The second 'l' starts one glyph cell (5 columns + 1 spacer) over.
        let second = image
            .enumerate_pixels()
            .filter(|(x, _, p)| *x >= 6 && p.0 == [255, 255, 255])
            .count();
        assert!(second > 0);
        assert!(image.enumerate_pixels().all(|(x, _, p)| x < 12 || p.0 == [0, 0, 0]));
    }
}
