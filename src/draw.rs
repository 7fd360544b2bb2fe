// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the droplet frame.
// 2) The weather icon that rides on top of the droplet.
// 3) A tiny 5x7 bitmap font to render HUD text.

use crate::error::Error;
use crate::types::FrameBuffer;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window of the requested size.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in window pixels, or None while the pointer is outside.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    /// Visual: while true, the droplet follows the pointer.
    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    // droplet jumps straight home, no spring
    pub fn r_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::R, KeyRepeat::No)
    }

    pub fn s_pressed_once(&self) -> bool { self.window.is_key_pressed(Key::S, KeyRepeat::No) }
}

/* ---------- Software drawing: pixels, icon, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// 16x16 "cloud, sun and rain" glyph. '#' = ink.
const WEATHER_ICON: [&str; 16] = [
    "................",
    ".........#......",
    ".....#...#...#..",
    "......#.###.#...",
    ".......#####....",
    "......#######...",
    "...##.#######...",
    "..####..#####...",
    ".######..###....",
    "################",
    "################",
    ".##############.",
    "................",
    "..#...#...#.....",
    ".#...#...#......",
    "#...#...#.......",
];

const ICON_SIZE: i32 = 16;

/// Draw the weather icon centered at (cx,cy), each glyph cell `scale`×`scale` pixels.
/// Visual: a small white cloud/sun/rain mark sits in the middle of the droplet.
pub fn draw_icon(fb: &mut FrameBuffer, cx: i32, cy: i32, scale: i32, color: u32) {
    let scale = scale.max(1);
    let half = ICON_SIZE.saturating_mul(scale) / 2;
    let (ox, oy) = (cx.saturating_sub(half), cy.saturating_sub(half));
    for (ry, row) in WEATHER_ICON.iter().enumerate() {
        for (rx, cell) in row.bytes().enumerate() {
            if cell != b'#' {
                continue;
            }
            let px = ox.saturating_add((rx as i32).saturating_mul(scale));
            let py = oy.saturating_add((ry as i32).saturating_mul(scale));
            for sy in 0..scale {
                for sx in 0..scale {
                    put_pixel(fb, px.saturating_add(sx), py.saturating_add(sy), color);
                }
            }
        }
    }
}

/* ---------- 5x7 bitmap font (ASCII subset the HUD needs) ---------- */

/// Rows for one HUD character: state words, "DIST"/"REGIONS"/"FPS", key hints and numbers.
/// Low 5 bits of each row byte, bit 4 on the left. Anything else draws as a gap.
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Uppercase letters used by the HUD
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),

        // Punctuation: space, vertical bar, colon, dot
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),

        _ => None,
    }
}

/// One HUD character; the black shadow keeps it readable over both yellow and white.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        // Shadow pass: offset by (1,1) in black to improve readability
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32 + 1, y + ry as i32 + 1, 0x00000000);
                }
            }
        }

        // Foreground pass: actual glyph in chosen color
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32, y + ry as i32, color);
                }
            }
        }
    }
}

/// HUD line at (x,y): drag state, distance, region count and FPS, 6 px per character.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_rows_are_square() {
        assert_eq!(WEATHER_ICON.len() as i32, ICON_SIZE);
        assert!(WEATHER_ICON.iter().all(|r| r.len() as i32 == ICON_SIZE));
    }

    #[test]
    fn icon_is_centered_and_clipped() {
        let mut fb = FrameBuffer::new(64, 64);
        draw_icon(&mut fb, 32, 32, 2, 0x00FF_FFFF);
        let inked = fb.pixels.iter().filter(|&&p| p == 0x00FF_FFFF).count();
        let cells: usize = WEATHER_ICON.iter().map(|r| r.bytes().filter(|&b| b == b'#').count()).sum();
        assert_eq!(inked, cells * 4);

        // half off-screen must not panic
        draw_icon(&mut fb, 0, 0, 3, 0x00FF_0000);
        draw_icon(&mut fb, -500, 900, 1, 0x00FF_0000);
        draw_icon(&mut fb, i32::MAX, i32::MIN, 2, 0x00FF_0000);
        draw_icon(&mut fb, i32::MIN, i32::MAX, 2, 0x00FF_0000);
    }

    #[test]
    fn hud_letters_all_have_glyphs() {
        for ch in "DRAG SPRING REST | DIST: 0123456789. REGIONS FPS S: SAVE R: RESET".chars() {
            assert!(glyph5x7(ch).is_some(), "missing glyph {ch:?}");
        }
    }
}
