//=========================================================================
// Color
//
// 8-bit RGBA color used by the canvas, images and the background option.
//
// Responsibilities:
// - Named constants for common colors
// - Hex parsing for configuration (`#rgb`, `#rrggbb`, `#rrggbbaa`)
// - Source-over compositing used by every canvas primitive
//
//=========================================================================

//=== Color ===============================================================

/// Non-premultiplied RGBA color, 8 bits per channel.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new_rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::new_rgb(0, 0, 0);
    pub const WHITE: Color = Color::new_rgb(255, 255, 255);
    pub const RED: Color = Color::new_rgb(255, 0, 0);
    pub const GREEN: Color = Color::new_rgb(0, 255, 0);
    pub const BLUE: Color = Color::new_rgb(0, 0, 255);
    pub const GRAY: Color = Color::new_rgb(128, 128, 128);
    pub const YELLOW: Color = Color::new_rgb(255, 255, 0);

    #[inline]
    pub const fn new_rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    #[inline]
    pub const fn new_rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    #[inline]
    pub const fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    //--- Parsing ----------------------------------------------------------

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    ///
    /// Returns `None` for any other shape or non-hex digit.
    pub fn from_hex(text: &str) -> Option<Color> {
        let digits = text.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return None;
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).ok();

        match digits.len() {
            3 => {
                // Each short digit expands to a doubled pair ("f" → "ff").
                let mut out = [0u8; 3];
                for (slot, ch) in out.iter_mut().zip(digits.chars()) {
                    let v = ch.to_digit(16)? as u8;
                    *slot = v * 17;
                }
                Some(Color::new_rgb(out[0], out[1], out[2]))
            }
            6 => Some(Color::new_rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            8 => Some(Color::new_rgba(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                channel(&digits[6..8])?,
            )),
            _ => None,
        }
    }

    //--- Compositing ------------------------------------------------------

    /// Composites `src` over `self` with an extra opacity multiplier.
    ///
    /// `opacity` is not clamped above 1; the blended result saturates at
    /// the channel limits instead.
    pub fn blend(self, src: Color, opacity: f32) -> Color {
        let src_a = (src.a as f32 / 255.0) * opacity;
        if src_a <= 0.0 {
            return self;
        }

        let dst_a = self.a as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return Color::TRANSPARENT;
        }

        let mix = |s: u8, d: u8| -> u8 {
            let v = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };

        Color {
            r: mix(src.r, self.r),
            g: mix(src.g, self.g),
            b: mix(src.b, self.b),
            a: (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        }
    }
}

impl From<[u8; 4]> for Color {
    fn from(px: [u8; 4]) -> Self {
        Color::new_rgba(px[0], px[1], px[2], px[3])
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
