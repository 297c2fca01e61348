//! RGBA colors, hex parsing and source-over blending.

/// A color in RGBA format (0-255 per channel, straight alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// The four channels in `[r, g, b, a]` byte order.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
}

/// Parse a `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` color string.
///
/// Returns `None` for anything else, including a missing `#`.
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.strip_prefix('#')?;
    if !s.is_ascii() {
        return None;
    }
    let short = |i: usize| -> Option<u8> {
        let v = u8::from_str_radix(&s[i..i + 1], 16).ok()?;
        Some(v * 17)
    };
    let long = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
    match s.len() {
        3 => Some(Color::rgb(short(0)?, short(1)?, short(2)?)),
        4 => Some(Color::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
        6 => Some(Color::rgb(long(0)?, long(2)?, long(4)?)),
        8 => Some(Color::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
        _ => None,
    }
}

/// Composite `src` over `dst` (Porter-Duff source-over, straight alpha).
pub fn blend_over(dst: Color, src: Color) -> Color {
    match src.a {
        255 => return src,
        0 => return dst,
        _ => {}
    }
    let sa = src.a as u32;
    let da = dst.a as u32;
    // Destination weight, scaled by 255.
    let dw = da * (255 - sa);
    let out_a = sa * 255 + dw;
    if out_a == 0 {
        return Color::TRANSPARENT;
    }
    let channel = |s: u8, d: u8| -> u8 {
        ((s as u32 * sa * 255 + d as u32 * dw + out_a / 2) / out_a) as u8
    };
    Color::rgba(
        channel(src.r, dst.r),
        channel(src.g, dst.g),
        channel(src.b, dst.b),
        ((out_a + 127) / 255) as u8,
    )
}
