use core::fmt;

/// Packed 32-bit color in `0xAARRGGBB` layout, straight (non-premultiplied) alpha.
///
/// This is the representation resource files use for `#AARRGGBB` literals.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct ColorInt(pub u32);

impl ColorInt {
    pub const TRANSPARENT: ColorInt = ColorInt(0x0000_0000);
    pub const BLACK: ColorInt = ColorInt(0xFF00_0000);
    pub const WHITE: ColorInt = ColorInt(0xFFFF_FFFF);
    pub const RED: ColorInt = ColorInt(0xFFFF_0000);
    pub const GREEN: ColorInt = ColorInt(0xFF00_FF00);
    pub const BLUE: ColorInt = ColorInt(0xFF00_00FF);

    #[inline]
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    #[inline]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.alpha() == 0xFF
    }

    /// Parses a resource color literal.
    ///
    /// Accepted forms: `#RGB`, `#ARGB`, `#RRGGBB`, `#AARRGGBB`. Forms without
    /// an alpha component are fully opaque.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let v = u32::from_str_radix(hex, 16).ok()?;
        let argb = match hex.len() {
            3 => 0xFF00_0000 | expand_nibbles(v, 3),
            4 => expand_nibbles(v, 4),
            6 => 0xFF00_0000 | v,
            8 => v,
            _ => return None,
        };
        Some(Self(argb))
    }

    /// Channel-wise interpolation in straight sRGB space. `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: ColorInt, t: f32) -> ColorInt {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let (a, b) = (a as f32, b as f32);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        ColorInt::from_argb(
            mix(self.alpha(), other.alpha()),
            mix(self.red(), other.red()),
            mix(self.green(), other.green()),
            mix(self.blue(), other.blue()),
        )
    }
}

/// Widens `count` 4-bit digits of `v` into 8-bit channels (`0xF` -> `0xFF`).
fn expand_nibbles(v: u32, count: u32) -> u32 {
    let mut out = 0;
    for i in 0..count {
        let nibble = (v >> (4 * i)) & 0xF;
        out |= (nibble * 0x11) << (8 * i);
    }
    out
}

impl fmt::Display for ColorInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}
