use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (straight).
    pub a: u8,
}

impl Rgba8 {
    /// Build a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a CSS-style hex color: `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    pub fn parse_hex(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> Result<u8, String> {
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
        }
        fn hex_nibble(c: &str) -> Result<u8, String> {
            let v = u8::from_str_radix(c, 16).map_err(|_| format!("invalid hex digit \"{c}\""))?;
            Ok(v * 17)
        }

        if !s.is_ascii() {
            return Err("hex color must be ascii".to_owned());
        }

        match s.len() {
            3 | 4 => {
                let r = hex_nibble(&s[0..1])?;
                let g = hex_nibble(&s[1..2])?;
                let b = hex_nibble(&s[2..3])?;
                let a = if s.len() == 4 {
                    hex_nibble(&s[3..4])?
                } else {
                    255
                };
                Ok(Self::new(r, g, b, a))
            }
            6 | 8 => {
                let r = hex_byte(&s[0..2])?;
                let g = hex_byte(&s[2..4])?;
                let b = hex_byte(&s[4..6])?;
                let a = if s.len() == 8 {
                    hex_byte(&s[6..8])?
                } else {
                    255
                };
                Ok(Self::new(r, g, b, a))
            }
            _ => Err("hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA".to_owned()),
        }
    }

    /// Channels as an array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Premultiplied channels.
    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        [
            mul_div255(u16::from(self.r), a) as u8,
            mul_div255(u16::from(self.g), a) as u8,
            mul_div255(u16::from(self.b), a) as u8,
            self.a,
        ]
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// `round(x * y / 255)` for 8-bit channel math.
pub(crate) fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Flatten premultiplied RGBA8 over an opaque background color.
///
/// `dst` and `src` must have equal length, a multiple of four.
pub(crate) fn flatten_premul_over_bg(dst: &mut [u8], src_premul: &[u8], bg: Rgba8) -> bool {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return false;
    }

    let bg_r = u16::from(bg.r);
    let bg_g = u16::from(bg.g);
    let bg_b = u16::from(bg.b);

    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        d[0] = (u16::from(s[0]) + mul_div255(bg_r, inv)).min(255) as u8;
        d[1] = (u16::from(s[1]) + mul_div255(bg_g, inv)).min(255) as u8;
        d[2] = (u16::from(s[2]) + mul_div255(bg_b, inv)).min(255) as u8;
        d[3] = 255;
    }
    true
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
