//! Fill colors
use rgb::{RGB8, RGBA8};

use crate::error::ElementError;

/// Specifies how a fill opacity in `[0, 1]` is converted to an alpha byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlphaRounding {
    /// Round toward zero (`0.5` → `0x7f`). This matches the assets produced
    /// so far.
    Truncate,
    /// Round to the nearest integer, ties away from zero (`0.5` → `0x80`).
    Nearest,
}

impl Default for AlphaRounding {
    fn default() -> Self {
        AlphaRounding::Truncate
    }
}

impl AlphaRounding {
    pub fn alpha(self, opacity: f64) -> u8 {
        let x = opacity.max(0.0).min(1.0) * 255.0;
        match self {
            AlphaRounding::Truncate => x as u8,
            AlphaRounding::Nearest => x.round() as u8,
        }
    }
}

/// Parse the value of a `fill` attribute. Returns `Ok(None)` for `none`.
///
/// Only `#rrggbb` and `#rgb` are supported.
pub fn parse_fill(value: &str) -> Result<Option<RGB8>, ElementError> {
    let value = value.trim();
    if value == "none" {
        return Ok(None);
    }

    let malformed = || ElementError::MalformedColor(value.to_owned());

    let hex = value.strip_prefix('#').ok_or_else(malformed)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(malformed());
    }

    let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map_err(|_| malformed());
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| malformed());

    match hex.len() {
        6 => Ok(Some(RGB8::new(byte(0)?, byte(2)?, byte(4)?))),
        3 => Ok(Some(RGB8::new(
            digit(0)? * 0x11,
            digit(1)? * 0x11,
            digit(2)? * 0x11,
        ))),
        _ => Err(malformed()),
    }
}

/// Combine a fill color and an optional fill opacity. The alpha is `0xff`
/// if `opacity` is `None`.
pub fn fill_color(rgb: RGB8, opacity: Option<f64>, rounding: AlphaRounding) -> RGBA8 {
    let alpha = opacity.map_or(0xff, |x| rounding.alpha(x));
    RGBA8::new(rgb.r, rgb.g, rgb.b, alpha)
}
