//! Defines the primitive drawing calls produced by `rrpath_compile` and
//! implements their textual form, a listing of C statements that the
//! renderer's asset initialization code executes verbatim.
use cgmath::Point2;
use rgb::RGBA8;

mod dec;
mod enc;

pub use {
    dec::{CmdDecoder, DecodeError},
    enc::CmdEncoder,
};

/// A primitive drawing call.
///
/// Coordinates are in the renderer's space, i.e., the document's base offset
/// is already applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cmd {
    BeginPath,
    MoveTo(Point2<f64>),
    LineTo(Point2<f64>),
    QuadBezierTo([Point2<f64>; 2]),
    CubicBezierTo([Point2<f64>; 3]),
    ClosePath,
    SetFill(RGBA8),
    Fill,
}

impl Cmd {
    /// The name of the renderer function implementing this call, without
    /// the prefix.
    pub fn name(&self) -> &'static str {
        match self {
            Cmd::BeginPath => "begin_path",
            Cmd::MoveTo(_) => "move_to",
            Cmd::LineTo(_) => "line_to",
            Cmd::QuadBezierTo(_) => "quadratic_curve_to",
            Cmd::CubicBezierTo(_) => "bezier_curve_to",
            Cmd::ClosePath => "close_path",
            Cmd::SetFill(_) => "set_fill",
            Cmd::Fill => "fill",
        }
    }

    /// The points this call passes to the renderer, in argument order.
    pub fn points(&self) -> &[Point2<f64>] {
        match self {
            Cmd::MoveTo(p) | Cmd::LineTo(p) => std::slice::from_ref(p),
            Cmd::QuadBezierTo(cps) => &cps[..],
            Cmd::CubicBezierTo(cps) => &cps[..],
            _ => &[],
        }
    }
}

/// Pack a color into the `0xAARRGGBB` form accepted by `set_fill`.
pub fn argb_from_rgba8(c: RGBA8) -> u32 {
    u32::from_be_bytes([c.a, c.r, c.g, c.b])
}

/// The inverse of [`argb_from_rgba8`].
pub fn rgba8_from_argb(x: u32) -> RGBA8 {
    let [a, r, g, b] = x.to_be_bytes();
    RGBA8::new(r, g, b, a)
}

/// Controls how [`CmdEncoder`] spells the calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    /// Prepended to every function name.
    pub prefix: String,
    /// The first argument of every call.
    pub receiver: String,
    /// The number of fractional digits of coordinates.
    pub precision: usize,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            prefix: "rr_renderer_".to_owned(),
            receiver: "renderer".to_owned(),
            precision: 2,
        }
    }
}
