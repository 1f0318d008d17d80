//! Path data compiler
//!
//! Path data (the `d` attribute) is compiled in two steps. [`tokenize`]
//! splits the text into operators and numbers, and [`PathInterpreter`] walks
//! the tokens, tracking the current point, and produces drawing calls.
use cgmath::Vector2;
use rrpath_io::Cmd;
use std::{fmt, ops::Range};

use crate::error::PathError;

mod demux;
mod interp;
mod tokenize;

pub use self::{
    demux::demux,
    interp::{PathInterpreter, DEGENERATE_EPSILON},
    tokenize::{tokenize, tokenize_spanned},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Operator(char),
    Number(f64),
    /// A chunk that is neither an operator nor a number.
    Malformed(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operator(op) => write!(f, "{}", op),
            Token::Number(x) => write!(f, "{}", x),
            Token::Malformed(literal) => write!(f, "{}", literal),
        }
    }
}

/// A [`Token`] and its location in the path data.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Range<usize>,
}

/// A drawing command selected by an operator letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveTo,
    LineTo,
    HorizontalLineTo,
    VerticalLineTo,
    QuadBezierTo,
    CubicBezierTo,
    /// `s`. Unlike the standard smooth curve, it takes both control points
    /// explicitly and is only available in the relative form.
    SmoothCubicBezierTo,
    ClosePath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Upper-case operator. Operands are offset by the document's base
    /// offset.
    Absolute,
    /// Lower-case operator. Operands are relative to the current point.
    Relative,
}

impl Command {
    /// Decode an operator letter. Returns `None` if the operator is not
    /// supported.
    pub fn from_operator(op: char) -> Option<(Self, Mode)> {
        let mode = if op.is_ascii_uppercase() {
            Mode::Absolute
        } else {
            Mode::Relative
        };

        let command = match op.to_ascii_lowercase() {
            'm' => Command::MoveTo,
            'l' => Command::LineTo,
            'h' => Command::HorizontalLineTo,
            'v' => Command::VerticalLineTo,
            'q' => Command::QuadBezierTo,
            'c' => Command::CubicBezierTo,
            's' if mode == Mode::Relative => Command::SmoothCubicBezierTo,
            'z' => Command::ClosePath,
            _ => return None,
        };

        Some((command, mode))
    }

    /// The number of operands consumed by a single invocation.
    pub fn arity(self) -> usize {
        match self {
            Command::MoveTo | Command::LineTo => 2,
            Command::HorizontalLineTo | Command::VerticalLineTo => 1,
            Command::QuadBezierTo => 4,
            Command::CubicBezierTo | Command::SmoothCubicBezierTo => 6,
            Command::ClosePath => 0,
        }
    }
}

/// Compile path data. Absolute coordinates are translated by `offset`.
///
/// ```
/// use cgmath::{Point2, Vector2};
/// use rrpath_compile::path::compile_path;
/// use rrpath_io::Cmd;
///
/// let cmds = compile_path("M10 10L90 50Z", Vector2::new(-50.0, -30.0)).unwrap();
/// assert_eq!(cmds, [
///     Cmd::MoveTo(Point2::new(-40.0, -20.0)),
///     Cmd::LineTo(Point2::new(40.0, 20.0)),
///     Cmd::ClosePath,
/// ]);
/// ```
pub fn compile_path(data: &str, offset: Vector2<f64>) -> Result<Vec<Cmd>, PathError> {
    let tokens = tokenize(data);
    let mut cmds = Vec::new();
    PathInterpreter::new(&tokens, offset).run(&mut cmds)?;
    Ok(cmds)
}

/// The maximum number of tokens shown on each side of the offending token
/// in error messages.
const CONTEXT_LEN: usize = 10;

/// Render the tokens around `index` for error messages.
fn context(tokens: &[Token], index: usize) -> String {
    let start = index.saturating_sub(CONTEXT_LEN);
    let end = (index + CONTEXT_LEN).min(tokens.len());

    tokens
        .get(start..end)
        .unwrap_or(&[])
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
