//! Decoder
use arrayvec::ArrayVec;
use cgmath::Point2;
use quick_error::quick_error;
use std::str::Lines;

use crate::{rgba8_from_argb, Cmd, Style};

quick_error! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum DecodeError {
        /// The line is not a call statement.
        Syntax { line: usize, text: String } {
            display("line {}: not a call statement: `{}`", line, text)
        }
        UnknownCall { line: usize, name: String } {
            display("line {}: unknown call `{}`", line, name)
        }
        Arity { line: usize, name: String, expected: usize, found: usize } {
            display("line {}: `{}` takes {} argument(s), found {}", line, name, expected, found)
        }
        BadArgument { line: usize, literal: String } {
            display("line {}: malformed argument `{}`", line, literal)
        }
    }
}

/// An iterator over drawing calls in a listing produced by
/// [`CmdEncoder`](crate::CmdEncoder).
///
/// Blank lines and the optional enclosing function definition are skipped.
/// Coordinates come back with the precision they were rendered with.
#[derive(Debug, Clone)]
pub struct CmdDecoder<'a> {
    lines: Lines<'a>,
    line: usize,
    style: Style,
}

impl<'a> CmdDecoder<'a> {
    pub fn from_str(text: &'a str) -> Self {
        Self::with_style(text, Style::default())
    }

    pub fn with_style(text: &'a str, style: Style) -> Self {
        Self {
            lines: text.lines(),
            line: 0,
            style,
        }
    }

    fn decode_line(&self, text: &str) -> Result<Cmd, DecodeError> {
        let line = self.line;
        let syntax = || DecodeError::Syntax {
            line,
            text: text.to_owned(),
        };

        let call = text
            .strip_prefix(self.style.prefix.as_str())
            .and_then(|rest| rest.strip_suffix(");"))
            .ok_or_else(syntax)?;
        let paren = call.find('(').ok_or_else(syntax)?;
        let (name, args) = (&call[..paren], &call[paren + 1..]);

        let mut args = args.split(',').map(str::trim);
        if args.next() != Some(self.style.receiver.as_str()) {
            return Err(syntax());
        }

        let args: Vec<&str> = args.collect();
        let arity = |expected: usize| {
            if args.len() == expected {
                Ok(())
            } else {
                Err(DecodeError::Arity {
                    line,
                    name: name.to_owned(),
                    expected,
                    found: args.len(),
                })
            }
        };
        let bad_argument = |literal: &str| DecodeError::BadArgument {
            line,
            literal: literal.to_owned(),
        };

        let cmd = match name {
            "begin_path" => arity(0).map(|()| Cmd::BeginPath)?,
            "close_path" => arity(0).map(|()| Cmd::ClosePath)?,
            "fill" => arity(0).map(|()| Cmd::Fill)?,
            "set_fill" => {
                arity(1)?;
                let hex = args[0]
                    .strip_prefix("0x")
                    .ok_or_else(|| bad_argument(args[0]))?;
                let argb = u32::from_str_radix(hex, 16).map_err(|_| bad_argument(args[0]))?;
                Cmd::SetFill(rgba8_from_argb(argb))
            }
            "move_to" | "line_to" | "quadratic_curve_to" | "bezier_curve_to" => {
                let expected = match name {
                    "move_to" | "line_to" => 2,
                    "quadratic_curve_to" => 4,
                    _ => 6,
                };
                arity(expected)?;

                let mut coords = ArrayVec::<[f64; 6]>::new();
                for &arg in args.iter() {
                    let value = arg.parse().map_err(|_| bad_argument(arg))?;
                    coords.push(value);
                }
                let pt = |i: usize| Point2::new(coords[i * 2], coords[i * 2 + 1]);

                match expected {
                    2 if name == "move_to" => Cmd::MoveTo(pt(0)),
                    2 => Cmd::LineTo(pt(0)),
                    4 => Cmd::QuadBezierTo([pt(0), pt(1)]),
                    _ => Cmd::CubicBezierTo([pt(0), pt(1), pt(2)]),
                }
            }
            _ => {
                return Err(DecodeError::UnknownCall {
                    line,
                    name: name.to_owned(),
                })
            }
        };

        Ok(cmd)
    }
}

impl<'a> Iterator for CmdDecoder<'a> {
    type Item = Result<Cmd, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = self.lines.next()?.trim();
            self.line += 1;

            if text.is_empty() || text == "{" || text == "}" || text.starts_with("void ") {
                continue;
            }

            return Some(self.decode_line(text));
        }
    }
}
