//! Path interpreter
use arrayvec::ArrayVec;
use cgmath::{Point2, Vector2};
use rrpath_io::Cmd;
use std::iter::once;

use super::{context, Command, Mode, Token};
use crate::error::PathError;

/// Line segments not longer than this along both axes are not emitted.
pub const DEGENERATE_EPSILON: f64 = 0.001;

/// Walks a token sequence and produces drawing calls.
///
/// A run of numbers without an operator in front of it repeats the last
/// seen operator. The initial operator is `m`, and the initial current point
/// is the base offset.
#[derive(Debug, Clone)]
pub struct PathInterpreter<'a> {
    tokens: &'a [Token],
    /// The next token to read
    index: usize,

    /// The current operator
    op: char,
    /// The index of the token `op` was read from
    op_index: usize,

    offset: Vector2<f64>,
    current: Point2<f64>,
}

impl<'a> PathInterpreter<'a> {
    /// Construct a `PathInterpreter`. Absolute coordinates are translated by
    /// `offset`.
    pub fn new(tokens: &'a [Token], offset: Vector2<f64>) -> Self {
        Self {
            tokens,
            index: 0,
            op: 'm',
            op_index: 0,
            offset,
            current: Point2::new(offset.x, offset.y),
        }
    }

    /// The current point.
    pub fn current_point(&self) -> Point2<f64> {
        self.current
    }

    /// Interpret the remaining tokens, sending the produced calls to `out`.
    ///
    /// On error, the calls produced so far have already been sent to `out`.
    pub fn run(&mut self, out: &mut impl Extend<Cmd>) -> Result<(), PathError> {
        while self.index < self.tokens.len() {
            let explicit = match &self.tokens[self.index] {
                Token::Operator(op) => {
                    self.op = *op;
                    self.op_index = self.index;
                    self.index += 1;
                    true
                }
                Token::Number(_) => false,
                Token::Malformed(literal) => return Err(self.malformed(literal)),
            };

            if let Some(cmd) = self.step(explicit)? {
                out.extend(once(cmd));
            }
        }
        Ok(())
    }

    /// Execute the current operator once. `explicit` indicates whether the
    /// operator was given in front of the operands (as opposed to being
    /// repeated implicitly).
    fn step(&mut self, explicit: bool) -> Result<Option<Cmd>, PathError> {
        let (command, mode) = Command::from_operator(self.op).ok_or_else(|| {
            PathError::UnsupportedOperator {
                op: self.op,
                index: self.op_index,
                context: context(self.tokens, self.op_index),
            }
        })?;

        if command.arity() == 0 && !explicit {
            return Err(PathError::StrayOperand {
                op: self.op,
                index: self.index,
                context: context(self.tokens, self.index),
            });
        }

        let operands = self.operands(command.arity())?;

        let start = self.current;
        let offset = self.offset;
        let point = |i: usize| {
            let v = Vector2::new(operands[i], operands[i + 1]);
            match mode {
                Mode::Absolute => Point2::new(0.0, 0.0) + offset + v,
                Mode::Relative => start + v,
            }
        };

        let cmd = match command {
            Command::MoveTo => {
                self.current = point(0);
                Some(Cmd::MoveTo(self.current))
            }
            Command::LineTo => self.line_to(point(0)),
            Command::HorizontalLineTo => {
                let x = match mode {
                    Mode::Absolute => operands[0] + offset.x,
                    Mode::Relative => start.x + operands[0],
                };
                self.line_to(Point2::new(x, start.y))
            }
            Command::VerticalLineTo => {
                let y = match mode {
                    Mode::Absolute => operands[0] + offset.y,
                    Mode::Relative => start.y + operands[0],
                };
                self.line_to(Point2::new(start.x, y))
            }
            Command::QuadBezierTo => {
                let cps = [point(0), point(2)];
                self.current = cps[1];
                Some(Cmd::QuadBezierTo(cps))
            }
            Command::CubicBezierTo | Command::SmoothCubicBezierTo => {
                let cps = [point(0), point(2), point(4)];
                self.current = cps[2];
                Some(Cmd::CubicBezierTo(cps))
            }
            Command::ClosePath => Some(Cmd::ClosePath),
        };

        log::trace!("'{}' {:?} -> {:?}", self.op, &operands[..], cmd);

        Ok(cmd)
    }

    /// Move the current point to `to`. Returns a `LineTo` unless the segment
    /// is degenerate.
    fn line_to(&mut self, to: Point2<f64>) -> Option<Cmd> {
        let delta = to - self.current;
        self.current = to;

        if delta.x.abs() > DEGENERATE_EPSILON || delta.y.abs() > DEGENERATE_EPSILON {
            Some(Cmd::LineTo(to))
        } else {
            None
        }
    }

    /// Consume `count` numbers.
    fn operands(&mut self, count: usize) -> Result<ArrayVec<[f64; 6]>, PathError> {
        let mut operands = ArrayVec::new();

        while operands.len() < count {
            match self.tokens.get(self.index) {
                Some(Token::Number(x)) => {
                    operands.push(*x);
                    self.index += 1;
                }
                Some(Token::Malformed(literal)) => return Err(self.malformed(literal)),
                Some(Token::Operator(_)) | None => {
                    return Err(PathError::OperandUnderrun {
                        op: self.op,
                        index: self.index,
                        expected: count,
                        found: operands.len(),
                        context: context(self.tokens, self.index),
                    });
                }
            }
        }

        Ok(operands)
    }

    fn malformed(&self, literal: &str) -> PathError {
        PathError::MalformedNumber {
            literal: literal.to_owned(),
            index: self.index,
            context: context(self.tokens, self.index),
        }
    }
}
