//! Emitter
use cgmath::Vector2;
use rrpath_io::Cmd;

use crate::{
    color::{fill_color, AlphaRounding},
    doc::PathElement,
    error::ElementError,
    path::{tokenize, PathInterpreter},
};

/// Accumulates the drawing calls of path elements in the order they are
/// given.
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    cmds: Vec<Cmd>,
    alpha_rounding: AlphaRounding,
    num_elements: usize,
}

impl Emitter {
    pub fn new(alpha_rounding: AlphaRounding) -> Self {
        Self {
            alpha_rounding,
            ..Self::default()
        }
    }

    /// Compile a path element and append its calls.
    ///
    /// Nothing is appended if the element fails to compile.
    pub fn emit_element(
        &mut self,
        element: &PathElement,
        offset: Vector2<f64>,
    ) -> Result<(), ElementError> {
        let tokens = tokenize(&element.data);
        let mut body = Vec::new();
        PathInterpreter::new(&tokens, offset).run(&mut body)?;

        let fill = element
            .fill
            .map(|rgb| fill_color(rgb, element.fill_opacity, self.alpha_rounding));

        self.cmds.reserve(body.len() + 3);
        self.cmds.push(Cmd::BeginPath);
        if let Some(color) = fill {
            self.cmds.push(Cmd::SetFill(color));
        }
        self.cmds.extend(body);
        if fill.is_some() {
            self.cmds.push(Cmd::Fill);
        }

        self.num_elements += 1;
        log::trace!(
            "path #{}: {} token(s), {} call(s) in total",
            element.index,
            tokens.len(),
            self.cmds.len()
        );

        Ok(())
    }

    /// The number of elements emitted so far.
    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    pub fn cmds(&self) -> &[Cmd] {
        &self.cmds
    }

    pub fn into_cmds(self) -> Vec<Cmd> {
        self.cmds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PathError;
    use cgmath::Point2;
    use rgb::{RGB8, RGBA8};

    fn element(data: &str, fill: Option<RGB8>, fill_opacity: Option<f64>) -> PathElement {
        PathElement {
            index: 0,
            data: data.to_owned(),
            fill,
            fill_opacity,
        }
    }

    #[test]
    fn filled() {
        let mut emitter = Emitter::default();
        emitter
            .emit_element(
                &element("M10 10L90 50Z", Some(RGB8::new(0xff, 0, 0)), None),
                Vector2::new(-50.0, -30.0),
            )
            .unwrap();

        assert_eq!(
            emitter.cmds(),
            &[
                Cmd::BeginPath,
                Cmd::SetFill(RGBA8::new(0xff, 0, 0, 0xff)),
                Cmd::MoveTo(Point2::new(-40.0, -20.0)),
                Cmd::LineTo(Point2::new(40.0, 20.0)),
                Cmd::ClosePath,
                Cmd::Fill,
            ][..]
        );
        assert_eq!(emitter.num_elements(), 1);
    }

    #[test]
    fn unfilled() {
        let mut emitter = Emitter::default();
        emitter
            .emit_element(&element("m1 2", None, Some(0.5)), Vector2::new(0.0, 0.0))
            .unwrap();

        assert_eq!(
            emitter.into_cmds(),
            [Cmd::BeginPath, Cmd::MoveTo(Point2::new(1.0, 2.0))]
        );
    }

    #[test]
    fn rounding() {
        let el = element("", Some(RGB8::new(0xab, 0xcd, 0xef)), Some(0.5));

        let mut emitter = Emitter::new(AlphaRounding::Nearest);
        emitter.emit_element(&el, Vector2::new(0.0, 0.0)).unwrap();
        assert_eq!(
            emitter.cmds()[1],
            Cmd::SetFill(RGBA8::new(0xab, 0xcd, 0xef, 0x80))
        );

        let mut emitter = Emitter::new(AlphaRounding::Truncate);
        emitter.emit_element(&el, Vector2::new(0.0, 0.0)).unwrap();
        assert_eq!(
            emitter.cmds()[1],
            Cmd::SetFill(RGBA8::new(0xab, 0xcd, 0xef, 0x7f))
        );
    }

    #[test]
    fn failure_appends_nothing() {
        let mut emitter = Emitter::default();
        emitter
            .emit_element(&element("M0 0", None, None), Vector2::new(0.0, 0.0))
            .unwrap();

        let err = emitter
            .emit_element(
                &element("M0 0 L10 10 A1 1 0 0 1 5 5", Some(RGB8::new(0, 0, 0)), None),
                Vector2::new(0.0, 0.0),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ElementError::Path(PathError::UnsupportedOperator { op: 'A', index: 6, .. })
        ));

        assert_eq!(
            emitter.cmds(),
            &[Cmd::BeginPath, Cmd::MoveTo(Point2::new(0.0, 0.0))][..]
        );
        assert_eq!(emitter.num_elements(), 1);
    }
}
