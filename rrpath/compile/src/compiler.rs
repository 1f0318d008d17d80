use rrpath_io::Cmd;

use crate::{
    color::AlphaRounding,
    doc::{document_offset, path_elements, Document, ElementFailure},
    emit::Emitter,
    error::CompileError,
};

/// Specifies what happens when a `path` element fails to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorPolicy {
    /// Fail the whole document.
    Abort,
    /// Leave the element out, record it in [`Artifact::skipped`], and carry
    /// on.
    Skip,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        ErrorPolicy::Abort
    }
}

/// The result of compiling a document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Artifact {
    /// The drawing calls of every compiled element in document order.
    pub cmds: Vec<Cmd>,
    /// The elements left out by [`ErrorPolicy::Skip`].
    pub skipped: Vec<ElementFailure>,
}

/// Compiles the `path` elements of a document into drawing calls.
///
/// ```
/// use rrpath_compile::Compiler;
/// use rrpath_io::Cmd;
///
/// let artifact = Compiler::new()
///     .compile_str(r##"<svg viewBox="0 0 100 60"><path d="M10 10L90 50Z"/></svg>"##)
///     .unwrap();
/// assert_eq!(artifact.cmds.len(), 4);
/// assert_eq!(artifact.cmds[0], Cmd::BeginPath);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Compiler {
    alpha_rounding: AlphaRounding,
    error_policy: ErrorPolicy,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alpha_rounding(self, alpha_rounding: AlphaRounding) -> Self {
        Self {
            alpha_rounding,
            ..self
        }
    }

    pub fn error_policy(self, error_policy: ErrorPolicy) -> Self {
        Self {
            error_policy,
            ..self
        }
    }

    /// Parse an XML document and compile it.
    pub fn compile_str(&self, text: &str) -> Result<Artifact, CompileError> {
        let doc = roxmltree::Document::parse(text)?;
        self.compile_document(&&doc)
    }

    pub fn compile_document(&self, doc: &impl Document) -> Result<Artifact, CompileError> {
        let offset = document_offset(doc)?;
        log::debug!("base offset = {:?}", offset);

        let mut emitter = Emitter::new(self.alpha_rounding);
        let mut skipped = Vec::new();

        for element in path_elements(doc) {
            let result = element.and_then(|element| {
                emitter
                    .emit_element(&element, offset)
                    .map_err(|err| ElementFailure {
                        index: element.index,
                        err,
                    })
            });

            match (result, self.error_policy) {
                (Ok(()), _) => {}
                (Err(failure), ErrorPolicy::Abort) => return Err(failure.into()),
                (Err(failure), ErrorPolicy::Skip) => {
                    log::warn!("path #{}: skipped: {}", failure.index, failure.err);
                    skipped.push(failure);
                }
            }
        }

        log::debug!(
            "compiled {} path element(s) into {} call(s), skipped {}",
            emitter.num_elements(),
            emitter.cmds().len(),
            skipped.len()
        );

        Ok(Artifact {
            cmds: emitter.into_cmds(),
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ElementError, PathError};
    use cgmath::Point2;
    use rgb::RGBA8;

    const DOC: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 20 20">
        <path d="M0 0h20v20z" fill="#00ff00"/>
        <path d="M0 0A5 5 0 0 1 10 10" fill="#ff0000"/>
        <path d="m1 1l2 2" fill="#0000ff" fill-opacity="0.5"/>
    </svg>"##;

    #[test]
    fn abort() {
        let _ = env_logger::builder().is_test(true).try_init();
        let err = Compiler::new().compile_str(DOC).unwrap_err();
        match err {
            CompileError::Element {
                index: 1,
                err: ElementError::Path(PathError::UnsupportedOperator { op: 'A', index: 3, .. }),
            } => {}
            err => panic!("{:?}", err),
        }
    }

    #[test]
    fn skip() {
        let _ = env_logger::builder().is_test(true).try_init();
        let artifact = Compiler::new()
            .error_policy(ErrorPolicy::Skip)
            .alpha_rounding(AlphaRounding::Nearest)
            .compile_str(DOC)
            .unwrap();

        assert_eq!(artifact.skipped.len(), 1);
        assert_eq!(artifact.skipped[0].index, 1);

        assert_eq!(
            artifact.cmds,
            [
                Cmd::BeginPath,
                Cmd::SetFill(RGBA8::new(0, 0xff, 0, 0xff)),
                Cmd::MoveTo(Point2::new(-10.0, -10.0)),
                Cmd::LineTo(Point2::new(10.0, -10.0)),
                Cmd::LineTo(Point2::new(10.0, 10.0)),
                Cmd::ClosePath,
                Cmd::Fill,
                Cmd::BeginPath,
                Cmd::SetFill(RGBA8::new(0, 0, 0xff, 0x80)),
                Cmd::MoveTo(Point2::new(-9.0, -9.0)),
                Cmd::LineTo(Point2::new(-7.0, -7.0)),
                Cmd::Fill,
            ]
        );
    }

    #[test]
    fn malformed_xml() {
        assert!(matches!(
            Compiler::new().compile_str("<svg"),
            Err(CompileError::Xml(_))
        ));
    }

    #[test]
    fn no_paths() {
        let artifact = Compiler::new()
            .compile_str(r#"<svg viewBox="0 0 1 1"><g/></svg>"#)
            .unwrap();
        assert_eq!(artifact, Artifact::default());
    }
}
