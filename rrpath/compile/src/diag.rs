use codemap_diagnostic::{ColorConfig, Diagnostic, Emitter, Level, SpanLabel, SpanStyle};

use crate::{
    doc::ElementFailure,
    error::{CompileError, ElementError, PathError},
    path::tokenize_spanned,
};

pub struct Diag {
    codemap: codemap::CodeMap,
}

impl Diag {
    pub fn new() -> Self {
        Self {
            codemap: codemap::CodeMap::new(),
        }
    }

    pub fn emit(&mut self, msgs: &[Diagnostic]) {
        Emitter::stderr(ColorConfig::Auto, Some(&self.codemap)).emit(msgs);
    }

    pub fn emit_compile_error(&mut self, err: &CompileError) {
        self.emit(&[Diagnostic {
            level: Level::Error,
            message: err.to_string(),
            code: None,
            spans: vec![],
        }]);
    }

    /// Report a failed `path` element. `data` is the element's path data; if
    /// given, a path error is labelled with the location of the offending
    /// token.
    pub fn emit_element_failure(
        &mut self,
        level: Level,
        file_name: &str,
        data: Option<&str>,
        failure: &ElementFailure,
    ) {
        let mut spans = Vec::new();

        if let (ElementError::Path(err), Some(data)) = (&failure.err, data) {
            let tokens = tokenize_spanned(data);
            if let Some(token) = tokens.get(err.index()).or_else(|| tokens.last()) {
                let file = self.codemap.add_file(
                    format!("{} (path #{})", file_name, failure.index),
                    data.to_owned(),
                );
                spans.push(SpanLabel {
                    span: file
                        .span
                        .subspan(token.span.start as u64, token.span.end as u64),
                    label: Some(span_label(err).to_owned()),
                    style: SpanStyle::Primary,
                });
            }
        }

        self.emit(&[Diagnostic {
            level,
            message: format!("path #{}: {}", failure.index, failure.err),
            code: None,
            spans,
        }]);
    }
}

fn span_label(err: &PathError) -> &'static str {
    match err {
        PathError::UnsupportedOperator { .. } => "unsupported operator",
        PathError::OperandUnderrun { .. } => "not enough operands",
        PathError::MalformedNumber { .. } => "not a number",
        PathError::StrayOperand { .. } => "unexpected operand",
    }
}
