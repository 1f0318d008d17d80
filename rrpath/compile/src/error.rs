use quick_error::quick_error;
use std::{io, path::PathBuf};

quick_error! {
    /// An error in path data. `index` is the position of the offending token
    /// and `context` shows the tokens around it.
    #[derive(Debug, Clone, PartialEq)]
    pub enum PathError {
        /// The operator letter is not supported (this includes elliptical
        /// arcs and absolute smooth cubic curves).
        UnsupportedOperator { op: char, index: usize, context: String } {
            display("unsupported operator '{}' at token {} (near `{}`)", op, index, context)
        }
        /// The path ended, or another operator began, before the command
        /// received all of its operands.
        OperandUnderrun { op: char, index: usize, expected: usize, found: usize, context: String } {
            display("'{}' takes {} operand(s) but only {} remain at token {} (near `{}`)",
                op, expected, found, index, context)
        }
        /// A token in number position is not a number.
        MalformedNumber { literal: String, index: usize, context: String } {
            display("malformed number `{}` at token {} (near `{}`)", literal, index, context)
        }
        /// A number follows a command that takes no operands.
        StrayOperand { op: char, index: usize, context: String } {
            display("'{}' takes no operands but a number follows at token {} (near `{}`)",
                op, index, context)
        }
    }
}

impl PathError {
    /// The index of the token this error refers to.
    pub fn index(&self) -> usize {
        match *self {
            PathError::UnsupportedOperator { index, .. }
            | PathError::OperandUnderrun { index, .. }
            | PathError::MalformedNumber { index, .. }
            | PathError::StrayOperand { index, .. } => index,
        }
    }
}

quick_error! {
    /// An error that makes a single `path` element impossible to compile.
    #[derive(Debug, Clone, PartialEq)]
    pub enum ElementError {
        MissingPathData {
            display("the element has no `d` attribute")
        }
        MalformedColor(value: String) {
            display("unsupported fill color `{}`", value)
        }
        MalformedNumber(attr: &'static str, value: String) {
            display("malformed number `{}` in `{}`", value, attr)
        }
        Path(err: PathError) {
            from()
            display("{}", err)
            cause(err)
        }
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum CompileError {
        /// No input file was given to the driver.
        NoInput {
            display("no input file was specified")
        }
        /// No output was given and `OUT_DIR` is not set.
        NoOutDir {
            display("OUT_DIR is missing; are we really in a build script?")
        }
        Io(path: PathBuf, err: io::Error) {
            display("I/O error on '{}': {}", path.display(), err)
            cause(err)
        }
        Xml(err: roxmltree::Error) {
            from()
            display("could not parse the document: {}", err)
            cause(err)
        }
        MissingViewBox {
            display("the document has no `viewBox` attribute")
        }
        MalformedViewBox(value: String) {
            display("malformed `viewBox`: `{}`", value)
        }
        /// The `path` element at `index` (counting every `path` element in
        /// document order, starting at zero) failed to compile.
        Element { index: usize, err: ElementError } {
            display("path #{}: {}", index, err)
            cause(err)
        }
    }
}
