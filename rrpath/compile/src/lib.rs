//! Compiles the `path` elements of SVG documents into drawing calls of the
//! `rr_renderer` API.
//!
//! The compiler handles the subset of path data produced by the vector tools
//! the assets are authored with: `M`, `L`, `H`, `V`, `Q`, `C`, `Z` in both
//! forms and the relative `s`. Coordinates are translated so that the origin
//! is at the center of the document's `viewBox`.
//!
//! ```
//! use rrpath_compile::Compiler;
//! use rrpath_io::CmdEncoder;
//!
//! let artifact = Compiler::new()
//!     .compile_str(r##"
//!         <svg viewBox="0 0 100 60">
//!             <path d="M10 10L90 50Z" fill="#ff0000"/>
//!         </svg>
//!     "##)
//!     .unwrap();
//!
//! let text = artifact.cmds.iter().copied().collect::<CmdEncoder>().take_text();
//! assert_eq!(text, "\
//!     rr_renderer_begin_path(renderer);\n\
//!     rr_renderer_set_fill(renderer, 0xffff0000);\n\
//!     rr_renderer_move_to(renderer, -40.00, -20.00);\n\
//!     rr_renderer_line_to(renderer, 40.00, 20.00);\n\
//!     rr_renderer_close_path(renderer);\n\
//!     rr_renderer_fill(renderer);\n");
//! ```
//!
//! Build scripts use [`CompileConfig`] instead, which reads the input file
//! (optionally gzip-compressed), reports errors to stderr, and writes the
//! listing to `OUT_DIR`.
pub mod doc;
pub mod path;

mod color;
mod compiler;
mod config;
mod diag;
mod emit;
mod error;

pub use self::{
    color::{fill_color, parse_fill, AlphaRounding},
    compiler::{Artifact, Compiler, ErrorPolicy},
    config::{read_input, CompileConfig},
    doc::{ElementFailure, PathElement},
    emit::Emitter,
    error::{CompileError, ElementError, PathError},
};
