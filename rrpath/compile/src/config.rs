use codemap_diagnostic::Level;
use rrpath_io::{CmdEncoder, Style};
use std::{
    env,
    fs::{self, File},
    io::{self, prelude::*, BufWriter},
    path::{Path, PathBuf},
};

use crate::{
    color::AlphaRounding,
    compiler::{Artifact, Compiler, ErrorPolicy},
    diag::Diag,
    doc::{Document, ElementFailure},
    error::CompileError,
};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Compiles an SVG file into a C source listing. Intended to be used from
/// build scripts and by `rrpathc`.
///
/// ```no_run
/// rrpath_compile::CompileConfig::new()
///     .input_file("assets/logo.svg")
///     .function_name("rr_logo_draw")
///     .run_and_exit_on_error();
/// ```
#[derive(Default)]
pub struct CompileConfig<'a> {
    in_file: Option<PathBuf>,
    out_source_file: Option<PathBuf>,
    out_source_stream: Option<&'a mut dyn Write>,
    function_name: Option<String>,
    style: Style,
    alpha_rounding: AlphaRounding,
    error_policy: ErrorPolicy,
}

impl<'a> CompileConfig<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input file. A gzip-compressed file (`.svgz`) is decompressed
    /// automatically.
    pub fn input_file(self, path: impl AsRef<Path>) -> Self {
        Self {
            in_file: Some(path.as_ref().to_path_buf()),
            ..self
        }
    }

    /// Set the output file. Defaults to `$OUT_DIR/<input file stem>.c`.
    pub fn out_source_file(self, path: impl AsRef<Path>) -> Self {
        Self {
            out_source_file: Some(path.as_ref().to_path_buf()),
            ..self
        }
    }

    /// Write the output to a stream instead of a file.
    pub fn out_source_stream(self, stream: &'a mut dyn Write) -> Self {
        Self {
            out_source_stream: Some(stream),
            ..self
        }
    }

    /// Wrap the listing in a C function named `name`.
    pub fn function_name(self, name: impl Into<String>) -> Self {
        Self {
            function_name: Some(name.into()),
            ..self
        }
    }

    pub fn style(self, style: Style) -> Self {
        Self { style, ..self }
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

    pub fn run_and_exit_on_error(self) {
        if self.run().is_err() {
            std::process::exit(1);
        }
    }

    /// Compile the input file and write the output. Errors are reported to
    /// stderr.
    pub fn run(self) -> Result<Artifact, ()> {
        let mut diag = Diag::new();
        match self.run_inner(&mut diag) {
            Ok(artifact) => Ok(artifact),
            Err(Some(e)) => {
                diag.emit_compile_error(&e);
                Err(())
            }
            Err(None) => {
                // Already reported
                Err(())
            }
        }
    }

    fn run_inner(self, diag: &mut Diag) -> Result<Artifact, Option<CompileError>> {
        let in_file = self.in_file.ok_or(CompileError::NoInput)?;

        let out_source_file = if self.out_source_stream.is_some() {
            None
        } else if let Some(x) = self.out_source_file {
            Some(x)
        } else {
            let out_dir = env::var_os("OUT_DIR").ok_or(CompileError::NoOutDir)?;
            let stem = in_file
                .file_stem()
                .map(|s| s.to_os_string())
                .unwrap_or_else(|| "out".into());
            Some(Path::new(&out_dir).join(stem).with_extension("c"))
        };

        let text = read_input(&in_file)?;
        let doc = roxmltree::Document::parse(&text).map_err(CompileError::from)?;

        let compiler = Compiler::new()
            .alpha_rounding(self.alpha_rounding)
            .error_policy(self.error_policy);

        let file_name = in_file.display().to_string();
        let path_data = |index: usize| {
            (&doc)
                .elements_by_tag("path")
                .get(index)
                .and_then(|e| e.attribute("d").map(str::to_owned))
        };

        let artifact = match compiler.compile_document(&&doc) {
            Ok(artifact) => artifact,
            Err(CompileError::Element { index, err }) => {
                let failure = ElementFailure { index, err };
                let data = path_data(index);
                diag.emit_element_failure(Level::Error, &file_name, data.as_deref(), &failure);
                return Err(None);
            }
            Err(e) => return Err(Some(e)),
        };

        for failure in artifact.skipped.iter() {
            let data = path_data(failure.index);
            diag.emit_element_failure(Level::Warning, &file_name, data.as_deref(), failure);
        }

        let mut encoder = CmdEncoder::with_style(self.style);
        if let Some(name) = self.function_name {
            encoder = encoder.with_function(name);
        }
        encoder.extend(artifact.cmds.iter().copied());
        let out_text = encoder.take_text();

        log::debug!(
            "'{}': {} call(s), {} byte(s) of output",
            file_name,
            artifact.cmds.len(),
            out_text.len()
        );

        if let Some(stream) = self.out_source_stream {
            stream
                .write_all(out_text.as_bytes())
                .and_then(|()| stream.flush())
                .map_err(|e| CompileError::Io("<output stream>".into(), e))?;
        } else if let Some(out_source_file) = out_source_file {
            write_output(&out_source_file, &out_text)
                .map_err(|e| CompileError::Io(out_source_file.clone(), e))?;
        }

        Ok(artifact)
    }
}

/// Read an input file, decompressing it if it's gzip-compressed.
pub fn read_input(path: &Path) -> Result<String, CompileError> {
    let map_err = |e: io::Error| CompileError::Io(path.to_path_buf(), e);

    let bytes = fs::read(path).map_err(map_err)?;

    let bytes = if bytes.starts_with(&GZIP_MAGIC) {
        log::debug!("'{}' is gzip-compressed", path.display());
        let mut decoder = libflate::gzip::Decoder::new(&bytes[..]).map_err(map_err)?;
        let mut out = Vec::new();
        decoder.read_to_end(&mut out).map_err(map_err)?;
        out
    } else {
        bytes
    };

    String::from_utf8(bytes).map_err(|e| map_err(io::Error::new(io::ErrorKind::InvalidData, e)))
}

fn write_output(path: &Path, text: &str) -> io::Result<()> {
    let mut out_f = BufWriter::new(File::create(path)?);
    out_f.write_all(text.as_bytes())?;
    out_f.flush()
}
