use rrpath_compile::{AlphaRounding, CompileConfig, ErrorPolicy};
use rrpath_io::Style;
use std::path::PathBuf;
use structopt::StructOpt;

/// Compiles the paths of an SVG file into `rr_renderer` calls.
#[derive(Debug, StructOpt)]
struct Opt {
    /// The input file (`.svg` or gzip-compressed `.svgz`).
    input: PathBuf,

    /// The output file. Defaults to the standard output.
    #[structopt(short = "o")]
    output: Option<PathBuf>,

    /// Wrap the calls in a C function with this name.
    #[structopt(long = "function")]
    function: Option<String>,

    /// The prefix of the called functions.
    #[structopt(long = "prefix", default_value = "rr_renderer_")]
    prefix: String,

    /// The name of the renderer variable passed to every call.
    #[structopt(long = "receiver", default_value = "renderer")]
    receiver: String,

    /// The number of decimal places of coordinates.
    #[structopt(long = "precision", default_value = "2")]
    precision: usize,

    /// Round alpha values to the nearest integer instead of truncating them.
    #[structopt(long = "round-alpha")]
    round_alpha: bool,

    /// Leave out paths that fail to compile instead of failing.
    #[structopt(long = "skip-bad-paths")]
    skip_bad_paths: bool,
}

fn main() {
    env_logger::init();

    let opt = Opt::from_args();

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();

    let mut config = CompileConfig::new()
        .input_file(&opt.input)
        .style(Style {
            prefix: opt.prefix,
            receiver: opt.receiver,
            precision: opt.precision,
        })
        .alpha_rounding(if opt.round_alpha {
            AlphaRounding::Nearest
        } else {
            AlphaRounding::Truncate
        })
        .error_policy(if opt.skip_bad_paths {
            ErrorPolicy::Skip
        } else {
            ErrorPolicy::Abort
        });

    if let Some(name) = opt.function {
        config = config.function_name(name);
    }

    config = match &opt.output {
        Some(path) => config.out_source_file(path),
        None => config.out_source_stream(&mut stdout),
    };

    config.run_and_exit_on_error();
}
