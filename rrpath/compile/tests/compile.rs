use cgmath::Point2;
use rgb::RGBA8;
use std::{
    fs,
    io::prelude::*,
    path::{Path, PathBuf},
};

use rrpath_compile::{
    read_input, AlphaRounding, CompileConfig, ElementError, ElementFailure, ErrorPolicy,
    PathError,
};
use rrpath_io::{Cmd, CmdDecoder, Style};

fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("rrpath-{}-{}", std::process::id(), name))
}

fn pt(x: f64, y: f64) -> Point2<f64> {
    Point2::new(x, y)
}

#[test]
fn logo() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut out = Vec::new();
    let artifact = CompileConfig::new()
        .input_file(data_path("logo.svg"))
        .out_source_stream(&mut out)
        .run()
        .unwrap();

    assert_eq!(
        artifact.cmds,
        [
            Cmd::BeginPath,
            Cmd::SetFill(RGBA8::new(0xff, 0, 0, 0xff)),
            Cmd::MoveTo(pt(-40.0, -20.0)),
            Cmd::LineTo(pt(40.0, 20.0)),
            Cmd::ClosePath,
            Cmd::Fill,
        ]
    );
    assert!(artifact.skipped.is_empty());

    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "rr_renderer_begin_path(renderer);\n\
         rr_renderer_set_fill(renderer, 0xffff0000);\n\
         rr_renderer_move_to(renderer, -40.00, -20.00);\n\
         rr_renderer_line_to(renderer, 40.00, 20.00);\n\
         rr_renderer_close_path(renderer);\n\
         rr_renderer_fill(renderer);\n"
    );

    // The listing reads back as the same calls
    let decoded: Vec<Cmd> = CmdDecoder::from_str(&text)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(decoded, artifact.cmds);
}

#[test]
fn function_wrapper_and_style() {
    let _ = env_logger::builder().is_test(true).try_init();

    let style = Style {
        prefix: "ctx_".to_owned(),
        receiver: "c".to_owned(),
        precision: 1,
    };

    let mut out = Vec::new();
    CompileConfig::new()
        .input_file(data_path("logo.svg"))
        .out_source_stream(&mut out)
        .function_name("draw_logo")
        .style(style.clone())
        .run()
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "void draw_logo(struct ctx *c)\n{\n    \
         ctx_begin_path(c);\n    \
         ctx_set_fill(c, 0xffff0000);\n    \
         ctx_move_to(c, -40.0, -20.0);\n    \
         ctx_line_to(c, 40.0, 20.0);\n    \
         ctx_close_path(c);\n    \
         ctx_fill(c);\n}\n"
    );

    let decoded = CmdDecoder::with_style(&text, style)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(decoded.len(), 6);
}

#[test]
fn layers() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut out = Vec::new();
    let artifact = CompileConfig::new()
        .input_file(data_path("layers.svg"))
        .out_source_stream(&mut out)
        .run()
        .unwrap();

    // The clipping path and the transparent background are left out. `s`
    // takes both control points, so the circle's two `s` segments consume
    // six operands each.
    assert_eq!(
        artifact.cmds,
        [
            Cmd::BeginPath,
            Cmd::SetFill(RGBA8::new(0x33, 0x66, 0x99, 0x7f)),
            Cmd::MoveTo(pt(-12.0, -12.0)),
            Cmd::CubicBezierTo([pt(-9.5, -12.0), pt(-7.5, -10.0), pt(-7.5, -7.5)]),
            Cmd::CubicBezierTo([pt(-9.5, -3.0), pt(-12.0, -3.0), pt(-12.0, -9.5)]),
            Cmd::CubicBezierTo([pt(-16.5, -14.0), pt(-10.0, -14.0), pt(-7.5, -14.0)]),
            Cmd::ClosePath,
            Cmd::Fill,
            Cmd::BeginPath,
            Cmd::MoveTo(pt(0.0, 0.0)),
            Cmd::QuadBezierTo([pt(4.0, 0.0), pt(4.0, 4.0)]),
        ]
    );
}

#[test]
fn round_alpha() {
    let mut out = Vec::new();
    let artifact = CompileConfig::new()
        .input_file(data_path("layers.svg"))
        .out_source_stream(&mut out)
        .alpha_rounding(AlphaRounding::Nearest)
        .run()
        .unwrap();

    assert_eq!(
        artifact.cmds[1],
        Cmd::SetFill(RGBA8::new(0x33, 0x66, 0x99, 0x80))
    );
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("rr_renderer_set_fill(renderer, 0x80336699);\n"));
}

#[test]
fn broken_aborts() {
    let _ = env_logger::builder().is_test(true).try_init();

    let out_file = temp_path("broken.c");
    let _ = fs::remove_file(&out_file);

    let result = CompileConfig::new()
        .input_file(data_path("broken.svg"))
        .out_source_file(&out_file)
        .run();

    assert!(result.is_err());
    assert!(!out_file.exists(), "no output is written on failure");
}

#[test]
fn broken_skipped() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut out = Vec::new();
    let artifact = CompileConfig::new()
        .input_file(data_path("broken.svg"))
        .out_source_stream(&mut out)
        .error_policy(ErrorPolicy::Skip)
        .run()
        .unwrap();

    assert_eq!(artifact.skipped.len(), 2);
    assert!(matches!(
        artifact.skipped[0],
        ElementFailure {
            index: 1,
            err: ElementError::Path(PathError::UnsupportedOperator { op: 'a', index: 3, .. }),
        }
    ));
    assert_eq!(
        artifact.skipped[1],
        ElementFailure {
            index: 2,
            err: ElementError::MissingPathData,
        }
    );

    assert_eq!(
        artifact.cmds,
        [
            Cmd::BeginPath,
            Cmd::SetFill(RGBA8::new(0, 0xff, 0, 0xff)),
            Cmd::MoveTo(pt(-10.0, -10.0)),
            Cmd::LineTo(pt(10.0, -10.0)),
            Cmd::LineTo(pt(10.0, 10.0)),
            Cmd::ClosePath,
            Cmd::Fill,
            Cmd::BeginPath,
            Cmd::SetFill(RGBA8::new(0, 0, 0xff, 0xff)),
            Cmd::MoveTo(pt(-9.0, -9.0)),
            Cmd::LineTo(pt(-7.0, -7.0)),
            Cmd::Fill,
        ]
    );
}

#[test]
fn missing_view_box() {
    let mut out = Vec::new();
    let result = CompileConfig::new()
        .input_file(data_path("no_view_box.svg"))
        .out_source_stream(&mut out)
        .run();

    assert!(result.is_err());
    assert!(out.is_empty());
}

#[test]
fn missing_input() {
    let mut out = Vec::new();
    assert!(CompileConfig::new().out_source_stream(&mut out).run().is_err());

    let mut out = Vec::new();
    assert!(CompileConfig::new()
        .input_file(data_path("nonexistent.svg"))
        .out_source_stream(&mut out)
        .run()
        .is_err());
}

#[test]
fn svgz() {
    let _ = env_logger::builder().is_test(true).try_init();

    let plain = fs::read(data_path("logo.svg")).unwrap();

    let mut encoder = libflate::gzip::Encoder::new(Vec::new()).unwrap();
    encoder.write_all(&plain).unwrap();
    let compressed = encoder.finish().into_result().unwrap();

    let in_file = temp_path("logo.svgz");
    fs::write(&in_file, &compressed).unwrap();

    assert_eq!(
        read_input(&in_file).unwrap().as_bytes(),
        &plain[..],
        "read_input decompresses gzip"
    );

    let out_file = temp_path("logo.c");
    let artifact = CompileConfig::new()
        .input_file(&in_file)
        .out_source_file(&out_file)
        .run()
        .unwrap();
    assert_eq!(artifact.cmds.len(), 6);

    let text = fs::read_to_string(&out_file).unwrap();
    assert!(text.starts_with("rr_renderer_begin_path(renderer);\n"));

    let _ = fs::remove_file(&in_file);
    let _ = fs::remove_file(&out_file);
}
