//! Encoder
use cgmath::Point2;
use rgb::RGBA8;

use crate::{argb_from_rgba8, Cmd, Style};

/// Renders drawing calls as a listing of C statements.
///
/// This type exposes methods mirroring the renderer's immediate-mode API.
/// Each call becomes one line, e.g.,
/// `rr_renderer_move_to(renderer, -40.00, -20.00);`. When a function name is
/// given, the listing is wrapped in a function definition taking the receiver
/// as its only parameter.
#[derive(Debug, Clone)]
pub struct CmdEncoder {
    text: String,
    style: Style,

    function: Option<String>,
    /// `true` if the function header was written but not the closing brace.
    function_open: bool,
}

impl Default for CmdEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CmdEncoder {
    /// Construct a `CmdEncoder` using the default [`Style`].
    pub fn new() -> Self {
        Self::with_style(Style::default())
    }

    pub fn with_style(style: Style) -> Self {
        Self {
            text: String::new(),
            style,
            function: None,
            function_open: false,
        }
    }

    /// Wrap the subsequent output in `void name(struct rr_renderer *renderer)`
    /// (spelled according to the style).
    pub fn with_function(self, name: impl Into<String>) -> Self {
        Self {
            function: Some(name.into()),
            ..self
        }
    }

    /// Take the rendered text, resetting `self`.
    pub fn take_text(&mut self) -> String {
        if self.function.is_some() {
            self.open_function();
            self.text.push_str("}\n");
            self.function_open = false;
        }
        std::mem::replace(&mut self.text, String::new())
    }

    fn open_function(&mut self) {
        if self.function_open {
            return;
        }
        if let Some(name) = &self.function {
            // The receiver's type is named after the prefix minus its
            // trailing separator (`rr_renderer_` → `rr_renderer`)
            let ty = self.style.prefix.trim_end_matches('_');
            self.text.push_str(&format!(
                "void {}(struct {} *{})\n{{\n",
                name, ty, self.style.receiver
            ));
            self.function_open = true;
        }
    }

    fn call(&mut self, name: &str, args: &str) {
        self.open_function();
        if self.function_open {
            self.text.push_str("    ");
        }
        self.text.push_str(&format!(
            "{}{}({}{});\n",
            self.style.prefix, name, self.style.receiver, args
        ));
    }

    fn points_args(&self, points: &[Point2<f64>]) -> String {
        let mut args = String::new();
        for p in points {
            for &v in &[p.x, p.y] {
                args.push_str(", ");
                args.push_str(&format_fixed(v, self.style.precision));
            }
        }
        args
    }

    pub fn begin_path(&mut self) {
        self.call("begin_path", "");
    }

    pub fn move_to(&mut self, point: Point2<f64>) {
        let args = self.points_args(&[point]);
        self.call("move_to", &args);
    }

    pub fn line_to(&mut self, point: Point2<f64>) {
        let args = self.points_args(&[point]);
        self.call("line_to", &args);
    }

    pub fn quad_bezier_to(&mut self, cps: [Point2<f64>; 2]) {
        let args = self.points_args(&cps);
        self.call("quadratic_curve_to", &args);
    }

    pub fn cubic_bezier_to(&mut self, cps: [Point2<f64>; 3]) {
        let args = self.points_args(&cps);
        self.call("bezier_curve_to", &args);
    }

    pub fn close_path(&mut self) {
        self.call("close_path", "");
    }

    pub fn set_fill(&mut self, color: RGBA8) {
        self.call("set_fill", &format!(", 0x{:08x}", argb_from_rgba8(color)));
    }

    pub fn fill(&mut self) {
        self.call("fill", "");
    }

    pub fn cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::SetFill(color) => self.set_fill(color),
            _ => {
                let args = self.points_args(cmd.points());
                self.call(cmd.name(), &args);
            }
        }
    }
}

impl Extend<Cmd> for CmdEncoder {
    fn extend<T: IntoIterator<Item = Cmd>>(&mut self, iter: T) {
        for cmd in iter {
            self.cmd(cmd);
        }
    }
}

impl std::iter::FromIterator<Cmd> for CmdEncoder {
    fn from_iter<T: IntoIterator<Item = Cmd>>(iter: T) -> Self {
        let mut this = Self::new();
        this.extend(iter);
        this
    }
}

/// Format `x` with `precision` fractional digits. Unlike `{:.*}`, which
/// rounds ties to even, a value exactly halfway between two outputs is
/// rounded away from zero (`0.125` → `0.13`), matching the existing assets.
fn format_fixed(x: f64, precision: usize) -> String {
    let x = normalize_zero(x);
    tie_away_from_zero(x, precision).unwrap_or_else(|| format!("{:.*}", precision, x))
}

/// Returns `Some(_)` only if `x` is exactly a tie at `precision`.
fn tie_away_from_zero(x: f64, precision: usize) -> Option<String> {
    // Powers of ten above 10^22 are not exact
    if precision > 22 {
        return None;
    }
    let scale = (0..precision).fold(1.0f64, |s, _| s * 10.0);

    let y = x * scale;
    // The product must be exact, or `y` could be a tie that `x` is not
    if x.mul_add(scale, -y) != 0.0 || y.abs().fract() != 0.5 || y.abs() >= (1u64 << 52) as f64 {
        return None;
    }

    let n = (y.abs() + 0.5) as u64;
    let digits = format!("{:0width$}", n, width = precision + 1);
    let (int, frac) = digits.split_at(digits.len() - precision);
    let sign = if x < 0.0 { "-" } else { "" };

    Some(if precision == 0 {
        format!("{}{}", sign, int)
    } else {
        format!("{}{}.{}", sign, int, frac)
    })
}

/// `-0.0` would otherwise be printed as `-0.00`.
fn normalize_zero(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x
    }
}
