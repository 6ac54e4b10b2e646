use std::sync::OnceLock;

use regex_lite::Regex;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}
impl Color {
    pub const BLACK: Color = Color::new(0., 0., 0., 1.);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha_scaled(self, factor: f64) -> Self {
        Self {
            a: self.a * factor.clamp(0., 1.),
            ..self
        }
    }

    pub fn set_source(&self, ctx: &cairo::Context) {
        ctx.set_source_rgba(self.r, self.g, self.b, self.a);
    }
}
impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

fn hex_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap())
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
pub fn parse_color(s: &str) -> Result<Color, String> {
    let s = s.trim();
    let Some(caps) = hex_regex().captures(s) else {
        log::debug!("rejecting color {s:?}: not a hex color");
        return Err(format!("invalid color: {s}"));
    };
    let hex = &caps[1];

    let channel = |range: std::ops::Range<usize>| -> Result<f64, String> {
        u8::from_str_radix(&hex[range], 16)
            .map(|v| v as f64 / 255.)
            .map_err(|e| format!("invalid color {s}: {e}"))
    };

    match hex.len() {
        3 => {
            let short = |i: usize| -> Result<f64, String> {
                let c = &hex[i..i + 1];
                u8::from_str_radix(&format!("{c}{c}"), 16)
                    .map(|v| v as f64 / 255.)
                    .map_err(|e| format!("invalid color {s}: {e}"))
            };
            Ok(Color::new(short(0)?, short(1)?, short(2)?, 1.))
        }
        6 => Ok(Color::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 1.)),
        _ => Ok(Color::new(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        )),
    }
}
