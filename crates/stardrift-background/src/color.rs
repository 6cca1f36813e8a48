//! Color utility functions for background animations.

use ratatui::style::Color;
use tracing::warn;

/// Trail color used when no accent is configured or it fails to parse.
pub const TRAIL_FALLBACK: Rgba = Rgba::rgb8(255, 182, 193);

/// Straight-alpha color with channels in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Color from hue in degrees, saturation and lightness in 0.0..=1.0.
    pub fn hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        let (r, g, b) = hsl_to_rgb(h, s, l);
        Self::new(r, g, b, a.clamp(0.0, 1.0))
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Linear interpolation between two colors, `t` clamped to 0.0..=1.0.
    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// Convert to a terminal color, dropping alpha.
    pub fn to_color(self) -> Color {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::Rgb(channel(self.r), channel(self.g), channel(self.b))
    }
}

/// Convert HSL to RGB channels in 0.0..=1.0.
///
/// Hue is in degrees and wraps; saturation and lightness are fractions.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
        return (l, l, l);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h.rem_euclid(360.0) / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    (r, g, b)
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Parse an accent color written as a CSS custom property value.
///
/// The first three runs of digits are read as hue (degrees), saturation and
/// lightness (percent), so `"350 100% 88%"` and `"hsl(350, 100%, 88%)"` both
/// work. Returns `None` if fewer than three numbers are present or the
/// percentages are above 100.
pub fn parse_accent(value: &str) -> Option<Rgba> {
    let mut numbers = value
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(|run| run.parse::<u32>().ok());

    let h = numbers.next()??;
    let s = numbers.next()??;
    let l = numbers.next()??;
    if s > 100 || l > 100 {
        return None;
    }

    Some(Rgba::hsla(h as f32, s as f32 / 100.0, l as f32 / 100.0, 1.0))
}

/// Resolve the shooting star trail color from an optional accent.
pub fn resolve_trail_color(accent: Option<&str>) -> Rgba {
    match accent {
        None => TRAIL_FALLBACK,
        Some(value) => parse_accent(value).unwrap_or_else(|| {
            warn!(accent = value, "unparsable accent color, using fallback trail color");
            TRAIL_FALLBACK
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: (f32, f32, f32), expected: (f32, f32, f32)) {
        let eps = 1e-4;
        assert!(
            (actual.0 - expected.0).abs() < eps
                && (actual.1 - expected.1).abs() < eps
                && (actual.2 - expected.2).abs() < eps,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn test_hsl_primaries() {
        assert_close(hsl_to_rgb(0.0, 1.0, 0.5), (1.0, 0.0, 0.0));
        assert_close(hsl_to_rgb(120.0, 1.0, 0.5), (0.0, 1.0, 0.0));
        assert_close(hsl_to_rgb(240.0, 1.0, 0.5), (0.0, 0.0, 1.0));
        assert_close(hsl_to_rgb(360.0, 1.0, 0.5), (1.0, 0.0, 0.0));
    }

    #[test]
    fn test_hsl_grayscale() {
        assert_close(hsl_to_rgb(200.0, 0.0, 0.25), (0.25, 0.25, 0.25));
    }

    #[test]
    fn test_parse_accent_css_variable() {
        let color = parse_accent("0 100% 50%").expect("valid accent");
        assert_eq!(color.to_color(), Color::Rgb(255, 0, 0));

        let color = parse_accent("hsl(240, 100%, 50%)").expect("valid accent");
        assert_eq!(color.to_color(), Color::Rgb(0, 0, 255));
    }

    #[test]
    fn test_parse_accent_rejects_garbage() {
        assert_eq!(parse_accent(""), None);
        assert_eq!(parse_accent("pink"), None);
        assert_eq!(parse_accent("350 100%"), None);
        assert_eq!(parse_accent("350 140% 50%"), None);
    }

    #[test]
    fn test_resolve_trail_color_falls_back() {
        assert_eq!(resolve_trail_color(None), TRAIL_FALLBACK);
        assert_eq!(resolve_trail_color(Some("not a color")), TRAIL_FALLBACK);
        assert_eq!(TRAIL_FALLBACK.to_color(), Color::Rgb(255, 182, 193));
    }

    #[test]
    fn test_lerp_clamps() {
        let a = Rgba::new(0.0, 0.0, 0.0, 1.0);
        let b = Rgba::new(1.0, 1.0, 1.0, 0.0);
        assert_eq!(a.lerp(b, 0.5), Rgba::new(0.5, 0.5, 0.5, 0.5));
        assert_eq!(a.lerp(b, 2.0), b);
    }
}
