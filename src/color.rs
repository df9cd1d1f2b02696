use std::fmt;
use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::units::format_number;

/// An sRGB color with 8-bit channels and a two-decimal alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl RgbaColor {
    /// Builds a color from Figma's 0..1 float channels.
    pub fn from_unit(r: f64, g: f64, b: f64, alpha: f64) -> Self {
        Self {
            r: channel_to_u8(r),
            g: channel_to_u8(g),
            b: channel_to_u8(b),
            a: round_alpha(alpha),
        }
    }

    /// Canonical `rgba(r, g, b, a)` text. Identical inputs always give identical bytes.
    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RgbaColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            format_number(self.a)
        )
    }
}

fn channel_to_u8(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn round_alpha(alpha: f64) -> f64 {
    if !alpha.is_finite() {
        return 1.0;
    }
    (alpha.clamp(0.0, 1.0) * 100.0).round() / 100.0
}

/// Lower-cases a design name and collapses whitespace runs into `-`.
pub fn slugify(name: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static regex"));
    whitespace.replace_all(&name.to_lowercase(), "-").into_owned()
}

pub fn css_variable_name(group: &str, color: &str) -> String {
    format!("--theme-{}-{}", slugify(group), slugify(color))
}

/// Canonical color text -> custom property name, built from the palette artifact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorVariableMap {
    entries: IndexMap<String, String>,
}

impl ColorVariableMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later registrations of the same color replace earlier ones.
    pub fn insert(&mut self, rgba: impl Into<String>, variable: impl Into<String>) {
        self.entries.insert(rgba.into(), variable.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn variable_for(&self, rgba: &str) -> Option<&str> {
        self.entries.get(rgba).map(String::as_str)
    }

    /// `var(--name)` when the color is known, the literal otherwise.
    pub fn resolve(&self, rgba: &str) -> String {
        match self.variable_for(rgba) {
            Some(variable) => format!("var({variable})"),
            None => rgba.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{css_variable_name, slugify, ColorVariableMap, RgbaColor};

    #[test]
    fn canonical_form_rounds_channels_and_alpha() {
        let color = RgbaColor::from_unit(1.0, 0.0, 0.5, 0.456);
        assert_eq!(color.css(), "rgba(255, 0, 128, 0.46)");
    }

    #[test]
    fn opaque_alpha_renders_as_integer() {
        let color = RgbaColor::from_unit(0.2, 0.4, 0.6, 1.0);
        assert_eq!(color.css(), "rgba(51, 102, 153, 1)");
    }

    #[test]
    fn channels_are_clamped() {
        let color = RgbaColor::from_unit(-0.2, 1.4, 0.0, 2.0);
        assert_eq!(color.css(), "rgba(0, 255, 0, 1)");
    }

    #[test]
    fn canonical_text_matches_rgba_shape_across_range() {
        for step in 0..=20 {
            let unit = step as f64 / 20.0;
            let text = RgbaColor::from_unit(unit, 1.0 - unit, unit / 2.0, unit).css();
            let inner = text
                .strip_prefix("rgba(")
                .and_then(|rest| rest.strip_suffix(')'))
                .expect("rgba wrapper");
            let parts = inner.split(", ").collect::<Vec<_>>();
            assert_eq!(parts.len(), 4, "{text}");
            for channel in &parts[..3] {
                let value = channel.parse::<u16>().expect("integer channel");
                assert!(value <= 255);
            }
            let alpha = parts[3].parse::<f64>().expect("alpha");
            assert!((0.0..=1.0).contains(&alpha));
            let decimals = parts[3].split('.').nth(1).map_or(0, str::len);
            assert!(decimals <= 2, "{text}");
        }
    }

    #[test]
    fn slugs_collapse_whitespace() {
        assert_eq!(slugify("Ash  Gray"), "ash-gray");
        assert_eq!(css_variable_name("Brand Colors", "Deep Blue 500"), "--theme-brand-colors-deep-blue-500");
    }

    #[test]
    fn resolve_falls_back_to_literal() {
        let mut map = ColorVariableMap::new();
        map.insert("rgba(0, 0, 0, 1)", "--theme-base-black");
        assert_eq!(map.resolve("rgba(0, 0, 0, 1)"), "var(--theme-base-black)");
        assert_eq!(map.resolve("rgba(1, 1, 1, 1)"), "rgba(1, 1, 1, 1)");
    }

    #[test]
    fn later_registration_wins() {
        let mut map = ColorVariableMap::new();
        map.insert("rgba(0, 0, 0, 1)", "--theme-a-black");
        map.insert("rgba(0, 0, 0, 1)", "--theme-b-black");
        assert_eq!(map.len(), 1);
        assert_eq!(map.variable_for("rgba(0, 0, 0, 1)"), Some("--theme-b-black"));
    }
}
