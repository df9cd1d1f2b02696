use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Pixels per rem. Every length leaving the extractor is expressed relative to this.
pub const BASE_FONT_PX: f64 = 16.0;

/// Two extracted values closer than this are the same value.
pub const NUMERIC_TOLERANCE: f64 = 0.0001;

const FIXED_DIGITS: usize = 3;

/// A number kept as the three-decimal text it was extracted with (`"0.250"`).
///
/// The text form is what lands in the JSON snapshot; CSS output goes through
/// [`format_number`], which only changes the textual form, never the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixedPoint(String);

impl FixedPoint {
    pub fn zero() -> Self {
        Self("0".to_owned())
    }

    pub fn new(value: f64) -> Self {
        Self(to_fixed(value, FIXED_DIGITS))
    }

    /// Converts a pixel quantity to rem.
    pub fn from_px(px: f64) -> Self {
        Self::new(px / BASE_FONT_PX)
    }

    pub fn value(&self) -> f64 {
        parse_leading_number(&self.0).unwrap_or(0.0)
    }

    pub fn is_zero(&self) -> bool {
        self.value() == 0.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortest decimal text with a `rem` suffix: `1.000` -> `1rem`.
    pub fn to_rem(&self) -> String {
        format_rem(self.value())
    }

    pub fn to_plain(&self) -> String {
        format_number(self.value())
    }

    pub fn approx_eq(&self, other: &Self) -> bool {
        (self.value() - other.value()).abs() <= NUMERIC_TOLERANCE
    }

    fn from_number(value: f64) -> Self {
        if value == 0.0 {
            Self::zero()
        } else {
            Self(format_number(value))
        }
    }
}

impl Default for FixedPoint {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for FixedPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

// Snapshots written by older tooling carry bare numbers (`0`) and `rem`-suffixed
// strings (`"0.875rem"`) next to plain fixed strings; all three are accepted.
impl<'de> Deserialize<'de> for FixedPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FixedPointVisitor;

        impl Visitor<'_> for FixedPointVisitor {
            type Value = FixedPoint;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number or a numeric string")
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<FixedPoint, E> {
                Ok(FixedPoint::from_number(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<FixedPoint, E> {
                Ok(FixedPoint::from_number(value as f64))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<FixedPoint, E> {
                Ok(FixedPoint::from_number(value as f64))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<FixedPoint, E> {
                let trimmed = value.trim();
                let numeric = trimmed.strip_suffix("rem").unwrap_or(trimmed).trim();
                if parse_leading_number(numeric).is_none() {
                    return Err(E::invalid_value(de::Unexpected::Str(value), &self));
                }
                Ok(FixedPoint(numeric.to_owned()))
            }
        }

        deserializer.deserialize_any(FixedPointVisitor)
    }
}

/// Per-side padding in rem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaddingBox {
    pub top: FixedPoint,
    pub right: FixedPoint,
    pub bottom: FixedPoint,
    pub left: FixedPoint,
}

impl PaddingBox {
    pub fn from_px(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top: FixedPoint::from_px(top),
            right: FixedPoint::from_px(right),
            bottom: FixedPoint::from_px(bottom),
            left: FixedPoint::from_px(left),
        }
    }

    /// Shortest `padding` shorthand that reproduces all four sides.
    pub fn to_shorthand(&self) -> String {
        let top = self.top.to_rem();
        let right = self.right.to_rem();
        let bottom = self.bottom.to_rem();
        let left = self.left.to_rem();

        if top == right && right == bottom && bottom == left {
            top
        } else if top == bottom && right == left {
            format!("{top} {right}")
        } else if right == left {
            format!("{top} {right} {bottom}")
        } else {
            format!("{top} {right} {bottom} {left}")
        }
    }

    pub fn approx_eq(&self, other: &Self) -> bool {
        self.top.approx_eq(&other.top)
            && self.right.approx_eq(&other.right)
            && self.bottom.approx_eq(&other.bottom)
            && self.left.approx_eq(&other.left)
    }
}

/// Shortest decimal text for `value`: integral values lose the decimal point,
/// fractional values lose trailing zeros.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_owned();
    }
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    // `Display` for f64 is already the shortest round-tripping form.
    let text = value.to_string();
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        text
    }
}

pub fn format_rem(value: f64) -> String {
    format!("{}rem", format_number(value))
}

pub fn px_to_rem(px: f64) -> String {
    format_rem(px / BASE_FONT_PX)
}

/// Fixed-point text with ties rounded away from zero.
fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return format!("{:.*}", digits, 0.0);
    }
    let scale = 10_f64.powi(digits as i32);
    let rounded = (value * scale).round() / scale;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.*}", digits, rounded)
}

fn parse_leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let end = trimmed
        .char_indices()
        .find(|(index, ch)| {
            !(ch.is_ascii_digit() || *ch == '.' || (*index == 0 && matches!(ch, '-' | '+')))
        })
        .map(|(index, _)| index)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse::<f64>().ok()
}
