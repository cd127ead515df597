//! CSS Length values
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)

use core::fmt;

use serde::Serialize;

/// [§ 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths)
/// "Lengths refer to distance measurements and are denoted by `<length>` in the
/// property definitions."
///
/// Relative units are kept unresolved; this crate never lays anything out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LengthValue {
    /// [§ 6.1 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
    /// "1px = 1/96th of 1in"
    Px(f64),
    /// [§ 6.1 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
    /// "1pt = 1/72nd of 1in"
    Pt(f64),
    /// [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
    /// "Equal to the computed value of the font-size property of the element"
    Em(f64),
    /// [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
    /// "Equal to the computed value of the font-size property of the root element."
    Rem(f64),
    /// [§ 5.1.2 Viewport-percentage lengths](https://www.w3.org/TR/css-values-4/#viewport-relative-lengths)
    /// "1vw = 1% of viewport width"
    Vw(f64),
    /// [§ 5.1.2 Viewport-percentage lengths](https://www.w3.org/TR/css-values-4/#viewport-relative-lengths)
    /// "1vh = 1% of viewport height"
    Vh(f64),
    /// [§ 4.3 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
    Percent(f64),
}

impl LengthValue {
    /// Build a length from a number and a unit, ignoring ASCII case in the unit.
    #[must_use]
    pub fn from_unit(value: f64, unit: &str) -> Option<Self> {
        let unit = unit.to_ascii_lowercase();
        let length = match unit.as_str() {
            "px" => Self::Px(value),
            "pt" => Self::Pt(value),
            "em" => Self::Em(value),
            "rem" => Self::Rem(value),
            "vw" => Self::Vw(value),
            "vh" => Self::Vh(value),
            _ => return None,
        };
        Some(length)
    }

    /// The numeric part of the length.
    #[must_use]
    pub const fn number(&self) -> f64 {
        match *self {
            Self::Px(v)
            | Self::Pt(v)
            | Self::Em(v)
            | Self::Rem(v)
            | Self::Vw(v)
            | Self::Vh(v)
            | Self::Percent(v) => v,
        }
    }

    /// The unit suffix used when serializing.
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Px(_) => "px",
            Self::Pt(_) => "pt",
            Self::Em(_) => "em",
            Self::Rem(_) => "rem",
            Self::Vw(_) => "vw",
            Self::Vh(_) => "vh",
            Self::Percent(_) => "%",
        }
    }

    /// True for lengths below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.number() < 0.0
    }
}

impl fmt::Display for LengthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // [§ 4.1](https://www.w3.org/TR/css-values-4/#lengths)
        // "for zero lengths the unit identifier is optional"
        if self.number() == 0.0 && !matches!(self, Self::Percent(_)) {
            return f.write_str("0");
        }
        write!(f, "{}{}", self.number(), self.unit())
    }
}
