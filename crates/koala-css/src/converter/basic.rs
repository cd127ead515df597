//! Base converters: each consumes exactly one value.

use super::{Conversion, ConversionResult, ValueConverter};
use crate::error::ConversionFailure;
use crate::values::{ColorValue, CssValue, LengthValue};

fn no_match(value: &CssValue) -> ConversionFailure {
    ConversionFailure::NoMatch {
        found: value.to_css(),
    }
}

/// One keyword out of a fixed set, compared ignoring ASCII case.
///
/// The result is the keyword as spelled in the set.
#[derive(Debug, Clone, Copy)]
pub struct Keyword {
    keywords: &'static [&'static str],
}

impl Keyword {
    /// A converter accepting any of `keywords`.
    #[must_use]
    pub const fn new(keywords: &'static [&'static str]) -> Self {
        Self { keywords }
    }
}

impl ValueConverter for Keyword {
    type Output = CssValue;

    fn try_convert(&self, input: &[CssValue]) -> ConversionResult<CssValue> {
        let first = input.first().ok_or(ConversionFailure::Empty)?;
        first
            .as_keyword()
            .and_then(|k| self.keywords.iter().find(|kw| kw.eq_ignore_ascii_case(k)))
            .map(|&kw| Conversion::new(CssValue::keyword(kw), 1))
            .ok_or_else(|| no_match(first))
    }
}

/// [§ 4 Representing Colors: the `<color>` type](https://www.w3.org/TR/css-color-4/#color-type)
///
/// Accepts hex colors, named colors, `currentcolor`, and `rgb()`/`rgba()`.
/// Named colors are kept as (lowercased) keywords so they serialize as
/// written; functions are resolved to a [`ColorValue`].
#[derive(Debug, Clone, Copy)]
pub struct ColorConverter;

impl ValueConverter for ColorConverter {
    type Output = CssValue;

    fn try_convert(&self, input: &[CssValue]) -> ConversionResult<CssValue> {
        let first = input.first().ok_or(ConversionFailure::Empty)?;
        let color = match first {
            CssValue::Color(c) => Some(CssValue::Color(*c)),
            CssValue::Keyword(k) if ColorValue::is_color_keyword(k) => {
                Some(CssValue::Keyword(k.to_ascii_lowercase()))
            }
            CssValue::Function { name, args }
                if name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba") =>
            {
                parse_rgb_function(args).map(CssValue::Color)
            }
            _ => None,
        };
        color
            .map(|c| Conversion::new(c, 1))
            .ok_or_else(|| no_match(first))
    }
}

/// [§ 4.1 The RGB Functions: rgb() and rgba()](https://www.w3.org/TR/css-color-4/#rgb-functions)
///
/// Accepts both the comma-separated legacy syntax and the modern
/// `rgb(r g b / a)` syntax. Channels are numbers (0-255) or percentages.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_rgb_function(args: &[CssValue]) -> Option<ColorValue> {
    let channels: Vec<&CssValue> = args
        .iter()
        .filter(|v| !matches!(v, CssValue::Delim('/')))
        .collect();
    if channels.len() != 3 && channels.len() != 4 {
        return None;
    }

    let channel = |v: &CssValue| match v {
        CssValue::Number(n) => Some(n.clamp(0.0, 255.0).round() as u8),
        CssValue::Percentage(p) => Some((p.clamp(0.0, 100.0) * 2.55).round() as u8),
        _ => None,
    };
    // "alpha-value: <number> | <percentage>", with numbers in [0, 1]
    let alpha = |v: &CssValue| match v {
        CssValue::Number(n) => Some((n.clamp(0.0, 1.0) * 255.0).round() as u8),
        CssValue::Percentage(p) => Some((p.clamp(0.0, 100.0) * 2.55).round() as u8),
        _ => None,
    };

    Some(ColorValue {
        r: channel(channels[0])?,
        g: channel(channels[1])?,
        b: channel(channels[2])?,
        a: match channels.get(3) {
            Some(a) => alpha(a)?,
            None => 255,
        },
    })
}

/// [§ 6 Distance Units: the `<length>` type](https://www.w3.org/TR/css-values-4/#lengths)
///
/// Accepts dimensions with a known unit and unitless zero, optionally
/// percentages, optionally rejecting negative values.
#[derive(Debug, Clone, Copy)]
pub struct LengthConverter {
    non_negative: bool,
    percentages: bool,
}

impl LengthConverter {
    /// Any `<length>`.
    pub const ANY: Self = Self {
        non_negative: false,
        percentages: false,
    };

    /// `<length [0,∞]>`
    pub const NON_NEGATIVE: Self = Self {
        non_negative: true,
        percentages: false,
    };

    /// Also accept `<percentage>` (`<length-percentage>`).
    #[must_use]
    pub const fn with_percentages(self) -> Self {
        Self {
            percentages: true,
            ..self
        }
    }
}

impl ValueConverter for LengthConverter {
    type Output = CssValue;

    fn try_convert(&self, input: &[CssValue]) -> ConversionResult<CssValue> {
        let first = input.first().ok_or(ConversionFailure::Empty)?;
        let length = match first {
            CssValue::Length(l) => Some(*l),
            CssValue::Dimension { value, unit } => LengthValue::from_unit(*value, unit),
            // "for zero lengths the unit identifier is optional"
            CssValue::Number(n) if *n == 0.0 => Some(LengthValue::Px(0.0)),
            CssValue::Percentage(p) if self.percentages => Some(LengthValue::Percent(*p)),
            _ => None,
        };
        length
            .filter(|l| !(self.non_negative && l.is_negative()))
            .map(|l| Conversion::new(CssValue::Length(l), 1))
            .ok_or_else(|| no_match(first))
    }
}
