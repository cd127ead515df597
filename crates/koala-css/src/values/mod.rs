//! CSS value types
//!
//! - [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//! - [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//!
//! A [`CssValue`] is one self-contained value occurrence inside a declaration.
//! The lexer in [`parse`] produces raw occurrences (keywords, numbers,
//! dimensions, hashes resolved to colors, functions); converters in
//! [`crate::converter`] validate them against a property grammar and
//! normalize them (a dimension becomes a [`LengthValue`], a keyword is
//! lowercased, several keywords become one [`CssValue::List`]).

mod color;
mod length;
pub mod parse;

use core::fmt;

use serde::Serialize;

pub use color::ColorValue;
pub use length::LengthValue;
pub use parse::parse_value_list;

/// [§ 2 Value Definition Syntax](https://www.w3.org/TR/css-values-4/#value-defs)
///
/// One parsed value occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CssValue {
    /// [§ 3.1 Pre-defined Keywords](https://www.w3.org/TR/css-values-4/#keywords)
    /// An identifier such as `underline` or `red`.
    Keyword(String),

    /// [§ 5.3 Real Numbers](https://www.w3.org/TR/css-values-4/#numbers)
    Number(f64),

    /// [§ 5.5 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
    Percentage(f64),

    /// [§ 6 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)
    /// A number followed by a unit, as written.
    Dimension {
        /// The numeric part.
        value: f64,
        /// The unit identifier, e.g. `px`.
        unit: String,
    },

    /// A validated length (a [`CssValue::Dimension`] after conversion).
    Length(LengthValue),

    /// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
    Color(ColorValue),

    /// [§ 4.3 Quoted Strings](https://www.w3.org/TR/css-values-4/#strings)
    String(String),

    /// [§ 2.6 Functional Notations](https://www.w3.org/TR/css-values-4/#functional-notations)
    Function {
        /// The function name, as written.
        name: String,
        /// The arguments, with separating commas removed.
        args: Vec<CssValue>,
    },

    /// A delimiter that carries meaning at the top level, such as `,` or `/`.
    Delim(char),

    /// Several values that together form one component, e.g.
    /// `underline overline` for `text-decoration-line`.
    List(Vec<CssValue>),
}

impl CssValue {
    /// Shorthand for a keyword value.
    #[must_use]
    pub fn keyword(name: impl Into<String>) -> Self {
        Self::Keyword(name.into())
    }

    /// The keyword text, if this is a keyword.
    #[must_use]
    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(k) => Some(k),
            _ => None,
        }
    }

    /// True if this is the keyword `name`, ignoring ASCII case.
    #[must_use]
    pub fn is_keyword(&self, name: &str) -> bool {
        self.as_keyword().is_some_and(|k| k.eq_ignore_ascii_case(name))
    }

    /// Resolve this value to an sRGB color, if it denotes one.
    ///
    /// `currentcolor` is context dependent and resolves to `None`.
    #[must_use]
    pub fn to_color(&self) -> Option<ColorValue> {
        match self {
            Self::Color(c) => Some(*c),
            Self::Keyword(k) => ColorValue::from_named(k),
            _ => None,
        }
    }

    /// Serialize back to CSS text.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl From<Vec<CssValue>> for CssValue {
    /// A single value stays itself; several become a [`CssValue::List`].
    fn from(mut values: Vec<CssValue>) -> Self {
        if values.len() == 1 {
            values.remove(0)
        } else {
            Self::List(values)
        }
    }
}

impl From<LengthValue> for CssValue {
    fn from(length: LengthValue) -> Self {
        Self::Length(length)
    }
}

impl From<ColorValue> for CssValue {
    fn from(color: ColorValue) -> Self {
        Self::Color(color)
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, values: &[CssValue], separator: &str) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

impl fmt::Display for CssValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(k) => f.write_str(k),
            Self::Number(n) => write!(f, "{n}"),
            Self::Percentage(p) => write!(f, "{p}%"),
            Self::Dimension { value, unit } => write!(f, "{value}{unit}"),
            Self::Length(l) => write!(f, "{l}"),
            Self::Color(c) => f.write_str(&c.to_hex_string()),
            Self::String(s) => {
                // [CSSOM § 2.1](https://drafts.csswg.org/cssom/#serialize-a-string)
                f.write_str("\"")?;
                for c in s.chars() {
                    if c == '"' || c == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str("\"")
            }
            Self::Function { name, args } => {
                write!(f, "{name}(")?;
                write_joined(f, args, ", ")?;
                f.write_str(")")
            }
            Self::Delim(c) => write!(f, "{c}"),
            Self::List(items) => write_joined(f, items, " "),
        }
    }
}
