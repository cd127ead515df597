//! Splitting declaration value text into [`CssValue`] occurrences.
//!
//! This is a small lexer for the value part of a declaration, loosely
//! following [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
//! It only recognizes what property grammars consume: identifiers,
//! numbers, percentages, dimensions, hash colors, quoted strings, functions,
//! and the `,` and `/` delimiters. Whitespace separates values and is dropped.

use core::iter::Peekable;
use core::str::Chars;

use super::{ColorValue, CssValue};
use crate::error::CssError;

/// Parse the text of a declaration value into value occurrences.
///
/// # Errors
///
/// Returns [`CssError::Syntax`] for text that is not a sequence of values:
/// unterminated strings or functions, invalid hex colors, stray characters.
pub fn parse_value_list(text: &str) -> Result<Vec<CssValue>, CssError> {
    let mut lexer = ValueLexer {
        chars: text.chars().peekable(),
        source: text,
    };
    lexer.consume_values(None)
}

struct ValueLexer<'a> {
    chars: Peekable<Chars<'a>>,
    source: &'a str,
}

impl ValueLexer<'_> {
    fn syntax_error(&self, message: &str) -> CssError {
        CssError::Syntax(format!("{message} in '{}'", self.source))
    }

    /// Consume values until end of input, or until `closing` for function
    /// arguments. Commas inside functions are separators and are dropped.
    fn consume_values(&mut self, closing: Option<char>) -> Result<Vec<CssValue>, CssError> {
        let mut values = Vec::new();
        loop {
            self.skip_whitespace();
            let Some(&c) = self.chars.peek() else {
                return match closing {
                    Some(_) => Err(self.syntax_error("unterminated function")),
                    None => Ok(values),
                };
            };
            match c {
                c if Some(c) == closing => {
                    let _ = self.chars.next();
                    return Ok(values);
                }
                ',' if closing.is_some() => {
                    let _ = self.chars.next();
                }
                ',' | '/' => {
                    let _ = self.chars.next();
                    values.push(CssValue::Delim(c));
                }
                '"' | '\'' => {
                    let _ = self.chars.next();
                    values.push(CssValue::String(self.consume_string(c)?));
                }
                '#' => {
                    let _ = self.chars.next();
                    let name = self.consume_name();
                    let color = ColorValue::from_hex(&name)
                        .ok_or_else(|| self.syntax_error("invalid hex color"))?;
                    values.push(CssValue::Color(color));
                }
                c if self.starts_number(c) => values.push(self.consume_numeric()?),
                c if is_name_start(c) || c == '-' => {
                    let name = self.consume_name();
                    if self.chars.peek() == Some(&'(') {
                        let _ = self.chars.next();
                        let args = self.consume_values(Some(')'))?;
                        values.push(CssValue::Function { name, args });
                    } else {
                        values.push(CssValue::Keyword(name));
                    }
                }
                other => return Err(self.syntax_error(&format!("unexpected '{other}'"))),
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
    }

    /// [§ 4.3.10 Check if three code points would start a number](https://www.w3.org/TR/css-syntax-3/#starts-with-a-number)
    fn starts_number(&self, first: char) -> bool {
        let mut ahead = self.chars.clone();
        let _ = ahead.next();
        match first {
            '0'..='9' => true,
            '+' | '-' => match ahead.next() {
                Some('0'..='9') => true,
                Some('.') => ahead.next().is_some_and(|c| c.is_ascii_digit()),
                _ => false,
            },
            '.' => ahead.next().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    /// [§ 4.3.3 Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    fn consume_numeric(&mut self) -> Result<CssValue, CssError> {
        let mut repr = String::new();
        if let Some(sign) = self.chars.next_if(|c| *c == '+' || *c == '-') {
            repr.push(sign);
        }
        while let Some(d) = self.chars.next_if(char::is_ascii_digit) {
            repr.push(d);
        }
        let mut ahead = self.chars.clone();
        if ahead.next() == Some('.') && ahead.next().is_some_and(|c| c.is_ascii_digit()) {
            repr.push('.');
            let _ = self.chars.next();
            while let Some(d) = self.chars.next_if(char::is_ascii_digit) {
                repr.push(d);
            }
        }
        let value: f64 = repr
            .parse()
            .map_err(|_| self.syntax_error(&format!("invalid number '{repr}'")))?;

        if self.chars.next_if_eq(&'%').is_some() {
            return Ok(CssValue::Percentage(value));
        }
        match self.chars.peek() {
            Some(&c) if is_name_start(c) => Ok(CssValue::Dimension {
                value,
                unit: self.consume_name(),
            }),
            _ => Ok(CssValue::Number(value)),
        }
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.chars.next_if(|c| is_name_char(*c)) {
            name.push(c);
        }
        name
    }

    /// [§ 4.3.5 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    fn consume_string(&mut self, ending: char) -> Result<String, CssError> {
        let mut value = String::new();
        loop {
            match self.chars.next() {
                Some(c) if c == ending => return Ok(value),
                Some('\\') => match self.chars.next() {
                    Some(escaped) => value.push(escaped),
                    None => return Err(self.syntax_error("unterminated string")),
                },
                Some('\n') | None => return Err(self.syntax_error("unterminated string")),
                Some(c) => value.push(c),
            }
        }
    }
}

/// [§ 4.2 ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [§ 4.2 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}
