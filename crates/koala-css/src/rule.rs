//! [CSSOM § 6.4 CSS Rules](https://drafts.csswg.org/cssom/#css-rules)
//!
//! Style rules and keyframe rules. Both own a [`DeclarationBlock`]; they
//! differ in what selects them: a selector list, or a keyframe key such as
//! `from`, `to` or `25%, 75%`.

use core::fmt;

use crate::declaration::DeclarationBlock;
use crate::error::CssError;
use crate::selector::{SelectorList, parse_selector_list};

/// [CSS Animations § 3.1](https://www.w3.org/TR/css-animations-1/#typedef-keyframe-selector)
///
/// "`<keyframe-selector>` = from | to | `<percentage [0,100]>`"
///
/// A non-empty list of offsets in percent; `from` is 0 and `to` is 100.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeSelector {
    stops: Vec<f64>,
}

impl KeyframeSelector {
    /// Parse a comma-separated keyframe key.
    ///
    /// # Errors
    ///
    /// Returns [`CssError::Syntax`] for an empty key, an unknown keyword, or
    /// a percentage outside `0%..=100%`.
    pub fn parse(text: &str) -> Result<Self, CssError> {
        let stops = text
            .split(',')
            .map(|stop| parse_stop(stop.trim()))
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(|| CssError::Syntax(format!("invalid keyframe selector '{text}'")))?;
        Ok(Self { stops })
    }

    /// The offsets in percent, in the order written.
    #[must_use]
    pub fn stops(&self) -> &[f64] {
        &self.stops
    }
}

fn parse_stop(stop: &str) -> Option<f64> {
    if stop.eq_ignore_ascii_case("from") {
        return Some(0.0);
    }
    if stop.eq_ignore_ascii_case("to") {
        return Some(100.0);
    }
    let percent: f64 = stop.strip_suffix('%')?.parse().ok()?;
    (0.0..=100.0).contains(&percent).then_some(percent)
}

/// [CSSOM § 6.6.1 Serializing keyframe selectors](https://drafts.csswg.org/css-animations-1/#dom-csskeyframerule-keytext)
///
/// Percentages joined by `", "`; `from` and `to` print as `0%` and `100%`.
impl fmt::Display for KeyframeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stop) in self.stops.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{stop}%")?;
        }
        Ok(())
    }
}

/// A rule that carries declarations.
#[derive(Debug, Clone, PartialEq)]
pub enum CssRule {
    /// [CSSOM § 6.4.3 CSSStyleRule](https://drafts.csswg.org/cssom/#the-cssstylerule-interface)
    Style {
        /// Elements the rule applies to.
        selectors: SelectorList,
        /// The rule's declarations.
        style: DeclarationBlock,
    },
    /// [CSS Animations § 6.2 CSSKeyframeRule](https://www.w3.org/TR/css-animations-1/#interface-csskeyframerule)
    Keyframe {
        /// The offsets this keyframe applies at.
        key: KeyframeSelector,
        /// The rule's declarations.
        style: DeclarationBlock,
    },
}

impl CssRule {
    /// A style rule from selector text and a declaration list.
    ///
    /// # Errors
    ///
    /// Returns [`CssError::Syntax`] if the selector list does not parse.
    pub fn style_rule(selector_text: &str, body: &str) -> Result<Self, CssError> {
        let selectors = parse_selector_list(selector_text)
            .ok_or_else(|| CssError::Syntax(format!("invalid selector '{selector_text}'")))?;
        Ok(Self::Style {
            selectors,
            style: DeclarationBlock::parse(body),
        })
    }

    /// A keyframe rule from key text and a declaration list.
    ///
    /// # Errors
    ///
    /// Returns [`CssError::Syntax`] if the key does not parse.
    pub fn keyframe_rule(key_text: &str, body: &str) -> Result<Self, CssError> {
        Ok(Self::Keyframe {
            key: KeyframeSelector::parse(key_text)?,
            style: DeclarationBlock::parse(body),
        })
    }

    /// `"style"` or `"keyframe"`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Style { .. } => "style",
            Self::Keyframe { .. } => "keyframe",
        }
    }

    /// The rule's declarations.
    #[must_use]
    pub const fn style(&self) -> &DeclarationBlock {
        match self {
            Self::Style { style, .. } | Self::Keyframe { style, .. } => style,
        }
    }

    /// The rule's declarations, mutably.
    pub const fn style_mut(&mut self) -> &mut DeclarationBlock {
        match self {
            Self::Style { style, .. } | Self::Keyframe { style, .. } => style,
        }
    }

    /// The selector text of a style rule, or the key text of a keyframe.
    #[must_use]
    pub fn key_text(&self) -> String {
        match self {
            Self::Style { selectors, .. } => selectors.to_string(),
            Self::Keyframe { key, .. } => key.to_string(),
        }
    }

    /// Replace a keyframe's key.
    ///
    /// The key is only replaced if `text` parses.
    ///
    /// # Errors
    ///
    /// Returns [`CssError::Syntax`] for an invalid key and
    /// [`CssError::RuleKindMismatch`] on a style rule.
    pub fn set_key_text(&mut self, text: &str) -> Result<(), CssError> {
        match self {
            Self::Keyframe { key, .. } => {
                *key = KeyframeSelector::parse(text)?;
                Ok(())
            }
            Self::Style { .. } => Err(CssError::RuleKindMismatch {
                expected: "keyframe",
                found: "style",
            }),
        }
    }

    /// Take over `other`'s selector or key and declarations.
    ///
    /// This rule keeps its own [`DeclarationBlock`]; its contents are
    /// replaced with copies of `other`'s.
    ///
    /// # Errors
    ///
    /// Returns [`CssError::RuleKindMismatch`] if `other` is a different kind
    /// of rule; `self` is unchanged then.
    pub fn replace_with(&mut self, other: &Self) -> Result<(), CssError> {
        match (self, other) {
            (
                Self::Style { selectors, style },
                Self::Style {
                    selectors: other_selectors,
                    style: other_style,
                },
            ) => {
                selectors.clone_from(other_selectors);
                style.replace_contents_from(other_style);
                Ok(())
            }
            (
                Self::Keyframe { key, style },
                Self::Keyframe {
                    key: other_key,
                    style: other_style,
                },
            ) => {
                key.clone_from(other_key);
                style.replace_contents_from(other_style);
                Ok(())
            }
            (this, other) => Err(CssError::RuleKindMismatch {
                expected: this.kind(),
                found: other.kind(),
            }),
        }
    }

    /// [CSSOM § 6.4.3 Serialize a CSS rule](https://drafts.csswg.org/cssom/#serialize-a-css-rule)
    ///
    /// `key { declarations; }`, or `key { }` when the block is empty.
    #[must_use]
    pub fn to_css(&self) -> String {
        let declarations = self.style().to_css();
        if declarations.is_empty() {
            format!("{} {{ }}", self.key_text())
        } else {
            format!("{} {{ {declarations}; }}", self.key_text())
        }
    }
}

impl fmt::Display for CssRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
