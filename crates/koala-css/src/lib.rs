//! CSS values, property grammars, declaration blocks, rules and selectors
//! for the Koala style core.
//!
//! # Scope
//!
//! This crate implements:
//! - **Values** ([CSS Values Level 4](https://www.w3.org/TR/css-values-4/))
//!   - Keywords, numbers, percentages, lengths, colors, strings, functions
//!   - A lexer from declaration value text to value occurrences
//!
//! - **Value converters** ([§ 2.2 Component value combinators](https://www.w3.org/TR/css-values-4/#component-combinators))
//!   - Base converters for keywords, colors and lengths
//!   - `a?`, `a | b`, `a+` and `a || b || c` combinators
//!
//! - **Properties** ([CSS Cascade § 1.2](https://www.w3.org/TR/css-cascade-4/#shorthand))
//!   - Longhand slots and shorthand distribution/serialization for
//!     `text-decoration`, `outline`, `column-rule` and `flex-flow`
//!
//! - **Declaration blocks and rules** ([CSSOM](https://drafts.csswg.org/cssom/))
//!   - Parsing, lookup, replacement and serialization
//!   - Style rules and keyframe rules
//!
//! - **Selectors** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, class, ID, universal and attribute selectors
//!   - Combinators, selector lists, specificity
//!
//! # Not Yet Implemented
//!
//! - Pseudo-classes and pseudo-elements
//! - hsl() and other color functions
//! - Grammars beyond the properties listed in [`property::PropertyName`]

/// Composable value converters.
pub mod converter;
/// Declaration blocks per [CSSOM § 6.7](https://drafts.csswg.org/cssom/#css-declaration-blocks).
pub mod declaration;
/// Error types.
pub mod error;
/// Longhand and shorthand properties per [CSS Cascade § 1.2](https://www.w3.org/TR/css-cascade-4/#shorthand).
pub mod property;
/// Style and keyframe rules per [CSSOM § 6.4](https://drafts.csswg.org/cssom/#css-rules).
pub mod rule;
/// CSS selector parsing and matching per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// CSS value types per [CSS Values Level 4](https://www.w3.org/TR/css-values-4/).
pub mod values;

// Re-exports for convenience
pub use converter::{Conversion, ValueConverter};
pub use declaration::DeclarationBlock;
pub use error::{ConversionFailure, CssError};
pub use property::{CssProperty, PropertyFlags, PropertyName, PropertySlot, ShorthandProperty};
pub use rule::{CssRule, KeyframeSelector};
pub use selector::{ParsedSelector, SelectorList, Specificity, parse_selector, parse_selector_list};
pub use values::{ColorValue, CssValue, LengthValue, parse_value_list};
