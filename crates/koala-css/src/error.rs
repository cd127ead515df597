//! Error types for value conversion, declarations and rules.

use thiserror::Error;

use crate::property::PropertyName;

/// A value did not match a property grammar.
///
/// Conversion failures are recovered where they happen: a declaration whose
/// value fails to convert is dropped, the rest of the block is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionFailure {
    /// The grammar needs at least one value and none was left.
    #[error("expected a value, found end of input")]
    Empty,
    /// The next value is not accepted by the grammar.
    #[error("'{found}' is not a valid value here")]
    NoMatch {
        /// The rejected value, serialized.
        found: String,
    },
    /// The grammar matched a prefix but values were left over.
    #[error("unexpected value at position {position}")]
    Unconsumed {
        /// Index of the first value that could not be consumed.
        position: usize,
    },
}

/// Errors raised by the style object model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CssError {
    /// A value failed its property grammar.
    #[error(transparent)]
    Conversion(#[from] ConversionFailure),

    /// A shorthand was validated in a block that lacks one of its longhands.
    ///
    /// This is a construction error in the block, not bad user input.
    #[error("shorthand '{shorthand}' requires longhand '{longhand}' in the same block")]
    MissingLonghand {
        /// The shorthand being validated.
        shorthand: PropertyName,
        /// The longhand that was not found.
        longhand: PropertyName,
    },

    /// The property name is not known.
    #[error("unknown property '{0}'")]
    UnknownProperty(String),

    /// Text could not be parsed at all.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// `replace_with` was given a rule of a different kind.
    #[error("cannot replace a {expected} rule with a {found} rule")]
    RuleKindMismatch {
        /// Kind of the rule being replaced.
        expected: &'static str,
        /// Kind of the rule supplied.
        found: &'static str,
    },
}
