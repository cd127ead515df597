//! Composable value converters.
//!
//! [§ 2.2 Component value combinators](https://www.w3.org/TR/css-values-4/#component-combinators)
//!
//! A [`ValueConverter`] describes one property grammar. It is handed the
//! remaining [`CssValue`]s of a declaration and either consumes a prefix of
//! them, producing a typed result and the number of values it used, or fails
//! without side effects. Grammars are built from a few base converters
//! ([`Keyword`], [`ColorConverter`], [`LengthConverter`]) and combinators:
//!
//! | Combinator | Grammar |
//! |------------|---------|
//! | [`Optional`] | `a?` |
//! | [`Or`] | `a \| b` |
//! | [`OneOrMore`] | `a+` with distinct items, e.g. `underline overline` |
//! | [`WithAny`] | `a \|\| b \|\| c`, any order, each at most once |
//! | [`Val`] | no grammar change; normalizes the result to one [`CssValue`] |
//!
//! ```
//! use koala_css::converter::{ColorConverter, Keyword, ValueConverter, WithAny};
//! use koala_css::values::parse_value_list;
//!
//! let style = Keyword::new(&["solid", "dashed"]);
//! let grammar = WithAny((style.optional(), ColorConverter.optional()));
//!
//! let input = parse_value_list("red solid").unwrap();
//! let (style, color) = grammar.convert_all(&input).unwrap();
//! assert_eq!(style.unwrap().to_css(), "solid");
//! assert_eq!(color.unwrap().to_css(), "red");
//! ```

mod basic;

pub use basic::{ColorConverter, Keyword, LengthConverter};

use crate::error::ConversionFailure;
use crate::values::CssValue;

/// A successful conversion: the produced value and how many input values
/// it consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion<T> {
    /// The converted result.
    pub value: T,
    /// Number of input values consumed from the front of the input.
    pub consumed: usize,
}

impl<T> Conversion<T> {
    /// Create a conversion result.
    pub const fn new(value: T, consumed: usize) -> Self {
        Self { value, consumed }
    }

    /// Transform the value, keeping the consumed count.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Conversion<U> {
        Conversion {
            value: f(self.value),
            consumed: self.consumed,
        }
    }
}

/// Result of [`ValueConverter::try_convert`].
pub type ConversionResult<T> = Result<Conversion<T>, ConversionFailure>;

/// A parser for one property value grammar.
///
/// Implementations must be pure: a failed `try_convert` leaves no trace.
pub trait ValueConverter {
    /// What a successful conversion produces.
    type Output;

    /// Try to consume a prefix of `input`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionFailure`] if the front of `input` does not match
    /// this grammar.
    fn try_convert(&self, input: &[CssValue]) -> ConversionResult<Self::Output>;

    /// Convert `input` as a whole; leftover values are a failure.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionFailure::Unconsumed`] when a prefix matched but
    /// values remain, or whatever `try_convert` failed with.
    fn convert_all(&self, input: &[CssValue]) -> Result<Self::Output, ConversionFailure> {
        let conversion = self.try_convert(input)?;
        if conversion.consumed < input.len() {
            return Err(ConversionFailure::Unconsumed {
                position: conversion.consumed,
            });
        }
        Ok(conversion.value)
    }

    /// Normalize the result to a single [`CssValue`]. See [`Val`].
    fn val(self) -> Val<Self>
    where
        Self: Sized,
        Self::Output: Into<CssValue>,
    {
        Val(self)
    }

    /// Make this grammar optional. See [`Optional`].
    fn optional(self) -> Optional<Self>
    where
        Self: Sized,
    {
        Optional(self)
    }

    /// Fall back to `other` when this grammar fails. See [`Or`].
    fn or<B>(self, other: B) -> Or<Self, B>
    where
        Self: Sized,
        B: ValueConverter<Output = Self::Output>,
    {
        Or(self, other)
    }
}

impl<C: ValueConverter + ?Sized> ValueConverter for &C {
    type Output = C::Output;

    fn try_convert(&self, input: &[CssValue]) -> ConversionResult<Self::Output> {
        (**self).try_convert(input)
    }
}

/// Pass-through adapter whose output is always exactly one [`CssValue`].
///
/// Lets converters with different result shapes (a keyword, a list of
/// keywords) be composed uniformly, e.g. inside [`WithAny`].
#[derive(Debug, Clone, Copy)]
pub struct Val<C>(pub C);

impl<C> ValueConverter for Val<C>
where
    C: ValueConverter,
    C::Output: Into<CssValue>,
{
    type Output = CssValue;

    fn try_convert(&self, input: &[CssValue]) -> ConversionResult<CssValue> {
        self.0.try_convert(input).map(|c| c.map(Into::into))
    }
}

/// `inner?`: absence is success with `None` and consumes nothing.
#[derive(Debug, Clone, Copy)]
pub struct Optional<C>(pub C);

impl<C: ValueConverter> ValueConverter for Optional<C> {
    type Output = Option<C::Output>;

    fn try_convert(&self, input: &[CssValue]) -> ConversionResult<Self::Output> {
        Ok(match self.0.try_convert(input) {
            Ok(conversion) => conversion.map(Some),
            Err(_) => Conversion::new(None, 0),
        })
    }
}

/// `a | b`: the first alternative that matches wins.
#[derive(Debug, Clone, Copy)]
pub struct Or<A, B>(pub A, pub B);

impl<A, B> ValueConverter for Or<A, B>
where
    A: ValueConverter,
    B: ValueConverter<Output = A::Output>,
{
    type Output = A::Output;

    fn try_convert(&self, input: &[CssValue]) -> ConversionResult<Self::Output> {
        self.0.try_convert(input).or_else(|_| self.1.try_convert(input))
    }
}

/// `a+` over distinct values: repeats `inner` until it fails, consumes
/// nothing, or would produce a value already seen.
#[derive(Debug, Clone, Copy)]
pub struct OneOrMore<C>(pub C);

impl<C> ValueConverter for OneOrMore<C>
where
    C: ValueConverter,
    C::Output: PartialEq,
{
    type Output = Vec<C::Output>;

    fn try_convert(&self, input: &[CssValue]) -> ConversionResult<Self::Output> {
        let first = self.0.try_convert(input)?;
        let mut consumed = first.consumed;
        let mut items = vec![first.value];
        while consumed < input.len() {
            match self.0.try_convert(&input[consumed..]) {
                Ok(next) if next.consumed > 0 && !items.contains(&next.value) => {
                    consumed += next.consumed;
                    items.push(next.value);
                }
                _ => break,
            }
        }
        Ok(Conversion::new(items, consumed))
    }
}

/// `a || b || c`: each sub-grammar at most once, in any order.
///
/// The tuple holds the sub-converters; the output is a tuple of their
/// outputs in the same positions. Any assignment of input values to
/// sub-converters is considered: a sub-converter claims a run of values
/// starting where the previous claim ended, consuming at least one. An
/// assignment is complete once every sub-converter that rejects empty input
/// has claimed; the others ([`Optional`] ones) yield `None` when left out.
/// The complete assignment reaching furthest into the input wins, and among
/// those that tie the one found first, trying sub-converters in tuple order.
/// Values left over after the best assignment are a failure.
///
/// Results are collected in locals and only returned on success, so a
/// failure carries no partial result.
#[derive(Debug, Clone, Copy)]
pub struct WithAny<T>(pub T);

/// Depth-first search over the claims of a [`WithAny`] with `N` members.
struct ClaimSearch<'a, const N: usize> {
    len: usize,
    required: [bool; N],
    /// Values consumed by `member` starting at `position`, if at least one.
    claim: &'a dyn Fn(usize, usize) -> Option<usize>,
    starts: [Option<usize>; N],
    best: Option<([Option<usize>; N], usize)>,
}

impl<'a, const N: usize> ClaimSearch<'a, N> {
    const fn new(
        len: usize,
        required: [bool; N],
        claim: &'a dyn Fn(usize, usize) -> Option<usize>,
    ) -> Self {
        Self {
            len,
            required,
            claim,
            starts: [None; N],
            best: None,
        }
    }

    /// Returns `true` as soon as a complete assignment consumes everything.
    fn search(&mut self, position: usize) -> bool {
        let complete = self
            .required
            .iter()
            .zip(&self.starts)
            .all(|(&required, start)| !required || start.is_some());
        if complete && self.best.is_none_or(|(_, end)| position > end) {
            self.best = Some((self.starts, position));
            if position == self.len {
                return true;
            }
        }

        let open: Vec<usize> = (0..N).filter(|&member| self.starts[member].is_none()).collect();
        for member in open {
            if let Some(consumed) = (self.claim)(member, position) {
                self.starts[member] = Some(position);
                if self.search(position + consumed) {
                    return true;
                }
                self.starts[member] = None;
            }
        }
        false
    }
}

macro_rules! impl_with_any {
    ($($index:literal => $converter:ident: $ty:ident),+) => {
        impl<$($ty: ValueConverter),+> ValueConverter for WithAny<($($ty,)+)> {
            type Output = ($($ty::Output,)+);

            fn try_convert(&self, input: &[CssValue]) -> ConversionResult<Self::Output> {
                let ($($converter,)+) = &self.0;
                let claim = |member: usize, position: usize| -> Option<usize> {
                    let rest = input.get(position..).filter(|rest| !rest.is_empty())?;
                    let consumed = match member {
                        $($index => $converter.try_convert(rest).ok()?.consumed,)+
                        _ => return None,
                    };
                    (consumed > 0).then_some(consumed)
                };
                let required = [$($converter.try_convert(&[]).is_err()),+];

                let mut search = ClaimSearch::new(input.len(), required, &claim);
                let _ = search.search(0);
                let Some((starts, end)) = search.best else {
                    // Some member rejects empty input and never got a claim.
                    $(let _ = $converter.try_convert(&[])?;)+
                    return Err(ConversionFailure::Empty);
                };
                if end < input.len() {
                    return Err(ConversionFailure::Unconsumed { position: end });
                }

                Ok(Conversion::new(
                    ($(
                        match starts[$index] {
                            Some(start) => $converter.try_convert(&input[start..])?.value,
                            None => $converter.try_convert(&[])?.value,
                        },
                    )+),
                    end,
                ))
            }
        }
    };
}

impl_with_any!(0 => a: A, 1 => b: B);
impl_with_any!(0 => a: A, 1 => b: B, 2 => c: C);
impl_with_any!(0 => a: A, 1 => b: B, 2 => c: C, 3 => d: D);
