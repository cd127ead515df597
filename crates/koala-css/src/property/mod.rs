//! Longhand and shorthand properties.
//!
//! [CSS Cascade § 1.2 Shorthand Properties](https://www.w3.org/TR/css-cascade-4/#shorthand)
//!
//! "Some properties are shorthand properties, meaning that they allow
//! authors to specify the values of several properties with a single
//! property. A shorthand property sets all of its longhand sub-properties."
//!
//! A [`CssProperty`] is a longhand slot holding at most one value. A
//! [`ShorthandProperty`] holds no value of its own: validating it writes the
//! longhand slots of the [`DeclarationBlock`] it lives in, and serializing it
//! reads them back in a fixed canonical order.

mod grammar;

pub(crate) use grammar::{parse_longhand, parse_shorthand};

use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::declaration::DeclarationBlock;
use crate::error::CssError;
use crate::values::CssValue;

/// Every property this crate knows about.
///
/// Names parse and print in their CSS spelling (`text-decoration-line`);
/// parsing ignores ASCII case.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyName {
    /// `color`
    Color,
    /// `display`
    Display,
    /// `width`
    Width,
    /// `text-decoration` (shorthand)
    TextDecoration,
    /// `text-decoration-line`
    TextDecorationLine,
    /// `text-decoration-style`
    TextDecorationStyle,
    /// `text-decoration-color`
    TextDecorationColor,
    /// `outline` (shorthand)
    Outline,
    /// `outline-color`
    OutlineColor,
    /// `outline-style`
    OutlineStyle,
    /// `outline-width`
    OutlineWidth,
    /// `column-rule` (shorthand)
    ColumnRule,
    /// `column-rule-width`
    ColumnRuleWidth,
    /// `column-rule-style`
    ColumnRuleStyle,
    /// `column-rule-color`
    ColumnRuleColor,
    /// `flex-flow` (shorthand)
    FlexFlow,
    /// `flex-direction`
    FlexDirection,
    /// `flex-wrap`
    FlexWrap,
}

impl PropertyName {
    /// The longhands a shorthand expands to, in canonical serialization
    /// order. Empty for longhands.
    #[must_use]
    pub const fn longhands(self) -> &'static [Self] {
        match self {
            Self::TextDecoration => &[
                Self::TextDecorationLine,
                Self::TextDecorationStyle,
                Self::TextDecorationColor,
            ],
            Self::Outline => &[Self::OutlineColor, Self::OutlineStyle, Self::OutlineWidth],
            Self::ColumnRule => &[
                Self::ColumnRuleWidth,
                Self::ColumnRuleStyle,
                Self::ColumnRuleColor,
            ],
            Self::FlexFlow => &[Self::FlexDirection, Self::FlexWrap],
            _ => &[],
        }
    }

    /// Whether this is a shorthand.
    #[must_use]
    pub const fn is_shorthand(self) -> bool {
        !self.longhands().is_empty()
    }

    /// The shorthand owning this longhand, if any.
    #[must_use]
    pub const fn shorthand(self) -> Option<Self> {
        match self {
            Self::TextDecorationLine | Self::TextDecorationStyle | Self::TextDecorationColor => {
                Some(Self::TextDecoration)
            }
            Self::OutlineColor | Self::OutlineStyle | Self::OutlineWidth => Some(Self::Outline),
            Self::ColumnRuleWidth | Self::ColumnRuleStyle | Self::ColumnRuleColor => {
                Some(Self::ColumnRule)
            }
            Self::FlexDirection | Self::FlexWrap => Some(Self::FlexFlow),
            _ => None,
        }
    }

    /// Static metadata for this property.
    #[must_use]
    pub const fn flags(self) -> PropertyFlags {
        let inherited = matches!(self, Self::Color);
        let animatable = matches!(
            self,
            Self::Color
                | Self::Width
                | Self::TextDecoration
                | Self::TextDecorationColor
                | Self::Outline
                | Self::OutlineColor
                | Self::OutlineWidth
                | Self::ColumnRule
                | Self::ColumnRuleWidth
                | Self::ColumnRuleColor
        );
        PropertyFlags {
            inherited,
            animatable,
            shorthand: self.is_shorthand(),
        }
    }
}

/// Static metadata of a property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PropertyFlags {
    /// [CSS Cascade § 7.2](https://www.w3.org/TR/css-cascade-4/#inheriting)
    pub inherited: bool,
    /// [CSS Transitions § 5](https://www.w3.org/TR/css-transitions-1/#animatable-css)
    pub animatable: bool,
    /// The property only distributes to longhands.
    pub shorthand: bool,
}

/// A longhand property slot.
///
/// Unset until a value validates, then set until cleared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CssProperty {
    name: PropertyName,
    value: Option<CssValue>,
}

impl CssProperty {
    /// An unset slot for `name`.
    #[must_use]
    pub const fn new(name: PropertyName) -> Self {
        Self { name, value: None }
    }

    /// The property name.
    #[must_use]
    pub const fn name(&self) -> PropertyName {
        self.name
    }

    /// Static metadata.
    #[must_use]
    pub const fn flags(&self) -> PropertyFlags {
        self.name.flags()
    }

    /// The current value, if set.
    #[must_use]
    pub const fn value(&self) -> Option<&CssValue> {
        self.value.as_ref()
    }

    /// Whether a value is set.
    #[must_use]
    pub const fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Set the value without validating it.
    pub fn set_value(&mut self, value: CssValue) {
        self.value = Some(value);
    }

    /// Return to the unset state.
    pub fn clear(&mut self) {
        self.value = None;
    }

    /// Convert `input` with this property's grammar and store the result.
    ///
    /// Returns `false`, leaving the slot unchanged, if the input does not
    /// match the grammar as a whole.
    pub fn validate(&mut self, input: &[CssValue]) -> bool {
        match parse_longhand(self.name, input) {
            Ok(value) => {
                self.value = Some(value);
                true
            }
            Err(_) => false,
        }
    }

    /// The value as CSS text, empty when unset.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.value.as_ref().map(CssValue::to_css).unwrap_or_default()
    }
}

/// A shorthand property. It has no value of its own; its longhands live as
/// [`CssProperty`] slots in the same [`DeclarationBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShorthandProperty {
    name: PropertyName,
}

impl ShorthandProperty {
    /// The shorthand `name`, or `None` if `name` is a longhand.
    #[must_use]
    pub const fn new(name: PropertyName) -> Option<Self> {
        if name.is_shorthand() {
            Some(Self { name })
        } else {
            None
        }
    }

    /// The shorthand's name.
    #[must_use]
    pub const fn name(&self) -> PropertyName {
        self.name
    }

    /// The owned longhands in canonical order.
    #[must_use]
    pub const fn longhands(&self) -> &'static [PropertyName] {
        self.name.longhands()
    }

    /// Convert `input` and distribute the components to the longhand slots
    /// of `block`.
    ///
    /// The conversion is all-or-nothing: on failure no longhand changes and
    /// `false` is returned. On success, every longhand whose component was
    /// present receives it; longhands whose component was omitted keep their
    /// previous value.
    ///
    /// # Panics
    ///
    /// Panics if `block` lacks one of this shorthand's longhand slots. Blocks
    /// built through [`DeclarationBlock::insert`] or
    /// [`DeclarationBlock::with_properties`] always carry them; use
    /// [`Self::try_validate`] for hand-built blocks.
    pub fn validate(&self, block: &mut DeclarationBlock, input: &[CssValue]) -> bool {
        match self.try_validate(block, input) {
            Ok(applied) => applied,
            Err(err) => panic!("{err}"),
        }
    }

    /// [`Self::validate`] reporting a missing longhand slot as an error.
    ///
    /// # Errors
    ///
    /// Returns [`CssError::MissingLonghand`] if `block` lacks one of this
    /// shorthand's longhand slots. The check happens before conversion, so
    /// nothing is written in that case.
    pub fn try_validate(
        &self,
        block: &mut DeclarationBlock,
        input: &[CssValue],
    ) -> Result<bool, CssError> {
        if let Some(&missing) = self
            .longhands()
            .iter()
            .find(|&&longhand| block.longhand(longhand).is_none())
        {
            return Err(CssError::MissingLonghand {
                shorthand: self.name,
                longhand: missing,
            });
        }
        if input.is_empty() {
            return Ok(false);
        }
        let Ok(components) = parse_shorthand(self.name, input) else {
            return Ok(false);
        };

        for (&longhand, component) in self.longhands().iter().zip(components) {
            if let Some(value) = component
                && let Some(slot) = block.longhand_mut(longhand)
            {
                slot.set_value(value);
            }
        }
        Ok(true)
    }

    /// The longhand values of `block` as shorthand text.
    ///
    /// Present values are joined by single spaces in canonical order,
    /// whatever order they were written in. Returns an empty string if any
    /// longhand slot is missing from `block`.
    #[must_use]
    pub fn serialize(&self, block: &DeclarationBlock) -> String {
        let mut parts = Vec::with_capacity(self.longhands().len());
        for &longhand in self.longhands() {
            let Some(property) = block.longhand(longhand) else {
                return String::new();
            };
            if let Some(value) = property.value() {
                parts.push(value.to_css());
            }
        }
        parts.join(" ")
    }
}

/// One named entry of a [`DeclarationBlock`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertySlot {
    /// A longhand holding its own value.
    Longhand(CssProperty),
    /// A shorthand backed by longhand slots.
    Shorthand(ShorthandProperty),
}

impl PropertySlot {
    /// An empty slot of the right kind for `name`.
    #[must_use]
    pub const fn new(name: PropertyName) -> Self {
        match ShorthandProperty::new(name) {
            Some(shorthand) => Self::Shorthand(shorthand),
            None => Self::Longhand(CssProperty::new(name)),
        }
    }

    /// The slot's property name.
    #[must_use]
    pub const fn name(&self) -> PropertyName {
        match self {
            Self::Longhand(property) => property.name(),
            Self::Shorthand(shorthand) => shorthand.name(),
        }
    }

    /// The longhand, if this is one.
    #[must_use]
    pub const fn as_longhand(&self) -> Option<&CssProperty> {
        match self {
            Self::Longhand(property) => Some(property),
            Self::Shorthand(_) => None,
        }
    }

    /// The longhand, mutably, if this is one.
    pub const fn as_longhand_mut(&mut self) -> Option<&mut CssProperty> {
        match self {
            Self::Longhand(property) => Some(property),
            Self::Shorthand(_) => None,
        }
    }

    /// The shorthand, if this is one.
    #[must_use]
    pub const fn as_shorthand(&self) -> Option<ShorthandProperty> {
        match self {
            Self::Shorthand(shorthand) => Some(*shorthand),
            Self::Longhand(_) => None,
        }
    }
}
