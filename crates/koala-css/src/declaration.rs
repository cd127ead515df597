//! [CSSOM § 6.7 CSS Declaration Blocks](https://drafts.csswg.org/cssom/#css-declaration-blocks)
//!
//! A [`DeclarationBlock`] owns the property slots of one rule or inline
//! style. Names are unique within a block; slots keep insertion order,
//! which is the order whole-block serialization follows.

use koala_common::warning::warn_once;
use serde::Serialize;

use crate::error::CssError;
use crate::property::{CssProperty, PropertyName, PropertySlot, parse_longhand};
use crate::values::{CssValue, parse_value_list};

/// An ordered set of property slots with unique names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DeclarationBlock {
    slots: Vec<PropertySlot>,
}

impl DeclarationBlock {
    /// An empty block.
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// A block with an empty slot for each name. Shorthands also get a slot
    /// for every longhand they distribute to.
    #[must_use]
    pub fn with_properties(names: &[PropertyName]) -> Self {
        let mut block = Self::new();
        for &name in names {
            block.ensure_slot(name);
        }
        block
    }

    /// Parse a declaration list such as `color: red; text-decoration: underline`.
    ///
    /// [CSS Syntax § 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations)
    ///
    /// Declarations with an unknown property or an invalid value are dropped
    /// with a warning; the others are applied in order.
    #[must_use]
    pub fn parse(body: &str) -> Self {
        let mut block = Self::new();
        block.apply_declarations(body);
        block
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the block has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The slots in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertySlot> {
        self.slots.iter()
    }

    /// The slot named `name`.
    #[must_use]
    pub fn get_slot(&self, name: PropertyName) -> Option<&PropertySlot> {
        self.slots.iter().find(|slot| slot.name() == name)
    }

    /// The slot named `name`, mutably.
    pub fn get_slot_mut(&mut self, name: PropertyName) -> Option<&mut PropertySlot> {
        self.slots.iter_mut().find(|slot| slot.name() == name)
    }

    /// The longhand slot named `name`.
    #[must_use]
    pub fn longhand(&self, name: PropertyName) -> Option<&CssProperty> {
        self.get_slot(name).and_then(PropertySlot::as_longhand)
    }

    /// The longhand slot named `name`, mutably.
    pub fn longhand_mut(&mut self, name: PropertyName) -> Option<&mut CssProperty> {
        self.get_slot_mut(name).and_then(PropertySlot::as_longhand_mut)
    }

    /// Add `slot`, replacing a slot of the same name in place.
    ///
    /// Returns the replaced slot. Longhands missing for a shorthand slot are
    /// added after it.
    pub fn insert(&mut self, slot: PropertySlot) -> Option<PropertySlot> {
        let name = slot.name();
        let replaced = match self.get_slot_mut(name) {
            Some(existing) => Some(core::mem::replace(existing, slot)),
            None => {
                self.slots.push(slot);
                None
            }
        };
        for &longhand in name.longhands() {
            self.ensure_slot(longhand);
        }
        replaced
    }

    /// Make sure a slot for `name` exists, along with the longhands it needs.
    pub fn ensure_slot(&mut self, name: PropertyName) {
        if self.get_slot(name).is_none() {
            self.slots.push(PropertySlot::new(name));
        }
        for &longhand in name.longhands() {
            if self.get_slot(longhand).is_none() {
                self.slots.push(PropertySlot::new(longhand));
            }
        }
    }

    /// Remove the slot named `name`. A shorthand's longhands are cleared
    /// but keep their slots, since other shorthands may rely on them.
    pub fn remove_property(&mut self, name: PropertyName) -> Option<PropertySlot> {
        let index = self.slots.iter().position(|slot| slot.name() == name)?;
        let removed = self.slots.remove(index);
        for &longhand in name.longhands() {
            if let Some(property) = self.longhand_mut(longhand) {
                property.clear();
            }
        }
        Some(removed)
    }

    /// Remove every slot.
    pub fn clear_all(&mut self) {
        self.slots.clear();
    }

    /// Replace this block's slots with copies of `other`'s.
    ///
    /// The block itself (and anything referring to it) stays the same.
    pub fn replace_contents_from(&mut self, other: &Self) {
        self.slots.clone_from(&other.slots);
    }

    /// Validate `input` for `name` and store it.
    ///
    /// Longhands are stored only if the whole input matches. Shorthands
    /// distribute to their longhands atomically. Returns whether the value
    /// was accepted.
    pub fn set_value(&mut self, name: PropertyName, input: &[CssValue]) -> bool {
        if input.is_empty() {
            return false;
        }
        if name.is_shorthand() {
            self.ensure_slot(name);
            return match self.get_slot(name).and_then(PropertySlot::as_shorthand) {
                Some(shorthand) => shorthand.validate(self, input),
                None => false,
            };
        }
        let Ok(value) = parse_longhand(name, input) else {
            return false;
        };
        self.ensure_slot(name);
        match self.longhand_mut(name) {
            Some(property) => {
                property.set_value(value);
                true
            }
            None => false,
        }
    }

    /// Parse `value` and set it on the property called `name`.
    ///
    /// Returns whether the declaration was applied; an unknown name or an
    /// invalid value leaves the block unchanged.
    pub fn set_property(&mut self, name: &str, value: &str) -> bool {
        self.try_set_property(name, value).unwrap_or(false)
    }

    /// [`Self::set_property`] reporting why text could not be applied.
    ///
    /// # Errors
    ///
    /// Returns [`CssError::UnknownProperty`] for names that are not
    /// supported and [`CssError::Syntax`] for value text that does not lex.
    /// A value that lexes but fails the property grammar is `Ok(false)`.
    pub fn try_set_property(&mut self, name: &str, value: &str) -> Result<bool, CssError> {
        let name = name.trim();
        let property: PropertyName = name
            .parse()
            .map_err(|_| CssError::UnknownProperty(name.to_string()))?;
        let input = parse_value_list(value)?;
        Ok(self.set_value(property, &input))
    }

    /// The serialized value of `name`: a longhand's value, or a shorthand
    /// built from its longhands. Empty when unset or absent.
    #[must_use]
    pub fn get_property_value(&self, name: PropertyName) -> String {
        match self.get_slot(name) {
            Some(PropertySlot::Longhand(property)) => property.serialize(),
            Some(PropertySlot::Shorthand(shorthand)) => shorthand.serialize(self),
            None => String::new(),
        }
    }

    /// Apply every declaration in `body`, dropping invalid ones.
    pub fn apply_declarations(&mut self, body: &str) {
        for declaration in split_declarations(body) {
            let Some((name, value)) = declaration.split_once(':') else {
                warn_once("CSS", &format!("dropped declaration without ':': '{declaration}'"));
                continue;
            };
            match self.try_set_property(name, value) {
                Ok(true) => {}
                Ok(false) => warn_once(
                    "CSS",
                    &format!("dropped invalid value for '{}': '{}'", name.trim(), value.trim()),
                ),
                Err(err) => warn_once("CSS", &format!("dropped declaration '{declaration}': {err}")),
            }
        }
    }

    /// [CSSOM § 6.7.2 Serializing a CSS declaration block](https://drafts.csswg.org/cssom/#serialize-a-css-declaration-block)
    ///
    /// Declarations in slot order, `name: value` joined by `"; "`. A
    /// shorthand whose longhands all have values is written once in their
    /// place; otherwise the set longhands are written individually.
    #[must_use]
    pub fn to_css(&self) -> String {
        let collapsed: Vec<PropertyName> = self
            .slots
            .iter()
            .filter_map(PropertySlot::as_shorthand)
            .filter(|shorthand| {
                shorthand
                    .longhands()
                    .iter()
                    .all(|&longhand| self.longhand(longhand).is_some_and(CssProperty::has_value))
            })
            .map(|shorthand| shorthand.name())
            .collect();

        let mut declarations = Vec::new();
        for slot in &self.slots {
            match slot {
                PropertySlot::Shorthand(shorthand) if collapsed.contains(&shorthand.name()) => {
                    declarations.push(format!("{}: {}", shorthand.name(), shorthand.serialize(self)));
                }
                PropertySlot::Longhand(property)
                    if property.has_value()
                        && !property
                            .name()
                            .shorthand()
                            .is_some_and(|owner| collapsed.contains(&owner)) =>
                {
                    declarations.push(format!("{}: {}", property.name(), property.serialize()));
                }
                _ => {}
            }
        }
        declarations.join("; ")
    }
}

impl<'a> IntoIterator for &'a DeclarationBlock {
    type Item = &'a PropertySlot;
    type IntoIter = core::slice::Iter<'a, PropertySlot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

/// Split on `;` outside of quotes and parentheses, dropping empty pieces.
fn split_declarations(body: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                pieces.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&body[start..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}
