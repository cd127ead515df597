//! Tests for declaration blocks: slot management, text parsing and
//! serialization.

use koala_common::warning::{clear_warnings, warning_count};
use koala_css::{CssProperty, CssValue, DeclarationBlock, PropertyName, PropertySlot};

#[test]
fn test_with_properties_adds_longhands() {
    let block = DeclarationBlock::with_properties(&[PropertyName::TextDecoration]);
    assert_eq!(block.len(), 4);
    assert!(matches!(
        block.get_slot(PropertyName::TextDecoration),
        Some(PropertySlot::Shorthand(_))
    ));
    for &longhand in PropertyName::TextDecoration.longhands() {
        let property = block.longhand(longhand).unwrap();
        assert!(!property.has_value());
    }
}

#[test]
fn test_get_slot_on_absent_name() {
    let block = DeclarationBlock::new();
    assert!(block.is_empty());
    assert!(block.get_slot(PropertyName::Color).is_none());
    assert_eq!(block.get_property_value(PropertyName::Color), "");
}

#[test]
fn test_insert_replaces_in_place() {
    let mut block = DeclarationBlock::with_properties(&[PropertyName::Color, PropertyName::Width]);

    let mut color = CssProperty::new(PropertyName::Color);
    color.set_value(CssValue::keyword("red"));
    let replaced = block.insert(PropertySlot::Longhand(color));

    assert!(matches!(replaced, Some(PropertySlot::Longhand(p)) if !p.has_value()));
    assert_eq!(block.len(), 2);
    let names: Vec<PropertyName> = block.iter().map(PropertySlot::name).collect();
    assert_eq!(names, [PropertyName::Color, PropertyName::Width]);
    assert_eq!(block.get_property_value(PropertyName::Color), "red");
}

#[test]
fn test_get_slot_mut_edits_value() {
    let mut block = DeclarationBlock::with_properties(&[PropertyName::Display]);
    if let Some(PropertySlot::Longhand(display)) = block.get_slot_mut(PropertyName::Display) {
        display.set_value(CssValue::keyword("flex"));
    }
    assert_eq!(block.get_property_value(PropertyName::Display), "flex");
}

#[test]
fn test_set_property_longhand_and_shorthand() {
    let mut block = DeclarationBlock::new();
    assert!(block.set_property("color", "Blue"));
    assert!(block.set_property("text-decoration", "red underline"));

    assert_eq!(block.get_property_value(PropertyName::Color), "blue");
    assert_eq!(
        block.get_property_value(PropertyName::TextDecoration),
        "underline red"
    );
    assert_eq!(
        block.get_property_value(PropertyName::TextDecorationLine),
        "underline"
    );
}

#[test]
fn test_set_property_rejects_bad_input() {
    let mut block = DeclarationBlock::new();
    assert!(!block.set_property("colour", "red"));
    assert!(!block.set_property("color", "solid"));
    assert!(!block.set_property("color", ""));
    assert!(!block.set_property("width", "10px 'unterminated"));
    assert!(block.get_slot(PropertyName::Color).is_none());
}

#[test]
fn test_remove_property_clears_shorthand_longhands() {
    let mut block = DeclarationBlock::new();
    assert!(block.set_property("text-decoration", "underline dotted"));

    let removed = block.remove_property(PropertyName::TextDecoration);
    assert!(matches!(removed, Some(PropertySlot::Shorthand(_))));
    assert!(block.get_slot(PropertyName::TextDecoration).is_none());
    assert_eq!(
        block.get_property_value(PropertyName::TextDecorationLine),
        ""
    );
    assert!(block.remove_property(PropertyName::TextDecoration).is_none());
}

#[test]
fn test_clear_all() {
    let mut block = DeclarationBlock::parse("color: red; width: 10px");
    assert_eq!(block.len(), 2);
    block.clear_all();
    assert!(block.is_empty());
}

#[test]
fn test_replace_contents_from_copies_slots() {
    let mut block = DeclarationBlock::parse("color: red");
    let other = DeclarationBlock::parse("width: 50%; display: none");

    block.replace_contents_from(&other);
    assert_eq!(block, other);
    assert!(block.get_slot(PropertyName::Color).is_none());

    // The copy is independent of the source.
    assert!(block.set_property("display", "grid"));
    assert_eq!(other.get_property_value(PropertyName::Display), "none");
}

#[test]
fn test_parse_drops_invalid_declarations() {
    clear_warnings();
    let block = DeclarationBlock::parse(
        "color: green; bogus-property: 1px; width: -5px; display inline; text-decoration: wavy",
    );

    assert_eq!(block.get_property_value(PropertyName::Color), "green");
    assert!(block.get_slot(PropertyName::Width).is_none());
    assert_eq!(block.get_property_value(PropertyName::TextDecoration), "wavy");
    // Only this test parses invalid declarations, so the count is exact.
    assert_eq!(warning_count(), 3);
}

#[test]
fn test_parse_respects_quotes_and_parens() {
    let block = DeclarationBlock::parse("color: rgb(0, 128, 0); display: block;;");
    assert_eq!(block.get_property_value(PropertyName::Color), "#008000");
    assert_eq!(block.get_property_value(PropertyName::Display), "block");
}

#[test]
fn test_to_css_collapses_complete_shorthands() {
    let block = DeclarationBlock::parse("color: red; text-decoration: underline solid blue");
    assert_eq!(
        block.to_css(),
        "color: red; text-decoration: underline solid blue"
    );
}

#[test]
fn test_to_css_expands_partial_shorthands() {
    let block = DeclarationBlock::parse("outline: 1px; flex-flow: row wrap");
    assert_eq!(block.to_css(), "outline-width: 1px; flex-flow: row wrap");
}

#[test]
fn test_to_css_empty_block() {
    assert_eq!(DeclarationBlock::new().to_css(), "");
}

#[test]
fn test_serialize_json() {
    let block = DeclarationBlock::parse("display: flex");
    let json = serde_json::to_value(&block).unwrap();
    assert_eq!(json[0]["name"], "display");
    assert_eq!(json[0]["value"]["Keyword"], "flex");
}
