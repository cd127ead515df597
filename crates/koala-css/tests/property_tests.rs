//! Tests for longhand slots and shorthand validation/serialization.

use koala_css::values::{CssValue, parse_value_list};
use koala_css::{
    CssError, CssProperty, DeclarationBlock, PropertyFlags, PropertyName, PropertySlot,
    ShorthandProperty,
};

fn values(text: &str) -> Vec<CssValue> {
    parse_value_list(text).unwrap()
}

fn text_decoration() -> ShorthandProperty {
    ShorthandProperty::new(PropertyName::TextDecoration).unwrap()
}

/// A block holding `text-decoration` and its three longhands.
fn text_decoration_block() -> DeclarationBlock {
    DeclarationBlock::with_properties(&[PropertyName::TextDecoration])
}

fn value_of(block: &DeclarationBlock, name: PropertyName) -> Option<String> {
    block
        .longhand(name)
        .and_then(CssProperty::value)
        .map(CssValue::to_css)
}

#[test]
fn test_property_names_parse_and_print_kebab_case() {
    let name: PropertyName = "text-decoration-line".parse().unwrap();
    assert_eq!(name, PropertyName::TextDecorationLine);
    assert_eq!(name.to_string(), "text-decoration-line");

    let upper: PropertyName = "Flex-Flow".parse().unwrap();
    assert_eq!(upper, PropertyName::FlexFlow);

    assert!("text-decorations".parse::<PropertyName>().is_err());
}

#[test]
fn test_shorthand_wiring() {
    assert_eq!(
        PropertyName::TextDecoration.longhands(),
        &[
            PropertyName::TextDecorationLine,
            PropertyName::TextDecorationStyle,
            PropertyName::TextDecorationColor,
        ]
    );
    assert_eq!(
        PropertyName::OutlineWidth.shorthand(),
        Some(PropertyName::Outline)
    );
    assert!(PropertyName::Color.longhands().is_empty());
    assert!(ShorthandProperty::new(PropertyName::Color).is_none());
}

#[test]
fn test_flags() {
    assert_eq!(
        PropertyName::Color.flags(),
        PropertyFlags {
            inherited: true,
            animatable: true,
            shorthand: false,
        }
    );
    assert!(PropertyName::TextDecoration.flags().shorthand);
    assert!(!PropertyName::TextDecorationLine.flags().inherited);
}

#[test]
fn test_longhand_state_machine() {
    let mut property = CssProperty::new(PropertyName::TextDecorationStyle);
    assert!(!property.has_value());
    assert_eq!(property.serialize(), "");

    assert!(property.validate(&values("wavy")));
    assert!(property.has_value());
    assert_eq!(property.serialize(), "wavy");

    // An invalid value leaves the previous one in place.
    assert!(!property.validate(&values("bogus")));
    assert_eq!(property.serialize(), "wavy");

    property.clear();
    assert!(!property.has_value());
}

#[test]
fn test_longhand_grammars() {
    let cases = [
        (PropertyName::TextDecorationLine, "none", true),
        (PropertyName::TextDecorationLine, "underline overline", true),
        (PropertyName::TextDecorationLine, "none underline", false),
        (PropertyName::TextDecorationLine, "underline underline", false),
        (PropertyName::OutlineWidth, "thick", true),
        (PropertyName::OutlineWidth, "3px", true),
        (PropertyName::OutlineWidth, "-3px", false),
        (PropertyName::OutlineColor, "invert", true),
        (PropertyName::OutlineColor, "auto", false),
        (PropertyName::OutlineStyle, "auto", true),
        (PropertyName::OutlineStyle, "hidden", false),
        (PropertyName::ColumnRuleStyle, "hidden", true),
        (PropertyName::ColumnRuleStyle, "groove", true),
        (PropertyName::ColumnRuleColor, "invert", false),
        (PropertyName::FlexDirection, "row-reverse", true),
        (PropertyName::FlexWrap, "wrap-reverse", true),
        (PropertyName::Display, "inline-block", true),
        (PropertyName::Width, "50%", true),
        (PropertyName::Width, "auto", true),
        (PropertyName::Color, "#12345", false),
    ];
    for (name, text, valid) in cases {
        let Ok(input) = parse_value_list(text) else {
            assert!(!valid, "{name}: '{text}' did not lex");
            continue;
        };
        let mut property = CssProperty::new(name);
        assert_eq!(property.validate(&input), valid, "{name}: '{text}'");
    }
}

#[test]
fn test_text_decoration_round_trip() {
    let mut block = text_decoration_block();
    assert!(text_decoration().validate(&mut block, &values("underline solid red")));

    assert_eq!(
        value_of(&block, PropertyName::TextDecorationLine).as_deref(),
        Some("underline")
    );
    assert_eq!(
        value_of(&block, PropertyName::TextDecorationStyle).as_deref(),
        Some("solid")
    );
    assert_eq!(
        value_of(&block, PropertyName::TextDecorationColor).as_deref(),
        Some("red")
    );
    assert_eq!(text_decoration().serialize(&block), "underline solid red");
}

#[test]
fn test_serialize_uses_canonical_order() {
    let mut block = text_decoration_block();
    assert!(text_decoration().validate(&mut block, &values("red underline solid")));
    assert_eq!(text_decoration().serialize(&block), "underline solid red");
}

#[test]
fn test_validate_is_atomic() {
    let mut block = text_decoration_block();
    assert!(text_decoration().validate(&mut block, &values("overline dotted blue")));
    let before = block.clone();

    assert!(!text_decoration().validate(&mut block, &values("underline bogus")));
    assert!(!text_decoration().validate(&mut block, &values("bogus")));
    assert!(!text_decoration().validate(&mut block, &[]));
    assert_eq!(block, before);
}

#[test]
fn test_absent_components_leave_longhands_unchanged() {
    let mut block = text_decoration_block();
    assert!(text_decoration().validate(&mut block, &values("underline solid red")));
    assert!(text_decoration().validate(&mut block, &values("wavy")));

    assert_eq!(text_decoration().serialize(&block), "underline wavy red");
}

#[test]
fn test_serialize_skips_unset_longhands() {
    let mut block = text_decoration_block();
    assert_eq!(text_decoration().serialize(&block), "");

    assert!(text_decoration().validate(&mut block, &values("blue line-through")));
    assert_eq!(text_decoration().serialize(&block), "line-through blue");
}

#[test]
fn test_serialize_with_missing_longhand_slot_is_empty() {
    let mut block = text_decoration_block();
    assert!(text_decoration().validate(&mut block, &values("underline solid red")));

    let _ = block.remove_property(PropertyName::TextDecorationColor);
    assert_eq!(text_decoration().serialize(&block), "");
}

#[test]
fn test_try_validate_reports_missing_longhand() {
    let mut block = DeclarationBlock::new();
    let _ = block.insert(PropertySlot::Longhand(CssProperty::new(
        PropertyName::TextDecorationLine,
    )));

    let result = text_decoration().try_validate(&mut block, &values("underline"));
    assert_eq!(
        result,
        Err(CssError::MissingLonghand {
            shorthand: PropertyName::TextDecoration,
            longhand: PropertyName::TextDecorationStyle,
        })
    );
    // Nothing was written.
    assert_eq!(value_of(&block, PropertyName::TextDecorationLine), None);
}

#[test]
#[should_panic(expected = "requires longhand")]
fn test_validate_panics_on_missing_longhand() {
    let mut block = DeclarationBlock::new();
    let _ = text_decoration().validate(&mut block, &values("underline"));
}

#[test]
fn test_other_shorthands() {
    let mut block = DeclarationBlock::with_properties(&[
        PropertyName::Outline,
        PropertyName::ColumnRule,
        PropertyName::FlexFlow,
    ]);

    let outline = ShorthandProperty::new(PropertyName::Outline).unwrap();
    assert!(outline.validate(&mut block, &values("2px dashed green")));
    assert_eq!(outline.serialize(&block), "green dashed 2px");

    let column_rule = ShorthandProperty::new(PropertyName::ColumnRule).unwrap();
    assert!(column_rule.validate(&mut block, &values("#ff0000 thin solid")));
    assert_eq!(column_rule.serialize(&block), "thin solid #ff0000");

    let flex_flow = ShorthandProperty::new(PropertyName::FlexFlow).unwrap();
    assert!(flex_flow.validate(&mut block, &values("wrap column")));
    assert_eq!(flex_flow.serialize(&block), "column wrap");
    assert!(!flex_flow.validate(&mut block, &values("row column")));
}

#[test]
fn test_outline_auto_is_a_style() {
    let mut block = DeclarationBlock::with_properties(&[PropertyName::Outline]);
    let outline = ShorthandProperty::new(PropertyName::Outline).unwrap();

    assert!(outline.validate(&mut block, &values("auto")));
    assert_eq!(value_of(&block, PropertyName::OutlineStyle).as_deref(), Some("auto"));
    assert_eq!(value_of(&block, PropertyName::OutlineColor), None);

    assert!(outline.validate(&mut block, &values("red auto 1px")));
    assert_eq!(outline.serialize(&block), "red auto 1px");
}
