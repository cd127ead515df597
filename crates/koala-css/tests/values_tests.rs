//! Tests for CSS value types and the declaration value lexer.

use koala_css::values::{ColorValue, CssValue, LengthValue, parse_value_list};
use koala_css::CssError;

#[test]
fn test_lex_keywords_numbers_and_dimensions() {
    let values = parse_value_list("  solid 2px -1.5em 50% 0 .5 ").unwrap();
    assert_eq!(
        values,
        [
            CssValue::keyword("solid"),
            CssValue::Dimension {
                value: 2.0,
                unit: "px".to_string()
            },
            CssValue::Dimension {
                value: -1.5,
                unit: "em".to_string()
            },
            CssValue::Percentage(50.0),
            CssValue::Number(0.0),
            CssValue::Number(0.5),
        ]
    );
}

#[test]
fn test_lex_hash_colors() {
    let values = parse_value_list("#FFF #00000080").unwrap();
    assert_eq!(values[0], CssValue::Color(ColorValue::WHITE));
    assert_eq!(
        values[1],
        CssValue::Color(ColorValue {
            r: 0,
            g: 0,
            b: 0,
            a: 128
        })
    );
    assert!(matches!(parse_value_list("#ggg"), Err(CssError::Syntax(_))));
}

#[test]
fn test_lex_functions_and_delimiters() {
    let values = parse_value_list("rgb(1, 2, 3) / a, b").unwrap();
    assert_eq!(
        values,
        [
            CssValue::Function {
                name: "rgb".to_string(),
                args: vec![
                    CssValue::Number(1.0),
                    CssValue::Number(2.0),
                    CssValue::Number(3.0)
                ],
            },
            CssValue::Delim('/'),
            CssValue::keyword("a"),
            CssValue::Delim(','),
            CssValue::keyword("b"),
        ]
    );
}

#[test]
fn test_lex_strings() {
    let values = parse_value_list(r#""a \"quoted\" word" 'single'"#).unwrap();
    assert_eq!(values[0], CssValue::String("a \"quoted\" word".to_string()));
    assert_eq!(values[1], CssValue::String("single".to_string()));
    assert_eq!(values[0].to_css(), r#""a \"quoted\" word""#);
}

#[test]
fn test_lex_errors() {
    for text in ["'open", "rgb(1, 2", "a ! b", "@x"] {
        assert!(
            matches!(parse_value_list(text), Err(CssError::Syntax(_))),
            "'{text}' should not lex"
        );
    }
    assert!(parse_value_list("   ").unwrap().is_empty());
}

#[test]
fn test_named_colors() {
    assert_eq!(
        ColorValue::from_named("Orange"),
        Some(ColorValue {
            r: 255,
            g: 165,
            b: 0,
            a: 255
        })
    );
    assert_eq!(ColorValue::from_named("transparent").map(|c| c.a), Some(0));
    assert!(ColorValue::is_color_keyword("CurrentColor"));
    assert!(!ColorValue::is_color_keyword("underline"));
    assert_eq!(CssValue::keyword("navy").to_color(), ColorValue::from_hex("000080"));
}

#[test]
fn test_length_display() {
    assert_eq!(LengthValue::Px(0.0).to_string(), "0");
    assert_eq!(LengthValue::Percent(0.0).to_string(), "0%");
    assert_eq!(LengthValue::Rem(1.25).to_string(), "1.25rem");
    assert_eq!(LengthValue::from_unit(3.0, "PT"), Some(LengthValue::Pt(3.0)));
    assert_eq!(LengthValue::from_unit(3.0, "cubits"), None);
}

#[test]
fn test_value_from_vec() {
    let single = CssValue::from(vec![CssValue::keyword("a")]);
    assert_eq!(single, CssValue::keyword("a"));

    let list = CssValue::from(vec![CssValue::keyword("a"), CssValue::keyword("b")]);
    assert_eq!(list.to_css(), "a b");
    assert!(CssValue::keyword("Solid").is_keyword("solid"));
}
