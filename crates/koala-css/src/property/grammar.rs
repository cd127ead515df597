//! Value grammars for the supported properties.
//!
//! Longhands convert to a single [`CssValue`]; shorthands convert to one
//! optional component per longhand, in [`PropertyName::longhands`] order.

use crate::converter::{
    ColorConverter, Keyword, LengthConverter, OneOrMore, Or, Val, ValueConverter, WithAny,
};
use crate::error::ConversionFailure;
use crate::values::CssValue;

use super::PropertyName;

type LonghandGrammar = dyn ValueConverter<Output = CssValue> + Sync;

/// [CSS Text Decoration § 2.1](https://www.w3.org/TR/css-text-decor-3/#text-decoration-line-property)
///
/// "none | [ underline || overline || line-through || blink ]"
static TEXT_DECORATION_LINE: Or<Keyword, Val<OneOrMore<Keyword>>> = Or(
    Keyword::new(&["none"]),
    Val(OneOrMore(Keyword::new(&[
        "underline",
        "overline",
        "line-through",
        "blink",
    ]))),
);

/// [CSS Text Decoration § 2.2](https://www.w3.org/TR/css-text-decor-3/#text-decoration-style-property)
static TEXT_DECORATION_STYLE: Keyword =
    Keyword::new(&["solid", "double", "dotted", "dashed", "wavy"]);

/// [CSS Backgrounds § 4.2](https://www.w3.org/TR/css-backgrounds-3/#typedef-line-style)
///
/// "`<line-style>` = none | hidden | dotted | dashed | solid | double | groove | ridge | inset | outset"
static LINE_STYLE: Keyword = Keyword::new(&[
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
]);

/// [CSS Backgrounds § 4.3](https://www.w3.org/TR/css-backgrounds-3/#typedef-line-width)
///
/// "`<line-width>` = `<length [0,∞]>` | thin | medium | thick"
static LINE_WIDTH: Or<Keyword, LengthConverter> = Or(
    Keyword::new(&["thin", "medium", "thick"]),
    LengthConverter::NON_NEGATIVE,
);

/// [CSS UI § 5.3](https://www.w3.org/TR/css-ui-4/#outline-style)
///
/// "auto | `<outline-line-style>`", where `<outline-line-style>` is
/// `<line-style>` without `hidden`.
static OUTLINE_STYLE: Keyword = Keyword::new(&[
    "auto", "none", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
]);

/// [CSS UI § 5.4](https://www.w3.org/TR/css-ui-4/#outline-color)
///
/// `<color>` or the legacy `invert`. `auto` belongs to `outline-style`, so
/// the shorthand hands it there.
static OUTLINE_COLOR: Or<Keyword, ColorConverter> =
    Or(Keyword::new(&["invert"]), ColorConverter);

/// [CSS Flexbox § 5.1](https://www.w3.org/TR/css-flexbox-1/#flex-direction-property)
static FLEX_DIRECTION: Keyword = Keyword::new(&["row", "row-reverse", "column", "column-reverse"]);

/// [CSS Flexbox § 5.2](https://www.w3.org/TR/css-flexbox-1/#flex-wrap-property)
static FLEX_WRAP: Keyword = Keyword::new(&["nowrap", "wrap", "wrap-reverse"]);

/// [CSS Display § 2](https://www.w3.org/TR/css-display-3/#the-display-properties), the
/// commonly used single-keyword values.
static DISPLAY: Keyword = Keyword::new(&[
    "none",
    "block",
    "inline",
    "inline-block",
    "flex",
    "inline-flex",
    "grid",
    "inline-grid",
    "list-item",
    "table",
    "contents",
]);

/// [CSS Sizing § 3.2](https://www.w3.org/TR/css-sizing-3/#preferred-size-properties)
static WIDTH: Or<Keyword, LengthConverter> = Or(
    Keyword::new(&["auto"]),
    LengthConverter::NON_NEGATIVE.with_percentages(),
);

static COLOR: ColorConverter = ColorConverter;

/// The grammar of a longhand, or `None` for shorthands.
pub(crate) fn longhand_grammar(name: PropertyName) -> Option<&'static LonghandGrammar> {
    let grammar: &'static LonghandGrammar = match name {
        PropertyName::Color
        | PropertyName::TextDecorationColor
        | PropertyName::ColumnRuleColor => &COLOR,
        PropertyName::Display => &DISPLAY,
        PropertyName::Width => &WIDTH,
        PropertyName::TextDecorationLine => &TEXT_DECORATION_LINE,
        PropertyName::TextDecorationStyle => &TEXT_DECORATION_STYLE,
        PropertyName::OutlineColor => &OUTLINE_COLOR,
        PropertyName::OutlineStyle => &OUTLINE_STYLE,
        PropertyName::ColumnRuleStyle => &LINE_STYLE,
        PropertyName::OutlineWidth | PropertyName::ColumnRuleWidth => &LINE_WIDTH,
        PropertyName::FlexDirection => &FLEX_DIRECTION,
        PropertyName::FlexWrap => &FLEX_WRAP,
        PropertyName::TextDecoration
        | PropertyName::Outline
        | PropertyName::ColumnRule
        | PropertyName::FlexFlow => return None,
    };
    Some(grammar)
}

/// Convert a whole longhand value.
pub(crate) fn parse_longhand(
    name: PropertyName,
    input: &[CssValue],
) -> Result<CssValue, ConversionFailure> {
    match longhand_grammar(name) {
        Some(grammar) => grammar.convert_all(input),
        None => Err(ConversionFailure::NoMatch {
            found: name.to_string(),
        }),
    }
}

/// Convert a whole shorthand value into one optional component per
/// longhand, in the shorthand's canonical longhand order.
pub(crate) fn parse_shorthand(
    name: PropertyName,
    input: &[CssValue],
) -> Result<Vec<Option<CssValue>>, ConversionFailure> {
    match name {
        // [CSS Text Decoration § 2.4](https://www.w3.org/TR/css-text-decor-3/#text-decoration-property)
        // "<'text-decoration-line'> || <'text-decoration-style'> || <'text-decoration-color'>"
        PropertyName::TextDecoration => {
            let (color, style, line) = WithAny((
                COLOR.val().optional(),
                TEXT_DECORATION_STYLE.val().optional(),
                TEXT_DECORATION_LINE.val().optional(),
            ))
            .convert_all(input)?;
            Ok(vec![line, style, color])
        }
        // [CSS UI § 5.1](https://www.w3.org/TR/css-ui-4/#outline)
        // "<'outline-width'> || <'outline-style'> || <'outline-color'>"
        PropertyName::Outline => {
            let (color, style, width) = WithAny((
                OUTLINE_COLOR.val().optional(),
                OUTLINE_STYLE.val().optional(),
                LINE_WIDTH.val().optional(),
            ))
            .convert_all(input)?;
            Ok(vec![color, style, width])
        }
        // [CSS Multi-column § 4.4](https://www.w3.org/TR/css-multicol-1/#column-rule)
        // "<'column-rule-width'> || <'column-rule-style'> || <'column-rule-color'>"
        PropertyName::ColumnRule => {
            let (width, style, color) = WithAny((
                LINE_WIDTH.val().optional(),
                LINE_STYLE.val().optional(),
                COLOR.val().optional(),
            ))
            .convert_all(input)?;
            Ok(vec![width, style, color])
        }
        // [CSS Flexbox § 5.3](https://www.w3.org/TR/css-flexbox-1/#flex-flow-property)
        // "<'flex-direction'> || <'flex-wrap'>"
        PropertyName::FlexFlow => {
            let (direction, wrap) = WithAny((
                FLEX_DIRECTION.val().optional(),
                FLEX_WRAP.val().optional(),
            ))
            .convert_all(input)?;
            Ok(vec![direction, wrap])
        }
        longhand => Err(ConversionFailure::NoMatch {
            found: longhand.to_string(),
        }),
    }
}
