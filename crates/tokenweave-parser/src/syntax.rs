//! Value syntax: references and dimensions.
//!
//! Token values are plain strings, so the grammar is small:
//!
//! ```text
//! reference := "{" path "}"        (the whole string, nothing around it)
//! path      := [^{}]+
//! dimension := "-"? [0-9.]+ unit
//! unit      := [A-Za-z%]*
//! ```
//!
//! Anything containing a brace that is not exactly one reference is
//! malformed. Anything else is a literal.

use winnow::{
    Parser as _,
    combinator::{delimited, opt},
    error::{ContextError, ErrMode},
    token::{take_till, take_while},
};

use tokenweave_core::{
    path::TokenPath,
    value::{Dimension, TokenValue},
};

type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Classification of an authored token value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueSyntax {
    /// A literal value, returned unchanged by the resolver.
    Literal,
    /// A full-string single reference to another token.
    Reference(TokenPath),
    /// A value containing braces that is not a single full-string reference.
    Malformed,
}

/// Classifies a value as literal, reference, or malformed.
///
/// # Examples
///
/// ```
/// use tokenweave_core::{path::TokenPath, value::TokenValue};
/// use tokenweave_parser::syntax::{ValueSyntax, classify};
///
/// assert_eq!(classify(&TokenValue::from("#000000")), ValueSyntax::Literal);
/// assert_eq!(
///     classify(&TokenValue::from("{color.rawColors.black}")),
///     ValueSyntax::Reference(TokenPath::parse("color.rawColors.black"))
/// );
/// assert_eq!(classify(&TokenValue::from("{a} {b}")), ValueSyntax::Malformed);
/// ```
pub fn classify(value: &TokenValue) -> ValueSyntax {
    let Some(text) = value.as_text() else {
        return ValueSyntax::Literal;
    };

    if !text.contains(['{', '}']) {
        return ValueSyntax::Literal;
    }

    match parse_reference(text) {
        Some(path) => ValueSyntax::Reference(path),
        None => ValueSyntax::Malformed,
    }
}

/// Parses a string that consists of exactly one `{dotted.path}` reference.
pub fn parse_reference(text: &str) -> Option<TokenPath> {
    let mut input = text.trim();
    let inner = reference.parse_next(&mut input).ok()?;
    if !input.is_empty() {
        return None;
    }

    let path = TokenPath::parse(inner);
    (!path.is_empty()).then_some(path)
}

/// Parses a number with an optional unit suffix such as `16px` or `1.5`.
///
/// Returns `None` for anything else, including values with trailing text.
pub fn parse_dimension(text: &str) -> Option<Dimension> {
    let mut input = text.trim();
    let (amount, unit) = (number, unit).parse_next(&mut input).ok()?;
    if !input.is_empty() {
        return None;
    }

    let amount = amount.parse::<f64>().ok()?;
    Some(Dimension::new(amount, unit))
}

/// Returns the dimension form of a value, treating JSON numbers as unitless.
pub fn value_dimension(value: &TokenValue) -> Option<Dimension> {
    match value {
        TokenValue::Number(number) => Some(Dimension::new(*number, "")),
        TokenValue::Text(text) => parse_dimension(text),
    }
}

fn reference<'src>(input: &mut &'src str) -> IResult<&'src str> {
    delimited('{', take_till(1.., ['{', '}']), '}').parse_next(input)
}

fn number<'src>(input: &mut &'src str) -> IResult<&'src str> {
    (
        opt('-'),
        take_while(1.., |c: char| c.is_ascii_digit() || c == '.'),
    )
        .take()
        .parse_next(input)
}

fn unit<'src>(input: &mut &'src str) -> IResult<&'src str> {
    take_while(0.., |c: char| c.is_ascii_alphabetic() || c == '%').parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_literals() {
        assert_eq!(classify(&TokenValue::from("#2196F3")), ValueSyntax::Literal);
        assert_eq!(classify(&TokenValue::from("16px")), ValueSyntax::Literal);
        assert_eq!(classify(&TokenValue::Number(700.0)), ValueSyntax::Literal);
    }

    #[test]
    fn test_classify_reference() {
        assert_eq!(
            classify(&TokenValue::from("{B}")),
            ValueSyntax::Reference(TokenPath::parse("B"))
        );
        assert_eq!(
            classify(&TokenValue::from(" { color.a } ")),
            ValueSyntax::Reference(TokenPath::parse("color.a"))
        );
    }

    #[test]
    fn test_classify_malformed() {
        for value in ["{}", "{a}{b}", "prefix {a}", "{a} suffix", "{a", "a}", "{{a}}", "{.}"] {
            assert_eq!(
                classify(&TokenValue::from(value)),
                ValueSyntax::Malformed,
                "value `{value}` should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("16px"), Some(Dimension::new(16.0, "px")));
        assert_eq!(parse_dimension("1.5"), Some(Dimension::new(1.5, "")));
        assert_eq!(parse_dimension("-2rem"), Some(Dimension::new(-2.0, "rem")));
        assert_eq!(parse_dimension("100%"), Some(Dimension::new(100.0, "%")));
    }

    #[test]
    fn test_parse_dimension_rejects_other_text() {
        assert_eq!(parse_dimension("#2196F3"), None);
        assert_eq!(parse_dimension("Inter"), None);
        assert_eq!(parse_dimension("16px solid"), None);
        assert_eq!(parse_dimension("1.2.3px"), None);
    }

    #[test]
    fn test_value_dimension_for_numbers() {
        assert_eq!(
            value_dimension(&TokenValue::Number(700.0)),
            Some(Dimension::new(700.0, ""))
        );
    }
}
