use bevy_console_overloads::core::{
    ArgumentParser, ConvertContext, ConversionError, Converter, ConverterChain, IntConverter,
    LITERAL_COLORS, ParseError, Value, validate_identifier,
};
use proptest::prelude::*;

fn int_literal() -> impl Strategy<Value = String> {
    any::<i32>().prop_map(|n| n.to_string())
}

fn float_literal() -> impl Strategy<Value = String> {
    (-10_000i32..10_000, "[0-9]{1,4}").prop_map(|(whole, frac)| format!("{whole}.{frac}"))
}

fn number() -> impl Strategy<Value = String> {
    prop_oneof![(-100i32..100).prop_map(|n| n.to_string()), float_literal()]
}

fn tuple(arity: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(number(), arity).prop_map(|parts| parts.join(", "))
}

fn identifier() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z][A-Za-z0-9]{0,8}")
        .unwrap()
        .prop_filter("reserved words are not identifiers", |s| validate_identifier(s).is_ok())
}

fn scalar_literal() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("null".to_string()),
        Just("Null".to_string()),
        int_literal(),
        float_literal(),
        "[a-zA-Z0-9 ]{0,12}".prop_map(|s| format!("\"{s}\"")),
        prop_oneof![Just("true"), Just("false"), Just("True"), Just("False")].prop_map(str::to_string),
        "[a-z ]".prop_map(|c| format!("'{c}'")),
        identifier(),
    ]
}

fn structured_literal() -> impl Strategy<Value = String> {
    prop_oneof![
        tuple(2).prop_map(|t| format!("({t})")),
        tuple(3).prop_map(|t| format!("({t})")),
        tuple(4).prop_map(|t| format!("({t})")),
        tuple(3).prop_map(|t| format!("rgb({t})")),
        tuple(4).prop_map(|t| format!("rgba({t})")),
        "#[0-9A-Fa-f]{6}",
        "#[0-9A-Fa-f]{8}",
        proptest::sample::select(LITERAL_COLORS).prop_map(|(name, _)| name.to_string()),
        "[A-Za-z ]{1,10}".prop_map(|name| format!("{{{name}}}")),
    ]
}

/// One well-formed literal of any syntax the standard chain knows.
fn literal() -> impl Strategy<Value = String> {
    prop_oneof![scalar_literal(), structured_literal()]
}

fn recognizers<'a>(chain: &'a ConverterChain, input: &str) -> Vec<&'a dyn Converter> {
    chain.iter().filter(|c| c.recognize(input).is_some()).collect()
}

fn parse(chain: ConverterChain, params: &str) -> Result<Vec<Value>, ParseError> {
    ArgumentParser::new(chain).parse(params, &mut ()).map(|p| p.values)
}

/// Treats every non-whitespace run as a string.
struct WordConverter;

impl Converter for WordConverter {
    fn name(&self) -> &'static str {
        "word"
    }

    fn recognize<'a>(&self, input: &'a str) -> Option<(&'a str, &'a str)> {
        let end = input.find(char::is_whitespace).unwrap_or(input.len());
        (end > 0).then(|| input.split_at(end))
    }

    fn convert(&self, token: &str, _ctx: &mut ConvertContext) -> Result<Value, ConversionError> {
        Ok(Value::String(token.to_string()))
    }
}

#[test]
fn standard_chain_order() {
    let names: Vec<_> = ConverterChain::standard().names().collect();
    assert_eq!(
        names,
        vec![
            "null", "float", "string", "bool", "char", "int", "vec2", "vec3", "vec4", "rgb", "rgba",
            "html", "object", "variable",
        ]
    );
}

proptest! {
    #[test]
    fn every_literal_has_exactly_one_recognizer(token in literal()) {
        let chain = ConverterChain::standard();
        let names: Vec<_> = recognizers(&chain, &token).iter().map(|c| c.name()).collect();
        prop_assert_eq!(names.len(), 1, "{:?} recognized by {:?}", token, names);
    }

    #[test]
    fn glued_suffix_breaks_recognition(
        token in literal(),
        suffix in prop_oneof![Just('#'), Just('('), Just(')'), Just('"'), Just('\''), Just('{'), Just(','), Just('!')],
    ) {
        let chain = ConverterChain::standard();
        let glued = format!("{token}{suffix}");
        for converter in recognizers(&chain, &token) {
            prop_assert!(
                converter.recognize(&glued).is_none(),
                "{} still recognized {:?}",
                converter.name(),
                glued
            );
        }
    }

    #[test]
    fn literal_followed_by_whitespace_is_one_token(token in literal(), gap in "[ \t]{1,3}") {
        let chain = ConverterChain::standard();
        let input = format!("{token}{gap}rest");
        let recognized: Vec<_> = chain
            .iter()
            .filter_map(|c| c.recognize(&input))
            .collect();
        prop_assert_eq!(recognized.len(), 1);
        prop_assert_eq!(recognized[0].0, token.as_str());
    }

    #[test]
    fn int_boundary(n in any::<i32>(), c in "[a-zA-Z_.]") {
        let text = n.to_string();
        prop_assert_eq!(IntConverter.recognize(&text), Some((text.as_str(), "")));
        let suffixed = format!("{text}{c}");
        prop_assert!(IntConverter.recognize(&suffixed).is_none());
    }

    #[test]
    fn float_literal_is_never_split(literal in float_literal()) {
        let expected: f32 = literal.parse().unwrap();
        prop_assert_eq!(parse(ConverterChain::standard(), &literal), Ok(vec![Value::Float(expected)]));
    }

    #[test]
    fn first_match_wins(n in -1000i32..1000) {
        let text = n.to_string();
        prop_assert_eq!(parse(ConverterChain::standard(), &text), Ok(vec![Value::Int(n)]));

        let mut converters: Vec<Box<dyn Converter>> = vec![Box::new(WordConverter)];
        converters.extend(ConverterChain::standard().into_converters());
        let shadowed = ConverterChain::from_converters(converters);
        prop_assert_eq!(parse(shadowed, &text), Ok(vec![Value::String(text.clone())]));
    }

    #[test]
    fn parsing_keeps_value_count(tokens in proptest::collection::vec(literal(), 0..6)) {
        let line = tokens.join(" ");
        let values = parse(ConverterChain::standard(), &line).unwrap();
        prop_assert_eq!(values.len(), tokens.len());
    }
}
