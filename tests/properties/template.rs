//! Property tests for template parsing and substitution.

use proptest::prelude::*;

use stamp::{InputKey, InputSet, Template};

/// Literal text that can never occur inside a generated value
fn separator() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ :\n#/\"]{1,6}").unwrap()
}

fn value() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9-]{1,16}").unwrap()
}

fn key() -> impl Strategy<Value = InputKey> {
    proptest::sample::select(InputKey::ALL.to_vec())
}

fn full_inputs() -> impl Strategy<Value = InputSet> {
    proptest::collection::vec(value(), 5).prop_map(|values| {
        InputKey::ALL
            .into_iter()
            .zip(values)
            .fold(InputSet::new(), |set, (key, value)| set.with(key, value))
    })
}

/// Template text alternating literals and known placeholders, never two
/// placeholders in a row
fn template_text() -> impl Strategy<Value = String> {
    (
        proptest::option::of(separator()),
        proptest::collection::vec((key(), separator()), 0..=10),
    )
        .prop_map(|(prefix, parts)| {
            let mut text = prefix.unwrap_or_default();
            for (key, sep) in parts {
                text.push_str(&format!("${{{}}}", key.name()));
                text.push_str(&sep);
            }
            text
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: with every input present, no `${` token survives.
    #[test]
    fn property_complete_inputs_leave_no_tokens(
        text in template_text(),
        inputs in full_inputs(),
    ) {
        let materialized = Template::parse(&text).substitute(&inputs);

        prop_assert!(materialized.is_complete());
        prop_assert!(
            !materialized.content.contains("${"),
            "placeholder token left in {:?}",
            materialized.content
        );
    }

    /// PROPERTY: substitute then extract recovers exactly the values used.
    #[test]
    fn property_extract_round_trip(
        text in template_text(),
        inputs in full_inputs(),
    ) {
        let template = Template::parse(&text);
        let materialized = template.substitute(&inputs);

        let extracted = template
            .extract(&materialized.content)
            .expect("artifact produced from the template must fit it");

        for name in template.placeholders() {
            let expected = inputs.get_by_name(name).unwrap().expose();
            prop_assert_eq!(extracted.get(name).map(String::as_str), Some(expected));
        }
        prop_assert_eq!(extracted.len(), template.placeholders().len());
    }

    /// PROPERTY: materialization is deterministic.
    #[test]
    fn property_substitution_is_deterministic(
        text in template_text(),
        inputs in full_inputs(),
    ) {
        let first = Template::parse(&text).substitute(&inputs);
        let second = Template::parse(&text).substitute(&inputs);

        prop_assert_eq!(&first.content, &second.content);
        prop_assert_eq!(first.digest(), second.digest());
    }

    /// PROPERTY: with no inputs, any text comes back unchanged.
    #[test]
    fn property_empty_inputs_are_identity(text in "(?s).{0,256}") {
        let materialized = Template::parse(&text).substitute(&InputSet::new());
        prop_assert_eq!(materialized.content, text);
    }

    /// PROPERTY: parsing and extracting never panic on arbitrary input.
    #[test]
    fn property_parse_and_extract_never_panic(
        template in "(?s).{0,128}",
        artifact in "(?s).{0,128}",
    ) {
        let template = Template::parse(&template);
        let _ = template.placeholders();
        let _ = template.extract(&artifact);
    }
}
