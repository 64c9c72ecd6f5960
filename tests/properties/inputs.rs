//! Property tests for input validation and redaction.

use proptest::prelude::*;

use stamp::{InputKey, InputSet, StampError};

fn secret() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-]{3,24}").unwrap()
}

/// For each required key: a value, blank, or absent
fn maybe_value() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        secret().prop_map(Some),
        Just(Some(String::new())),
        Just(Some("  ".to_string())),
        Just(None),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: validation fails exactly when a required value is missing
    /// or blank, and names every such key in declaration order.
    #[test]
    fn property_missing_inputs_are_all_reported(
        values in proptest::collection::vec(maybe_value(), 3),
    ) {
        let mut inputs = InputSet::new();
        let mut expected = Vec::new();
        for (key, value) in InputKey::REQUIRED.into_iter().zip(&values) {
            match value {
                Some(v) if !v.trim().is_empty() => inputs.insert(key, v.clone()),
                Some(v) => {
                    inputs.insert(key, v.clone());
                    expected.push(key.name().to_string());
                }
                None => expected.push(key.name().to_string()),
            }
        }

        match inputs.validate_required() {
            Ok(()) => prop_assert!(expected.is_empty()),
            Err(StampError::MissingConfiguration { keys }) => prop_assert_eq!(keys, expected),
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    /// PROPERTY: redaction removes every secret value from arbitrary text.
    #[test]
    fn property_redact_never_leaks(
        token in secret(),
        signing in secret(),
        sheet in secret(),
        noise in "[ a-z:=,\n]{0,40}",
    ) {
        let inputs = InputSet::new()
            .with(InputKey::SlackBotToken, token.clone())
            .with(InputKey::SlackSigningSecret, signing.clone())
            .with(InputKey::SpreadsheetKey, sheet.clone());

        let text = format!("{noise}{token} {signing}{noise}{sheet},{token}");
        let redacted = inputs.redact(&text);

        prop_assert!(!redacted.contains(&token));
        prop_assert!(!redacted.contains(&signing));
        prop_assert!(!redacted.contains(&sheet));
    }
}
