//! Environment variable validation with helpful error messages
//!
//! Provides consistent validation for environment variable values with:
//! - Clear warning messages for invalid values
//! - Levenshtein-based typo suggestions
//! - Fallback to default values

use std::io::Write;

/// Validator for environment variable values
pub struct EnvVarValidator<'a> {
    var_name: &'a str,
    valid_values: &'a [&'a str],
}

impl<'a> EnvVarValidator<'a> {
    pub fn new(var_name: &'a str, valid_values: &'a [&'a str]) -> Self {
        Self {
            var_name,
            valid_values,
        }
    }

    /// Parse a value, returning default if invalid (with warning on stderr)
    pub fn parse<T, F>(&self, value: &str, parser: F, default: T) -> T
    where
        F: Fn(&str) -> Option<T>,
    {
        self.parse_with_writer(value, parser, default, &mut std::io::stderr())
    }

    /// Parse with a custom writer (for testing)
    pub fn parse_with_writer<T, F, W>(
        &self,
        value: &str,
        parser: F,
        default: T,
        writer: &mut W,
    ) -> T
    where
        F: Fn(&str) -> Option<T>,
        W: Write,
    {
        match parser(value) {
            Some(parsed) => parsed,
            None => {
                let suggestion = self.suggest(value);
                let _ = writeln!(
                    writer,
                    "Warning: Invalid {} value '{}'{}",
                    self.var_name, value, suggestion
                );
                let _ = writeln!(writer, "Valid values: {}", self.valid_values.join(", "));
                default
            }
        }
    }

    fn suggest(&self, value: &str) -> String {
        let input = value.to_lowercase();
        match closest(&input, self.valid_values) {
            Some((suggested, dist)) if dist > 0 => format!(". Did you mean '{}'?", suggested),
            _ => String::new(),
        }
    }
}

/// Closest candidate within two edits
pub(crate) fn closest<'c>(input: &str, candidates: &[&'c str]) -> Option<(&'c str, usize)> {
    let mut best: Option<(&str, usize)> = None;
    for &candidate in candidates {
        let dist = levenshtein(input, candidate);
        match best {
            None => best = Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => best = Some((candidate, dist)),
            _ => {}
        }
    }
    best.filter(|(_, dist)| *dist <= 2)
}

/// Simple Levenshtein distance for typo detection
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    if a_bytes.is_empty() {
        return b_bytes.len();
    }
    if b_bytes.is_empty() {
        return a_bytes.len();
    }

    let mut prev_row: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_bytes.len() + 1];

    for (i, a_char) in a_bytes.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_bytes.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_bytes.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::UnmatchedPolicy;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("warn", "warn"), 0);
        assert_eq!(levenshtein("wran", "warn"), 2);
        assert_eq!(levenshtein("eror", "error"), 1);
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn test_env_validator_valid_value() {
        let validator = EnvVarValidator::new("STAMP_UNMATCHED", UnmatchedPolicy::VALID_VALUES);
        let result = validator.parse("error", UnmatchedPolicy::parse, UnmatchedPolicy::Warn);
        assert_eq!(result, UnmatchedPolicy::Error);
    }

    #[test]
    fn test_env_validator_invalid_value_warns_and_defaults() {
        let validator = EnvVarValidator::new("STAMP_UNMATCHED", UnmatchedPolicy::VALID_VALUES);
        let mut output = Vec::new();
        let result = validator.parse_with_writer(
            "eror",
            UnmatchedPolicy::parse,
            UnmatchedPolicy::Warn,
            &mut output,
        );
        assert_eq!(result, UnmatchedPolicy::Warn);

        let msg = String::from_utf8(output).unwrap();
        assert!(msg.contains("Warning: Invalid STAMP_UNMATCHED value 'eror'"));
        assert!(msg.contains("Did you mean 'error'?"), "got: {msg}");
        assert!(msg.contains("Valid values: warn, error"));
    }

    #[test]
    fn test_env_validator_no_suggestion_for_distant_value() {
        let validator = EnvVarValidator::new("TEST", &["warn", "error"]);
        let mut output = Vec::new();
        validator.parse_with_writer("something_else", |_| None, (), &mut output);

        let msg = String::from_utf8(output).unwrap();
        assert!(!msg.contains("Did you mean"), "got: {msg}");
    }
}
