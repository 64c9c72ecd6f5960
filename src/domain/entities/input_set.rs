//! Input Set Entity
//!
//! The values a template is materialized from. Assembled once per run and
//! read-only afterwards.

use std::collections::BTreeMap;

use crate::domain::value_objects::{InputKey, SecretValue, REDACTED};
use crate::error::{StampError, StampResult};

/// Mapping from input key to value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSet {
    values: BTreeMap<InputKey, SecretValue>,
}

impl InputSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble from any name lookup (usually `std::env::var`).
    ///
    /// Only keys that are externally supplied are read here. `PROJECT_NUMBER`
    /// is always derived, so an ambient value for it is ignored.
    pub fn from_source(source: impl Fn(&str) -> Option<String>) -> Self {
        let mut set = Self::new();
        for key in InputKey::ALL {
            if key == InputKey::ProjectNumber {
                continue;
            }
            if let Some(value) = source(key.name()) {
                set.insert(key, value);
            }
        }
        set
    }

    /// Assemble from the process environment
    pub fn from_env() -> Self {
        Self::from_source(|name| std::env::var(name).ok())
    }

    pub fn insert(&mut self, key: InputKey, value: impl Into<SecretValue>) {
        self.values.insert(key, value.into());
    }

    /// Builder-style insert
    pub fn with(mut self, key: InputKey, value: impl Into<SecretValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: InputKey) -> Option<&SecretValue> {
        self.values.get(&key)
    }

    /// Value for a non-blank entry
    pub fn present(&self, key: InputKey) -> Option<&str> {
        self.values
            .get(&key)
            .filter(|v| !v.is_blank())
            .map(SecretValue::expose)
    }

    /// Look up by placeholder name
    pub fn get_by_name(&self, name: &str) -> Option<&SecretValue> {
        InputKey::from_name(name).and_then(|k| self.get(k))
    }

    /// Required keys that are absent or blank, in declaration order
    pub fn missing_required(&self) -> Vec<InputKey> {
        InputKey::REQUIRED
            .into_iter()
            .filter(|k| self.present(*k).is_none())
            .collect()
    }

    /// Fail with `MissingConfiguration` naming every missing required key
    pub fn validate_required(&self) -> StampResult<()> {
        let missing = self.missing_required();
        if missing.is_empty() {
            return Ok(());
        }
        Err(StampError::MissingConfiguration {
            keys: missing.iter().map(|k| k.name().to_string()).collect(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (InputKey, &SecretValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replace every non-blank secret value occurring in `text` with `***`.
    ///
    /// Longer values are replaced first so a secret that contains another
    /// secret is fully masked.
    pub fn redact(&self, text: &str) -> String {
        let mut secrets: Vec<&str> = self
            .values
            .iter()
            .filter(|(k, v)| k.is_secret() && !v.is_blank())
            .map(|(_, v)| v.expose())
            .collect();
        secrets.sort_by_key(|s| std::cmp::Reverse(s.len()));

        let mut out = text.to_string();
        for secret in secrets {
            out = out.replace(secret, REDACTED);
        }
        out
    }
}
