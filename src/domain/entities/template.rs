//! Template Entity
//!
//! A text document with `${NAME}` placeholder tokens. `NAME` must match
//! `[A-Z_][A-Z0-9_]*`; anything else is literal text.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use super::InputSet;

/// A parsed piece of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder { name: String, line: usize },
}

/// A placeholder left in the output because no input could fill it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedPlaceholder {
    pub name: String,
    /// 1-based lines where the token occurs
    pub lines: Vec<usize>,
}

/// Parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

/// Result of filling a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materialized {
    pub content: String,
    pub unmatched: Vec<UnmatchedPlaceholder>,
}

impl Template {
    pub fn parse(text: &str) -> Self {
        let mut segments: Vec<Segment> = Vec::new();
        let mut literal = String::new();
        let mut line = 1;
        let mut rest = text;

        while !rest.is_empty() {
            if let Some(name) = placeholder_at(rest) {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder {
                    name: name.to_string(),
                    line,
                });
                rest = &rest[name.len() + 3..];
                continue;
            }

            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                if c == '\n' {
                    line += 1;
                }
                literal.push(c);
            }
            rest = chars.as_str();
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Distinct placeholder names in first-seen order
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Placeholder { name, .. } = segment {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Replace every placeholder that has a non-blank input value.
    ///
    /// Single pass: substituted values are never scanned for tokens.
    pub fn substitute(&self, inputs: &InputSet) -> Materialized {
        let mut content = String::new();
        let mut unmatched: Vec<UnmatchedPlaceholder> = Vec::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => content.push_str(text),
                Segment::Placeholder { name, line } => {
                    let value = inputs
                        .get_by_name(name)
                        .filter(|v| !v.is_blank())
                        .map(|v| v.expose());
                    match value {
                        Some(value) => content.push_str(value),
                        None => {
                            content.push_str(&format!("${{{}}}", name));
                            match unmatched.iter_mut().find(|u| &u.name == name) {
                                Some(entry) => {
                                    if !entry.lines.contains(line) {
                                        entry.lines.push(*line);
                                    }
                                }
                                None => unmatched.push(UnmatchedPlaceholder {
                                    name: name.clone(),
                                    lines: vec![*line],
                                }),
                            }
                        }
                    }
                }
            }
        }

        Materialized { content, unmatched }
    }

    /// Recover placeholder values from a materialized artifact.
    ///
    /// Returns `None` when the artifact does not fit the template, when two
    /// placeholders are adjacent (the split is ambiguous), or when a repeated
    /// placeholder was filled with different values. A value may contain the
    /// literal that follows it; later occurrences are tried before giving up.
    pub fn extract(&self, artifact: &str) -> Option<BTreeMap<String, String>> {
        let mut values: BTreeMap<String, String> = BTreeMap::new();
        if self.match_from(artifact, 0, 0, &mut values) {
            Some(values)
        } else {
            None
        }
    }

    fn match_from(
        &self,
        artifact: &str,
        index: usize,
        pos: usize,
        values: &mut BTreeMap<String, String>,
    ) -> bool {
        let Some(segment) = self.segments.get(index) else {
            return pos == artifact.len();
        };

        match segment {
            Segment::Literal(text) => {
                artifact[pos..].starts_with(text.as_str())
                    && self.match_from(artifact, index + 1, pos + text.len(), values)
            }
            Segment::Placeholder { name, .. } => {
                let ends: Vec<usize> = match self.segments.get(index + 1) {
                    None => vec![artifact.len()],
                    Some(Segment::Literal(next)) => artifact[pos..]
                        .match_indices(next.as_str())
                        .map(|(offset, _)| pos + offset)
                        .collect(),
                    Some(Segment::Placeholder { .. }) => return false,
                };

                for end in ends {
                    let value = &artifact[pos..end];
                    let inserted = match values.get(name) {
                        Some(existing) if existing != value => continue,
                        Some(_) => false,
                        None => {
                            values.insert(name.clone(), value.to_string());
                            true
                        }
                    };
                    if self.match_from(artifact, index + 1, end, values) {
                        return true;
                    }
                    if inserted {
                        values.remove(name);
                    }
                }
                false
            }
        }
    }
}

impl Materialized {
    /// `sha256:<hex>` of the artifact bytes
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.content.as_bytes());
        format!("sha256:{:x}", hasher.finalize())
    }

    pub fn is_complete(&self) -> bool {
        self.unmatched.is_empty()
    }

    pub fn unmatched_names(&self) -> Vec<String> {
        self.unmatched.iter().map(|u| u.name.clone()).collect()
    }

    /// Check that the artifact is well-formed YAML.
    ///
    /// The error message comes from the YAML parser, which reports positions
    /// but never echoes scalar contents.
    pub fn validate_yaml(&self) -> Result<(), String> {
        serde_yaml_ng::from_str::<serde_yaml_ng::Value>(&self.content)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// Placeholder name if `text` starts with a well-formed `${NAME}` token
fn placeholder_at(text: &str) -> Option<&str> {
    let body = text.strip_prefix("${")?;
    let end = body.find('}')?;
    let name = &body[..end];

    let mut chars = name.chars();
    let first = chars.next()?;
    if !(first.is_ascii_uppercase() || first == '_') {
        return None;
    }
    if !chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_') {
        return None;
    }
    Some(name)
}
