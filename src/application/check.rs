//! Preflight check
//!
//! Read-only report on whether a deploy would succeed. Never writes the
//! artifact, never deploys, and never prints input values.

use std::path::Path;

use crate::config::Config;
use crate::domain::entities::{InputSet, Template};
use crate::domain::ports::{ArtifactStore, ProjectLookup};
use crate::domain::value_objects::InputKey;
use crate::infrastructure::is_git_ignored;

use super::pipeline::resolve_project_id;

/// Status of a check item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warning,
    Error,
}

impl CheckStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckStatus::Pass => "pass",
            CheckStatus::Warning => "warn",
            CheckStatus::Error => "fail",
        }
    }
}

/// One line of the report
#[derive(Debug, Clone, PartialEq)]
pub struct CheckItem {
    pub group: String,
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub recommendation: Option<String>,
}

/// Preflight results
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub items: Vec<CheckItem>,
}

impl CheckReport {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(
        &mut self,
        group: &str,
        name: &str,
        status: CheckStatus,
        message: impl Into<String>,
        recommendation: Option<String>,
    ) {
        self.items.push(CheckItem {
            group: group.to_string(),
            name: name.to_string(),
            status,
            message: message.into(),
            recommendation,
        });
    }

    pub fn add_pass(&mut self, group: &str, name: &str, message: impl Into<String>) {
        self.add(group, name, CheckStatus::Pass, message, None);
    }

    pub fn add_warning(
        &mut self,
        group: &str,
        name: &str,
        message: impl Into<String>,
        recommendation: Option<String>,
    ) {
        self.add(group, name, CheckStatus::Warning, message, recommendation);
    }

    pub fn add_error(
        &mut self,
        group: &str,
        name: &str,
        message: impl Into<String>,
        recommendation: Option<String>,
    ) {
        self.add(group, name, CheckStatus::Error, message, recommendation);
    }

    fn count(&self, status: CheckStatus) -> usize {
        self.items.iter().filter(|i| i.status == status).count()
    }

    pub fn passes(&self) -> usize {
        self.count(CheckStatus::Pass)
    }

    pub fn warnings(&self) -> usize {
        self.count(CheckStatus::Warning)
    }

    pub fn errors(&self) -> usize {
        self.count(CheckStatus::Error)
    }

    pub fn is_success(&self) -> bool {
        self.errors() == 0
    }
}

/// What to check
pub struct CheckTarget<'a> {
    /// Directory holding `.gitignore`
    pub root: &'a Path,
    pub config: &'a Config,
    pub inputs: &'a InputSet,
    pub gcloud_available: bool,
}

pub fn run_check<L: ProjectLookup, S: ArtifactStore>(
    target: &CheckTarget<'_>,
    lookup: &L,
    store: &S,
) -> CheckReport {
    let mut report = CheckReport::new();

    check_inputs(target, &mut report);
    check_gcloud(target, lookup, &mut report);
    let template = check_template(target, store, &mut report);
    check_artifact(target, store, template.as_ref(), &mut report);

    report
}

fn check_inputs(target: &CheckTarget<'_>, report: &mut CheckReport) {
    for key in InputKey::REQUIRED {
        if target.inputs.present(key).is_some() {
            report.add_pass("Inputs", key.name(), "set");
        } else {
            report.add_error(
                "Inputs",
                key.name(),
                "missing or empty",
                Some(format!("export {}=... or add it to .env", key.name())),
            );
        }
    }
}

fn check_gcloud<L: ProjectLookup>(target: &CheckTarget<'_>, lookup: &L, report: &mut CheckReport) {
    let binary = &target.config.gcloud.binary;
    if target.gcloud_available {
        report.add_pass("gcloud", "binary", format!("{} is available", binary));
    } else {
        report.add_error(
            "gcloud",
            "binary",
            format!("{} not found or not runnable", binary),
            Some("Install the Google Cloud SDK or set [gcloud].binary / STAMP_GCLOUD".to_string()),
        );
    }

    let lookup = target.gcloud_available.then_some(lookup);
    let (project_id, source) = match resolve_project_id(target.inputs, target.config, lookup) {
        Ok(resolved) => resolved,
        Err(err) => {
            report.add_error(
                "gcloud",
                "project",
                err.to_string(),
                Some("Set PROJECT_ID or [project].id in stamp.toml".to_string()),
            );
            return;
        }
    };

    match lookup {
        Some(lookup) => match lookup.project_number(&project_id) {
            Ok(number) => report.add_pass(
                "gcloud",
                "project",
                format!("{} ({}) via {}", project_id, number, source.as_str()),
            ),
            Err(err) => report.add_error(
                "gcloud",
                "project",
                err.to_string(),
                Some("Run `gcloud auth login` and verify the project id".to_string()),
            ),
        },
        None => report.add_warning(
            "gcloud",
            "project",
            format!("{} via {} (number not verified)", project_id, source.as_str()),
            None,
        ),
    }
}

fn check_template<S: ArtifactStore>(
    target: &CheckTarget<'_>,
    store: &S,
    report: &mut CheckReport,
) -> Option<Template> {
    let path = &target.config.template.source;
    let text = match store.read_template(path) {
        Ok(text) => text,
        Err(err) => {
            report.add_error("Template", "source", err.to_string(), None);
            return None;
        }
    };

    let template = Template::parse(&text);
    let placeholders = template.placeholders();
    report.add_pass(
        "Template",
        "source",
        format!("{} ({} placeholders)", path.display(), placeholders.len()),
    );

    let unknown: Vec<&str> = placeholders
        .iter()
        .copied()
        .filter(|name| InputKey::from_name(name).is_none())
        .collect();
    if unknown.is_empty() {
        report.add_pass("Template", "placeholders", "all placeholders have inputs");
    } else {
        report.add_warning(
            "Template",
            "placeholders",
            format!("no input for {}", unknown.join(", ")),
            Some(format!(
                "Known placeholders: {}",
                InputKey::ALL.map(|k| k.name()).join(", ")
            )),
        );
    }

    Some(template)
}

fn check_artifact<S: ArtifactStore>(
    target: &CheckTarget<'_>,
    store: &S,
    template: Option<&Template>,
    report: &mut CheckReport,
) {
    let output = &target.config.template.output;

    if is_git_ignored(target.root, output) {
        report.add_pass("Artifact", "gitignore", format!("{} is git-ignored", output.display()));
    } else {
        report.add_warning(
            "Artifact",
            "gitignore",
            format!("{} is not covered by .gitignore", output.display()),
            Some(format!("Add '{}' to .gitignore; it contains secrets", output.display())),
        );
    }

    let existing = match store.read_artifact(output) {
        Ok(Some(existing)) => existing,
        Ok(None) => {
            report.add_pass("Artifact", "drift", "not rendered yet");
            return;
        }
        Err(err) => {
            report.add_error("Artifact", "drift", err.to_string(), None);
            return;
        }
    };

    let Some(template) = template else {
        return;
    };

    let Some(values) = template.extract(&existing) else {
        report.add_warning(
            "Artifact",
            "drift",
            format!("{} no longer matches the template", output.display()),
            Some("Run `stamp render` to regenerate it".to_string()),
        );
        return;
    };

    let stale: Vec<&str> = values
        .iter()
        .filter_map(|(name, value)| {
            let key = InputKey::from_name(name)?;
            let current = target.inputs.present(key)?;
            (current != value.as_str()).then_some(key.name())
        })
        .collect();

    if stale.is_empty() {
        report.add_pass("Artifact", "drift", "up to date with current inputs");
    } else {
        report.add_warning(
            "Artifact",
            "drift",
            format!("stale values for {}", stale.join(", ")),
            Some("Run `stamp render` to regenerate it".to_string()),
        );
    }
}
