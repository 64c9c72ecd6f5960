//! Materialize-and-deploy pipeline
//!
//! `Validate → Resolve → Substitute → Write → Deploy`, strictly in order.
//! The first failing stage ends the run; later stages never start.

use std::path::PathBuf;

use crate::config::Config;
use crate::domain::entities::{DeployRequest, InputSet, Template, UnmatchedPlaceholder};
use crate::domain::ports::{
    ArtifactStore, DeployEvent, DeployEventSink, Deployer, ProjectLookup, Stage,
};
use crate::domain::value_objects::{InputKey, UnmatchedPolicy};
use crate::error::{StampError, StampResult};

/// Where the project id came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSource {
    /// `--project` or `PROJECT_ID`
    Input,
    /// `[project].id`
    Config,
    /// `gcloud config get-value project`
    GcloudDefault,
}

impl ProjectSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectSource::Input => "PROJECT_ID",
            ProjectSource::Config => "config",
            ProjectSource::GcloudDefault => "gcloud default",
        }
    }
}

/// Project id from inputs, then config, then the gcloud default.
///
/// Without a lookup the gcloud default is not consulted.
pub fn resolve_project_id<L: ProjectLookup>(
    inputs: &InputSet,
    config: &Config,
    lookup: Option<&L>,
) -> StampResult<(String, ProjectSource)> {
    if let Some(id) = inputs.present(InputKey::ProjectId) {
        return Ok((id.to_string(), ProjectSource::Input));
    }
    if let Some(id) = config.project.id.as_deref().filter(|s| !s.trim().is_empty()) {
        return Ok((id.to_string(), ProjectSource::Config));
    }
    if let Some(lookup) = lookup {
        if let Some(id) = lookup.default_project()? {
            return Ok((id, ProjectSource::GcloudDefault));
        }
    }
    Err(StampError::ExternalLookupFailure {
        what: "project id".to_string(),
        message: "no project configured; set PROJECT_ID, [project].id, \
                  or run `gcloud config set project <id>`"
            .to_string(),
    })
}

/// Per-run switches
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    /// Stop after substitution; write nothing, deploy nothing
    pub dry_run: bool,
    /// Write the artifact but do not deploy (`stamp render`)
    pub skip_deploy: bool,
    /// Treat unmatched placeholders as fatal regardless of config
    pub strict: bool,
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    pub output: PathBuf,
    pub digest: String,
    pub project_id: String,
    pub project_number: String,
    pub unmatched: Vec<UnmatchedPlaceholder>,
    pub artifact_written: bool,
    pub deployed: bool,
    /// Deploy command with secrets masked
    pub command: String,
}

/// Pipeline wired to its ports
pub struct DeployPipeline<'a, L, D, S>
where
    L: ProjectLookup,
    D: Deployer,
    S: ArtifactStore,
{
    config: &'a Config,
    lookup: &'a L,
    deployer: &'a D,
    store: &'a S,
    events: &'a dyn DeployEventSink,
}

impl<'a, L, D, S> DeployPipeline<'a, L, D, S>
where
    L: ProjectLookup,
    D: Deployer,
    S: ArtifactStore,
{
    pub fn new(
        config: &'a Config,
        lookup: &'a L,
        deployer: &'a D,
        store: &'a S,
        events: &'a dyn DeployEventSink,
    ) -> Self {
        Self {
            config,
            lookup,
            deployer,
            store,
            events,
        }
    }

    pub fn run(&self, mut inputs: InputSet, options: PipelineOptions) -> StampResult<DeployOutcome> {
        let template_path = &self.config.template.source;
        let output_path = &self.config.template.output;

        self.events.on_event(DeployEvent::Started {
            template: template_path.clone(),
            output: output_path.clone(),
            service: self.config.service.name.clone(),
        });

        // Validate
        let template_text = self.stage(Stage::Validate, || {
            inputs.validate_required()?;
            self.store.read_template(template_path)
        })?;
        self.completed(Stage::Validate, "required inputs present");

        // Resolve derived values
        let (project_id, project_number) =
            self.stage(Stage::ResolveDerived, || self.resolve_project(&inputs))?;
        inputs.insert(InputKey::ProjectId, project_id.clone());
        inputs.insert(InputKey::ProjectNumber, project_number.clone());
        self.completed(
            Stage::ResolveDerived,
            format!("project {} ({})", project_id, project_number),
        );

        // Substitute
        let template = Template::parse(&template_text);
        let materialized = template.substitute(&inputs);
        for unmatched in &materialized.unmatched {
            tracing::warn!(
                placeholder = %unmatched.name,
                lines = ?unmatched.lines,
                "template placeholder has no matching input"
            );
            self.events.on_event(DeployEvent::Unmatched(unmatched.clone()));
        }
        let strict = options.strict || self.config.template.unmatched == UnmatchedPolicy::Error;
        if strict && !materialized.is_complete() {
            return self.fail(
                Stage::Substitute,
                StampError::TemplateMismatch {
                    file: template_path.clone(),
                    names: materialized.unmatched_names(),
                },
            );
        }
        if let Err(message) = materialized.validate_yaml() {
            tracing::warn!(%message, "materialized artifact is not valid YAML");
            self.events.on_event(DeployEvent::InvalidYaml { message });
        }
        let request = self.build_request(&inputs, &project_id);
        let command = self.stage(Stage::Substitute, || {
            request.display_command(self.deployer.name())
        })?;
        let digest = materialized.digest();
        self.completed(Stage::Substitute, digest.clone());

        // Write artifact
        let artifact_written = if options.dry_run {
            self.skipped(Stage::WriteArtifact, "dry run");
            false
        } else {
            self.stage(Stage::WriteArtifact, || {
                self.store.write_artifact(output_path, &materialized.content)
            })?;
            self.completed(Stage::WriteArtifact, output_path.display().to_string());
            true
        };

        // Deploy
        let deployed = if options.dry_run {
            self.skipped(Stage::InvokeDeploy, "dry run");
            false
        } else if options.skip_deploy {
            self.skipped(Stage::InvokeDeploy, "render only");
            false
        } else {
            if let Err(err) = self.deployer.deploy(&request) {
                if artifact_written {
                    self.discard_artifact();
                }
                return self.fail(Stage::InvokeDeploy, err);
            }
            self.completed(Stage::InvokeDeploy, self.config.service.name.clone());
            true
        };

        self.events.on_event(DeployEvent::Completed {
            digest: digest.clone(),
            deployed,
        });

        Ok(DeployOutcome {
            output: output_path.clone(),
            digest,
            project_id,
            project_number,
            unmatched: materialized.unmatched,
            artifact_written,
            deployed,
            command,
        })
    }

    fn resolve_project(&self, inputs: &InputSet) -> StampResult<(String, String)> {
        let (project_id, source) = resolve_project_id(inputs, self.config, Some(self.lookup))?;
        tracing::debug!(project = %project_id, source = source.as_str(), "resolved project id");
        let project_number = self.lookup.project_number(&project_id)?;
        Ok((project_id, project_number))
    }

    fn build_request(&self, inputs: &InputSet, project_id: &str) -> DeployRequest {
        let service = &self.config.service;
        DeployRequest {
            service: service.name.clone(),
            source: service.source.clone(),
            region: service.region.clone(),
            platform: service.platform.clone(),
            project_id: project_id.to_string(),
            profile: self.config.resources.clone(),
            allow_unauthenticated: service.allow_unauthenticated,
            env: DeployRequest::env_from_inputs(inputs, &service.region),
        }
    }

    /// Remove an artifact whose deploy failed so it is not mistaken for live config
    fn discard_artifact(&self) {
        let path = &self.config.template.output;
        match self.store.remove_artifact(path) {
            Ok(()) => tracing::info!(path = %path.display(), "removed artifact of failed deploy"),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "could not remove artifact")
            }
        }
    }

    fn stage<T>(&self, stage: Stage, f: impl FnOnce() -> StampResult<T>) -> StampResult<T> {
        tracing::debug!(%stage, "stage started");
        f().or_else(|err| self.fail(stage, err))
    }

    fn fail<T>(&self, stage: Stage, err: StampError) -> StampResult<T> {
        tracing::debug!(%stage, "stage failed");
        self.events.on_event(DeployEvent::StageFailed {
            stage,
            error: err.to_string(),
        });
        Err(err)
    }

    fn completed(&self, stage: Stage, detail: impl Into<String>) {
        self.events.on_event(DeployEvent::StageCompleted {
            stage,
            detail: detail.into(),
        });
    }

    fn skipped(&self, stage: Stage, reason: &str) {
        self.events.on_event(DeployEvent::StageSkipped {
            stage,
            reason: reason.to_string(),
        });
    }
}
